use super::Context;
use crate::{
    libs::{messages::Message, task::TaskFilter, view::View},
    msg_info, msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Which tasks to show; defaults to the configured filter
    #[arg(short, long, value_enum)]
    filter: Option<TaskFilter>,
}

pub async fn cmd(args: ListArgs) -> Result<()> {
    let mut ctx = Context::connect(args.filter).await?;
    let session = ctx.current();
    if session.is_none() {
        msg_info!(Message::NotLoggedInHint);
        return Ok(());
    }

    ctx.tasks.fetch(session.as_ref()).await?;
    msg_print!(Message::TasksHeader(ctx.tasks.filter().to_string()), true);
    if ctx.tasks.tasks().is_empty() {
        msg_info!(Message::NoTasksYet);
        return Ok(());
    }
    View::tasks(ctx.tasks.tasks())
}
