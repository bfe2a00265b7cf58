use super::Context;
use crate::{
    libs::{messages::Message, task::Priority},
    msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Task title
    #[arg(required = true)]
    title: String,
    /// Optional description
    #[arg(short, long, default_value = "")]
    description: String,
    /// Due date (YYYY-MM-DD); omit for none
    #[arg(long, default_value = "")]
    due: String,
    /// Priority
    #[arg(short, long, value_enum, default_value_t = Priority::Medium)]
    priority: Priority,
}

pub async fn cmd(args: AddArgs) -> Result<()> {
    let mut ctx = Context::connect(None).await?;
    let session = ctx.current();

    let task = ctx
        .tasks
        .add(session.as_ref(), &args.title, &args.description, &args.due, args.priority)
        .await?;

    msg_success!(Message::TaskCreated(task.title));
    Ok(())
}
