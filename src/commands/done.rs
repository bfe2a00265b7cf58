use super::Context;
use crate::{libs::messages::Message, msg_success};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct DoneArgs {
    /// Task ID
    #[arg(required = true)]
    id: i64,
}

pub async fn cmd(args: DoneArgs) -> Result<()> {
    let mut ctx = Context::connect(None).await?;
    let session = ctx.current();

    let task = ctx.tasks.lookup(session.as_ref(), args.id).await?;
    ctx.tasks.toggle_complete(session.as_ref(), task.id, task.is_complete).await?;

    if task.is_complete {
        msg_success!(Message::TaskMarkedActive(task.id));
    } else {
        msg_success!(Message::TaskMarkedComplete(task.id));
    }
    Ok(())
}
