use super::Context;
use crate::{libs::messages::Message, msg_success};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ArchiveArgs {
    /// Task ID
    #[arg(required = true)]
    id: i64,
}

pub async fn cmd(args: ArchiveArgs) -> Result<()> {
    let mut ctx = Context::connect(None).await?;
    let session = ctx.current();

    let task = ctx.tasks.lookup(session.as_ref(), args.id).await?;
    ctx.tasks.toggle_archive(session.as_ref(), task.id, task.is_archived).await?;

    if task.is_archived {
        msg_success!(Message::TaskUnarchived(task.id));
    } else {
        msg_success!(Message::TaskArchived(task.id));
    }
    Ok(())
}
