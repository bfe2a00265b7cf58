use super::Context;
use crate::{
    libs::{messages::Message, task_list::PromptConfirmation},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Task ID
    #[arg(required = true)]
    id: i64,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

pub async fn cmd(args: DeleteArgs) -> Result<()> {
    let mut ctx = Context::connect(None).await?;
    let session = ctx.current();

    let deleted = if args.yes {
        ctx.tasks.delete(session.as_ref(), args.id, &true).await?
    } else {
        ctx.tasks.delete(session.as_ref(), args.id, &PromptConfirmation).await?
    };

    if deleted {
        msg_success!(Message::TaskDeleted(args.id));
    } else {
        msg_info!(Message::OperationCancelled);
    }
    Ok(())
}
