use super::Context;
use crate::{
    libs::{messages::Message, task_list::PromptConfirmation},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ClearArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

pub async fn cmd(args: ClearArgs) -> Result<()> {
    let mut ctx = Context::connect(None).await?;
    let session = ctx.current();

    let cleared = if args.yes {
        ctx.tasks.clear_completed(session.as_ref(), &true).await?
    } else {
        ctx.tasks.clear_completed(session.as_ref(), &PromptConfirmation).await?
    };

    match cleared {
        Some(count) => msg_success!(Message::CompletedTasksCleared(count)),
        None => msg_info!(Message::OperationCancelled),
    }
    Ok(())
}
