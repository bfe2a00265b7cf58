use super::{prompts, Context};
use crate::{
    libs::{messages::Message, view::View},
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email, prompted when omitted
    #[arg(short, long)]
    email: Option<String>,
}

pub async fn cmd(args: LoginArgs) -> Result<()> {
    let mut ctx = Context::connect(None).await?;

    let email = match args.email {
        Some(email) => email,
        None => prompts::email(None)?,
    };
    let password = prompts::password()?;

    ctx.session.login(&email, &password).await?;

    // The provider has published the new session; pick it up and load the list once
    let session = ctx.session.mark_seen();
    let Some(session) = session else {
        return Ok(());
    };
    msg_success!(Message::Welcome(session.user.greeting_name()));

    ctx.tasks.fetch(Some(&session)).await?;
    msg_print!(Message::TasksHeader(ctx.tasks.filter().to_string()), true);
    if ctx.tasks.tasks().is_empty() {
        msg_info!(Message::NoTasksYet);
    } else {
        View::tasks(ctx.tasks.tasks())?;
    }
    Ok(())
}
