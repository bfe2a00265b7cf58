use super::{prompts, Context};
use crate::{libs::messages::Message, msg_print, msg_success};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct SignupArgs {
    /// Account email, prompted when omitted
    #[arg(short, long)]
    email: Option<String>,
    /// Display name stored in the profile, prompted when omitted
    #[arg(short = 'n', long)]
    name: Option<String>,
}

/// Creates the account. The user confirms by email and then runs `login`.
pub async fn cmd(args: SignupArgs) -> Result<()> {
    let mut ctx = Context::connect(None).await?;

    msg_print!(Message::CreateAccountHeader, true);
    let display_name = match args.name {
        Some(name) if !name.trim().is_empty() => name,
        _ => prompts::display_name()?,
    };
    let email = match args.email {
        Some(email) => email,
        None => prompts::email(None)?,
    };
    let password = prompts::new_password()?;

    ctx.session.sign_up(&email, &password, &display_name).await?;
    msg_success!(Message::SignUpConfirmEmail);
    Ok(())
}
