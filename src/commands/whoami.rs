use super::Context;
use crate::{libs::messages::Message, msg_info, msg_print};
use anyhow::Result;

pub async fn cmd() -> Result<()> {
    let ctx = Context::connect(None).await?;
    match ctx.current() {
        Some(session) => {
            msg_print!(Message::Welcome(session.user.greeting_name()));
            if let Some(email) = &session.user.email {
                msg_print!(Message::SignedInAs(email.clone()));
            }
        }
        None => msg_info!(Message::NotLoggedInHint),
    }
    Ok(())
}
