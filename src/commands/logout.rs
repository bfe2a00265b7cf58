use super::Context;
use crate::{libs::messages::Message, msg_success};
use anyhow::Result;

pub async fn cmd() -> Result<()> {
    let mut ctx = Context::connect(None).await?;
    ctx.session.logout().await?;
    msg_success!(Message::LoggedOut);
    Ok(())
}
