use super::{prompts, Context};
use crate::{
    libs::{messages::Message, task::Priority},
    msg_bail_anyhow, msg_print, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Task ID
    #[arg(required = true)]
    id: i64,
    /// New title
    #[arg(short, long)]
    title: Option<String>,
    /// New description; pass an empty string to clear it
    #[arg(short, long)]
    description: Option<String>,
    /// New due date (YYYY-MM-DD); pass an empty string to clear it
    #[arg(long)]
    due: Option<String>,
    /// New priority
    #[arg(short, long, value_enum)]
    priority: Option<Priority>,
}

impl EditArgs {
    fn has_changes(&self) -> bool {
        self.title.is_some() || self.description.is_some() || self.due.is_some() || self.priority.is_some()
    }
}

/// Edits a task. Without any field flags the form is shown pre-filled.
pub async fn cmd(args: EditArgs) -> Result<()> {
    let mut ctx = Context::connect(None).await?;
    let session = ctx.current();

    let task = ctx.tasks.lookup(session.as_ref(), args.id).await?;
    ctx.tasks.start_editing(&task);

    let interactive = !args.has_changes();
    let Some(draft) = ctx.tasks.edit_draft_mut() else {
        msg_bail_anyhow!(Message::NotEditing);
    };
    if interactive {
        msg_print!(Message::EditingTask(task.title.clone()), true);
        *draft = prompts::task_draft(draft)?;
    } else {
        if let Some(title) = args.title {
            draft.title = title;
        }
        if let Some(description) = args.description {
            draft.description = description;
        }
        if let Some(due) = args.due {
            draft.due_date = due;
        }
        if let Some(priority) = args.priority {
            draft.priority = priority;
        }
    }

    ctx.tasks.save_edit(session.as_ref()).await?;
    msg_success!(Message::TaskUpdated(task.id));
    Ok(())
}
