//! Interactive form fields shared by the one-shot commands and the menu.

use crate::libs::messages::Message;
use crate::libs::task::{parse_due_date, Priority, TaskDraft};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, Password, Select};

pub fn email(default: Option<String>) -> Result<String> {
    let theme = ColorfulTheme::default();
    let mut input = Input::<String>::with_theme(&theme).with_prompt(Message::PromptEmail.to_string());
    if let Some(default) = default {
        input = input.default(default);
    }
    Ok(input.interact_text()?)
}

pub fn password() -> Result<String> {
    Ok(Password::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptPassword.to_string())
        .interact()?)
}

/// Password entered twice, for account creation.
pub fn new_password() -> Result<String> {
    Ok(Password::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptPassword.to_string())
        .with_confirmation(Message::PromptPasswordConfirm.to_string(), Message::PromptPasswordMismatch.to_string())
        .interact()?)
}

pub fn display_name() -> Result<String> {
    Ok(Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptDisplayName.to_string())
        .validate_with(|input: &String| -> Result<(), String> {
            if input.trim().is_empty() {
                Err(Message::DisplayNameRequired.to_string())
            } else {
                Ok(())
            }
        })
        .interact_text()?)
}

pub fn priority(default: Priority) -> Result<Priority> {
    let items = Priority::ALL;
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptTaskPriority.to_string())
        .items(&items.iter().map(|p| p.to_string()).collect::<Vec<_>>())
        .default(items.iter().position(|p| *p == default).unwrap_or(1))
        .interact()?;
    Ok(items[selection])
}

/// Walks through the task form, pre-filled from `defaults`.
pub fn task_draft(defaults: &TaskDraft) -> Result<TaskDraft> {
    let theme = ColorfulTheme::default();

    let mut title = Input::<String>::with_theme(&theme).with_prompt(Message::PromptTaskTitle.to_string());
    if !defaults.title.is_empty() {
        title = title.default(defaults.title.clone());
    }
    let title = title
        .validate_with(|input: &String| -> Result<(), String> {
            if input.trim().is_empty() {
                Err(Message::TaskTitleRequired.to_string())
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let description = Input::<String>::with_theme(&theme)
        .with_prompt(Message::PromptTaskDescription.to_string())
        .default(defaults.description.clone())
        .allow_empty(true)
        .interact_text()?;

    let due_date = Input::<String>::with_theme(&theme)
        .with_prompt(Message::PromptTaskDueDate.to_string())
        .default(defaults.due_date.clone())
        .allow_empty(true)
        .validate_with(|input: &String| -> Result<(), String> { parse_due_date(input).map(|_| ()).map_err(|e| e.to_string()) })
        .interact_text()?;

    let priority = priority(defaults.priority)?;

    Ok(TaskDraft::new(&title, &description, &due_date, priority))
}
