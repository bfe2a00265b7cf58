//! Interactive task manager.
//!
//! A menu loop over the same controllers the one-shot commands use. Guests
//! can log in or create an account; signed-in users get the task actions.
//! The task list is re-fetched whenever the session-change stream reports a
//! new value, so logging in loads the list once and logging out empties it.
//! The session is refreshed before every prompt and action, so a long-lived
//! menu keeps working after the access token expires.
//!
//! Failed actions are reported and the loop continues.

use super::{prompts, report, Context};
use crate::{
    libs::{
        messages::Message,
        session::Session,
        task::{Task, TaskFilter},
        task_list::PromptConfirmation,
        view::View,
    },
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Select};

#[derive(Debug, Args)]
pub struct AppArgs {
    /// Initial filter; defaults to the configured filter
    #[arg(short, long, value_enum)]
    filter: Option<TaskFilter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Login,
    CreateAccount,
    AddTask,
    ToggleComplete,
    EditTask,
    DeleteTask,
    ToggleArchive,
    ChangeFilter,
    ClearCompleted,
    Refresh,
    Logout,
    Quit,
}

impl Action {
    pub fn label(&self) -> Message {
        match self {
            Action::Login => Message::MenuLogin,
            Action::CreateAccount => Message::MenuCreateAccount,
            Action::AddTask => Message::MenuAddTask,
            Action::ToggleComplete => Message::MenuToggleComplete,
            Action::EditTask => Message::MenuEditTask,
            Action::DeleteTask => Message::MenuDeleteTask,
            Action::ToggleArchive => Message::MenuToggleArchive,
            Action::ChangeFilter => Message::MenuChangeFilter,
            Action::ClearCompleted => Message::MenuClearCompleted,
            Action::Refresh => Message::MenuRefresh,
            Action::Logout => Message::MenuLogout,
            Action::Quit => Message::MenuQuit,
        }
    }
}

/// Actions offered in the current state. Clearing completed tasks is only
/// offered while the completed view is shown.
pub fn menu_actions(authenticated: bool, filter: TaskFilter) -> Vec<Action> {
    if !authenticated {
        return vec![Action::Login, Action::CreateAccount, Action::Quit];
    }

    let mut actions = vec![
        Action::AddTask,
        Action::ToggleComplete,
        Action::EditTask,
        Action::DeleteTask,
        Action::ToggleArchive,
        Action::ChangeFilter,
    ];
    if filter == TaskFilter::Completed {
        actions.push(Action::ClearCompleted);
    }
    actions.extend([Action::Refresh, Action::Logout, Action::Quit]);
    actions
}

pub async fn cmd(args: AppArgs) -> Result<()> {
    let mut ctx = Context::connect(args.filter).await?;

    // The restored session counts as seen; load its list up front
    let mut signed_in = false;
    if let Some(session) = ctx.current() {
        msg_success!(Message::Welcome(session.user.greeting_name()));
        signed_in = true;
        if let Err(e) = ctx.tasks.fetch(Some(&session)).await {
            report(&e);
        }
    }

    loop {
        if ctx.session.is_authenticated() {
            if let Err(e) = ctx.session.ensure_fresh().await {
                report(&e);
            }
        }

        if ctx.session.has_changed() {
            let session = ctx.session.mark_seen();
            // A rotated token is a change too, but only a new login is greeted
            match &session {
                Some(session) if !signed_in => msg_success!(Message::Welcome(session.user.greeting_name())),
                _ => {}
            }
            signed_in = session.is_some();
            if let Err(e) = ctx.tasks.fetch(session.as_ref()).await {
                report(&e);
            }
        }

        let authenticated = ctx.session.is_authenticated();
        if authenticated {
            render(&ctx);
        } else {
            msg_info!(Message::NotLoggedInHint);
        }

        let action = select_action(&menu_actions(authenticated, ctx.tasks.filter()))?;
        if action == Action::Quit {
            break;
        }
        if let Err(e) = run(&mut ctx, action).await {
            report(&e);
        }
    }

    msg_print!(Message::Goodbye);
    Ok(())
}

fn render(ctx: &Context) {
    msg_print!(Message::TasksHeader(ctx.tasks.filter().to_string()), true);
    if ctx.tasks.tasks().is_empty() {
        msg_info!(Message::NoTasksYet);
    } else {
        View::tasks_table(ctx.tasks.tasks()).printstd();
    }
}

fn select_action(actions: &[Action]) -> Result<Action> {
    let items = actions.iter().map(|action| action.label().to_string()).collect::<Vec<_>>();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptSelectAction.to_string())
        .items(&items)
        .default(0)
        .interact_opt()?;

    // Esc leaves the app
    Ok(selection.map(|index| actions[index]).unwrap_or(Action::Quit))
}

/// Lets the user pick one of the displayed tasks. `None` when there are none or
/// the prompt was dismissed.
fn select_task(tasks: &[Task]) -> Result<Option<Task>> {
    if tasks.is_empty() {
        msg_info!(Message::NoTasksYet);
        return Ok(None);
    }
    let items = tasks.iter().map(View::task_label).collect::<Vec<_>>();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptSelectTask.to_string())
        .items(&items)
        .default(0)
        .interact_opt()?;
    Ok(selection.map(|index| tasks[index].clone()))
}

fn select_filter(current: TaskFilter) -> Result<Option<TaskFilter>> {
    let filters = TaskFilter::ALL;
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptSelectFilter.to_string())
        .items(&filters.iter().map(|f| f.to_string()).collect::<Vec<_>>())
        .default(filters.iter().position(|f| *f == current).unwrap_or(0))
        .interact_opt()?;
    Ok(selection.map(|index| filters[index]))
}

async fn run(ctx: &mut Context, action: Action) -> Result<()> {
    // The prompts before this point may have outlived the access token.
    // Logout works offline, so it skips the refresh.
    if ctx.session.is_authenticated() && action != Action::Logout {
        ctx.session.ensure_fresh().await?;
    }
    let session = ctx.current();

    match action {
        Action::Login => {
            msg_print!(Message::LoginHeader, true);
            let email = prompts::email(None)?;
            let password = prompts::password()?;
            ctx.session.login(&email, &password).await?;
        }
        Action::CreateAccount => {
            msg_print!(Message::CreateAccountHeader, true);
            let display_name = prompts::display_name()?;
            let email = prompts::email(None)?;
            let password = prompts::new_password()?;
            ctx.session.sign_up(&email, &password, &display_name).await?;
            msg_success!(Message::SignUpConfirmEmail);
        }
        Action::AddTask => {
            let draft = prompts::task_draft(ctx.tasks.draft())?;
            *ctx.tasks.draft_mut() = draft;
            let task = ctx.tasks.submit(session.as_ref()).await?;
            msg_success!(Message::TaskCreated(task.title));
        }
        Action::ToggleComplete => {
            if let Some(task) = select_task(ctx.tasks.tasks())? {
                ctx.tasks.toggle_complete(session.as_ref(), task.id, task.is_complete).await?;
            }
        }
        Action::EditTask => {
            let Some(task) = select_task(ctx.tasks.tasks())? else {
                return Ok(());
            };
            ctx.tasks.start_editing(&task);
            msg_print!(Message::EditingTask(task.title.clone()), true);
            let saved = edit_selected(ctx, session.as_ref()).await;
            if saved.is_err() {
                ctx.tasks.cancel_editing();
            }
            saved?;
            msg_success!(Message::TaskUpdated(task.id));
        }
        Action::DeleteTask => {
            if let Some(task) = select_task(ctx.tasks.tasks())? {
                if ctx.tasks.delete(session.as_ref(), task.id, &PromptConfirmation).await? {
                    msg_success!(Message::TaskDeleted(task.id));
                }
            }
        }
        Action::ToggleArchive => {
            if let Some(task) = select_task(ctx.tasks.tasks())? {
                ctx.tasks.toggle_archive(session.as_ref(), task.id, task.is_archived).await?;
            }
        }
        Action::ChangeFilter => {
            if let Some(filter) = select_filter(ctx.tasks.filter())? {
                ctx.tasks.set_filter(filter, session.as_ref()).await;
            }
        }
        Action::ClearCompleted => {
            if let Some(count) = ctx.tasks.clear_completed(session.as_ref(), &PromptConfirmation).await? {
                msg_success!(Message::CompletedTasksCleared(count));
            }
        }
        Action::Refresh => ctx.tasks.fetch(session.as_ref()).await?,
        Action::Logout => {
            ctx.session.logout().await?;
            msg_success!(Message::LoggedOut);
        }
        Action::Quit => {}
    }
    Ok(())
}

async fn edit_selected(ctx: &mut Context, session: Option<&Session>) -> Result<()> {
    if let Some(draft) = ctx.tasks.edit_draft_mut() {
        *draft = prompts::task_draft(draft)?;
    }
    ctx.tasks.save_edit(session).await
}
