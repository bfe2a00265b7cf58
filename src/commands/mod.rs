pub mod add;
pub mod app;
pub mod archive;
pub mod clear;
pub mod delete;
pub mod done;
pub mod edit;
pub mod init;
pub mod list;
pub mod login;
pub mod logout;
pub mod prompts;
pub mod signup;
pub mod whoami;

use crate::api::{BackendClient, SupabaseAuth, SupabaseTasks};
use crate::libs::config::Config;
use crate::libs::session::{Session, SessionController};
use crate::libs::task::TaskFilter;
use crate::libs::task_list::TaskList;
use crate::msg_error;
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configure the backend connection and view defaults")]
    Init(init::InitArgs),
    #[command(about = "Create an account")]
    Signup(signup::SignupArgs),
    #[command(about = "Log in with email and password")]
    Login(login::LoginArgs),
    #[command(about = "Log out and forget the stored session")]
    Logout,
    #[command(about = "Show the logged-in user")]
    Whoami,
    #[command(about = "List tasks")]
    List(list::ListArgs),
    #[command(about = "Add a task")]
    Add(add::AddArgs),
    #[command(about = "Toggle a task between active and complete")]
    Done(done::DoneArgs),
    #[command(about = "Archive or unarchive a task")]
    Archive(archive::ArchiveArgs),
    #[command(about = "Edit a task's title, description, due date and priority")]
    Edit(edit::EditArgs),
    #[command(about = "Delete a task")]
    Delete(delete::DeleteArgs),
    #[command(about = "Delete all completed tasks")]
    Clear(clear::ClearArgs),
    #[command(about = "Interactive task manager")]
    App(app::AppArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Signup(args) => signup::cmd(args).await,
            Commands::Login(args) => login::cmd(args).await,
            Commands::Logout => logout::cmd().await,
            Commands::Whoami => whoami::cmd().await,
            Commands::List(args) => list::cmd(args).await,
            Commands::Add(args) => add::cmd(args).await,
            Commands::Done(args) => done::cmd(args).await,
            Commands::Archive(args) => archive::cmd(args).await,
            Commands::Edit(args) => edit::cmd(args).await,
            Commands::Delete(args) => delete::cmd(args).await,
            Commands::Clear(args) => clear::cmd(args).await,
            Commands::App(args) => app::cmd(args).await,
        }
    }
}

/// Prints an error without aborting the caller.
pub fn report(err: &anyhow::Error) {
    msg_error!(err);
}

/// Everything a command needs: configuration, the session controller and a task list.
pub struct Context {
    pub config: Config,
    pub session: SessionController<SupabaseAuth>,
    pub tasks: TaskList<SupabaseTasks>,
}

impl Context {
    /// Reads the configuration and restores the stored session.
    ///
    /// `filter` falls back to the configured default.
    pub async fn connect(filter: Option<TaskFilter>) -> Result<Self> {
        let config = Config::read()?;
        let client = BackendClient::new(&config.backend()?);
        let mut session = SessionController::new(SupabaseAuth::new(client.clone()));
        // An unreachable server leaves the stored session in place
        if let Err(e) = session.restore().await {
            report(&e);
            session.mark_seen();
        }
        let tasks = TaskList::new(SupabaseTasks::new(client), filter.unwrap_or(config.default_filter()));
        Ok(Self { config, session, tasks })
    }

    pub fn current(&self) -> Option<Session> {
        self.session.session()
    }
}
