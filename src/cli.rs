use crate::commands::handlers::DueChoice;
use crate::commands::{add, configure, done, export, import, logout, projects, view};
use crate::config::Config;
use crate::utils::error::AppResult;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "todo")]
#[command(about = "A personal Todoist command-line client")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Log debug output to stderr")]
    pub debug: bool,

    #[arg(
        short,
        long,
        value_name = "NAME",
        global = true,
        help = "Work in this project instead of the default one"
    )]
    pub project: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Commands {
    pub async fn execute(
        self,
        config: Config,
        config_path: &Path,
        project: Option<&str>,
    ) -> AppResult<()> {
        match self {
            Commands::Add(args) => add::handle_add_command(&config, &args, project).await,
            Commands::Done(args) => done::handle_done_command(&config, &args, project).await,
            Commands::View => view::handle_view_command(&config, project).await,
            Commands::Import(args) => {
                import::handle_import_command(&config, &args, project).await
            }
            Commands::Export(args) => export::handle_export_command(&config, &args).await,
            Commands::Projects => projects::handle_projects_command(&config).await,
            Commands::Logout => logout::handle_logout_command(&config),
            Commands::Config(args) => {
                configure::handle_config_command(&config, config_path, args.command)
            }
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a task
    Add(AddArgs),

    /// Create a task and mark it complete right away
    Done(AddArgs),

    /// Show the project's active tasks grouped by section
    View,

    /// Create sections and tasks from markdown-like lines
    Import(ImportArgs),

    /// Back up all active tasks to a JSON file
    Export(ExportArgs),

    /// List project names
    Projects,

    /// Remove the saved API token and project ID from the keyring
    Logout,

    /// Configuration management
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(help = "Task text; a trailing [YYMMDD] sets the due date")]
    pub text: Vec<String>,

    #[arg(long, value_name = "WHEN", help = "Due date in words, e.g. \"next monday\"")]
    pub due: Option<String>,

    #[arg(long, conflicts_with = "due", help = "Create the task without a due date")]
    pub no_due: bool,
}

impl AddArgs {
    pub fn due_choice(&self) -> DueChoice {
        match (&self.due, self.no_due) {
            (_, true) => DueChoice::Never,
            (Some(phrase), false) => DueChoice::Phrase(phrase.clone()),
            (None, false) => DueChoice::Default,
        }
    }
}

#[derive(Args)]
pub struct ImportArgs {
    #[arg(short, long, help = "Read lines from this file instead of stdin")]
    pub file: Option<PathBuf>,

    #[arg(long, help = "Print what would be created without contacting Todoist")]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    #[arg(help = "Directory to write the backup into")]
    pub dir: PathBuf,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommands>,
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset {
        #[arg(long, help = "Do not ask for confirmation")]
        force: bool,
    },

    /// Set one key, e.g. `general.default_project Work`
    Set { key: String, value: String },
}
