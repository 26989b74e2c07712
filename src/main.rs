use clap::Parser;
use todo_cli::cli::Cli;
use todo_cli::config::Config;
use todo_cli::utils::error::{AppResult, report_error};
use todo_cli::utils::output::set_color;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        tracing::debug!(error = ?err, "command failed");
        report_error(&err);
        std::process::exit(err.exit_code());
    }
}

/// Log to stderr only; stdout belongs to command output.
fn init_logging(debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "warn" }));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn run(cli: Cli) -> AppResult<()> {
    let Cli {
        config: custom_path,
        project,
        command,
        ..
    } = cli;

    let config_path = custom_path.unwrap_or_else(Config::config_file_path);
    let config = Config::load_custom(&config_path)?;
    set_color(config.general.color);

    command.execute(config, &config_path, project.as_deref()).await
}
