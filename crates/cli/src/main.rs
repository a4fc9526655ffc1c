use anyhow::Context;
use clap::{Parser, Subcommand};
use shelf_app::bootstrap;
use shelf_kernel::settings::Settings;

/// Book catalogue service backed by PostgreSQL.
#[derive(Parser, Debug)]
#[command(name = "shelf", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Default)]
enum Command {
    /// Migrate the database and serve the HTTP API (default)
    #[default]
    Serve,
    /// Apply pending migrations and exit
    Migrate,
    /// Print the resolved configuration as JSON, password redacted
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = bootstrap::load_settings()?;

    match cli.command.unwrap_or_default() {
        Command::Config => print_config(&settings),
        Command::Migrate => {
            shelf_telemetry::init(&settings.telemetry)?;
            bootstrap::migrate(&settings).await.inspect_err(|err| {
                tracing::error!(error = ?err, "migration failed");
            })
        }
        Command::Serve => {
            shelf_telemetry::init(&settings.telemetry)?;
            tracing::info!(
                env = ?settings.environment,
                db = %settings.database.redacted_url(),
                "shelf starting"
            );
            bootstrap::serve(settings).await.inspect_err(|err| {
                tracing::error!(error = ?err, "shelf terminated");
            })
        }
    }
}

fn print_config(settings: &Settings) -> anyhow::Result<()> {
    let rendered =
        serde_json::to_string_pretty(settings).context("failed to render configuration")?;
    println!("{rendered}");
    Ok(())
}
