use shelf_app::bootstrap;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = bootstrap::load_settings()?;
    shelf_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.redacted_url(),
        "shelf-server bootstrap starting"
    );

    bootstrap::serve(settings).await.inspect_err(|err| {
        tracing::error!(error = ?err, "shelf-server terminated");
    })
}
