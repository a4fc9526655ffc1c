//! Process wiring shared by the `shelf-server` and `shelf` binaries.

use std::sync::Arc;

use anyhow::Context;
use shelf_db::{BookStore, DbPool, PgBookStore};
use shelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use crate::modules;

/// Load settings, installing a fallback subscriber so a failure still gets logged.
pub fn load_settings() -> anyhow::Result<Settings> {
    Settings::load()
        .context("failed to load shelf settings")
        .inspect_err(|err| {
            shelf_telemetry::init_fallback();
            tracing::error!(error = ?err, "startup failed");
        })
}

/// Registry holding every module, wired to `store`.
pub fn build_registry(store: Arc<dyn BookStore>) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, store);
    registry
}

/// Open the pool, bring the schema up to date and register modules on it.
pub async fn connect_and_migrate(
    settings: &Settings,
) -> anyhow::Result<(DbPool, ModuleRegistry)> {
    let pool = shelf_db::connect(&settings.database)
        .await
        .context("could not connect to the database")?;

    shelf_db::run_migrations(&pool)
        .await
        .context("could not migrate the database")?;
    tracing::info!("database schema is up to date");

    let registry = build_registry(Arc::new(PgBookStore::new(pool.clone())));

    Ok((pool, registry))
}

/// Run the service until a shutdown signal arrives.
pub async fn serve(settings: Settings) -> anyhow::Result<()> {
    let (pool, registry) = connect_and_migrate(&settings).await?;

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    let served =
        shelf_http::start_server(&registry, &settings.server, shelf_http::shutdown_signal()).await;

    let stopped = registry.stop_all().await;
    pool.close().await;
    tracing::info!("database pool closed");

    served?;
    stopped
}

/// Apply pending migrations and exit.
pub async fn migrate(settings: &Settings) -> anyhow::Result<()> {
    let (pool, _registry) = connect_and_migrate(settings).await?;
    pool.close().await;
    Ok(())
}
