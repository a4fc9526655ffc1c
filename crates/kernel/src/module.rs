use async_trait::async_trait;
use axum::Router;

use crate::settings::Settings;

/// Handed to every module hook that runs while the process is starting.
pub struct InitCtx<'a> {
    pub settings: &'a Settings,
}

/// A self-contained slice of the service: HTTP routes, their OpenAPI
/// description and an optional lifecycle.
///
/// Hooks run in this order: `init`, `start`, then `stop` once the listener
/// has drained. The schema is migrated before any module is initialized.
#[async_trait]
pub trait Module: Sync + Send {
    /// Stable identifier used in logs and lifecycle errors.
    fn name(&self) -> &'static str;

    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Routes relative to the `/api` mount point.
    fn routes(&self) -> Router {
        Router::new()
    }

    /// OpenAPI fragment with `paths` and `components.schemas`, merged into
    /// `/docs/openapi.json`.
    fn openapi(&self) -> Option<serde_json::Value> {
        None
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
