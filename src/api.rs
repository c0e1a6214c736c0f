use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tokio::net::ToSocketAddrs;

use crate::metrics::MetricsRegistry;

mod models;

pub use models::{ContainerEntry, ContainerIdentifier, MetricsExport};

async fn export_metrics(registry: State<Arc<MetricsRegistry>>) -> Response {
    let export = MetricsExport::from(registry.snapshot());
    log::debug!("exporting metrics for {} containers", export.containers.len());
    (axum::http::StatusCode::OK, Json(export)).into_response()
}

/// Serves the registry's metrics as JSON on `GET /metrics`.
pub struct ApiServer {
    router: axum::Router,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to bind export listener: {0}")]
    Bind(#[source] std::io::Error),
    #[error("export server failed: {0}")]
    Serve(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl ApiServer {
    pub fn new(registry: Arc<MetricsRegistry>) -> Self {
        let router = axum::Router::new()
            .route("/metrics", get(export_metrics))
            .with_state(registry);
        Self { router }
    }

    pub fn router(&self) -> axum::Router {
        self.router.clone()
    }

    /// Binds `addr` and serves until the process exits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bind`] if the address cannot be bound and
    /// [`Error::Serve`] if serving fails afterwards.
    pub async fn listen(self, addr: impl ToSocketAddrs) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(Error::Bind)?;
        if let Ok(local) = listener.local_addr() {
            log::info!("serving container metrics on http://{local}/metrics");
        }
        axum::serve(listener, self.router.into_make_service())
            .await
            .map_err(Error::Serve)
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Debug;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::container::{ContainerRef, ContainerToken, Namespace};
    use crate::metrics::{NamespaceMatch, OperationAttrs, OperationEvent, OperationKind};

    async fn get_metrics(registry: Arc<MetricsRegistry>) -> serde_json::Value {
        let response = ApiServer::new(registry)
            .router()
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_export_empty() {
        let registry = Arc::new(MetricsRegistry::new(
            Namespace::new("app").unwrap(),
            NamespaceMatch::Prefix,
        ));
        let body = get_metrics(registry).await;
        assert_eq!(body["namespace"], "app");
        assert_eq!(body["containers"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_export_metrics() {
        let registry = Arc::new(MetricsRegistry::new(
            Namespace::new("app").unwrap(),
            NamespaceMatch::Prefix,
        ));
        let reference = ContainerRef::with_token(ContainerToken::from_raw(3), "Vec", "app::jobs");
        let container = vec![1u8, 2];
        let args: &[&dyn Debug] = &[&1u8, &2u8];
        let event = OperationEvent::new(OperationKind::Insert, "add", args, &reference, &container);
        registry.record(&event, &OperationAttrs::sized(0, 2));

        let body = get_metrics(registry).await;
        let entry = &body["containers"][0];
        assert_eq!(entry["reference"]["token"], 3);
        assert_eq!(entry["reference"]["type_name"], "Vec");
        assert_eq!(entry["reference"]["namespace"], "app::jobs");
        assert_eq!(entry["metric"]["calls"], 1);
        assert_eq!(entry["metric"]["inserts"]["bulk"], 1);
        assert_eq!(entry["metric"]["size"]["growths"], 1);
    }
}
