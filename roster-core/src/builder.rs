use axum::middleware::{from_fn, from_fn_with_state};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tracing::info;

use crate::csrf::{verify_csrf, CsrfGuard};
use crate::layers::{default_trace, panic_response};
use crate::method_override::method_override;
use crate::secure_headers::SecureHeaders;

/// Assembles the application router with the form plumbing and cross-cutting
/// layers, and serves it.
///
/// Layer order, outermost first: tracing, panic recovery, secure headers,
/// method override, CSRF verification, then routing.
///
/// ```ignore
/// let router = controllers::routes().with_state(state);
/// AppBuilder::new(router)
///     .csrf(server.csrf)
///     .serve(&server.addr)
///     .await?;
/// ```
pub struct AppBuilder {
    router: Router,
    csrf: bool,
    secure_headers: SecureHeaders,
}

impl AppBuilder {
    /// Start from a router whose state has already been applied.
    pub fn new(router: Router) -> Self {
        Self {
            router,
            csrf: true,
            secure_headers: SecureHeaders::default(),
        }
    }

    /// Enable or disable CSRF token verification (enabled by default).
    pub fn csrf(mut self, enabled: bool) -> Self {
        self.csrf = enabled;
        self
    }

    pub fn secure_headers(mut self, headers: SecureHeaders) -> Self {
        self.secure_headers = headers;
        self
    }

    /// Build the final `axum::Router`.
    pub fn build(self) -> Router {
        // Routing happens inside this service, after the method has been
        // rewritten.
        let inner = ServiceBuilder::new()
            .layer(from_fn(method_override))
            .layer(from_fn_with_state(
                CsrfGuard { enabled: self.csrf },
                verify_csrf,
            ))
            .service(self.router);

        let app = Router::new().fallback_service(inner);
        self.secure_headers
            .apply(app)
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(default_trace())
    }

    /// Build the application and serve it on `addr` until Ctrl-C / SIGTERM.
    pub async fn serve(self, addr: &str) -> Result<(), std::io::Error> {
        let app = self.build();
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!(%addr, "Roster server listening");
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        info!("Roster server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
