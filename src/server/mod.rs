use std::{
    future::Future,
    net::{IpAddr, SocketAddr},
    time::Duration,
};

use axum::{routing::get, Router};
use error_stack::{Report, ResultExt};
use http::HeaderValue;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    request_id::{MakeRequestId, RequestId},
    timeout::TimeoutLayer,
    trace::{DefaultOnFailure, DefaultOnRequest, TraceLayer},
    ServiceBuilderExt,
};
use tracing::{event, Level, Span};

use crate::{error::Error, pages, properties::SlugProperties};

mod assets;
mod health;
#[cfg(test)]
mod tests;

/// Tags each request without an id with a new UUIDv7.
#[derive(Clone, Copy, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = uuid::Uuid::now_v7();
        let value = HeaderValue::from_str(&id.to_string()).ok()?;
        Some(RequestId::new(value))
    }
}

/// Turn a panicking handler into the styled 500 page.
fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> axum::response::Response {
    let detail = err
        .downcast_ref::<String>()
        .map(|s| s.as_str())
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("");
    event!(Level::ERROR, panic = detail, "Panic while handling a request");

    pages::server_error_page(SlugProperties::default())
}

/// The server and related information
pub struct Server {
    /// The host the server is bound to
    pub host: String,
    /// The port the server is bound to
    pub port: u16,
    /// The server itself
    pub app: Router<()>,
    /// The server's TCP listener
    pub listener: tokio::net::TcpListener,
}

impl Server {
    /// Run the server, shutting down gracefully on SIGINT or SIGTERM.
    pub async fn run(self) -> Result<(), Report<Error>> {
        let shutdown = shutdown_signal();
        self.run_with_shutdown_signal(shutdown).await
    }

    /// Run the server, shutting down gracefully once `shutdown` resolves.
    pub async fn run_with_shutdown_signal(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), Report<Error>> {
        axum::serve(
            self.listener,
            self.app
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown)
        .await
        .change_context(Error::ServerStart)?;

        Ok(())
    }
}

/// Resolves when the process receives SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("installing ctrl+c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("installing SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Create a TCP listener for the server.
pub async fn create_tcp_listener(
    host: &str,
    port: u16,
) -> Result<tokio::net::TcpListener, Report<Error>> {
    let bind_ip = host.parse::<IpAddr>().change_context(Error::ServerStart)?;
    let bind_addr = SocketAddr::from((bind_ip, port));
    tokio::net::TcpListener::bind(bind_addr)
        .await
        .change_context(Error::ServerStart)
}

pub enum ServerBind {
    /// A host and port to bind to
    HostPort(String, u16),
    /// An existing TCP listener to use
    Listener(tokio::net::TcpListener),
}

/// Configuration for the server
pub struct Config {
    /// The environment we're running in. Currently this just gets logged at
    /// startup.
    pub env: String,
    /// The host and port to bind to, or an existing TCP listener
    pub bind: ServerBind,
    /// How long to wait before timing out a request
    pub request_timeout: Duration,
}

/// Create the server and return it, ready to run.
pub async fn create_server(config: Config) -> Result<Server, Report<Error>> {
    let app = Router::new()
        .route("/healthz", get(health::healthz))
        .route("/static/*path", get(assets::serve_asset))
        .fallback(pages::not_found_fallback);

    let app = app.layer(
        ServiceBuilder::new()
            .layer(CatchPanicLayer::custom(handle_panic))
            .set_x_request_id(MakeRequestUuidV7)
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(|req: &axum::extract::Request| {
                        let method = req.method();
                        let uri = req.uri();

                        // Add the matched route to the span
                        let route = req
                            .extensions()
                            .get::<axum::extract::MatchedPath>()
                            .map(|matched_path| matched_path.as_str());

                        let request_id = req
                            .headers()
                            .get("X-Request-Id")
                            .and_then(|s| s.to_str().ok())
                            .unwrap_or("");

                        tracing::info_span!("request",
                            request_id,
                            http.method=%method,
                            http.uri=%uri,
                            http.route=route,
                            http.status_code = tracing::field::Empty,
                            error = tracing::field::Empty
                        )
                    })
                    .on_response(
                        |res: &http::Response<_>, latency: Duration, span: &Span| {
                            let status = res.status();
                            span.record("http.status_code", status.as_u16());
                            if status.is_client_error() || status.is_server_error() {
                                span.record("error", "true");
                            }

                            tracing::info!(
                                latency = %format!("{} ms", latency.as_millis()),
                                http.status_code = status.as_u16(),
                                "finished processing request"
                            );
                        },
                    )
                    .on_request(DefaultOnRequest::new().level(Level::INFO))
                    .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
            )
            .layer(TimeoutLayer::new(config.request_timeout))
            .propagate_x_request_id()
            .layer(CompressionLayer::new())
            .into_inner(),
    );

    let listener = match config.bind {
        ServerBind::Listener(l) => l,
        ServerBind::HostPort(host, port) => create_tcp_listener(&host, port).await?,
    };

    let actual_addr = listener.local_addr().change_context(Error::ServerStart)?;
    let port = actual_addr.port();
    let host = actual_addr.ip().to_string();
    event!(Level::INFO, env = %config.env, "Listening on {host}:{port}");

    Ok(Server {
        host,
        port,
        app,
        listener,
    })
}
