use error_stack::Report;
use futures::future::FutureExt;

use crate::{error::Error, server};

/// A running server plus everything a test needs to talk to it and shut it
/// down.
pub struct TestApp {
    /// Hold on to the shutdown signal so the server stays alive
    pub shutdown_tx: tokio::sync::oneshot::Sender<()>,
    pub client: reqwest::Client,
    pub base_url: String,
    pub server_task: tokio::task::JoinHandle<Result<(), Report<Error>>>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

pub async fn start_app() -> TestApp {
    error_stack::Report::set_color_mode(error_stack::fmt::ColorMode::None);

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    // Ignore the error when the sender is just dropped, and make the future
    // resolve to () as the shutdown signal expects.
    let shutdown_rx = shutdown_rx.map(|_| ());

    // Bind port 0 so parallel tests never collide.
    let listener = server::create_tcp_listener("127.0.0.1", 0)
        .await
        .expect("binding test listener");
    let port = listener
        .local_addr()
        .expect("reading listener address")
        .port();
    let base_url = format!("http://127.0.0.1:{port}");

    let config = server::Config {
        env: "test".to_string(),
        bind: server::ServerBind::Listener(listener),
        request_timeout: std::time::Duration::from_secs(30),
    };

    let server = server::create_server(config)
        .await
        .expect("creating server");
    let server_task = tokio::task::spawn(server.run_with_shutdown_signal(shutdown_rx));

    TestApp {
        shutdown_tx,
        client: reqwest::Client::new(),
        base_url,
        server_task,
    }
}
