use clap::Parser;
use error_stack::Report;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use docpage::{
    config::{apply_cli_overrides, find_configs, load_env_files, merge_server_config},
    error::Error,
    server,
};

#[derive(Debug, Parser)]
#[command(version, about = "Error page server for docpage sites")]
struct Cli {
    /// The path to the configuration file, or a directory containing
    /// docpage.toml. If omitted, the default configuration paths are checked.
    #[clap(long, short = 'c')]
    config: Option<String>,

    /// Do not read .env files
    #[clap(long)]
    no_dotenv: bool,

    /// The IP host to bind to
    #[clap(long, env = "HOST")]
    host: Option<String>,

    /// The TCP port to listen on
    #[clap(long, env = "PORT")]
    port: Option<u16>,
}

async fn serve(cmd: Cli) -> Result<(), Report<Error>> {
    let configs = find_configs(cmd.config.clone())?;
    let mut server_config = merge_server_config(&configs);

    // Load the .env files before reading the CLI environment overrides or
    // starting tracing, so they can contribute to both.
    if !cmd.no_dotenv {
        load_env_files(&configs, &server_config);
    }

    // Reread the arguments so --host and --port pick up values that only
    // arrived through the .env files.
    let cmd = Cli::parse();
    apply_cli_overrides(&mut server_config, cmd.host, cmd.port);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_timer(tracing_subscriber::fmt::time::ChronoUtc::rfc_3339()),
        )
        .init();

    for (dir, _) in configs.iter() {
        tracing::info!("Loaded config from {}", dir.display());
    }

    let config = server::Config {
        env: server_config
            .env
            .unwrap_or_else(|| "development".to_string()),
        bind: server::ServerBind::HostPort(
            server_config.host.unwrap_or_else(|| "::1".to_string()),
            server_config.port.unwrap_or(3000),
        ),
        request_timeout: std::time::Duration::from_secs(
            server_config.request_timeout.unwrap_or(30),
        ),
    };

    let server = server::create_server(config).await?;
    server.run().await?;

    Ok(())
}

async fn actual_main() -> Result<(), Report<Error>> {
    error_stack::Report::set_color_mode(error_stack::fmt::ColorMode::None);
    let cli = Cli::parse();
    serve(cli).await
}

fn main() -> Result<(), Report<Error>> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("building tokio runtime");

    runtime.block_on(actual_main())
}
