use std::path::{Path, PathBuf};

use error_stack::{Report, ResultExt};
use etcetera::BaseStrategy;
use serde::Deserialize;

use crate::error::Error;

/// One parsed docpage.toml.
#[derive(Debug, Default, Deserialize)]
pub struct LocalConfig {
    /// The IP address to bind to
    pub host: Option<String>,
    /// The port to listen on
    pub port: Option<u16>,
    /// The environment name, e.g. "development" or "production"
    pub env: Option<String>,
    /// Seconds before an in-flight request is abandoned
    pub request_timeout: Option<u64>,
    /// Set false to skip loading the .env file next to this config
    pub dotenv: Option<bool>,
}

/// The discovered configuration files.
pub struct Configs {
    /// Files from the user-level configuration directories
    pub global: Vec<(PathBuf, LocalConfig)>,
    /// Files found walking up from the current directory
    pub cwd: Vec<(PathBuf, LocalConfig)>,
}

impl Configs {
    /// All configs in application order. Global configs come first, then
    /// directory configs from outermost to the current directory, so later
    /// entries take precedence when merging.
    pub fn iter(&self) -> impl Iterator<Item = &(PathBuf, LocalConfig)> {
        self.global.iter().chain(self.cwd.iter())
    }
}

/// Find the relevant config files. If `directory` is given, only that file or
/// directory is consulted and it must contain a config.
pub fn find_configs(directory: Option<String>) -> Result<Configs, Report<Error>> {
    if let Some(directory) = directory {
        let path = PathBuf::from(directory);
        let config = read_config(&path, path.is_dir()).change_context(Error::Config)?;

        let Some(config) = config else {
            return Err(Report::new(Error::Config))
                .attach_printable_lazy(|| format!("No config found in path {}", path.display()));
        };

        return Ok(Configs {
            global: Vec::new(),
            cwd: vec![config],
        });
    }

    Ok(Configs {
        global: find_default_configs()?,
        cwd: find_current_dir_configs()?,
    })
}

/// Search the platform config directories for a docpage config.
fn find_default_configs() -> Result<Vec<(PathBuf, LocalConfig)>, Report<Error>> {
    let etc = etcetera::base_strategy::choose_native_strategy().unwrap();

    [
        etc.home_dir().join(".config").join("docpage"),
        etc.config_dir().join("docpage"),
    ]
    .into_iter()
    .filter_map(|dir| read_config(&dir, true).transpose())
    .collect::<Result<Vec<_>, Report<Error>>>()
}

/// Walk up from the current directory and collect every config on the way,
/// outermost first.
fn find_current_dir_configs() -> Result<Vec<(PathBuf, LocalConfig)>, Report<Error>> {
    let mut configs = std::env::current_dir()
        .change_context(Error::Config)?
        .ancestors()
        .filter_map(|dir| read_config(dir, true).transpose())
        .collect::<Result<Vec<_>, Report<Error>>>()?;

    configs.reverse();
    Ok(configs)
}

/// Read a config file from `path`, or from `path/docpage.toml` when
/// `is_directory` is set. A missing file is not an error.
fn read_config(
    path: &Path,
    is_directory: bool,
) -> Result<Option<(PathBuf, LocalConfig)>, Report<Error>> {
    let file_path = if is_directory {
        path.join("docpage.toml")
    } else {
        path.to_path_buf()
    };

    let contents = match std::fs::read_to_string(&file_path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(Report::new(e).change_context(Error::Config)).attach_printable_lazy(|| {
                format!("Failed to read config file {}", file_path.display())
            });
        }
    };

    tracing::info!("Loading config from {}", file_path.display());

    let config: LocalConfig = toml::from_str(&contents)
        .change_context(Error::Config)
        .attach_printable_lazy(|| format!("Failed to parse config file {}", file_path.display()))?;

    let config_dir = if is_directory {
        path.to_path_buf()
    } else {
        file_path.parent().map(Path::to_path_buf).unwrap_or_default()
    };

    Ok(Some((config_dir, config)))
}

/// Merge the discovered configs. Later entries win, so an inner directory's
/// config overrides the global one. Command line and environment overrides
/// are applied by the caller on top of this.
pub fn merge_server_config(configs: &Configs) -> LocalConfig {
    let mut output = LocalConfig::default();

    for (_, config) in configs.iter() {
        if let Some(host) = &config.host {
            output.host = Some(host.clone());
        }

        if let Some(port) = config.port {
            output.port = Some(port);
        }

        if let Some(env) = &config.env {
            output.env = Some(env.clone());
        }

        if let Some(request_timeout) = config.request_timeout {
            output.request_timeout = Some(request_timeout);
        }

        if let Some(dotenv) = config.dotenv {
            output.dotenv = Some(dotenv);
        }
    }

    output
}

/// Load the .env files next to the discovered configs, then fall back to the
/// working directory's .env.
///
/// dotenvy never overwrites a variable that is already set, so the innermost
/// file has to load first to keep the same inner-over-outer precedence as the
/// config files themselves.
pub fn load_env_files(configs: &Configs, merged: &LocalConfig) {
    let config_dirs = configs.cwd.iter().rev().chain(configs.global.iter().rev());
    for (dir, config) in config_dirs {
        if config.dotenv.unwrap_or(true) {
            dotenvy::from_path(dir.join(".env")).ok();
        }
    }

    if merged.dotenv.unwrap_or(true) {
        dotenvy::dotenv().ok();
    }
}

/// Apply command line and environment overrides on top of the merged file
/// config. Arguments that were not passed leave the file values in place.
pub fn apply_cli_overrides(config: &mut LocalConfig, host: Option<String>, port: Option<u16>) {
    if host.is_some() {
        config.host = host;
    }

    if port.is_some() {
        config.port = port;
    }
}
