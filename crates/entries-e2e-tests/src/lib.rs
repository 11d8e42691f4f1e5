use std::time::Duration;

use anyhow::{Result, anyhow};
use entries_server::config::{Parser, ServerConfig};
use entries_server::run::{build_state, run_graceful_with_state};
use rand::Rng as _;
use tempfile::TempDir;
use tokio::sync::oneshot;
use tracing::{debug, error};
use url::Url;

fn random_port() -> Result<u16> {
    let mut rng = rand::rng();

    let mut retries = 10;
    while retries > 0 {
        let port: u16 = rng.random_range(3030..4030);
        match std::net::TcpListener::bind(("127.0.0.1", port)) {
            Ok(_) => return Ok(port),
            Err(_) => retries -= 1,
        }
    }

    Err(anyhow!("Could not find a free port"))
}

pub struct ConfigGuard {
    #[allow(dead_code)]
    data_dir: TempDir,
}

pub fn test_config(test_name: &str) -> Result<(ServerConfig, ConfigGuard)> {
    let tmp_data_dir = TempDir::with_prefix(format!("{}_", test_name))?;
    let data_dir = tmp_data_dir.path().to_string_lossy().to_string();
    let port = random_port()?.to_string();
    let args = &[
        "entries-e2e-tests",
        "--data-dir",
        data_dir.as_str(),
        "--port",
        port.as_str(),
        "--max-connections",
        "5",
    ];
    let config = ServerConfig::try_parse_from(args)?;
    Ok((
        config,
        ConfigGuard {
            data_dir: tmp_data_dir,
        },
    ))
}

/// Running server, stopped when dropped
pub struct ServerGuard {
    shutdown: Option<oneshot::Sender<()>>,
    _config: ConfigGuard,
}

impl Drop for ServerGuard {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

/// Starts server on random port and waits until it is healthy, returns its base URL
pub async fn launch_env(test_name: &str) -> Result<(Url, ServerGuard)> {
    let (config, config_guard) = test_config(test_name)?;
    let base_url = Url::parse(&format!("http://127.0.0.1:{}/", config.port))?;
    let state = build_state(&config).await?;

    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        let shutdown = async {
            let _ = rx.await;
        };
        if let Err(e) = run_graceful_with_state(config, state, shutdown).await {
            error!("Test server failed: {e}");
        }
    });

    let guard = ServerGuard {
        shutdown: Some(tx),
        _config: config_guard,
    };

    let health_url = base_url.join("health")?;
    let client = reqwest::Client::new();
    for _ in 0..50 {
        match client.get(health_url.clone()).send().await {
            Ok(response) if response.status().is_success() => {
                debug!("Test server ready at {base_url}");
                return Ok((base_url, guard));
            }
            _ => tokio::time::sleep(Duration::from_millis(100)).await,
        }
    }
    Err(anyhow!("Test server did not start"))
}

pub fn entries_url(base_url: &Url) -> Url {
    base_url
        .join("api/entries")
        .expect("entries path is valid relative URL")
}
