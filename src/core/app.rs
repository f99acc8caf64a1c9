//! Core application bootstrap, in the teacher's `CoreApp::run()` style:
//! load `.env`, init logging, parse CLI, load config, construct the storage
//! handle, install analyzers once, print the banner, then serve.

use std::sync::Arc;

use anyhow::Result;

use super::banner;
use super::cli::{self, Commands};
use super::config::AppConfig;
use super::constants::{APP_NAME_LOWER, ENV_LOG};
use super::schema_registry::SchemaRegistry;
use crate::api;
use crate::filtering::analyzers;
use crate::storage::{ArangoStorage, StubArangoStorage};

pub struct CoreApp {
    pub config: AppConfig,
    pub storage: Arc<dyn ArangoStorage>,
    pub schemas: Arc<SchemaRegistry>,
}

impl CoreApp {
    /// Parse CLI args, load config, wire dependencies, install analyzers,
    /// and serve until the process receives a shutdown signal.
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("Application starting");

        let (cli_config, command) = cli::parse();
        match command {
            Some(Commands::Serve) | None => {}
        }

        let app = Self::init(&cli_config).await?;
        Self::start_server(app).await
    }

    async fn init(cli: &cli::CliConfig) -> Result<Self> {
        let config = AppConfig::load(cli)?;

        // The real ArangoDB client is an external collaborator per spec §1
        // ("the underlying database client ... is out of scope"); this
        // service wires the stub so it is runnable standalone. A production
        // deployment swaps this for a concrete `ArangoStorage` impl talking
        // to `config.arango`.
        let stub = Arc::new(StubArangoStorage::new());
        analyzers::install_analyzers(stub.as_ref()).await?;
        let storage: Arc<dyn ArangoStorage> = stub;

        let schemas = Arc::new(SchemaRegistry::new(config.generic_view_products.clone()));

        Ok(Self { config, storage, schemas })
    }

    fn init_logging() {
        let default_filter = format!("info,{APP_NAME_LOWER}=debug");
        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .compact()
            .with_env_filter(filter)
            .init();
    }

    async fn start_server(app: Self) -> Result<()> {
        let host = app.config.server.host.clone();
        let port = app.config.server.port;
        let generic_products = app.config.generic_view_products.len();

        let router = api::build_router(Arc::new(app));
        let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;

        banner::print_banner(&host, port, generic_products);
        tracing::info!(%host, port, "listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
