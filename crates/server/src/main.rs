//! Roster employee search service.

use clap::Parser;
use roster_persistence::backends::memory::MemoryBackend;
use roster_rest::{ServerConfig, StorageBackendMode, create_app_with_config, init_logging};
use tracing::info;

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        storage_backend = %config.storage_backend,
        scroll_keep_alive = %config.scroll_keep_alive,
        "Starting Roster"
    );

    match config.storage_backend {
        StorageBackendMode::Elasticsearch => start_elasticsearch(config).await,
        StorageBackendMode::Memory => start_memory(config).await,
    }
}

/// Starts the server with the in-memory backend.
async fn start_memory(config: ServerConfig) -> anyhow::Result<()> {
    info!("Using in-memory backend; records are lost on exit");
    let app = create_app_with_config(MemoryBackend::new(), config.clone());
    serve(app, &config).await
}

/// Starts the server with the Elasticsearch backend.
#[cfg(feature = "elasticsearch")]
async fn start_elasticsearch(config: ServerConfig) -> anyhow::Result<()> {
    use roster_persistence::backends::elasticsearch::{
        ElasticsearchAuth, ElasticsearchBackend, ElasticsearchConfig,
    };
    use roster_persistence::core::Backend;

    let es_nodes = config.elasticsearch_node_list();

    let es_auth = match (
        &config.elasticsearch_username,
        &config.elasticsearch_password,
    ) {
        (Some(username), Some(password)) => Some(ElasticsearchAuth::Basic {
            username: username.clone(),
            password: password.clone(),
        }),
        _ => None,
    };

    let es_config = ElasticsearchConfig {
        nodes: es_nodes.clone(),
        index: config.elasticsearch_index.clone(),
        auth: es_auth,
        ..Default::default()
    };

    info!(
        nodes = ?es_nodes,
        index = %config.elasticsearch_index,
        "Initializing Elasticsearch backend"
    );

    let backend = ElasticsearchBackend::new(es_config)?;
    backend.initialize().await?;

    let app = create_app_with_config(backend, config.clone());
    serve(app, &config).await
}

/// Fallback when elasticsearch feature is not enabled.
#[cfg(not(feature = "elasticsearch"))]
async fn start_elasticsearch(_config: ServerConfig) -> anyhow::Result<()> {
    anyhow::bail!(
        "The elasticsearch backend requires the 'elasticsearch' feature. \
         Build with: cargo build -p roster-server --features elasticsearch"
    )
}
