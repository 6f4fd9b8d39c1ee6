//! Food Diary
//!
//! An MCP server for meal logging with calorie and macro goals.

use std::sync::Arc;

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use food_diary::api::ApiClient;
use food_diary::auth::AuthClient;
use food_diary::build_info;
use food_diary::catalog::{MealCatalog, PredefinedCatalog, RemoteCatalog};
use food_diary::config::{CatalogSource, Config};
use food_diary::db;
use food_diary::mcp::DiaryService;
use food_diary::storage::{SqliteStorage, Storage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("food_diary=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let config = Config::from_env();
    eprintln!("Database path: {}", config.database_path.display());

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let database = db::Database::new(&config.database_path)?;
    database.with_conn(|conn| {
        db::migrations::run_migrations(conn)?;
        let version = db::migrations::get_schema_version(conn)?;
        eprintln!("Database schema version: {}", version);
        Ok(())
    })?;

    let storage: Arc<dyn Storage> = Arc::new(SqliteStorage::new(database.clone()));
    let api = ApiClient::new(&config.api_url, config.http_timeout)?;

    let catalog: Arc<dyn MealCatalog> = match config.catalog {
        CatalogSource::Predefined => Arc::new(PredefinedCatalog::default()),
        CatalogSource::Remote => Arc::new(RemoteCatalog::new(api.clone())),
    };
    tracing::info!(
        catalog = catalog.source(),
        api_url = %config.api_url,
        require_auth = config.require_auth,
        "Configuration loaded"
    );

    let service = DiaryService::new(
        config.database_path.clone(),
        database,
        storage,
        catalog,
        AuthClient::new(api),
        config.require_auth,
    )?;

    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;
    server.waiting().await?;

    Ok(())
}
