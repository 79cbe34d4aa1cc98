//! 服务入口：加载配置、选择存储后端、启动 HTTP 服务。

use chrono::Utc;
use sanimon_api::{AppState, build_app};
use sanimon_config::{AppConfig, ConfigError, StorageBackend};
use sanimon_storage::{InMemoryFacilityStore, connect_pool};
use sanimon_telemetry::init_tracing;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    // 从环境变量加载运行配置
    let config = AppConfig::from_env()?;
    // 初始化结构化日志
    init_tracing();

    let state = match config.storage {
        StorageBackend::Memory => {
            let store = InMemoryFacilityStore::new();
            if config.seed_demo {
                store.seed_demo_fleet(Utc::now())?;
            }
            AppState::in_memory(Arc::new(store))
        }
        StorageBackend::Postgres => {
            // 需先执行 migrations/0001_init.sql
            let database_url = config
                .database_url
                .as_deref()
                .ok_or_else(|| ConfigError::Missing("SANIMON_DATABASE_URL".to_string()))?;
            let pool = connect_pool(database_url, config.db_max_connections).await?;
            AppState::postgres(pool)
        }
    };
    info!(
        target: "sanimon.api",
        http_addr = %config.http_addr,
        storage = %config.storage,
        seed_demo = config.seed_demo,
        "server_starting"
    );

    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
