use sanimon_config::{AppConfig, ConfigError, StorageBackend};

// 环境变量是进程级状态，所有场景放在同一个测试里顺序执行。
#[test]
fn load_config_from_env() {
    // Rust 2024 中 set_var 需要显式标注 unsafe（测试进程内可控）。
    unsafe {
        std::env::remove_var("SANIMON_STORAGE");
        std::env::remove_var("SANIMON_DATABASE_URL");
    }
    let err = AppConfig::from_env().expect_err("postgres needs a url");
    assert!(matches!(err, ConfigError::Missing(key) if key == "SANIMON_DATABASE_URL"));

    unsafe {
        std::env::set_var("SANIMON_DATABASE_URL", "postgres://sanimon@localhost/sanimon");
        std::env::set_var("SANIMON_HTTP_ADDR", "127.0.0.1:8081");
        std::env::set_var("SANIMON_DB_MAX_CONNECTIONS", "4");
    }
    let config = AppConfig::from_env().expect("config");
    assert_eq!(config.http_addr, "127.0.0.1:8081");
    assert_eq!(config.storage, StorageBackend::Postgres);
    assert_eq!(config.db_max_connections, 4);
    assert!(!config.seed_demo);

    unsafe {
        std::env::set_var("SANIMON_STORAGE", "Memory");
        std::env::remove_var("SANIMON_DATABASE_URL");
        std::env::set_var("SANIMON_SEED_DEMO", "true");
    }
    let config = AppConfig::from_env().expect("memory config");
    assert_eq!(config.storage, StorageBackend::Memory);
    assert_eq!(config.database_url, None);
    assert!(config.seed_demo);

    unsafe {
        std::env::set_var("SANIMON_STORAGE", "sqlite");
    }
    let err = AppConfig::from_env().expect_err("unknown backend");
    assert!(matches!(err, ConfigError::Invalid(key, value) if key == "SANIMON_STORAGE" && value == "sqlite"));

    unsafe {
        std::env::set_var("SANIMON_STORAGE", "memory");
        std::env::set_var("SANIMON_DB_MAX_CONNECTIONS", "many");
    }
    let err = AppConfig::from_env().expect_err("bad pool size");
    assert!(matches!(err, ConfigError::Invalid(key, _) if key == "SANIMON_DB_MAX_CONNECTIONS"));
}
