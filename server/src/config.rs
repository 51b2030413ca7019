use clap::{Parser, ValueEnum};

/// Store URIs with this prefix select the in-process store.
pub const MEMORY_STORE_PREFIX: &str = "memory://";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Runtime configuration, read from flags with environment fallbacks.
#[derive(Debug, Clone, Parser)]
#[command(name = "task-server", version, about = "HTTP CRUD service for task records")]
pub struct ServerConfig {
    /// Interface to bind
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Document store address; `memory://` keeps tasks in process
    #[arg(long, env = "MONGODB_URI", default_value = "mongodb://localhost:27017")]
    pub store_uri: String,

    /// Database holding the task collection
    #[arg(long, env = "MONGODB_DB", default_value = "todo-app")]
    pub database: String,

    /// Collection holding task records
    #[arg(long, env = "TASKS_COLLECTION", default_value = "tasks")]
    pub collection: String,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn uses_memory_store(&self) -> bool {
        self.store_uri.starts_with(MEMORY_STORE_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    /// Declared default and env var of an argument, independent of the
    /// environment the test runs in.
    fn declared(id: &str) -> (String, String) {
        let command = ServerConfig::command();
        let arg = command
            .get_arguments()
            .find(|arg| arg.get_id().as_str() == id)
            .unwrap();
        let default = arg.get_default_values()[0].to_str().unwrap().to_string();
        let env = arg.get_env().unwrap().to_str().unwrap().to_string();
        (default, env)
    }

    #[test]
    fn defaults_point_at_local_mongodb() {
        assert_eq!(
            declared("store_uri"),
            ("mongodb://localhost:27017".to_string(), "MONGODB_URI".to_string())
        );
        assert_eq!(
            declared("database"),
            ("todo-app".to_string(), "MONGODB_DB".to_string())
        );
        assert_eq!(
            declared("collection"),
            ("tasks".to_string(), "TASKS_COLLECTION".to_string())
        );
        assert_eq!(declared("host"), ("127.0.0.1".to_string(), "HOST".to_string()));
        assert_eq!(declared("port"), ("3000".to_string(), "PORT".to_string()));
    }

    #[test]
    fn explicit_flags_win_over_environment() {
        let config = ServerConfig::try_parse_from([
            "task-server",
            "--store-uri",
            "mongodb://db.internal:27017",
            "--database",
            "todo-app",
        ])
        .unwrap();
        assert_eq!(config.store_uri, "mongodb://db.internal:27017");
        assert_eq!(config.database, "todo-app");
        assert!(!config.uses_memory_store());
    }

    #[test]
    fn memory_uri_selects_memory_store() {
        let config = ServerConfig::try_parse_from([
            "task-server",
            "--store-uri",
            "memory://",
            "--port",
            "8080",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert!(config.uses_memory_store());
        assert_eq!(config.port, 8080);
        assert!(config.bind_addr().ends_with(":8080"));
        assert_eq!(config.log_format, LogFormat::Json);
    }
}
