// Server configuration.
//
// All settings come from environment variables with defaults suited to
// local development.

use std::net::SocketAddr;

const DEFAULT_PORT: u16 = 3000;

/// Core server configuration.
///
/// Constructed via [`ServerConfig::from_env`] which reads environment
/// variables and falls back to development defaults.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address (host:port).
    pub listen_addr: SocketAddr,
    /// Comma-separated CORS origins (or `"*"` for any).
    pub cors_origins: Option<String>,
    /// Log filter directive (e.g. `info`, `taskboard_server=debug`).
    pub log_filter: String,
    /// Whether a fresh store starts with the two starter tasks.
    pub seed_tasks: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_env_fn(|_| Err(std::env::VarError::NotPresent))
    }
}

impl ServerConfig {
    /// Parse configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `TASKBOARD_HOST` | `0.0.0.0` |
    /// | `TASKBOARD_PORT` | `3000` |
    /// | `TASKBOARD_CORS_ORIGINS` | *(none — cors.rs uses dev defaults)* |
    /// | `TASKBOARD_LOG_FILTER` | `info` |
    /// | `TASKBOARD_SEED_TASKS` | `true` |
    pub fn from_env() -> Self {
        Self::from_env_fn(|key| std::env::var(key))
    }

    /// Testable constructor that accepts an environment lookup function.
    fn from_env_fn<F>(env: F) -> Self
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        let host = env("TASKBOARD_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 =
            env("TASKBOARD_PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(DEFAULT_PORT);
        let listen_addr = format!("{host}:{port}")
            .parse()
            .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], port)));

        let cors_origins = env("TASKBOARD_CORS_ORIGINS").ok();
        let log_filter = env("TASKBOARD_LOG_FILTER").unwrap_or_else(|_| "info".into());
        let seed_tasks = env("TASKBOARD_SEED_TASKS").ok().map_or(true, |v| parse_flag(&v));

        Self { listen_addr, cors_origins, log_filter, seed_tasks }
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(value.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from_map(
        map: HashMap<&'static str, &'static str>,
    ) -> impl Fn(&str) -> Result<String, std::env::VarError> {
        move |key: &str| map.get(key).map(|v| v.to_string()).ok_or(std::env::VarError::NotPresent)
    }

    #[test]
    fn defaults_when_no_env_vars() {
        let cfg = ServerConfig::from_env_fn(env_from_map(HashMap::new()));
        assert_eq!(cfg.listen_addr.port(), 3000);
        assert_eq!(cfg.listen_addr.ip().to_string(), "0.0.0.0");
        assert!(cfg.cors_origins.is_none());
        assert_eq!(cfg.log_filter, "info");
        assert!(cfg.seed_tasks);
    }

    #[test]
    fn custom_host_and_port() {
        let mut m = HashMap::new();
        m.insert("TASKBOARD_HOST", "127.0.0.1");
        m.insert("TASKBOARD_PORT", "8081");
        let cfg = ServerConfig::from_env_fn(env_from_map(m));
        assert_eq!(cfg.listen_addr.to_string(), "127.0.0.1:8081");
    }

    #[test]
    fn invalid_port_uses_default() {
        let mut m = HashMap::new();
        m.insert("TASKBOARD_PORT", "not_a_number");
        let cfg = ServerConfig::from_env_fn(env_from_map(m));
        assert_eq!(cfg.listen_addr.port(), 3000);
    }

    #[test]
    fn invalid_host_falls_back_to_any_address() {
        let mut m = HashMap::new();
        m.insert("TASKBOARD_HOST", "not an ip");
        m.insert("TASKBOARD_PORT", "4000");
        let cfg = ServerConfig::from_env_fn(env_from_map(m));
        assert_eq!(cfg.listen_addr.to_string(), "0.0.0.0:4000");
    }

    #[test]
    fn cors_origins_and_log_filter_from_env() {
        let mut m = HashMap::new();
        m.insert("TASKBOARD_CORS_ORIGINS", "https://tasks.example.com");
        m.insert("TASKBOARD_LOG_FILTER", "debug,tower_http=trace");
        let cfg = ServerConfig::from_env_fn(env_from_map(m));
        assert_eq!(cfg.cors_origins.as_deref(), Some("https://tasks.example.com"));
        assert_eq!(cfg.log_filter, "debug,tower_http=trace");
    }

    #[test]
    fn seeding_can_be_disabled() {
        for value in ["0", "false", "OFF", " no "] {
            let mut m = HashMap::new();
            m.insert("TASKBOARD_SEED_TASKS", value);
            let cfg = ServerConfig::from_env_fn(env_from_map(m));
            assert!(!cfg.seed_tasks, "{value:?} should disable seeding");
        }

        let mut m = HashMap::new();
        m.insert("TASKBOARD_SEED_TASKS", "yes");
        assert!(ServerConfig::from_env_fn(env_from_map(m)).seed_tasks);
    }
}
