//! Process settings read from the environment (`.env` honoured).

use crate::error::ConfigError;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::net::SocketAddr;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8082";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Connection parameters for the store. All fields are required.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DbSettings {
    pub dialect: String,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub name: String,
    pub password: String,
    pub max_connections: u32,
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub db: DbSettings,
    pub listen_addr: SocketAddr,
    pub max_body_bytes: usize,
}

impl Settings {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::MissingVar(name));

        let dialect = required("DIALECT")?;
        if !matches!(dialect.to_ascii_lowercase().as_str(), "postgres" | "postgresql") {
            return Err(ConfigError::UnsupportedDialect(dialect));
        }
        let db = DbSettings {
            dialect,
            host: required("HOST")?,
            port: parse_var("DBPORT", &required("DBPORT")?)?,
            user: required("USER")?,
            name: required("NAME")?,
            password: required("PASSWORD")?,
            max_connections: match lookup("DB_MAX_CONNECTIONS") {
                Some(v) => parse_var("DB_MAX_CONNECTIONS", &v)?,
                None => DEFAULT_MAX_CONNECTIONS,
            },
        };

        let listen_addr = lookup("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.into());
        let listen_addr = parse_var("LISTEN_ADDR", &listen_addr)?;
        let max_body_bytes = match lookup("MAX_BODY_BYTES") {
            Some(v) => parse_var("MAX_BODY_BYTES", &v)?,
            None => DEFAULT_MAX_BODY_BYTES,
        };

        Ok(Settings {
            db,
            listen_addr,
            max_body_bytes,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidVar {
        name,
        value: value.to_string(),
    })
}

impl DbSettings {
    /// Driver options; TLS is disabled.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.name)
            .password(&self.password)
            .ssl_mode(PgSslMode::Disable)
    }

    /// Key/value connection string with the password redacted, for logs.
    pub fn connection_string(&self) -> String {
        format!(
            "host={} user={} dbname={} sslmode=disable password=*** port={}",
            self.host, self.user, self.name, self.port
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn base() -> HashMap<String, String> {
        env(&[
            ("DIALECT", "postgres"),
            ("HOST", "db.local"),
            ("DBPORT", "5433"),
            ("USER", "library"),
            ("NAME", "shelf"),
            ("PASSWORD", "s3cret"),
        ])
    }

    fn load(vars: &HashMap<String, String>) -> Result<Settings, ConfigError> {
        Settings::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn reads_required_vars_and_defaults() {
        let s = load(&base()).unwrap();
        assert_eq!(s.db.host, "db.local");
        assert_eq!(s.db.port, 5433);
        assert_eq!(s.db.user, "library");
        assert_eq!(s.db.name, "shelf");
        assert_eq!(s.db.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(s.listen_addr.port(), 8082);
        assert_eq!(s.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
    }

    #[test]
    fn missing_var_is_reported_by_name() {
        let mut vars = base();
        vars.remove("PASSWORD");
        assert!(matches!(load(&vars), Err(ConfigError::MissingVar("PASSWORD"))));
    }

    #[test]
    fn bad_port_is_rejected() {
        let mut vars = base();
        vars.insert("DBPORT".into(), "fifty".into());
        match load(&vars) {
            Err(ConfigError::InvalidVar { name, value }) => {
                assert_eq!(name, "DBPORT");
                assert_eq!(value, "fifty");
            }
            other => panic!("expected InvalidVar, got {:?}", other),
        }
    }

    #[test]
    fn only_postgres_dialect() {
        let mut vars = base();
        vars.insert("DIALECT".into(), "PostgreSQL".into());
        assert!(load(&vars).is_ok());
        vars.insert("DIALECT".into(), "mysql".into());
        assert!(matches!(load(&vars), Err(ConfigError::UnsupportedDialect(d)) if d == "mysql"));
    }

    #[test]
    fn overrides_listen_addr_and_pool_size() {
        let mut vars = base();
        vars.insert("LISTEN_ADDR".into(), "127.0.0.1:9000".into());
        vars.insert("DB_MAX_CONNECTIONS".into(), "12".into());
        let s = load(&vars).unwrap();
        assert_eq!(s.listen_addr.to_string(), "127.0.0.1:9000");
        assert_eq!(s.db.max_connections, 12);
    }

    #[test]
    fn connection_string_hides_password() {
        let s = load(&base()).unwrap();
        let cs = s.db.connection_string();
        assert_eq!(
            cs,
            "host=db.local user=library dbname=shelf sslmode=disable password=*** port=5433"
        );
        assert!(!cs.contains("s3cret"));
    }
}
