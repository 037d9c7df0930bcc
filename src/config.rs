use std::env;
use std::time::Duration;

use anyhow::{bail, Context};

use crate::store::{MongoConfig, StoreType};

/// What to do when the database cannot be reached at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupPolicy {
    /// Abort startup
    FailFast,
    /// Log a warning and serve; requests fail until the database comes back
    Degraded,
}

impl StartupPolicy {
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "fail_fast" | "fail-fast" => Ok(StartupPolicy::FailFast),
            "degraded" => Ok(StartupPolicy::Degraded),
            _ => bail!(
                "Unsupported DB_STARTUP_POLICY: {}. Supported policies: fail_fast, degraded",
                s
            ),
        }
    }
}

/// Response to an update whose fields already match the stored record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnchangedUpdate {
    /// Answer 404, as if the record did not exist
    NotFound,
    /// Answer 200 with the unchanged record
    Ok,
}

impl UnchangedUpdate {
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "not_found" | "not-found" | "404" => Ok(UnchangedUpdate::NotFound),
            "ok" | "200" => Ok(UnchangedUpdate::Ok),
            _ => bail!(
                "Unsupported UNCHANGED_UPDATE: {}. Supported values: not_found, ok",
                s
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub cors_allow_origin: String,

    pub store_backend: StoreType,
    pub mongodb_uri: Option<String>,
    pub mongodb_username: Option<String>,
    pub mongodb_password: Option<String>,
    pub mongodb_cluster: Option<String>,
    pub database: String,
    pub server_selection_timeout: Duration,

    pub startup_policy: StartupPolicy,
    pub unchanged_update: UnchangedUpdate,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_allow_origin: "*".to_string(),
            store_backend: StoreType::MongoDb,
            mongodb_uri: None,
            mongodb_username: None,
            mongodb_password: None,
            mongodb_cluster: None,
            database: "crawler".to_string(),
            server_selection_timeout: Duration::from_millis(5000),
            startup_policy: StartupPolicy::FailFast,
            unchanged_update: UnchangedUpdate::NotFound,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(non_empty_var)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Config::default();

        let port = match lookup("PORT") {
            Some(port) => port.parse().context("PORT must be a valid port number")?,
            None => defaults.port,
        };

        let store_backend = match lookup("STORE_BACKEND") {
            Some(backend) => StoreType::from_str(&backend)?,
            None => defaults.store_backend,
        };

        let server_selection_timeout = match lookup("MONGODB_SERVER_SELECTION_TIMEOUT_MS") {
            Some(ms) => Duration::from_millis(
                ms.parse()
                    .context("MONGODB_SERVER_SELECTION_TIMEOUT_MS must be an integer")?,
            ),
            None => defaults.server_selection_timeout,
        };

        let startup_policy = match lookup("DB_STARTUP_POLICY") {
            Some(policy) => StartupPolicy::from_str(&policy)?,
            None => defaults.startup_policy,
        };

        let unchanged_update = match lookup("UNCHANGED_UPDATE") {
            Some(value) => UnchangedUpdate::from_str(&value)?,
            None => defaults.unchanged_update,
        };

        Ok(Config {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            cors_allow_origin: lookup("CORS_ALLOW_ORIGIN").unwrap_or(defaults.cors_allow_origin),
            store_backend,
            mongodb_uri: lookup("MONGODB_URI"),
            mongodb_username: lookup("USERNAME"),
            mongodb_password: lookup("PASSWORD"),
            mongodb_cluster: lookup("MONGODB_CLUSTER"),
            database: lookup("DATABASE").unwrap_or(defaults.database),
            server_selection_timeout,
            startup_policy,
            unchanged_update,
        })
    }

    /// Connection URI for MongoDB: `MONGODB_URI` if set, otherwise an Atlas
    /// `mongodb+srv` URI built from the credentials and cluster host.
    pub fn mongodb_connection_uri(&self) -> anyhow::Result<String> {
        if let Some(ref uri) = self.mongodb_uri {
            return Ok(uri.clone());
        }

        let (Some(username), Some(password), Some(cluster)) = (
            self.mongodb_username.as_deref(),
            self.mongodb_password.as_deref(),
            self.mongodb_cluster.as_deref(),
        ) else {
            bail!("Set MONGODB_URI, or USERNAME, PASSWORD and MONGODB_CLUSTER");
        };

        Ok(format!(
            "mongodb+srv://{}:{}@{}/?retryWrites=true&w=majority",
            urlencoding::encode(username),
            urlencoding::encode(password),
            cluster
        ))
    }

    /// MongoDB settings, or `None` when another backend is configured
    pub fn mongo_config(&self) -> anyhow::Result<Option<MongoConfig>> {
        if self.store_backend != StoreType::MongoDb {
            return Ok(None);
        }

        Ok(Some(MongoConfig {
            uri: self.mongodb_connection_uri()?,
            database: self.database.clone(),
            server_selection_timeout: self.server_selection_timeout,
            app_name: Some(env!("CARGO_PKG_NAME").to_string()),
        }))
    }
}
