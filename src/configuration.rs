use std::env;
use std::env::current_dir;
use std::fmt::Display;

use config::Config;
use config::ConfigError;
use secrecy::ExposeSecret;
use secrecy::Secret;
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgSslMode;

/// Global configuration, loaded from `configuration/*.yaml` and `APP_*` env
/// vars. See `get_configuration`.
#[derive(Deserialize, Clone)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub application: ApplicationSettings,
}

/// Server configuration
#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    /// Should be localhost on dev machine, 0.0.0.0 on prod
    pub host: String,

    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,

    /// The single shared credential gating `/api/admin/*`. It is also handed
    /// back to the client as the bearer token.
    pub admin_secret: Secret<String>,
}

/// Username/password pair for one of the two database roles
#[derive(Deserialize, Clone)]
pub struct RoleCredentials {
    pub username: String,
    pub password: Secret<String>,
}

/// Database configuration. The same database is reached with two different
/// roles: `public_role` (subject to row-level security) and `service_role`
/// (table owner).
#[derive(Deserialize, Clone)]
pub struct DatabaseSettings {
    pub host: String,

    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub database_name: String,

    /// Should be `true` in production.
    /// https://www.postgresql.org/docs/current/libpq-ssl.html#LIBPQ-SSL-SSLMODE-STATEMENTS
    pub require_ssl: bool,

    pub public_role: RoleCredentials,
    pub service_role: RoleCredentials,
}

impl DatabaseSettings {
    /// Connection to the named database as the restricted role
    pub fn public_connection(&self) -> PgConnectOptions {
        self.connection_as(&self.public_role)
            .database(&self.database_name)
    }

    /// Connection to the named database as the privileged role
    pub fn service_connection(&self) -> PgConnectOptions {
        self.connection_as(&self.service_role)
            .database(&self.database_name)
    }

    /// Connection to the Postgres instance (instead of a specific db) as the
    /// privileged role. This is typically used to create a randomised db for
    /// testing.
    pub fn connection_without_db(&self) -> PgConnectOptions { self.connection_as(&self.service_role) }

    fn connection_as(
        &self,
        role: &RoleCredentials,
    ) -> PgConnectOptions {
        PgConnectOptions::new()
            .username(&role.username)
            .password(role.password.expose_secret())
            .host(&self.host)
            .port(self.port)
            .ssl_mode(match self.require_ssl {
                true => PgSslMode::Require,
                false => PgSslMode::Prefer,
            })
    }
}

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Display for Environment {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Environment::Local => "local",
                Environment::Production => "production",
            }
        )
    }
}

impl TryFrom<String> for Environment {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            e => Err(format!("Invalid environment: {e}")),
        }
    }
}

/// Load yaml configuration files at `<project_root>/configuration`, then
/// apply `APP_`-prefixed env vars on top.
///
/// All fields must be present, otherwise initialisation fails immediately and
/// the server does not start.
///
/// `APP_APPLICATION__ADMIN_SECRET=hunter2` -> `Settings.application.admin_secret`
pub fn get_configuration() -> Result<Settings, ConfigError> {
    let cfg_dir = current_dir()
        .map_err(|e| ConfigError::Message(format!("could not get current dir: {e}")))?
        .join("configuration");

    let env: Environment = env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".to_string())
        .try_into()
        .map_err(ConfigError::Message)?;

    let settings = Config::builder()
        .add_source(config::File::from(cfg_dir.join("base.yaml")))
        .add_source(config::File::from(cfg_dir.join(format!("{env}.yaml"))))
        // env vars are -always- parsed as String, hence `serde-aux` for the ports
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
