//! Two handles into the same Postgres database.
//!
//! `PublicStore` connects as the restricted role and only exposes what
//! anonymous visitors may do; row-level security on `motivations` backs this
//! up at the db level. `ServiceStore` connects as the privileged role; it is
//! never registered as app data, and is only handed out by
//! `authentication::reject_unauthorized` (see `startup::run`).
//!
//! Queries use the runtime-checked `sqlx::query`/`query_as` API, so building
//! the crate does not need a live database (or a `.sqlx` cache).

mod public;
mod service;

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

pub use public::SubscribeOutcome;
pub use service::MotivationChanges;
pub use service::MotivationStats;

use crate::configuration::DatabaseSettings;
use crate::domain::MotivationStatus;

/// Handle bound to the restricted (row-level security) role
#[derive(Clone, Debug)]
pub struct PublicStore(PgPool);

/// Handle bound to the privileged role. Only reachable from admin handlers.
#[derive(Clone, Debug)]
pub struct ServiceStore(PgPool);

/// `connect_lazy_with` only connects when the pool is first used, so db-free
/// requests (e.g. `/health_check`) work without a database.
fn get_connection_pool(opts: PgConnectOptions) -> PgPool { PgPoolOptions::new().connect_lazy_with(opts) }

pub fn get_public_store(db_cfg: &DatabaseSettings) -> PublicStore {
    PublicStore(get_connection_pool(db_cfg.public_connection()))
}

pub fn get_service_store(db_cfg: &DatabaseSettings) -> ServiceStore {
    ServiceStore(get_connection_pool(db_cfg.service_connection()))
}

/// A motivation as shown to the public: no status, and `author` already
/// suppressed for anonymous submissions.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct PublicMotivation {
    pub id: Uuid,
    pub text: String,
    pub author: Option<String>,
}

/// Full `motivations` row, for the admin dashboard
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Motivation {
    pub id: Uuid,
    pub text: String,
    pub author: Option<String>,
    pub is_anonymous: bool,
    pub status: MotivationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full `subscribers` row
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Subscriber {
    pub id: Uuid,
    pub email: String,
    pub is_active: bool,
    pub confirmed: bool,
    /// Reserved for double opt-in, which is not enforced
    pub confirmation_token: Option<String>,
    pub created_at: DateTime<Utc>,
}
