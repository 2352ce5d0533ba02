mod auth;
mod dashboard;
mod motivations;
mod stats;
mod subscribers;

pub use auth::*;
pub use dashboard::*;
pub use motivations::*;
pub use stats::*;
pub use subscribers::*;
