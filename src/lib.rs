//! Daily Motivations: visitors read a random approved motivation, submit
//! their own for review, and subscribe to a daily email; an admin moderates
//! submissions and exports the mailing list.

pub mod authentication;
pub mod configuration;
pub mod domain;
pub mod routes;
pub mod startup;
pub mod store;
pub mod telemetry;
