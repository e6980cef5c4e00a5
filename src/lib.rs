pub mod alerting;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod observability;

pub use config::*;
