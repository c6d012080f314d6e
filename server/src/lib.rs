//! HTTP API for managing events: a single `events` table behind five REST
//! endpoints, answered in a uniform success/error envelope.

pub mod config;
pub mod handlers;
pub mod repository;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod utils;

pub use config::Config;
pub use routes::create_routes;
pub use state::AppState;
