pub mod config;
pub mod error;
pub mod inference;
pub mod logging;
pub mod routes;
pub mod state;
