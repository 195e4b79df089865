pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod store;

pub use app::{app, AppState};
