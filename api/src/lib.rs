//! HTTP surface for the BasicAuth backend
//!
//! The binary in `main.rs` is the composition root; this library exposes the
//! app factory and handlers so integration tests can drive them in-process.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::create_app;
pub use routes::AppState;
