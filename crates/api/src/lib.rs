//! Thin HTTP transport collaborator (`spec.md` §6, "deliberately out of
//! scope" list: HTTP routing, middleware wiring, process supervision, TLS
//! termination, CLI flag handling, log sinks, DB driver selection, test
//! scaffolding).
//!
//! `vql-api` owns none of the business logic in `spec.md` §1's four core
//! subsystems — it only decodes envelopes, calls into the library crates
//! (`vql-auth`, `vql-queue`, `vql-tenant`), and maps the result back onto
//! the wire through `vql-respcode`. Every route handler follows the same
//! shape: parse headers → decode body → call a library crate → `respond`.

pub mod app;
pub mod config;
pub mod context;
pub mod dto;
pub mod errors;
pub mod routes;
pub mod state;
pub mod wire;

pub use app::build_app;
pub use state::AppState;
