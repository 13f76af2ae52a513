//! Conference events, their sessions, speakers and speaker bios.
//!
//! `entity` declares the records and their relations, `repository` runs the
//! per-record operations, `entity::helpers` exposes relationships and
//! cascades. `data`, `server` and `cli` host the model as a service.

pub mod cli;
pub mod data;
pub mod entity;
pub mod error;
pub mod repository;
pub mod server;

pub use error::{ModelError, Result};
