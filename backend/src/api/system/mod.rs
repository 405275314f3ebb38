//! Liveness and database probes.

pub mod handlers;
pub mod routes;
