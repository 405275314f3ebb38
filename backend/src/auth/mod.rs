//! Authentication module for registering users, issuing bearer tokens and
//! updating profiles.
//!
//! This module provides the register / login / profile endpoints together with
//! the middleware that guards token-protected routes.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
