//! Services that sit beside the auth flow.

pub mod news_service;
