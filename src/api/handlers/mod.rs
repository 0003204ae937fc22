//! API handlers for stashbox.

pub mod auth;
pub mod health;
