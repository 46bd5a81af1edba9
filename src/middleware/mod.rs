//! Middleware module
//!
//! Contains Tower middleware for caller authentication.

pub mod auth;
