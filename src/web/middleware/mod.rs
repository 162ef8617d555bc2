//! Middleware for the web interface.

pub mod security;

pub use security::security_headers;
