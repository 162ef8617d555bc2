//! Web interface for filebox.
//!
//! HTML pages for listing, uploading and viewing files, plus the raw
//! download/render/convert endpoints behind them.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;
pub mod templates;

pub use error::WebError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
