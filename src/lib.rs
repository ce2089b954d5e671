//! openedge: key lookup and greeting functions for an edge HTTP runtime.

pub mod config;
pub mod functions;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod upstream;

pub use config::EdgeConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
