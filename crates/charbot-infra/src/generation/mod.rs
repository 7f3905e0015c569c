//! Generation endpoint clients.

pub mod http;

pub use http::HttpGenerationClient;
