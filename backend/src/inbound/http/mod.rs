//! HTTP inbound adapter exposing the directory operations endpoint.

pub mod error;
pub mod health;
pub mod operations;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
