//! Networking module for Atelier.
//!
//! This crate provides the transport widgets fetch their records through:
//!
//! - **[`RemoteCall`]**: The contract a widget calls, `call(endpoint, payload)`
//! - **[`JsonRpcClient`]**: A JSON-RPC 2.0 over HTTP implementation
//! - **[`RpcError`]**: Everything a call can fail with
//!
//! # Configuration
//!
//! ```ignore
//! let client = JsonRpcClient::builder("https://shop.example.com")
//!     .timeout(Duration::from_secs(10))
//!     .user_agent("MyShop/1.0")
//!     .build()?;
//! ```

mod error;
pub mod rpc;

pub use error::{Result, RpcError};

// Re-export commonly used types at the crate root
pub use rpc::{JsonRpcClient, JsonRpcClientBuilder, RemoteCall, RpcClientConfig};
