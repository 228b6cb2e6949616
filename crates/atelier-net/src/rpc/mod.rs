//! Remote calls to the storefront's JSON routes.
//!
//! The storefront exposes its data through `POST` routes speaking JSON-RPC
//! 2.0. [`JsonRpcClient`] implements the [`RemoteCall`] contract on top of
//! `reqwest`.
//!
//! # Example
//!
//! ```ignore
//! use atelier_net::rpc::{JsonRpcClient, RemoteCall};
//!
//! let client = JsonRpcClient::new("https://shop.example.com")?;
//! let products = client.call("/latest_products/", serde_json::json!({})).await?;
//! ```

mod client;
mod envelope;
mod remote;

pub use client::{JsonRpcClient, JsonRpcClientBuilder, RpcClientConfig};
pub use envelope::{RpcRequest, RpcResponse};
pub use remote::RemoteCall;
