//! Convenient re-exports for hosts.
//!
//! ```
//! use atelier::prelude::*;
//! ```

pub use crate::record::{Category, FeaturedProduct, ImageData, LatestProduct, Sequence};
pub use crate::widget::{
    Activation, ActivationReport, CategoryList, Degradation, FeaturedProductList,
    LatestProductCarousel, ListWidget, Registry, Snippet,
};
pub use atelier_core::{Document, ElementRef, Markup};
pub use atelier_net::{JsonRpcClient, RemoteCall, RpcError};
