//! Atelier storefront widgets.
//!
//! Each widget attaches to a placeholder element on a storefront page, fetches
//! a list of records from a fixed endpoint exactly once, validates them and
//! renders them into the placeholder's target container. When there is
//! nothing to show, whether because the endpoint returned no records, the call
//! failed or the payload had the wrong shape, a short message is rendered
//! instead. Failures never reach the host.
//!
//! # Widgets
//!
//! - [`CategoryList`](widget::CategoryList): attaches to `.categories-snippet`,
//!   renders into `#categories-row` and fetches `/public_categories/`
//! - [`FeaturedProductList`](widget::FeaturedProductList): attaches to
//!   `.feature-fashion`, renders into `#fashion-products-row` and fetches
//!   `/featured_products/`
//! - [`LatestProductCarousel`](widget::LatestProductCarousel): attaches to
//!   `.latest-products-carousel`, renders into `#latest-products-row` and
//!   fetches `/latest_products/`
//!
//! # Crates
//!
//! - `atelier-core`: page model, selectors, markup and logging targets
//! - `atelier-net`: the JSON-RPC transport behind [`RemoteCall`](atelier_net::RemoteCall)
//!
//! # Example
//!
//! ```no_run
//! use atelier::prelude::*;
//!
//! # async fn run(page: Document) -> Result<(), Box<dyn std::error::Error>> {
//! let client = JsonRpcClient::new("https://shop.example.com")?;
//! let registry = Registry::storefront()?;
//!
//! for report in registry.activate_all(&page, &client).await {
//!     println!("{}: {:?}", report.widget, report.activation);
//! }
//! # Ok(())
//! # }
//! ```

pub mod prelude;
pub mod record;
pub mod testing;
pub mod widget;

pub use atelier_core::{Error, Result};
