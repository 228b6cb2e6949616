//! The storefront widget variants.

mod category_list;
mod featured_products;
mod latest_carousel;

pub use category_list::CategoryList;
pub use featured_products::FeaturedProductList;
pub use latest_carousel::{LatestProductCarousel, CAROUSEL_ID};
