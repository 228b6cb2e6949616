//! Featured products widget.

use atelier_core::{Markup, Tag};

use crate::record::{image_src, FeaturedProduct};
use crate::widget::traits::ListWidget;

const IMAGE_STYLE: &str = "width:100px;height:80px;object-fit:cover;";

/// Renders featured products as image and name rows.
///
/// Every product the endpoint returns is shown; there is no count limit.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeaturedProductList;

impl ListWidget for FeaturedProductList {
    type Record = FeaturedProduct;

    const NAME: &'static str = "featured_fashion_products";
    const SELECTOR: &'static str = ".feature-fashion";
    const TARGET: &'static str = "#fashion-products-row";
    const ENDPOINT: &'static str = "/featured_products/";
    const EMPTY_MESSAGE: &'static str = "No featured products available";

    fn render(records: &[FeaturedProduct]) -> Markup {
        records.iter().map(product_block).collect()
    }
}

fn product_block(product: &FeaturedProduct) -> Tag {
    let image = Tag::new("img")
        .class("fashion-image rounded")
        .attr("style", IMAGE_STYLE)
        .attr("src", image_src(product.image.as_ref()));

    Tag::new("div").class("col-lg-4 mb-5").child(
        Tag::new("div")
            .class("d-flex align-items-center")
            .child(Tag::new("div").class("img-container mr-3 rounded").child(image))
            .child(Tag::new("div").child(Tag::new("h5").class("mb-0").text(&product.name))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ImageData;

    #[test]
    fn product_without_image_has_empty_source() {
        let markup = FeaturedProductList::render(&[FeaturedProduct::new("Jacket", None)]);

        let blocks = markup.find_by_class("col-lg-4");
        assert_eq!(blocks.len(), 1);

        let images = markup.find_all(|t| t.name() == "img");
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].get_attr("src"), Some("data:image/png;base64,"));
        assert_eq!(markup.find_all(|t| t.name() == "h5")[0].text_content(), "Jacket");
    }

    #[test]
    fn block_markup() {
        let markup = FeaturedProductList::render(&[FeaturedProduct::new(
            "Scarf",
            Some(ImageData::new("QUJD")),
        )]);

        assert_eq!(
            markup.to_html(),
            concat!(
                r#"<div class="col-lg-4 mb-5"><div class="d-flex align-items-center">"#,
                r#"<div class="img-container mr-3 rounded">"#,
                r#"<img class="fashion-image rounded" "#,
                r#"style="width:100px;height:80px;object-fit:cover;" "#,
                r#"src="data:image/png;base64,QUJD">"#,
                r#"</div><div><h5 class="mb-0">Scarf</h5></div></div></div>"#,
            )
        );
    }

    #[test]
    fn no_count_limit() {
        let products: Vec<_> = (0..25)
            .map(|i| FeaturedProduct::new(format!("p{i}"), None))
            .collect();
        let markup = FeaturedProductList::render(&products);
        assert_eq!(markup.find_by_class("col-lg-4").len(), 25);
    }
}
