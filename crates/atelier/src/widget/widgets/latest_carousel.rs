//! Latest products carousel widget.

use atelier_core::{Markup, Tag};

use crate::record::{image_src, LatestProduct};
use crate::widget::traits::ListWidget;

/// Element identifier of the carousel; indicators and controls target it.
pub const CAROUSEL_ID: &str = "latestProductCarousel";

const SLIDE_STYLE: &str = "height:200px;";
const IMAGE_STYLE: &str = "width:320px;height:220px;object-fit:cover;";

/// Renders the most recent products as a carousel, one slide per product.
///
/// Products are trusted to arrive in display order and are not re-sorted by
/// their sequence value. The first slide is the only active one.
#[derive(Debug, Clone, Copy, Default)]
pub struct LatestProductCarousel;

impl ListWidget for LatestProductCarousel {
    type Record = LatestProduct;

    const NAME: &'static str = "latest_products_carousel";
    const SELECTOR: &'static str = ".latest-products-carousel";
    const TARGET: &'static str = "#latest-products-row";
    const ENDPOINT: &'static str = "/latest_products/";
    const EMPTY_MESSAGE: &'static str = "No latest products available";

    fn render(records: &[LatestProduct]) -> Markup {
        let target = format!("#{CAROUSEL_ID}");

        let indicators = Tag::new("div")
            .class("carousel-indicators")
            .children((0..records.len()).map(|idx| indicator(&target, idx)));

        let inner = Tag::new("div")
            .class("carousel-inner")
            .children(records.iter().enumerate().map(|(idx, product)| slide(idx, product)));

        Tag::new("div")
            .attr("id", CAROUSEL_ID)
            .class("carousel carousel-dark slide")
            .attr("data-bs-ride", "carousel")
            .child(indicators)
            .child(inner)
            .child(control(&target, "prev"))
            .child(control(&target, "next"))
            .into()
    }
}

fn indicator(target: &str, idx: usize) -> Tag {
    Tag::new("button")
        .attr("type", "button")
        .attr("data-bs-target", target)
        .attr("data-bs-slide-to", idx.to_string())
        .class_if(idx == 0, "active")
}

fn slide(idx: usize, product: &LatestProduct) -> Tag {
    let image = Tag::new("img")
        .attr("src", image_src(product.image.as_ref()))
        .class("rounded")
        .attr("style", IMAGE_STYLE);

    let caption = Tag::new("div")
        .class("ms-3")
        .child(Tag::new("h5").class("mb-0").text(&product.name))
        .child(Tag::new("div").class("text-muted").text(format!("Seq: {}", product.sequence)));

    Tag::new("div").class("carousel-item").class_if(idx == 0, "active").child(
        Tag::new("div")
            .class("d-flex align-items-center justify-content-center")
            .attr("style", SLIDE_STYLE)
            .child(image)
            .child(caption),
    )
}

fn control(target: &str, direction: &str) -> Tag {
    Tag::new("button")
        .class(format!("carousel-control-{direction}"))
        .attr("type", "button")
        .attr("data-bs-target", target)
        .attr("data-bs-slide", direction)
        .child(Tag::new("span").class(format!("carousel-control-{direction}-icon")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn products(sequences: &[i64]) -> Vec<LatestProduct> {
        sequences
            .iter()
            .enumerate()
            .map(|(i, seq)| LatestProduct::new(format!("Product {i}"), None, *seq))
            .collect()
    }

    #[test]
    fn first_element_is_the_only_active_one() {
        let markup = LatestProductCarousel::render(&products(&[3, 1, 2]));

        let indicators = markup.find_all(|t| t.get_attr("data-bs-slide-to").is_some());
        let slides = markup.find_by_class("carousel-item");
        assert_eq!(indicators.len(), 3);
        assert_eq!(slides.len(), 3);

        let active_indicators: Vec<_> = indicators.iter().map(|t| t.has_class("active")).collect();
        let active_slides: Vec<_> = slides.iter().map(|t| t.has_class("active")).collect();
        assert_eq!(active_indicators, vec![true, false, false]);
        assert_eq!(active_slides, vec![true, false, false]);

        let slide_to: Vec<_> = indicators
            .iter()
            .filter_map(|t| t.get_attr("data-bs-slide-to"))
            .collect();
        assert_eq!(slide_to, vec!["0", "1", "2"]);
    }

    #[test]
    fn slides_keep_input_order() {
        let markup = LatestProductCarousel::render(&products(&[3, 1, 2]));

        let slides = markup.find_by_class("carousel-item");
        let names: Vec<_> = markup
            .find_all(|t| t.name() == "h5")
            .iter()
            .map(|t| t.text_content())
            .collect();
        assert_eq!(names, vec!["Product 0", "Product 1", "Product 2"]);
        assert!(slides[0].text_content().contains("Seq: 3"));
        assert!(slides[1].text_content().contains("Seq: 1"));
        assert!(slides[2].text_content().contains("Seq: 2"));
    }

    #[test]
    fn controls_target_the_carousel() {
        let markup = LatestProductCarousel::render(&products(&[1]));

        let html = markup.to_html();
        assert!(html.starts_with(concat!(
            r#"<div id="latestProductCarousel" class="carousel carousel-dark slide" "#,
            r#"data-bs-ride="carousel">"#,
        )));
        assert!(html.contains(concat!(
            r#"<button class="carousel-control-prev" type="button" "#,
            r##"data-bs-target="#latestProductCarousel" data-bs-slide="prev">"##,
            r#"<span class="carousel-control-prev-icon"></span></button>"#,
        )));
        assert!(html.contains(concat!(
            r#"<button class="carousel-control-next" type="button" "#,
            r##"data-bs-target="#latestProductCarousel" data-bs-slide="next">"##,
            r#"<span class="carousel-control-next-icon"></span></button>"#,
        )));
    }

    #[test]
    fn slide_markup() {
        let markup = LatestProductCarousel::render(&products(&[7]));

        let slide = markup.find_by_class("carousel-item")[0].clone();
        assert_eq!(
            Markup::from(slide).to_html(),
            concat!(
                r#"<div class="carousel-item active">"#,
                r#"<div class="d-flex align-items-center justify-content-center" "#,
                r#"style="height:200px;">"#,
                r#"<img src="data:image/png;base64," class="rounded" "#,
                r#"style="width:320px;height:220px;object-fit:cover;">"#,
                r#"<div class="ms-3"><h5 class="mb-0">Product 0</h5>"#,
                r#"<div class="text-muted">Seq: 7</div></div>"#,
                r#"</div></div>"#,
            )
        );
    }
}
