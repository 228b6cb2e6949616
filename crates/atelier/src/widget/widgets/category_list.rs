//! Category list widget.

use atelier_core::{Markup, Tag};

use crate::record::Category;
use crate::widget::traits::ListWidget;

/// Renders the storefront's public categories as a grid of name tiles.
///
/// Categories are shown in the order the endpoint returns them. Duplicates and
/// empty names are kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryList;

impl ListWidget for CategoryList {
    type Record = Category;

    const NAME: &'static str = "categories_snippet";
    const SELECTOR: &'static str = ".categories-snippet";
    const TARGET: &'static str = "#categories-row";
    const ENDPOINT: &'static str = "/public_categories/";
    const EMPTY_MESSAGE: &'static str = "No categories available";

    fn render(records: &[Category]) -> Markup {
        records.iter().map(category_block).collect()
    }
}

fn category_block(category: &Category) -> Tag {
    Tag::new("div").class("col-lg-3 mb-3").child(
        Tag::new("div")
            .class("border p-2 rounded text-center")
            .child(Tag::new("h6").class("mb-1").text(&category.name)),
    )
}
