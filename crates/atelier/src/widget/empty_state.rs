//! Empty-state fallback shown when a widget has nothing to render.

use atelier_core::{ElementRef, Markup, Tag};

/// Markup for a single centered informational message.
pub fn empty_state_markup(message: &str) -> Markup {
    Markup::from(
        Tag::new("div")
            .class("col-12 text-center text-muted")
            .text(message),
    )
}

/// Replace the target's content with the empty-state message.
///
/// Idempotent: rendering twice leaves the same content as rendering once.
pub fn render_empty_state(target: &ElementRef, message: &str) {
    target.set_inner_markup(empty_state_markup(message));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_is_a_single_centered_message() {
        assert_eq!(
            empty_state_markup("No categories available").to_html(),
            r#"<div class="col-12 text-center text-muted">No categories available</div>"#
        );
    }

    #[test]
    fn render_is_idempotent() {
        let once = ElementRef::new("div");
        render_empty_state(&once, "No featured products available");

        let twice = ElementRef::new("div").with_child(ElementRef::new("p"));
        render_empty_state(&twice, "No featured products available");
        render_empty_state(&twice, "No featured products available");

        assert_eq!(once.inner_html(), twice.inner_html());
        assert_eq!(once.inner_markup(), twice.inner_markup());
    }
}
