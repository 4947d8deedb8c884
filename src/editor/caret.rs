use crate::editor::mention::utf16_to_byte_idx;
use web_sys::{CssStyleDeclaration, HtmlElement, HtmlTextAreaElement};

/// Pixel position for the suggestion menu, relative to the textarea's
/// content box: one line below the caret's line so the menu never covers
/// the text being typed.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub(crate) struct CaretCoordinate {
    pub top: f64,
    pub left: f64,
}

/// Gap between the caret's line box and the menu.
const MENU_GAP_PX: f64 = 4.0;

/// Every property that participates in text layout. Any divergence between
/// the mirror and the textarea shows up directly as positioning error, so
/// this list errs on the side of too many.
const MIRRORED_PROPERTIES: &[&str] = &[
    "box-sizing",
    "width",
    "padding-top",
    "padding-right",
    "padding-bottom",
    "padding-left",
    "border-top-width",
    "border-right-width",
    "border-bottom-width",
    "border-left-width",
    "border-style",
    "font-family",
    "font-size",
    "font-style",
    "font-weight",
    "font-variant",
    "line-height",
    "letter-spacing",
    "word-spacing",
    "text-align",
    "text-indent",
    "text-transform",
    "white-space",
    "word-break",
    "overflow-wrap",
    "tab-size",
];

fn parse_px(value: &str) -> Option<f64> {
    value.trim().strip_suffix("px")?.trim().parse::<f64>().ok()
}

/// Resolve the textarea's line height in pixels. `line-height: normal`
/// computes to no fixed value, so approximate it from the font size.
fn line_height_px(computed: &CssStyleDeclaration) -> f64 {
    if let Ok(v) = computed.get_property_value("line-height") {
        if let Some(px) = parse_px(&v) {
            return px;
        }
    }

    let font_size = computed
        .get_property_value("font-size")
        .ok()
        .and_then(|v| parse_px(&v))
        .unwrap_or(16.0);

    font_size * 1.2
}

/// Copy the textarea's current computed style onto the mirror.
///
/// Styles are re-read on every probe rather than cached: font and width can
/// change under us (responsive layout, zoom, font load) and a stale mirror
/// silently mis-positions the menu.
fn sync_mirror_style(mirror: &HtmlElement, computed: &CssStyleDeclaration) {
    let style = mirror.style();

    for prop in MIRRORED_PROPERTIES {
        let value = computed.get_property_value(prop).unwrap_or_default();
        let _ = style.set_property(prop, &value);
    }

    // The mirror itself never renders or intercepts input.
    let _ = style.set_property("position", "absolute");
    let _ = style.set_property("visibility", "hidden");
    let _ = style.set_property("top", "0");
    let _ = style.set_property("left", "-9999px");
    let _ = style.set_property("overflow", "hidden");
    let _ = style.set_property("pointer-events", "none");
}

/// Measure where the caret renders inside a wrapping textarea.
///
/// Text wrapping is owned by the rendering engine and not queryable, so we
/// reproduce it: fill a style-identical off-screen mirror with the text up
/// to the cursor, append a zero-width marker, and read the marker's box.
/// The offsets come back relative to the textarea's content box, already
/// corrected for its scroll position.
///
/// Returns `None` when the surface or mirror is not mounted yet (first
/// render race); callers keep their previous coordinate in that case.
pub(crate) fn probe_caret(
    textarea: &HtmlTextAreaElement,
    mirror: &HtmlElement,
    cursor_utf16: u32,
) -> Option<CaretCoordinate> {
    let window = web_sys::window()?;
    let document = window.document()?;
    let computed = window.get_computed_style(textarea).ok().flatten()?;

    sync_mirror_style(mirror, &computed);

    let text = textarea.value();
    let prefix = &text[..utf16_to_byte_idx(&text, cursor_utf16)];
    mirror.set_text_content(Some(prefix));

    let marker = document.create_element("span").ok()?;
    marker.set_text_content(Some("\u{200b}"));
    mirror.append_child(&marker).ok()?;

    let marker_rect = marker.get_bounding_client_rect();
    let mirror_rect = mirror.get_bounding_client_rect();

    let top = marker_rect.top() - mirror_rect.top() - textarea.scroll_top() as f64;
    let left = marker_rect.left() - mirror_rect.left() - textarea.scroll_left() as f64;

    Some(CaretCoordinate {
        top: top + line_height_px(&computed) + MENU_GAP_PX,
        left,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_px() {
        assert_eq!(parse_px("20px"), Some(20.0));
        assert_eq!(parse_px("14.5px"), Some(14.5));
        assert_eq!(parse_px(" 16px "), Some(16.0));
        assert_eq!(parse_px("normal"), None);
        assert_eq!(parse_px(""), None);
    }
}
