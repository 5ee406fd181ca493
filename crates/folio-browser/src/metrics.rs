//! Scroll position and document extents.

use folio_core::ScrollMetrics;
use web_sys::Window;

/// Read scroll offset, viewport height and document scroll height.
///
/// Values the browser refuses to report read as zero, which leaves the
/// header non-sticky and no section current.
pub fn read_metrics(window: &Window) -> ScrollMetrics {
    let top = window.scroll_y().unwrap_or(0.0);
    let viewport_height = window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0);
    let scroll_height = window
        .document()
        .and_then(|d| d.scrolling_element())
        .map(|el| el.scroll_height() as f64)
        .unwrap_or(0.0);

    ScrollMetrics {
        top,
        viewport_height,
        scroll_height,
    }
}
