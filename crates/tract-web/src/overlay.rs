use web_sys as web;

/// Dismiss the start overlay once the voice is running.
#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id("start-overlay") {
        let _ = el.set_attribute("style", "display:none");
    }
}
