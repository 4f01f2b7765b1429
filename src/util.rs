// Browser glue shared by the components: console logging and DOM anchors.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Node, ScrollBehavior, ScrollToOptions};
use yew::NodeRef;

use crate::error::{ShowError, ShowResult};
use crate::model::LayoutMode;

pub fn clog(msg: &str) {
    gloo::console::log!(msg);
}

pub fn cwarn(msg: &str) {
    gloo::console::warn!(msg);
}

/// Resolves a rendered node, or reports which anchor is missing.
pub fn anchor<T>(node: &NodeRef, name: &'static str) -> ShowResult<T>
where
    T: JsCast + AsRef<Node> + From<JsValue>,
{
    node.cast::<T>().ok_or(ShowError::MissingAnchor(name))
}

/// Logs a missing anchor and yields `None` so handlers can bail out early.
pub fn anchor_or_log<T>(node: &NodeRef, name: &'static str, module: &str) -> Option<T>
where
    T: JsCast + AsRef<Node> + From<JsValue>,
{
    match anchor::<T>(node, name) {
        Ok(el) => Some(el),
        Err(e) => {
            cwarn(&format!("{}: {}", module, e));
            None
        }
    }
}

pub fn apply_body_layout(mode: LayoutMode) -> ShowResult<()> {
    let body = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
        .ok_or(ShowError::MissingAnchor("body"))?;
    let _ = body
        .class_list()
        .toggle_with_force("act-scrollable", mode == LayoutMode::Scrollable);
    Ok(())
}

pub fn scroll_to_top() {
    if let Some(win) = web_sys::window() {
        let opts = ScrollToOptions::new();
        opts.set_top(0.0);
        opts.set_behavior(ScrollBehavior::Smooth);
        win.scroll_to_with_scroll_to_options(&opts);
    }
}

/// Centre of an element in viewport pixels.
pub fn element_center(el: &web_sys::Element) -> (f64, f64) {
    let rect = el.get_bounding_client_rect();
    (rect.left() + rect.width() / 2.0, rect.top() + rect.height() / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmounted_anchor_reports_its_name() {
        let node = NodeRef::default();
        let err = anchor::<web_sys::Element>(&node, "catch-area").unwrap_err();
        assert_eq!(err, ShowError::MissingAnchor("catch-area"));
    }
}
