use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use super::js_message;
use crate::reveal::{ANIMATE_SELECTOR, REVEAL_THRESHOLD, RevealTracker, VISIBLE_CLASS};

pub(super) fn install(document: &Document) -> Result<(), JsValue> {
    let tracker: Rc<RefCell<RevealTracker<Element>>> = Rc::new(RefCell::new(RevealTracker::new()));

    let seen = Rc::clone(&tracker);
    let on_intersect = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
        let batch = entries
            .iter()
            .filter_map(|v| v.dyn_into::<IntersectionObserverEntry>().ok())
            .map(|entry| (entry.target(), entry.is_intersecting()));
        let revealed = seen.borrow_mut().on_entries(batch);
        for el in revealed {
            if let Err(e) = el.class_list().add_1(VISIBLE_CLASS) {
                tracing::warn!(error = %js_message(&e), "reveal class not added");
            }
            observer.unobserve(&el);
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    let observer = IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &init)?;

    let nodes = document.query_selector_all(ANIMATE_SELECTOR)?;
    for i in 0..nodes.length() {
        let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        observer.observe(&el);
        tracker.borrow_mut().observe(el);
    }
    tracing::debug!(watching = tracker.borrow().watching(), "reveal observer installed");

    on_intersect.forget();
    Ok(())
}
