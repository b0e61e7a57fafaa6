use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlInputElement};

use crate::nav::{LINK_SELECTOR, NavMenu, TOGGLE_ID};

pub(super) fn install(document: &Document) -> Result<(), JsValue> {
    let links = document.query_selector_all(LINK_SELECTOR)?;
    let doc = document.clone();
    let on_click = Closure::wrap(Box::new(move || {
        let Some(toggle) = doc
            .get_element_by_id(TOGGLE_ID)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        let mut menu = NavMenu::from_checked(toggle.checked());
        if menu.follow_link() {
            toggle.set_checked(false);
        }
    }) as Box<dyn FnMut()>);

    for i in 0..links.length() {
        if let Some(link) = links.item(i) {
            link.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        }
    }
    on_click.forget();
    Ok(())
}
