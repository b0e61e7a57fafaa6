use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, Storage, Window};

use super::js_message;
use crate::theme::{DARK_CLASS, PreferenceStore, TOGGLE_ID, Theme, ThemeToggle};

/// `localStorage`, when the browser allows it.
struct LocalStore(Option<Storage>);

impl PreferenceStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        let Some(storage) = self.0.as_ref() else {
            return;
        };
        if let Err(e) = storage.set_item(key, value) {
            tracing::warn!(key, error = %js_message(&e), "theme preference not saved");
        }
    }
}

fn apply(body: &HtmlElement, button: Option<&Element>, theme: Theme) -> Result<(), JsValue> {
    body.class_list().toggle_with_force(DARK_CLASS, theme.is_dark())?;
    if let Some(button) = button {
        button.set_inner_html(&format!("<i class=\"{}\"></i>", theme.icon_class()));
    }
    Ok(())
}

pub(super) fn install(window: &Window, document: &Document, body: &HtmlElement, key: &str) -> Result<(), JsValue> {
    let store = LocalStore(window.local_storage().ok().flatten());
    let toggle = ThemeToggle::load(&store, key);
    let button = document.get_element_by_id(TOGGLE_ID);
    apply(body, button.as_ref(), toggle.theme())?;

    let Some(button) = button else {
        return Ok(());
    };

    let state = Rc::new(RefCell::new((toggle, store)));
    let body = body.clone();
    let target = button.clone();
    let on_click = Closure::wrap(Box::new(move || {
        let mut state = state.borrow_mut();
        let (toggle, store) = &mut *state;
        let theme = toggle.toggle(store);
        if let Err(e) = apply(&body, Some(&target), theme) {
            tracing::warn!(error = %js_message(&e), "theme not applied");
        }
    }) as Box<dyn FnMut()>);

    button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(())
}
