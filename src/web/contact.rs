use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement};

use super::js_message;
use crate::config::ContactConfig;
use crate::contact::{ContactMessage, EmailJsSender, FIELDS, FORM_ID, FormStatus, FormView, STATUS_ID, submit};

const ERROR_CLASS: &str = "error";

struct DomFormView {
    form: HtmlFormElement,
    button: Option<HtmlButtonElement>,
    status: Option<HtmlElement>,
}

impl DomFormView {
    fn field(&self, name: &str) -> String {
        let Ok(Some(el)) = self.form.query_selector(&format!("[name=\"{name}\"]")) else {
            return String::new();
        };
        match el.dyn_into::<HtmlInputElement>() {
            Ok(input) => input.value(),
            Err(el) => el.dyn_into::<HtmlTextAreaElement>().map(|t| t.value()).unwrap_or_default(),
        }
    }

    fn message(&self) -> ContactMessage {
        let [name, email, message] = FIELDS.map(|f| self.field(f));
        ContactMessage::new(&name, &email, &message)
    }
}

impl FormView for DomFormView {
    fn set_submitting(&mut self, submitting: bool) {
        if let Some(button) = &self.button {
            button.set_disabled(submitting);
        }
    }

    fn show_status(&mut self, status: &FormStatus) {
        let Some(el) = &self.status else {
            return;
        };
        el.set_text_content(Some(status.message()));
        if let Err(e) = el.class_list().toggle_with_force(ERROR_CLASS, status.is_error()) {
            tracing::warn!(error = %js_message(&e), "status class not updated");
        }
    }

    fn reset(&mut self) {
        self.form.reset();
    }
}

pub(super) fn install(document: &Document, config: Option<ContactConfig>) -> Result<(), JsValue> {
    let Some(form) = document
        .get_element_by_id(FORM_ID)
        .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
    else {
        return Ok(());
    };
    let Some(config) = config else {
        tracing::debug!("contact backend not configured; form left inert");
        return Ok(());
    };
    let sender = Rc::new(EmailJsSender::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?);

    let button = form
        .query_selector("button[type=\"submit\"]")?
        .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());
    let status = document
        .get_element_by_id(STATUS_ID)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());

    let target = form.clone();
    let on_submit = Closure::wrap(Box::new(move |event: Event| {
        event.prevent_default();
        let mut view = DomFormView { form: target.clone(), button: button.clone(), status: status.clone() };
        let sender = Rc::clone(&sender);
        wasm_bindgen_futures::spawn_local(async move {
            let message = view.message();
            submit(&mut view, &*sender, &message).await;
        });
    }) as Box<dyn FnMut(Event)>);

    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();
    Ok(())
}
