//! Browser bindings and the wasm entry point.
//!
//! Each submodule wires one page concern to the DOM. A concern that fails to
//! install is logged and skipped; page boot always runs to the end.

mod contact;
mod effects;
mod locate;
mod nav;
mod reveal;
mod theme;

use time::{Date, Month};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::config::{SiteConfig, data_attribute};
use crate::footer;

pub use effects::PageEffects;
pub use locate::BrowserLocator;

pub(crate) fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn report(concern: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        tracing::warn!(concern, error = %js_message(&e), "page setup failed");
    }
}

/// Page entry point.
#[wasm_bindgen(start)]
pub fn boot() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).unwrap_or_default();

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let Some(body) = document.body() else {
        return;
    };

    let config = config_from_body(&body);
    let today = match today() {
        Ok(d) => d,
        Err(e) => {
            tracing::warn!(error = %e, "could not read the current date");
            return;
        }
    };

    install_footer(&document, today);
    report("theme", theme::install(&window, &document, &body, &config.theme_key));
    report("nav", nav::install(&document));
    report("reveal", reveal::install(&document));
    report("contact", contact::install(&document, config.contact.clone()));
    effects::install(&window, &document, &body, config, today);
}

fn config_from_body(body: &HtmlElement) -> SiteConfig {
    match SiteConfig::from_lookup(|key| body.get_attribute(&data_attribute(key))) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "invalid site config; using defaults");
            SiteConfig::default()
        }
    }
}

fn today() -> Result<Date, time::error::ComponentRange> {
    let now = js_sys::Date::new_0();
    let month = Month::try_from(u8::try_from(now.get_month() + 1).unwrap_or(1))?;
    let day = u8::try_from(now.get_date()).unwrap_or(1);
    let year = i32::try_from(now.get_full_year()).unwrap_or(1970);
    Date::from_calendar_date(year, month, day)
}

fn install_footer(document: &web_sys::Document, today: Date) {
    if let Some(el) = document.get_element_by_id(footer::YEAR_ELEMENT_ID) {
        el.set_text_content(Some(&footer::copyright_year(today)));
    }
}
