use std::cell::RefCell;

use particles::web::WebFx;
use particles::{EffectKind, FxError};
use time::Date;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, HtmlElement, Window};

use super::js_message;
use super::locate::BrowserLocator;
use crate::config::SiteConfig;
use crate::pipeline::{EffectTarget, select_and_apply};
use crate::weather::{HOT_CLASS, OpenWeatherClient, Selection, WeatherSource};

/// Id of the overlay canvas.
pub const CANVAS_ID: &str = "fx-canvas";

thread_local! {
    static ACTIVE: RefCell<Option<PageEffects>> = const { RefCell::new(None) };
}

/// The overlay plus the page's hot visual state.
pub struct PageEffects {
    body: HtmlElement,
    fx: Option<WebFx>,
}

impl PageEffects {
    #[must_use]
    pub fn new(body: HtmlElement, fx: Option<WebFx>) -> Self {
        Self { body, fx }
    }

    fn set_hot(&self, hot: bool) -> Result<(), FxError> {
        self.body
            .class_list()
            .toggle_with_force(HOT_CLASS, hot)
            .map(|_| ())
            .map_err(|e| FxError::Surface(js_message(&e)))
    }
}

impl EffectTarget for PageEffects {
    fn apply(&mut self, selection: Selection) -> Result<(), FxError> {
        self.set_hot(selection == Selection::Hot)?;
        let Some(fx) = &self.fx else {
            return Ok(());
        };
        match selection.kind() {
            EffectKind::None => fx.stop(),
            kind => fx.start(kind),
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn seed() -> u64 {
    (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64
}

fn mount(document: &Document) -> Option<WebFx> {
    let canvas = document
        .get_element_by_id(CANVAS_ID)?
        .dyn_into::<HtmlCanvasElement>()
        .ok()?;
    match WebFx::mount(canvas, seed()) {
        Ok(fx) => Some(fx),
        Err(e) => {
            tracing::warn!(error = %e, "particle overlay not mounted");
            None
        }
    }
}

/// Resolve the selection in the background and apply it once.
pub(super) fn install(window: &Window, document: &Document, body: &HtmlElement, config: SiteConfig, today: Date) {
    let mut target = PageEffects::new(body.clone(), mount(document));
    let locator = BrowserLocator::new(window.clone());

    wasm_bindgen_futures::spawn_local(async move {
        let weather = match OpenWeatherClient::from_config(&config.weather) {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!(error = %e, "weather client unavailable");
                None
            }
        };
        let source = weather.as_ref().map(|w| w as &dyn WeatherSource);

        if let Err(e) = select_and_apply(today, &config, &locator, source, &mut target).await {
            tracing::warn!(error = %e, "effect not applied");
        }
        ACTIVE.with(|active| *active.borrow_mut() = Some(target));
    });
}
