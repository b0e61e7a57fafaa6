use std::cell::RefCell;
use std::pin::pin;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::future::{Either, select};
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Position, PositionError, PositionOptions, Window};

use super::js_message;
use crate::config::GeoOptions;
use crate::error::LocateError;
use crate::locate::{Coordinates, Locator};

type Reply = Rc<RefCell<Option<oneshot::Sender<Result<Coordinates, LocateError>>>>>;

/// `navigator.geolocation`, bounded by both `PositionOptions` and a timer.
pub struct BrowserLocator {
    window: Window,
}

impl BrowserLocator {
    #[must_use]
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

fn reply(slot: &Reply, result: Result<Coordinates, LocateError>) {
    if let Some(tx) = slot.borrow_mut().take() {
        if tx.send(result).is_err() {
            tracing::debug!("geolocation answered after the wait ended");
        }
    }
}

fn position_error(err: &PositionError, timeout_ms: u32) -> LocateError {
    match err.code() {
        PositionError::PERMISSION_DENIED => LocateError::Denied,
        PositionError::TIMEOUT => LocateError::Timeout(timeout_ms),
        _ => LocateError::Unavailable(err.message()),
    }
}

#[async_trait::async_trait(?Send)]
impl Locator for BrowserLocator {
    async fn locate(&self, options: &GeoOptions) -> Result<Coordinates, LocateError> {
        let geolocation = self
            .window
            .navigator()
            .geolocation()
            .map_err(|e| LocateError::Unavailable(js_message(&e)))?;

        let (tx, rx) = oneshot::channel();
        let slot: Reply = Rc::new(RefCell::new(Some(tx)));

        let ok_slot = Rc::clone(&slot);
        let on_position = Closure::once_into_js(move |pos: Position| {
            let coords = pos.coords();
            reply(&ok_slot, Ok(Coordinates::new(coords.latitude(), coords.longitude())));
        });
        let timeout_ms = options.timeout_ms;
        let err_slot = Rc::clone(&slot);
        let on_error = Closure::once_into_js(move |err: PositionError| {
            reply(&err_slot, Err(position_error(&err, timeout_ms)));
        });

        let position_options = PositionOptions::new();
        position_options.set_timeout(options.timeout_ms);
        position_options.set_maximum_age(options.maximum_age_ms);

        geolocation
            .get_current_position_with_error_callback_and_options(
                on_position.unchecked_ref(),
                Some(on_error.unchecked_ref()),
                &position_options,
            )
            .map_err(|e| LocateError::Unavailable(js_message(&e)))?;

        let timer = pin!(TimeoutFuture::new(options.timeout_ms));
        match select(rx, timer).await {
            Either::Left((Ok(result), _)) => result,
            Either::Left((Err(_), _)) => Err(LocateError::Unavailable("geolocation callback dropped".into())),
            Either::Right(_) => {
                slot.borrow_mut().take();
                Err(LocateError::Timeout(options.timeout_ms))
            }
        }
    }
}
