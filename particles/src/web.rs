//! Browser implementations of [`Surface`] and [`FrameHost`].
//!
//! [`WebFx`] is the piece the page script holds on to: it owns the
//! controller behind `Rc<RefCell<_>>` and wires the animation-frame and
//! window-resize callbacks to it through weak references, so dropping the
//! `WebFx` lets everything be collected.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use crate::consts::TAU;
use crate::controller::{FxController, FxState};
use crate::error::FxError;
use crate::host::{FrameHandle, FrameHost, ListenerHandle};
use crate::kind::EffectKind;
use crate::surface::{Paint, Surface, Viewport};

fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn surface_err(value: JsValue) -> FxError {
    FxError::Surface(js_message(&value))
}

// =============================================================
// Surface
// =============================================================

/// A `<canvas>` overlay drawn through its 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    viewport: Viewport,
}

impl CanvasSurface {
    /// Bind to `canvas`'s 2D context.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::Surface`] if the canvas has no 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, FxError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(surface_err)?
            .ok_or_else(|| FxError::Surface("2d context unavailable".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| FxError::Surface("context is not CanvasRenderingContext2d".into()))?;
        Ok(Self { canvas, ctx, viewport: Viewport::default() })
    }

    fn fill_arc(&self, center: (f64, f64), radius: f64) -> Result<(), FxError> {
        self.ctx.begin_path();
        self.ctx
            .arc(center.0, center.1, radius.max(0.0), 0.0, TAU)
            .map_err(surface_err)?;
        self.ctx.fill();
        Ok(())
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, viewport: Viewport) -> Result<(), FxError> {
        self.viewport = viewport;
        self.canvas.set_width(viewport.device_width());
        self.canvas.set_height(viewport.device_height());

        let style = self.canvas.style();
        style
            .set_property("width", &format!("{}px", viewport.width))
            .map_err(surface_err)?;
        style
            .set_property("height", &format!("{}px", viewport.height))
            .map_err(surface_err)?;

        self.ctx
            .set_transform(viewport.dpr, 0.0, 0.0, viewport.dpr, 0.0, 0.0)
            .map_err(surface_err)
    }

    fn clear(&mut self) -> Result<(), FxError> {
        self.ctx.clear_rect(0.0, 0.0, self.viewport.width, self.viewport.height);
        Ok(())
    }

    fn set_visible(&mut self, visible: bool) -> Result<(), FxError> {
        self.canvas
            .style()
            .set_property("display", if visible { "block" } else { "none" })
            .map_err(surface_err)
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, paint: Paint) -> Result<(), FxError> {
        self.ctx.begin_path();
        self.ctx.set_stroke_style_str(&paint.css());
        self.ctx.set_line_width(width);
        self.ctx.move_to(from.0, from.1);
        self.ctx.line_to(to.0, to.1);
        self.ctx.stroke();
        Ok(())
    }

    fn fill_circle(&mut self, center: (f64, f64), radius: f64, paint: Paint) -> Result<(), FxError> {
        self.ctx.set_fill_style_str(&paint.css());
        self.fill_arc(center, radius)
    }

    fn fill_ellipse(
        &mut self,
        center: (f64, f64),
        radii: (f64, f64),
        rotation: f64,
        paint: Paint,
    ) -> Result<(), FxError> {
        self.ctx.set_fill_style_str(&paint.css());
        self.ctx.begin_path();
        self.ctx
            .ellipse(center.0, center.1, radii.0.max(0.0), radii.1.max(0.0), rotation, 0.0, TAU)
            .map_err(surface_err)?;
        self.ctx.fill();
        Ok(())
    }

    fn fill_radial(&mut self, center: (f64, f64), radius: f64, paint: Paint) -> Result<(), FxError> {
        let gradient = self
            .ctx
            .create_radial_gradient(center.0, center.1, 0.0, center.0, center.1, radius.max(0.0))
            .map_err(surface_err)?;
        gradient.add_color_stop(0.0, &paint.css()).map_err(surface_err)?;
        gradient
            .add_color_stop(1.0, &paint.with_alpha(0.0).css())
            .map_err(surface_err)?;
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.fill_arc(center, radius)
    }
}

// =============================================================
// Host
// =============================================================

/// `requestAnimationFrame` scheduling and a window `resize` listener.
///
/// The callbacks are installed by [`WebFx::mount`] once the controller they
/// call into exists.
pub struct BrowserHost {
    window: Window,
    frame_cb: Option<Closure<dyn FnMut(f64)>>,
    resize_cb: Option<Closure<dyn FnMut()>>,
    next_listener: u32,
}

impl BrowserHost {
    #[must_use]
    pub fn new(window: Window) -> Self {
        Self { window, frame_cb: None, resize_cb: None, next_listener: 1 }
    }

    fn install(&mut self, frame_cb: Closure<dyn FnMut(f64)>, resize_cb: Closure<dyn FnMut()>) {
        self.frame_cb = Some(frame_cb);
        self.resize_cb = Some(resize_cb);
    }

    fn dimension(value: Result<JsValue, JsValue>) -> f64 {
        value.map_or(0.0, |v| v.as_f64().unwrap_or(0.0))
    }
}

impl FrameHost for BrowserHost {
    fn viewport(&self) -> Viewport {
        Viewport::new(
            Self::dimension(self.window.inner_width()),
            Self::dimension(self.window.inner_height()),
            self.window.device_pixel_ratio(),
        )
    }

    fn request_frame(&mut self) -> Result<FrameHandle, FxError> {
        let cb = self
            .frame_cb
            .as_ref()
            .ok_or_else(|| FxError::Schedule("frame callback not installed".into()))?;
        self.window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .map(FrameHandle)
            .map_err(|e| FxError::Schedule(js_message(&e)))
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Err(e) = self.window.cancel_animation_frame(handle.0) {
            tracing::warn!(error = %js_message(&e), "cancelAnimationFrame failed");
        }
    }

    fn add_resize_listener(&mut self) -> Result<ListenerHandle, FxError> {
        let cb = self
            .resize_cb
            .as_ref()
            .ok_or_else(|| FxError::Listener("resize callback not installed".into()))?;
        self.window
            .add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())
            .map_err(|e| FxError::Listener(js_message(&e)))?;
        let handle = ListenerHandle(self.next_listener);
        self.next_listener = self.next_listener.wrapping_add(1);
        Ok(handle)
    }

    fn remove_resize_listener(&mut self, _handle: ListenerHandle) {
        let Some(cb) = self.resize_cb.as_ref() else {
            return;
        };
        if let Err(e) = self
            .window
            .remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())
        {
            tracing::warn!(error = %js_message(&e), "removing resize listener failed");
        }
    }
}

// =============================================================
// WebFx
// =============================================================

type SharedController = Rc<RefCell<FxController<CanvasSurface, BrowserHost>>>;

/// The page's handle on the particle overlay.
#[derive(Clone)]
pub struct WebFx {
    controller: SharedController,
}

impl WebFx {
    /// Bind the overlay to `canvas` and wire its browser callbacks.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no window or the canvas has no 2D
    /// context.
    pub fn mount(canvas: HtmlCanvasElement, seed: u64) -> Result<Self, FxError> {
        let window = web_sys::window().ok_or_else(|| FxError::Surface("no window".into()))?;
        let surface = CanvasSurface::new(canvas)?;
        let controller = Rc::new(RefCell::new(FxController::new(surface, BrowserHost::new(window), seed)));

        let frame_cb = frame_callback(Rc::downgrade(&controller));
        let resize_cb = resize_callback(Rc::downgrade(&controller));
        controller.borrow_mut().host_mut().install(frame_cb, resize_cb);

        Ok(Self { controller })
    }

    /// Replace the running effect with `kind`.
    ///
    /// # Errors
    ///
    /// See [`FxController::start`].
    pub fn start(&self, kind: EffectKind) -> Result<(), FxError> {
        self.controller.borrow_mut().start(kind)
    }

    /// Stop the running effect, if any.
    ///
    /// # Errors
    ///
    /// See [`FxController::stop`].
    pub fn stop(&self) -> Result<(), FxError> {
        self.controller.borrow_mut().stop()
    }

    #[must_use]
    pub fn state(&self) -> FxState {
        self.controller.borrow().state()
    }
}

fn frame_callback(weak: Weak<RefCell<FxController<CanvasSurface, BrowserHost>>>) -> Closure<dyn FnMut(f64)> {
    Closure::wrap(Box::new(move |_ts: f64| {
        let Some(controller) = weak.upgrade() else {
            return;
        };
        if let Err(e) = controller.borrow_mut().on_frame() {
            tracing::warn!(error = %e, "effect frame failed; session stopped");
        }
    }) as Box<dyn FnMut(f64)>)
}

fn resize_callback(weak: Weak<RefCell<FxController<CanvasSurface, BrowserHost>>>) -> Closure<dyn FnMut()> {
    Closure::wrap(Box::new(move || {
        let Some(controller) = weak.upgrade() else {
            return;
        };
        if let Err(e) = controller.borrow_mut().on_resize() {
            tracing::warn!(error = %e, "effect resize failed");
        }
    }) as Box<dyn FnMut()>)
}
