//! Periodic preview frame fetching.
//!
//! Polls the backend's snapshot endpoint on a repeating timer and
//! publishes the most recently *completed* image for the repaint loop
//! to draw. The feed is the producer and the repaint loop the consumer
//! of that single slot; under the cooperative event loop no further
//! synchronization is needed.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use bokashi_editor::Dimensions;
use gloo_timers::callback::Interval;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::HtmlImageElement;

use crate::dom;

/// Default preview refresh rate.
pub const DEFAULT_FPS: u32 = 10;

/// Slowest accepted refresh rate.
pub const MIN_FPS: u32 = 1;

/// Fastest accepted refresh rate.
pub const MAX_FPS: u32 = 30;

/// Floor on the poll period regardless of the requested rate.
const MIN_PERIOD_MS: u32 = 60;

/// Canvas size to assume when the first frame reports none.
const FALLBACK_SIZE: Dimensions = Dimensions::new(640, 360);

/// Repeating snapshot fetcher with a one-frame output slot.
pub struct PreviewFeed {
    snapshot_url: String,
    canvas_id: String,
    /// Latest fully loaded frame; read by the repaint loop.
    frame: Rc<RefCell<Option<HtmlImageElement>>>,
    /// The image currently loading, if any. One fetch in flight at a
    /// time; a fetch that never completes is abandoned on the next tick.
    inflight: RefCell<Option<HtmlImageElement>>,
    /// Shared onload handler, created lazily and reused for every fetch
    /// so it is never dropped mid-invocation.
    onload: RefCell<Option<Closure<dyn FnMut()>>>,
    interval: RefCell<Option<Interval>>,
    fps: Cell<u32>,
    on_size: Box<dyn Fn(Dimensions)>,
}

impl PreviewFeed {
    /// Create a feed polling `snapshot_url` and sizing the canvas named
    /// by `canvas_id` from the first frame. `on_size` fires once, with
    /// the resolution the canvas was given.
    #[must_use]
    pub fn new(
        snapshot_url: String,
        canvas_id: String,
        on_size: impl Fn(Dimensions) + 'static,
    ) -> Rc<Self> {
        Rc::new(Self {
            snapshot_url,
            canvas_id,
            frame: Rc::new(RefCell::new(None)),
            inflight: RefCell::new(None),
            onload: RefCell::new(None),
            interval: RefCell::new(None),
            fps: Cell::new(DEFAULT_FPS),
            on_size: Box::new(on_size),
        })
    }

    /// The shared frame slot, for wiring up the repaint loop.
    #[must_use]
    pub fn frame_slot(&self) -> Rc<RefCell<Option<HtmlImageElement>>> {
        Rc::clone(&self.frame)
    }

    /// Current refresh rate.
    #[must_use]
    pub fn fps(&self) -> u32 {
        self.fps.get()
    }

    /// Begin polling. Fetches immediately, then on every period tick.
    /// Does nothing if the feed is already running.
    pub fn start(self: &Rc<Self>) {
        if self.interval.borrow().is_some() {
            return;
        }
        self.fetch_frame();

        let period_ms = (1000 / self.fps.get()).max(MIN_PERIOD_MS);
        let feed = Rc::clone(self);
        let interval = Interval::new(period_ms, move || feed.fetch_frame());
        *self.interval.borrow_mut() = Some(interval);
    }

    /// Stop polling. The last published frame stays available.
    pub fn stop(&self) {
        // Dropping the interval cancels it.
        self.interval.borrow_mut().take();
    }

    /// Change the refresh rate, clamped to [`MIN_FPS`]..=[`MAX_FPS`].
    ///
    /// A running feed is cancelled and rescheduled at the new period.
    pub fn set_fps(self: &Rc<Self>, fps: u32) {
        self.fps.set(fps.clamp(MIN_FPS, MAX_FPS));
        if self.interval.borrow().is_some() {
            self.stop();
            self.start();
        }
    }

    /// Kick off one snapshot fetch.
    ///
    /// A still-loading image from an earlier tick is abandoned first
    /// (its load either failed or is slower than the poll period), so a
    /// failed fetch simply means this tick's repaints keep the previous
    /// frame, and the next tick retries on its own.
    fn fetch_frame(self: &Rc<Self>) {
        if self.onload.borrow().is_none() {
            let feed = Rc::clone(self);
            *self.onload.borrow_mut() = Some(Closure::new(move || feed.frame_loaded()));
        }

        if let Some(stale) = self.inflight.borrow_mut().take() {
            stale.set_onload(None);
        }

        let Ok(img) = HtmlImageElement::new() else {
            return;
        };
        if let Some(cb) = self.onload.borrow().as_ref() {
            img.set_onload(Some(cb.as_ref().unchecked_ref()));
        }
        // Cache-buster: the snapshot URL is constant but its content is
        // not, and intermediaries must not replay an old frame.
        img.set_src(&format!("{}?_={}", self.snapshot_url, js_sys::Date::now()));
        *self.inflight.borrow_mut() = Some(img);
    }

    /// A fetch completed: publish the frame and, on the very first one,
    /// size the canvas to the preview's intrinsic resolution.
    fn frame_loaded(&self) {
        let Some(img) = self.inflight.borrow_mut().take() else {
            return;
        };
        img.set_onload(None);

        if let Ok(canvas) = dom::canvas_by_id(&self.canvas_id)
            && canvas.width() == 0
        {
            let size = if img.natural_width() > 0 {
                Dimensions::new(img.natural_width(), img.natural_height())
            } else {
                FALLBACK_SIZE
            };
            canvas.set_width(size.width);
            canvas.set_height(size.height);
            (self.on_size)(size);
        }

        *self.frame.borrow_mut() = Some(img);
    }
}
