//! The perpetual canvas repaint loop.
//!
//! Driven by `requestAnimationFrame` so repaints ride the display's
//! refresh, decoupled from both the pointer event rate and the preview
//! poll. Each tick redraws the latest frame and strokes the scene the
//! pure builder computes; it never touches network state.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use bokashi_editor::{EditorSession, scene};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::HtmlImageElement;

use crate::dom;

/// Self-rescheduling repaint task for one canvas.
pub struct RenderLoop {
    canvas_id: String,
    session: Rc<RefCell<EditorSession>>,
    frame: Rc<RefCell<Option<HtmlImageElement>>>,
    running: Cell<bool>,
    raf_id: Cell<Option<i32>>,
    tick: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl RenderLoop {
    /// Create a loop painting `session` over the frames in `frame`.
    #[must_use]
    pub fn new(
        canvas_id: String,
        session: Rc<RefCell<EditorSession>>,
        frame: Rc<RefCell<Option<HtmlImageElement>>>,
    ) -> Rc<Self> {
        Rc::new(Self {
            canvas_id,
            session,
            frame,
            running: Cell::new(false),
            raf_id: Cell::new(None),
            tick: RefCell::new(None),
        })
    }

    /// Begin repainting every animation frame. Idempotent.
    pub fn start(self: &Rc<Self>) {
        if self.running.get() {
            return;
        }
        self.running.set(true);

        if self.tick.borrow().is_none() {
            let render = Rc::clone(self);
            *self.tick.borrow_mut() = Some(Closure::new(move || {
                if !render.running.get() {
                    return;
                }
                render.render_once();
                render.request_next();
            }));
        }
        self.request_next();
    }

    /// Stop repainting and cancel the queued animation frame.
    pub fn stop(&self) {
        self.running.set(false);
        if let Some(id) = self.raf_id.take()
            && let Some(window) = web_sys::window()
        {
            let _ = window.cancel_animation_frame(id);
        }
    }

    /// Paint one frame right now.
    ///
    /// Public so a paused editor (or a test harness) can step the
    /// display deterministically instead of waiting on real vsync.
    pub fn render_once(&self) {
        let Ok(canvas) = dom::canvas_by_id(&self.canvas_id) else {
            return;
        };
        let Ok(ctx) = dom::context_2d(&canvas) else {
            return;
        };
        let width = f64::from(canvas.width());
        let height = f64::from(canvas.height());

        // Latest preview frame first; before one exists the overlay is
        // drawn on the blank canvas.
        if let Some(img) = self.frame.borrow().as_ref() {
            let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
                img, 0.0, 0.0, width, height,
            );
        }

        let scene = scene::build_scene(&self.session.borrow());

        ctx.set_line_width(scene::STROKE_WIDTH);
        ctx.set_stroke_style_str(scene::MASK_STROKE);
        let _ = ctx.set_line_dash(&js_sys::Array::new());
        for rect in &scene.committed {
            ctx.stroke_rect(rect.x, rect.y, rect.w, rect.h);
        }

        if let Some(draft) = scene.in_progress {
            let dash = js_sys::Array::of2(
                &scene::DRAFT_DASH[0].into(),
                &scene::DRAFT_DASH[1].into(),
            );
            let _ = ctx.set_line_dash(&dash);
            ctx.set_stroke_style_str(scene::DRAFT_STROKE);
            ctx.stroke_rect(draft.x, draft.y, draft.w, draft.h);
            let _ = ctx.set_line_dash(&js_sys::Array::new());
        }
    }

    /// Queue the next tick.
    fn request_next(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Some(tick) = self.tick.borrow().as_ref()
            && let Ok(id) = window.request_animation_frame(tick.as_ref().unchecked_ref())
        {
            self.raf_id.set(Some(id));
        }
    }
}
