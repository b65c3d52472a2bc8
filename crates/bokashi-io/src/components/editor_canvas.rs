//! The interactive mask canvas.
//!
//! Renders the `<canvas>` the repaint loop paints into and feeds
//! pointer/touch events through the coordinate transform into the
//! session's state machine. Mouse and pen arrive as pointer events;
//! touch input comes through the touch events (whose first touch point
//! is used), and touch-typed pointer events are ignored so a tap is
//! never processed twice.

use std::cell::RefCell;
use std::rc::Rc;

use bokashi_editor::{CanvasPoint, ClientInput, EditorSession, transform};
use dioxus::prelude::*;

use crate::dom;
use crate::sync_channel::SyncChannel;

/// Props for the [`MaskCanvas`] component.
#[derive(Props, Clone)]
pub struct MaskCanvasProps {
    /// The session receiving the pointer stream.
    session: Rc<RefCell<EditorSession>>,
    /// Channel notified when a mutating transition needs a mask sync.
    sync: Rc<SyncChannel>,
    /// DOM id of the canvas element, shared with the repaint loop and
    /// the preview feed.
    canvas_id: String,
}

impl PartialEq for MaskCanvasProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.session, &other.session)
            && Rc::ptr_eq(&self.sync, &other.sync)
            && self.canvas_id == other.canvas_id
    }
}

/// The mask-editing canvas element and its event wiring.
#[component]
pub fn MaskCanvas(props: MaskCanvasProps) -> Element {
    let session_pd = Rc::clone(&props.session);
    let session_pm = Rc::clone(&props.session);
    let session_pu = Rc::clone(&props.session);
    let session_pc = Rc::clone(&props.session);
    let session_ts = Rc::clone(&props.session);
    let session_tm = Rc::clone(&props.session);
    let session_te = Rc::clone(&props.session);
    let sync_pm = Rc::clone(&props.sync);
    let sync_pu = Rc::clone(&props.sync);
    let sync_pc = Rc::clone(&props.sync);
    let sync_tm = Rc::clone(&props.sync);
    let sync_te = Rc::clone(&props.sync);
    let id_pd = props.canvas_id.clone();
    let id_pm = props.canvas_id.clone();
    let id_ts = props.canvas_id.clone();
    let id_tm = props.canvas_id.clone();

    rsx! {
        canvas {
            id: "{props.canvas_id}",
            class: "mask-canvas",
            // The browser must not turn touch drags into scrolling.
            style: "touch-action: none",

            onpointerdown: move |e: PointerEvent| {
                if e.pointer_type() == "touch" {
                    return;
                }
                // Capture so a drag keeps reporting after leaving the
                // element.
                if let Ok(canvas) = dom::canvas_by_id(&id_pd) {
                    let _ = canvas.set_pointer_capture(e.pointer_id());
                }
                let c = e.client_coordinates();
                handle_down(&session_pd, &id_pd, ClientInput::mouse(c.x, c.y));
            },
            onpointermove: move |e: PointerEvent| {
                if e.pointer_type() == "touch" {
                    return;
                }
                let c = e.client_coordinates();
                handle_move(&session_pm, &sync_pm, &id_pm, ClientInput::mouse(c.x, c.y));
            },
            onpointerup: move |e: PointerEvent| {
                if e.pointer_type() == "touch" {
                    return;
                }
                handle_up(&session_pu, &sync_pu);
            },
            onpointercancel: move |_| {
                // A cancelled pointer releases like a pointer-up; the
                // state machine discards anything uncommitted.
                handle_up(&session_pc, &sync_pc);
            },

            ontouchstart: move |e: TouchEvent| {
                e.prevent_default();
                if let Some(input) = first_touch(&e) {
                    handle_down(&session_ts, &id_ts, input);
                }
            },
            ontouchmove: move |e: TouchEvent| {
                e.prevent_default();
                if let Some(input) = first_touch(&e) {
                    handle_move(&session_tm, &sync_tm, &id_tm, input);
                }
            },
            ontouchend: move |e: TouchEvent| {
                e.prevent_default();
                handle_up(&session_te, &sync_te);
            },
        }
    }
}

/// The first touch point as a unified input, if any finger is down.
fn first_touch(e: &TouchEvent) -> Option<ClientInput> {
    e.touches().first().map(|touch| {
        let c = touch.client_coordinates();
        ClientInput::touch(c.x, c.y)
    })
}

/// Convert a client-space input to canvas pixels using the element's
/// live bounding box and intrinsic size.
fn canvas_point(canvas_id: &str, input: ClientInput) -> Option<CanvasPoint> {
    let canvas = dom::canvas_by_id(canvas_id).ok()?;
    Some(transform::client_to_canvas(
        input,
        dom::view_rect(&canvas),
        dom::intrinsic_size(&canvas),
    ))
}

fn handle_down(session: &Rc<RefCell<EditorSession>>, canvas_id: &str, input: ClientInput) {
    if let Some(p) = canvas_point(canvas_id, input) {
        session.borrow_mut().pointer_down(p);
    }
}

fn handle_move(
    session: &Rc<RefCell<EditorSession>>,
    sync: &Rc<SyncChannel>,
    canvas_id: &str,
    input: ClientInput,
) {
    if let Some(p) = canvas_point(canvas_id, input)
        && session.borrow_mut().pointer_move(p)
    {
        sync.schedule_mask_sync();
    }
}

fn handle_up(session: &Rc<RefCell<EditorSession>>, sync: &Rc<SyncChannel>) {
    if session.borrow_mut().pointer_up() {
        sync.schedule_mask_sync();
    }
}
