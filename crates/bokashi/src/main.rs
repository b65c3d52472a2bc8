use std::cell::RefCell;
use std::rc::Rc;

use bokashi_editor::{BlurParams, EditorSession, SaveResponse, TogglePauseRequest};
use bokashi_io::{
    ControlPanel, Endpoints, MaskCanvas, PreviewFeed, RenderLoop, SaveStatus, SyncChannel, http,
};
use dioxus::prelude::*;

/// DOM id shared by the canvas component, the preview feed (for first
/// frame sizing), and the repaint loop.
const CANVAS_ID: &str = "mask-canvas";

fn main() {
    dioxus::launch(app);
}

/// Root application component.
///
/// Owns the long-lived editor objects (session, sync channel, preview
/// feed, repaint loop) via `use_hook`, one of each per canvas for the
/// page's lifetime, plus the UI signals for parameters and the
/// save flow, and wires them into the canvas and control components.
#[allow(clippy::too_many_lines)]
fn app() -> Element {
    // --- Long-lived editor objects ---
    let endpoints = use_hook(Endpoints::default);
    let session = use_hook(|| Rc::new(RefCell::new(EditorSession::new())));
    let sync = use_hook({
        let endpoints = endpoints.clone();
        let session = Rc::clone(&session);
        move || SyncChannel::new(endpoints, session)
    });
    let preview = use_hook({
        let endpoints = endpoints.clone();
        let session = Rc::clone(&session);
        move || {
            PreviewFeed::new(endpoints.snapshot, CANVAS_ID.to_owned(), move |size| {
                session.borrow_mut().set_canvas_size(size);
            })
        }
    });
    let render_loop = use_hook({
        let session = Rc::clone(&session);
        let frame = preview.frame_slot();
        move || RenderLoop::new(CANVAS_ID.to_owned(), session, frame)
    });

    // --- UI state ---
    let mut params = use_signal(BlurParams::default);
    let mut fps = use_signal(|| bokashi_io::preview::DEFAULT_FPS);
    let mut save_status = use_signal(SaveStatus::default);

    // --- Startup ---
    // Runs once after the first render, when the canvas element exists:
    // push the initial parameter set, then bring up the frame feed and
    // the repaint loop. `peek` keeps this effect from re-running on
    // later parameter changes.
    use_effect({
        let sync = Rc::clone(&sync);
        let preview = Rc::clone(&preview);
        let render_loop = Rc::clone(&render_loop);
        move || {
            sync.push_params(*params.peek());
            preview.start();
            render_loop.start();
        }
    });

    // --- Handlers ---
    let on_params_change = {
        let sync = Rc::clone(&sync);
        move |p: BlurParams| {
            params.set(p);
            sync.push_params(p);
        }
    };

    let on_fps_change = {
        let preview = Rc::clone(&preview);
        move |requested: u32| {
            preview.set_fps(requested);
            fps.set(preview.fps());
        }
    };

    let on_pause = {
        let endpoints = endpoints.clone();
        move |paused: bool| {
            http::post_and_forget(endpoints.toggle_pause.clone(), TogglePauseRequest { paused });
        }
    };

    let on_clear = {
        let session = Rc::clone(&session);
        let sync = Rc::clone(&sync);
        move |()| {
            if session.borrow_mut().clear() {
                sync.schedule_mask_sync();
            }
        }
    };

    let on_save = {
        let endpoints = endpoints.clone();
        move |()| {
            let save_url = endpoints.save.clone();
            save_status.set(SaveStatus::Working);
            spawn(async move {
                match http::request_save(&save_url).await {
                    Ok(SaveResponse {
                        ok: true,
                        download_url: Some(url),
                    }) => {
                        save_status.set(SaveStatus::Done { download_url: url });
                    }
                    Ok(_) => {
                        save_status.set(SaveStatus::Failed);
                    }
                    Err(e) => {
                        web_sys::console::warn_1(&format!("save request failed: {e}").into());
                        save_status.set(SaveStatus::Failed);
                    }
                }
            });
        }
    };

    // --- Layout ---
    rsx! {
        style { dangerous_inner_html: include_str!("../assets/app.css") }

        div { class: "page",
            header { class: "page-header",
                h1 { "bokashi" }
                p { class: "subtitle",
                    "Drag on the preview to add privacy masks; drag an existing mask to move it."
                }
            }

            div { class: "page-body",
                MaskCanvas {
                    session: Rc::clone(&session),
                    sync: Rc::clone(&sync),
                    canvas_id: CANVAS_ID.to_owned(),
                }

                ControlPanel {
                    params: params(),
                    fps: fps(),
                    save_status: save_status(),
                    on_params_change: on_params_change,
                    on_fps_change: on_fps_change,
                    on_pause: on_pause,
                    on_clear: on_clear,
                    on_save: on_save,
                }
            }
        }
    }
}
