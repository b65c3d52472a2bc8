//! Processing parameter controls and the save flow UI.
//!
//! Renders the blur-strength slider, the auto-face toggle, the preview
//! refresh-rate slider, and the pause/resume/clear/save buttons. Every
//! parameter change fires with the *full* parameter set; the app pushes
//! it to the backend immediately (no debounce).

use bokashi_editor::BlurParams;
use bokashi_editor::protocol::{BLUR_STRENGTH_MAX, BLUR_STRENGTH_MIN};
use dioxus::prelude::*;

use crate::preview::{MAX_FPS, MIN_FPS};

/// Where the save-video flow currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SaveStatus {
    /// No save attempted since load (or since the last status cleared).
    #[default]
    Idle,
    /// The backend is processing; the save button is disabled.
    Working,
    /// Processing finished; the result can be downloaded.
    Done {
        /// Where the processed video can be fetched from.
        download_url: String,
    },
    /// The request failed or returned a malformed response.
    Failed,
}

/// Props for the [`ControlPanel`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ControlPanelProps {
    /// Current parameter values (the app owns them).
    params: BlurParams,
    /// Current preview refresh rate.
    fps: u32,
    /// Current save flow state.
    save_status: SaveStatus,
    /// Fired with the full parameter set on any parameter change.
    on_params_change: EventHandler<BlurParams>,
    /// Fired with the requested preview refresh rate.
    on_fps_change: EventHandler<u32>,
    /// Fired with `true` to pause the preview, `false` to resume.
    on_pause: EventHandler<bool>,
    /// Fired when the user clears all masks.
    on_clear: EventHandler<()>,
    /// Fired when the user requests full-video processing.
    on_save: EventHandler<()>,
}

/// The parameter/action sidebar.
#[component]
pub fn ControlPanel(props: ControlPanelProps) -> Element {
    let params = props.params;
    let on_params = props.on_params_change;
    let on_fps = props.on_fps_change;
    let on_pause = props.on_pause;
    let on_clear = props.on_clear;
    let on_save = props.on_save;
    let saving = props.save_status == SaveStatus::Working;

    rsx! {
        div { class: "control-panel",
            {render_slider(
                "blur_strength",
                "Blur Strength",
                params.blur_strength,
                BLUR_STRENGTH_MIN,
                BLUR_STRENGTH_MAX,
                0.1,
                1,
                move |v: f64| {
                    on_params.call(BlurParams {
                        blur_strength: v,
                        ..params
                    });
                },
            )}
            {render_toggle(
                "auto_face",
                "Auto Face Blur",
                params.auto_face,
                move |v: bool| {
                    on_params.call(BlurParams {
                        auto_face: v,
                        ..params
                    });
                },
            )}
            {render_slider(
                "preview_fps",
                "Preview Rate",
                f64::from(props.fps),
                f64::from(MIN_FPS),
                f64::from(MAX_FPS),
                1.0,
                0,
                move |v: f64| {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    {
                        on_fps.call(v as u32);
                    }
                },
            )}

            div { class: "button-row",
                button { class: "btn", onclick: move |_| on_pause.call(true), "Pause" }
                button { class: "btn", onclick: move |_| on_pause.call(false), "Resume" }
                button { class: "btn", onclick: move |_| on_clear.call(()), "Clear Masks" }
                button {
                    class: "btn btn-primary",
                    disabled: saving,
                    onclick: move |_| on_save.call(()),
                    "Save Video"
                }
            }

            if saving {
                p { class: "save-status", "Processing..." }
            }
            if let SaveStatus::Done { ref download_url } = props.save_status {
                p { class: "save-status",
                    a { class: "btn", href: "{download_url}", "Download Result" }
                }
            }
            if props.save_status == SaveStatus::Failed {
                p { class: "save-status save-error", "Save failed." }
            }
        }
    }
}

/// Render a labeled range slider with its current value.
#[allow(clippy::too_many_arguments)]
fn render_slider(
    id: &str,
    label: &str,
    value: f64,
    min: f64,
    max: f64,
    step: f64,
    decimals: usize,
    on_input: impl Fn(f64) + 'static,
) -> Element {
    let display = format!("{value:.decimals$}");
    let id = id.to_string();
    let label = label.to_string();

    rsx! {
        div { class: "field",
            div { class: "field-row",
                label { r#for: "{id}", class: "field-label", "{label}" }
                span { class: "field-value", "{display}" }
            }
            input {
                r#type: "range",
                id: "{id}",
                min: "{min}",
                max: "{max}",
                step: "{step}",
                value: "{value}",
                class: "field-slider",
                oninput: move |e| {
                    match e.value().parse::<f64>() {
                        Ok(v) => on_input(v),
                        Err(err) => {
                            web_sys::console::warn_1(
                                &format!("slider parse failure: {err:?} from {:?}", e.value())
                                    .into(),
                            );
                        }
                    }
                },
            }
        }
    }
}

/// Render a labeled checkbox toggle.
fn render_toggle(
    id: &str,
    label: &str,
    checked: bool,
    on_change: impl Fn(bool) + 'static,
) -> Element {
    let id = id.to_string();
    let label = label.to_string();

    rsx! {
        div { class: "field field-row",
            label { r#for: "{id}", class: "field-label", "{label}" }
            input {
                r#type: "checkbox",
                id: "{id}",
                checked: checked,
                class: "field-toggle",
                onchange: move |e| {
                    on_change(e.checked());
                },
            }
        }
    }
}
