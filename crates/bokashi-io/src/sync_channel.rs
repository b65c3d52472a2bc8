//! Debounced mask pushes and immediate parameter pushes.

use std::cell::RefCell;
use std::rc::Rc;

use bokashi_editor::{BlurParams, EditorSession, SetMasksRequest, SyncDebouncer};
use gloo_timers::callback::Timeout;

use crate::endpoints::Endpoints;
use crate::http;

/// Outbound synchronization to the processing backend.
///
/// Mask pushes are debounced through the pure [`SyncDebouncer`] policy;
/// a one-slot [`Timeout`] provides the wakeup, and replacing the slot
/// cancels the previous wakeup, so at most one push is ever pending.
/// The mask list is serialized when the push fires, not when it is
/// scheduled, so a burst of edits sends the state as of the last one.
/// An already-in-flight request is never cancelled; a superseded push
/// completing redundantly is harmless, the last one wins at the server.
///
/// Parameter pushes go out immediately; the backend has no other writer
/// so the full set is simply replaced.
pub struct SyncChannel {
    endpoints: Endpoints,
    session: Rc<RefCell<EditorSession>>,
    debounce: RefCell<SyncDebouncer>,
    wakeup: RefCell<Option<Timeout>>,
}

impl SyncChannel {
    /// Create a channel pushing the given session's masks.
    #[must_use]
    pub fn new(endpoints: Endpoints, session: Rc<RefCell<EditorSession>>) -> Rc<Self> {
        Rc::new(Self {
            endpoints,
            session,
            debounce: RefCell::new(SyncDebouncer::default()),
            wakeup: RefCell::new(None),
        })
    }

    /// Schedule (or postpone) a debounced push of the full mask list.
    pub fn schedule_mask_sync(self: &Rc<Self>) {
        let mut debounce = self.debounce.borrow_mut();
        debounce.schedule(js_sys::Date::now());
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let window_ms = bokashi_editor::MASK_SYNC_DEBOUNCE_MS as u32;
        drop(debounce);

        let channel = Rc::clone(self);
        let wakeup = Timeout::new(window_ms, move || {
            // The fired handle stays in the slot until the next schedule
            // replaces it; the debouncer is the authority on whether
            // anything is still pending.
            if channel.debounce.borrow_mut().fire_due(js_sys::Date::now()) {
                channel.push_masks_now();
            }
        });
        // Replacing the slot drops, and thereby cancels, any previous
        // wakeup still ticking.
        *self.wakeup.borrow_mut() = Some(wakeup);
    }

    /// Push the complete parameter set right away, no debounce.
    pub fn push_params(&self, params: BlurParams) {
        http::post_and_forget(self.endpoints.set_params.clone(), params);
    }

    /// Serialize and send the entire current mask list, fire-and-forget.
    fn push_masks_now(&self) {
        let masks = self.session.borrow().masks().list().to_vec();
        http::post_and_forget(self.endpoints.set_masks.clone(), SetMasksRequest { masks });
    }
}
