//! WASM player binding
//!
//! `WasmPlayer` owns a [`PlayerSession`] over the page's `<audio>` element and
//! `localStorage`. Intents come in as plain JS objects; signals go out both
//! as the return value of `dispatch` and through the `onSignal` callback, so
//! media status events (which arrive from DOM listeners) reach the view too.

use crate::intent::Intent;
use crate::session::PlayerSession;
use crate::signal::Signal;
use crate::wasm::media::HtmlMediaResource;
use crate::wasm::storage::LocalStorageStore;
use flow_core::{LoadId, MediaEvent, MediaStatus};
use flow_playback::PlaybackConfig;
use js_sys::Function;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlMediaElement};

type BrowserSession = PlayerSession<HtmlMediaResource, LocalStorageStore>;

/// Browser entry point
#[wasm_bindgen]
pub struct WasmPlayer {
    session: Rc<RefCell<BrowserSession>>,
    on_signal: Rc<RefCell<Option<Function>>>,
    element: HtmlMediaElement,
    listeners: Vec<(&'static str, Closure<dyn FnMut(Event)>)>,
}

#[wasm_bindgen]
impl WasmPlayer {
    /// Create a player bound to `element`
    ///
    /// `config` is an optional `{ volume, shuffle, repeat }` object.
    #[wasm_bindgen(constructor)]
    pub fn new(element: HtmlMediaElement, config: JsValue) -> Result<WasmPlayer, JsValue> {
        console_error_panic_hook::set_once();

        let config: PlaybackConfig = if config.is_undefined() || config.is_null() {
            PlaybackConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };

        let store = LocalStorageStore::from_window().map_err(|e| JsValue::from_str(&e.to_string()))?;
        let media = HtmlMediaResource::new(element.clone());
        let active_load = media.active_load();

        let mut player = Self {
            session: Rc::new(RefCell::new(PlayerSession::new(media, store, config))),
            on_signal: Rc::new(RefCell::new(None)),
            element,
            listeners: Vec::new(),
        };

        player.listen("timeupdate", &active_load, |el| MediaEvent::TimeUpdate {
            position: el.current_time(),
        })?;
        player.listen("loadedmetadata", &active_load, |el| MediaEvent::MetadataLoaded {
            duration: el.duration(),
        })?;
        player.listen("ended", &active_load, |_| MediaEvent::Ended)?;
        player.listen("play", &active_load, |_| MediaEvent::Play)?;
        player.listen("pause", &active_load, |_| MediaEvent::Pause)?;

        Ok(player)
    }

    /// Register the signal callback
    #[wasm_bindgen(js_name = onSignal)]
    pub fn on_signal(&self, callback: Function) {
        *self.on_signal.borrow_mut() = Some(callback);
    }

    /// First-paint signals
    pub fn start(&self) -> Result<JsValue, JsValue> {
        let signals = self.session.borrow_mut().start();
        emit(&self.on_signal, &signals);
        Ok(serde_wasm_bindgen::to_value(&signals)?)
    }

    /// Handle an intent object such as `{ type: "play_track", payload: "3" }`
    pub fn dispatch(&self, intent: JsValue) -> Result<JsValue, JsValue> {
        let intent: Intent = serde_wasm_bindgen::from_value(intent)?;

        // Release the session before callbacks run; they may dispatch again
        let signals = self.session.borrow_mut().dispatch(intent);
        emit(&self.on_signal, &signals);

        Ok(serde_wasm_bindgen::to_value(&signals)?)
    }

    /// Current player surfaces
    pub fn surfaces(&self) -> Result<JsValue, JsValue> {
        let surfaces = self.session.borrow().surfaces();
        Ok(serde_wasm_bindgen::to_value(&surfaces)?)
    }
}

impl WasmPlayer {
    fn listen(
        &mut self,
        event_name: &'static str,
        active_load: &Rc<Cell<LoadId>>,
        to_event: fn(&HtmlMediaElement) -> MediaEvent,
    ) -> Result<(), JsValue> {
        let session = Rc::clone(&self.session);
        let on_signal = Rc::clone(&self.on_signal);
        let active_load = Rc::clone(active_load);
        let element = self.element.clone();

        let closure = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            let status = MediaStatus::new(active_load.get(), to_event(&element));

            let signals = match session.try_borrow_mut() {
                Ok(mut session) => session.dispatch(Intent::Media(status)),
                Err(_) => {
                    web_sys::console::warn_1(&format!("Dropped media event {}", event_name).into());
                    return;
                }
            };
            emit(&on_signal, &signals);
        });

        self.element
            .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())?;
        self.listeners.push((event_name, closure));
        Ok(())
    }
}

impl Drop for WasmPlayer {
    fn drop(&mut self) {
        for (event_name, closure) in &self.listeners {
            let _ = self
                .element
                .remove_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
        }
    }
}

fn emit(on_signal: &RefCell<Option<Function>>, signals: &[Signal]) {
    let Some(callback) = on_signal.borrow().clone() else {
        return;
    };

    for signal in signals {
        let value = serde_wasm_bindgen::to_value(signal).unwrap_or(JsValue::NULL);
        if let Err(err) = callback.call1(&JsValue::NULL, &value) {
            web_sys::console::error_2(&"onSignal callback failed".into(), &err);
        }
    }
}
