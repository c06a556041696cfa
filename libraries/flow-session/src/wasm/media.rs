//! `MediaResource` over an HTML media element

use flow_core::{LoadId, MediaResource};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::HtmlMediaElement;

/// The page's `<audio>` element as the controller's media resource
///
/// Remembers the id of the active load so DOM listeners can stamp the
/// status events they forward.
pub struct HtmlMediaResource {
    element: HtmlMediaElement,
    active_load: Rc<Cell<LoadId>>,
    // Shared by every play() promise for the resource's lifetime
    on_play_rejected: Closure<dyn FnMut(JsValue)>,
}

impl HtmlMediaResource {
    pub fn new(element: HtmlMediaElement) -> Self {
        Self {
            element,
            active_load: Rc::new(Cell::new(LoadId::default())),
            on_play_rejected: Closure::new(|err: JsValue| {
                web_sys::console::warn_2(&"Playback rejected".into(), &err);
            }),
        }
    }

    pub fn element(&self) -> &HtmlMediaElement {
        &self.element
    }

    /// Shared handle to the active load id
    pub fn active_load(&self) -> Rc<Cell<LoadId>> {
        Rc::clone(&self.active_load)
    }
}

impl MediaResource for HtmlMediaResource {
    fn load(&mut self, load: LoadId, source: &str) {
        self.active_load.set(load);
        self.element.set_src(source);
    }

    fn play(&mut self) {
        match self.element.play() {
            Ok(promise) => {
                // Autoplay policy or an unplayable source rejects the promise
                let _ = promise.catch(&self.on_play_rejected);
            }
            Err(err) => web_sys::console::warn_2(&"Playback failed".into(), &err),
        }
    }

    fn pause(&mut self) {
        if let Err(err) = self.element.pause() {
            web_sys::console::warn_2(&"Pause failed".into(), &err);
        }
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.element.set_current_time(seconds);
    }

    fn set_volume(&mut self, volume: f32) {
        self.element.set_volume(f64::from(volume));
    }

    fn volume(&self) -> f32 {
        self.element.volume() as f32
    }
}
