//! Visibility-driven page attachments.
//!
//! Each attachment owns one `IntersectionObserver` and disconnects it when
//! dropped. Browsers without the observer get the visible state immediately.

use crate::constants::{
    ANIMATION_SELECTOR, LAZY_SELECTOR, LAZY_SRC_ATTR, LOADED_CLASS, VISIBLE_CLASS,
};
use crate::dom;
use gallery_core::{Attachment, Entrance};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, web::IntersectionObserver)>;

pub struct Observed {
    observer: Option<web::IntersectionObserver>,
    _callback: Option<ObserverCallback>,
}

impl Attachment for Observed {}

impl Drop for Observed {
    fn drop(&mut self) {
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
    }
}

/// Subscribe `on_change` to the element's intersection state.
pub fn observe(element: &web::Element, mut on_change: impl FnMut(bool) + 'static) -> Observed {
    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, _observer: web::IntersectionObserver| {
            for entry in entries.iter() {
                if let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() {
                    on_change(entry.is_intersecting());
                }
            }
        },
    ) as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);

    match web::IntersectionObserver::new(callback.as_ref().unchecked_ref()) {
        Ok(observer) => {
            observer.observe(element);
            Observed {
                observer: Some(observer),
                _callback: Some(callback),
            }
        }
        Err(e) => {
            log::warn!("[page] IntersectionObserver unavailable: {:?}", e);
            Observed {
                observer: None,
                _callback: None,
            }
        }
    }
}

/// Toggles the visible class; the animation itself lives in CSS.
pub struct ClassEntrance {
    element: web::Element,
}

impl Entrance for ClassEntrance {
    fn on_visibility_change(&mut self, visible: bool) {
        dom::toggle_class(&self.element, VISIBLE_CLASS, visible);
    }
}

fn entrance(element: web::Element) -> Observed {
    let mut target = ClassEntrance {
        element: element.clone(),
    };
    let observed = observe(&element, move |visible| target.on_visibility_change(visible));
    if observed.observer.is_none() {
        dom::toggle_class(&element, VISIBLE_CLASS, true);
    }
    observed
}

/// Move `data-src` into `src` and mark the element once it has loaded.
fn load_deferred(element: &web::Element) {
    if element.has_attribute("src") {
        return;
    }
    let Some(src) = element.get_attribute(LAZY_SRC_ATTR) else {
        return;
    };
    if let Some(html) = element.dyn_ref::<web::HtmlElement>() {
        let loaded = element.clone();
        let onload = Closure::once_into_js(move || {
            _ = loaded.class_list().add_1(LOADED_CLASS);
        });
        html.set_onload(Some(onload.unchecked_ref()));
    }
    _ = element.set_attribute("src", &src);
}

fn lazy_media(element: web::Element) -> Observed {
    let target = element.clone();
    let observed = observe(&element, move |visible| {
        if visible {
            load_deferred(&target);
        }
    });
    if observed.observer.is_none() {
        load_deferred(&element);
    }
    observed
}

/// Attachments for every entrance target and deferred image under `root`.
pub fn attach_all(root: &web::Element) -> Vec<Box<dyn Attachment>> {
    let mut out: Vec<Box<dyn Attachment>> = Vec::new();
    for el in dom::query_all(root, ANIMATION_SELECTOR) {
        out.push(Box::new(entrance(el)));
    }
    for el in dom::query_all(root, LAZY_SELECTOR) {
        out.push(Box::new(lazy_media(el)));
    }
    log::debug!("[page] {} attachments", out.len());
    out
}
