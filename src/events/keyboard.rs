use crate::frame::SharedApp;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Keys the page swallows before the app sees them.
#[inline]
pub fn is_suppressed(key: &str) -> bool {
    key == "Tab"
}

pub fn wire_global_keydown(window: &web::Window, app: &SharedApp) {
    let app = app.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        let key = ev.key();
        if is_suppressed(&key) {
            ev.prevent_default();
            return;
        }
        if app.borrow_mut().on_key(&key) {
            ev.prevent_default();
        }
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn wire_context_menu(window: &web::Window) {
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        ev.prevent_default();
        ev.stop_propagation();
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref());
    closure.forget();
}
