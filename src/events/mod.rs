pub mod keyboard;
pub mod pointer;

use crate::frame::SharedApp;
use crate::links::NavInbox;
use gallery_core::NavigationRequest;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_resize(window: &web::Window, app: &SharedApp) {
    let app = app.clone();
    let closure = Closure::wrap(Box::new(move || {
        app.borrow_mut().on_resize();
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Back/forward navigations arrive with the URL bar already updated.
pub fn wire_popstate(window: &web::Window, inbox: &NavInbox) {
    let inbox = inbox.clone();
    let closure = Closure::wrap(Box::new(move |_ev: web::PopStateEvent| {
        let Some(path) = web::window().and_then(|w| w.location().pathname().ok()) else {
            return;
        };
        inbox.borrow_mut().push(NavigationRequest::history(path));
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
    closure.forget();
}
