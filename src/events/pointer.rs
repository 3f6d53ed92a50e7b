use crate::frame::SharedApp;
use gallery_core::input::DeltaMode;
use gallery_core::{PointerInput, RawWheel};
use glam::Vec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_input_handlers(window: &web::Window, app: &SharedApp) {
    wire_pointer(window, app, "pointerdown", PointerInput::Down);
    wire_pointer(window, app, "pointermove", PointerInput::Move);
    wire_pointer(window, app, "pointerup", PointerInput::Up);
    wire_wheel(window, app);
}

fn wire_pointer(
    window: &web::Window,
    app: &SharedApp,
    event: &str,
    to_input: fn(Vec2) -> PointerInput,
) {
    let app = app.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let at = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
        app.borrow_mut().on_pointer(to_input(at));
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_wheel(window: &web::Window, app: &SharedApp) {
    let app = app.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        app.borrow_mut().on_wheel(RawWheel {
            delta_x: ev.delta_x() as f32,
            delta_y: ev.delta_y() as f32,
            mode: DeltaMode::from_dom(ev.delta_mode()),
        });
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}
