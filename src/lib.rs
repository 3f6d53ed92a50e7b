#![cfg(target_arch = "wasm32")]
use gallery_core::{App, CameraParams, DeviceContext, NavigationConfig};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod document;
mod dom;
mod events;
mod fetch;
mod frame;
mod links;
mod render;
mod visibility;

use constants::{CANVAS_ID, NO_WEBGPU_CLASS};
use document::WebDocument;
use links::NavInbox;
use render::GpuRenderer;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("gallery-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    // Computed once and passed down; nothing else sniffs the device
    let device = DeviceContext {
        touch_primary: window.navigator().max_touch_points() > 0,
    };
    log::info!("[input] touch primary: {}", device.touch_primary);

    let renderer = match GpuRenderer::new(canvas, document.clone()).await {
        Ok(r) => r,
        Err(e) => {
            if let Some(root) = document.document_element() {
                _ = root.class_list().add_1(NO_WEBGPU_CLASS);
            }
            return Err(e.into());
        }
    };

    let inbox: NavInbox = Rc::new(RefCell::new(Vec::new()));
    let web_document = WebDocument::new(window.clone(), document, inbox.clone());
    let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let app = App::new(
        web_document,
        renderer,
        device,
        NavigationConfig::default(),
        CameraParams::default(),
        seed,
    )?;
    let app = Rc::new(RefCell::new(app));

    events::wire_resize(&window, &app);
    events::wire_popstate(&window, &inbox);
    events::pointer::wire_input_handlers(&window, &app);
    events::keyboard::wire_global_keydown(&window, &app);
    events::keyboard::wire_context_menu(&window);

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        app,
        inbox,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
