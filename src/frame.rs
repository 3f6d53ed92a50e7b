use crate::constants::MAX_FRAME_DT;
use crate::document::WebDocument;
use crate::fetch;
use crate::links::NavInbox;
use crate::render::GpuRenderer;
use gallery_core::{App, FetchRequest};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub type WebApp = App<GpuRenderer, WebDocument>;
pub type SharedApp = Rc<RefCell<WebApp>>;

pub struct FrameContext {
    pub app: SharedApp,
    pub inbox: NavInbox,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_instant).as_secs_f32().min(MAX_FRAME_DT);
        self.last_instant = now;

        // Listeners only queue intents; navigation starts here, between frames
        let requests: Vec<_> = self.inbox.borrow_mut().drain(..).collect();
        let fetch = {
            let mut app = self.app.borrow_mut();
            for request in requests {
                app.navigate(request);
            }
            app.frame(dt);
            app.take_fetch()
        };
        if let Some(request) = fetch {
            spawn_fetch(self.app.clone(), request);
        }
    }
}

/// Run the fetch off the frame loop and feed its result back by ticket.
fn spawn_fetch(app: SharedApp, request: FetchRequest) {
    spawn_local(async move {
        let result = fetch::fetch_html(&request.url).await;
        if let Err(e) = app.borrow_mut().on_fetch_complete(request.ticket, result) {
            log::warn!("[nav] transition to {} aborted: {}", request.url, e);
        }
    });
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
