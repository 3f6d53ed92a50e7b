//! In-page link interception.

use crate::dom;
use gallery_core::{is_same_origin, NavigationRequest};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Navigation intents raised by DOM listeners, drained by the frame loop.
pub type NavInbox = Rc<RefCell<Vec<NavigationRequest>>>;

/// Click listeners on the links of the current page. Dropping the bindings
/// removes every listener.
pub struct LinkBindings {
    bound: Vec<(web::Element, Closure<dyn FnMut(web::MouseEvent)>)>,
}

impl Drop for LinkBindings {
    fn drop(&mut self) {
        for (el, closure) in self.bound.drain(..) {
            _ = el.remove_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        }
    }
}

fn is_special(href: &str) -> bool {
    href.starts_with("mailto:") || href.starts_with("tel:")
}

pub fn bind(document: &web::Document, inbox: &NavInbox) -> LinkBindings {
    let origin = web::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default();
    let mut bound = Vec::new();
    let Some(root) = document.document_element() else {
        return LinkBindings { bound };
    };

    for el in dom::query_all(&root, "a") {
        let Some(anchor) = el.dyn_ref::<web::HtmlAnchorElement>() else {
            continue;
        };
        let href = anchor.href();
        if is_same_origin(&href, &origin) {
            let inbox = inbox.clone();
            let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
                ev.prevent_default();
                inbox.borrow_mut().push(NavigationRequest::link(href.clone()));
            }) as Box<dyn FnMut(web::MouseEvent)>);
            _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            bound.push((el, closure));
        } else if !is_special(&href) {
            anchor.set_rel("noopener");
            anchor.set_target("_blank");
        }
    }
    log::debug!("[nav] bound {} links", bound.len());
    LinkBindings { bound }
}
