use gallery_core::{Error, FetchResponse};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn network_error(url: &str, e: wasm_bindgen::JsValue) -> Error {
    log::warn!("[nav] GET {} failed: {:?}", url, e);
    Error::NavigationFetchFailure {
        url: url.to_string(),
        status: None,
    }
}

/// GET `url` and read the body as text. Non-200 statuses are returned as
/// responses; only transport failures are errors.
pub async fn fetch_html(url: &str) -> Result<FetchResponse, Error> {
    let window = web::window().ok_or(Error::CapabilityMissing("window"))?;
    let value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| network_error(url, e))?;
    let response: web::Response = value.dyn_into().map_err(|e| network_error(url, e))?;
    let status = response.status();
    let text = response.text().map_err(|e| network_error(url, e))?;
    let body = JsFuture::from(text)
        .await
        .map_err(|e| network_error(url, e))?
        .as_string()
        .unwrap_or_default();
    log::debug!("[nav] GET {} -> {} ({} bytes)", url, status, body.len());
    Ok(FetchResponse { status, body })
}
