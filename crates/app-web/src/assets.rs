use app_core::{CatchKind, CatchVisualError};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn fetch_error(e: wasm_bindgen::JsValue) -> CatchVisualError {
    CatchVisualError::Fetch(format!("{:?}", e))
}

/// Download the model for `kind` so the scene can instance it from the HTTP
/// cache. The body is awaited in full; a truncated download counts as failure.
pub async fn fetch_catch_visual(kind: CatchKind) -> Result<(), CatchVisualError> {
    let path = kind.visual().asset_path;
    let window = web::window().ok_or_else(|| CatchVisualError::Fetch("no window".into()))?;
    let resp = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(fetch_error)?;
    let resp: web::Response = resp.dyn_into().map_err(fetch_error)?;
    if !resp.ok() {
        return Err(CatchVisualError::Status {
            path: path.to_owned(),
            status: resp.status(),
        });
    }
    let body = resp.array_buffer().map_err(fetch_error)?;
    JsFuture::from(body).await.map_err(fetch_error)?;
    log::info!("[assets] {} ready", path);
    Ok(())
}
