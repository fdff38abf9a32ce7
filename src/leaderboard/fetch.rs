//! Browser `fetch` transport

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use super::{HttpRequest, HttpResponse, LeaderboardError, Transport};

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

fn js_error(value: JsValue) -> LeaderboardError {
    LeaderboardError::Network(
        value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value)),
    )
}

impl FetchTransport {
    async fn send_js(&self, request: HttpRequest) -> Result<HttpResponse, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        let init = RequestInit::new();
        init.set_method(request.method.as_str());
        if let Some(body) = &request.body {
            init.set_body(&JsValue::from_str(body));
        }

        let req = Request::new_with_str_and_init(&request.url, &init)?;
        if request.body.is_some() {
            req.headers().set("Content-Type", "application/json")?;
        }

        let resp: Response = JsFuture::from(window.fetch_with_request(&req))
            .await?
            .dyn_into()?;
        let status = resp.status();
        // A missing or unreadable body is treated as empty
        let body = match resp.text() {
            Ok(promise) => JsFuture::from(promise)
                .await
                .ok()
                .and_then(|v| v.as_string())
                .unwrap_or_default(),
            Err(_) => String::new(),
        };

        Ok(HttpResponse { status, body })
    }
}

impl Transport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, LeaderboardError> {
        log::debug!("{} {}", request.method.as_str(), request.url);
        self.send_js(request).await.map_err(js_error)
    }
}
