use std::rc::Rc;

use agentweb_core::{ChatView, ClientConfig, ClientError, SyncController};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::fetch::FetchTransport;
use crate::notify::AlertNotifier;
use crate::storage::BrowserCredentialStore;

/// JS handle over one chat session.
///
/// Async methods return Promises that resolve to `undefined` or reject with
/// the error text; failures are also shown through `alert`.
#[wasm_bindgen]
pub struct ChatSession {
    controller: SyncController,
}

#[wasm_bindgen]
impl ChatSession {
    /// Session against the build-time server URL
    #[wasm_bindgen(constructor)]
    pub fn new() -> ChatSession {
        Self::from_config(ClientConfig::default())
    }

    #[wasm_bindgen(js_name = withServer)]
    pub fn with_server(url: &str) -> ChatSession {
        Self::from_config(ClientConfig::default().with_server_url(url))
    }

    pub fn start(&self) -> js_sys::Promise {
        let controller = self.controller.clone();
        future_to_promise(async move { settle(controller.start().await) })
    }

    #[wasm_bindgen(js_name = sendMessage)]
    pub fn send_message(&self, text: String) -> js_sys::Promise {
        let controller = self.controller.clone();
        future_to_promise(async move { settle(controller.send_message(&text).await) })
    }

    pub fn clear(&self) -> js_sys::Promise {
        let controller = self.controller.clone();
        future_to_promise(async move { settle(controller.clear().await) })
    }

    pub fn reload(&self) -> js_sys::Promise {
        let controller = self.controller.clone();
        future_to_promise(async move { settle(controller.reload().await) })
    }

    /// `{status: {kind, reason?}, transcript: [{role, content}], pending}`
    pub fn view(&self) -> Result<JsValue, JsValue> {
        view_to_js(&self.controller.view())
    }

    #[wasm_bindgen(js_name = canRender)]
    pub fn can_render(&self) -> bool {
        self.controller.can_render()
    }

    /// Call `callback(view)` after every change; returns an id for `unsubscribe`
    pub fn subscribe(&self, callback: js_sys::Function) -> u32 {
        let id = self.controller.subscribe(move |view| match view_to_js(view) {
            Ok(value) => {
                if let Err(e) = callback.call1(&JsValue::NULL, &value) {
                    log::warn!("view listener threw: {:?}", e);
                }
            }
            Err(e) => log::error!("Failed to convert view: {:?}", e),
        });
        id as u32
    }

    pub fn unsubscribe(&self, id: u32) -> bool {
        self.controller.unsubscribe(id as usize)
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    fn from_config(config: ClientConfig) -> Self {
        log::info!("chat session against {}", config.server_url);
        let controller = SyncController::from_config(
            &config,
            Rc::new(BrowserCredentialStore::new(config.credential_key.clone())),
            Rc::new(FetchTransport::new(&config.server_url)),
            Rc::new(AlertNotifier),
        );
        Self { controller }
    }

    pub fn controller(&self) -> &SyncController {
        &self.controller
    }
}

fn settle(result: Result<(), ClientError>) -> Result<JsValue, JsValue> {
    result
        .map(|()| JsValue::UNDEFINED)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn view_to_js(view: &ChatView) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(view)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize view: {}", e)))?;
    js_sys::JSON::parse(&json)
}
