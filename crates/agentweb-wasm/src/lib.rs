use wasm_bindgen::prelude::*;

mod chat;
mod fetch;
mod notify;
mod storage;

pub use chat::ChatSession;
pub use fetch::FetchTransport;
pub use notify::AlertNotifier;
pub use storage::{decode_record, BrowserCredentialStore};

/// Initialize the WASM module
/// This sets up panic hooks and logging
#[wasm_bindgen(start)]
pub fn init() {
    // Set panic hook for better error messages
    console_error_panic_hook::set_once();

    wasm_logger::init(wasm_logger::Config::default());

    log::info!("agentweb WASM initialized");
}

/// Create a session and run its first load
#[wasm_bindgen]
pub async fn connect() -> Result<ChatSession, JsValue> {
    let session = ChatSession::new();
    session
        .controller()
        .start()
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(session)
}
