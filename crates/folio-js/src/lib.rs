//! WASM bindings for the folio page enhancements.
//!
//! Load the module, then call `enhance()` once the DOM is parsed:
//!
//! ```js
//! import init, { enhance } from "./folio_js.js";
//! await init();
//! enhance({ scroll: { stickyThreshold: 120 } });
//! ```
//!
//! Every config field is optional; omitted fields keep the portfolio page
//! defaults.

use std::cell::Cell;

use folio_browser::{EnhanceConfig, FolioError};
use wasm_bindgen::prelude::*;

thread_local! {
    static ENHANCED: Cell<bool> = const { Cell::new(false) };
}

/// Initialize panic hook and console logging.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use tracing::Level;
    use tracing::subscriber::set_global_default;
    use tracing_subscriber::Registry;
    use tracing_subscriber::layer::SubscriberExt;

    let console_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let wasm_layer = tracing_wasm::WASMLayer::new(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(console_level)
            .build(),
    );

    // A host page may have installed its own subscriber already.
    let _ = set_global_default(Registry::default().with(wasm_layer));
}

/// Decode a config object. `undefined` and `null` mean all defaults.
pub fn decode_config(value: JsValue) -> Result<EnhanceConfig, FolioError> {
    if value.is_undefined() || value.is_null() {
        return Ok(EnhanceConfig::default());
    }
    let config: EnhanceConfig = serde_wasm_bindgen::from_value(value)
        .map_err(|e| FolioError::ConfigDecode(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// Enhance the current page.
///
/// Runs once per page: later calls are ignored and return `false`. Throws on
/// an invalid config.
#[wasm_bindgen]
pub fn enhance(config: JsValue) -> Result<bool, JsError> {
    if ENHANCED.with(Cell::get) {
        tracing::warn!("page already enhanced, ignoring");
        return Ok(false);
    }
    let config = decode_config(config)?;
    folio_browser::enhance(&config)?.keep_alive();
    ENHANCED.with(|enhanced| enhanced.set(true));
    Ok(true)
}

/// The default config as a plain object, usable as a template.
#[wasm_bindgen(js_name = defaultConfig)]
pub fn default_config() -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(&EnhanceConfig::default())
        .map_err(|e| JsError::new(&format!("could not encode config: {e}")))
}
