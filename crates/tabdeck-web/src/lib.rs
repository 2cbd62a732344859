//! TabDeck browser extension popup (wasm entry point).
//!
//! Wires the view to the popup's DOM and the `chrome.*` extension API. When
//! the API is missing, as when `popup.html` is opened as a plain page, a
//! bundled demo snapshot is shown instead.

mod chrome;
mod dom;
mod events;

use std::rc::Rc;

use tabdeck_common::TabDeckError;
use tabdeck_config::{LoggingConfig, PopupConfig};
use tabdeck_view::{MemoryHost, Popup, TabHost, TabListView};
use tracing::{info, warn};
use wasm_bindgen::prelude::*;

pub use chrome::ChromeHost;
pub use dom::DomSurface;

/// Windows shown when there is no extension API to ask.
const DEMO_WINDOWS: &str = include_str!("../demo_windows.json");

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let (config, config_error) = match tabdeck_config::load_bundled() {
        Ok(config) => (config, None),
        Err(e) => (PopupConfig::default(), Some(e)),
    };
    init_logging(&config.logging);
    if let Some(e) = config_error {
        warn!(error = %e, "bundled config rejected, using defaults");
    }

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("popup has no document"))?;
    let surface = DomSurface::attach(document, &config.view.container_id).map_err(to_js)?;
    let container = surface.container().clone();

    let host: Rc<dyn TabHost> = match ChromeHost::detect() {
        Some(chrome) => Rc::new(chrome),
        None => {
            warn!("extension API unavailable, showing demo windows");
            Rc::new(MemoryHost::from_json(DEMO_WINDOWS).map_err(to_js)?)
        }
    };

    let popup = Popup::new(TabListView::new(surface, &config), host);
    events::install(&popup, &container)?;
    popup.start();

    info!(container = %config.view.container_id, "popup started");
    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let layer_config = tracing_wasm::WASMLayerConfigBuilder::new()
        .set_max_level(logging.max_level())
        .build();
    tracing_wasm::set_as_global_default_with_config(layer_config);
}

fn to_js(e: impl Into<TabDeckError>) -> JsValue {
    JsValue::from_str(&e.into().to_string())
}
