//! `chrome.tabs` / `chrome.windows` bindings.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Function, Reflect};
use serde::Serialize;
use tabdeck_common::{HostError, MoveIndex, TabId, Window, WindowId};
use tabdeck_view::{Callback, TabHost};
use tracing::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["chrome", "windows"], js_name = getAll)]
    fn windows_get_all(query: &JsValue, callback: &Function) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "windows"], js_name = update)]
    fn windows_update(window_id: i32, props: &JsValue, callback: &Function) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = "move")]
    fn tabs_move(tab_id: i32, props: &JsValue, callback: &Function) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = remove)]
    fn tabs_remove(tab_id: i32, callback: &Function) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = update)]
    fn tabs_update(tab_id: i32, props: &JsValue, callback: &Function) -> Result<(), JsValue>;
}

// =============================================================================
// REQUEST SHAPES
// =============================================================================

#[derive(Debug, Serialize)]
struct GetAllQuery {
    populate: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MoveProperties {
    window_id: WindowId,
    index: MoveIndex,
}

#[derive(Debug, Serialize)]
struct UpdateTabProperties {
    active: bool,
}

#[derive(Debug, Serialize)]
struct UpdateWindowProperties {
    focused: bool,
}

// =============================================================================
// HOST
// =============================================================================

/// The browser's extension API.
pub struct ChromeHost;

impl ChromeHost {
    /// `Some` when `chrome.tabs` is reachable from this page.
    pub fn detect() -> Option<Self> {
        let chrome = Reflect::get(&js_sys::global(), &JsValue::from_str("chrome")).ok()?;
        let tabs = Reflect::get(&chrome, &JsValue::from_str("tabs")).ok()?;
        (!tabs.is_undefined()).then_some(ChromeHost)
    }
}

impl TabHost for ChromeHost {
    fn get_all_windows(&self, done: Callback<Vec<Window>>) {
        let query = match to_js(&GetAllQuery { populate: true }) {
            Ok(query) => query,
            Err(e) => return done(Err(e)),
        };
        call(done, HostError::Enumerate, parse_windows, |cb| {
            windows_get_all(&query, cb)
        });
    }

    fn move_tab(&self, tab_id: TabId, window_id: WindowId, index: MoveIndex, done: Callback<()>) {
        let props = match to_js(&MoveProperties { window_id, index }) {
            Ok(props) => props,
            Err(e) => return done(Err(e)),
        };
        debug!(tab_id = %tab_id, window_id = %window_id, index = index.to_host(), "chrome.tabs.move");
        call(done, HostError::Move, ignore, |cb| tabs_move(tab_id.0, &props, cb));
    }

    fn remove_tab(&self, tab_id: TabId, done: Callback<()>) {
        debug!(tab_id = %tab_id, "chrome.tabs.remove");
        call(done, HostError::Remove, ignore, |cb| tabs_remove(tab_id.0, cb));
    }

    fn activate_tab(&self, tab_id: TabId, done: Callback<()>) {
        let props = match to_js(&UpdateTabProperties { active: true }) {
            Ok(props) => props,
            Err(e) => return done(Err(e)),
        };
        call(done, HostError::UpdateTab, ignore, |cb| {
            tabs_update(tab_id.0, &props, cb)
        });
    }

    fn focus_window(&self, window_id: WindowId, done: Callback<()>) {
        let props = match to_js(&UpdateWindowProperties { focused: true }) {
            Ok(props) => props,
            Err(e) => return done(Err(e)),
        };
        call(done, HostError::UpdateWindow, ignore, |cb| {
            windows_update(window_id.0, &props, cb)
        });
    }
}

// =============================================================================
// PLUMBING
// =============================================================================

/// Invoke an API function with a one-shot callback that reports
/// `chrome.runtime.lastError`. If the function throws, the continuation runs
/// immediately with [`HostError::Unavailable`].
fn call<T: 'static>(
    done: Callback<T>,
    wrap: fn(String) -> HostError,
    convert: fn(JsValue) -> Result<T, HostError>,
    invoke: impl FnOnce(&Function) -> Result<(), JsValue>,
) {
    let slot = Rc::new(RefCell::new(Some(done)));
    let pending = Rc::clone(&slot);

    let callback: Function = Closure::once_into_js(move |value: JsValue| {
        let result = match last_error() {
            Some(message) => Err(wrap(message)),
            None => convert(value),
        };
        let done = pending.borrow_mut().take();
        if let Some(done) = done {
            done(result);
        }
    })
    .unchecked_into();

    if let Err(thrown) = invoke(&callback) {
        let done = slot.borrow_mut().take();
        if let Some(done) = done {
            done(Err(HostError::Unavailable(js_message(&thrown))));
        }
    }
}

fn parse_windows(value: JsValue) -> Result<Vec<Window>, HostError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| HostError::Malformed(e.to_string()))
}

fn ignore(_: JsValue) -> Result<(), HostError> {
    Ok(())
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, HostError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| HostError::Malformed(e.to_string()))
}

/// `chrome.runtime.lastError.message`, if an error is pending.
fn last_error() -> Option<String> {
    let chrome = Reflect::get(&js_sys::global(), &JsValue::from_str("chrome")).ok()?;
    let runtime = Reflect::get(&chrome, &JsValue::from_str("runtime")).ok()?;
    let error = Reflect::get(&runtime, &JsValue::from_str("lastError")).ok()?;
    if error.is_undefined() || error.is_null() {
        return None;
    }
    Some(js_message(&error))
}

fn js_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            Reflect::get(value, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_properties_shape() {
        let props = MoveProperties {
            window_id: WindowId(7),
            index: MoveIndex::Append,
        };
        assert_eq!(
            serde_json::to_string(&props).unwrap(),
            r#"{"windowId":7,"index":-1}"#
        );
        let props = MoveProperties {
            window_id: WindowId(7),
            index: MoveIndex::At(2),
        };
        assert_eq!(
            serde_json::to_string(&props).unwrap(),
            r#"{"windowId":7,"index":2}"#
        );
    }

    #[test]
    fn query_and_update_shapes() {
        assert_eq!(
            serde_json::to_string(&GetAllQuery { populate: true }).unwrap(),
            r#"{"populate":true}"#
        );
        assert_eq!(
            serde_json::to_string(&UpdateTabProperties { active: true }).unwrap(),
            r#"{"active":true}"#
        );
        assert_eq!(
            serde_json::to_string(&UpdateWindowProperties { focused: true }).unwrap(),
            r#"{"focused":true}"#
        );
    }
}
