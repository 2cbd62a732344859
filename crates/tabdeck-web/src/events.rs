//! Delegated DOM listeners.
//!
//! One listener per event type sits on the container. Each event's target is
//! resolved to the nearest header, close button, or row by reading the data
//! attributes the surface wrote, then dispatched as a gesture.

use tabdeck_common::{TabId, WindowId};
use tabdeck_view::surface::{ATTR_TAB_ID, ATTR_WINDOW_ID, CLOSE_CLASS, HEADER_CLASS, ROW_CLASS};
use tabdeck_view::{gesture_for, DomEventKind, PointerTarget, Popup};
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Element, Event, Node};

use crate::dom::DomSurface;

/// Attach every listener to `container`. The closures live for the page's lifetime.
pub fn install(popup: &Popup<DomSurface>, container: &Element) -> Result<(), JsValue> {
    for kind in DomEventKind::ALL {
        let popup = popup.clone();
        let listener = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            on_event(&popup, kind, &event);
        });
        container
            .add_event_listener_with_callback(kind.event_type(), listener.as_ref().unchecked_ref())?;
        listener.forget();
    }
    debug!("listeners installed");
    Ok(())
}

fn on_event(popup: &Popup<DomSurface>, kind: DomEventKind, event: &Event) {
    if kind.accepts_drop() {
        event.prevent_default();
    }

    let target = resolve_target(event);
    if let (DomEventKind::DragStart, PointerTarget::Row(tab_id) | PointerTarget::CloseButton(tab_id)) =
        (kind, target)
    {
        set_drag_payload(event, tab_id);
    }

    if let Some(gesture) = gesture_for(kind, target) {
        popup.dispatch(gesture);
    }
}

/// Firefox will not start a drag without data on the transfer.
fn set_drag_payload(event: &Event, tab_id: TabId) {
    let Some(transfer) = event.dyn_ref::<DragEvent>().and_then(DragEvent::data_transfer) else {
        return;
    };
    if let Err(e) = transfer.set_data("text/plain", &tab_id.to_string()) {
        warn!(tab_id = %tab_id, error = ?e, "failed to set drag payload");
    }
}

fn resolve_target(event: &Event) -> PointerTarget {
    let Some(element) = target_element(event) else {
        return PointerTarget::Empty;
    };

    if let Some(header) = closest(&element, &format!(".{HEADER_CLASS}")) {
        return match attr::<WindowId>(&header, ATTR_WINDOW_ID) {
            Some(window_id) => PointerTarget::Header(window_id),
            None => PointerTarget::Empty,
        };
    }

    let Some(row) = closest(&element, &format!(".{ROW_CLASS}")) else {
        return PointerTarget::Empty;
    };
    let Some(tab_id) = attr::<TabId>(&row, ATTR_TAB_ID) else {
        return PointerTarget::Empty;
    };
    if closest(&element, &format!(".{CLOSE_CLASS}")).is_some() {
        PointerTarget::CloseButton(tab_id)
    } else {
        PointerTarget::Row(tab_id)
    }
}

/// The event's target element; text-node targets resolve to their parent.
fn target_element(event: &Event) -> Option<Element> {
    let node = event.target()?.dyn_into::<Node>().ok()?;
    match node.dyn_ref::<Element>() {
        Some(element) => Some(element.clone()),
        None => node.parent_element(),
    }
}

fn closest(element: &Element, selector: &str) -> Option<Element> {
    element.closest(selector).ok().flatten()
}

fn attr<T: std::str::FromStr>(element: &Element, name: &str) -> Option<T> {
    element.get_attribute(name)?.parse().ok()
}
