//! Popup driver: connects the view to a host.
//!
//! The driver drains the view's queued requests, issues each one to the host
//! with a continuation, and feeds the result back into the view. No view
//! borrow is held across a host call, so a host may answer synchronously or
//! from a later turn of the browser's event loop.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, error, warn};

use crate::gesture::Gesture;
use crate::host::{self, HostCompletion, TabHost};
use crate::surface::Surface;
use crate::view::TabListView;

pub struct Popup<S> {
    view: Rc<RefCell<TabListView<S>>>,
    host: Rc<dyn TabHost>,
}

impl<S> Clone for Popup<S> {
    fn clone(&self) -> Self {
        Self {
            view: Rc::clone(&self.view),
            host: Rc::clone(&self.host),
        }
    }
}

impl<S: Surface + 'static> Popup<S> {
    pub fn new(view: TabListView<S>, host: Rc<dyn TabHost>) -> Self {
        Self {
            view: Rc::new(RefCell::new(view)),
            host,
        }
    }

    /// Initial render.
    pub fn start(&self) {
        if let Err(e) = self.view.borrow_mut().render() {
            error!(error = %e, "failed to clear tab list");
        }
        self.pump();
    }

    /// Handle one user gesture and issue whatever host calls it queued.
    pub fn dispatch(&self, gesture: Gesture) {
        debug!(?gesture, "gesture");
        if let Err(e) = self.view.borrow_mut().handle(gesture) {
            warn!(error = %e, ?gesture, "gesture left the list partially updated");
        }
        self.pump();
    }

    /// Read-only access to the view, for inspection.
    pub fn with_view<R>(&self, f: impl FnOnce(&TabListView<S>) -> R) -> R {
        f(&self.view.borrow())
    }

    /// Issue queued requests until the view has none left.
    fn pump(&self) {
        loop {
            let requests = self.view.borrow_mut().take_requests();
            if requests.is_empty() {
                break;
            }
            for request in requests {
                debug!(?request, "host request");
                let popup = self.clone();
                host::issue(
                    &*self.host,
                    request,
                    Box::new(move |completion| popup.on_complete(completion)),
                );
            }
        }
    }

    fn on_complete(&self, completion: HostCompletion) {
        let result = self.view.borrow_mut().complete(completion);
        if let Err(e) = result {
            error!(error = %e, "failed to refresh tab list");
        }
        self.pump();
    }
}
