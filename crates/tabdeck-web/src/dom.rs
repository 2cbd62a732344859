//! [`Surface`] over the popup's real DOM.

use tabdeck_common::{SurfaceError, TabId, WindowId};
use tabdeck_view::surface::{
    ACTIVE_CLASS, ATTR_INDEX, ATTR_TAB_ID, ATTR_WINDOW_ID, CLOSE_CLASS, HEADER_CLASS, ROW_CLASS,
    TITLE_CLASS,
};
use tabdeck_view::{HeaderSpec, Highlight, RowMeta, RowSpec, Surface};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element};

pub struct DomSurface {
    document: Document,
    container: Element,
}

impl DomSurface {
    /// Bind to the element with id `container_id`.
    pub fn attach(document: Document, container_id: &str) -> Result<Self, SurfaceError> {
        let container = document
            .get_element_by_id(container_id)
            .ok_or_else(|| SurfaceError::ContainerNotFound(container_id.to_string()))?;
        Ok(Self {
            document,
            container,
        })
    }

    pub fn container(&self) -> &Element {
        &self.container
    }

    fn create(&self, tag: &str) -> Result<Element, SurfaceError> {
        self.document.create_element(tag).map_err(dom_error)
    }

    fn append(&self, element: &Element) -> Result<(), SurfaceError> {
        self.container
            .append_child(element)
            .map(|_| ())
            .map_err(dom_error)
    }

    fn find(&self, selector: &str) -> Option<Element> {
        self.container.query_selector(selector).ok().flatten()
    }

    fn find_all(&self, selector: &str) -> Vec<Element> {
        let Ok(list) = self.container.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn row_element(&self, tab_id: TabId) -> Option<Element> {
        self.find(&row_selector(tab_id))
    }

    fn header_element(&self, window_id: WindowId) -> Option<Element> {
        self.find(&header_selector(window_id))
    }
}

impl Surface for DomSurface {
    fn clear(&mut self) -> Result<(), SurfaceError> {
        self.container.set_inner_html("");
        Ok(())
    }

    fn append_header(&mut self, header: &HeaderSpec) -> Result<(), SurfaceError> {
        let h4 = self.create("h4")?;
        h4.set_class_name(HEADER_CLASS);
        h4.set_text_content(Some(&header.label));
        set_attr(&h4, ATTR_WINDOW_ID, &header.window_id.to_string())?;
        self.append(&h4)
    }

    fn append_row(&mut self, row: &RowSpec) -> Result<(), SurfaceError> {
        let div = self.create("div")?;
        div.set_class_name(ROW_CLASS);
        if row.active {
            toggle_class(&div, ACTIVE_CLASS, true)?;
        }
        set_attr(&div, "draggable", "true")?;
        set_attr(&div, ATTR_TAB_ID, &row.tab_id.to_string())?;
        set_attr(&div, ATTR_WINDOW_ID, &row.window_id.to_string())?;
        set_attr(&div, ATTR_INDEX, &row.index.to_string())?;

        if let Some(url) = &row.icon_url {
            let icon = self.create("img")?;
            set_attr(&icon, "src", url)?;
            set_attr(&icon, "style", &icon_style(row.icon_size_px))?;
            div.append_child(&icon).map_err(dom_error)?;
        }

        let title = self.create("span")?;
        title.set_class_name(TITLE_CLASS);
        title.set_text_content(Some(&row.label));
        div.append_child(&title).map_err(dom_error)?;

        let close = self.create("button")?;
        close.set_class_name(CLOSE_CLASS);
        set_attr(&close, "type", "button")?;
        close.set_text_content(Some(&row.close_label));
        div.append_child(&close).map_err(dom_error)?;

        self.append(&div)
    }

    fn row(&self, tab_id: TabId) -> Option<RowMeta> {
        let row = self.row_element(tab_id)?;
        Some(RowMeta {
            tab_id,
            window_id: row.get_attribute(ATTR_WINDOW_ID)?.parse().ok()?,
            index: row.get_attribute(ATTR_INDEX)?.trim().parse().ok()?,
        })
    }

    fn remove_row(&mut self, tab_id: TabId) -> Result<bool, SurfaceError> {
        Ok(match self.row_element(tab_id) {
            Some(row) => {
                row.remove();
                true
            }
            None => false,
        })
    }

    fn row_count(&self, window_id: WindowId) -> usize {
        self.find_all(&window_rows_selector(window_id)).len()
    }

    fn remove_header(&mut self, window_id: WindowId) -> Result<bool, SurfaceError> {
        Ok(match self.header_element(window_id) {
            Some(header) => {
                header.remove();
                true
            }
            None => false,
        })
    }

    fn set_row_highlight(
        &mut self,
        tab_id: TabId,
        highlight: Highlight,
        on: bool,
    ) -> Result<(), SurfaceError> {
        match self.row_element(tab_id) {
            Some(row) => toggle_class(&row, highlight.class_name(), on),
            None => Ok(()),
        }
    }

    fn set_header_highlight(
        &mut self,
        window_id: WindowId,
        highlight: Highlight,
        on: bool,
    ) -> Result<(), SurfaceError> {
        match self.header_element(window_id) {
            Some(header) => toggle_class(&header, highlight.class_name(), on),
            None => Ok(()),
        }
    }

    fn clear_highlight(&mut self, highlight: Highlight) -> Result<(), SurfaceError> {
        let class = highlight.class_name();
        for element in self.find_all(&format!(".{class}")) {
            toggle_class(&element, class, false)?;
        }
        Ok(())
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn row_selector(tab_id: TabId) -> String {
    format!(".{ROW_CLASS}[{ATTR_TAB_ID}=\"{tab_id}\"]")
}

fn window_rows_selector(window_id: WindowId) -> String {
    format!(".{ROW_CLASS}[{ATTR_WINDOW_ID}=\"{window_id}\"]")
}

fn header_selector(window_id: WindowId) -> String {
    format!("h4.{HEADER_CLASS}[{ATTR_WINDOW_ID}=\"{window_id}\"]")
}

fn icon_style(size_px: u32) -> String {
    format!("width:{size_px}px;height:{size_px}px;margin-right:5px;vertical-align:middle")
}

fn set_attr(element: &Element, name: &str, value: &str) -> Result<(), SurfaceError> {
    element.set_attribute(name, value).map_err(dom_error)
}

fn toggle_class(element: &Element, class: &str, on: bool) -> Result<(), SurfaceError> {
    element
        .class_list()
        .toggle_with_force(class, on)
        .map(|_| ())
        .map_err(dom_error)
}

fn dom_error(e: JsValue) -> SurfaceError {
    SurfaceError::Dom(e.as_string().unwrap_or_else(|| format!("{e:?}")))
}
