//! In-memory surface for tests and headless use.

use std::collections::BTreeSet;

use tabdeck_common::{SurfaceError, TabId, WindowId};

use super::{HeaderSpec, Highlight, RowMeta, RowSpec, Surface};

/// One rendered node with its current highlights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Header {
        spec: HeaderSpec,
        highlights: BTreeSet<&'static str>,
    },
    Row {
        spec: RowSpec,
        highlights: BTreeSet<&'static str>,
    },
}

impl Node {
    fn highlights_mut(&mut self) -> &mut BTreeSet<&'static str> {
        match self {
            Node::Header { highlights, .. } | Node::Row { highlights, .. } => highlights,
        }
    }

    fn is_row(&self, tab_id: TabId) -> bool {
        matches!(self, Node::Row { spec, .. } if spec.tab_id == tab_id)
    }

    fn is_header(&self, window_id: WindowId) -> bool {
        matches!(self, Node::Header { spec, .. } if spec.window_id == window_id)
    }
}

/// What was detached, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Row(TabId),
    Header(WindowId),
}

/// A flat list of nodes standing in for the popup's container element.
#[derive(Debug, Default)]
pub struct MemorySurface {
    nodes: Vec<Node>,
    removals: Vec<Removal>,
    clears: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn headers(&self) -> Vec<&HeaderSpec> {
        self.nodes
            .iter()
            .filter_map(|n| match n {
                Node::Header { spec, .. } => Some(spec),
                Node::Row { .. } => None,
            })
            .collect()
    }

    pub fn rows(&self) -> Vec<&RowSpec> {
        self.nodes
            .iter()
            .filter_map(|n| match n {
                Node::Row { spec, .. } => Some(spec),
                Node::Header { .. } => None,
            })
            .collect()
    }

    /// Tab ids of a window's rows in display order.
    pub fn row_ids(&self, window_id: WindowId) -> Vec<TabId> {
        self.rows()
            .into_iter()
            .filter(|r| r.window_id == window_id)
            .map(|r| r.tab_id)
            .collect()
    }

    /// Compact text rendering: header labels, and rows as `  <id> <label>`.
    pub fn outline(&self) -> Vec<String> {
        self.nodes
            .iter()
            .map(|n| match n {
                Node::Header { spec, .. } => spec.label.clone(),
                Node::Row { spec, .. } => format!("  {} {}", spec.tab_id, spec.label),
            })
            .collect()
    }

    pub fn row_has(&self, tab_id: TabId, highlight: Highlight) -> bool {
        self.nodes.iter().any(|n| match n {
            Node::Row { spec, highlights } => {
                spec.tab_id == tab_id && highlights.contains(highlight.class_name())
            }
            Node::Header { .. } => false,
        })
    }

    pub fn header_has(&self, window_id: WindowId, highlight: Highlight) -> bool {
        self.nodes.iter().any(|n| match n {
            Node::Header { spec, highlights } => {
                spec.window_id == window_id && highlights.contains(highlight.class_name())
            }
            Node::Row { .. } => false,
        })
    }

    /// Number of nodes carrying a highlight.
    pub fn highlighted(&self, highlight: Highlight) -> usize {
        self.nodes
            .iter()
            .filter(|n| match n {
                Node::Header { highlights, .. } | Node::Row { highlights, .. } => {
                    highlights.contains(highlight.class_name())
                }
            })
            .count()
    }

    pub fn removals(&self) -> &[Removal] {
        &self.removals
    }

    /// How many times the surface has been cleared.
    pub fn clear_count(&self) -> usize {
        self.clears
    }

    fn toggle(
        &mut self,
        pred: impl Fn(&Node) -> bool,
        highlight: Highlight,
        on: bool,
    ) {
        for node in self.nodes.iter_mut().filter(|n| pred(n)) {
            let set = node.highlights_mut();
            if on {
                set.insert(highlight.class_name());
            } else {
                set.remove(highlight.class_name());
            }
        }
    }
}

impl Surface for MemorySurface {
    fn clear(&mut self) -> Result<(), SurfaceError> {
        self.nodes.clear();
        self.clears += 1;
        Ok(())
    }

    fn append_header(&mut self, header: &HeaderSpec) -> Result<(), SurfaceError> {
        self.nodes.push(Node::Header {
            spec: header.clone(),
            highlights: BTreeSet::new(),
        });
        Ok(())
    }

    fn append_row(&mut self, row: &RowSpec) -> Result<(), SurfaceError> {
        self.nodes.push(Node::Row {
            spec: row.clone(),
            highlights: BTreeSet::new(),
        });
        Ok(())
    }

    fn row(&self, tab_id: TabId) -> Option<RowMeta> {
        self.rows()
            .into_iter()
            .find(|r| r.tab_id == tab_id)
            .map(RowSpec::meta)
    }

    fn remove_row(&mut self, tab_id: TabId) -> Result<bool, SurfaceError> {
        let Some(pos) = self.nodes.iter().position(|n| n.is_row(tab_id)) else {
            return Ok(false);
        };
        self.nodes.remove(pos);
        self.removals.push(Removal::Row(tab_id));
        Ok(true)
    }

    fn row_count(&self, window_id: WindowId) -> usize {
        self.rows()
            .into_iter()
            .filter(|r| r.window_id == window_id)
            .count()
    }

    fn remove_header(&mut self, window_id: WindowId) -> Result<bool, SurfaceError> {
        let Some(pos) = self.nodes.iter().position(|n| n.is_header(window_id)) else {
            return Ok(false);
        };
        self.nodes.remove(pos);
        self.removals.push(Removal::Header(window_id));
        Ok(true)
    }

    fn set_row_highlight(
        &mut self,
        tab_id: TabId,
        highlight: Highlight,
        on: bool,
    ) -> Result<(), SurfaceError> {
        self.toggle(|n| n.is_row(tab_id), highlight, on);
        Ok(())
    }

    fn set_header_highlight(
        &mut self,
        window_id: WindowId,
        highlight: Highlight,
        on: bool,
    ) -> Result<(), SurfaceError> {
        self.toggle(|n| n.is_header(window_id), highlight, on);
        Ok(())
    }

    fn clear_highlight(&mut self, highlight: Highlight) -> Result<(), SurfaceError> {
        self.toggle(|_| true, highlight, false);
        Ok(())
    }
}
