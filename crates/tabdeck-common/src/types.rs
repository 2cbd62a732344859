//! Snapshot types as reported by the host's window enumeration.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::id::{TabId, WindowId};

/// Destination index the host reads as "end of the target window".
pub const APPEND_SENTINEL: i32 = -1;

/// One tab in a window snapshot. Field names follow the host's JSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub id: TabId,
    pub window_id: WindowId,
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fav_icon_url: Option<String>,
    #[serde(default)]
    pub active: bool,
}

impl Tab {
    /// Text shown for the row: the title, or the address when the title is empty.
    pub fn label(&self) -> &str {
        if self.title.is_empty() {
            &self.url
        } else {
            &self.title
        }
    }

    /// Icon address, ignoring empty strings the host sometimes reports.
    pub fn icon(&self) -> Option<&str> {
        self.fav_icon_url.as_deref().filter(|url| !url.is_empty())
    }
}

/// A window and its tabs in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub id: WindowId,
    #[serde(default)]
    pub tabs: Vec<Tab>,
}

impl Window {
    pub fn has_tabs(&self) -> bool {
        !self.tabs.is_empty()
    }

    pub fn tab_ids(&self) -> Vec<TabId> {
        self.tabs.iter().map(|t| t.id).collect()
    }
}

/// Where a moved tab should land inside its destination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveIndex {
    /// Final position of the tab after the move.
    At(u32),
    /// After the last tab.
    Append,
}

impl MoveIndex {
    /// The integer the host API expects.
    pub fn to_host(self) -> i32 {
        match self {
            MoveIndex::At(n) => i32::try_from(n).unwrap_or(APPEND_SENTINEL),
            MoveIndex::Append => APPEND_SENTINEL,
        }
    }

    /// Any negative value is treated as the sentinel.
    pub fn from_host(raw: i32) -> Self {
        u32::try_from(raw).map_or(MoveIndex::Append, MoveIndex::At)
    }
}

impl Serialize for MoveIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.to_host())
    }
}

impl<'de> Deserialize<'de> for MoveIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i32::deserialize(deserializer).map(MoveIndex::from_host)
    }
}
