//! Breadcrumb path types for folder navigation.

use serde::{Deserialize, Serialize};

use drivebox_core::types::ItemId;

use super::model::Item;

/// The id of the synthetic root entry that heads every breadcrumb path.
pub const ROOT_CRUMB_ID: &str = "root";

/// The display name of the synthetic root entry.
pub const ROOT_CRUMB_NAME: &str = "My Drive";

/// Identifier of a breadcrumb entry.
///
/// Real folders carry their numeric item id; the synthetic root carries
/// the literal string `"root"`. Serialized untagged so the JSON matches
/// what navigation UIs expect: `"root"` or a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CrumbId {
    /// A real folder.
    Item(ItemId),
    /// The synthetic root.
    Synthetic(String),
}

/// One entry of a breadcrumb path, root first, target folder last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// Entry identifier.
    pub id: CrumbId,
    /// Display name.
    pub name: String,
}

impl Breadcrumb {
    /// The synthetic root entry.
    pub fn root() -> Self {
        Self {
            id: CrumbId::Synthetic(ROOT_CRUMB_ID.to_string()),
            name: ROOT_CRUMB_NAME.to_string(),
        }
    }

    /// A breadcrumb entry for a real folder.
    pub fn from_item(item: &Item) -> Self {
        Self {
            id: CrumbId::Item(item.id),
            name: item.name.clone(),
        }
    }

    /// Whether this entry is the synthetic root.
    pub fn is_root(&self) -> bool {
        matches!(&self.id, CrumbId::Synthetic(s) if s == ROOT_CRUMB_ID)
    }
}
