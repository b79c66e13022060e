//! Domain types representing budget categories.
//!
//! Categories form a forest: `parent_id = None` marks a root, and the
//! parent graph is acyclic by invariant.

use serde::{Deserialize, Serialize};

use crate::common::*;

/// Categorises transaction activity for budgeting and reporting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id: None,
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Returns `true` when the category has no parent.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

impl Identifiable for Category {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Displayable for Category {
    fn display_label(&self) -> String {
        match &self.parent_id {
            Some(parent) => format!("{} (under {})", self.name, parent),
            None => self.name.clone(),
        }
    }
}
