//! Category records.

use serde::{Deserialize, Serialize};

use clementine_core::{CategoryId, Slug};

/// A catalog category.
///
/// Categories form a shallow tree via `parent_id`. They are created at
/// seed/admin time and read by the storefront navigation; deletion is not
/// part of normal operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Unique across all categories.
    pub slug: Slug,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Parent category, if this is a subcategory. Must reference an
    /// existing category; the store rejects unknown parents.
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
}

/// Fields for creating a [`Category`]; the store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    pub slug: Slug,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
}

impl NewCategory {
    /// Attach a freshly assigned id, producing the stored record.
    #[must_use]
    pub fn into_category(self, id: CategoryId) -> Category {
        Category {
            id,
            name: self.name,
            slug: self.slug,
            description: self.description,
            image_url: self.image_url,
            parent_id: self.parent_id,
        }
    }
}
