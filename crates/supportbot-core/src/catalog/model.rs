//! Catalog domain models.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::ticket::SupportTicket;

/// A product customers can ask for help with.
///
/// The key is the catalog map key. It is not part of the stored value and is
/// restored by [`SupportData::normalize`] after loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Stable identifier derived from the name at creation time.
    #[serde(skip)]
    pub key: String,
    /// Display name.
    pub name: String,
    /// Identity fields the customer must fill in, in display order.
    pub fields: Vec<String>,
}

impl Product {
    pub fn new(key: impl Into<String>, name: impl Into<String>, fields: Vec<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            fields,
        }
    }
}

/// A known issue and the steps that resolve it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue name, unique per product (case-insensitive).
    pub name: String,
    /// Ordered, non-empty solution steps.
    pub solution: Vec<String>,
}

impl Issue {
    pub fn new(name: impl Into<String>, solution: Vec<String>) -> Self {
        Self {
            name: name.into(),
            solution,
        }
    }
}

/// Products keyed by product key, in insertion order.
pub type ProductCatalog = IndexMap<String, Product>;

/// Issue lists keyed by product key.
pub type IssueCatalog = IndexMap<String, Vec<Issue>>;

/// The complete persisted state shared by the admin and customer surfaces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupportData {
    pub products: ProductCatalog,
    pub issues: IssueCatalog,
    pub tickets: Vec<SupportTicket>,
}

impl SupportData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when no product is configured.
    pub fn is_catalog_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Returns the issues configured for a product (empty if none).
    pub fn issues_for(&self, product_key: &str) -> &[Issue] {
        self.issues
            .get(product_key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Repairs data read from storage.
    ///
    /// Restores each product's key from its map key, drops issue lists whose
    /// product no longer exists and gives every product an issue list.
    pub fn normalize(&mut self) {
        for (key, product) in self.products.iter_mut() {
            product.key = key.clone();
        }

        let products = &self.products;
        let before = self.issues.len();
        self.issues.retain(|key, _| products.contains_key(key));
        let dropped = before - self.issues.len();
        if dropped > 0 {
            tracing::warn!(
                "[Catalog] Dropped {} issue list(s) without a matching product",
                dropped
            );
        }

        for key in self.products.keys() {
            if !self.issues.contains_key(key) {
                self.issues.insert(key.clone(), Vec::new());
            }
        }
    }
}

/// Derives a product key from a display name.
///
/// The name is lowercased and every character outside `[a-z0-9]` becomes `_`.
/// Leading and trailing underscores are then stripped, unless that would
/// leave nothing.
pub fn derive_product_key(name: &str) -> String {
    let replaced: String = name
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                '_'
            }
        })
        .collect();

    let stripped = replaced.trim_matches('_');
    if stripped.is_empty() {
        replaced
    } else {
        stripped.to_string()
    }
}

/// Splits comma-separated field labels, dropping blanks.
pub fn parse_field_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits solution text into one step per non-blank line.
pub fn parse_solution_steps(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|step| !step.is_empty())
        .map(str::to_string)
        .collect()
}
