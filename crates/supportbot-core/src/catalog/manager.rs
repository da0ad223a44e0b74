use std::collections::HashSet;
use std::sync::Arc;

use super::model::{
    Issue, Product, SupportData, derive_product_key, parse_solution_steps,
};
use crate::confirm::{ConfirmationRequest, Confirmer, Outcome};
use crate::error::{Result, SupportError};
use crate::repository::SupportRepository;
use crate::ticket::SupportTicket;

/// Number of tickets shown in the admin overview.
pub const RECENT_TICKET_LIMIT: usize = 20;

/// What `upsert_product` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ProductAction {
    Created,
    Updated,
}

/// Result of a successful product upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductUpsert {
    pub key: String,
    pub action: ProductAction,
}

/// What `upsert_issue` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum IssueAction {
    Added,
    Replaced,
}

/// A product row for the admin overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSummary {
    pub key: String,
    pub name: String,
    pub fields: Vec<String>,
    pub issue_count: usize,
}

/// Owns the admin's in-memory copy of the catalog and ticket log.
///
/// `CatalogManager` is responsible for:
/// - Creating, editing and deleting products (with cascading issue removal)
/// - Adding, replacing and deleting issues
/// - Clearing the ticket log and resetting all data
/// - Persisting after every mutation
///
/// A failed save is returned as an error but the in-memory change is kept.
pub struct CatalogManager {
    data: SupportData,
    editing_key: Option<String>,
    repository: Arc<dyn SupportRepository>,
    load_error: Option<SupportError>,
}

impl CatalogManager {
    /// Creates a manager from the current contents of the durable store.
    pub fn new(repository: Arc<dyn SupportRepository>) -> Self {
        let outcome = repository.load();
        if let Some(err) = &outcome.error {
            tracing::warn!("[CatalogManager] Starting with empty data: {}", err);
        }
        tracing::debug!(
            "[CatalogManager] Loaded {} product(s), {} ticket(s)",
            outcome.data.products.len(),
            outcome.data.tickets.len()
        );

        Self {
            data: outcome.data,
            editing_key: None,
            repository,
            load_error: outcome.error,
        }
    }

    /// The error that forced an empty start, if any.
    pub fn load_error(&self) -> Option<&SupportError> {
        self.load_error.as_ref()
    }

    pub fn data(&self) -> &SupportData {
        &self.data
    }

    pub fn product(&self, key: &str) -> Option<&Product> {
        self.data.products.get(key)
    }

    pub fn issues_for(&self, product_key: &str) -> &[Issue] {
        self.data.issues_for(product_key)
    }

    pub fn tickets(&self) -> &[SupportTicket] {
        &self.data.tickets
    }

    /// Products in catalog order with their issue counts.
    pub fn product_summaries(&self) -> Vec<ProductSummary> {
        self.data
            .products
            .iter()
            .map(|(key, product)| ProductSummary {
                key: key.clone(),
                name: product.name.clone(),
                fields: product.fields.clone(),
                issue_count: self.data.issues_for(key).len(),
            })
            .collect()
    }

    /// The latest `limit` tickets, newest first.
    pub fn recent_tickets(&self, limit: usize) -> Vec<&SupportTicket> {
        self.data.tickets.iter().rev().take(limit).collect()
    }

    // ============================================================================
    // Edit mode
    // ============================================================================

    /// The key of the product currently being edited.
    pub fn editing_key(&self) -> Option<&str> {
        self.editing_key.as_deref()
    }

    /// Enters edit mode for a product. The next upsert updates it in place.
    pub fn begin_edit(&mut self, key: &str) -> Result<&Product> {
        let product = self
            .data
            .products
            .get(key)
            .ok_or_else(|| SupportError::not_found("product", key))?;
        self.editing_key = Some(key.to_string());
        Ok(product)
    }

    /// Leaves edit mode without changing anything.
    pub fn cancel_edit(&mut self) {
        self.editing_key = None;
    }

    // ============================================================================
    // Products
    // ============================================================================

    /// Creates a product, or updates the one in edit mode.
    ///
    /// A new product's key is derived from its name; an edited product keeps
    /// its key even if the name changes. Creating a product whose derived key
    /// already exists is rejected. Edit mode ends after a successful upsert.
    pub fn upsert_product(&mut self, name: &str, fields: &[String]) -> Result<ProductUpsert> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SupportError::validation("Please enter a product name."));
        }

        // Labels key the customer data, so repeats are dropped.
        let mut seen = HashSet::new();
        let fields: Vec<String> = fields
            .iter()
            .map(|field| field.trim())
            .filter(|field| !field.is_empty() && seen.insert(field.to_lowercase()))
            .map(str::to_string)
            .collect();
        if fields.is_empty() {
            return Err(SupportError::validation(
                "Please enter at least one customer field.",
            ));
        }

        let (key, action) = match &self.editing_key {
            Some(key) => (key.clone(), ProductAction::Updated),
            None => {
                let key = derive_product_key(name);
                if self.data.products.contains_key(&key) {
                    return Err(SupportError::DuplicateProduct {
                        name: name.to_string(),
                        key,
                    });
                }
                (key, ProductAction::Created)
            }
        };

        self.data
            .products
            .insert(key.clone(), Product::new(key.clone(), name, fields));
        self.data.issues.entry(key.clone()).or_default();
        self.editing_key = None;

        tracing::info!("[CatalogManager] Product '{}' {}", key, action);
        self.persist()?;

        Ok(ProductUpsert { key, action })
    }

    /// Deletes a product and all of its issues after confirmation.
    pub fn delete_product(
        &mut self,
        key: &str,
        confirmer: &dyn Confirmer,
    ) -> Result<Outcome<Product>> {
        let Some(product) = self.data.products.get(key) else {
            return Ok(Outcome::NoOp);
        };

        if self.editing_key.as_deref() == Some(key) {
            return Err(SupportError::ProductInEdit {
                key: key.to_string(),
            });
        }

        let request = ConfirmationRequest::DeleteProduct {
            name: product.name.clone(),
        };
        if !confirmer.confirm(&request) {
            return Ok(Outcome::Cancelled);
        }

        let removed = self.data.products.shift_remove(key);
        self.data.issues.shift_remove(key);
        tracing::info!("[CatalogManager] Deleted product '{}'", key);
        self.persist()?;

        Ok(removed.map_or(Outcome::NoOp, Outcome::Applied))
    }

    // ============================================================================
    // Issues
    // ============================================================================

    /// Adds an issue to a product, or replaces one with the same name.
    ///
    /// Names match case-insensitively. Replacing needs confirmation and moves
    /// the issue to the end of the product's list.
    pub fn upsert_issue(
        &mut self,
        product_key: &str,
        name: &str,
        solution: &str,
        confirmer: &dyn Confirmer,
    ) -> Result<Outcome<IssueAction>> {
        if product_key.trim().is_empty() {
            return Err(SupportError::validation("Please select a product first."));
        }
        if !self.data.products.contains_key(product_key) {
            return Err(SupportError::not_found("product", product_key));
        }

        let name = name.trim();
        if name.is_empty() {
            return Err(SupportError::validation("Please enter an issue name."));
        }

        let steps = parse_solution_steps(solution);
        if steps.is_empty() {
            return Err(SupportError::validation(
                "Please enter at least one solution step.",
            ));
        }

        let lowered = name.to_lowercase();
        let issues = self.data.issues.entry(product_key.to_string()).or_default();
        let exists = issues
            .iter()
            .any(|issue| issue.name.to_lowercase() == lowered);

        let action = if exists {
            let request = ConfirmationRequest::OverwriteIssue {
                name: name.to_string(),
            };
            if !confirmer.confirm(&request) {
                return Ok(Outcome::Cancelled);
            }
            issues.retain(|issue| issue.name.to_lowercase() != lowered);
            IssueAction::Replaced
        } else {
            IssueAction::Added
        };

        issues.push(Issue::new(name, steps));
        tracing::info!(
            "[CatalogManager] Issue '{}' {} for product '{}'",
            name,
            action,
            product_key
        );
        self.persist()?;

        Ok(Outcome::Applied(action))
    }

    /// Deletes the issue at `index` after confirmation.
    ///
    /// An unknown product or an out-of-range index is a no-op.
    pub fn delete_issue(
        &mut self,
        product_key: &str,
        index: usize,
        confirmer: &dyn Confirmer,
    ) -> Result<Outcome<Issue>> {
        let Some(issue) = self
            .data
            .issues
            .get(product_key)
            .and_then(|issues| issues.get(index))
        else {
            return Ok(Outcome::NoOp);
        };

        let request = ConfirmationRequest::DeleteIssue {
            name: issue.name.clone(),
        };
        if !confirmer.confirm(&request) {
            return Ok(Outcome::Cancelled);
        }

        let removed = match self.data.issues.get_mut(product_key) {
            Some(issues) => issues.remove(index),
            None => return Ok(Outcome::NoOp),
        };
        tracing::info!(
            "[CatalogManager] Deleted issue '{}' from product '{}'",
            removed.name,
            product_key
        );
        self.persist()?;

        Ok(Outcome::Applied(removed))
    }

    // ============================================================================
    // Tickets and bulk operations
    // ============================================================================

    /// Empties the ticket log after confirmation. Returns how many were removed.
    pub fn clear_tickets(&mut self, confirmer: &dyn Confirmer) -> Result<Outcome<usize>> {
        if !confirmer.confirm(&ConfirmationRequest::ClearTickets) {
            return Ok(Outcome::Cancelled);
        }

        let cleared = self.data.tickets.len();
        self.data.tickets.clear();
        tracing::info!("[CatalogManager] Cleared {} ticket(s)", cleared);
        self.persist()?;

        Ok(Outcome::Applied(cleared))
    }

    /// Deletes every product, issue and ticket after two confirmations.
    ///
    /// The durable records are removed rather than overwritten.
    pub fn reset_all(&mut self, confirmer: &dyn Confirmer) -> Result<Outcome<()>> {
        if !confirmer.confirm(&ConfirmationRequest::ResetAll) {
            return Ok(Outcome::Cancelled);
        }
        if !confirmer.confirm(&ConfirmationRequest::ResetAllFinal) {
            return Ok(Outcome::Cancelled);
        }

        self.data = SupportData::default();
        self.editing_key = None;
        tracing::warn!("[CatalogManager] All data reset");

        self.repository.clear().inspect_err(|e| {
            tracing::error!("[CatalogManager] Failed to clear storage: {}", e);
        })?;

        Ok(Outcome::Applied(()))
    }

    fn persist(&self) -> Result<()> {
        self.repository.save(&self.data).inspect_err(|e| {
            tracing::error!("[CatalogManager] Failed to save data: {}", e);
        })
    }
}
