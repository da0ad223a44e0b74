//! Support repository backed by a string key-value store.
//!
//! Products, issues and tickets live under three independent keys as JSON,
//! in the same layout the browser edition kept in `localStorage`.

use serde::Serialize;
use serde::de::DeserializeOwned;
use supportbot_core::catalog::{IssueCatalog, ProductCatalog, SupportData};
use supportbot_core::repository::{LoadOutcome, SupportRepository};
use supportbot_core::ticket::SupportTicket;
use supportbot_core::{Result, SupportError};

use crate::storage::KeyValueStore;

pub const PRODUCTS_KEY: &str = "chatbot_products";
pub const ISSUES_KEY: &str = "chatbot_issues";
pub const TICKETS_KEY: &str = "chatbot_tickets";

/// A [`SupportRepository`] over any [`KeyValueStore`].
///
/// # Loading
///
/// A missing or blank record yields its empty default. If any record cannot
/// be read or parsed, all three collections start empty and the cause is
/// reported in the [`LoadOutcome`].
pub struct KeyValueSupportRepository<S> {
    store: S,
}

impl<S: KeyValueStore> KeyValueSupportRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn read_record<T>(&self, key: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let raw = self.store.get(key)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(T::default()),
            Some(raw) => serde_json::from_str(raw).map_err(|e| {
                SupportError::serialization("JSON", format!("record '{}': {}", key, e))
            }),
        }
    }

    fn read_all(&self) -> Result<SupportData> {
        let products: ProductCatalog = self.read_record(PRODUCTS_KEY)?;
        let issues: IssueCatalog = self.read_record(ISSUES_KEY)?;
        let tickets: Vec<SupportTicket> = self.read_record(TICKETS_KEY)?;
        Ok(SupportData {
            products,
            issues,
            tickets,
        })
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

impl<S: KeyValueStore> SupportRepository for KeyValueSupportRepository<S> {
    fn load(&self) -> LoadOutcome {
        match self.read_all() {
            Ok(mut data) => {
                data.normalize();
                tracing::debug!(
                    "[Store] Loaded {} product(s), {} issue list(s), {} ticket(s)",
                    data.products.len(),
                    data.issues.len(),
                    data.tickets.len()
                );
                LoadOutcome::loaded(data)
            }
            Err(e) => {
                tracing::warn!("[Store] Error loading data, resetting to empty: {}", e);
                LoadOutcome::recovered(e)
            }
        }
    }

    fn save(&self, data: &SupportData) -> Result<()> {
        // Serialize everything before touching the store.
        let products = to_json(&data.products)?;
        let issues = to_json(&data.issues)?;
        let tickets = to_json(&data.tickets)?;

        self.store.set(PRODUCTS_KEY, &products)?;
        self.store.set(ISSUES_KEY, &issues)?;
        self.store.set(TICKETS_KEY, &tickets)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        for key in [PRODUCTS_KEY, ISSUES_KEY, TICKETS_KEY] {
            self.store.remove(key)?;
        }
        tracing::info!("[Store] Cleared all records");
        Ok(())
    }
}
