//! Repository trait for the durable support store.

use crate::catalog::SupportData;
use crate::error::{Result, SupportError};

/// Result of reading the durable store at startup.
///
/// Loading never fails outright: a corrupt or unreadable record resets all
/// collections to empty and the cause is carried in `error`.
#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    pub data: SupportData,
    pub error: Option<SupportError>,
}

impl LoadOutcome {
    /// A successful load.
    pub fn loaded(data: SupportData) -> Self {
        Self { data, error: None }
    }

    /// A failed load, falling back to empty collections.
    pub fn recovered(error: SupportError) -> Self {
        Self {
            data: SupportData::default(),
            error: Some(error),
        }
    }
}

/// Durable backing for products, issues and tickets.
///
/// Both the admin and the customer surface hold their own in-memory copy and
/// meet only here, so every mutation must be followed by [`save`].
///
/// [`save`]: SupportRepository::save
pub trait SupportRepository: Send + Sync {
    /// Reads all three records.
    fn load(&self) -> LoadOutcome;

    /// Writes all three records.
    fn save(&self, data: &SupportData) -> Result<()>;

    /// Removes all three records.
    fn clear(&self) -> Result<()>;
}
