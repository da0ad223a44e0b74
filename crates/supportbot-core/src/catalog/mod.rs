//! Catalog domain module.
//!
//! Products, their issues, and the admin-side manager that mutates them.
//!
//! # Module Structure
//!
//! - `model`: domain models (`Product`, `Issue`, `SupportData`) and input parsing
//! - `manager`: `CatalogManager`, the admin controller

mod manager;
mod model;

pub use manager::{
    CatalogManager, IssueAction, ProductAction, ProductSummary, ProductUpsert,
    RECENT_TICKET_LIMIT,
};
pub use model::{
    Issue, IssueCatalog, Product, ProductCatalog, SupportData, derive_product_key,
    parse_field_list, parse_solution_steps,
};
