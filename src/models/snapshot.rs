use std::collections::HashMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Availability of a single product: a price, or the out-of-stock marker.
///
/// A tagged enum rather than a sentinel number so a price of zero can never
/// be confused with "no stock".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductStatus {
    InStock(Decimal),
    OutOfStock,
}

impl ProductStatus {
    pub fn is_in_stock(&self) -> bool {
        matches!(self, ProductStatus::InStock(_))
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductStatus::InStock(price) => write!(f, "{}", price),
            ProductStatus::OutOfStock => write!(f, "no stock"),
        }
    }
}

/// One site's catalog at a point in time: product name -> status.
///
/// Produced fresh on every fetch and never mutated in place. Product names
/// are unique within a snapshot; insertion order is irrelevant.
pub type CatalogSnapshot = HashMap<String, ProductStatus>;

/// All monitored sites at a point in time: site identifier -> catalog.
///
/// This is the unit compared between polling cycles. The set of site
/// identifiers is fixed at startup from configuration.
pub type AggregateSnapshot = HashMap<String, CatalogSnapshot>;
