//! Snapshot diffing: decides whether the latest scrape warrants a
//! notification.

use crate::models::{AggregateSnapshot, ProductStatus};

/// Returns true when `latest` contains a product absent from `baseline`, or
/// a product that was out of stock in `baseline` and is in stock now.
///
/// Price movements on already-known, in-stock products are deliberately
/// ignored; notifying on price volatility would flood the operator. Empty
/// product names are parsing noise and never count. Sites present in
/// `baseline` but missing from `latest` contribute nothing.
pub fn is_notable(baseline: &AggregateSnapshot, latest: &AggregateSnapshot) -> bool {
    for (site, products) in latest {
        let known = baseline.get(site);
        for (name, status) in products {
            if name.is_empty() {
                continue;
            }
            match known.and_then(|catalog| catalog.get(name)) {
                None => return true,
                Some(ProductStatus::OutOfStock) if status.is_in_stock() => return true,
                Some(_) => {}
            }
        }
    }
    false
}
