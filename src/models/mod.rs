pub mod snapshot;

pub use snapshot::{AggregateSnapshot, CatalogSnapshot, ProductStatus};
