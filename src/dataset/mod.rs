//! Dataset boundary: CSV ingestion, schema validation, and the immutable
//! history snapshot handed to every query.

pub mod loader;
pub mod schema;
pub mod snapshot;

pub use loader::load_dataset;
pub use schema::{DatasetSchema, MetricColumn};
pub use snapshot::{Dataset, DatasetHandle};
