pub mod batch;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod scraper;
pub mod store;

pub use config::{Settings, SourceMode};
pub use error::{CatalogError, Result};
pub use model::{Category, DataType, Field, FieldDetails, Resource, ResourceDetails};
pub use pipeline::Pipeline;
