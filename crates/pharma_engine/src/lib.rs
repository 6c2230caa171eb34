//! Pharma engine: remote product search and effect execution.
mod engine;
mod payload;
mod search;
mod types;

pub use engine::{EngineError, EngineHandle};
pub use payload::parse_products;
pub use search::{build_search_url, ReqwestSearchClient, SearchClient, SearchSettings};
pub use types::{EngineEvent, FailureKind, FetchError, ProductRecord, RequestId};
