//! Search request and response model.
//!
//! `SearchRequest` is the typed, validated form of a query; `build()`
//! turns it into the outbound payload. `SearchResponse` is the parsed
//! provider envelope with results normalized into `SearchResult`.

mod request;
mod response;

pub use request::{
    DEFAULT_NUM_RESULTS, MAX_NUM_RESULTS, OutboundCall, SearchDomain, SearchRequest, SearchType,
};
pub use response::{SearchResponse, SearchResult};
