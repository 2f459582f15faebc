mod candidate_filter;
mod catalog_source;
mod chat_client;
mod response_cache;

pub use candidate_filter::*;
pub use catalog_source::*;
pub use chat_client::*;
pub use response_cache::*;
