mod anthropic_client;
mod csv_catalog_source;
mod in_memory_response_cache;
mod keyword_candidate_filter;
mod leading_candidate_filter;
mod mock_chat_client;
mod openai_client;

pub use anthropic_client::*;
pub use csv_catalog_source::*;
pub use in_memory_response_cache::*;
pub use keyword_candidate_filter::*;
pub use leading_candidate_filter::*;
pub use mock_chat_client::*;
pub use openai_client::*;
