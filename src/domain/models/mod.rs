mod candidate_set;
mod card;
mod completion;
mod pipeline;
mod query_key;
mod recommendation;

pub use candidate_set::*;
pub use card::*;
pub use completion::*;
pub use pipeline::*;
pub use query_key::*;
pub use recommendation::*;
