mod build_prompt;
mod fetch_recommendations;
mod normalize_query;
mod parse_recommendations;
mod recommend_cards;

pub use build_prompt::*;
pub use fetch_recommendations::*;
pub use normalize_query::*;
pub use parse_recommendations::*;
pub use recommend_cards::*;
