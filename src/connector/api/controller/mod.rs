pub mod cards_controller;
pub mod chat_controller;
pub mod recommend_controller;

pub use cards_controller::CardsController;
pub use chat_controller::ChatController;
pub use recommend_controller::{format_outcome, format_recommendations, RecommendController};
