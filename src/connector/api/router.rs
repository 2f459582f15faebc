use std::io;

use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{CardsController, ChatController, RecommendController};

pub struct Router<'a> {
    recommend_controller: RecommendController<'a>,
    chat_controller: ChatController<'a>,
    cards_controller: CardsController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            recommend_controller: RecommendController::new(container),
            chat_controller: ChatController::new(container),
            cards_controller: CardsController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Recommend { query, num } => {
                self.recommend_controller.recommend(query, num).await
            }
            Commands::Chat { num } => {
                let answered = self
                    .chat_controller
                    .run(io::stdin().lock(), io::stdout(), num)
                    .await?;
                Ok(format!("Answered {answered} questions. Goodbye!"))
            }
            Commands::Cards { limit } => self.cards_controller.list(limit),
        }
    }
}
