use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::debug;

use super::super::Container;
use super::recommend_controller::format_outcome;

const EXAMPLE_QUESTIONS: &[&str] = &[
    "What's the best card for travel rewards?",
    "I spend a lot on groceries, which card should I get?",
    "Best card for cash back on gas?",
    "Which card has the best sign-up bonus?",
];

/// Line-oriented chat loop: one question per line, `exit`/`quit` or EOF ends it.
///
/// Per-question failures are printed and the loop continues.
pub struct ChatController<'a> {
    container: &'a Container,
}

impl<'a> ChatController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn run<R: BufRead, W: Write>(
        &self,
        input: R,
        mut output: W,
        num: usize,
    ) -> Result<usize> {
        let use_case = self.container.recommend_use_case()?;

        writeln!(
            output,
            "Ask me anything about credit cards ({} cards loaded). Type 'exit' to quit.",
            self.container.catalog().len()
        )?;
        writeln!(output, "Example questions:")?;
        for example in EXAMPLE_QUESTIONS {
            writeln!(output, "- {example}")?;
        }

        let mut answered = 0;
        for line in input.lines() {
            let line = line?;
            let question = line.trim();
            if question.is_empty() {
                continue;
            }
            if matches!(question.to_lowercase().as_str(), "exit" | "quit") {
                break;
            }

            debug!("Chat question: {}", question);
            let outcome = use_case.respond(question, num).await;
            writeln!(output, "\n{}\n", format_outcome(&outcome))?;
            output.flush()?;
            answered += 1;
        }

        Ok(answered)
    }
}
