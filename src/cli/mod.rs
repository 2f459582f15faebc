use clap::{Subcommand, ValueEnum};

#[derive(Subcommand)]
pub enum Commands {
    /// Recommend cards for a single question
    Recommend {
        query: String,

        /// Number of recommendations (1-10)
        #[arg(short, long, default_value = "5")]
        num: usize,
    },

    /// Ask questions interactively, one per line
    Chat {
        /// Number of recommendations per answer (1-10)
        #[arg(short, long, default_value = "5")]
        num: usize,
    },

    /// Show the loaded card catalog
    Cards {
        /// Only list the first N cards
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

/// Which LLM backend answers recommendation prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Provider {
    Openai,
    Anthropic,
    /// Offline echo of the candidate list; no network access
    Mock,
}

/// How the catalog is narrowed before prompting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FilterStrategy {
    /// Keyword categories with leading-card fallback
    Keyword,
    /// First N cards regardless of the question
    Leading,
}
