use anyhow::Result;

use super::super::Container;

pub struct CardsController<'a> {
    container: &'a Container,
}

impl<'a> CardsController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub fn list(&self, limit: Option<usize>) -> Result<String> {
        let catalog = self.container.catalog();

        let mut output = format!(
            "Total Cards in Database: {} (from {})\n",
            catalog.len(),
            self.container.catalog_origin()
        );

        let shown = limit.unwrap_or(catalog.len());
        for (i, card) in catalog.iter().take(shown).enumerate() {
            output.push_str(&format!("\n{}. {}\n   {}\n", i + 1, card.card_name(), card.perks_summary()));
        }
        if shown < catalog.len() {
            output.push_str(&format!("\n... and {} more\n", catalog.len() - shown));
        }

        Ok(output.trim_end().to_string())
    }
}
