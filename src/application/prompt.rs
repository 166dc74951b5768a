// src/application/prompt.rs
use crate::constants::FLASHCARD_COUNT;

/// Fixed system instruction sent ahead of every user prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    pub system: String,
}

impl PromptTemplate {
    pub fn with_card_count(count: usize) -> Self {
        let system = format!(
            concat!(
                "You are a flashcard generator. Create concise and effective flashcards ",
                "from the topic or text provided by the user.\n",
                "- Put a clear, short question on the front of each card.\n",
                "- Put an accurate, short answer on the back of each card.\n",
                "- Focus each card on a single concept.\n",
                "- If given a body of text, extract its most important information.\n",
                "- Produce exactly {count} flashcards.\n\n",
                "Respond only with JSON of the form:\n",
                "{{\n",
                "  \"flashcards\": [\n",
                "    {{ \"front\": \"string\", \"back\": \"string\" }}\n",
                "  ]\n",
                "}}"
            ),
            count = count
        );

        Self { system }
    }

    /// The user message is the caller's prompt, unchanged.
    pub fn build<'a>(&'a self, prompt: &'a str) -> (&'a str, &'a str) {
        (&self.system, prompt)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::with_card_count(FLASHCARD_COUNT)
    }
}
