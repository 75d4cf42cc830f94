/// Default confidence score for a fresh prompt draft
pub const DEFAULT_CONFIDENCE_SCORE: u8 = 50;

/// Highest permitted confidence score
pub const MAX_CONFIDENCE_SCORE: u8 = 100;

/// The single prompt owned by a project (zero-or-one cardinality).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub id: String,
    pub name: String,
    pub description: String,
    pub confidence_score: u8,
}

/// An in-progress, unsaved edit buffer mirroring a prompt's fields.
///
/// The confidence score is kept behind a clamping setter so a draft can
/// never hold a value outside `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptDraft {
    pub name: String,
    pub description: String,
    confidence_score: u8,
}

impl Default for PromptDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            confidence_score: DEFAULT_CONFIDENCE_SCORE,
        }
    }
}

impl PromptDraft {
    /// Seed a draft from an existing prompt (entering edit mode)
    pub fn from_prompt(prompt: &Prompt) -> Self {
        Self {
            name: prompt.name.clone(),
            description: prompt.description.clone(),
            confidence_score: prompt.confidence_score.min(MAX_CONFIDENCE_SCORE),
        }
    }

    pub fn confidence_score(&self) -> u8 {
        self.confidence_score
    }

    /// Set the confidence score, clamping to the permitted range
    pub fn set_confidence_score(&mut self, score: u8) {
        self.confidence_score = score.min(MAX_CONFIDENCE_SCORE);
    }
}

/// Derived secret material for a prompt, fetched on demand and cached for
/// the lifetime of the owning detail session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub project_id: String,
    pub prompt_id: String,
    pub secret_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_default_score() {
        let draft = PromptDraft::default();
        assert_eq!(draft.confidence_score(), DEFAULT_CONFIDENCE_SCORE);
        assert!(draft.name.is_empty());
        assert!(draft.description.is_empty());
    }

    #[test]
    fn test_draft_from_prompt_copies_fields() {
        let prompt = Prompt {
            id: "p1".to_string(),
            name: "Summarizer".to_string(),
            description: "Summarize things".to_string(),
            confidence_score: 80,
        };
        let draft = PromptDraft::from_prompt(&prompt);
        assert_eq!(draft.name, "Summarizer");
        assert_eq!(draft.description, "Summarize things");
        assert_eq!(draft.confidence_score(), 80);
    }

    #[test]
    fn test_set_confidence_score_clamps() {
        let mut draft = PromptDraft::default();
        draft.set_confidence_score(250);
        assert_eq!(draft.confidence_score(), MAX_CONFIDENCE_SCORE);

        draft.set_confidence_score(0);
        assert_eq!(draft.confidence_score(), 0);
    }
}
