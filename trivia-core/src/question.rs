//! Questions - one immutable record per round.

use crate::pick::{Fact, Pick};
use serde::{Deserialize, Serialize};

/// What a question asks about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Prompt {
    /// "Who satisfies this fact?" (discrete mode).
    Fact(Fact),
    /// "Who has more of this property than the target?" (numeric mode).
    Comparison {
        /// Property name under comparison.
        property: String,
        /// Id of the target pick named in the prompt.
        target_id: String,
        /// Display name of the target pick.
        target_name: String,
        /// The target's value, which the correct option strictly exceeds.
        target_value: f64,
        /// Illustration for the property, if configured.
        image: Option<String>,
    },
}

impl Prompt {
    /// Render the prompt as display text.
    pub fn text(&self) -> String {
        match self {
            Prompt::Fact(fact) => fact.description.clone(),
            Prompt::Comparison {
                property,
                target_name,
                ..
            } => format!("WHO HAS MORE {} THAN {}?", property, target_name).to_uppercase(),
        }
    }

    /// Illustration URL attached to the prompt, if any.
    pub fn image(&self) -> Option<&str> {
        match self {
            Prompt::Fact(fact) => fact.image.as_deref(),
            Prompt::Comparison { image, .. } => image.as_deref(),
        }
    }
}

/// A multiple-choice question with exactly one correct option.
///
/// Immutable once built; the builder guarantees that `correct_index`
/// points at the single option satisfying the prompt's predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    prompt: Prompt,
    options: Vec<Pick>,
    correct_index: usize,
}

impl Question {
    pub(crate) fn new(prompt: Prompt, options: Vec<Pick>, correct_index: usize) -> Self {
        debug_assert!(correct_index < options.len());
        Self {
            prompt,
            options,
            correct_index,
        }
    }

    /// The prompt this question asks about.
    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    /// The shuffled answer options.
    pub fn options(&self) -> &[Pick] {
        &self.options
    }

    /// Index of the single correct option.
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    /// The correct option itself.
    pub fn correct_option(&self) -> &Pick {
        &self.options[self.correct_index]
    }

    /// Whether the given option index is the correct answer.
    pub fn check_answer(&self, index: usize) -> bool {
        index == self.correct_index
    }

    /// The prompt rendered as display text.
    pub fn prompt_text(&self) -> String {
        self.prompt.text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_question() -> Question {
        Question::new(
            Prompt::Fact(Fact::new("WON THE NOBEL PRIZE", "POLITICS")),
            vec![
                Pick::with_facts("a", "Ada", vec![]),
                Pick::with_facts("b", "Bob", vec![]),
                Pick::with_facts("c", "Cleo", vec![]),
            ],
            1,
        )
    }

    #[test]
    fn test_check_answer() {
        let question = sample_question();
        assert!(question.check_answer(1));
        assert!(!question.check_answer(0));
        assert!(!question.check_answer(2));
        // Out-of-range indices are simply wrong, never a panic
        assert!(!question.check_answer(99));
    }

    #[test]
    fn test_fact_prompt_text() {
        let question = sample_question();
        assert_eq!(question.prompt_text(), "WON THE NOBEL PRIZE");
    }

    #[test]
    fn test_comparison_prompt_text() {
        let prompt = Prompt::Comparison {
            property: "height".to_string(),
            target_id: "t".to_string(),
            target_name: "Everest".to_string(),
            target_value: 8849.0,
            image: None,
        };
        assert_eq!(prompt.text(), "WHO HAS MORE HEIGHT THAN EVEREST?");
    }

    #[test]
    fn test_correct_option() {
        let question = sample_question();
        assert_eq!(question.correct_option().id, "b");
    }
}
