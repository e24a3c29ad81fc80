//! Question assembly.
//!
//! One attempt runs draw -> partition -> select -> assemble; any step
//! that comes up empty abandons the attempt and redraws. The loop is
//! bounded: after the attempt budget the builder fails closed with
//! `None` rather than spinning or recursing.

use crate::pick::Pick;
use crate::pool::{PickPool, PoolMode};
use crate::question::{Prompt, Question};
use crate::resolver;
use rand::seq::SliceRandom;
use rand::Rng;

/// Attempt budget before generation fails closed.
const MAX_ATTEMPTS: u32 = 100;

/// How many shared-property candidates to gather per numeric draw,
/// as a multiple of the option count.
const CANDIDATE_FACTOR: usize = 3;

/// Distractor filtering for numeric comparisons.
///
/// Production datasets disagree on whether a distractor may also beat
/// the target, so the choice is a policy rather than a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistractorPolicy {
    /// Drop distractors whose value for the chosen property beats the
    /// target's. Guarantees the correct option is unique.
    #[default]
    ExcludeGreater,
    /// Any pick sharing a property may appear as a distractor.
    AllowAny,
}

/// Builds multiple-choice questions from a pick pool.
#[derive(Debug, Clone)]
pub struct QuestionBuilder {
    options_per_question: usize,
    distractor_policy: DistractorPolicy,
}

impl QuestionBuilder {
    /// Create a builder producing `options_per_question` options per
    /// question (clamped to at least 2: one correct, one distractor).
    pub fn new(options_per_question: usize) -> Self {
        Self {
            options_per_question: options_per_question.max(2),
            distractor_policy: DistractorPolicy::default(),
        }
    }

    /// Set the numeric-mode distractor policy.
    pub fn with_distractor_policy(mut self, policy: DistractorPolicy) -> Self {
        self.distractor_policy = policy;
        self
    }

    /// Options per question this builder produces.
    pub fn options_per_question(&self) -> usize {
        self.options_per_question
    }

    /// Build the next question, retrying under the attempt budget.
    ///
    /// Returns `None` when the pool cannot produce a valid question -
    /// the caller must treat that as "insufficient data to continue",
    /// not as an error.
    pub fn build<R: Rng>(&self, pool: &PickPool, rng: &mut R) -> Option<Question> {
        for _ in 0..MAX_ATTEMPTS {
            let question = match pool.mode() {
                PoolMode::Discrete => self.try_discrete(pool, rng),
                PoolMode::Numeric => self.try_numeric(pool, rng),
            };
            if question.is_some() {
                return question;
            }
        }
        None
    }

    /// One discrete-mode attempt: draw a fact, find its holders, make
    /// the maximum-magnitude holder the correct option.
    fn try_discrete<R: Rng>(&self, pool: &PickPool, rng: &mut R) -> Option<Question> {
        let fact = pool.random_fact(rng)?.clone();

        let qualifiers = pool.picks_with_fact(&fact.description);
        if qualifiers.is_empty() {
            return None;
        }

        // A qualifier with non-maximal magnitude is never correct.
        let tied = resolver::max_magnitude_holders(&qualifiers, &fact.description);
        let correct = (*tied.choose(rng)?).clone();

        let needed = self.options_per_question - 1;
        let distractors = pool.picks_without_fact(&fact.description, needed, rng);
        if distractors.len() < needed {
            return None;
        }

        self.assemble(Prompt::Fact(fact), correct, distractors, rng)
    }

    /// One numeric-mode attempt: draw a target, find a property it
    /// shares with the pool, make a strictly-greater holder correct.
    fn try_numeric<R: Rng>(&self, pool: &PickPool, rng: &mut R) -> Option<Question> {
        let target = pool.random_pick(rng)?;
        if !target.has_attributes() {
            return None;
        }

        let candidates = pool.picks_sharing_any_property(
            target,
            CANDIDATE_FACTOR * self.options_per_question,
            rng,
        );
        if candidates.is_empty() {
            return None;
        }

        let common = resolver::common_properties(target, &candidates);
        let property = common.choose(rng)?.clone();
        let target_value = target.property_value(&property)?;

        let valid: Vec<&Pick> = candidates
            .iter()
            .copied()
            .filter(|c| {
                c.property_value(&property)
                    .map_or(false, |v| v > target_value)
            })
            .collect();
        let correct = (*valid.choose(rng)?).clone();

        // Distractors come from the full sharing set so a thin candidate
        // draw does not starve an otherwise viable pool.
        let sharers = pool.picks_sharing_any_property(target, pool.len(), rng);
        let eligible: Vec<&Pick> = sharers
            .into_iter()
            .filter(|p| p.id != correct.id)
            .filter(|p| match self.distractor_policy {
                DistractorPolicy::ExcludeGreater => p
                    .property_value(&property)
                    .map_or(true, |v| v <= target_value),
                DistractorPolicy::AllowAny => true,
            })
            .collect();

        let needed = self.options_per_question - 1;
        let distractors: Vec<&Pick> = eligible.choose_multiple(rng, needed).copied().collect();
        if distractors.len() < needed {
            return None;
        }

        let image = target
            .property_image(&property)
            .or_else(|| pool.property_image(&property))
            .map(String::from);
        let prompt = Prompt::Comparison {
            property,
            target_id: target.id.clone(),
            target_name: target.name.clone(),
            target_value,
            image,
        };

        self.assemble(prompt, correct, distractors, rng)
    }

    /// Combine correct + distractors, shuffle, and locate the correct
    /// option's shuffled index by id.
    fn assemble<R: Rng>(
        &self,
        prompt: Prompt,
        correct: Pick,
        distractors: Vec<&Pick>,
        rng: &mut R,
    ) -> Option<Question> {
        let mut options: Vec<Pick> = Vec::with_capacity(self.options_per_question);
        options.push(correct.clone());
        options.extend(distractors.into_iter().cloned());

        options.shuffle(rng);

        let correct_index = options.iter().position(|p| p.id == correct.id)?;
        Some(Question::new(prompt, options, correct_index))
    }
}
