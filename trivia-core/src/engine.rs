//! GameEngine - the session state machine and primary public API.
//!
//! Wraps a loaded pick pool, the question builder, and best-streak
//! persistence into a single play-through. All gameplay calls are
//! synchronous; only dataset loading awaits.

use crate::builder::{DistractorPolicy, QuestionBuilder};
use crate::loader::{DatasetError, DatasetLoader};
use crate::pool::PickPool;
use crate::question::Question;
use crate::score::{MemoryScoreStore, ScoreStore, ScoreStoreError};
use rand::Rng;
use thiserror::Error;

/// Errors from engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("No question is pending - generate one before submitting an answer")]
    NoPendingQuestion,

    #[error("Score store error: {0}")]
    Score(#[from] ScoreStoreError),
}

/// What happens to the session after a missed question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissPolicy {
    /// A miss ends the session (sudden death).
    #[default]
    EndSession,
    /// A miss is recorded and play continues.
    Continue,
}

/// Player input for the pending question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    /// The option index the player chose.
    Choice(usize),
    /// The round's timer expired before any choice was made.
    TimedOut,
}

/// Session lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    NotStarted,
    InProgress,
    GameOver,
}

/// Game configuration.
///
/// Timer fields describe the per-question limit the presentation layer
/// should enforce; the engine only tracks the shrinking value.
#[derive(Debug, Clone)]
pub struct GameOptions {
    /// Options per question (one correct, the rest distractors).
    pub options_per_question: usize,
    /// Starting per-question time limit, in seconds.
    pub initial_time: f64,
    /// Floor the time limit never drops below.
    pub min_time: f64,
    /// How much the limit shrinks after each correct answer.
    pub time_decrement: f64,
    /// Session policy for wrong answers.
    pub wrong_answer_policy: MissPolicy,
    /// Session policy for timeouts.
    pub timeout_policy: MissPolicy,
    /// Numeric-mode distractor filtering.
    pub distractor_policy: DistractorPolicy,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            options_per_question: 3,
            initial_time: 10.0,
            min_time: 3.0,
            time_decrement: 0.5,
            wrong_answer_policy: MissPolicy::default(),
            timeout_policy: MissPolicy::default(),
            distractor_policy: DistractorPolicy::default(),
        }
    }
}

impl GameOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of options per question.
    pub fn with_options_per_question(mut self, count: usize) -> Self {
        self.options_per_question = count;
        self
    }

    /// Set the timer configuration.
    pub fn with_timer(mut self, initial: f64, min: f64, decrement: f64) -> Self {
        self.initial_time = initial;
        self.min_time = min;
        self.time_decrement = decrement;
        self
    }

    /// Set the wrong-answer policy.
    pub fn with_wrong_answer_policy(mut self, policy: MissPolicy) -> Self {
        self.wrong_answer_policy = policy;
        self
    }

    /// Set the timeout policy.
    pub fn with_timeout_policy(mut self, policy: MissPolicy) -> Self {
        self.timeout_policy = policy;
        self
    }

    /// Set the numeric-mode distractor policy.
    pub fn with_distractor_policy(mut self, policy: DistractorPolicy) -> Self {
        self.distractor_policy = policy;
        self
    }
}

/// Outcome of a submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    /// Whether the chosen option was the correct one.
    pub correct: bool,
    /// Whether this round ended by timeout rather than a choice.
    pub timed_out: bool,
    /// Whether the session is over after this answer.
    pub game_over: bool,
}

/// A trivia play-through.
///
/// Owns the session state exclusively; the pick pool it reads from is
/// immutable after load. Discard and rebuild to restart.
pub struct GameEngine {
    pool: PickPool,
    builder: QuestionBuilder,
    options: GameOptions,
    score_store: Box<dyn ScoreStore>,
    phase: GamePhase,
    score: u32,
    questions_answered: u32,
    streak: u32,
    best_streak: u32,
    current_time_limit: f64,
    current_question: Option<Question>,
}

impl GameEngine {
    /// Load a dataset and build an engine over it.
    pub async fn initialize<L: DatasetLoader>(
        loader: &L,
        options: GameOptions,
    ) -> Result<Self, EngineError> {
        let pool = loader.load().await?;
        Ok(Self::with_pool(pool, options))
    }

    /// Build an engine over an already-loaded pool.
    ///
    /// Starts with an in-memory score store; inject a durable one with
    /// [`GameEngine::with_score_store`].
    pub fn with_pool(pool: PickPool, options: GameOptions) -> Self {
        let builder = QuestionBuilder::new(options.options_per_question)
            .with_distractor_policy(options.distractor_policy);

        Self {
            pool,
            builder,
            current_time_limit: options.initial_time,
            options,
            score_store: Box::new(MemoryScoreStore::new()),
            phase: GamePhase::NotStarted,
            score: 0,
            questions_answered: 0,
            streak: 0,
            best_streak: 0,
            current_question: None,
        }
    }

    /// Inject a score store, adopting its recorded best streak.
    pub fn with_score_store(mut self, store: Box<dyn ScoreStore>) -> Self {
        self.best_streak = store.best_streak();
        self.score_store = store;
        self
    }

    /// Start (or restart) a game: reset score, streak, and time limit,
    /// then generate the first question.
    ///
    /// Returns `None` when the pool cannot produce a first question.
    pub fn start_game(&mut self) -> Option<&Question> {
        self.start_game_with_rng(&mut rand::thread_rng())
    }

    /// Start with a specific RNG (useful for testing).
    pub fn start_game_with_rng<R: Rng>(&mut self, rng: &mut R) -> Option<&Question> {
        self.score = 0;
        self.questions_answered = 0;
        self.streak = 0;
        self.current_time_limit = self.options.initial_time;
        self.phase = GamePhase::InProgress;
        self.current_question = None;
        self.generate_next_question_with_rng(rng)
    }

    /// Generate the next question.
    ///
    /// Returns `None` when the attempt budget is exhausted - the pool
    /// has insufficient data to continue, which is not an error. On
    /// failure any previously pending question stays in place.
    pub fn generate_next_question(&mut self) -> Option<&Question> {
        self.generate_next_question_with_rng(&mut rand::thread_rng())
    }

    /// Generate with a specific RNG (useful for testing).
    pub fn generate_next_question_with_rng<R: Rng>(&mut self, rng: &mut R) -> Option<&Question> {
        match self.builder.build(&self.pool, rng) {
            Some(question) => {
                self.current_question = Some(question);
                self.current_question.as_ref()
            }
            None => None,
        }
    }

    /// Submit an answer for the pending question.
    ///
    /// Consumes the pending question: a second submit without a fresh
    /// generate fails with [`EngineError::NoPendingQuestion`]. That
    /// error signals caller misuse, not a data problem.
    pub fn submit_answer(&mut self, answer: Answer) -> Result<AnswerOutcome, EngineError> {
        let question = self
            .current_question
            .take()
            .ok_or(EngineError::NoPendingQuestion)?;

        self.questions_answered += 1;

        let (correct, timed_out) = match answer {
            Answer::Choice(index) => (question.check_answer(index), false),
            Answer::TimedOut => (false, true),
        };

        if correct {
            self.score += 1;
            self.streak += 1;
            self.current_time_limit =
                (self.current_time_limit - self.options.time_decrement).max(self.options.min_time);

            if self.streak > self.best_streak {
                self.best_streak = self.streak;
                self.score_store.record_best(self.best_streak)?;
            }
        } else {
            self.streak = 0;
            let policy = if timed_out {
                self.options.timeout_policy
            } else {
                self.options.wrong_answer_policy
            };
            if policy == MissPolicy::EndSession {
                self.phase = GamePhase::GameOver;
            }
        }

        Ok(AnswerOutcome {
            correct,
            timed_out,
            game_over: self.is_game_over(),
        })
    }

    /// The question awaiting an answer, if any.
    pub fn current_question(&self) -> Option<&Question> {
        self.current_question.as_ref()
    }

    /// Correct answers this session.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Questions answered this session, correct or not.
    pub fn questions_answered(&self) -> u32 {
        self.questions_answered
    }

    /// Consecutive correct answers, reset by any miss.
    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Best streak ever recorded (persisted across sessions).
    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    /// Current per-question time limit, in seconds.
    pub fn current_time_limit(&self) -> f64 {
        self.current_time_limit
    }

    /// Session lifecycle phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Whether the session has ended.
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// The pool this engine draws from.
    pub fn pool(&self) -> &PickPool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_discrete_pool, RecordingScoreStore};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn engine(options: GameOptions) -> GameEngine {
        GameEngine::with_pool(sample_discrete_pool(), options)
    }

    fn answer_correctly(engine: &mut GameEngine) -> AnswerOutcome {
        let index = engine.current_question().unwrap().correct_index();
        engine.submit_answer(Answer::Choice(index)).unwrap()
    }

    fn answer_wrong(engine: &mut GameEngine) -> AnswerOutcome {
        let question = engine.current_question().unwrap();
        let wrong = (question.correct_index() + 1) % question.options().len();
        engine.submit_answer(Answer::Choice(wrong)).unwrap()
    }

    #[test]
    fn test_start_game_resets_and_generates() {
        let mut engine = engine(GameOptions::default());
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(engine.phase(), GamePhase::NotStarted);
        assert!(engine.start_game_with_rng(&mut rng).is_some());
        assert_eq!(engine.phase(), GamePhase::InProgress);
        assert!(engine.current_question().is_some());
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.current_time_limit(), 10.0);
    }

    #[test]
    fn test_submit_without_question_is_loud() {
        let mut engine = engine(GameOptions::default());
        let result = engine.submit_answer(Answer::Choice(0));
        assert!(matches!(result, Err(EngineError::NoPendingQuestion)));
    }

    #[test]
    fn test_double_submit_fails() {
        let mut engine = engine(GameOptions::default());
        let mut rng = StdRng::seed_from_u64(1);
        engine.start_game_with_rng(&mut rng);

        answer_correctly(&mut engine);

        // The question was consumed by the first submit
        let result = engine.submit_answer(Answer::Choice(0));
        assert!(matches!(result, Err(EngineError::NoPendingQuestion)));
    }

    #[test]
    fn test_correct_answer_updates_score_and_time() {
        let mut engine = engine(GameOptions::default());
        let mut rng = StdRng::seed_from_u64(1);
        engine.start_game_with_rng(&mut rng);

        let outcome = answer_correctly(&mut engine);
        assert!(outcome.correct);
        assert!(!outcome.game_over);
        assert_eq!(engine.score(), 1);
        assert_eq!(engine.streak(), 1);
        assert_eq!(engine.current_time_limit(), 9.5);
    }

    #[test]
    fn test_time_limit_floors_at_minimum() {
        let options = GameOptions::default().with_timer(4.0, 3.0, 0.5);
        let mut engine = engine(options);
        let mut rng = StdRng::seed_from_u64(1);
        engine.start_game_with_rng(&mut rng);

        let mut previous = engine.current_time_limit();
        for _ in 0..10 {
            answer_correctly(&mut engine);
            let current = engine.current_time_limit();
            assert!(current <= previous, "time limit must never grow");
            assert!(current >= 3.0, "time limit must never drop below the floor");
            previous = current;
            engine.generate_next_question_with_rng(&mut rng).unwrap();
        }
        assert_eq!(engine.current_time_limit(), 3.0);
    }

    #[test]
    fn test_wrong_answer_ends_session_by_default() {
        let mut engine = engine(GameOptions::default());
        let mut rng = StdRng::seed_from_u64(1);
        engine.start_game_with_rng(&mut rng);

        let outcome = answer_wrong(&mut engine);
        assert!(!outcome.correct);
        assert!(outcome.game_over);
        assert!(engine.is_game_over());
        assert_eq!(engine.streak(), 0);
    }

    #[test]
    fn test_continue_policy_records_miss_without_ending() {
        let options = GameOptions::default().with_wrong_answer_policy(MissPolicy::Continue);
        let mut engine = engine(options);
        let mut rng = StdRng::seed_from_u64(1);
        engine.start_game_with_rng(&mut rng);

        let outcome = answer_wrong(&mut engine);
        assert!(!outcome.correct);
        assert!(!outcome.game_over);
        assert_eq!(engine.phase(), GamePhase::InProgress);
        assert_eq!(engine.questions_answered(), 1);
    }

    #[test]
    fn test_timeout_follows_its_own_policy() {
        let options = GameOptions::default()
            .with_wrong_answer_policy(MissPolicy::EndSession)
            .with_timeout_policy(MissPolicy::Continue);
        let mut engine = engine(options);
        let mut rng = StdRng::seed_from_u64(1);
        engine.start_game_with_rng(&mut rng);

        let outcome = engine.submit_answer(Answer::TimedOut).unwrap();
        assert!(outcome.timed_out);
        assert!(!outcome.correct);
        assert!(!outcome.game_over, "timeout policy is Continue");
        assert_eq!(engine.streak(), 0);
    }

    #[test]
    fn test_best_streak_persists_through_store() {
        let store = RecordingScoreStore::new();
        let handle = store.clone();
        let options = GameOptions::default().with_wrong_answer_policy(MissPolicy::Continue);
        let mut engine =
            GameEngine::with_pool(sample_discrete_pool(), options).with_score_store(Box::new(store));
        let mut rng = StdRng::seed_from_u64(1);
        engine.start_game_with_rng(&mut rng);

        for _ in 0..3 {
            answer_correctly(&mut engine);
            engine.generate_next_question_with_rng(&mut rng).unwrap();
        }
        answer_wrong(&mut engine);

        assert_eq!(engine.streak(), 0);
        assert_eq!(engine.best_streak(), 3);
        assert_eq!(handle.best(), 3);
        assert_eq!(handle.writes(), vec![1, 2, 3]);
    }

    #[test]
    fn test_best_streak_not_lowered_by_worse_run() {
        let store = RecordingScoreStore::with_best(10);
        let handle = store.clone();
        let mut engine = GameEngine::with_pool(sample_discrete_pool(), GameOptions::default())
            .with_score_store(Box::new(store));
        let mut rng = StdRng::seed_from_u64(1);
        engine.start_game_with_rng(&mut rng);

        answer_correctly(&mut engine);

        assert_eq!(engine.best_streak(), 10);
        assert!(handle.writes().is_empty(), "no write below the best");
    }

    #[test]
    fn test_restart_resets_session_but_keeps_best() {
        let options = GameOptions::default().with_wrong_answer_policy(MissPolicy::Continue);
        let mut engine = engine(options);
        let mut rng = StdRng::seed_from_u64(1);
        engine.start_game_with_rng(&mut rng);

        answer_correctly(&mut engine);
        engine.generate_next_question_with_rng(&mut rng).unwrap();
        answer_correctly(&mut engine);
        assert_eq!(engine.best_streak(), 2);

        engine.start_game_with_rng(&mut rng);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.streak(), 0);
        assert_eq!(engine.questions_answered(), 0);
        assert_eq!(engine.best_streak(), 2, "best streak survives restarts");
    }
}
