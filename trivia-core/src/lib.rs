//! Trivia question generation engine.
//!
//! This crate provides:
//! - A read-only pick pool loaded from JSON datasets, in two shapes:
//!   discrete facts or named numeric properties
//! - A question builder that always produces exactly one correct option,
//!   resolves ties deterministically, and fails closed under a bounded
//!   attempt budget
//! - A session state machine tracking score, streak, and a shrinking
//!   per-question time limit
//! - Pluggable best-streak persistence
//!
//! # Quick Start
//!
//! ```ignore
//! use trivia_core::{Answer, GameEngine, GameOptions, JsonFileLoader};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let loader = JsonFileLoader::new("picks.json");
//!     let mut engine = GameEngine::initialize(&loader, GameOptions::default()).await?;
//!
//!     engine.start_game();
//!     while let Some(question) = engine.current_question() {
//!         println!("{}", question.prompt_text());
//!         // ...render options, collect the player's choice, then:
//!         let outcome = engine.submit_answer(Answer::Choice(0))?;
//!         if outcome.game_over {
//!             break;
//!         }
//!         engine.generate_next_question();
//!     }
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod engine;
pub mod loader;
pub mod pick;
pub mod pool;
pub mod question;
pub mod resolver;
pub mod score;
pub mod testing;

// Primary public API
pub use builder::{DistractorPolicy, QuestionBuilder};
pub use engine::{
    Answer, AnswerOutcome, EngineError, GameEngine, GameOptions, GamePhase, MissPolicy,
};
pub use loader::{DatasetError, DatasetLoader, JsonFileLoader, JsonLoader};
pub use pick::{Fact, Pick, PickAttributes, Property};
pub use pool::{PickPool, PoolMode};
pub use question::{Prompt, Question};
pub use score::{FileScoreStore, MemoryScoreStore, ScoreStore, ScoreStoreError};
