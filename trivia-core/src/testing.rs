//! Testing utilities.
//!
//! Deterministic fixtures for engine tests: ready-made pools in both
//! attribute modes and a score store that records every write.

use crate::pick::{Fact, Pick, Property};
use crate::pool::PickPool;
use crate::score::{ScoreStore, ScoreStoreError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Build a pool from picks, panicking on an invalid fixture.
pub fn pool_of(picks: Vec<Pick>) -> PickPool {
    PickPool::new(picks, HashMap::new()).expect("valid fixture dataset")
}

/// A discrete-mode pool with enough picks for 3-option questions on
/// every fact.
pub fn sample_discrete_pool() -> PickPool {
    pool_of(vec![
        Pick::with_facts(
            "ada",
            "Ada Lovelace",
            vec![Fact::new("WROTE THE FIRST PROGRAM", "SCIENCE")],
        ),
        Pick::with_facts(
            "joey",
            "Joey Chestnut",
            vec![Fact::new("ATE THE MOST HOTDOGS", "FOOD").with_quantity(76.0)],
        ),
        Pick::with_facts(
            "kobayashi",
            "Takeru Kobayashi",
            vec![Fact::new("ATE THE MOST HOTDOGS", "FOOD").with_quantity(50.0)],
        ),
        Pick::with_facts(
            "marie",
            "Marie Curie",
            vec![Fact::new("WON TWO NOBEL PRIZES", "SCIENCE")],
        ),
        Pick::with_facts("unknown", "Total Unknown", vec![]),
        Pick::with_facts(
            "armstrong",
            "Neil Armstrong",
            vec![Fact::new("WALKED ON THE MOON", "SPACE")],
        ),
    ])
}

/// A numeric-mode pool where every pick shares the same properties.
pub fn sample_numeric_pool() -> PickPool {
    pool_of(vec![
        Pick::with_properties(
            "everest",
            "Everest",
            vec![
                Property::new("height", 8849.0),
                Property::new("first_ascent", 1953.0),
            ],
        ),
        Pick::with_properties(
            "k2",
            "K2",
            vec![
                Property::new("height", 8611.0),
                Property::new("first_ascent", 1954.0),
            ],
        ),
        Pick::with_properties(
            "kangchenjunga",
            "Kangchenjunga",
            vec![
                Property::new("height", 8586.0),
                Property::new("first_ascent", 1955.0),
            ],
        ),
        Pick::with_properties(
            "lhotse",
            "Lhotse",
            vec![
                Property::new("height", 8516.0),
                Property::new("first_ascent", 1956.0),
            ],
        ),
        Pick::with_properties(
            "makalu",
            "Makalu",
            vec![
                Property::new("height", 8485.0),
                Property::new("first_ascent", 1955.5),
            ],
        ),
    ])
}

#[derive(Debug, Default)]
struct RecordingInner {
    best: u32,
    writes: Vec<u32>,
}

/// Score store that records every write, for assertions.
///
/// Clones share state, so tests can keep a handle after moving a clone
/// into the engine.
#[derive(Debug, Clone, Default)]
pub struct RecordingScoreStore {
    inner: Arc<Mutex<RecordingInner>>,
}

impl RecordingScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a pre-existing best streak.
    pub fn with_best(best: u32) -> Self {
        Self {
            inner: Arc::new(Mutex::new(RecordingInner {
                best,
                writes: Vec::new(),
            })),
        }
    }

    /// The current best streak.
    pub fn best(&self) -> u32 {
        self.inner.lock().expect("score store lock").best
    }

    /// Every value written, in order.
    pub fn writes(&self) -> Vec<u32> {
        self.inner.lock().expect("score store lock").writes.clone()
    }
}

impl ScoreStore for RecordingScoreStore {
    fn best_streak(&self) -> u32 {
        self.best()
    }

    fn record_best(&mut self, streak: u32) -> Result<(), ScoreStoreError> {
        let mut inner = self.inner.lock().expect("score store lock");
        inner.best = streak;
        inner.writes.push(streak);
        Ok(())
    }
}
