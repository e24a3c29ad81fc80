//! The pick pool - a read-only view over loaded picks.
//!
//! Built once by a loader, then shared read-only for the lifetime of the
//! dataset. All random draws are uniform and take the caller's RNG, so
//! tests can seed them deterministically.

use crate::loader::DatasetError;
use crate::pick::{Fact, Pick, PickAttributes};
use crate::resolver;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Which attribute shape this pool carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolMode {
    /// Picks carry discrete facts.
    Discrete,
    /// Picks carry named numeric properties.
    Numeric,
}

/// A loaded, validated set of picks.
///
/// In discrete mode the pool also carries a deduplicated global fact
/// list: when a description repeats across picks, the occurrence with
/// the larger magnitude is canonical.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickPool {
    mode: PoolMode,
    picks: Vec<Pick>,
    facts: Vec<Fact>,
    property_images: HashMap<String, String>,
}

impl PickPool {
    /// Build a pool from picks, validating dataset invariants.
    ///
    /// Fails when the pick list is empty, an id repeats, attribute shapes
    /// mix, or a fact is missing its required fields.
    pub fn new(
        picks: Vec<Pick>,
        property_images: HashMap<String, String>,
    ) -> Result<Self, DatasetError> {
        if picks.is_empty() {
            return Err(DatasetError::EmptyDataset);
        }

        let mut seen_ids = HashSet::new();
        for pick in &picks {
            if !seen_ids.insert(pick.id.as_str()) {
                return Err(DatasetError::DuplicateId(pick.id.clone()));
            }
            if let PickAttributes::Facts(facts) = &pick.attributes {
                if let Some(bad) = facts.iter().find(|f| !f.is_valid()) {
                    return Err(DatasetError::InvalidFact {
                        pick_id: pick.id.clone(),
                        description: bad.description.clone(),
                    });
                }
            }
        }

        // Attribute-less picks fit either mode; the first pick that
        // actually carries attributes decides, and the rest must agree.
        let mut mode = None;
        for pick in picks.iter().filter(|p| p.has_attributes()) {
            let pick_mode = match pick.attributes {
                PickAttributes::Facts(_) => PoolMode::Discrete,
                PickAttributes::Properties(_) => PoolMode::Numeric,
            };
            match mode {
                None => mode = Some(pick_mode),
                Some(m) if m != pick_mode => return Err(DatasetError::MixedModes),
                Some(_) => {}
            }
        }
        let mode = mode.unwrap_or(PoolMode::Discrete);

        let facts = match mode {
            PoolMode::Discrete => dedup_facts(&picks),
            PoolMode::Numeric => Vec::new(),
        };

        Ok(Self {
            mode,
            picks,
            facts,
            property_images,
        })
    }

    /// Which attribute shape this pool carries.
    pub fn mode(&self) -> PoolMode {
        self.mode
    }

    /// All picks, in dataset order.
    pub fn picks(&self) -> &[Pick] {
        &self.picks
    }

    /// Number of picks in the pool.
    pub fn len(&self) -> usize {
        self.picks.len()
    }

    /// Whether the pool holds no picks.
    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    /// Look up a pick by id.
    pub fn get(&self, id: &str) -> Option<&Pick> {
        self.picks.iter().find(|p| p.id == id)
    }

    /// The deduplicated global fact list (empty in numeric mode).
    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    /// Pool-level illustration for a property name, if cataloged.
    pub fn property_image(&self, name: &str) -> Option<&str> {
        self.property_images.get(name).map(String::as_str)
    }

    /// Uniform random pick; `None` on an empty pool, never a panic.
    pub fn random_pick<R: Rng>(&self, rng: &mut R) -> Option<&Pick> {
        self.picks.choose(rng)
    }

    /// Uniform random fact from the global pool; `None` when there are
    /// no facts, never a panic.
    pub fn random_fact<R: Rng>(&self, rng: &mut R) -> Option<&Fact> {
        self.facts.choose(rng)
    }

    /// Every pick holding a fact with exactly this description.
    pub fn picks_with_fact(&self, description: &str) -> Vec<&Pick> {
        self.picks.iter().filter(|p| p.has_fact(description)).collect()
    }

    /// Uniform random subset (capped at `n`) of picks NOT holding the fact.
    pub fn picks_without_fact<R: Rng>(
        &self,
        description: &str,
        n: usize,
        rng: &mut R,
    ) -> Vec<&Pick> {
        let candidates: Vec<&Pick> = self
            .picks
            .iter()
            .filter(|p| !p.has_fact(description))
            .collect();
        candidates.choose_multiple(rng, n).copied().collect()
    }

    /// Uniform random subset (capped at `n`) of picks sharing at least one
    /// property name with `pick`, excluding `pick` itself.
    pub fn picks_sharing_any_property<R: Rng>(
        &self,
        pick: &Pick,
        n: usize,
        rng: &mut R,
    ) -> Vec<&Pick> {
        let candidates: Vec<&Pick> = self
            .picks
            .iter()
            .filter(|p| p.id != pick.id && resolver::shares_any_property(pick, p))
            .collect();
        candidates.choose_multiple(rng, n).copied().collect()
    }
}

/// Scan every pick's facts into a global list keyed by description,
/// keeping the occurrence with the larger magnitude. First-seen order
/// is preserved so seeded draws stay reproducible.
fn dedup_facts(picks: &[Pick]) -> Vec<Fact> {
    let mut facts: Vec<Fact> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for pick in picks {
        for fact in pick.facts() {
            match index.get(&fact.description) {
                None => {
                    index.insert(fact.description.clone(), facts.len());
                    facts.push(fact.clone());
                }
                Some(&i) => {
                    if fact.magnitude() > facts[i].magnitude() {
                        facts[i] = fact.clone();
                    }
                }
            }
        }
    }

    facts
}
