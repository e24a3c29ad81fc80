//! Dataset loading.
//!
//! Datasets are JSON documents in one of two shapes:
//!
//! - Discrete: `{ "picks": [ { "id", "name", "facts": [...] } ] }`
//! - Numeric: `{ "picks": [ { "id", "name", "properties": {...},
//!   "propertyImages": {...} } ], "propertyCategories": {...} }`
//!
//! Loaders parse one of these into a validated [`PickPool`]. A dataset
//! without a non-empty pick collection is rejected.

use crate::pick::{Fact, Pick, PickAttributes, Property};
use crate::pool::PickPool;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;
use tokio::fs;

/// Errors from dataset loading. All are fatal to initialization.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Dataset has no picks")]
    EmptyDataset,

    #[error("Duplicate pick id: {0}")]
    DuplicateId(String),

    #[error("Dataset mixes fact picks and property picks")]
    MixedModes,

    #[error("Pick {pick_id} has a fact with a blank description or category: {description:?}")]
    InvalidFact {
        pick_id: String,
        description: String,
    },

    #[error("Pick {pick_id} has a non-numeric value for property {property}")]
    InvalidPropertyValue { pick_id: String, property: String },
}

/// A pluggable dataset backend producing a loaded pick pool.
#[async_trait]
pub trait DatasetLoader: Send + Sync {
    /// Load and validate the dataset.
    async fn load(&self) -> Result<PickPool, DatasetError>;
}

// Raw JSON shapes. Field names follow the external data contract
// (camelCase), so the internal model stays free of serde renames.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDataset {
    #[serde(default)]
    picks: Vec<RawPick>,
    #[serde(default)]
    property_categories: HashMap<String, RawCategory>,
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    #[serde(default)]
    image: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPick {
    id: String,
    name: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    facts: Option<Vec<RawFact>>,
    #[serde(default)]
    properties: Option<serde_json::Map<String, Value>>,
    #[serde(default)]
    property_images: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct RawFact {
    description: String,
    category: String,
    #[serde(default)]
    quantity: Option<f64>,
    #[serde(default)]
    image: Option<String>,
}

fn parse_dataset(raw: RawDataset) -> Result<PickPool, DatasetError> {
    let mut picks = Vec::with_capacity(raw.picks.len());

    for raw_pick in raw.picks {
        let attributes = match (raw_pick.facts, raw_pick.properties) {
            (Some(facts), _) => PickAttributes::Facts(
                facts
                    .into_iter()
                    .map(|f| Fact {
                        description: f.description,
                        category: f.category,
                        quantity: f.quantity,
                        image: f.image,
                    })
                    .collect(),
            ),
            (None, Some(properties)) => {
                let mut parsed = Vec::with_capacity(properties.len());
                // serde_json preserves declaration order here, which the
                // attribute resolver's determinism contract relies on.
                for (name, value) in properties {
                    let value = value.as_f64().filter(|v| v.is_finite()).ok_or_else(|| {
                        DatasetError::InvalidPropertyValue {
                            pick_id: raw_pick.id.clone(),
                            property: name.clone(),
                        }
                    })?;
                    let image = raw_pick.property_images.get(&name).cloned();
                    parsed.push(Property { name, value, image });
                }
                PickAttributes::Properties(parsed)
            }
            // Neither key: an attribute-less pick, legal in either mode.
            (None, None) => PickAttributes::Facts(Vec::new()),
        };

        picks.push(Pick {
            id: raw_pick.id,
            name: raw_pick.name,
            image: raw_pick.image,
            description: raw_pick.description,
            attributes,
        });
    }

    let property_images = raw
        .property_categories
        .into_iter()
        .filter_map(|(name, category)| category.image.map(|image| (name, image)))
        .collect();

    PickPool::new(picks, property_images)
}

/// Loads a dataset from an in-memory JSON document.
#[derive(Debug, Clone)]
pub struct JsonLoader {
    data: Value,
}

impl JsonLoader {
    /// Wrap an already-parsed JSON value.
    pub fn new(data: Value) -> Self {
        Self { data }
    }

    /// Parse a JSON string.
    pub fn from_str(content: &str) -> Result<Self, DatasetError> {
        Ok(Self {
            data: serde_json::from_str(content)?,
        })
    }
}

#[async_trait]
impl DatasetLoader for JsonLoader {
    async fn load(&self) -> Result<PickPool, DatasetError> {
        let raw: RawDataset = serde_json::from_value(self.data.clone())?;
        parse_dataset(raw)
    }
}

/// Loads a dataset from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileLoader {
    path: PathBuf,
}

impl JsonFileLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetLoader for JsonFileLoader {
    async fn load(&self) -> Result<PickPool, DatasetError> {
        let content = fs::read_to_string(&self.path).await?;
        let raw: RawDataset = serde_json::from_str(&content)?;
        parse_dataset(raw)
    }
}
