//! Picks and their attributes.
//!
//! A pick is one selectable subject in the game. Depending on the dataset
//! it carries either discrete facts ("WON THE NOBEL PRIZE") or named
//! numeric properties ("height" -> 182.0). The two shapes never mix
//! within one pool.

use serde::{Deserialize, Serialize};

/// A discrete fact attached to a pick.
///
/// Facts compare by exact description equality. The optional quantity
/// makes facts comparable across picks ("ATE 10 HOTDOGS" beats
/// "ATE 5 HOTDOGS"); a held fact without a quantity counts as 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    /// The fact text, e.g. "WON THE NOBEL PRIZE".
    pub description: String,
    /// Category/topic hint, e.g. "POLITICS".
    pub category: String,
    /// Optional quantity for comparison between holders.
    pub quantity: Option<f64>,
    /// Optional illustration URL.
    pub image: Option<String>,
}

impl Fact {
    /// Create a fact with no quantity or image.
    pub fn new(description: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            category: category.into(),
            quantity: None,
            image: None,
        }
    }

    /// Set the comparable quantity.
    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Set the illustration URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Required fields are non-blank.
    pub fn is_valid(&self) -> bool {
        !self.description.trim().is_empty() && !self.category.trim().is_empty()
    }

    /// Comparable magnitude of this fact (1 when no quantity is given).
    pub fn magnitude(&self) -> f64 {
        self.quantity.unwrap_or(1.0)
    }
}

/// A named numeric property of a pick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub value: f64,
    /// Optional illustration URL for this property on this pick.
    pub image: Option<String>,
}

impl Property {
    /// Create a property with no illustration.
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            image: None,
        }
    }
}

/// Attribute set of a pick. A dataset uses one variant throughout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PickAttributes {
    /// Discrete facts, compared by description equality.
    Facts(Vec<Fact>),
    /// Named numeric values, compared by magnitude.
    /// Declaration order is preserved.
    Properties(Vec<Property>),
}

/// One selectable subject in the game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pick {
    /// Stable identifier, unique within a pool.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional portrait URL.
    pub image: Option<String>,
    /// Optional flavor text.
    pub description: Option<String>,
    /// The pick's attribute set.
    pub attributes: PickAttributes,
}

impl Pick {
    /// Create a discrete-mode pick.
    pub fn with_facts(id: impl Into<String>, name: impl Into<String>, facts: Vec<Fact>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: None,
            description: None,
            attributes: PickAttributes::Facts(facts),
        }
    }

    /// Create a numeric-mode pick.
    pub fn with_properties(
        id: impl Into<String>,
        name: impl Into<String>,
        properties: Vec<Property>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: None,
            description: None,
            attributes: PickAttributes::Properties(properties),
        }
    }

    /// Set the portrait URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Set the flavor text.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether this pick carries at least one attribute.
    ///
    /// Attribute-less picks load fine and may appear as distractors, but
    /// can never be a qualifier or a comparison target.
    pub fn has_attributes(&self) -> bool {
        match &self.attributes {
            PickAttributes::Facts(facts) => !facts.is_empty(),
            PickAttributes::Properties(properties) => !properties.is_empty(),
        }
    }

    /// The pick's facts (empty slice for numeric-mode picks).
    pub fn facts(&self) -> &[Fact] {
        match &self.attributes {
            PickAttributes::Facts(facts) => facts,
            PickAttributes::Properties(_) => &[],
        }
    }

    /// The pick's properties in declaration order (empty slice for
    /// discrete-mode picks).
    pub fn properties(&self) -> &[Property] {
        match &self.attributes {
            PickAttributes::Facts(_) => &[],
            PickAttributes::Properties(properties) => properties,
        }
    }

    /// Whether this pick holds a fact with the given description.
    pub fn has_fact(&self, description: &str) -> bool {
        self.facts().iter().any(|f| f.description == description)
    }

    /// Comparable quantity of a fact on this pick.
    ///
    /// A held fact without an explicit quantity counts as 1; a fact the
    /// pick does not hold counts as 0.
    pub fn fact_quantity(&self, description: &str) -> f64 {
        self.facts()
            .iter()
            .find(|f| f.description == description)
            .map(Fact::magnitude)
            .unwrap_or(0.0)
    }

    /// Value of a named property, if this pick holds it.
    pub fn property_value(&self, name: &str) -> Option<f64> {
        self.properties()
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value)
    }

    /// Illustration URL for a named property, if configured on this pick.
    pub fn property_image(&self, name: &str) -> Option<&str> {
        self.properties()
            .iter()
            .find(|p| p.name == name)
            .and_then(|p| p.image.as_deref())
    }
}
