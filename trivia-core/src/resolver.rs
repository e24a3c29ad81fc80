//! Attribute resolution between picks.
//!
//! Pure helpers the question builder uses to decide which attributes a
//! draw can ask about and which picks qualify.

use crate::pick::Pick;

/// Whether two picks share at least one property name.
pub fn shares_any_property(a: &Pick, b: &Pick) -> bool {
    a.properties()
        .iter()
        .any(|p| b.property_value(&p.name).is_some())
}

/// Property names the target holds that at least one candidate also
/// holds, in the target's declaration order.
pub fn common_properties(target: &Pick, candidates: &[&Pick]) -> Vec<String> {
    target
        .properties()
        .iter()
        .filter(|p| {
            candidates
                .iter()
                .any(|c| c.property_value(&p.name).is_some())
        })
        .map(|p| p.name.clone())
        .collect()
}

/// Qualifiers tied for the maximum magnitude of a fact.
///
/// The correct answer must hold the strict maximum (or be one of the
/// tied maximum holders), never merely any qualifier.
pub fn max_magnitude_holders<'a>(qualifiers: &[&'a Pick], description: &str) -> Vec<&'a Pick> {
    let mut best = f64::NEG_INFINITY;
    let mut tied: Vec<&Pick> = Vec::new();

    for &pick in qualifiers {
        let quantity = pick.fact_quantity(description);
        if quantity > best {
            best = quantity;
            tied.clear();
            tied.push(pick);
        } else if quantity == best {
            tied.push(pick);
        }
    }

    tied
}
