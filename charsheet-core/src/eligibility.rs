//! Class eligibility.
//!
//! Eligibility is derived from the current attribute scores on every query and
//! is never stored on the character.

use crate::catalog::{ClassDefinition, RulesCatalog};
use crate::character::{AttributeSet, Character};
use std::collections::BTreeSet;

impl ClassDefinition {
    /// Whether every minimum score this class requires is met.
    pub fn is_eligible(&self, attributes: &AttributeSet) -> bool {
        self.requirements
            .iter()
            .all(|(&attribute, &minimum)| attributes.get(attribute) >= minimum)
    }
}

/// Names of the classes a character currently qualifies for.
pub fn eligible_classes<'a>(character: &Character, catalog: &'a RulesCatalog) -> BTreeSet<&'a str> {
    catalog
        .classes()
        .iter()
        .filter(|class| class.is_eligible(&character.attributes))
        .map(|class| class.name.as_str())
        .collect()
}
