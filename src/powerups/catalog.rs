//! The full set of available power-up definitions.

use std::collections::HashMap;

use super::definition::{PowerUpDefinition, PowerUpId};
use super::error::ConfigurationError;

/// Power-up definitions in configuration order, indexed by id.
#[derive(Debug, Clone, Default)]
pub struct PowerUpCatalog {
    definitions: Vec<PowerUpDefinition>,
    index: HashMap<PowerUpId, usize>,
}

impl PowerUpCatalog {
    /// Build a catalog, rejecting duplicate identities.
    pub fn from_definitions<I>(definitions: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = PowerUpDefinition>,
    {
        let mut catalog = Self::default();

        for definition in definitions {
            if catalog.index.contains_key(&definition.id) {
                return Err(ConfigurationError::DuplicateDefinition(definition.id));
            }
            catalog
                .index
                .insert(definition.id.clone(), catalog.definitions.len());
            catalog.definitions.push(definition);
        }

        Ok(catalog)
    }

    /// All definitions, in insertion order.
    pub fn all(&self) -> &[PowerUpDefinition] {
        &self.definitions
    }

    pub fn get(&self, id: &PowerUpId) -> Option<&PowerUpDefinition> {
        self.index.get(id).map(|&i| &self.definitions[i])
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::powerups::{PowerUpEffect, Rarity};

    fn def(id: &str) -> PowerUpDefinition {
        PowerUpDefinition::new(id, Rarity::Common, PowerUpEffect::MaxHealth { amount: 10.0 })
    }

    #[test]
    fn keeps_insertion_order() {
        let catalog = PowerUpCatalog::from_definitions([def("c"), def("a"), def("b")]).unwrap();
        let ids: Vec<&str> = catalog.all().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn looks_up_by_id() {
        let catalog = PowerUpCatalog::from_definitions([def("a"), def("b")]).unwrap();
        assert_eq!(catalog.get(&"b".into()).map(|d| d.id.as_str()), Some("b"));
        assert!(catalog.get(&"missing".into()).is_none());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result = PowerUpCatalog::from_definitions([def("a"), def("b"), def("a")]);
        assert_eq!(
            result.err(),
            Some(ConfigurationError::DuplicateDefinition("a".into()))
        );
    }

    #[test]
    fn empty_catalog_is_valid() {
        let catalog = PowerUpCatalog::from_definitions(Vec::new()).unwrap();
        assert!(catalog.is_empty());
    }
}
