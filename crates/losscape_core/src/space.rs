//! The calibration parameter space: ordered keys with bounds.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::Bounds;

/// Ordered parameter keys plus a bounds table, supplied once and read-only
/// afterwards. Bounds may cover only a subset of the keys; the samplers look
/// up what they need and fail fast on a miss.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterSpace {
    keys: Vec<String>,
    bounds: HashMap<String, Bounds>,
}

impl ParameterSpace {
    pub fn new(
        keys: Vec<String>,
        bounds: HashMap<String, Bounds>,
    ) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for key in &keys {
            if !seen.insert(key.as_str()) {
                return Err(ConfigError::DuplicateParameter(key.clone()));
            }
        }
        for entry in bounds.values() {
            if !entry.is_valid() {
                return Err(ConfigError::InvalidBounds {
                    min: entry.min,
                    max: entry.max,
                });
            }
        }
        Ok(Self { keys, bounds })
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Position of `name` in the parameter-key ordering.
    pub fn index_of(&self, name: &str) -> Result<usize, ConfigError> {
        self.keys
            .iter()
            .position(|key| key == name)
            .ok_or_else(|| ConfigError::UnknownParameter(name.to_string()))
    }

    pub fn bounds(&self, name: &str) -> Result<Bounds, ConfigError> {
        self.bounds
            .get(name)
            .copied()
            .ok_or_else(|| ConfigError::UnknownParameter(name.to_string()))
    }

    /// All unordered key pairs, in key order.
    pub fn all_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (i, first) in self.keys.iter().enumerate() {
            for second in &self.keys[i + 1..] {
                pairs.push((first.clone(), second.clone()));
            }
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::ParameterSpace;
    use crate::error::ConfigError;
    use crate::types::Bounds;
    use std::collections::HashMap;

    fn leg_keys() -> Vec<String> {
        ["a_x", "a_y", "b", "c"].map(str::to_string).to_vec()
    }

    #[test]
    fn index_of_follows_key_order() {
        let space = ParameterSpace::new(leg_keys(), HashMap::new()).expect("space should build");
        assert_eq!(space.index_of("a_x").expect("known key"), 0);
        assert_eq!(space.index_of("c").expect("known key"), 3);
    }

    #[test]
    fn unknown_key_is_reported_by_name() {
        let space = ParameterSpace::new(leg_keys(), HashMap::new()).expect("space should build");
        let err = space.index_of("d").expect_err("unknown key should fail");
        assert_eq!(err, ConfigError::UnknownParameter("d".to_string()));
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let keys = ["a_x", "b", "a_x"].map(str::to_string).to_vec();
        let err = ParameterSpace::new(keys, HashMap::new()).expect_err("duplicate should fail");
        assert_eq!(err, ConfigError::DuplicateParameter("a_x".to_string()));
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let bounds = HashMap::from([("b".to_string(), Bounds::new(1.0, -1.0))]);
        let err = ParameterSpace::new(leg_keys(), bounds).expect_err("inverted bounds");
        assert!(matches!(err, ConfigError::InvalidBounds { .. }));
    }

    #[test]
    fn missing_bounds_entry_is_a_lookup_error() {
        let bounds = HashMap::from([("b".to_string(), Bounds::new(0.5, 1.5))]);
        let space = ParameterSpace::new(leg_keys(), bounds).expect("space should build");
        assert_eq!(space.bounds("b").expect("bounded key"), Bounds::new(0.5, 1.5));
        assert!(space.bounds("c").is_err(), "unbounded key should fail lookup");
    }

    #[test]
    fn all_pairs_enumerates_unordered_combinations_in_order() {
        let space = ParameterSpace::new(leg_keys(), HashMap::new()).expect("space should build");
        let pairs = space.all_pairs();
        assert_eq!(pairs.len(), 6);
        assert_eq!(pairs[0], ("a_x".to_string(), "a_y".to_string()));
        assert_eq!(pairs[5], ("b".to_string(), "c".to_string()));
    }
}
