//! GlobalSymbolRegistry - exported names across feature sets.
//!
//! Maps each published external name to the feature set that owns it. The
//! registry is an ordinary value scoped to one compilation run: the analyzer
//! builds it incrementally and the verification pass consults it.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use aro_core::RegistrationError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalSymbolRegistry {
    owners: IndexMap<String, String, FxBuildHasher>,
}

impl GlobalSymbolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `name` as published by `owner`.
    ///
    /// Re-registering from the same owner is a no-op. A different owner is
    /// rejected and the first owner kept.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        owner: impl Into<String>,
    ) -> Result<(), RegistrationError> {
        let name = name.into();
        let owner = owner.into();
        if let Some(existing) = self.owners.get(&name) {
            if *existing == owner {
                return Ok(());
            }
            return Err(RegistrationError::DuplicatePublish {
                name,
                owner,
                existing_owner: existing.clone(),
            });
        }
        self.owners.insert(name, owner);
        Ok(())
    }

    /// The feature set that publishes `name`.
    pub fn owner(&self, name: &str) -> Option<&str> {
        self.owners.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.owners.contains_key(name)
    }

    /// `(name, owner)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.owners.iter().map(|(n, o)| (n.as_str(), o.as_str()))
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_lookup() {
        let mut registry = GlobalSymbolRegistry::new();
        assert!(registry.is_empty());
        registry.register("user", "Get User").unwrap();
        registry.register("order", "Place Order").unwrap();

        assert_eq!(registry.owner("user"), Some("Get User"));
        assert!(registry.contains("order"));
        assert_eq!(registry.owner("missing"), None);
        assert_eq!(
            registry.iter().collect::<Vec<_>>(),
            vec![("user", "Get User"), ("order", "Place Order")]
        );
    }

    #[test]
    fn same_owner_is_idempotent() {
        let mut registry = GlobalSymbolRegistry::new();
        registry.register("user", "A").unwrap();
        assert!(registry.register("user", "A").is_ok());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn duplicate_keeps_first_owner() {
        let mut registry = GlobalSymbolRegistry::new();
        registry.register("user", "A").unwrap();
        let err = registry.register("user", "B").unwrap_err();
        assert_eq!(
            err,
            RegistrationError::DuplicatePublish {
                name: "user".into(),
                owner: "B".into(),
                existing_owner: "A".into(),
            }
        );
        assert_eq!(registry.owner("user"), Some("A"));
    }
}
