//! Storage entity traits and types

use std::borrow::Cow;
use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};

/// Trait for types that can be used as storage keys
pub trait StorageKey: Clone + Debug + Send + Sync + Eq + std::hash::Hash {
    /// Returns the key in the string form used by every storage backend
    fn as_key(&self) -> Cow<'_, str>;
}

/// Trait for types that can be stored
pub trait StorageEntity: Clone + Debug + Send + Sync + Serialize + DeserializeOwned {
    /// The key type for this entity
    type Key: StorageKey;

    /// Returns the entity's key
    fn key(&self) -> &Self::Key;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
    struct NumericKey(u64);

    impl StorageKey for NumericKey {
        fn as_key(&self) -> Cow<'_, str> {
            Cow::Owned(self.0.to_string())
        }
    }

    #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
    struct TestEntity {
        id: NumericKey,
        name: String,
    }

    impl StorageEntity for TestEntity {
        type Key = NumericKey;

        fn key(&self) -> &Self::Key {
            &self.id
        }
    }

    #[test]
    fn test_numeric_key_as_key() {
        let key = NumericKey(42);
        assert_eq!(key.as_key(), "42");
    }

    #[test]
    fn test_storage_entity_key() {
        let entity = TestEntity {
            id: NumericKey(7),
            name: "Test".to_string(),
        };
        assert_eq!(entity.key().as_key(), "7");
    }
}
