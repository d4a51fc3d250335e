//! Idempotent encryption-key provisioning.
//!
//! New keys get rotation enabled and an alias bound in the same call
//! sequence. Existence is checked by alias only; an existing key is left
//! untouched, whatever its rotation state or description.

use tracing::{debug, info};

use crate::core::remote::KeyManagement;
use crate::error::KeyError;

/// Whether a key exists for `key_id` (id, ARN, or alias).
///
/// A not-found response means `false`; every other failure is rethrown
/// unchanged.
pub fn key_exists(kms: &dyn KeyManagement, key_id: &str) -> Result<bool, KeyError> {
    match kms.describe_key(key_id) {
        Ok(_) => Ok(true),
        Err(KeyError::NotFound(_)) => Ok(false),
        Err(err) => Err(err),
    }
}

/// Create the encryption key behind `alias` if it does not exist.
///
/// Creation is three sequential calls: create the key, enable rotation,
/// bind the alias. They are not a transaction — an alias-bind failure after
/// creation leaves an orphan key for the operator. Two callers racing on the
/// same alias may both attempt creation; the loser's alias bind fails with
/// [`KeyError::AliasExists`], which is propagated, not swallowed.
pub fn ensure_key(kms: &dyn KeyManagement, alias: &str, description: &str) -> Result<(), KeyError> {
    if key_exists(kms, alias)? {
        debug!(alias, "encryption key present");
        return Ok(());
    }

    let metadata = kms.create_key(description)?;
    kms.enable_rotation(&metadata.key_id)?;
    kms.create_alias(alias, &metadata.key_id)?;
    info!(alias, key_id = %metadata.key_id, "created encryption key");

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::core::remote::KeyMetadata;

    /// KMS stub that records mutating calls and tracks alias bindings.
    #[derive(Default)]
    struct RecordingKms {
        aliases: RefCell<Vec<String>>,
        calls: RefCell<Vec<&'static str>>,
        describe_error: Option<fn() -> KeyError>,
    }

    impl KeyManagement for RecordingKms {
        fn describe_key(&self, key_id: &str) -> Result<KeyMetadata, KeyError> {
            if let Some(make) = self.describe_error {
                return Err(make());
            }
            if self.aliases.borrow().iter().any(|a| a == key_id) {
                Ok(KeyMetadata {
                    key_id: "key-0001".into(),
                })
            } else {
                Err(KeyError::NotFound(key_id.to_string()))
            }
        }

        fn create_key(&self, _description: &str) -> Result<KeyMetadata, KeyError> {
            self.calls.borrow_mut().push("create_key");
            Ok(KeyMetadata {
                key_id: "key-0001".into(),
            })
        }

        fn enable_rotation(&self, _key_id: &str) -> Result<(), KeyError> {
            self.calls.borrow_mut().push("enable_rotation");
            Ok(())
        }

        fn create_alias(&self, alias: &str, _key_id: &str) -> Result<(), KeyError> {
            self.calls.borrow_mut().push("create_alias");
            if self.aliases.borrow().iter().any(|a| a == alias) {
                return Err(KeyError::AliasExists(alias.to_string()));
            }
            self.aliases.borrow_mut().push(alias.to_string());
            Ok(())
        }
    }

    #[test]
    fn creates_rotates_and_aliases_a_missing_key() {
        let kms = RecordingKms::default();

        ensure_key(&kms, "alias/Development", "Development").unwrap();

        assert_eq!(
            *kms.calls.borrow(),
            vec!["create_key", "enable_rotation", "create_alias"]
        );
    }

    #[test]
    fn second_call_performs_no_mutations() {
        let kms = RecordingKms::default();

        ensure_key(&kms, "alias/Development", "Development").unwrap();
        kms.calls.borrow_mut().clear();
        ensure_key(&kms, "alias/Development", "Development").unwrap();

        assert!(kms.calls.borrow().is_empty());
    }

    #[test]
    fn existing_key_is_a_noop() {
        let kms = RecordingKms::default();
        kms.aliases.borrow_mut().push("alias/Production".into());

        ensure_key(&kms, "alias/Production", "Production").unwrap();

        assert!(kms.calls.borrow().is_empty());
    }

    #[test]
    fn lost_alias_race_propagates_the_conflict() {
        // Another caller bound the alias between our existence check and our
        // bind: describe misses, create_alias conflicts.
        let kms = RecordingKms {
            aliases: RefCell::new(vec!["alias/Development".into()]),
            calls: RefCell::new(Vec::new()),
            describe_error: Some(|| KeyError::NotFound("alias/Development".into())),
        };

        let err = ensure_key(&kms, "alias/Development", "Development").unwrap_err();

        assert!(matches!(err, KeyError::AliasExists(_)));
        assert_eq!(
            *kms.calls.borrow(),
            vec!["create_key", "enable_rotation", "create_alias"]
        );
    }

    #[test]
    fn non_notfound_describe_errors_are_rethrown() {
        let kms = RecordingKms {
            describe_error: Some(|| KeyError::Access("denied".into())),
            ..Default::default()
        };

        let err = ensure_key(&kms, "alias/Development", "Development").unwrap_err();

        assert!(matches!(err, KeyError::Access(_)));
        assert!(kms.calls.borrow().is_empty());
    }
}
