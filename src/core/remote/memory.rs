//! In-memory implementation of the remote collaborators.
//!
//! Backs unit and integration tests without network access, and doubles as a
//! scratch backend for local experiments. Semantics mirror the real services
//! where the core depends on them: paginated path queries, put conflicts,
//! alias conflicts, and a fake encrypt/decrypt scheme for `SecureString`
//! values (hex with a `kms:` prefix — not cryptography, just plumbing).

use std::collections::BTreeMap;
use std::sync::Mutex;

use super::{
    KeyManagement, KeyMetadata, ParameterEntry, ParameterPage, ParameterStore, ParameterType,
    PutRequest,
};
use crate::error::{KeyError, StoreError};

const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone)]
struct StoredParameter {
    value: String,
    kind: ParameterType,
}

#[derive(Debug, Default)]
struct State {
    parameters: BTreeMap<String, StoredParameter>,
    keys: BTreeMap<String, String>,
    aliases: BTreeMap<String, String>,
    rotation: Vec<String>,
    next_key: u32,
}

/// In-memory parameter store and key-management service.
#[derive(Debug)]
pub struct InMemoryRemote {
    state: Mutex<State>,
    page_size: usize,
}

impl Default for InMemoryRemote {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRemote {
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// Backend returning at most `page_size` entries per page, for
    /// exercising pagination.
    pub fn with_page_size(page_size: usize) -> Self {
        assert!(page_size > 0, "page size must be positive");
        Self {
            state: Mutex::new(State::default()),
            page_size,
        }
    }

    /// Whether rotation was enabled for `key_id`.
    pub fn rotation_enabled(&self, key_id: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .rotation
            .iter()
            .any(|k| k == key_id)
    }

    /// Number of keys ever created.
    pub fn key_count(&self) -> usize {
        self.state.lock().unwrap().keys.len()
    }

    fn encode(plaintext: &str) -> String {
        let hex: String = plaintext.bytes().map(|b| format!("{:02x}", b)).collect();
        format!("kms:{}", hex)
    }

    fn page_value(parameter: &StoredParameter) -> String {
        match parameter.kind {
            ParameterType::SecureString => Self::encode(&parameter.value),
            _ => parameter.value.clone(),
        }
    }
}

impl ParameterStore for InMemoryRemote {
    fn get_by_path(
        &self,
        path: &str,
        recursive: bool,
        next_token: Option<&str>,
    ) -> Result<ParameterPage, StoreError> {
        let state = self.state.lock().unwrap();
        let prefix = format!("{}/", path.trim_end_matches('/'));

        let matching: Vec<(&String, &StoredParameter)> = state
            .parameters
            .iter()
            .filter(|(name, _)| {
                name.strip_prefix(&prefix)
                    .map(|rest| recursive || !rest.contains('/'))
                    .unwrap_or(false)
            })
            .collect();

        let offset: usize = match next_token {
            Some(token) => token
                .parse()
                .map_err(|_| StoreError::Access(format!("bad continuation token: {token:?}")))?,
            None => 0,
        };

        let entries = matching
            .iter()
            .skip(offset)
            .take(self.page_size)
            .map(|(name, parameter)| ParameterEntry {
                name: (*name).clone(),
                value: Self::page_value(parameter),
                kind: parameter.kind,
                last_modified: None,
            })
            .collect();

        let consumed = offset + self.page_size;
        let next_token = (consumed < matching.len()).then(|| consumed.to_string());

        Ok(ParameterPage {
            entries,
            next_token,
        })
    }

    fn get_one(&self, name: &str, with_decryption: bool) -> Result<ParameterEntry, StoreError> {
        let state = self.state.lock().unwrap();
        let parameter = state
            .parameters
            .get(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;

        let value = if with_decryption {
            parameter.value.clone()
        } else {
            Self::page_value(parameter)
        };

        Ok(ParameterEntry {
            name: name.to_string(),
            value,
            kind: parameter.kind,
            last_modified: None,
        })
    }

    fn put(&self, request: &PutRequest) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();

        if !request.overwrite && state.parameters.contains_key(&request.name) {
            return Err(StoreError::AlreadyExists {
                name: request.name.clone(),
                message: "the parameter already exists".into(),
            });
        }

        if request.kind == ParameterType::SecureString {
            let alias = request
                .key_id
                .as_deref()
                .ok_or_else(|| StoreError::Access("secure write without a key id".into()))?;
            if !state.aliases.contains_key(alias) && !state.keys.contains_key(alias) {
                return Err(StoreError::Access(format!("unknown key: {alias}")));
            }
        }

        state.parameters.insert(
            request.name.clone(),
            StoredParameter {
                value: request.value.clone(),
                kind: request.kind,
            },
        );

        Ok(())
    }
}

impl KeyManagement for InMemoryRemote {
    fn describe_key(&self, key_id: &str) -> Result<KeyMetadata, KeyError> {
        let state = self.state.lock().unwrap();

        let resolved = state
            .aliases
            .get(key_id)
            .cloned()
            .or_else(|| state.keys.contains_key(key_id).then(|| key_id.to_string()));

        resolved
            .map(|key_id| KeyMetadata { key_id })
            .ok_or_else(|| KeyError::NotFound(key_id.to_string()))
    }

    fn create_key(&self, description: &str) -> Result<KeyMetadata, KeyError> {
        let mut state = self.state.lock().unwrap();
        state.next_key += 1;
        let key_id = format!("key-{:04}", state.next_key);
        state.keys.insert(key_id.clone(), description.to_string());
        Ok(KeyMetadata { key_id })
    }

    fn enable_rotation(&self, key_id: &str) -> Result<(), KeyError> {
        let mut state = self.state.lock().unwrap();
        if !state.keys.contains_key(key_id) {
            return Err(KeyError::NotFound(key_id.to_string()));
        }
        state.rotation.push(key_id.to_string());
        Ok(())
    }

    fn create_alias(&self, alias: &str, key_id: &str) -> Result<(), KeyError> {
        let mut state = self.state.lock().unwrap();
        if state.aliases.contains_key(alias) {
            return Err(KeyError::AliasExists(alias.to_string()));
        }
        if !state.keys.contains_key(key_id) {
            return Err(KeyError::NotFound(key_id.to_string()));
        }
        state.aliases.insert(alias.to_string(), key_id.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn put(remote: &InMemoryRemote, name: &str, value: &str) {
        remote
            .put(&PutRequest {
                name: name.into(),
                value: value.into(),
                kind: ParameterType::String,
                description: None,
                overwrite: false,
                key_id: None,
            })
            .unwrap();
    }

    #[test]
    fn paginates_with_continuation_tokens() {
        let remote = InMemoryRemote::with_page_size(2);
        for i in 0..5 {
            put(&remote, &format!("/Dev/app/P{}", i), "v");
        }

        let first = remote.get_by_path("/Dev/app", false, None).unwrap();
        assert_eq!(first.entries.len(), 2);
        let token = first.next_token.unwrap();

        let second = remote.get_by_path("/Dev/app", false, Some(&token)).unwrap();
        assert_eq!(second.entries.len(), 2);
        let token = second.next_token.unwrap();

        let last = remote.get_by_path("/Dev/app", false, Some(&token)).unwrap();
        assert_eq!(last.entries.len(), 1);
        assert!(last.next_token.is_none());
    }

    #[test]
    fn non_recursive_skips_deeper_levels() {
        let remote = InMemoryRemote::new();
        put(&remote, "/Dev/app/TOP", "v");
        put(&remote, "/Dev/app/nested/DEEP", "v");

        let page = remote.get_by_path("/Dev/app", false, None).unwrap();
        assert_eq!(page.entries.len(), 1);
        assert_eq!(page.entries[0].name, "/Dev/app/TOP");

        let page = remote.get_by_path("/Dev/app", true, None).unwrap();
        assert_eq!(page.entries.len(), 2);
    }

    #[test]
    fn put_conflicts_without_overwrite() {
        let remote = InMemoryRemote::new();
        put(&remote, "/Dev/app/X", "v1");

        let err = remote
            .put(&PutRequest {
                name: "/Dev/app/X".into(),
                value: "v2".into(),
                kind: ParameterType::String,
                description: None,
                overwrite: false,
                key_id: None,
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists { .. }));

        remote
            .put(&PutRequest {
                name: "/Dev/app/X".into(),
                value: "v2".into(),
                kind: ParameterType::String,
                description: None,
                overwrite: true,
                key_id: None,
            })
            .unwrap();
        assert_eq!(remote.get_one("/Dev/app/X", false).unwrap().value, "v2");
    }

    #[test]
    fn secure_values_are_opaque_until_decrypted() {
        let remote = InMemoryRemote::new();
        let key = remote.create_key("Development").unwrap();
        remote.create_alias("alias/Development", &key.key_id).unwrap();
        remote
            .put(&PutRequest {
                name: "/Dev/app/SECRET".into(),
                value: "hunter2".into(),
                kind: ParameterType::SecureString,
                description: None,
                overwrite: false,
                key_id: Some("alias/Development".into()),
            })
            .unwrap();

        let page = remote.get_by_path("/Dev/app", false, None).unwrap();
        assert_ne!(page.entries[0].value, "hunter2");
        assert!(page.entries[0].value.starts_with("kms:"));

        assert_eq!(remote.get_one("/Dev/app/SECRET", true).unwrap().value, "hunter2");
    }

    #[test]
    fn alias_conflicts_and_key_lookup() {
        let remote = InMemoryRemote::new();
        assert!(matches!(
            remote.describe_key("alias/Dev"),
            Err(KeyError::NotFound(_))
        ));

        let key = remote.create_key("Dev").unwrap();
        remote.enable_rotation(&key.key_id).unwrap();
        remote.create_alias("alias/Dev", &key.key_id).unwrap();

        assert!(remote.rotation_enabled(&key.key_id));
        assert_eq!(remote.describe_key("alias/Dev").unwrap().key_id, key.key_id);
        assert!(matches!(
            remote.create_alias("alias/Dev", &key.key_id),
            Err(KeyError::AliasExists(_))
        ));
    }
}
