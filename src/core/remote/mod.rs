//! Collaborator boundary: remote parameter-store and key-management APIs.
//!
//! The core never talks to a cloud SDK directly. It goes through these two
//! traits, which return tagged errors (`StoreError`, `KeyError`) so callers
//! can match on `AlreadyExists` / `NotFound` variants instead of inspecting
//! error-code strings.

#[cfg(feature = "aws")]
pub mod aws;
pub mod memory;

use serde::{Deserialize, Serialize};

use crate::error::{KeyError, StoreError};

/// Parameter value types supported by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ParameterType {
    #[default]
    String,
    StringList,
    SecureString,
}

impl ParameterType {
    /// Wire name of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::StringList => "StringList",
            Self::SecureString => "SecureString",
        }
    }
}

/// One entry as returned by the store. `name` is the fully qualified path.
#[derive(Debug, Clone)]
pub struct ParameterEntry {
    pub name: String,
    pub value: String,
    pub kind: ParameterType,
    /// Last modification time, seconds since the epoch.
    pub last_modified: Option<i64>,
}

/// One page of a paginated path query.
#[derive(Debug, Default)]
pub struct ParameterPage {
    pub entries: Vec<ParameterEntry>,
    /// Opaque cursor for the next page; absent on the last page.
    pub next_token: Option<String>,
}

/// A single parameter write.
#[derive(Debug, Clone)]
pub struct PutRequest {
    pub name: String,
    pub value: String,
    pub kind: ParameterType,
    pub description: Option<String>,
    pub overwrite: bool,
    /// Encryption key alias, set for `SecureString` writes.
    pub key_id: Option<String>,
}

/// Metadata for an encryption key.
#[derive(Debug, Clone)]
pub struct KeyMetadata {
    pub key_id: String,
}

/// Remote hierarchical key-value parameter store.
pub trait ParameterStore {
    /// Fetch one page of entries under `path`.
    ///
    /// Non-recursive queries return only direct children; recursive queries
    /// return the whole subtree. `SecureString` values come back as
    /// ciphertext; decryption is a separate [`get_one`](Self::get_one) read.
    fn get_by_path(
        &self,
        path: &str,
        recursive: bool,
        next_token: Option<&str>,
    ) -> Result<ParameterPage, StoreError>;

    /// Point read of a single parameter by fully qualified name.
    fn get_one(&self, name: &str, with_decryption: bool) -> Result<ParameterEntry, StoreError>;

    /// Write a single parameter.
    ///
    /// Returns [`StoreError::AlreadyExists`] when the parameter exists and
    /// `overwrite` was not set.
    fn put(&self, request: &PutRequest) -> Result<(), StoreError>;
}

/// Remote key-management service.
pub trait KeyManagement {
    /// Look up a key by id, ARN, or alias.
    ///
    /// Returns [`KeyError::NotFound`] when no such key exists; every other
    /// failure keeps its own variant.
    fn describe_key(&self, key_id: &str) -> Result<KeyMetadata, KeyError>;

    /// Create a new key.
    fn create_key(&self, description: &str) -> Result<KeyMetadata, KeyError>;

    /// Enable automatic rotation for a key.
    fn enable_rotation(&self, key_id: &str) -> Result<(), KeyError>;

    /// Bind an alias to a key. Returns [`KeyError::AliasExists`] when the
    /// alias is already bound.
    fn create_alias(&self, alias: &str, key_id: &str) -> Result<(), KeyError>;
}
