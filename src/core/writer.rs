//! Conflict-tolerant bulk parameter writes.
//!
//! Each descriptor is written independently, in input order. A "parameter
//! already exists" conflict is a logged no-op for that descriptor; any other
//! failure aborts the batch immediately, leaving earlier writes applied.
//! Retrying the whole batch is safe: already-applied entries land in the
//! conflict branch.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::remote::{ParameterStore, ParameterType, PutRequest};
use crate::error::{Result, StoreError};

/// Caller input for one bulk-write entry.
///
/// Field names mirror the store's wire casing so descriptor files read the
/// same as the remote API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct WriteDescriptor {
    /// Parameter name; qualified under the target path unless it already
    /// starts with it.
    pub name: String,
    pub value: String,
    /// Missing `Type` in a descriptor file means `String`.
    #[serde(rename = "Type", default)]
    pub kind: ParameterType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overwrite: Option<bool>,
    /// Derived, never caller-supplied: injected for `SecureString` writes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
}

/// Write `descriptors` under `path`, encrypting secure entries with
/// `key_alias`.
///
/// The caller must have provisioned the key behind `key_alias` first when
/// any descriptor is a `SecureString`. Returns the number of parameters
/// actually created (conflict no-ops excluded).
///
/// # Errors
///
/// The first non-conflict store failure, with later descriptors left
/// unattempted.
pub fn write(
    store: &dyn ParameterStore,
    path: &str,
    key_alias: &str,
    descriptors: &[WriteDescriptor],
) -> Result<usize> {
    let mut written = 0;

    for descriptor in descriptors {
        let name = if descriptor.name.starts_with(path) {
            descriptor.name.clone()
        } else {
            format!("{}/{}", path, descriptor.name)
        };

        let key_id = match descriptor.kind {
            ParameterType::SecureString => Some(key_alias.to_string()),
            _ => descriptor.key_id.clone(),
        };

        let request = PutRequest {
            name,
            value: descriptor.value.clone(),
            kind: descriptor.kind,
            description: descriptor.description.clone(),
            overwrite: descriptor.overwrite.unwrap_or(false),
            key_id,
        };

        match store.put(&request) {
            Ok(()) => {
                debug!(name = %request.name, kind = request.kind.as_str(), "parameter written");
                written += 1;
            }
            // Idempotent-import semantics: only the exact conflict variant
            // is tolerated, never arbitrary error codes.
            Err(StoreError::AlreadyExists { name, message }) => {
                warn!(%name, %message, "parameter already exists, skipping");
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(written)
}
