//! Paginated parameter retrieval and materialization.
//!
//! A fetch walks every page the store returns for a path, strips the path
//! prefix off each name, and decrypts `SecureString` entries through a
//! secondary point read. Each fetch builds a fresh [`ParameterSet`]; nothing
//! is cached between calls.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::core::remote::{ParameterStore, ParameterType};
use crate::error::Result;

/// One parameter after materialization, keyed locally by [`ParameterSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedParameter {
    /// Local name, with the query path prefix removed.
    pub name: String,
    /// Usable value: the plaintext for decrypted `SecureString` entries,
    /// the raw store value otherwise.
    pub value: String,
    pub kind: ParameterType,
    /// Raw ciphertext-bearing value, present for decrypted entries.
    pub encrypted: Option<String>,
    /// Decrypted plaintext, present for decrypted entries.
    pub decrypted: Option<String>,
}

/// The parameters under one path, keyed by local name.
///
/// Missing names are an `Option::None`, never a panic; there is no dynamic
/// attribute-style access.
#[derive(Debug, Default)]
pub struct ParameterSet {
    inner: BTreeMap<String, MaterializedParameter>,
}

impl ParameterSet {
    /// Usable value of a parameter, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner.get(name).map(|p| p.value.as_str())
    }

    /// Full materialized record of a parameter, if present.
    pub fn get_parameter(&self, name: &str) -> Option<&MaterializedParameter> {
        self.inner.get(name)
    }

    /// Iterate over `(local name, parameter)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MaterializedParameter)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn insert(&mut self, parameter: MaterializedParameter) {
        // Duplicate local names overwrite earlier ones: last write wins.
        self.inner.insert(parameter.name.clone(), parameter);
    }
}

/// Fetch every parameter under `path` and materialize the result.
///
/// Pages are followed until the store stops returning a continuation token.
/// When `with_decryption` is set, each `SecureString` entry costs one extra
/// point read; its page value is kept as `encrypted` and the plaintext
/// becomes the usable `value`.
///
/// # Errors
///
/// Any store failure aborts the whole fetch; no partial set is returned.
pub fn fetch(
    store: &dyn ParameterStore,
    path: &str,
    recursive: bool,
    with_decryption: bool,
) -> Result<ParameterSet> {
    debug!(path, recursive, with_decryption, "fetching parameters");

    let mut entries = Vec::new();
    let mut next_token: Option<String> = None;

    // No iteration cap: the loop ends strictly on token absence.
    loop {
        let page = store.get_by_path(path, recursive, next_token.as_deref())?;
        trace!(entries = page.entries.len(), more = page.next_token.is_some(), "got page");
        entries.extend(page.entries);

        match page.next_token {
            Some(token) => next_token = Some(token),
            None => break,
        }
    }

    let prefix = format!("{}/", path);
    let mut set = ParameterSet::default();

    for entry in entries {
        let local = entry
            .name
            .strip_prefix(&prefix)
            .unwrap_or(entry.name.as_str())
            .to_string();

        let parameter = if entry.kind == ParameterType::SecureString && with_decryption {
            let plaintext = store.get_one(&entry.name, true)?.value;
            MaterializedParameter {
                name: local,
                value: plaintext.clone(),
                kind: entry.kind,
                encrypted: Some(entry.value),
                decrypted: Some(plaintext),
            }
        } else {
            MaterializedParameter {
                name: local,
                value: entry.value,
                kind: entry.kind,
                encrypted: None,
                decrypted: None,
            }
        };

        set.insert(parameter);
    }

    debug!(parameters = set.len(), "fetch complete");
    Ok(set)
}
