//! Error taxonomy for confit.
//!
//! Collaborator failures are classified once, at the remote boundary, into
//! tagged variants (`NotFound`, conflict, access). Core logic matches on
//! variants instead of string-matching error codes.

use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("key error: {0}")]
    Key(#[from] KeyError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Path/namespace resolution failures. Raised at client-init time, never
/// retried.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("must specify a path, or a key namespace and application name")]
    Unresolved,

    #[error("parameter path must be root-relative: {0:?}")]
    MalformedPath(String),

    #[error("this build has no remote backend: rebuild with --features aws")]
    NoBackend,
}

/// Failures from the parameter-store API.
///
/// `AlreadyExists` is the only variant ever recovered locally (by the bulk
/// writer); everything else is fatal for the current operation.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("parameter already exists: {name}: {message}")]
    AlreadyExists { name: String, message: String },

    #[error("parameter not found: {0}")]
    NotFound(String),

    #[error("parameter store access failed: {0}")]
    Access(String),
}

/// Failures from the key-management API.
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("key not found: {0}")]
    NotFound(String),

    #[error("alias already bound: {0}")]
    AliasExists(String),

    #[error("key management access failed: {0}")]
    Access(String),
}

pub type Result<T> = std::result::Result<T, Error>;
