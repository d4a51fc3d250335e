//! Parameter path resolution.
//!
//! Derives the hierarchical store path `/<namespace>/<app>` from explicit
//! arguments, environment-supplied fallbacks, and built-in defaults. The
//! resolver is pure: environment variables are read once at the facade
//! boundary and passed in through [`ResolveOptions`].

use tracing::debug;

use crate::error::ConfigError;

/// Namespace used when nothing else is specified.
pub const DEFAULT_NAMESPACE: &str = "Development";

/// Inputs to [`resolve`], in decreasing precedence per field.
#[derive(Debug, Default, Clone)]
pub struct ResolveOptions {
    /// Explicit store path, used verbatim when present.
    pub path: Option<String>,
    /// Explicit key namespace (e.g. "Production").
    pub key_namespace: Option<String>,
    /// Explicit application name.
    pub app_name: Option<String>,
    /// Namespace fallback, typically the `CONFIT_KEY` environment variable.
    pub namespace_fallback: Option<String>,
    /// Application fallback, typically the `CONFIT_APP` environment variable.
    pub app_fallback: Option<String>,
    /// Application name declared by the embedding caller, used when neither
    /// an explicit name nor a fallback is available.
    pub declared_app: Option<String>,
}

/// A resolved parameter path. Constructed once at client-init time,
/// immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Top-level path segment, also the basis for the key alias.
    pub key_namespace: String,
    /// Application name, second path segment.
    pub app_name: String,
    /// Full root-relative store path.
    pub full_path: String,
}

impl ResolvedPath {
    /// The encryption key alias for this namespace: `alias/<namespace>`.
    pub fn key_alias(&self) -> String {
        format!("alias/{}", self.key_namespace)
    }
}

/// Resolve a store path from the given options.
///
/// Precedence per field: explicit argument, then fallback, then default.
/// An explicit `path` is used verbatim as the full path; namespace and app
/// are still resolved for key-alias derivation.
///
/// # Errors
///
/// [`ConfigError::Unresolved`] when neither an explicit path nor an
/// application name can be resolved, and [`ConfigError::MalformedPath`] when
/// the resulting path is empty or not root-relative.
pub fn resolve(options: &ResolveOptions) -> Result<ResolvedPath, ConfigError> {
    let key_namespace = options
        .key_namespace
        .clone()
        .or_else(|| options.namespace_fallback.clone())
        .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());

    let app_name = options
        .app_name
        .clone()
        .or_else(|| options.app_fallback.clone())
        .or_else(|| options.declared_app.clone());

    let full_path = match (&options.path, &app_name) {
        (Some(path), _) => path.clone(),
        (None, Some(app)) => format!("/{}/{}", key_namespace, app),
        (None, None) => return Err(ConfigError::Unresolved),
    };

    if full_path.len() < 2 || !full_path.starts_with('/') {
        return Err(ConfigError::MalformedPath(full_path));
    }

    let resolved = ResolvedPath {
        key_namespace,
        // With an explicit path the app name is recorded best-effort; it is
        // only used for reporting, never for path construction.
        app_name: app_name.unwrap_or_default(),
        full_path,
    };
    debug!(path = %resolved.full_path, namespace = %resolved.key_namespace, "resolved parameter path");

    Ok(resolved)
}
