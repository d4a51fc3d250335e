//! Top-level facade.
//!
//! `Confit` ties the pieces together: it resolves the parameter path once at
//! construction (reading `CONFIT_KEY` / `CONFIT_APP` exactly here, never
//! deeper in the core), then exposes fetch, import, and export over a pair
//! of remote collaborators.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::core::import_export;
use crate::core::keys;
use crate::core::parameters::{self, ParameterSet};
use crate::core::path::{self, ResolveOptions, ResolvedPath};
use crate::core::remote::{KeyManagement, ParameterStore};
use crate::core::writer;
use crate::error::Result;

/// Environment variable naming the key namespace.
pub const ENV_NAMESPACE: &str = "CONFIT_KEY";
/// Environment variable naming the application.
pub const ENV_APP: &str = "CONFIT_APP";

/// Caller-facing construction options.
#[derive(Debug, Default, Clone)]
pub struct ConfitOptions {
    /// Explicit store path; overrides namespace/app path construction.
    pub path: Option<String>,
    /// Key namespace, e.g. "Production". Falls back to `CONFIT_KEY`, then
    /// "Development".
    pub key_namespace: Option<String>,
    /// Application name. Falls back to `CONFIT_APP`, then `declared_app`.
    pub app_name: Option<String>,
    /// Name the embedding application declares for itself, used when nothing
    /// else names the app.
    pub declared_app: Option<String>,
}

/// A configuration client bound to one resolved parameter path.
pub struct Confit {
    resolved: ResolvedPath,
    store: Arc<dyn ParameterStore>,
    kms: Arc<dyn KeyManagement>,
}

impl Confit {
    /// Build a client over explicit collaborators.
    ///
    /// Environment fallbacks are read once, here.
    ///
    /// # Errors
    ///
    /// [`crate::error::ConfigError`] when no path can be resolved.
    pub fn with_backends(
        options: ConfitOptions,
        store: Arc<dyn ParameterStore>,
        kms: Arc<dyn KeyManagement>,
    ) -> Result<Self> {
        let resolved = path::resolve(&ResolveOptions {
            path: options.path,
            key_namespace: options.key_namespace,
            app_name: options.app_name,
            namespace_fallback: std::env::var(ENV_NAMESPACE).ok(),
            app_fallback: std::env::var(ENV_APP).ok(),
            declared_app: options.declared_app,
        })?;

        Ok(Self {
            resolved,
            store,
            kms,
        })
    }

    /// Build a client against AWS SSM and KMS, using the default credential
    /// provider chain.
    #[cfg(feature = "aws")]
    pub fn from_env(options: ConfitOptions, region: Option<String>) -> Result<Self> {
        let session = Arc::new(crate::core::remote::aws::AwsSession::new(region)?);
        Self::with_backends(options, session.clone(), session)
    }

    /// The resolved store path.
    pub fn path(&self) -> &str {
        &self.resolved.full_path
    }

    /// The resolved path record.
    pub fn resolved(&self) -> &ResolvedPath {
        &self.resolved
    }

    /// Fetch every parameter under the resolved path.
    ///
    /// Each call is a fresh read; nothing is cached. `SecureString` entries
    /// are decrypted when `with_decryption` is set.
    pub fn fetch(&self, recursive: bool, with_decryption: bool) -> Result<ParameterSet> {
        parameters::fetch(
            self.store.as_ref(),
            &self.resolved.full_path,
            recursive,
            with_decryption,
        )
    }

    /// Bulk-write a descriptor list under the resolved path.
    ///
    /// Provisions the namespace encryption key first, then writes each
    /// descriptor, tolerating "already exists" conflicts. Returns the number
    /// of parameters created.
    pub fn put(&self, descriptors: &[writer::WriteDescriptor]) -> Result<usize> {
        let alias = self.resolved.key_alias();
        keys::ensure_key(self.kms.as_ref(), &alias, &self.resolved.key_namespace)?;
        writer::write(
            self.store.as_ref(),
            &self.resolved.full_path,
            &alias,
            descriptors,
        )
    }

    /// Import a JSON descriptor file.
    ///
    /// A failure partway leaves earlier descriptors applied; re-running the
    /// import is safe.
    pub fn import(&self, file: &Path) -> Result<usize> {
        let descriptors = import_export::read_descriptors(file)?;
        let written = self.put(&descriptors)?;
        info!(
            path = %self.resolved.full_path,
            descriptors = descriptors.len(),
            written,
            "import complete"
        );
        Ok(written)
    }

    /// Export the parameters under the resolved path to a JSON file.
    ///
    /// `decrypt` controls whether `SecureString` values are written as
    /// plaintext; the safe default for callers is ciphertext.
    pub fn export(&self, file: &Path, recursive: bool, decrypt: bool) -> Result<usize> {
        let set = self.fetch(recursive, decrypt)?;
        let count = import_export::write_descriptors(file, &set)?;
        debug!(path = %self.resolved.full_path, count, decrypt, "export complete");
        Ok(count)
    }
}
