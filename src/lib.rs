//! Confit - namespace-style application configuration from a hierarchical
//! parameter store.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── fetch         # Fetch and print all parameters under a path
//! │   ├── get           # Print a single parameter value
//! │   ├── import        # Bulk-write parameters from a JSON file
//! │   ├── export        # Dump parameters to a JSON file
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── path          # Parameter path resolution
//!     ├── parameters    # Paginated fetch and materialization
//!     ├── keys          # Idempotent encryption-key provisioning
//!     ├── writer        # Conflict-tolerant bulk writes
//!     ├── import_export # JSON descriptor files
//!     ├── client        # Top-level facade
//!     └── remote/       # Collaborator boundary
//!         ├── mod       # ParameterStore / KeyManagement traits
//!         ├── aws       # AWS SSM + KMS implementation
//!         └── memory    # In-memory implementation for tests
//! ```
//!
//! # Features
//!
//! - Hierarchical `/<namespace>/<app>` parameter paths with env-var defaults
//! - Paginated retrieval with transparent SecureString decryption
//! - Idempotent encryption-key provisioning (create + rotate + alias)
//! - Conflict-tolerant bulk import, JSON export
//! - Pluggable remote backends behind small traits

pub mod cli;
pub mod core;
pub mod error;
