//! labvars - Sync GitLab CI/CD variables with a local JSON snapshot.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── pull          # Export variables to a file
//! │   ├── push          # Create or update variables from a file
//! │   ├── delete        # Delete variables by environment scope
//! │   ├── scopes        # List environment scopes
//! │   ├── credentials   # Manage per-domain access tokens
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # Credential configuration (config.toml)
//!     ├── domain/       # Variables, project references, reports
//!     ├── git           # Remote origin lookup
//!     ├── remote/       # GitLab API client and paginator
//!     ├── reconcile     # Push and scoped delete logic
//!     ├── snapshot      # JSON snapshot files
//!     └── session       # Per-run orchestration
//! ```
//!
//! # Features
//!
//! - Pagination-aware variable export
//! - Upsert keyed by `(key, environment_scope)`
//! - Scope-family bulk deletion with optional pre-delete snapshot
//! - Per-domain tokens, no global state between runs

pub mod cli;
pub mod core;
pub mod error;
