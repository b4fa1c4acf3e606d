//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

/// A CI/CD variable name (e.g., DATABASE_URL).
pub type VariableKey = String;

/// An environment scope tag (`*`, `production`, `review/*`).
pub type EnvironmentScope = String;

/// A GitLab host name, with port when non-default (e.g., `gitlab.example.com`).
pub type Domain = String;
