//! Session configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default database file, relative to the working directory.
pub const DEFAULT_DATABASE: &str = "app.db";

/// How a [`Session`](crate::Session) opens its connection.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Database file, or `:memory:`.
    pub path: PathBuf,
    /// Create the file if it does not exist.
    pub create_if_missing: bool,
    /// Enforce foreign-key constraints.
    pub foreign_keys: bool,
    /// How long to wait on a locked database before failing.
    pub busy_timeout: Duration,
}

impl SessionConfig {
    /// Configuration for the database file at `path`.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Configuration for a private in-memory database.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(":memory:")
    }

    /// Sets whether a missing file is created.
    #[must_use]
    pub fn create_if_missing(mut self, enabled: bool) -> Self {
        self.create_if_missing = enabled;
        self
    }

    /// Sets whether foreign keys are enforced.
    #[must_use]
    pub fn foreign_keys(mut self, enabled: bool) -> Self {
        self.foreign_keys = enabled;
        self
    }

    /// Sets the busy timeout.
    #[must_use]
    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Returns true if the configuration targets an in-memory database.
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path.as_os_str() == ":memory:"
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATABASE),
            create_if_missing: true,
            foreign_keys: true,
            busy_timeout: Duration::from_secs(5),
        }
    }
}
