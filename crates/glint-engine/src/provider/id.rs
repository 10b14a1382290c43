use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Only read by `ProviderId::generate`, which only provider construction calls.
static NEXT_GENERATED: AtomicU64 = AtomicU64::new(1);

/// Identity of a provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProviderId(String);

impl ProviderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Next process-unique id: `"1"`, `"2"`, ...
    pub(super) fn generate() -> Self {
        Self(NEXT_GENERATED.fetch_add(1, Ordering::Relaxed).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
