//! Maps a platform identifier to the collectors enabled on it.
//!
//! The orchestrator already knows the host platform and passes it in
//! explicitly; there is no ambient auto-registration.

use super::memory::MemoryCollector;
use super::os::OsCollector;
use super::CollectionError;

/// The collectors that run on one platform.
#[derive(Debug)]
pub struct CollectorSet {
    pub os: OsCollector,
    pub memory: MemoryCollector,
}

fn solaris2() -> CollectorSet {
    CollectorSet {
        os: OsCollector::new(),
        memory: MemoryCollector::new(),
    }
}

/// Supported platforms, in lookup order.
const PLATFORMS: &[(&str, fn() -> CollectorSet)] = &[("solaris2", solaris2)];

/// Construct the collector set for `platform`.
pub fn collectors_for(platform: &str) -> Result<CollectorSet, CollectionError> {
    PLATFORMS
        .iter()
        .find(|(id, _)| *id == platform)
        .map(|(_, ctor)| ctor())
        .ok_or_else(|| CollectionError::UnsupportedPlatform(platform.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solaris2_is_registered() {
        assert!(collectors_for("solaris2").is_ok());
    }

    #[test]
    fn unknown_platform_is_rejected() {
        let err = collectors_for("plan9").unwrap_err();
        assert!(matches!(err, CollectionError::UnsupportedPlatform(p) if p == "plan9"));
    }
}
