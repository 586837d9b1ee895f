//! Resolver configuration file.
//!
//! ```yaml
//! endpoints:
//!   A664_Channel: { ip: 239.1.0.0, port: 7000 }
//! ```
//!
//! Channel types without an entry keep their built-in base endpoint.

use crate::error::{Error, Result};
use crate::vistas::{AddressAllocator, ChannelType, Endpoint, DEFAULT_ENDPOINTS};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// ResolverConfig holds the tunables of the flat resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolverConfig {
    /// Base endpoint per channel type.
    #[serde(default)]
    pub endpoints: IndexMap<ChannelType, Endpoint>,
}

impl ResolverConfig {
    /// Parses a configuration document.
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Reads a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        info!("Reading config : {}", path.display());
        let source = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_yaml_str(&source)
    }

    /// Builds an allocator from the built-in table overlaid with the
    /// configured endpoints.
    pub fn allocator(&self) -> AddressAllocator {
        AddressAllocator::new(DEFAULT_ENDPOINTS.into_iter().map(|(kind, base)| {
            (kind, self.endpoints.get(&kind).copied().unwrap_or(base))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_overrides_and_defaults() {
        let config = ResolverConfig::from_yaml_str(
            "endpoints:\n  A664_Channel:\n    ip: 239.1.0.0\n    port: 7000\n",
        )
        .unwrap();
        let allocator = config.allocator();

        assert_eq!(
            allocator.peek(ChannelType::A664),
            Some(Endpoint::new(Ipv4Addr::new(239, 1, 0, 0), 7000))
        );
        assert_eq!(
            allocator.peek(ChannelType::Nad),
            Some(Endpoint::new(Ipv4Addr::new(224, 231, 100, 0), 6000))
        );
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = ResolverConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, ResolverConfig::default());
        assert_eq!(config.allocator(), AddressAllocator::default());
    }

    #[test]
    fn test_unknown_channel_type_rejected() {
        let result = ResolverConfig::from_yaml_str(
            "endpoints:\n  Foo_Channel:\n    ip: 239.1.0.0\n    port: 7000\n",
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = ResolverConfig::from_yaml_str("ports: 3\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resolver.yaml");
        std::fs::write(&path, "endpoints:\n  Analog_Channel: { ip: 10.0.0.1, port: 5000 }\n")
            .unwrap();

        let config = ResolverConfig::load(&path).unwrap();
        assert_eq!(config.endpoints.len(), 1);
        assert_eq!(config.endpoints[&ChannelType::Analog].port, 5000);

        let missing = ResolverConfig::load(&dir.path().join("absent.yaml"));
        assert!(matches!(missing, Err(Error::Io { .. })));
    }
}
