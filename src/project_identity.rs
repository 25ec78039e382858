//! Central project identity contract.
//!
//! Single source of truth for runtime identity values: binary name, env
//! prefix, default registry endpoint, and the published package the sync
//! engine generates code into.

pub const DISPLAY_NAME: &str = "Blockforge";
pub const BINARY_NAME: &str = "blockforge";
pub const CONFIG_DIR_NAME: &str = "blockforge";
pub const ENV_PREFIX: &str = "BLOCKFORGE";

/// Default registry API base (no trailing slash).
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.blockforge.dev/api/v1";

/// `name` field of the package.json the materializer looks for.
pub const TARGET_PACKAGE_NAME: &str = "@blockforge/blocks";

/// Module specifier the generated files import their block factories from.
/// Self-referencing package import, resolved via the package's own exports map.
pub const RUNTIME_MODULE: &str = "@blockforge/blocks/runtime";

pub fn env_key(suffix: &str) -> String {
    format!("{}_{}", ENV_PREFIX, suffix)
}

pub fn registry_endpoint(base_url: &str) -> String {
    format!("{}/registry", base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        assert_eq!(
            registry_endpoint("https://example.com/api/"),
            "https://example.com/api/registry"
        );
        assert_eq!(
            registry_endpoint("https://example.com/api"),
            "https://example.com/api/registry"
        );
    }

    #[test]
    fn env_key_uses_prefix() {
        assert_eq!(env_key("REGISTRY_URL"), "BLOCKFORGE_REGISTRY_URL");
    }
}
