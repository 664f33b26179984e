use dashboard_sync_core::{ConfigError, SyncConfig};

pub(crate) const CONFIG_SOURCE_DEFAULT: &str = "default";
pub(crate) const CONFIG_SOURCE_PAGE: &str = "page_global";
pub(crate) const CONFIG_SOURCE_INVALID: &str = "page_global:invalid->default";

#[derive(Debug)]
pub(crate) struct ResolvedConfig {
    pub(crate) config: SyncConfig,
    pub(crate) source: &'static str,
    pub(crate) rejected: Option<ConfigError>,
}

/// Merges the page-supplied JSON document over the defaults. A document that
/// fails to parse or validate is dropped whole; the defaults stay in effect.
pub(crate) fn resolve_sync_config(document: Option<&str>) -> ResolvedConfig {
    let Some(document) = document.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return ResolvedConfig {
            config: SyncConfig::default(),
            source: CONFIG_SOURCE_DEFAULT,
            rejected: None,
        };
    };

    match SyncConfig::from_json(document) {
        Ok(config) => ResolvedConfig {
            config,
            source: CONFIG_SOURCE_PAGE,
            rejected: None,
        },
        Err(error) => ResolvedConfig {
            config: SyncConfig::default(),
            source: CONFIG_SOURCE_INVALID,
            rejected: Some(error),
        },
    }
}
