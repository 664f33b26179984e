pub(crate) const CONFIG_GLOBAL_KEY: &str = "__DASHBOARD_SYNC_CONFIG__";
pub(crate) const DATE_LOCALE: &str = "default";
