pub const DASHBOARD_PATH_MARKER: &str = "/dashboard";

/// Read access to the host page's current navigable path.
pub trait ViewLocation {
    fn current_path(&self) -> String;
}

/// Decides whether a path belongs to the dashboard view.
///
/// The guard holds only its marker. Callers pass the path they just read, so
/// nothing about the location is remembered between checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewGuard {
    marker: String,
}

impl ViewGuard {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    #[must_use]
    pub fn admits(&self, path: &str) -> bool {
        path.contains(self.marker.as_str())
    }

    /// Reads the location now and checks it.
    pub fn admits_current(&self, location: &dyn ViewLocation) -> bool {
        self.admits(&location.current_path())
    }
}

impl Default for ViewGuard {
    fn default() -> Self {
        Self::new(DASHBOARD_PATH_MARKER)
    }
}

#[must_use]
pub fn is_dashboard_view(path: &str) -> bool {
    path.contains(DASHBOARD_PATH_MARKER)
}
