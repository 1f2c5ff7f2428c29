//! Footer-hook configuration.
//!
//! Mirrors the two knobs a journal platform exposes for the COinS
//! feature: an on/off switch and the list of routes that should carry a
//! tag. Hosts typically deserialize this straight out of their plugin
//! settings store.

use serde::{Deserialize, Serialize};

use crate::Route;

/// Configuration for the COinS footer hook.
///
/// # Examples
///
/// ```
/// use coinspan::CoinsConfig;
///
/// let config = CoinsConfig::default();
/// assert!(config.enabled);
/// assert_eq!(config.routes[0].to_string(), "article/view");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoinsConfig {
    /// Whether the hook emits anything at all.
    pub enabled: bool,
    /// Routes a tag should be embedded on.
    pub routes: Vec<Route>,
}

impl Default for CoinsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            routes: vec![Route::new("article", "view")],
        }
    }
}

impl CoinsConfig {
    /// Creates a configuration with default settings: enabled, tagging
    /// article-view pages only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable the hook without dropping the route list (builder style).
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Whether `route` is one the hook should act on.
    pub fn matches(&self, route: &Route) -> bool {
        self.enabled && self.routes.contains(route)
    }
}
