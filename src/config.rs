//! Engine configuration.
//!
//! Element ids and marker class names are the contract with the page
//! converters and stylesheets; the numeric values are tuning knobs.

use std::time::Duration;

use compact_str::CompactString;

/// Default distance of the activation line below the viewport top, in pixels.
pub const DEFAULT_ACTIVATION_OFFSET: f64 = 45.0;

/// Default throttle window for scroll and resize handling.
pub const DEFAULT_THROTTLE_WINDOW: Duration = Duration::from_millis(50);

/// Default quiet period before a scroll gesture counts as settled.
pub const DEFAULT_SETTLE_WINDOW: Duration = Duration::from_millis(50);

/// Style property holding the banner height used as fixed-position threshold.
pub const DEFAULT_BANNER_HEIGHT_PROPERTY: &str = "--layout-banner-height";

/// Marker class names owned by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    /// The single active outline entry
    pub active: CompactString,
    /// Ancestors of the active entry
    pub expanded: CompactString,
    /// Document-level, set while scrolled past the banner
    pub fixed: CompactString,
    /// Document-level, set while the panel is toggled open
    pub shown: CompactString,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            active: CompactString::const_new("active"),
            expanded: CompactString::const_new("expanded"),
            fixed: CompactString::const_new("fixed-toc"),
            shown: CompactString::const_new("show-toc"),
        }
    }
}

/// Configuration for [`crate::OutlineSync`].
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Id of the outline panel element.
    pub panel_id: CompactString,
    /// Id of the content region element.
    pub content_id: CompactString,
    /// Id of the optional panel visibility toggle.
    pub toggle_id: CompactString,
    /// Id of the outline item excluded from click activation.
    pub back_to_index_id: CompactString,
    /// Style property read for the fixed-position threshold.
    pub banner_height_property: CompactString,
    /// Activation line offset below the viewport top.
    pub activation_offset: f64,
    /// Minimum spacing between scroll (and resize) recomputations.
    pub throttle_window: Duration,
    /// Quiet period after the last scroll before settlement runs.
    pub settle_window: Duration,
    /// Class names the engine adds and removes.
    pub markers: Markers,
}

impl SyncConfig {
    pub fn new() -> Self {
        Self {
            panel_id: CompactString::const_new("toc"),
            content_id: CompactString::const_new("content"),
            toggle_id: CompactString::const_new("toc-toggle"),
            back_to_index_id: CompactString::const_new("back-to-index"),
            banner_height_property: CompactString::const_new(DEFAULT_BANNER_HEIGHT_PROPERTY),
            activation_offset: DEFAULT_ACTIVATION_OFFSET,
            throttle_window: DEFAULT_THROTTLE_WINDOW,
            settle_window: DEFAULT_SETTLE_WINDOW,
            markers: Markers::default(),
        }
    }

    pub fn with_panel_id(mut self, id: impl AsRef<str>) -> Self {
        self.panel_id = CompactString::new(id);
        self
    }

    pub fn with_content_id(mut self, id: impl AsRef<str>) -> Self {
        self.content_id = CompactString::new(id);
        self
    }

    pub fn with_toggle_id(mut self, id: impl AsRef<str>) -> Self {
        self.toggle_id = CompactString::new(id);
        self
    }

    pub fn with_back_to_index_id(mut self, id: impl AsRef<str>) -> Self {
        self.back_to_index_id = CompactString::new(id);
        self
    }

    pub fn with_banner_height_property(mut self, name: impl AsRef<str>) -> Self {
        self.banner_height_property = CompactString::new(name);
        self
    }

    /// Override the activation line offset.
    pub fn with_activation_offset(mut self, offset: f64) -> Self {
        self.activation_offset = offset;
        self
    }

    pub fn with_throttle_window(mut self, window: Duration) -> Self {
        self.throttle_window = window;
        self
    }

    pub fn with_settle_window(mut self, window: Duration) -> Self {
        self.settle_window = window;
        self
    }

    pub fn with_markers(mut self, markers: Markers) -> Self {
        self.markers = markers;
        self
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a CSS pixel length such as `"64px"`, `" 64 "` or `"12.5px"`.
pub fn parse_pixels(raw: &str) -> crate::OutlineResult<f64> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim_end();
    number
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| crate::OutlineError::invalid_length(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SyncConfig::default();
        assert_eq!(config.panel_id, "toc");
        assert_eq!(config.content_id, "content");
        assert_eq!(config.activation_offset, 45.0);
        assert_eq!(config.throttle_window, Duration::from_millis(50));
        assert_eq!(config.markers.active, "active");
        assert_eq!(config.markers.fixed, "fixed-toc");
    }

    #[test]
    fn test_builder() {
        let config = SyncConfig::new()
            .with_panel_id("outline")
            .with_back_to_index_id("home")
            .with_activation_offset(80.0)
            .with_settle_window(Duration::from_millis(120));
        assert_eq!(config.panel_id, "outline");
        assert_eq!(config.back_to_index_id, "home");
        assert_eq!(config.activation_offset, 80.0);
        assert_eq!(config.settle_window, Duration::from_millis(120));
    }

    #[test]
    fn test_parse_pixels() {
        assert_eq!(parse_pixels("64px").unwrap(), 64.0);
        assert_eq!(parse_pixels(" 12.5px ").unwrap(), 12.5);
        assert_eq!(parse_pixels("30").unwrap(), 30.0);
        assert!(parse_pixels("3rem").is_err());
        assert!(parse_pixels("").is_err());
        assert!(parse_pixels("NaNpx").is_err());
    }
}
