use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub snap: SnapConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            snap: SnapConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

/// Snap behavior tunables.
///
/// The numeric defaults are load-bearing: snap-boundary behavior is tuned
/// around them, and hosts that want the stock feel should keep them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapConfig {
    /// Selector identifying the sections treated as snap targets
    #[serde(default = "default_part_selector")]
    pub part: String,
    /// Viewport widths at or below this value disable snapping (px).
    /// The boundary is inclusive: a viewport of exactly this width is
    /// considered too narrow.
    #[serde(default = "default_min_viewport_width")]
    pub min_viewport_width: f64,
    /// Minimum spacing between processed wheel inputs (ms)
    #[serde(default = "default_wheel_throttle_ms")]
    pub wheel_throttle_ms: u64,
    /// Cooldown after issuing a snap during which further snap decisions
    /// are suppressed (ms), measured from issue time
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
    /// Direction-aware slack applied to the near-boundary tests (px), so
    /// a boundary the user just crossed does not re-trigger
    #[serde(default = "default_edge_bias")]
    pub edge_bias: f64,
    /// Distance one wheel event moves the viewport when no snap applies (px)
    #[serde(default = "default_wheel_step")]
    pub wheel_step: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            part: default_part_selector(),
            min_viewport_width: default_min_viewport_width(),
            wheel_throttle_ms: default_wheel_throttle_ms(),
            settle_ms: default_settle_ms(),
            edge_bias: default_edge_bias(),
            wheel_step: default_wheel_step(),
        }
    }
}

impl SnapConfig {
    /// Throttle window as a Duration
    #[inline]
    pub fn wheel_throttle(&self) -> Duration {
        Duration::from_millis(self.wheel_throttle_ms)
    }

    /// Settle window as a Duration
    #[inline]
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Smooth scrolling configuration
    #[serde(default)]
    pub scroll: ScrollConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            scroll: ScrollConfig::default(),
        }
    }
}

/// Smooth scrolling configuration, consumed by the host animator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Enable smooth scrolling animations
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Animation duration in milliseconds
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    /// Easing function for animations
    #[serde(default)]
    pub easing: EasingType,
    /// Animation frame rate
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u16,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_animation_duration(),
            easing: EasingType::default(),
            animation_fps: default_animation_fps(),
        }
    }
}

/// Easing function used by scroll animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EasingType {
    /// Jump to the target at the end of the animation window
    None,
    Linear,
    #[default]
    Cubic,
    Quintic,
    EaseOut,
}

fn default_part_selector() -> String {
    "section".to_string()
}

fn default_min_viewport_width() -> f64 {
    900.0
}

fn default_wheel_throttle_ms() -> u64 {
    100
}

fn default_settle_ms() -> u64 {
    500
}

fn default_edge_bias() -> f64 {
    10.0
}

fn default_wheel_step() -> f64 {
    300.0
}

fn default_tick_rate() -> u64 {
    100
}

fn default_true() -> bool {
    true
}

fn default_animation_duration() -> u64 {
    150
}

fn default_animation_fps() -> u16 {
    60
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/pagesnap/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("pagesnap")
            .join("config.toml")
    }
}
