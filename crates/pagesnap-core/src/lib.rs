pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod part;
pub mod viewport;

pub use config::{AppConfig, EasingType, ScrollConfig, SnapConfig};
pub use controller::SnapController;
pub use error::{Error, Result};
pub use input::{normalize_delta, NavKey, WheelEvent};
pub use part::{Part, PartSource};
pub use viewport::{SmoothScroll, ViewportMetrics};
