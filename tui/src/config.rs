//! Toast Configuration
//!
//! Defaults match the stock look: five toasts, 40-cell content, four
//! seconds on screen, a slightly under-damped spring ticked at 60 FPS.
//!
//! Sources, in the order a host usually layers them: [`ToastConfig::default`],
//! a TOML file via [`ToastConfig::from_toml_str`], then `ARLO_TOAST_*`
//! environment variables via [`ToastConfig::from_env`].

use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Tunables for [`NotificationManager`](crate::notifications::NotificationManager)
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    /// Maximum toasts rendered at once (default: 5)
    pub max_visible: usize,
    /// Content width in cells, excluding border and padding (default: 40)
    pub default_width: usize,
    /// Time a toast stays fully visible, in milliseconds (default: 4000)
    pub default_duration_ms: u64,
    /// Spring angular frequency (default: 6.0)
    pub spring_frequency: f64,
    /// Spring damping ratio (default: 0.8)
    pub spring_damping: f64,
    /// Ticks per second the host calls `update()` at (default: 60)
    pub tick_rate: u32,
    /// Slide toasts back out on expiry instead of removing them (default: false)
    pub exit_animation: bool,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            max_visible: 5,
            default_width: 40,
            default_duration_ms: 4_000,
            spring_frequency: 6.0,
            spring_damping: 0.8,
            tick_rate: 60,
            exit_animation: false,
        }
    }
}

impl ToastConfig {
    /// Create config from environment variables with fallback to defaults
    pub fn from_env() -> Self {
        Self::default().merge_env()
    }

    /// Override fields with any `ARLO_TOAST_*` variables that parse
    #[must_use]
    pub fn merge_env(self) -> Self {
        Self {
            max_visible: env_or("ARLO_TOAST_MAX_VISIBLE", self.max_visible),
            default_width: env_or("ARLO_TOAST_WIDTH", self.default_width),
            default_duration_ms: env_or("ARLO_TOAST_DURATION_MS", self.default_duration_ms),
            spring_frequency: env_or("ARLO_TOAST_SPRING_FREQUENCY", self.spring_frequency),
            spring_damping: env_or("ARLO_TOAST_SPRING_DAMPING", self.spring_damping),
            tick_rate: env_or("ARLO_TOAST_TICK_RATE", self.tick_rate),
            exit_animation: env_or("ARLO_TOAST_EXIT_ANIMATION", self.exit_animation),
        }
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the manager cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_visible == 0 {
            return Err(ConfigError::invalid("max_visible", "must be at least 1"));
        }
        if self.default_width == 0 {
            return Err(ConfigError::invalid("default_width", "must be at least 1"));
        }
        if self.tick_rate == 0 {
            return Err(ConfigError::invalid("tick_rate", "must be at least 1"));
        }
        if !self.spring_frequency.is_finite() || self.spring_frequency <= 0.0 {
            return Err(ConfigError::invalid(
                "spring_frequency",
                "must be a positive number",
            ));
        }
        if !self.spring_damping.is_finite() || self.spring_damping <= 0.0 {
            return Err(ConfigError::invalid(
                "spring_damping",
                "must be a positive number",
            ));
        }
        Ok(())
    }

    pub fn default_duration(&self) -> Duration {
        Duration::from_millis(self.default_duration_ms)
    }

    /// Ticks after which a spring that has not settled is snapped to rest
    pub fn settle_limit_ticks(&self) -> u32 {
        self.tick_rate.max(1).saturating_mul(SETTLE_LIMIT_SECS)
    }
}

/// Longest a slide may run before it is snapped to its target
const SETTLE_LIMIT_SECS: u32 = 5;

fn env_or<T: FromStr>(key: &str, fallback: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(fallback)
}

// =============================================================================
// Error Types
// =============================================================================

/// Errors from loading a toast configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid TOML or has mistyped fields
    #[error("failed to parse toast config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field parsed but is out of range
    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        /// Offending field name
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
