#![forbid(unsafe_code)]

//! Animation configuration for a [`ListAnimator`](crate::engine::ListAnimator).
//!
//! The default configuration disables animation; every reconcile then
//! completes instantly unless the host drives the factor itself. Hosts can
//! override the transition from the environment:
//!
//! | Variable                  | Meaning                                   |
//! |---------------------------|-------------------------------------------|
//! | `RELIST_ANIMATION_MS`     | transition length in milliseconds (`0` disables) |
//! | `RELIST_ANIMATION_SCALE`  | multiplier applied to the length (`>= 0`) |
//! | `RELIST_ANIMATION_EASING` | easing curve name, or `none` to disable   |
//!
//! # Failure Modes
//!
//! - An unparsable variable makes [`AnimatorConfig::from_env_with`] fail with
//!   a [`ConfigError`] naming it. [`AnimatorConfig::detect`] logs the error
//!   and keeps the base configuration.

use std::fmt;
use std::time::Duration;

use crate::animation::{EasingFn, FactorAnimator, ease_out_cubic, easing_by_name};

/// Environment variable holding the transition length in milliseconds.
pub const ENV_ANIMATION_MS: &str = "RELIST_ANIMATION_MS";
/// Environment variable holding the duration multiplier.
pub const ENV_ANIMATION_SCALE: &str = "RELIST_ANIMATION_SCALE";
/// Environment variable holding the easing curve name.
pub const ENV_ANIMATION_EASING: &str = "RELIST_ANIMATION_EASING";

/// Easing used when a duration is configured without a curve.
pub const DEFAULT_EASING: EasingFn = ease_out_cubic;

/// Error reading configuration from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `RELIST_ANIMATION_MS` is not a non-negative integer.
    InvalidDuration { value: String },
    /// `RELIST_ANIMATION_SCALE` is not a finite, non-negative number.
    InvalidScale { value: String },
    /// `RELIST_ANIMATION_EASING` names no known curve.
    UnknownEasing { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDuration { value } => {
                write!(f, "{ENV_ANIMATION_MS}: invalid duration {value:?}")
            }
            Self::InvalidScale { value } => {
                write!(f, "{ENV_ANIMATION_SCALE}: invalid scale {value:?}")
            }
            Self::UnknownEasing { value } => {
                write!(f, "{ENV_ANIMATION_EASING}: unknown easing {value:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// How list transitions are timed.
#[derive(Debug, Clone, Copy)]
pub struct AnimatorConfig {
    /// Base transition length.
    pub duration: Duration,
    /// Easing curve. `None` disables animation.
    pub easing: Option<EasingFn>,
    /// Multiplier applied to `duration`.
    pub duration_scale: f32,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            duration: Duration::ZERO,
            easing: None,
            duration_scale: 1.0,
        }
    }
}

impl AnimatorConfig {
    /// Animated configuration with the default easing curve.
    #[must_use]
    pub fn animated(duration: Duration) -> Self {
        Self {
            duration,
            easing: Some(DEFAULT_EASING),
            duration_scale: 1.0,
        }
    }

    /// Set the base duration.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the easing curve.
    #[must_use]
    pub fn with_easing(mut self, easing: EasingFn) -> Self {
        self.easing = Some(easing);
        self
    }

    /// Disable animation while keeping the duration.
    #[must_use]
    pub fn without_easing(mut self) -> Self {
        self.easing = None;
        self
    }

    /// Set the duration multiplier. Negative values clamp to 0; non-finite
    /// values reset it to 1.
    #[must_use]
    pub fn with_duration_scale(mut self, scale: f32) -> Self {
        self.duration_scale = if scale.is_finite() {
            scale.max(0.0)
        } else {
            1.0
        };
        self
    }

    /// Duration after scaling.
    #[must_use]
    pub fn effective_duration(&self) -> Duration {
        let secs = self.duration.as_secs_f64() * f64::from(self.duration_scale);
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    }

    /// Whether transitions animate at all.
    #[must_use]
    pub fn is_animated(&self) -> bool {
        self.easing.is_some() && !self.effective_duration().is_zero()
    }

    /// Build the stock driver, if animation is enabled.
    #[must_use]
    pub fn build_driver(&self) -> Option<FactorAnimator> {
        let easing = self.easing?;
        if !self.is_animated() {
            return None;
        }
        Some(FactorAnimator::new(self.effective_duration()).easing(easing))
    }

    /// Apply environment overrides on top of `self`, logging and ignoring
    /// them if any is invalid.
    #[must_use]
    pub fn detect(self) -> Self {
        match self.from_env_with(|key| std::env::var(key).ok()) {
            Ok(config) => config,
            Err(_err) => {
                crate::warn!(error = %_err, "ignoring animation overrides");
                self
            }
        }
    }

    /// Apply overrides from a custom environment lookup (for tests).
    pub fn from_env_with<F>(self, get_env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = self;

        if let Some(value) = get_env(ENV_ANIMATION_MS) {
            let ms = value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidDuration {
                    value: value.clone(),
                })?;
            config.duration = Duration::from_millis(ms);
            if ms > 0 && config.easing.is_none() {
                config.easing = Some(DEFAULT_EASING);
            }
        }

        if let Some(value) = get_env(ENV_ANIMATION_SCALE) {
            let scale = value
                .trim()
                .parse::<f32>()
                .ok()
                .filter(|s| s.is_finite() && *s >= 0.0)
                .ok_or_else(|| ConfigError::InvalidScale {
                    value: value.clone(),
                })?;
            config.duration_scale = scale;
        }

        if let Some(value) = get_env(ENV_ANIMATION_EASING) {
            let name = value.trim();
            if name.eq_ignore_ascii_case("none") || name.eq_ignore_ascii_case("off") {
                config.easing = None;
            } else {
                let easing = easing_by_name(name).ok_or_else(|| ConfigError::UnknownEasing {
                    value: value.clone(),
                })?;
                config.easing = Some(easing);
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{FactorDriver, linear};
    use std::collections::HashMap;

    fn map_env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn get_env<'a>(map: &'a HashMap<String, String>) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_is_not_animated() {
        let config = AnimatorConfig::default();
        assert!(!config.is_animated());
        assert!(config.build_driver().is_none());
    }

    #[test]
    fn animated_builder() {
        let config = AnimatorConfig::animated(Duration::from_millis(200));
        assert!(config.is_animated());
        let driver = config.build_driver().unwrap();
        assert_eq!(driver.duration(), Duration::from_millis(200));
        assert_eq!(driver.factor(), 0.0);
    }

    #[test]
    fn scale_applies_to_duration() {
        let config = AnimatorConfig::animated(Duration::from_millis(200)).with_duration_scale(0.5);
        assert_eq!(config.effective_duration(), Duration::from_millis(100));
        let off = config.with_duration_scale(0.0);
        assert!(!off.is_animated());
    }

    #[test]
    fn scale_sanitized() {
        let config = AnimatorConfig::default().with_duration_scale(-3.0);
        assert_eq!(config.duration_scale, 0.0);
        let config = config.with_duration_scale(f32::NAN);
        assert_eq!(config.duration_scale, 1.0);
    }

    #[test]
    fn env_enables_animation() {
        let env = map_env(&[(ENV_ANIMATION_MS, "150")]);
        let config = AnimatorConfig::default()
            .from_env_with(get_env(&env))
            .unwrap();
        assert_eq!(config.duration, Duration::from_millis(150));
        assert!(config.is_animated());
    }

    #[test]
    fn env_easing_override() {
        let env = map_env(&[(ENV_ANIMATION_EASING, "linear")]);
        let config = AnimatorConfig::animated(Duration::from_millis(100))
            .from_env_with(get_env(&env))
            .unwrap();
        let easing = config.easing.unwrap();
        assert_eq!(easing(0.5), linear(0.5));
    }

    #[test]
    fn env_easing_none_disables() {
        let env = map_env(&[(ENV_ANIMATION_EASING, "None")]);
        let config = AnimatorConfig::animated(Duration::from_millis(100))
            .from_env_with(get_env(&env))
            .unwrap();
        assert!(!config.is_animated());
    }

    #[test]
    fn env_rejects_bad_duration() {
        let env = map_env(&[(ENV_ANIMATION_MS, "fast")]);
        let err = AnimatorConfig::default()
            .from_env_with(get_env(&env))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidDuration {
                value: "fast".into()
            }
        );
        assert!(err.to_string().contains(ENV_ANIMATION_MS));
    }

    #[test]
    fn env_rejects_negative_scale() {
        let env = map_env(&[(ENV_ANIMATION_SCALE, "-1")]);
        let err = AnimatorConfig::default()
            .from_env_with(get_env(&env))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidScale { .. }));
    }

    #[test]
    fn env_rejects_unknown_easing() {
        let env = map_env(&[(ENV_ANIMATION_EASING, "bounce")]);
        let err = AnimatorConfig::default()
            .from_env_with(get_env(&env))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownEasing {
                value: "bounce".into()
            }
        );
    }

    #[test]
    fn empty_env_keeps_base() {
        let env = map_env(&[]);
        let base = AnimatorConfig::animated(Duration::from_millis(80)).with_duration_scale(0.5);
        let config = base.from_env_with(get_env(&env)).unwrap();
        assert_eq!(config.duration, base.duration);
        assert_eq!(config.duration_scale, base.duration_scale);
        let easing = config.easing.unwrap();
        for t in [0.0, 0.25, 0.5, 1.0] {
            assert_eq!(easing(t), DEFAULT_EASING(t));
        }
    }

    #[test]
    fn easing_survives_unrelated_overrides() {
        let env = map_env(&[(ENV_ANIMATION_SCALE, "2")]);
        let config = AnimatorConfig::default()
            .with_easing(linear)
            .from_env_with(get_env(&env))
            .unwrap();
        assert_eq!(config.duration_scale, 2.0);
        let easing = config.easing.unwrap();
        assert_eq!(easing(0.3), linear(0.3));
    }
}
