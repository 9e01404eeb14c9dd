use embassy_time::Duration;

/// Timing configuration of the push-button driver.
///
/// Thresholds are converted to tick counts once, at [`init`](super::init),
/// by truncating division by `interval`.
///
/// # Example
///
/// ```ignore
/// let config = PushButtonConfig {
///     long_press: Duration::from_millis(800),
///     ..Default::default()
/// };
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PushButtonConfig {
    /// Sampling period (one tick).
    pub interval: Duration,
    /// Minimum hold time for a short press.
    pub short_press: Duration,
    /// Minimum hold time for a long press.
    pub long_press: Duration,
}

impl Default for PushButtonConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(10),
            short_press: Duration::from_millis(50),
            long_press: Duration::from_millis(1000),
        }
    }
}

impl PushButtonConfig {
    /// Convert the configured durations to tick thresholds.
    pub fn thresholds(&self) -> Result<Thresholds, ConfigError> {
        let interval = self.interval.as_ticks();
        if interval == 0 {
            return Err(ConfigError::ZeroInterval);
        }

        let short_ticks = self.short_press.as_ticks() / interval;
        let long_ticks = self.long_press.as_ticks() / interval;

        if short_ticks > long_ticks {
            return Err(ConfigError::ThresholdOrder {
                short_ticks,
                long_ticks,
            });
        }
        if long_ticks > u16::MAX as u64 {
            return Err(ConfigError::LongThresholdTooLarge {
                long_ticks,
                max: u16::MAX,
            });
        }

        Ok(Thresholds {
            short_ticks: short_ticks as u16,
            long_ticks: long_ticks as u16,
        })
    }
}

/// Press classification thresholds in ticks.
/// Invariant: `short_ticks <= long_ticks`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Thresholds {
    short_ticks: u16,
    long_ticks: u16,
}

impl Thresholds {
    /// Build thresholds directly from tick counts.
    pub const fn from_ticks(short_ticks: u16, long_ticks: u16) -> Result<Self, ConfigError> {
        if short_ticks > long_ticks {
            return Err(ConfigError::ThresholdOrder {
                short_ticks: short_ticks as u64,
                long_ticks: long_ticks as u64,
            });
        }
        Ok(Self {
            short_ticks,
            long_ticks,
        })
    }

    pub const fn short_ticks(&self) -> u16 {
        self.short_ticks
    }

    pub const fn long_ticks(&self) -> u16 {
        self.long_ticks
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    #[error("Tick interval must not be zero")]
    ZeroInterval,
    #[error("Short press threshold exceeds long press threshold: {short_ticks} > {long_ticks} ticks")]
    ThresholdOrder { short_ticks: u64, long_ticks: u64 },
    #[error("Long press threshold does not fit the press counter: {long_ticks} > {max} ticks")]
    LongThresholdTooLarge { long_ticks: u64, max: u16 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_reference_board() {
        let thresholds = PushButtonConfig::default().thresholds().unwrap();
        assert_eq!(thresholds.short_ticks(), 5);
        assert_eq!(thresholds.long_ticks(), 100);
    }

    #[test]
    fn thresholds_truncate() {
        let config = PushButtonConfig {
            interval: Duration::from_millis(10),
            short_press: Duration::from_millis(59),
            long_press: Duration::from_millis(999),
        };
        let thresholds = config.thresholds().unwrap();
        assert_eq!(thresholds.short_ticks(), 5);
        assert_eq!(thresholds.long_ticks(), 99);
    }

    #[test]
    fn zero_interval_is_rejected() {
        let config = PushButtonConfig {
            interval: Duration::from_ticks(0),
            ..Default::default()
        };
        assert_eq!(config.thresholds(), Err(ConfigError::ZeroInterval));
    }

    #[test]
    fn inverted_thresholds_are_rejected() {
        let config = PushButtonConfig {
            short_press: Duration::from_millis(500),
            long_press: Duration::from_millis(100),
            ..Default::default()
        };
        assert_eq!(
            config.thresholds(),
            Err(ConfigError::ThresholdOrder {
                short_ticks: 50,
                long_ticks: 10
            })
        );
        assert!(Thresholds::from_ticks(3, 2).is_err());
        assert!(Thresholds::from_ticks(2, 2).is_ok());
    }

    #[test]
    fn long_threshold_must_fit_counter() {
        let config = PushButtonConfig {
            interval: Duration::from_millis(1),
            short_press: Duration::from_millis(50),
            long_press: Duration::from_secs(70),
        };
        assert!(matches!(
            config.thresholds(),
            Err(ConfigError::LongThresholdTooLarge { .. })
        ));
    }
}
