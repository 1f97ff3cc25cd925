//! Clock and game configuration.

/// Number of selectable rows on the game screen (red, green, blue, done).
pub const NUM_TEST_OPTIONS: usize = 4;

/// Length of the predetermined "random" number table.
pub const NUM_RANDOM_NUMBERS: usize = 5;

/// How long the title screen stays up after power-on.
pub const TITLE_SCREEN_WAIT_MS: u64 = 1000;

/// How long the result screen stays up before the next round.
pub const RESULT_SCREEN_WAIT_MS: u64 = 2000;

const MS_DIVISION_FACTOR: u32 = 1_000;
const US_DIVISION_FACTOR: u32 = 1_000_000;

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Prescaler of zero.
    ZeroPrescaler,

    /// Counter clock below 1 MHz, which leaves no whole cycles per microsecond.
    CounterClockTooSlow {
        /// Effective counter frequency (system clock / prescaler).
        counter_hz: u32,
    },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroPrescaler => {
                write!(f, "prescaler must be at least 1")
            }
            ConfigError::CounterClockTooSlow { counter_hz } => {
                write!(
                    f,
                    "counter clock of {} Hz is below the 1 MHz needed for microsecond timing",
                    counter_hz
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Hardware timing configuration shared by the clock and every software timer.
///
/// Only obtainable through [`ClockConfig::new`] or [`ClockConfig::DEFAULT`], so
/// the derived divisors are always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockConfig {
    system_clock_hz: u32,
    prescaler: u32,
    load_value: u32,
    flash_wait_states: u8,
}

impl ClockConfig {
    /// 48 MHz core clock, prescaler 1, full 32-bit period, 2 flash wait states.
    pub const DEFAULT: Self = Self {
        system_clock_hz: 48_000_000,
        prescaler: 1,
        load_value: u32::MAX,
        flash_wait_states: 2,
    };

    /// Creates a validated configuration.
    ///
    /// # Arguments
    /// * `system_clock_hz` - Core clock frequency after bring-up
    /// * `prescaler` - Divider between the core clock and the counter
    /// * `load_value` - Value the counter reloads with after reaching zero
    /// * `flash_wait_states` - Flash wait states required at `system_clock_hz`
    pub const fn new(
        system_clock_hz: u32,
        prescaler: u32,
        load_value: u32,
        flash_wait_states: u8,
    ) -> Result<Self, ConfigError> {
        if prescaler == 0 {
            return Err(ConfigError::ZeroPrescaler);
        }

        let counter_hz = system_clock_hz / prescaler;
        if counter_hz < US_DIVISION_FACTOR {
            return Err(ConfigError::CounterClockTooSlow { counter_hz });
        }

        Ok(Self {
            system_clock_hz,
            prescaler,
            load_value,
            flash_wait_states,
        })
    }

    pub const fn system_clock_hz(&self) -> u32 {
        self.system_clock_hz
    }

    pub const fn prescaler(&self) -> u32 {
        self.prescaler
    }

    pub const fn load_value(&self) -> u32 {
        self.load_value
    }

    pub const fn flash_wait_states(&self) -> u8 {
        self.flash_wait_states
    }

    /// Frequency the counter actually ticks at.
    #[inline]
    pub const fn counter_hz(&self) -> u32 {
        self.system_clock_hz / self.prescaler
    }

    /// Counter cycles per millisecond, truncated.
    #[inline]
    pub const fn cycles_per_ms(&self) -> u64 {
        (self.counter_hz() / MS_DIVISION_FACTOR) as u64
    }

    /// Counter cycles per microsecond, truncated. Never zero.
    #[inline]
    pub const fn cycles_per_us(&self) -> u64 {
        (self.counter_hz() / US_DIVISION_FACTOR) as u64
    }

    /// Cycles in one full counter period (one rollover).
    #[inline]
    pub const fn period_cycles(&self) -> u64 {
        self.load_value as u64 + 1
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Game timing and the fixed table the LED patterns are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GameConfig {
    /// Title screen duration in milliseconds.
    pub title_wait_ms: u64,

    /// Result screen duration in milliseconds.
    pub result_wait_ms: u64,

    /// Predetermined "random" numbers; only the low three bits are used.
    pub random_numbers: [u8; NUM_RANDOM_NUMBERS],
}

impl GameConfig {
    pub const DEFAULT: Self = Self {
        title_wait_ms: TITLE_SCREEN_WAIT_MS,
        result_wait_ms: RESULT_SCREEN_WAIT_MS,
        random_numbers: [5, 2, 7, 1, 3],
    };
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_clock_matches_48mhz_board() {
        let config = ClockConfig::DEFAULT;
        assert_eq!(config.counter_hz(), 48_000_000);
        assert_eq!(config.cycles_per_ms(), 48_000);
        assert_eq!(config.cycles_per_us(), 48);
        assert_eq!(config.period_cycles(), 1u64 << 32);
    }

    #[test]
    fn zero_prescaler_is_rejected() {
        assert_eq!(
            ClockConfig::new(48_000_000, 0, 1000, 2),
            Err(ConfigError::ZeroPrescaler)
        );
    }

    #[test]
    fn sub_megahertz_counter_is_rejected() {
        assert_eq!(
            ClockConfig::new(48_000_000, 64, 1000, 2),
            Err(ConfigError::CounterClockTooSlow { counter_hz: 750_000 })
        );
    }

    #[test]
    fn prescaler_divides_counter_clock() {
        let config = ClockConfig::new(48_000_000, 4, 999, 2).unwrap();
        assert_eq!(config.counter_hz(), 12_000_000);
        assert_eq!(config.cycles_per_ms(), 12_000);
        assert_eq!(config.cycles_per_us(), 12);
        assert_eq!(config.period_cycles(), 1000);
    }
}
