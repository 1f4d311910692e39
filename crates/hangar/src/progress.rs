//! Loading-progress smoothing.
//!
//! Asset loaders report progress in large, irregular jumps and can stall
//! for seconds while a large binary downloads. [`ProgressSmoother`] turns
//! that signal into a displayed percentage that keeps moving:
//!
//! 1. When the real progress has not changed for longer than the stuck
//!    threshold, a synthetic bonus grows linearly with the extra stuck time.
//!    The bonus is capped both in size and so that real + bonus stays below
//!    the loading ceiling.
//! 2. The displayed value eases towards the target by a fraction of the gap
//!    each tick and snaps once the gap is tiny.
//!
//! The displayed value never decreases, never exceeds the ceiling while
//! loading, and only reaches 100 once the loader reports it is done.
//!
//! The smoother is driven by an external fixed-rate ticker and holds no
//! clock of its own, so it can be tested without a UI.

use std::time::Duration;

/// Tuning for [`ProgressSmoother`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothingConfig {
    /// Interval between ticks.
    pub tick_interval: Duration,
    /// How long progress must be unchanged before the bonus starts.
    pub stuck_threshold: Duration,
    /// Bonus percentage points gained per millisecond beyond the threshold.
    pub bonus_per_ms: f32,
    /// Largest bonus ever added on top of the real progress.
    pub max_bonus: f32,
    /// Highest value displayed while loading is active.
    pub ceiling: f32,
    /// Fraction of the remaining gap covered per tick.
    pub catch_up_rate: f32,
    /// Gap below which the displayed value snaps to the target.
    pub snap_epsilon: f32,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(50),
            stuck_threshold: Duration::from_millis(500),
            bonus_per_ms: 0.002,
            max_bonus: 15.0,
            ceiling: 95.0,
            catch_up_rate: 0.08,
            snap_epsilon: 0.1,
        }
    }
}

/// Smooths a monotonically non-decreasing progress signal.
#[derive(Debug, Clone)]
pub struct ProgressSmoother {
    config: SmoothingConfig,
    displayed: f32,
    last_real: f32,
    stuck: Duration,
    bonus: f32,
}

impl Default for ProgressSmoother {
    fn default() -> Self {
        Self::new(SmoothingConfig::default())
    }
}

impl ProgressSmoother {
    #[must_use]
    pub fn new(config: SmoothingConfig) -> Self {
        Self {
            config,
            displayed: 0.0,
            last_real: 0.0,
            stuck: Duration::ZERO,
            bonus: 0.0,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SmoothingConfig {
        &self.config
    }

    /// The value to display, in 0.0..=100.0.
    #[must_use]
    pub fn displayed(&self) -> f32 {
        self.displayed
    }

    /// The synthetic bonus currently included in the target.
    #[must_use]
    pub fn bonus(&self) -> f32 {
        self.bonus
    }

    /// How long the real progress has been unchanged.
    #[must_use]
    pub fn stuck_duration(&self) -> Duration {
        self.stuck
    }

    /// Whether loading finished and the display caught up with it.
    #[must_use]
    pub fn is_complete(&self, active: bool) -> bool {
        !active && self.displayed >= self.last_real.max(100.0) - f32::EPSILON
    }

    /// Start over, e.g. when a different model begins loading.
    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }

    /// Advance by one tick.
    ///
    /// `real` is the loader's progress in 0.0..=100.0 and `active` whether it
    /// is still loading. Returns the new displayed value.
    #[allow(clippy::float_cmp)]
    pub fn tick(&mut self, real: f32, active: bool) -> f32 {
        let real = real.clamp(0.0, 100.0);

        if real == self.last_real {
            self.stuck += self.config.tick_interval;
        } else {
            self.stuck = Duration::ZERO;
            self.last_real = real;
        }

        let target = if active {
            self.bonus = self.synthetic_bonus(real);
            (real + self.bonus).min(self.config.ceiling)
        } else {
            self.bonus = 0.0;
            real
        };

        let gap = target - self.displayed;
        if gap <= 0.0 {
            // The target fell behind (real progress moved after a bonus was
            // shown). Hold rather than move backwards.
            return self.displayed;
        }

        self.displayed = if gap < self.config.snap_epsilon {
            target
        } else {
            self.displayed + gap * self.config.catch_up_rate
        };
        self.displayed
    }

    fn synthetic_bonus(&self, real: f32) -> f32 {
        let config = &self.config;
        if self.stuck <= config.stuck_threshold || real >= config.ceiling {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let extra_ms = (self.stuck - config.stuck_threshold).as_millis() as f32;
        let cap = config.max_bonus.min(config.ceiling - real);
        (extra_ms * config.bonus_per_ms).min(cap)
    }
}

/// A loading status line shown once progress reaches `threshold`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusMessage {
    pub threshold: f32,
    pub text: &'static str,
}

/// Status lines shown by the loading overlay, ordered by threshold.
pub const LOADING_MESSAGES: [StatusMessage; 7] = [
    StatusMessage {
        threshold: 0.0,
        text: "Establishing secure connection...",
    },
    StatusMessage {
        threshold: 10.0,
        text: "Loading ship geometry data...",
    },
    StatusMessage {
        threshold: 30.0,
        text: "Processing hull materials...",
    },
    StatusMessage {
        threshold: 50.0,
        text: "Applying faction textures...",
    },
    StatusMessage {
        threshold: 70.0,
        text: "Compiling render shaders...",
    },
    StatusMessage {
        threshold: 85.0,
        text: "Initializing holographic display...",
    },
    StatusMessage {
        threshold: 95.0,
        text: "Systems coming online...",
    },
];

/// Pick the message with the highest threshold not above `progress`.
///
/// Ties go to the last-defined message. Falls back to the first message
/// when none qualifies, and to an empty string for an empty list.
#[must_use]
pub fn status_message(progress: f32, messages: &[StatusMessage]) -> &'static str {
    messages
        .iter()
        .rev()
        .find(|message| progress >= message.threshold)
        .or_else(|| messages.first())
        .map_or("", |message| message.text)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Number of ticks covering `ms` milliseconds at the default rate.
    fn ticks(ms: u64) -> usize {
        usize::try_from(ms / 50).unwrap()
    }

    #[test]
    fn test_stall_engages_bonus_and_completion_reaches_100() {
        let mut smoother = ProgressSmoother::default();
        let mut previous = smoother.tick(0.0, true);
        let mut exceeded_real = false;

        for _ in 0..ticks(2000) {
            let shown = smoother.tick(40.0, true);
            assert!(shown >= previous, "displayed value decreased");
            assert!(shown <= 95.0);
            exceeded_real |= shown > 40.0;
            previous = shown;
        }
        assert!(exceeded_real, "synthetic bonus never engaged");
        assert!(smoother.bonus() > 0.0);

        for _ in 0..200 {
            let shown = smoother.tick(100.0, false);
            assert!(shown >= previous);
            previous = shown;
        }
        assert!((smoother.displayed() - 100.0).abs() < f32::EPSILON);
        assert!(smoother.is_complete(false));
    }

    #[test]
    fn test_no_bonus_before_threshold() {
        let mut smoother = ProgressSmoother::default();
        smoother.tick(20.0, true);
        for _ in 0..ticks(500) {
            smoother.tick(20.0, true);
        }
        assert_eq!(smoother.stuck_duration(), Duration::from_millis(500));
        assert!(smoother.bonus().abs() < f32::EPSILON);

        smoother.tick(20.0, true);
        assert!(smoother.bonus() > 0.0);
    }

    #[test]
    fn test_bonus_is_capped() {
        let mut smoother = ProgressSmoother::default();
        smoother.tick(10.0, true);
        for _ in 0..ticks(60_000) {
            smoother.tick(10.0, true);
        }
        assert!((smoother.bonus() - 15.0).abs() < f32::EPSILON);
        assert!((smoother.displayed() - 25.0).abs() < f32::EPSILON);

        let mut near_end = ProgressSmoother::default();
        near_end.tick(90.0, true);
        for _ in 0..ticks(60_000) {
            near_end.tick(90.0, true);
        }
        assert!((near_end.bonus() - 5.0).abs() < f32::EPSILON);
        assert!((near_end.displayed() - 95.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_ceiling_holds_while_loader_overreports() {
        let mut smoother = ProgressSmoother::default();
        for _ in 0..500 {
            assert!(smoother.tick(99.0, true) <= 95.0);
        }
        assert!(!smoother.is_complete(true));
    }

    #[test]
    fn test_holds_when_real_progress_moves_below_display() {
        let mut smoother = ProgressSmoother::default();
        smoother.tick(10.0, true);
        for _ in 0..ticks(60_000) {
            smoother.tick(10.0, true);
        }
        let before = smoother.displayed();
        // Real progress moves, resetting the stuck timer and the bonus.
        let after = smoother.tick(12.0, true);
        assert!((after - before).abs() < f32::EPSILON);
        assert!(smoother.bonus().abs() < f32::EPSILON);
    }

    #[test]
    fn test_reset() {
        let mut smoother = ProgressSmoother::default();
        for _ in 0..100 {
            smoother.tick(100.0, false);
        }
        smoother.reset();
        assert!(smoother.displayed().abs() < f32::EPSILON);
        assert_eq!(smoother.stuck_duration(), Duration::ZERO);
    }

    #[test]
    fn test_status_message_selection() {
        assert_eq!(
            status_message(62.0, &LOADING_MESSAGES),
            "Applying faction textures..."
        );
        assert_eq!(
            status_message(0.0, &LOADING_MESSAGES),
            "Establishing secure connection..."
        );
        assert_eq!(status_message(100.0, &LOADING_MESSAGES), "Systems coming online...");
        assert_eq!(status_message(-1.0, &LOADING_MESSAGES), LOADING_MESSAGES[0].text);
        assert_eq!(status_message(50.0, &[]), "");
    }

    #[test]
    fn test_status_message_ties_prefer_last_defined() {
        let messages = [
            StatusMessage {
                threshold: 10.0,
                text: "first",
            },
            StatusMessage {
                threshold: 10.0,
                text: "second",
            },
        ];
        assert_eq!(status_message(12.0, &messages), "second");
    }

    mod proptests {
        use proptest::prelude::*;

        use super::super::*;

        proptest! {
            #[test]
            fn displayed_never_decreases_and_respects_ceiling(
                steps in prop::collection::vec((0u8..=3, 1usize..60), 1..20),
            ) {
                let mut smoother = ProgressSmoother::default();
                let mut real = 0.0_f32;
                let mut previous = 0.0_f32;
                for (increment, hold) in steps {
                    real = (real + f32::from(increment) * 7.5).min(100.0);
                    for _ in 0..hold {
                        let shown = smoother.tick(real, true);
                        prop_assert!(shown >= previous);
                        prop_assert!(shown <= 95.0);
                        previous = shown;
                    }
                }
                for _ in 0..400 {
                    let shown = smoother.tick(100.0, false);
                    prop_assert!(shown >= previous);
                    previous = shown;
                }
                prop_assert!(smoother.is_complete(false));
            }
        }
    }
}
