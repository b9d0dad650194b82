// Runtime settings shared by the driver and the UI

use crate::algorithms::Limits;
use crate::driver::Speed;

/// Default history budget: 64 MiB of estimated snapshot size
pub const DEFAULT_HISTORY_LIMIT: usize = 64 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Speed a run starts at, and returns to on reset
    pub speed: Speed,
    pub limits: Limits,
    /// Estimated bytes of snapshots kept for stepping back
    pub history_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            speed: Speed::Normal,
            limits: Limits::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl Settings {
    pub fn with_speed(mut self, speed: Speed) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }
}
