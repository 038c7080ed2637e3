#![forbid(unsafe_code)]

//! Deterministic fixtures for tests.
//!
//! Centralizes seed and fake-clock selection so scenario tests produce
//! stable pixel hashes when pinned, and explore fresh populations on
//! ordinary local runs.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::FrameDriver;

/// Shared deterministic fixture for a test run.
#[derive(Debug, Clone)]
pub struct DeterminismFixture {
    seed: u64,
    time_step: Duration,
}

impl DeterminismFixture {
    /// Create a fixture honoring the `STARLIT_TEST_*` environment
    /// overrides. An explicit `STARLIT_TEST_SEED` (or `STARLIT_SEED`)
    /// always wins; otherwise deterministic mode pins `default_seed`, and
    /// ordinary runs perturb it per process so repeated local runs walk
    /// different populations.
    #[must_use]
    pub fn new(default_seed: u64) -> Self {
        let seed = match env_u64("STARLIT_TEST_SEED").or_else(|| env_u64("STARLIT_SEED")) {
            Some(seed) => seed,
            None if deterministic_mode() => default_seed,
            None => default_seed ^ (u64::from(std::process::id()) << 32) ^ unix_secs(),
        };
        Self::new_with(seed, Duration::from_millis(fixture_time_step_ms()))
    }

    /// Create a fixture with explicit configuration (used by tests).
    #[must_use]
    pub const fn new_with(seed: u64, time_step: Duration) -> Self {
        Self { seed, time_step }
    }

    /// Current deterministic seed.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Per-frame step of the fake clock.
    #[must_use]
    pub const fn time_step(&self) -> Duration {
        self.time_step
    }

    /// A frame driver ticking at the fixture's step.
    #[must_use]
    pub fn driver(&self) -> FrameDriver {
        FrameDriver::new(self.time_step)
    }
}

/// True when deterministic mode is enabled via environment.
#[must_use]
pub fn deterministic_mode() -> bool {
    env_flag("STARLIT_TEST_DETERMINISTIC") || env_flag("STARLIT_DETERMINISTIC")
}

/// Time step in milliseconds for deterministic clocks.
#[must_use]
pub fn fixture_time_step_ms() -> u64 {
    env_u64("STARLIT_TEST_TIME_STEP_MS").unwrap_or(16)
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

fn env_flag(key: &str) -> bool {
    matches!(
        std::env::var(key).as_deref(),
        Ok("1") | Ok("true") | Ok("TRUE")
    )
}

fn unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
