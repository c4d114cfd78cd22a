//! Staggered start delays for groups of children

use serde::{Deserialize, Serialize};

/// Order in which children start
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaggerDirection {
    /// First to last
    #[default]
    Forward,
    /// Last to first
    Reverse,
    /// Center outward
    FromCenter,
}

/// Per-child delay schedule: `base + step * effective_index`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaggerConfig {
    /// Delay before the first child starts (ms)
    pub base_delay_ms: u32,
    /// Delay between consecutive children (ms)
    pub delay_ms: u32,
    pub direction: StaggerDirection,
    /// Children past this index all share the last delay
    pub limit: Option<usize>,
}

impl Default for StaggerConfig {
    fn default() -> Self {
        Self::new(100)
    }
}

impl StaggerConfig {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            base_delay_ms: 0,
            delay_ms,
            direction: StaggerDirection::Forward,
            limit: None,
        }
    }

    pub fn base_delay(mut self, delay_ms: u32) -> Self {
        self.base_delay_ms = delay_ms;
        self
    }

    pub fn reverse(mut self) -> Self {
        self.direction = StaggerDirection::Reverse;
        self
    }

    pub fn from_center(mut self) -> Self {
        self.direction = StaggerDirection::FromCenter;
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Delay for child `index` out of `total`
    pub fn delay_for_index(&self, index: usize, total: usize) -> u32 {
        let effective_index = match self.direction {
            StaggerDirection::Forward => index,
            StaggerDirection::Reverse => total.saturating_sub(1).saturating_sub(index),
            StaggerDirection::FromCenter => index.abs_diff(total / 2),
        };

        let capped = match self.limit {
            Some(limit) => effective_index.min(limit),
            None => effective_index,
        };

        self.base_delay_ms
            .saturating_add(self.delay_ms.saturating_mul(capped as u32))
    }

    /// Delays for all `total` children, in child order
    pub fn delays(&self, total: usize) -> Vec<u32> {
        (0..total).map(|i| self.delay_for_index(i, total)).collect()
    }

    /// Time from the first child starting until the last child finishes
    pub fn total_duration_ms(&self, total: usize, child_duration_ms: u32) -> u32 {
        self.delays(total)
            .into_iter()
            .max()
            .map_or(0, |delay| delay + child_duration_ms)
    }
}
