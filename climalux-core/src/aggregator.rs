//! Aggregator
//!
//! Single consumer of both sampling channels. Each cycle it takes at most
//! one pending reading from each channel without blocking, merges them
//! into the [`Snapshot`], and hands back a copy when the dashboard needs a
//! redraw.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Receiver;

use crate::reading::Reading;
use crate::snapshot::{Merge, Snapshot};

/// Aggregator counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AggregatorStats {
    /// Readings drained from the channels
    pub received: u32,
    /// Invalid readings that did not overwrite a valid field
    pub rejected_invalid: u32,
    /// Snapshots handed to the renderer
    pub renders: u32,
}

/// Merges producer readings into the owned snapshot
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    snapshot: Snapshot,
    stats: AggregatorStats,
}

impl Aggregator {
    /// Create an aggregator with an empty snapshot
    pub const fn new() -> Self {
        Self {
            snapshot: Snapshot::new(),
            stats: AggregatorStats {
                received: 0,
                rejected_invalid: 0,
                renders: 0,
            },
        }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Counters since startup
    pub fn stats(&self) -> AggregatorStats {
        self.stats
    }

    /// Run one cycle with whatever each channel had pending
    ///
    /// Returns a copy of the snapshot when it changed, i.e. when the
    /// dashboard should be redrawn. Empty channels never trigger a render.
    pub fn cycle(&mut self, light: Option<Reading>, climate: Option<Reading>) -> Option<Snapshot> {
        let mut changed = false;

        for reading in [light, climate].into_iter().flatten() {
            self.stats.received = self.stats.received.wrapping_add(1);
            match self.snapshot.apply(reading) {
                Merge::Updated => changed = true,
                Merge::Unchanged => {}
                Merge::KeptValid => {
                    self.stats.rejected_invalid = self.stats.rejected_invalid.wrapping_add(1);
                }
            }
        }

        if changed {
            self.stats.renders = self.stats.renders.wrapping_add(1);
            Some(self.snapshot)
        } else {
            None
        }
    }

    /// Drain at most one reading from each channel and run a cycle
    pub fn poll<M: RawMutex, const L: usize, const C: usize>(
        &mut self,
        light: &Receiver<'_, M, Reading, L>,
        climate: &Receiver<'_, M, Reading, C>,
    ) -> Option<Snapshot> {
        let light = light.try_receive().ok();
        let climate = climate.try_receive().ok();
        self.cycle(light, climate)
    }
}
