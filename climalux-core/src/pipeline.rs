//! Bounded channel plumbing
//!
//! Each sampling task owns an [`Outlet`] on its own bounded channel. A
//! send waits at most until a caller-supplied deadline resolves; if the
//! channel is still full the reading is dropped and counted. The next
//! sampling period supersedes it.

use core::future::Future;

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::{Channel, Sender};

use crate::reading::Reading;

/// Channel capacity for light readings
pub const LIGHT_CHANNEL_CAPACITY: usize = 5;

/// Channel capacity for climate readings
pub const CLIMATE_CHANNEL_CAPACITY: usize = 5;

/// Channel carrying readings from one producer to the aggregator
pub type ReadingChannel<M, const N: usize> = Channel<M, Reading, N>;

/// Reading dropped because the channel stayed full until the deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelFull;

/// Producer end of a reading channel with a drop-on-timeout policy
pub struct Outlet<'ch, M: RawMutex, const N: usize> {
    sender: Sender<'ch, M, Reading, N>,
    dropped: u32,
}

impl<'ch, M: RawMutex, const N: usize> Outlet<'ch, M, N> {
    /// Wrap a channel sender
    pub fn new(sender: Sender<'ch, M, Reading, N>) -> Self {
        Self { sender, dropped: 0 }
    }

    /// Send `reading`, giving up when `deadline` completes first
    ///
    /// The send is polled before the deadline, so a channel with free
    /// space always accepts the reading even if the deadline is already
    /// due.
    pub async fn offer<D: Future>(&mut self, reading: Reading, deadline: D) -> Result<(), ChannelFull> {
        match select(self.sender.send(reading), deadline).await {
            Either::First(()) => Ok(()),
            Either::Second(_) => {
                self.dropped = self.dropped.wrapping_add(1);
                Err(ChannelFull)
            }
        }
    }

    /// Readings dropped since startup
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}
