//! Dashboard snapshot
//!
//! The latest merged view of both sensors. Owned and mutated only by the
//! aggregator; the renderer gets a `Copy`.

use crate::reading::{ClimateReading, LightReading, Reading};

/// Latest known state of every sensor field
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    /// Last light reading, or None if never received
    pub light: Option<LightReading>,
    /// Last climate reading, or None if never received
    pub climate: Option<ClimateReading>,
    /// Latest source timestamp seen (ms); never decreases
    pub timestamp_ms: u64,
}

/// Outcome of merging one reading into the snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Merge {
    /// Field overwritten with a different value
    Updated,
    /// Field overwritten with an identical value
    Unchanged,
    /// Invalid reading ignored because the field already holds a valid one
    KeptValid,
}

impl Snapshot {
    /// Create an empty snapshot
    pub const fn new() -> Self {
        Self {
            light: None,
            climate: None,
            timestamp_ms: 0,
        }
    }

    /// Merge a reading into its field
    ///
    /// Last write wins, except that an invalid reading never replaces a
    /// valid one. The first reading for a field is always stored, valid or
    /// not, so "sampling failed" can be told apart from "never sampled".
    pub fn apply(&mut self, reading: Reading) -> Merge {
        let merge = match reading {
            Reading::Light(r) => merge_field(&mut self.light, r, r.valid, |c| c.valid),
            Reading::Climate(r) => merge_field(&mut self.climate, r, r.valid, |c| c.valid),
        };
        self.refresh_timestamp();
        merge
    }

    /// Whether any field holds real values
    pub fn has_valid_data(&self) -> bool {
        self.light.is_some_and(|l| l.valid) || self.climate.is_some_and(|c| c.valid)
    }

    /// Advance the timestamp to the later of the two field timestamps
    fn refresh_timestamp(&mut self) {
        let light_ts = self.light.map_or(0, |l| l.timestamp_ms);
        let climate_ts = self.climate.map_or(0, |c| c.timestamp_ms);
        self.timestamp_ms = self.timestamp_ms.max(light_ts).max(climate_ts);
    }
}

fn merge_field<T: Copy + PartialEq>(
    slot: &mut Option<T>,
    incoming: T,
    incoming_valid: bool,
    is_valid: impl Fn(&T) -> bool,
) -> Merge {
    match slot {
        Some(current) if is_valid(current) && !incoming_valid => Merge::KeptValid,
        Some(current) if *current == incoming => Merge::Unchanged,
        _ => {
            *slot = Some(incoming);
            Merge::Updated
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::ClimateMeasurement;
    use proptest::prelude::*;

    fn climate(c: f32, h: f32, t: u64) -> Reading {
        ClimateReading::new(ClimateMeasurement::new(c, h), t).into()
    }

    #[test]
    fn test_empty_snapshot() {
        let snap = Snapshot::new();
        assert!(snap.light.is_none());
        assert!(snap.climate.is_none());
        assert!(!snap.has_valid_data());
        assert_eq!(snap, Snapshot::default());
    }

    #[test]
    fn test_first_invalid_is_stored() {
        let mut snap = Snapshot::new();
        assert_eq!(
            snap.apply(ClimateReading::invalid(3000).into()),
            Merge::Updated
        );
        let stored = snap.climate.unwrap();
        assert!(!stored.valid);
        assert!(!snap.has_valid_data());
    }

    #[test]
    fn test_invalid_does_not_clobber_valid() {
        let mut snap = Snapshot::new();
        snap.apply(climate(23.5, 60.2, 3000));

        let merge = snap.apply(ClimateReading::invalid(6000).into());
        assert_eq!(merge, Merge::KeptValid);

        let stored = snap.climate.unwrap();
        assert!(stored.valid);
        assert_eq!(stored.celsius, 23.5);
        assert_eq!(stored.timestamp_ms, 3000);
    }

    #[test]
    fn test_valid_replaces_invalid() {
        let mut snap = Snapshot::new();
        snap.apply(LightReading::invalid(1000).into());
        snap.apply(LightReading::new(300, 2000).into());
        assert_eq!(snap.light, Some(LightReading::new(300, 2000)));
    }

    #[test]
    fn test_identical_reading_is_unchanged() {
        let mut snap = Snapshot::new();
        snap.apply(LightReading::new(300, 2000).into());
        assert_eq!(
            snap.apply(LightReading::new(300, 2000).into()),
            Merge::Unchanged
        );
    }

    #[test]
    fn test_timestamp_is_latest_source() {
        let mut snap = Snapshot::new();
        snap.apply(LightReading::new(512, 1000).into());
        assert_eq!(snap.timestamp_ms, 1000);
        snap.apply(climate(23.5, 60.2, 3000));
        assert_eq!(snap.timestamp_ms, 3000);
    }

    proptest! {
        #[test]
        fn prop_timestamp_never_decreases(
            steps in proptest::collection::vec((any::<bool>(), any::<bool>(), 0u64..100_000), 1..50)
        ) {
            let mut snap = Snapshot::new();
            let mut last = 0;
            for (is_light, valid, t) in steps {
                let reading: Reading = match (is_light, valid) {
                    (true, true) => LightReading::new(100, t).into(),
                    (true, false) => LightReading::invalid(t).into(),
                    (false, true) => climate(20.0, 50.0, t),
                    (false, false) => ClimateReading::invalid(t).into(),
                };
                snap.apply(reading);
                prop_assert!(snap.timestamp_ms >= last);
                last = snap.timestamp_ms;
            }
        }
    }
}
