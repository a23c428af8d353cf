//! Per-hemisphere crossing bookkeeping

use crate::crossing::{Crossing, CrossingSlot, Direction, Hemisphere};
use crate::epoch::Epoch;
use crate::observer::{SegmentEvent, SegmentObserver};
use crate::pass::Pass;

/// Start (poleward) and end (equatorward) crossings of one hemisphere, in
/// scan order, with placeholders where a crossing was inferred missing.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct HemisphereLedger<T> {
    hemisphere: Hemisphere,
    starts: Vec<CrossingSlot<T>>,
    ends: Vec<CrossingSlot<T>>,
}

impl<T: Epoch> HemisphereLedger<T> {
    pub(crate) fn new(hemisphere: Hemisphere) -> Self {
        Self {
            hemisphere,
            starts: Vec::new(),
            ends: Vec::new(),
        }
    }

    pub(crate) fn starts(&self) -> &[CrossingSlot<T>] {
        &self.starts
    }

    pub(crate) fn ends(&self) -> &[CrossingSlot<T>] {
        &self.ends
    }

    /// Append a crossing to the list of its kind.
    ///
    /// If it lands more than `gap_threshold_s` after the previous crossing of
    /// the same kind, exactly one placeholder goes in between, however long
    /// the gap.
    pub(crate) fn record<O: SegmentObserver<T>>(
        &mut self,
        crossing: Crossing<T>,
        gap_threshold_s: f64,
        observer: &mut O,
    ) {
        let hemisphere = self.hemisphere;
        let list = match crossing.direction {
            Direction::Poleward => &mut self.starts,
            Direction::Equatorward => &mut self.ends,
        };

        if let Some(CrossingSlot::Observed(previous)) = list.last() {
            let gap_s = crossing.time.seconds_since(&previous.time);
            if gap_s > gap_threshold_s {
                observer.on_event(&SegmentEvent::GapInferred {
                    hemisphere,
                    direction: crossing.direction,
                    previous: previous.time,
                    next: crossing.time,
                    gap_s,
                });
                list.push(CrossingSlot::Placeholder);
            }
        }
        list.push(CrossingSlot::Observed(crossing));
    }

    /// Drop a leading end that precedes the first start (data began
    /// mid-pass) and a trailing start that follows the last end (data ended
    /// mid-pass). Each edge is checked once.
    pub(crate) fn trim_dangling<O: SegmentObserver<T>>(&mut self, observer: &mut O) {
        let leading = match (self.starts.first(), self.ends.first()) {
            (Some(CrossingSlot::Observed(start)), Some(CrossingSlot::Observed(end))) => {
                (end.time < start.time).then_some(end.time)
            }
            _ => None,
        };
        if let Some(time) = leading {
            self.ends.remove(0);
            observer.on_event(&SegmentEvent::DanglingTrimmed {
                hemisphere: self.hemisphere,
                direction: Direction::Equatorward,
                time,
            });
        }

        let trailing = match (self.starts.last(), self.ends.last()) {
            (Some(CrossingSlot::Observed(start)), Some(CrossingSlot::Observed(end))) => {
                (start.time > end.time).then_some(start.time)
            }
            _ => None,
        };
        if let Some(time) = trailing {
            self.starts.pop();
            observer.on_event(&SegmentEvent::DanglingTrimmed {
                hemisphere: self.hemisphere,
                direction: Direction::Poleward,
                time,
            });
        }
    }

    /// Pair starts and ends positionally; unpaired tail entries are dropped
    pub(crate) fn passes(&self) -> Vec<Pass<T>> {
        self.starts
            .iter()
            .zip(self.ends.iter())
            .map(|(start, end)| Pass {
                hemisphere: self.hemisphere,
                start: *start,
                end: *end,
            })
            .collect()
    }

    /// Observed crossings of both kinds in scan order
    pub(crate) fn timeline(&self) -> Vec<&Crossing<T>> {
        let mut crossings: Vec<&Crossing<T>> = self
            .starts
            .iter()
            .chain(self.ends.iter())
            .filter_map(CrossingSlot::observed)
            .collect();
        crossings.sort_by_key(|c| c.bracket_start());
        crossings
    }

    pub(crate) fn placeholder_count(&self) -> usize {
        self.starts
            .iter()
            .chain(self.ends.iter())
            .filter(|slot| slot.is_placeholder())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NullObserver;

    fn crossing(direction: Direction, sample_index: usize, time: f64) -> Crossing<f64> {
        Crossing {
            direction,
            hemisphere: Hemisphere::North,
            sample_index,
            time,
            fraction: 0.5,
            delta_t: 10.0,
            delta_lat: 1.0,
        }
    }

    #[test]
    fn test_record_without_gap() {
        let mut ledger = HemisphereLedger::new(Hemisphere::North);
        ledger.record(crossing(Direction::Poleward, 1, 10.0), 150.0, &mut NullObserver);
        ledger.record(crossing(Direction::Poleward, 11, 110.0), 150.0, &mut NullObserver);
        assert_eq!(ledger.starts().len(), 2);
        assert_eq!(ledger.placeholder_count(), 0);
    }

    #[test]
    fn test_record_inserts_single_placeholder_for_long_gap() {
        let mut events: Vec<SegmentEvent<f64>> = Vec::new();
        let mut ledger = HemisphereLedger::new(Hemisphere::North);
        ledger.record(crossing(Direction::Poleward, 1, 10.0), 150.0, &mut events);
        // Ten periods later: still a single placeholder
        ledger.record(crossing(Direction::Poleward, 2, 1010.0), 150.0, &mut events);

        assert_eq!(ledger.starts().len(), 3);
        assert!(ledger.starts()[1].is_placeholder());
        assert_eq!(ledger.starts()[2].observed().map(|c| c.time), Some(1010.0));
        assert_eq!(ledger.placeholder_count(), 1);
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            SegmentEvent::GapInferred { direction: Direction::Poleward, gap_s, .. } if gap_s == 1000.0
        ));
    }

    #[test]
    fn test_gap_check_is_per_kind() {
        let mut ledger = HemisphereLedger::new(Hemisphere::North);
        ledger.record(crossing(Direction::Poleward, 1, 10.0), 150.0, &mut NullObserver);
        ledger.record(crossing(Direction::Equatorward, 500, 5000.0), 150.0, &mut NullObserver);
        assert_eq!(ledger.placeholder_count(), 0);
    }

    #[test]
    fn test_trim_leading_end() {
        let mut ledger = HemisphereLedger::new(Hemisphere::North);
        ledger.record(crossing(Direction::Equatorward, 0, 0.0), 150.0, &mut NullObserver);
        ledger.record(crossing(Direction::Poleward, 4, 40.0), 150.0, &mut NullObserver);
        ledger.record(crossing(Direction::Equatorward, 6, 60.0), 150.0, &mut NullObserver);

        let mut events: Vec<SegmentEvent<f64>> = Vec::new();
        ledger.trim_dangling(&mut events);
        assert_eq!(ledger.ends().len(), 1);
        assert_eq!(ledger.passes().len(), 1);
        assert_eq!(
            events,
            vec![SegmentEvent::DanglingTrimmed {
                hemisphere: Hemisphere::North,
                direction: Direction::Equatorward,
                time: 0.0,
            }]
        );
    }

    #[test]
    fn test_trim_trailing_start() {
        let mut ledger = HemisphereLedger::new(Hemisphere::North);
        ledger.record(crossing(Direction::Poleward, 1, 10.0), 150.0, &mut NullObserver);
        ledger.record(crossing(Direction::Equatorward, 3, 30.0), 150.0, &mut NullObserver);
        ledger.record(crossing(Direction::Poleward, 6, 60.0), 150.0, &mut NullObserver);

        ledger.trim_dangling(&mut NullObserver);
        assert_eq!(ledger.starts().len(), 1);
        assert_eq!(ledger.ends().len(), 1);
    }

    #[test]
    fn test_trim_skips_empty_lists() {
        let mut ledger = HemisphereLedger::new(Hemisphere::South);
        ledger.record(crossing(Direction::Equatorward, 0, 0.0), 150.0, &mut NullObserver);
        ledger.trim_dangling(&mut NullObserver);
        assert_eq!(ledger.ends().len(), 1);
        assert!(ledger.passes().is_empty());
    }

    #[test]
    fn test_passes_drop_unpaired_tail() {
        let mut ledger = HemisphereLedger::new(Hemisphere::North);
        ledger.record(crossing(Direction::Poleward, 1, 10.0), 150.0, &mut NullObserver);
        ledger.record(crossing(Direction::Equatorward, 3, 30.0), 150.0, &mut NullObserver);
        ledger.record(crossing(Direction::Equatorward, 13, 130.0), 150.0, &mut NullObserver);

        let passes = ledger.passes();
        assert_eq!(passes.len(), 1);
        assert_eq!(passes[0].start_index(), Some(1));
        assert_eq!(passes[0].end_index(), Some(3));
    }

    #[test]
    fn test_timeline_interleaves_kinds() {
        let mut ledger = HemisphereLedger::new(Hemisphere::North);
        ledger.record(crossing(Direction::Poleward, 1, 10.0), 150.0, &mut NullObserver);
        ledger.record(crossing(Direction::Poleward, 21, 210.0), 150.0, &mut NullObserver);
        ledger.record(crossing(Direction::Equatorward, 5, 50.0), 150.0, &mut NullObserver);

        let order: Vec<usize> = ledger.timeline().iter().map(|c| c.sample_index).collect();
        assert_eq!(order, vec![1, 5, 21]);
    }
}
