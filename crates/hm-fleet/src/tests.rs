//! Unit tests for hm-fleet.

use hm_core::{FixedDurations, StationId};

use crate::{Dispatcher, HaulContext, Station, Step, Truck, TruckState};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Minimal world: `n` stations, a cursor, and a fixed duration source.
struct World {
    stations:   Vec<Station>,
    dispatcher: Dispatcher,
    durations:  FixedDurations,
    travel:     u32,
}

impl World {
    fn new(stations: usize, travel: u32, durations: FixedDurations) -> Self {
        Self {
            stations: vec![Station::new(); stations],
            dispatcher: Dispatcher::new(),
            durations,
            travel,
        }
    }

    fn advance(&mut self, truck: &mut Truck) -> Step {
        let mut ctx = HaulContext {
            stations:     &mut self.stations,
            dispatcher:   &mut self.dispatcher,
            durations:    &mut self.durations,
            travel_ticks: self.travel,
        };
        truck.advance(&mut ctx).unwrap()
    }

    /// Advance every truck once in order, then run the decrement pass.
    fn tick(&mut self, trucks: &mut [Truck]) -> Vec<Step> {
        let steps = trucks.iter_mut().map(|t| self.advance(t)).collect();
        self.dispatcher.decrement_all(&mut self.stations);
        steps
    }
}

// ── TimeLedger ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod ledger_tests {
    use crate::{Activity, FleetError, TimeLedger};

    #[test]
    fn record_charges_one_field() {
        let mut l = TimeLedger::new();
        l.record(Activity::Traveling);
        l.record(Activity::Traveling);
        l.record(Activity::Waiting);
        assert_eq!(l.traveling, 2);
        assert_eq!(l.waiting, 1);
        assert_eq!(l.mining, 0);
        assert_eq!(l.unloading, 0);
        assert_eq!(l.total(), 3);
    }

    #[test]
    fn percent_of_horizon() {
        let l = TimeLedger { waiting: 0, unloading: 1, traveling: 3, mining: 4 };
        assert_eq!(l.percent_of(Activity::Mining, 8), 50.0);
        assert_eq!(l.percent_of(Activity::Unloading, 8), 12.5);
        assert_eq!(l.percent_of(Activity::Mining, 0), 0.0);
    }

    #[test]
    fn packed_field_offsets() {
        let l = TimeLedger { waiting: 1, unloading: 2, traveling: 3, mining: 4 };
        let word = l.pack().unwrap();
        assert_eq!(word, 0x0004_0003_0002_0001);
        assert_eq!(word & 0xFFFF, 1);
        assert_eq!((word >> 48) & 0xFFFF, 4);
        assert_eq!(TimeLedger::unpack(word), l);
    }

    #[test]
    fn pack_rejects_field_overflow() {
        let l = TimeLedger { traveling: 70_000, ..TimeLedger::new() };
        match l.pack() {
            Err(FleetError::LedgerOverflow { activity, value }) => {
                assert_eq!(activity, Activity::Traveling);
                assert_eq!(value, 70_000);
            }
            other => panic!("expected overflow, got {other:?}"),
        }
    }

    #[test]
    fn pack_accepts_field_max() {
        let l = TimeLedger { mining: u32::from(u16::MAX), ..TimeLedger::new() };
        assert_eq!(TimeLedger::unpack(l.pack().unwrap()).mining, 65_535);
    }
}

// ── Station ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod station_tests {
    use crate::Station;

    #[test]
    fn decrement_on_empty_queue_is_noop() {
        let mut s = Station::new();
        s.decrement_queue();
        assert_eq!(s.queue(), 0);
    }

    #[test]
    fn queue_counts_up_and_down() {
        let mut s = Station::new();
        s.increment_queue();
        s.increment_queue();
        s.decrement_queue();
        assert_eq!(s.queue(), 1);
        s.decrement_queue();
        s.decrement_queue();
        assert_eq!(s.queue(), 0);
    }

    #[test]
    fn unloaded_is_independent_of_queue() {
        let mut s = Station::new();
        s.increment_unloaded();
        s.increment_unloaded();
        s.decrement_queue();
        assert_eq!(s.unloaded(), 2);
        assert_eq!(s.queue(), 0);
    }
}

// ── Dispatcher ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod dispatcher_tests {
    use proptest::prelude::*;

    use super::*;
    use crate::FleetError;

    #[test]
    fn assigns_round_robin() {
        let mut stations = vec![Station::new(); 3];
        let mut d = Dispatcher::new();
        let picked: Vec<u32> = (0..7)
            .map(|_| d.assign_next(&mut stations).unwrap().station.0)
            .collect();
        assert_eq!(picked, [0, 1, 2, 0, 1, 2, 0]);
        assert_eq!(d.cursor(), StationId(1));
    }

    #[test]
    fn reports_queue_ahead_before_joining() {
        let mut stations = vec![Station::new(); 1];
        let mut d = Dispatcher::new();
        assert_eq!(d.assign_next(&mut stations).unwrap().queue_ahead, 0);
        assert_eq!(d.assign_next(&mut stations).unwrap().queue_ahead, 1);
        assert_eq!(stations[0].queue(), 2);
    }

    #[test]
    fn empty_station_list_errors() {
        let mut none: Vec<Station> = Vec::new();
        let mut d = Dispatcher::new();
        assert!(matches!(d.assign_next(&mut none), Err(FleetError::NoStations)));
    }

    #[test]
    fn decrement_all_saturates() {
        let mut stations = vec![Station::new(); 2];
        let mut d = Dispatcher::new();
        d.assign_next(&mut stations).unwrap();
        d.decrement_all(&mut stations);
        d.decrement_all(&mut stations);
        assert!(stations.iter().all(|s| s.queue() == 0));
    }

    #[test]
    fn min_queue_of_empty_is_none() {
        let none: Vec<Station> = Vec::new();
        assert_eq!(Dispatcher::min_queue(&none), None);
    }

    proptest! {
        /// Any interleaving of arrivals and end-of-tick decrements keeps the
        /// cursor on a least-loaded station.
        #[test]
        fn cursor_always_points_at_min_queue(
            station_count in 1usize..12,
            arrivals_per_tick in prop::collection::vec(0usize..20, 1..200),
        ) {
            let mut stations = vec![Station::new(); station_count];
            let mut d = Dispatcher::new();

            for arrivals in arrivals_per_tick {
                for _ in 0..arrivals {
                    let min_before = Dispatcher::min_queue(&stations).unwrap();
                    let a = d.assign_next(&mut stations).unwrap();
                    prop_assert_eq!(a.queue_ahead, min_before);

                    let min_after = Dispatcher::min_queue(&stations).unwrap();
                    prop_assert_eq!(stations[d.cursor().index()].queue(), min_after);
                }
                d.decrement_all(&mut stations);
                let min = Dispatcher::min_queue(&stations).unwrap();
                prop_assert_eq!(stations[d.cursor().index()].queue(), min);
            }
        }

        /// The spread between the longest and shortest queue never exceeds one.
        #[test]
        fn queues_stay_balanced(
            station_count in 1usize..8,
            arrivals_per_tick in prop::collection::vec(0usize..10, 1..100),
        ) {
            let mut stations = vec![Station::new(); station_count];
            let mut d = Dispatcher::new();
            for arrivals in arrivals_per_tick {
                for _ in 0..arrivals {
                    d.assign_next(&mut stations).unwrap();
                }
                let max = stations.iter().map(Station::queue).max().unwrap();
                let min = Dispatcher::min_queue(&stations).unwrap();
                prop_assert!(max - min <= 1, "spread {} at {:?}", max - min, stations);
                d.decrement_all(&mut stations);
            }
        }
    }
}

// ── Truck state machine ───────────────────────────────────────────────────────

#[cfg(test)]
mod truck_tests {
    use super::*;
    use crate::{Activity, FleetError};

    #[test]
    fn single_mining_tick_moves_to_travel() {
        let mut w = World::new(1, 6, FixedDurations::constant(1));
        let mut truck = Truck::spawn(&mut w.durations);
        assert_eq!(truck.state(), TruckState::Mining { remaining: 1 });

        let step = w.advance(&mut truck);
        assert_eq!(step, Step::Worked);
        assert_eq!(truck.state(), TruckState::TravelToStation { remaining: 6 });
        assert_eq!(truck.ledger().mining, 1);
        assert_eq!(truck.ledger().traveling, 0);
        assert_eq!(truck.ledger().waiting, 0);
        assert_eq!(truck.ledger().unloading, 0);
    }

    #[test]
    fn full_cycle_with_empty_station() {
        let mut w = World::new(1, 2, FixedDurations::constant(3));
        let mut trucks = vec![Truck::new(2)];

        w.tick(&mut trucks); // mining 2 → 1
        w.tick(&mut trucks); // mining 1 → travel
        assert_eq!(trucks[0].state(), TruckState::TravelToStation { remaining: 2 });
        w.tick(&mut trucks);
        let steps = w.tick(&mut trucks); // arrives
        assert!(matches!(
            steps[0],
            Step::Assigned(a) if a.station == StationId(0) && a.queue_ahead == 0
        ));
        assert_eq!(trucks[0].state(), TruckState::Unloading { station: StationId(0) });

        let steps = w.tick(&mut trucks);
        assert_eq!(steps[0], Step::Unloaded(StationId(0)));
        assert_eq!(w.stations[0].unloaded(), 1);
        assert_eq!(trucks[0].state(), TruckState::TravelToMine { remaining: 2 });

        w.tick(&mut trucks);
        w.tick(&mut trucks);
        assert_eq!(trucks[0].state(), TruckState::Mining { remaining: 3 });

        let l = trucks[0].ledger();
        assert_eq!((l.mining, l.traveling, l.waiting, l.unloading), (2, 4, 0, 1));
        assert_eq!(l.total(), 7);
        assert_eq!(w.durations.drawn(), 1);
    }

    #[test]
    fn zero_wait_skips_waiting_and_second_truck_waits_one_tick() {
        let mut w = World::new(1, 6, FixedDurations::constant(10));
        let mut trucks = vec![
            Truck::with_state(TruckState::TravelToStation { remaining: 1 }),
            Truck::with_state(TruckState::TravelToStation { remaining: 1 }),
        ];

        let steps = w.tick(&mut trucks);
        assert!(matches!(steps[0], Step::Assigned(a) if a.queue_ahead == 0));
        assert!(matches!(steps[1], Step::Assigned(a) if a.queue_ahead == 1));
        assert_eq!(trucks[0].state(), TruckState::Unloading { station: StationId(0) });
        assert_eq!(
            trucks[1].state(),
            TruckState::Waiting { remaining: 1, station: StationId(0) }
        );
        assert_eq!(w.stations[0].queue(), 1, "2 joined, 1 drained at tick end");

        w.tick(&mut trucks);
        assert_eq!(trucks[0].state(), TruckState::TravelToMine { remaining: 6 });
        assert_eq!(trucks[1].state(), TruckState::Unloading { station: StationId(0) });
        assert_eq!(trucks[0].ledger().waiting, 0, "zero-wait truck never charged Waiting");
        assert_eq!(trucks[1].ledger().waiting, 1);

        w.tick(&mut trucks);
        assert_eq!(trucks[1].state(), TruckState::TravelToMine { remaining: 6 });
        assert_eq!(trucks[1].ledger().unloading, 1);
        assert_eq!(w.stations[0].unloaded(), 2);
        assert_eq!(w.stations[0].queue(), 0);
    }

    #[test]
    fn arrivals_spread_over_stations() {
        let mut w = World::new(3, 6, FixedDurations::constant(10));
        let mut trucks: Vec<Truck> = (0..3)
            .map(|_| Truck::with_state(TruckState::TravelToStation { remaining: 1 }))
            .collect();
        w.tick(&mut trucks);
        for (i, t) in trucks.iter().enumerate() {
            assert_eq!(t.state(), TruckState::Unloading { station: StationId(i as u32) });
        }
    }

    #[test]
    fn each_tick_charges_exactly_one_field() {
        let mut w = World::new(2, 3, FixedDurations::new([2, 5, 1, 4]));
        let mut trucks: Vec<Truck> = (0..5).map(|_| Truck::spawn(&mut w.durations)).collect();
        for _ in 0..200 {
            let before: Vec<_> = trucks.iter().map(|t| *t.ledger()).collect();
            w.tick(&mut trucks);
            for (b, t) in before.iter().zip(&trucks) {
                let a = t.ledger();
                let deltas: Vec<u32> = Activity::ALL.iter().map(|&x| a.get(x) - b.get(x)).collect();
                assert_eq!(deltas.iter().sum::<u32>(), 1, "deltas {deltas:?}");
                assert!(deltas.iter().all(|&d| d <= 1));
            }
        }
        for t in &trucks {
            assert_eq!(t.ledger().total(), 200);
        }
    }

    #[test]
    fn unloading_at_unknown_station_errors() {
        let mut w = World::new(1, 6, FixedDurations::constant(1));
        let mut truck = Truck::with_state(TruckState::Unloading { station: StationId(4) });
        let mut ctx = HaulContext {
            stations:     &mut w.stations,
            dispatcher:   &mut w.dispatcher,
            durations:    &mut w.durations,
            travel_ticks: w.travel,
        };
        let err = truck.advance(&mut ctx).unwrap_err();
        assert!(matches!(err, FleetError::UnknownStation { count: 1, .. }));
    }

    #[test]
    fn exhausted_countdown_errors() {
        let mut w = World::new(1, 6, FixedDurations::constant(1));
        let mut truck = Truck::new(0);
        let mut ctx = HaulContext {
            stations:     &mut w.stations,
            dispatcher:   &mut w.dispatcher,
            durations:    &mut w.durations,
            travel_ticks: w.travel,
        };
        let err = truck.advance(&mut ctx).unwrap_err();
        assert!(matches!(err, FleetError::TimerExhausted { state: "Mining" }));
        assert_eq!(truck.ledger().total(), 0, "failed tick is not charged");
    }

    #[test]
    fn zero_mining_draw_errors() {
        let mut w = World::new(1, 1, FixedDurations::constant(0));
        let mut truck = Truck::with_state(TruckState::TravelToMine { remaining: 1 });
        let mut ctx = HaulContext {
            stations:     &mut w.stations,
            dispatcher:   &mut w.dispatcher,
            durations:    &mut w.durations,
            travel_ticks: w.travel,
        };
        assert!(matches!(truck.advance(&mut ctx), Err(FleetError::ZeroMiningDuration)));
    }

    #[test]
    fn state_accessors() {
        let s = TruckState::Waiting { remaining: 3, station: StationId(2) };
        assert_eq!(s.label(), "Waiting");
        assert_eq!(s.timer(), 3);
        assert_eq!(s.station(), Some(StationId(2)));
        assert_eq!(s.activity(), Activity::Waiting);

        let s = TruckState::Unloading { station: StationId(1) };
        assert_eq!(s.timer(), 0);
        assert_eq!(s.activity(), Activity::Unloading);

        let s = TruckState::TravelToMine { remaining: 4 };
        assert_eq!(s.station(), None);
        assert_eq!(s.activity(), Activity::Traveling);
    }
}
