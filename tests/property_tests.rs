//! Property-based tests for the ledger invariants.
//!
//! These tests drive the ledger with random operation sequences and verify
//! the counters, caps and ordering hold after every step.

use proptest::prelude::*;
use resting_ledger::*;

#[derive(Debug, Clone)]
enum Op {
    Submit { side: Side, price: i64, volume: i64 },
    Fill { pick: usize, fraction: u8 },
    Remove { pick: usize },
    Evict { market: i64, proposed: i64, side: Side },
    LateFill { pick: usize, fraction: u8 },
}

// Strategies for generating test data
fn side_strategy() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Bid), Just(Side::Ask)]
}

fn price_strategy() -> impl Strategy<Value = i64> {
    9_500i64..10_500i64
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (side_strategy(), price_strategy(), 1i64..80i64)
            .prop_map(|(side, price, volume)| Op::Submit { side, price, volume }),
        3 => (any::<usize>(), 1u8..=100u8)
            .prop_map(|(pick, fraction)| Op::Fill { pick, fraction }),
        1 => any::<usize>().prop_map(|pick| Op::Remove { pick }),
        1 => (price_strategy(), price_strategy(), side_strategy())
            .prop_map(|(market, proposed, side)| Op::Evict { market, proposed, side }),
        2 => (any::<usize>(), 1u8..=100u8)
            .prop_map(|(pick, fraction)| Op::LateFill { pick, fraction }),
    ]
}

fn tight_limits() -> EngineConfig {
    EngineConfig {
        limits: RiskLimits {
            order_limit: 6,
            volume_limit: 200,
            position_limit: 150,
        },
        ..EngineConfig::default()
    }
}

fn resting_ids(ledger: &Ledger) -> Vec<(OrderId, i64)> {
    ledger
        .bids()
        .iter()
        .chain(ledger.asks().iter())
        .map(|o| (o.id, o.volume))
        .collect()
}

/// What the run has done outside the resting book.
#[derive(Default)]
struct Tracker {
    next_id: u64,
    removed: Vec<OrderId>,
    late_volume: i64,
}

fn apply(ledger: &mut Ledger, op: &Op, tracker: &mut Tracker) {
    match op {
        Op::Submit { side, price, volume } => {
            tracker.next_id += 1;
            let id = OrderId(tracker.next_id);
            let admission = ledger
                .submit(*side, Price::new_unchecked(*price), *volume, id)
                .unwrap();
            if let Admission::Accepted { volume: admitted } = admission {
                assert!(admitted > 0 && admitted <= *volume);
            }
        }
        Op::Fill { pick, fraction } => {
            let resting = resting_ids(ledger);
            if resting.is_empty() {
                return;
            }
            let (id, volume) = resting[pick % resting.len()];
            let fill = (volume * i64::from(*fraction) / 100).max(1);
            ledger.amend_order(fill, id).unwrap();
        }
        Op::Remove { pick } => {
            let resting = resting_ids(ledger);
            if resting.is_empty() {
                return;
            }
            let (id, _) = resting[pick % resting.len()];
            ledger.remove_order(id).unwrap();
            tracker.removed.push(id);
        }
        Op::Evict { market, proposed, side } => {
            let evicted = ledger.remove_least_useful_order(
                Price::new_unchecked(*market),
                Price::new_unchecked(*proposed),
                *side,
            );
            tracker.removed.extend(evicted);
        }
        Op::LateFill { pick, fraction } => {
            if tracker.removed.is_empty() {
                return;
            }
            let id = tracker.removed[pick % tracker.removed.len()];
            let before = ledger.position();
            match ledger.cancelled().lookup(id).map(|e| e.volume) {
                Some(outstanding) => {
                    let fill = (outstanding * i64::from(*fraction) / 100).max(1);
                    assert_eq!(ledger.amend_order(fill, id), Ok(FillOutcome::LateFill));
                    assert_eq!((ledger.position() - before).abs(), fill);
                    tracker.late_volume += fill;

                    let err = ledger.amend_order(outstanding - fill + 1, id).unwrap_err();
                    assert!(err.is_fatal());
                }
                None => {
                    let err = ledger.amend_order(1, id).unwrap_err();
                    assert_eq!(err, LedgerError::UnknownOrder(id));
                }
            }
        }
    }
}

proptest! {
    /// Counters match the sequences and the caps hold after every operation.
    #[test]
    fn invariants_hold_across_sequences(ops in prop::collection::vec(op_strategy(), 1..80)) {
        let mut ledger = Ledger::new(tight_limits());
        let limits = *ledger.limits();
        let mut tracker = Tracker::default();

        for op in &ops {
            apply(&mut ledger, op, &mut tracker);

            prop_assert!(ledger.check_invariants(), "invariants broken after {:?}", op);
            prop_assert_eq!(ledger.volume(), ledger.vol_bids() + ledger.vol_asks());
            prop_assert_eq!(ledger.num_orders(), ledger.bids().len() + ledger.asks().len());
            prop_assert!(ledger.vol_bids() >= 0);
            prop_assert!(ledger.vol_asks() >= 0);
            prop_assert!(ledger.volume() <= limits.volume_limit);
            // only fills for orders we already cancelled can overshoot the cap
            prop_assert!(ledger.position().abs() <= limits.position_limit + tracker.late_volume);
            prop_assert_eq!(ledger.future_position(), -ledger.position());
        }
    }

    /// Both sides stay sorted ascending by price.
    #[test]
    fn sides_stay_sorted(
        orders in prop::collection::vec((side_strategy(), price_strategy()), 1..10),
    ) {
        let mut ledger = Ledger::new(EngineConfig::default());
        for (i, (side, price)) in orders.iter().enumerate() {
            ledger
                .submit(*side, Price::new_unchecked(*price), 1, OrderId(i as u64 + 1))
                .unwrap();
            prop_assert!(ledger.bids().windows(2).all(|w| w[0].price <= w[1].price));
            prop_assert!(ledger.asks().windows(2).all(|w| w[0].price <= w[1].price));
        }
    }

    /// The evicted order is at maximum distance, larger id on ties.
    #[test]
    fn eviction_picks_furthest(
        prices in prop::collection::vec(price_strategy(), 1..10),
        market in price_strategy(),
    ) {
        let mut ledger = Ledger::new(EngineConfig::default());
        for (i, price) in prices.iter().enumerate() {
            ledger.submit_bid(Price::new_unchecked(*price), 1, OrderId(i as u64 + 1)).unwrap();
        }
        let expected = ledger
            .bids()
            .iter()
            .map(|o| ((o.price.value() - market).abs(), o.id))
            .max()
            .map(|(_, id)| id)
            .unwrap();

        // proposing on the ask side never matches a bid level, so eviction always happens
        let evicted = ledger.remove_least_useful_order(
            Price::new_unchecked(market),
            Price::new_unchecked(market),
            Side::Ask,
        );
        prop_assert_eq!(evicted, Some(expected));
        prop_assert!(!ledger.is_resting(expected));
    }

    /// Adding to a position keeps the average inside the range of fill prices.
    #[test]
    fn average_within_fill_range(
        fills in prop::collection::vec((price_strategy(), 1i64..50i64), 1..20),
    ) {
        let mut basis = CostBasis::new();
        let mut position = 0;
        for (price, volume) in &fills {
            basis.calc_average_price(position, Price::new_unchecked(*price), *volume, Side::Bid);
            position += volume;
        }
        let lo = fills.iter().map(|(p, _)| *p).min().unwrap();
        let hi = fills.iter().map(|(p, _)| *p).max().unwrap();
        prop_assert!(basis.average_price >= lo && basis.average_price <= hi);
        prop_assert_eq!(basis.total_buy_volume, position);
    }

    /// The clamped paired price never leaves the band.
    #[test]
    fn band_bounds_clamped_price(
        future in 1_000i64..1_000_000i64,
        paired in 1i64..2_000_000i64,
    ) {
        let band = ClampBand::around(Price::new_unchecked(future));
        let clamped = band.clamp(Price::new_unchecked(paired));
        prop_assert!(clamped >= band.lower && clamped <= band.upper);
        prop_assert_eq!((band.upper - future) % 100, 0);
        prop_assert!(band.upper - future <= future / 50 + 1);
    }
}
