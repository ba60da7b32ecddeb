//! Order ledger simulation.
//!
//! Walks the ledger through admission, clamping, fills, eviction, late fill
//! reconciliation, mark-to-market and rate limiting against scripted venue
//! callbacks.

use resting_ledger::*;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "resting_ledger=info,ledger_sim=info".into()),
        )
        .init();

    println!("Resting Order Ledger Simulation");
    println!("Order limit 10, volume limit 200, position limit 1000\n");

    scenario_1_admission_and_clamping();
    scenario_2_fills_and_cost_basis();
    scenario_3_eviction();
    scenario_4_late_fill();
    scenario_5_mark_to_market();
    scenario_6_rate_limit_burst();

    println!("\nAll simulations completed successfully.");
}

fn print_book(ledger: &Ledger) {
    for level in ledger.book(Side::Ask).levels(5).iter().rev() {
        println!("    ASK {:>7} x {:>4} ({} orders)", level.price, level.total_volume, level.order_count);
    }
    for level in ledger.book(Side::Bid).levels(5) {
        println!("    BID {:>7} x {:>4} ({} orders)", level.price, level.total_volume, level.order_count);
    }
    println!(
        "    position {} | after orders {} | volume {} ({} bid / {} ask) | orders {}",
        ledger.position(),
        ledger.position_after_orders(),
        ledger.volume(),
        ledger.vol_bids(),
        ledger.vol_asks(),
        ledger.num_orders()
    );
}

fn px(value: i64) -> Price {
    Price::new_unchecked(value)
}

/// Orders are clamped to the remaining volume room, then rejected outright.
fn scenario_1_admission_and_clamping() {
    println!("Scenario 1: Admission and Clamping\n");

    let mut ledger = Ledger::new(EngineConfig::default());

    let first = ledger.submit_bid(px(10_000), 120, OrderId(1)).unwrap();
    println!("  BID 120 @ 10000 -> {:?}", first.as_pair());

    let second = ledger.submit_ask(px(10_200), 120, OrderId(2)).unwrap();
    println!("  ASK 120 @ 10200 -> {:?} (clamped to volume room)", second.as_pair());

    let third = ledger.submit_bid(px(9_900), 10, OrderId(3)).unwrap();
    println!("  BID  10 @  9900 -> {:?} (volume limit)\n", third.as_pair());

    print_book(&ledger);
    assert!(ledger.check_invariants());
    println!();
}

/// Fills move position and the average entry price, including a flip.
fn scenario_2_fills_and_cost_basis() {
    println!("Scenario 2: Fills and Cost Basis\n");

    let mut ledger = Ledger::new(EngineConfig::default());
    ledger.submit_bid(px(10_000), 40, OrderId(1)).unwrap();
    ledger.submit_bid(px(10_100), 20, OrderId(2)).unwrap();
    ledger.submit_ask(px(10_300), 90, OrderId(3)).unwrap();

    ledger.amend_order(40, OrderId(1)).unwrap();
    ledger.amend_order(20, OrderId(2)).unwrap();
    println!(
        "  Bought 60 lots, position {} avg {}",
        ledger.position(),
        ledger.average_price()
    );

    ledger.amend_order(30, OrderId(3)).unwrap();
    println!(
        "  Sold 30 lots, position {} avg {}",
        ledger.position(),
        ledger.average_price()
    );

    ledger.amend_order(60, OrderId(3)).unwrap();
    println!(
        "  Sold 60 more, position {} avg {} (flipped short)\n",
        ledger.position(),
        ledger.average_price()
    );

    print_book(&ledger);
    assert!(ledger.check_invariants());
    println!();
}

/// A full book makes room by cancelling the order furthest from the market.
fn scenario_3_eviction() {
    println!("Scenario 3: Eviction on a Full Book\n");

    let mut session = OrderSession::new(SessionConfig::default());
    let market = px(10_000);

    for i in 0..10 {
        let side = if i % 2 == 0 { Side::Bid } else { Side::Ask };
        let offset = 100 * (i as i64 / 2 + 1);
        let price = match side {
            Side::Bid => px(10_000 - offset),
            Side::Ask => px(10_000 + offset),
        };
        session.propose(side, price, 5, market).unwrap();
    }
    println!("  Book holds {} orders", session.ledger().num_orders());

    let proposal = session.propose(Side::Bid, px(9_950), 5, market).unwrap();
    println!("  New BID @ 9950 -> {:?}", proposal.status);
    for action in &proposal.actions {
        println!("    send {:?}", action);
    }
    println!();

    print_book(session.ledger());
    println!();
}

/// A fill for an order we already cancelled still lands in the position.
fn scenario_4_late_fill() {
    println!("Scenario 4: Late Fill After Cancel\n");

    let mut session = OrderSession::new(SessionConfig::default());
    session.on_tick(Timestamp::from_millis(0));

    let proposal = session.propose(Side::Ask, px(10_100), 25, px(10_000)).unwrap();
    let cancel = session.cancel(proposal.order_id).unwrap();
    println!("  Cancelled {} -> {:?}", proposal.order_id, cancel);

    let outcome = session.on_fill(proposal.order_id, px(10_100), 10).unwrap();
    println!(
        "  Fill after cancel -> {:?}, position {}",
        outcome,
        session.ledger().position()
    );

    session.on_tick(Timestamp::from_millis(60_000));
    match session.on_fill(proposal.order_id, px(10_100), 5) {
        Ok(outcome) => println!("  Unexpected: {:?}", outcome),
        Err(err) => println!("  After retention expired: {} (fatal: {})", err, err.is_fatal()),
    }
    println!();
}

/// PnL references the paired price clamped into the band around the future.
fn scenario_5_mark_to_market() {
    println!("Scenario 5: Mark-to-Market\n");

    let mut ledger = Ledger::new(EngineConfig::default());
    ledger.submit_bid(px(10_000), 10, OrderId(1)).unwrap();
    ledger.amend_order(10, OrderId(1)).unwrap();

    let future = px(10_000);
    let band = ClampBand::around(future);
    println!("  Band around {}: [{}, {}]", future, band.lower, band.upper);

    for paired in [9_700, 9_900, 10_000, 10_150, 10_500] {
        println!(
            "  paired {:>6} -> pnl {:>6}",
            paired,
            ledger.calc_profit_or_loss(future, px(paired))
        );
    }
    println!();
}

/// Proposals beyond the window cap are declined, not queued.
fn scenario_6_rate_limit_burst() {
    println!("Scenario 6: Rate Limit Burst\n");

    let start = Timestamp::now();
    let mut config = SessionConfig::default();
    config.rate_limit.max_actions = 5;
    let mut session = OrderSession::new(config);
    session.on_tick(start);

    let mut sent = 0;
    let mut throttled = 0;
    for i in 0..8 {
        let proposal = session
            .propose(Side::Bid, px(9_000 + i), 1, px(10_000))
            .unwrap();
        match proposal.status {
            ProposalStatus::Submitted { .. } => sent += 1,
            ProposalStatus::Throttled => throttled += 1,
            ProposalStatus::Rejected(_) => {}
        }
    }
    println!("  Burst of 8: {} sent, {} throttled", sent, throttled);

    session.on_tick(start.plus_millis(1_000));
    let proposal = session.propose(Side::Bid, px(9_500), 1, px(10_000)).unwrap();
    println!("  One window later -> {:?}", proposal.status);
    println!(
        "  Limiter saw {} requests, dropped {}",
        session.limiter().total(),
        session.limiter().dropped()
    );
}
