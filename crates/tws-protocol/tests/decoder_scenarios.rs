// crates/tws-protocol/tests/decoder_scenarios.rs
mod common;

use common::{connected, feed, wire, wire_owned};
use tws_core::{Event, TickSize, TickType, UnderComp, UNSET_DOUBLE, UNSET_INTEGER};
use tws_protocol::{ConnectionState, SessionError};

// ============================================================================
// Market data
// ============================================================================

#[test]
fn bid_price_tick_carries_its_size() {
    let mut session = connected(76);
    let events = feed(&mut session, &wire(&["1", "6", "7", "1", "101.25", "12", "1"]));

    assert_eq!(events.len(), 2);
    match &events[0] {
        Event::TickPrice(t) => {
            assert_eq!(t.ticker_id, 7);
            assert_eq!(t.tick_type, TickType::BID);
            assert_eq!(t.price, 101.25);
            assert!(t.can_auto_execute);
        }
        other => panic!("expected price tick, got {other:?}"),
    }
    assert_eq!(
        events[1],
        Event::TickSize(TickSize {
            ticker_id: 7,
            tick_type: TickType::BID_SIZE,
            size: 12,
        })
    );
}

#[test]
fn other_price_ticks_have_no_size() {
    let mut session = connected(76);
    let events = feed(&mut session, &wire(&["1", "6", "7", "6", "103", "0", "0"]));
    assert_eq!(events.len(), 1);
    assert!(matches!(&events[0], Event::TickPrice(t) if t.tick_type == TickType::HIGH));
}

#[test]
fn ask_and_last_map_to_their_sizes() {
    let mut session = connected(76);
    let mut bytes = wire(&["1", "6", "1", "2", "1.5", "3", "0"]);
    bytes.extend(wire(&["1", "6", "1", "4", "1.6", "4", "0"]));
    let events = feed(&mut session, &bytes);

    let sizes: Vec<TickType> = events
        .iter()
        .filter_map(|e| match e {
            Event::TickSize(t) => Some(t.tick_type),
            _ => None,
        })
        .collect();
    assert_eq!(sizes, vec![TickType::ASK_SIZE, TickType::LAST_SIZE]);
}

#[test]
fn option_computation_out_of_range_values_become_unset() {
    let mut session = connected(76);
    let events = feed(
        &mut session,
        &wire(&[
            "21", "6", "9", "10", "-0.2", "1.5", "-3", "0.25", "2", "0.1", "-1.2", "-50",
        ]),
    );

    match &events[..] {
        [Event::TickOptionComputation(t)] => {
            assert_eq!(t.ticker_id, 9);
            assert_eq!(t.tick_type, TickType::BID_OPTION_COMPUTATION);
            assert_eq!(t.implied_vol, UNSET_DOUBLE);
            assert_eq!(t.delta, UNSET_DOUBLE);
            assert_eq!(t.opt_price, UNSET_DOUBLE);
            assert_eq!(t.pv_dividend, 0.25);
            assert_eq!(t.gamma, UNSET_DOUBLE);
            assert_eq!(t.vega, 0.1);
            assert_eq!(t.theta, UNSET_DOUBLE);
            assert_eq!(t.und_price, UNSET_DOUBLE);
        }
        other => panic!("unexpected events {other:?}"),
    }
}

#[test]
fn old_option_computation_reads_prices_only_for_the_model_tick() {
    let mut session = connected(76);

    // Version 5, model tick: price and dividend are on the wire.
    let mut bytes = wire(&["21", "5", "9", "13", "0.3", "0.5", "4.2", "0.1"]);
    // Version 5, bid tick: they are not.
    bytes.extend(wire(&["21", "5", "9", "10", "0.3", "0.5"]));
    let events = feed(&mut session, &bytes);

    assert_eq!(events.len(), 2);
    match (&events[0], &events[1]) {
        (Event::TickOptionComputation(model), Event::TickOptionComputation(bid)) => {
            assert_eq!(model.opt_price, 4.2);
            assert_eq!(model.pv_dividend, 0.1);
            assert_eq!(model.gamma, UNSET_DOUBLE);
            assert_eq!(bid.implied_vol, 0.3);
            assert_eq!(bid.opt_price, UNSET_DOUBLE);
            assert_eq!(bid.und_price, UNSET_DOUBLE);
        }
        other => panic!("unexpected events {other:?}"),
    }
}

#[test]
fn historical_data_with_no_bars_emits_only_the_marker() {
    let mut session = connected(76);
    let events = feed(
        &mut session,
        &wire(&["17", "3", "4", "20240101 09:30:00", "20240101 16:00:00", "0"]),
    );

    match &events[..] {
        [Event::HistoricalData { req_id: 4, bar }] => {
            assert_eq!(&bar.date[..], b"finished-20240101 09:30:00-20240101 16:00:00");
            assert!(bar.is_finished_marker());
            assert_eq!(bar.open, -1.0);
            assert_eq!(bar.close, -1.0);
            assert_eq!(bar.volume, -1);
            assert_eq!(bar.bar_count, -1);
            assert_eq!(bar.wap, -1.0);
            assert!(!bar.has_gaps);
        }
        other => panic!("unexpected events {other:?}"),
    }
}

#[test]
fn historical_bars_precede_the_marker() {
    let mut session = connected(76);
    let events = feed(
        &mut session,
        &wire(&[
            "17", "3", "4", "s", "e", "2", //
            "20240101", "1", "2", "0.5", "1.5", "100", "1.2", "true", "7", //
            "20240102", "1.5", "2.5", "1", "2", "200", "1.8", "false", "9",
        ]),
    );

    assert_eq!(events.len(), 3);
    match (&events[0], &events[1], &events[2]) {
        (
            Event::HistoricalData { bar: first, .. },
            Event::HistoricalData { bar: second, .. },
            Event::HistoricalData { bar: marker, .. },
        ) => {
            assert!(first.has_gaps);
            assert_eq!(first.volume, 100);
            assert_eq!(first.bar_count, 7);
            assert!(!second.has_gaps);
            assert_eq!(second.wap, 1.8);
            assert_eq!(&marker.date[..], b"finished-s-e");
        }
        other => panic!("unexpected events {other:?}"),
    }
}

#[test]
fn scanner_rows_end_with_the_scan_end() {
    let mut session = connected(76);
    let events = feed(
        &mut session,
        &wire(&[
            "20", "3", "11", "1", //
            "0", "265598", "AAPL", "STK", "", "0", "", "SMART", "USD", "AAPL", "NMS", "NMS", "",
            "", "", "",
        ]),
    );

    assert_eq!(events.len(), 2);
    match &events[0] {
        Event::ScannerData { req_id: 11, row } => {
            assert_eq!(row.rank, 0);
            assert_eq!(row.details.summary.con_id, 265598);
            assert_eq!(&row.details.summary.symbol[..], b"AAPL");
            assert_eq!(&row.details.market_name[..], b"NMS");
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(events[1], Event::ScannerDataEnd(11));
}

// ============================================================================
// Framing
// ============================================================================

#[test]
fn partial_message_waits_for_the_rest() {
    let mut session = connected(76);
    let bytes = wire(&["1", "6", "7", "1", "101.25", "12", "1"]);
    let (head, tail) = bytes.split_at(9);

    assert!(feed(&mut session, head).is_empty());
    assert_eq!(session.buffered(), head);
    assert_eq!(feed(&mut session, tail).len(), 2);
    assert!(session.buffered().is_empty());
}

#[test]
fn several_messages_in_one_read_keep_wire_order() {
    let mut session = connected(76);
    let mut bytes = wire(&["9", "1", "1000"]);
    bytes.extend(wire(&["49", "1", "1700000000"]));
    bytes.extend(wire(&["4", "2", "-1", "2104", "Market data farm connection is OK"]));
    bytes.extend(wire(&["53", "1"]));
    let events = feed(&mut session, &bytes);

    let kinds: Vec<&str> = events.iter().map(Event::kind).collect();
    assert_eq!(
        kinds,
        vec!["next_valid_id", "current_time", "error", "open_order_end"]
    );
    assert_eq!(events[0], Event::NextValidId(1000));
    assert_eq!(events[1], Event::CurrentTime(1_700_000_000));
}

#[test]
fn unknown_message_tag_closes_the_connection() {
    let mut session = connected(76);
    let mut events = Vec::new();
    let mut bytes = wire(&["99", "1", "x"]);
    bytes.extend(wire(&["9", "1", "1000"]));
    let result = session.on_data(&bytes, &mut events);

    assert!(result.is_err());
    assert_eq!(events.len(), 2);
    match &events[0] {
        Event::ClientError(e) => {
            assert_eq!(e.id, 99);
            assert_eq!(e.code, 505);
            assert_eq!(e.message, "Fatal Error: Unknown message id.");
        }
        other => panic!("expected client error, got {other:?}"),
    }
    assert_eq!(events[1], Event::ConnectionClosed);

    assert_eq!(session.state(), ConnectionState::Disconnected);
    assert!(session.transport().closed);
    assert!(session.buffered().is_empty());

    // Nothing follows.
    let later = feed(&mut session, &wire(&["9", "1", "1001"]));
    assert!(later.is_empty());
}

#[test]
fn malformed_number_is_fatal() {
    let mut session = connected(76);
    let mut events = Vec::new();
    let result = session.on_data(&wire(&["2", "1", "7", "0", "12x"]), &mut events);

    assert!(matches!(result, Err(SessionError::Protocol(_))));
    assert_eq!(events.len(), 2);
    match &events[0] {
        Event::ClientError(e) => {
            assert_eq!(e.code, 508);
            assert!(e.message.contains("12x"));
        }
        other => panic!("expected client error, got {other:?}"),
    }
    assert_eq!(events[1], Event::ConnectionClosed);
}

#[test]
fn messages_before_a_fatal_one_are_still_delivered() {
    let mut session = connected(76);
    let mut events = Vec::new();
    let mut bytes = wire(&["9", "1", "1000"]);
    bytes.extend(wire(&["0", "1"]));
    assert!(session.on_data(&bytes, &mut events).is_err());

    assert_eq!(events[0], Event::NextValidId(1000));
    assert!(matches!(&events[1], Event::ClientError(e) if e.id == 0));
    assert_eq!(events[2], Event::ConnectionClosed);
}

// ============================================================================
// Version gates
// ============================================================================

#[test]
fn contract_data_before_version_three_has_no_request_id() {
    let mut session = connected(76);
    let events = feed(
        &mut session,
        &wire(&[
            "10", "2", "IBM", "STK", "", "0", "", "SMART", "USD", "IBM", "NMS", "IBM", "8314",
            "0.01", "", "LMT,MKT", "SMART,NYSE", "1",
        ]),
    );

    match &events[..] {
        [Event::ContractDetails { req_id, details }] => {
            assert_eq!(*req_id, -1);
            assert_eq!(details.summary.con_id, 8314);
            assert_eq!(details.min_tick, 0.01);
            assert_eq!(details.price_magnifier, 1);
            assert!(details.sec_id_list.is_empty());
            assert!(details.long_name.is_empty());
        }
        other => panic!("unexpected events {other:?}"),
    }
}

#[test]
fn contract_data_reads_the_security_id_list() {
    let mut session = connected(76);
    let events = feed(
        &mut session,
        &wire(&[
            "10", "8", "3", "IBM", "STK", "", "0", "", "SMART", "USD", "IBM", "NMS", "IBM",
            "8314", "0.01", "", "LMT", "SMART", "1", // v2
            "0", // v4 underConId
            "International Business Machines", "NYSE", // v5
            "", "Technology", "Computers", "Services", "EST", "0930-1600", "0930-1600", // v6
            "", "", // v8 evRule, evMultiplier
            "1", "ISIN", "US4592001014", // v7 secIdList
        ]),
    );

    match &events[..] {
        [Event::ContractDetails { req_id: 3, details }] => {
            assert_eq!(&details.summary.primary_exchange[..], b"NYSE");
            assert_eq!(&details.industry[..], b"Technology");
            assert_eq!(details.sec_id_list.len(), 1);
            assert_eq!(&details.sec_id_list[0].tag[..], b"ISIN");
            assert_eq!(&details.sec_id_list[0].value[..], b"US4592001014");
        }
        other => panic!("unexpected events {other:?}"),
    }
}

#[test]
fn execution_request_id_defaults_before_version_seven() {
    let mut session = connected(76);
    let events = feed(
        &mut session,
        &wire(&[
            "11", "6", "17", "8314", "IBM", "STK", "", "0", "", "SMART", "USD", "IBM", "0001",
            "20240102 10:00:00", "DU1", "NYSE", "BOT", "100", "150.25", "99", "12", "0", "100",
            "150.25",
        ]),
    );

    match &events[..] {
        [Event::ExecDetails {
            req_id,
            contract,
            execution,
        }] => {
            assert_eq!(*req_id, -1);
            assert_eq!(contract.con_id, 8314);
            assert_eq!(execution.order_id, 17);
            assert_eq!(&execution.exchange[..], b"NYSE");
            assert_eq!(execution.cum_qty, 100);
            assert!(execution.order_ref.is_empty());
        }
        other => panic!("unexpected events {other:?}"),
    }
}

#[test]
fn position_average_cost_arrives_in_version_three() {
    let mut session = connected(76);
    let contract = ["8314", "IBM", "STK", "", "0", "", "", "SMART", "USD", "IBM"];

    let mut v1 = vec!["61", "1", "DU1"];
    v1.extend(contract);
    v1.push("100");
    let mut v3 = vec!["61", "3", "DU1"];
    v3.extend(contract);
    v3.extend(["IBM", "100", "149.5"]);

    let mut bytes = wire(&v1);
    bytes.extend(wire(&v3));
    let events = feed(&mut session, &bytes);

    match &events[..] {
        [Event::Position(old), Event::Position(new)] => {
            assert_eq!(old.avg_cost, 0.0);
            assert!(old.contract.trading_class.is_empty());
            assert_eq!(new.avg_cost, 149.5);
            assert_eq!(&new.contract.trading_class[..], b"IBM");
        }
        other => panic!("unexpected events {other:?}"),
    }
}

fn portfolio_v6(primary_repeat: Option<&str>) -> Vec<u8> {
    let mut fields = vec![
        "7", "6", "8314", "IBM", "STK", "", "0", "", "USD", "IBM", "100", "150", "15000",
        "140", "1000", "0", "DU1",
    ];
    if let Some(p) = primary_repeat {
        fields.push(p);
    }
    wire(&fields)
}

#[test]
fn portfolio_primary_exchange_repeat_at_server_39() {
    let mut session = connected(39);
    let mut bytes = portfolio_v6(Some("NYSE"));
    bytes.extend(wire(&["9", "1", "5"]));
    let events = feed(&mut session, &bytes);

    match &events[..] {
        [Event::Portfolio(p), Event::NextValidId(5)] => {
            assert_eq!(&p.contract.primary_exchange[..], b"NYSE");
            assert_eq!(p.position, 100);
            assert_eq!(&p.account_name[..], b"DU1");
        }
        other => panic!("unexpected events {other:?}"),
    }
}

#[test]
fn portfolio_has_no_repeat_on_other_servers() {
    let mut session = connected(40);
    let mut bytes = portfolio_v6(None);
    bytes.extend(wire(&["9", "1", "5"]));
    let events = feed(&mut session, &bytes);

    match &events[..] {
        [Event::Portfolio(p), Event::NextValidId(5)] => {
            assert!(p.contract.primary_exchange.is_empty());
        }
        other => panic!("unexpected events {other:?}"),
    }
}

// ============================================================================
// Open order
// ============================================================================

/// Everything up to the trigger method, shared by both order layouts.
fn order_head(version: i32, server_version: i32, exempt_code: &str) -> Vec<String> {
    let mut f: Vec<String> = Vec::new();
    let mut push = |items: &[&str]| f.extend(items.iter().map(|s| s.to_string()));

    let version_text = version.to_string();
    push(&["5", version_text.as_str(), "42"]);
    push(&["265598", "AAPL", "STK", "", "0", ""]);
    if version >= 32 {
        push(&[""]);
    }
    push(&["SMART", "USD", "AAPL"]);
    if version >= 32 {
        push(&["NMS"]);
    }
    push(&["BUY", "100", "LMT", "150.5", ""]);
    push(&["DAY", "", "DU1", "O", "0", "", "12", "99", "0", "0", "0", "", ""]);
    push(&["", "", "", ""]);
    push(&[""]);
    push(&["", "", "", "0", ""]);
    if server_version == 51 || version >= 23 {
        push(&[exempt_code]);
    }
    push(&["0", "", "", "", "", "", "0"]);
    push(&["0", "0", "0", "", "0", "1", "1", ""]);
    push(&["0", "0"]);
    f
}

/// A plain limit order, laid out for `version` on `server_version`.
fn open_order(version: i32, server_version: i32, exempt_code: &str) -> Vec<u8> {
    let mut f = order_head(version, server_version, exempt_code);
    let mut push = |items: &[&str]| f.extend(items.iter().map(|s| s.to_string()));

    push(&["", "0", "", ""]);
    push(&["0", "0", ""]);
    if version >= 30 {
        push(&[""]);
    }
    push(&["", "", ""]);
    if version >= 29 {
        push(&["0", "0"]);
    }
    if version >= 26 {
        push(&["0"]);
    }
    push(&["", "", ""]);
    if version >= 24 {
        push(&[""]);
    }
    if version >= 25 {
        push(&["0"]);
    }
    push(&["", ""]);
    if version >= 22 {
        push(&["0"]);
    }
    if version >= 20 {
        push(&["0"]);
    }
    if version >= 21 {
        push(&[""]);
    }
    push(&["0", "Submitted", "", "", "", "", "", "", "", ""]);

    wire_owned(&f)
}

/// A delta-neutral scale order with combo legs, a hedge, an under-comp and
/// an algo, laid out for `version` on server 76.
fn loaded_open_order(version: i32) -> Vec<u8> {
    let mut f = order_head(version, 76, "7");
    let mut push = |items: &[&str]| f.extend(items.iter().map(|s| s.to_string()));

    // Volatility with a delta-neutral leg.
    push(&["0.25", "2", "LMT", "1.5"]);
    if version >= 27 {
        push(&["11", "FIRM", "CLR", "IB"]);
    }
    if version >= 31 {
        push(&["O", "1", "2", "DEST"]);
    }
    push(&["1", "0", ""]);
    if version >= 30 {
        push(&[""]);
    }
    push(&["", "", "BAG legs"]);
    if version >= 29 {
        push(&["1", "12087792", "1", "BUY", "SMART", "0", "0", "", "-1"]);
        push(&["1", "1.25"]);
    }
    if version >= 26 {
        push(&["1", "NonGuaranteed", "1"]);
    }
    push(&["10", "5", "0.05"]);
    if version >= 28 {
        push(&["0.1", "60", "0.2", "1", "100", "50", "1"]);
    }
    if version >= 24 {
        push(&["D", "0.5"]);
    }
    if version >= 25 {
        push(&["0"]);
    }
    push(&["", ""]);
    if version >= 22 {
        push(&["0"]);
    }
    if version >= 20 {
        push(&["1", "99", "0.3", "10.5"]);
    }
    if version >= 21 {
        push(&["Adaptive", "1", "adaptivePriority", "Normal"]);
    }
    push(&["0", "Submitted", "", "", "", "", "", "", "", ""]);

    wire_owned(&f)
}

#[test]
fn open_order_current_version() {
    let mut session = connected(76);
    let mut bytes = open_order(32, 76, "7");
    bytes.extend(wire(&["53", "1"]));
    let events = feed(&mut session, &bytes);

    match &events[..] {
        [Event::OpenOrder(o), Event::OpenOrderEnd] => {
            assert_eq!(o.order_id, 42);
            assert_eq!(o.contract.con_id, 265598);
            assert_eq!(&o.contract.trading_class[..], b"NMS");
            assert_eq!(o.order.total_quantity, 100);
            assert_eq!(o.order.lmt_price, 150.5);
            assert_eq!(o.order.aux_price, UNSET_DOUBLE);
            assert_eq!(o.order.exempt_code, 7);
            assert_eq!(o.order.client_id, 12);
            assert_eq!(o.order.perm_id, 99);
            assert_eq!(o.order.min_qty, UNSET_INTEGER);
            assert_eq!(o.order.trailing_percent, UNSET_DOUBLE);
            assert!(o.order.e_trade_only);
            assert!(o.contract.combo_legs.is_empty());
            assert!(o.contract.under_comp.is_none());
            assert_eq!(&o.order_state.status[..], b"Submitted");
            assert_eq!(o.order_state.commission, UNSET_DOUBLE);
        }
        other => panic!("unexpected events {other:?}"),
    }
}

#[test]
fn open_order_old_version_reads_plain_prices() {
    let mut session = connected(76);
    let mut bytes = open_order(19, 76, "");
    bytes.extend(wire(&["53", "1"]));
    let events = feed(&mut session, &bytes);

    match &events[..] {
        [Event::OpenOrder(o), Event::OpenOrderEnd] => {
            assert_eq!(o.order.aux_price, 0.0);
            assert!(o.contract.trading_class.is_empty());
            assert_eq!(o.order.exempt_code, -1);
        }
        other => panic!("unexpected events {other:?}"),
    }
}

#[test]
fn open_order_exempt_code_is_discarded_at_server_51() {
    let mut session = connected(51);
    let mut bytes = open_order(32, 51, "7");
    bytes.extend(wire(&["53", "1"]));
    let events = feed(&mut session, &bytes);

    match &events[..] {
        [Event::OpenOrder(o), Event::OpenOrderEnd] => {
            assert_eq!(o.order.exempt_code, -1);
            assert_eq!(&o.order_state.status[..], b"Submitted");
        }
        other => panic!("unexpected events {other:?}"),
    }
}

#[test]
fn open_order_exempt_code_is_read_below_server_51_from_version_23() {
    let mut session = connected(50);
    let mut bytes = open_order(23, 50, "3");
    bytes.extend(wire(&["53", "1"]));
    let events = feed(&mut session, &bytes);

    match &events[..] {
        [Event::OpenOrder(o), Event::OpenOrderEnd] => assert_eq!(o.order.exempt_code, 3),
        other => panic!("unexpected events {other:?}"),
    }
}

#[test]
fn open_order_split_anywhere_decodes_once() {
    let bytes = open_order(32, 76, "7");
    for cut in [1, 10, bytes.len() / 2, bytes.len() - 1] {
        let mut session = connected(76);
        assert!(feed(&mut session, &bytes[..cut]).is_empty());
        let events = feed(&mut session, &bytes[cut..]);
        assert_eq!(events.len(), 1, "cut at {cut}");
    }
}

#[test]
fn loaded_open_order_reads_every_optional_block() {
    let mut session = connected(76);
    let mut bytes = loaded_open_order(32);
    bytes.extend(wire(&["53", "1"]));
    let events = feed(&mut session, &bytes);

    match &events[..] {
        [Event::OpenOrder(o), Event::OpenOrderEnd] => {
            let order = &o.order;
            assert_eq!(order.volatility, 0.25);
            assert_eq!(&order.delta_neutral_order_type[..], b"LMT");
            assert_eq!(order.delta_neutral_con_id, 11);
            assert_eq!(&order.delta_neutral_clearing_intent[..], b"IB");
            assert!(order.delta_neutral_short_sale);
            assert_eq!(order.delta_neutral_short_sale_slot, 2);
            assert_eq!(&order.delta_neutral_designated_location[..], b"DEST");
            assert!(order.continuous_update);

            assert_eq!(&o.contract.combo_legs_descrip[..], b"BAG legs");
            assert_eq!(o.contract.combo_legs.len(), 1);
            let leg = &o.contract.combo_legs[0];
            assert_eq!(leg.con_id, 12087792);
            assert_eq!(&leg.exchange[..], b"SMART");
            assert_eq!(leg.exempt_code, -1);
            assert_eq!(order.order_combo_legs.len(), 1);
            assert_eq!(order.order_combo_legs[0].price, 1.25);
            assert_eq!(order.smart_combo_routing_params.len(), 1);
            assert_eq!(&order.smart_combo_routing_params[0].tag[..], b"NonGuaranteed");

            assert_eq!(order.scale_init_level_size, 10);
            assert_eq!(order.scale_subs_level_size, 5);
            assert_eq!(order.scale_price_increment, 0.05);
            assert_eq!(order.scale_price_adjust_value, 0.1);
            assert_eq!(order.scale_price_adjust_interval, 60);
            assert!(order.scale_auto_reset);
            assert_eq!(order.scale_init_fill_qty, 50);
            assert!(order.scale_random_percent);

            assert_eq!(&order.hedge_type[..], b"D");
            assert_eq!(&order.hedge_param[..], b"0.5");
            assert_eq!(
                o.contract.under_comp,
                Some(UnderComp {
                    con_id: 99,
                    delta: 0.3,
                    price: 10.5,
                })
            );
            assert_eq!(&order.algo_strategy[..], b"Adaptive");
            assert_eq!(order.algo_params.len(), 1);
            assert_eq!(&order.algo_params[0].value[..], b"Normal");

            assert_eq!(&o.order_state.status[..], b"Submitted");
        }
        other => panic!("unexpected events {other:?}"),
    }
    assert!(session.buffered().is_empty());
}

#[test]
fn loaded_open_order_at_version_29_skips_the_later_blocks() {
    let mut session = connected(76);
    let mut bytes = loaded_open_order(29);
    bytes.extend(wire(&["53", "1"]));
    let events = feed(&mut session, &bytes);

    match &events[..] {
        [Event::OpenOrder(o), Event::OpenOrderEnd] => {
            let order = &o.order;
            // The first delta-neutral block is there, the second is not.
            assert_eq!(order.delta_neutral_con_id, 11);
            assert!(!order.delta_neutral_short_sale);
            assert_eq!(order.delta_neutral_short_sale_slot, 0);
            assert_eq!(order.trailing_percent, UNSET_DOUBLE);
            assert_eq!(o.contract.combo_legs.len(), 1);
            assert_eq!(order.order_combo_legs[0].price, 1.25);
            assert_eq!(order.scale_price_adjust_value, 0.1);
            assert_eq!(&order.hedge_param[..], b"0.5");
            assert_eq!(order.algo_params.len(), 1);
            assert_eq!(&o.order_state.status[..], b"Submitted");
        }
        other => panic!("unexpected events {other:?}"),
    }
    assert!(session.buffered().is_empty());
}

#[test]
fn loaded_open_order_at_version_28_has_no_combo_legs() {
    let mut session = connected(76);
    let mut bytes = loaded_open_order(28);
    bytes.extend(wire(&["53", "1"]));
    let events = feed(&mut session, &bytes);

    match &events[..] {
        [Event::OpenOrder(o), Event::OpenOrderEnd] => {
            assert!(o.contract.combo_legs.is_empty());
            assert!(o.order.order_combo_legs.is_empty());
            assert_eq!(o.order.smart_combo_routing_params.len(), 1);
            assert!(o.order.scale_random_percent);
            assert!(o.contract.under_comp.is_some());
        }
        other => panic!("unexpected events {other:?}"),
    }
}

#[test]
fn unset_scale_increment_skips_the_adjust_block() {
    // Same order with an empty increment and no adjust fields: the hedge
    // type must land where the adjust value would have been.
    let loaded = String::from_utf8(loaded_open_order(32)).unwrap();
    let trimmed = loaded.replace("0.05\00.1\060\00.2\01\0100\050\01\0", "\0");
    assert_ne!(loaded, trimmed);

    let mut session = connected(76);
    let mut bytes = trimmed.into_bytes();
    bytes.extend(wire(&["53", "1"]));
    let events = feed(&mut session, &bytes);

    match &events[..] {
        [Event::OpenOrder(o), Event::OpenOrderEnd] => {
            assert_eq!(o.order.scale_price_increment, UNSET_DOUBLE);
            assert_eq!(o.order.scale_price_adjust_value, UNSET_DOUBLE);
            assert!(!o.order.scale_random_percent);
            assert_eq!(&o.order.hedge_type[..], b"D");
            assert_eq!(&o.order.hedge_param[..], b"0.5");
        }
        other => panic!("unexpected events {other:?}"),
    }
}

#[test]
fn loaded_open_order_split_anywhere_decodes_once() {
    let mut bytes = loaded_open_order(32);
    bytes.extend(wire(&["53", "1"]));
    for cut in 1..bytes.len() {
        let mut session = connected(76);
        let mut events = feed(&mut session, &bytes[..cut]);
        events.extend(feed(&mut session, &bytes[cut..]));
        assert!(
            matches!(&events[..], [Event::OpenOrder(_), Event::OpenOrderEnd]),
            "cut at {cut}"
        );
    }
}
