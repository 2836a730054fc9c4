//! Order, execution and commission messages.
//!
//! The open order is by far the longest message on the wire. Its field
//! sequence branches on values it has just read (delta-neutral order
//! type, scale price increment, hedge type, algo strategy), so it is
//! decoded with straight-line code rather than a table. The comments
//! name the message version a field block appeared in.

use tws_core::{
    ComboLeg, CommissionReport, Contract, Event, Execution, OpenOrder, Order, OrderComboLeg,
    OrderState, OrderStatus, UnderComp,
};

use super::{FieldReader, REQ_ID_ONLY};
use crate::error::ProtocolError;
use crate::schema::{field, since, FieldKind::*, Record, Schema};
use crate::wire_types::{server_version, NO_REQUEST_ID};

// ============================================================================
// Schemas
// ============================================================================

pub(crate) const ORDER_STATUS: Schema = &[
    field("orderId", Int),
    field("status", Str),
    field("filled", Int),
    field("remaining", Int),
    field("avgFillPrice", Double),
    field("permId", Int),
    field("parentId", Int),
    field("lastFillPrice", Double),
    field("clientId", Int),
    field("whyHeld", Str),
];

pub(crate) const NEXT_VALID_ID: Schema = &[field("orderId", Long)];

pub(crate) const EXECUTION_DATA: Schema = &[
    since(7, "reqId", Int),
    field("orderId", Int),
    field("conId", Int),
    field("symbol", Str),
    field("secType", Str),
    field("expiry", Str),
    field("strike", Double),
    field("right", Str),
    since(9, "multiplier", Str),
    field("exchange", Str),
    field("currency", Str),
    field("localSymbol", Str),
    since(10, "tradingClass", Str),
    field("execId", Str),
    field("time", Str),
    field("acctNumber", Str),
    field("execExchange", Str),
    field("side", Str),
    field("shares", Int),
    field("price", Double),
    field("permId", Int),
    field("clientId", Int),
    field("liquidation", Int),
    since(6, "cumQty", Int),
    since(6, "avgPrice", Double),
    since(8, "orderRef", Str),
    since(9, "evRule", Str),
    since(9, "evMultiplier", Double),
];

pub(crate) const COMMISSION_REPORT: Schema = &[
    field("execId", Str),
    field("commission", Double),
    field("currency", Str),
    field("realizedPNL", Double),
    field("yield", Double),
    field("yieldRedemptionDate", Int),
];

pub(crate) const DELTA_NEUTRAL_VALIDATION: Schema = &[
    field("reqId", Int),
    field("conId", Int),
    field("delta", Double),
    field("price", Double),
];

// ============================================================================
// Flat messages
// ============================================================================

pub(super) fn order_status(
    r: &mut FieldReader<'_>,
    version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let rec = Record::read(r, ORDER_STATUS, version)?;
    out.push(Event::OrderStatus(OrderStatus {
        order_id: rec.int("orderId"),
        status: rec.string("status"),
        filled: rec.int("filled"),
        remaining: rec.int("remaining"),
        avg_fill_price: rec.double("avgFillPrice"),
        perm_id: rec.int("permId"),
        parent_id: rec.int("parentId"),
        last_fill_price: rec.double("lastFillPrice"),
        client_id: rec.int("clientId"),
        why_held: rec.string("whyHeld"),
    }));
    Ok(())
}

pub(super) fn next_valid_id(
    r: &mut FieldReader<'_>,
    version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let rec = Record::read(r, NEXT_VALID_ID, version)?;
    out.push(Event::NextValidId(rec.long("orderId")));
    Ok(())
}

pub(super) fn execution_data(
    r: &mut FieldReader<'_>,
    version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let rec = Record::read(r, EXECUTION_DATA, version)?;

    let contract = Contract {
        con_id: rec.int("conId"),
        symbol: rec.string("symbol"),
        sec_type: rec.string("secType"),
        expiry: rec.string("expiry"),
        strike: rec.double("strike"),
        right: rec.string("right"),
        multiplier: rec.string("multiplier"),
        exchange: rec.string("exchange"),
        currency: rec.string("currency"),
        local_symbol: rec.string("localSymbol"),
        trading_class: rec.string("tradingClass"),
        ..Contract::default()
    };

    let execution = Execution {
        exec_id: rec.string("execId"),
        time: rec.string("time"),
        acct_number: rec.string("acctNumber"),
        exchange: rec.string("execExchange"),
        side: rec.string("side"),
        shares: rec.int("shares"),
        price: rec.double("price"),
        perm_id: rec.int("permId"),
        client_id: rec.int("clientId"),
        order_id: rec.int("orderId"),
        liquidation: rec.int("liquidation"),
        cum_qty: rec.int("cumQty"),
        avg_price: rec.double("avgPrice"),
        order_ref: rec.string("orderRef"),
        ev_rule: rec.string("evRule"),
        ev_multiplier: rec.double("evMultiplier"),
    };

    out.push(Event::ExecDetails {
        req_id: rec.opt_int("reqId").unwrap_or(NO_REQUEST_ID),
        contract: Box::new(contract),
        execution: Box::new(execution),
    });
    Ok(())
}

pub(super) fn execution_data_end(
    r: &mut FieldReader<'_>,
    version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let rec = Record::read(r, REQ_ID_ONLY, version)?;
    out.push(Event::ExecDetailsEnd(rec.int("reqId")));
    Ok(())
}

pub(super) fn commission_report(
    r: &mut FieldReader<'_>,
    version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let rec = Record::read(r, COMMISSION_REPORT, version)?;
    out.push(Event::CommissionReport(CommissionReport {
        exec_id: rec.string("execId"),
        commission: rec.double("commission"),
        currency: rec.string("currency"),
        realized_pnl: rec.double("realizedPNL"),
        yield_value: rec.double("yield"),
        yield_redemption_date: rec.int("yieldRedemptionDate"),
    }));
    Ok(())
}

pub(super) fn delta_neutral_validation(
    r: &mut FieldReader<'_>,
    version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let rec = Record::read(r, DELTA_NEUTRAL_VALIDATION, version)?;
    out.push(Event::DeltaNeutralValidation {
        req_id: rec.int("reqId"),
        under_comp: UnderComp {
            con_id: rec.int("conId"),
            delta: rec.double("delta"),
            price: rec.double("price"),
        },
    });
    Ok(())
}

// ============================================================================
// Open order
// ============================================================================

pub(super) fn open_order(
    r: &mut FieldReader<'_>,
    version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let mut order = Order::default();
    let mut contract = Contract::default();
    let mut state = OrderState::default();

    order.order_id = r.read_long()?;

    // Contract
    contract.con_id = r.read_int()?;
    contract.symbol = r.read_string()?;
    contract.sec_type = r.read_string()?;
    contract.expiry = r.read_string()?;
    contract.strike = r.read_double()?;
    contract.right = r.read_string()?;
    if version >= 32 {
        contract.multiplier = r.read_string()?;
    }
    contract.exchange = r.read_string()?;
    contract.currency = r.read_string()?;
    contract.local_symbol = r.read_string()?;
    if version >= 32 {
        contract.trading_class = r.read_string()?;
    }

    // Main order fields
    order.action = r.read_string()?;
    order.total_quantity = r.read_long()?;
    order.order_type = r.read_string()?;
    order.lmt_price = if version < 29 {
        r.read_double()?
    } else {
        r.read_double_max()?
    };
    order.aux_price = if version < 30 {
        r.read_double()?
    } else {
        r.read_double_max()?
    };
    order.tif = r.read_string()?;
    order.oca_group = r.read_string()?;
    order.account = r.read_string()?;
    order.open_close = r.read_string()?;
    order.origin = r.read_int()?;
    order.order_ref = r.read_string()?;
    order.client_id = r.read_long()?;
    order.perm_id = r.read_long()?;
    order.outside_rth = r.read_bool()?;
    order.hidden = r.read_bool()?;
    order.discretionary_amt = r.read_double()?;
    order.good_after_time = r.read_string()?;
    // Deprecated shares allocation.
    r.read_string()?;

    // v7: financial advisors
    order.fa_group = r.read_string()?;
    order.fa_method = r.read_string()?;
    order.fa_percentage = r.read_string()?;
    order.fa_profile = r.read_string()?;

    // v8
    order.good_till_date = r.read_string()?;

    // v9
    order.rule_80a = r.read_string()?;
    order.percent_offset = r.read_double_max()?;
    order.settling_firm = r.read_string()?;
    order.short_sale_slot = r.read_int()?;
    order.designated_location = r.read_string()?;
    if r.server_version() == server_version::SSHORTX_OLD {
        r.read_int()?;
    } else if version >= 23 {
        order.exempt_code = r.read_int()?;
    }
    order.auction_strategy = r.read_int()?;
    order.starting_price = r.read_double_max()?;
    order.stock_ref_price = r.read_double_max()?;
    order.delta = r.read_double_max()?;
    order.stock_range_lower = r.read_double_max()?;
    order.stock_range_upper = r.read_double_max()?;
    order.display_size = r.read_int()?;
    order.block_order = r.read_bool()?;
    order.sweep_to_fill = r.read_bool()?;
    order.all_or_none = r.read_bool()?;
    order.min_qty = r.read_int_max()?;
    order.oca_type = r.read_int()?;
    order.e_trade_only = r.read_bool()?;
    order.firm_quote_only = r.read_bool()?;
    order.nbbo_price_cap = r.read_double_max()?;

    // v10
    order.parent_id = r.read_long()?;
    order.trigger_method = r.read_int()?;

    // v11: volatility orders
    order.volatility = r.read_double_max()?;
    order.volatility_type = r.read_int()?;
    order.delta_neutral_order_type = r.read_string()?;
    order.delta_neutral_aux_price = r.read_double_max()?;

    if version >= 27 && order.has_delta_neutral_order() {
        order.delta_neutral_con_id = r.read_int()?;
        order.delta_neutral_settling_firm = r.read_string()?;
        order.delta_neutral_clearing_account = r.read_string()?;
        order.delta_neutral_clearing_intent = r.read_string()?;
    }
    if version >= 31 && order.has_delta_neutral_order() {
        order.delta_neutral_open_close = r.read_string()?;
        order.delta_neutral_short_sale = r.read_bool()?;
        order.delta_neutral_short_sale_slot = r.read_int()?;
        order.delta_neutral_designated_location = r.read_string()?;
    }

    order.continuous_update = r.read_bool()?;
    order.reference_price_type = r.read_int()?;

    // v13
    order.trail_stop_price = r.read_double_max()?;
    if version >= 30 {
        order.trailing_percent = r.read_double_max()?;
    }

    // v14: combos
    order.basis_points = r.read_double_max()?;
    order.basis_points_type = r.read_int_max()?;
    contract.combo_legs_descrip = r.read_string()?;

    if version >= 29 {
        let leg_count = r.read_int()?;
        for _ in 0..leg_count.max(0) {
            contract.combo_legs.push(ComboLeg {
                con_id: r.read_int()?,
                ratio: r.read_int()?,
                action: r.read_string()?,
                exchange: r.read_string()?,
                open_close: r.read_int()?,
                short_sale_slot: r.read_int()?,
                designated_location: r.read_string()?,
                exempt_code: r.read_int()?,
            });
        }

        let order_leg_count = r.read_int()?;
        for _ in 0..order_leg_count.max(0) {
            order.order_combo_legs.push(OrderComboLeg {
                price: r.read_double_max()?,
            });
        }
    }

    if version >= 26 {
        order.smart_combo_routing_params = r.read_tag_values()?;
    }

    // v15: scale orders
    if version >= 20 {
        order.scale_init_level_size = r.read_int_max()?;
        order.scale_subs_level_size = r.read_int_max()?;
    } else {
        // Unsupported scale component count.
        r.read_int_max()?;
        order.scale_init_level_size = r.read_int_max()?;
    }
    order.scale_price_increment = r.read_double_max()?;

    if version >= 28 && order.has_scale_price_increment() {
        order.scale_price_adjust_value = r.read_double_max()?;
        order.scale_price_adjust_interval = r.read_int_max()?;
        order.scale_profit_offset = r.read_double_max()?;
        order.scale_auto_reset = r.read_bool()?;
        order.scale_init_position = r.read_int_max()?;
        order.scale_init_fill_qty = r.read_int_max()?;
        order.scale_random_percent = r.read_bool()?;
    }

    if version >= 24 {
        order.hedge_type = r.read_string()?;
        if !order.hedge_type.is_empty() {
            order.hedge_param = r.read_string()?;
        }
    }

    if version >= 25 {
        order.opt_out_smart_routing = r.read_bool()?;
    }

    // v19: clearing
    order.clearing_account = r.read_string()?;
    order.clearing_intent = r.read_string()?;

    if version >= 22 {
        order.not_held = r.read_bool()?;
    }

    if version >= 20 && r.read_bool()? {
        contract.under_comp = Some(UnderComp {
            con_id: r.read_int()?,
            delta: r.read_double()?,
            price: r.read_double()?,
        });
    }

    if version >= 21 {
        order.algo_strategy = r.read_string()?;
        if !order.algo_strategy.is_empty() {
            order.algo_params = r.read_tag_values()?;
        }
    }

    // v16: what-if preview
    order.what_if = r.read_bool()?;
    state.status = r.read_string()?;
    state.init_margin = r.read_string()?;
    state.maint_margin = r.read_string()?;
    state.equity_with_loan = r.read_string()?;
    state.commission = r.read_double_max()?;
    state.min_commission = r.read_double_max()?;
    state.max_commission = r.read_double_max()?;
    state.commission_currency = r.read_string()?;
    state.warning_text = r.read_string()?;

    out.push(Event::OpenOrder(Box::new(OpenOrder {
        order_id: order.order_id,
        contract,
        order,
        order_state: state,
    })));
    Ok(())
}
