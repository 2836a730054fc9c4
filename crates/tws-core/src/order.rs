//! Order and order-state value objects.
//!
//! `Order` mirrors the field layout of the open-order message. Every field
//! the wire reads through a "max" decode defaults to the unset sentinel so
//! that a field an older message version never carried looks exactly like
//! one the server sent as empty.
//!
//! This type carries no business rules: it is what the server said the
//! order is, nothing more.

use bytes::Bytes;

use crate::contract::TagValue;
use crate::unset::{is_unset_double, UNSET_DOUBLE, UNSET_INTEGER};

/// Per-leg price of a combo order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderComboLeg {
    pub price: f64,
}

impl Default for OrderComboLeg {
    fn default() -> Self {
        OrderComboLeg {
            price: UNSET_DOUBLE,
        }
    }
}

/// An open order as reported by the server.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    // Order identification
    pub order_id: i64,
    pub client_id: i64,
    pub perm_id: i64,

    // Main order fields
    pub action: Bytes,
    pub total_quantity: i64,
    pub order_type: Bytes,
    pub lmt_price: f64,
    pub aux_price: f64,

    // Extended order fields
    pub tif: Bytes,
    pub oca_group: Bytes,
    pub oca_type: i32,
    pub order_ref: Bytes,
    pub parent_id: i64,
    pub block_order: bool,
    pub sweep_to_fill: bool,
    pub display_size: i32,
    pub trigger_method: i32,
    pub outside_rth: bool,
    pub hidden: bool,
    pub good_after_time: Bytes,
    pub good_till_date: Bytes,
    pub rule_80a: Bytes,
    pub all_or_none: bool,
    pub min_qty: i32,
    pub percent_offset: f64,
    pub trail_stop_price: f64,
    pub trailing_percent: f64,

    // Financial advisors
    pub fa_group: Bytes,
    pub fa_profile: Bytes,
    pub fa_method: Bytes,
    pub fa_percentage: Bytes,

    // Institutional
    pub open_close: Bytes,
    /// 0 = customer, 1 = firm.
    pub origin: i32,
    pub short_sale_slot: i32,
    pub designated_location: Bytes,
    pub exempt_code: i32,

    // SMART routing
    pub discretionary_amt: f64,
    pub e_trade_only: bool,
    pub firm_quote_only: bool,
    pub nbbo_price_cap: f64,
    pub opt_out_smart_routing: bool,

    // BOX exchange
    pub auction_strategy: i32,
    pub starting_price: f64,
    pub stock_ref_price: f64,
    pub delta: f64,

    // Pegged to stock and VOL orders
    pub stock_range_lower: f64,
    pub stock_range_upper: f64,

    // Volatility orders
    pub volatility: f64,
    pub volatility_type: i32,
    pub delta_neutral_order_type: Bytes,
    pub delta_neutral_aux_price: f64,
    pub delta_neutral_con_id: i32,
    pub delta_neutral_settling_firm: Bytes,
    pub delta_neutral_clearing_account: Bytes,
    pub delta_neutral_clearing_intent: Bytes,
    pub delta_neutral_open_close: Bytes,
    pub delta_neutral_short_sale: bool,
    pub delta_neutral_short_sale_slot: i32,
    pub delta_neutral_designated_location: Bytes,
    pub continuous_update: bool,
    pub reference_price_type: i32,

    // Combo orders
    pub basis_points: f64,
    pub basis_points_type: i32,

    // Scale orders
    pub scale_init_level_size: i32,
    pub scale_subs_level_size: i32,
    pub scale_price_increment: f64,
    pub scale_price_adjust_value: f64,
    pub scale_price_adjust_interval: i32,
    pub scale_profit_offset: f64,
    pub scale_auto_reset: bool,
    pub scale_init_position: i32,
    pub scale_init_fill_qty: i32,
    pub scale_random_percent: bool,

    // Hedge orders
    pub hedge_type: Bytes,
    pub hedge_param: Bytes,

    // Clearing info
    pub account: Bytes,
    pub settling_firm: Bytes,
    pub clearing_account: Bytes,
    pub clearing_intent: Bytes,

    // Algo orders
    pub algo_strategy: Bytes,
    pub algo_params: Vec<TagValue>,
    pub smart_combo_routing_params: Vec<TagValue>,
    pub order_combo_legs: Vec<OrderComboLeg>,

    pub what_if: bool,
    pub not_held: bool,
}

impl Default for Order {
    fn default() -> Self {
        Order {
            order_id: 0,
            client_id: 0,
            perm_id: 0,

            action: Bytes::new(),
            total_quantity: 0,
            order_type: Bytes::new(),
            lmt_price: UNSET_DOUBLE,
            aux_price: UNSET_DOUBLE,

            tif: Bytes::new(),
            oca_group: Bytes::new(),
            oca_type: 0,
            order_ref: Bytes::new(),
            parent_id: 0,
            block_order: false,
            sweep_to_fill: false,
            display_size: 0,
            trigger_method: 0,
            outside_rth: false,
            hidden: false,
            good_after_time: Bytes::new(),
            good_till_date: Bytes::new(),
            rule_80a: Bytes::new(),
            all_or_none: false,
            min_qty: UNSET_INTEGER,
            percent_offset: UNSET_DOUBLE,
            trail_stop_price: UNSET_DOUBLE,
            trailing_percent: UNSET_DOUBLE,

            fa_group: Bytes::new(),
            fa_profile: Bytes::new(),
            fa_method: Bytes::new(),
            fa_percentage: Bytes::new(),

            open_close: Bytes::from_static(b"O"),
            origin: 0,
            short_sale_slot: 0,
            designated_location: Bytes::new(),
            exempt_code: -1,

            discretionary_amt: 0.0,
            e_trade_only: true,
            firm_quote_only: true,
            nbbo_price_cap: UNSET_DOUBLE,
            opt_out_smart_routing: false,

            auction_strategy: 0,
            starting_price: UNSET_DOUBLE,
            stock_ref_price: UNSET_DOUBLE,
            delta: UNSET_DOUBLE,

            stock_range_lower: UNSET_DOUBLE,
            stock_range_upper: UNSET_DOUBLE,

            volatility: UNSET_DOUBLE,
            volatility_type: UNSET_INTEGER,
            delta_neutral_order_type: Bytes::new(),
            delta_neutral_aux_price: UNSET_DOUBLE,
            delta_neutral_con_id: 0,
            delta_neutral_settling_firm: Bytes::new(),
            delta_neutral_clearing_account: Bytes::new(),
            delta_neutral_clearing_intent: Bytes::new(),
            delta_neutral_open_close: Bytes::new(),
            delta_neutral_short_sale: false,
            delta_neutral_short_sale_slot: 0,
            delta_neutral_designated_location: Bytes::new(),
            continuous_update: false,
            reference_price_type: UNSET_INTEGER,

            basis_points: UNSET_DOUBLE,
            basis_points_type: UNSET_INTEGER,

            scale_init_level_size: UNSET_INTEGER,
            scale_subs_level_size: UNSET_INTEGER,
            scale_price_increment: UNSET_DOUBLE,
            scale_price_adjust_value: UNSET_DOUBLE,
            scale_price_adjust_interval: UNSET_INTEGER,
            scale_profit_offset: UNSET_DOUBLE,
            scale_auto_reset: false,
            scale_init_position: UNSET_INTEGER,
            scale_init_fill_qty: UNSET_INTEGER,
            scale_random_percent: false,

            hedge_type: Bytes::new(),
            hedge_param: Bytes::new(),

            account: Bytes::new(),
            settling_firm: Bytes::new(),
            clearing_account: Bytes::new(),
            clearing_intent: Bytes::new(),

            algo_strategy: Bytes::new(),
            algo_params: Vec::new(),
            smart_combo_routing_params: Vec::new(),
            order_combo_legs: Vec::new(),

            what_if: false,
            not_held: false,
        }
    }
}

impl Order {
    /// Returns `true` if the order carries a delta-neutral order type,
    /// which gates the delta-neutral leg fields on the wire.
    pub fn has_delta_neutral_order(&self) -> bool {
        !self.delta_neutral_order_type.is_empty()
    }

    /// Returns `true` if the scale price increment is set and positive,
    /// which gates the scale adjustment fields on the wire.
    pub fn has_scale_price_increment(&self) -> bool {
        self.scale_price_increment > 0.0 && !is_unset_double(self.scale_price_increment)
    }
}

/// Margin / commission preview attached to an open order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderState {
    pub status: Bytes,
    pub init_margin: Bytes,
    pub maint_margin: Bytes,
    pub equity_with_loan: Bytes,
    pub commission: f64,
    pub min_commission: f64,
    pub max_commission: f64,
    pub commission_currency: Bytes,
    pub warning_text: Bytes,
}

impl Default for OrderState {
    fn default() -> Self {
        OrderState {
            status: Bytes::new(),
            init_margin: Bytes::new(),
            maint_margin: Bytes::new(),
            equity_with_loan: Bytes::new(),
            commission: UNSET_DOUBLE,
            min_commission: UNSET_DOUBLE,
            max_commission: UNSET_DOUBLE,
            commission_currency: Bytes::new(),
            warning_text: Bytes::new(),
        }
    }
}
