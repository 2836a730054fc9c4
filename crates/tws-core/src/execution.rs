//! Execution and commission report value objects.

use bytes::Bytes;

/// A single fill.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Execution {
    pub exec_id: Bytes,
    pub time: Bytes,
    pub acct_number: Bytes,
    pub exchange: Bytes,

    /// `BOT` or `SLD`.
    pub side: Bytes,
    pub shares: i32,
    pub price: f64,
    pub perm_id: i32,
    pub client_id: i32,
    pub order_id: i32,
    pub liquidation: i32,
    pub cum_qty: i32,
    pub avg_price: f64,
    pub order_ref: Bytes,
    pub ev_rule: Bytes,
    pub ev_multiplier: f64,
}

/// Commission charged for an execution, delivered separately from it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommissionReport {
    pub exec_id: Bytes,
    pub commission: f64,
    pub currency: Bytes,
    pub realized_pnl: f64,
    pub yield_value: f64,

    /// `YYYYMMDD` as an integer.
    pub yield_redemption_date: i32,
}
