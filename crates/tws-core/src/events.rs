//! Events produced by the protocol engine.
//!
//! These are **transport-agnostic** logical events:
//! - [`Event`]: everything the engine can report, one variant per
//!   message category.
//! - [`EventSink`]: where the engine delivers them, strictly in the order
//!   their bytes arrived on the wire.
//!
//! Note: wire decoding lives in the `tws-protocol` crate; this module is
//! purely logical.

use bytes::Bytes;

use crate::bar::{Bar, RealTimeBar, ScanRow};
use crate::contract::{Contract, ContractDetails, UnderComp};
use crate::error::ClientError;
use crate::execution::{CommissionReport, Execution};
use crate::order::{Order, OrderState};
use crate::tick_type::TickType;

/// A decoded event.
///
/// One inbound message produces one or more of these; a price tick for
/// instance yields a [`Event::TickPrice`] followed by a [`Event::TickSize`]
/// for the bid, ask and last tick types.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    // Market data
    TickPrice(TickPrice),
    TickSize(TickSize),
    TickOptionComputation(TickOptionComputation),
    TickGeneric {
        ticker_id: i32,
        tick_type: TickType,
        value: f64,
    },
    TickString {
        ticker_id: i32,
        tick_type: TickType,
        value: Bytes,
    },
    TickEfp(TickEfp),
    TickSnapshotEnd(i32),
    MarketDataType {
        req_id: i32,
        market_data_type: i32,
    },
    MarketDepth(MarketDepth),
    MarketDepthL2(MarketDepthL2),
    RealTimeBar {
        req_id: i32,
        bar: RealTimeBar,
    },
    HistoricalData {
        req_id: i32,
        bar: Bar,
    },
    ScannerParameters(Bytes),
    ScannerData {
        req_id: i32,
        row: Box<ScanRow>,
    },
    ScannerDataEnd(i32),
    FundamentalData {
        req_id: i32,
        data: Bytes,
    },
    NewsBulletin(NewsBulletin),

    // Orders and executions
    OrderStatus(OrderStatus),
    OpenOrder(Box<OpenOrder>),
    OpenOrderEnd,
    NextValidId(i64),
    ExecDetails {
        req_id: i32,
        contract: Box<Contract>,
        execution: Box<Execution>,
    },
    ExecDetailsEnd(i32),
    CommissionReport(CommissionReport),
    DeltaNeutralValidation {
        req_id: i32,
        under_comp: UnderComp,
    },

    // Contracts
    ContractDetails {
        req_id: i32,
        details: Box<ContractDetails>,
    },
    BondContractDetails {
        req_id: i32,
        details: Box<ContractDetails>,
    },
    ContractDetailsEnd(i32),

    // Account and portfolio
    AccountValue(AccountValue),
    Portfolio(Box<PortfolioUpdate>),
    AccountTime(Bytes),
    AccountDownloadEnd(Bytes),
    Position(Box<Position>),
    PositionEnd,
    AccountSummary(AccountSummary),
    AccountSummaryEnd(i32),
    ManagedAccounts(Bytes),
    ReceiveFa {
        fa_data_type: i32,
        xml: Bytes,
    },

    // Session
    CurrentTime(i64),
    VerifyMessageApi(Bytes),
    VerifyCompleted {
        is_successful: bool,
        error_text: Bytes,
    },
    DisplayGroupList {
        req_id: i32,
        groups: Bytes,
    },
    DisplayGroupUpdated {
        req_id: i32,
        contract_info: Bytes,
    },

    /// An error reported by the server.
    Error(ApiError),

    /// A failure detected by the client itself (unknown message, bad field,
    /// stale server). Always followed by [`Event::ConnectionClosed`].
    ClientError(ClientError),

    /// The connection was torn down; nothing follows for this connection.
    ConnectionClosed,
}

/// Price tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickPrice {
    pub ticker_id: i32,
    pub tick_type: TickType,
    pub price: f64,
    pub can_auto_execute: bool,
}

/// Size tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSize {
    pub ticker_id: i32,
    pub tick_type: TickType,
    pub size: i32,
}

/// Option model computation.
///
/// Any value outside its meaningful range arrives as the unset sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOptionComputation {
    pub ticker_id: i32,
    pub tick_type: TickType,
    pub implied_vol: f64,
    pub delta: f64,
    pub opt_price: f64,
    pub pv_dividend: f64,
    pub gamma: f64,
    pub vega: f64,
    pub theta: f64,
    pub und_price: f64,
}

/// Exchange-for-physical tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickEfp {
    pub ticker_id: i32,
    pub tick_type: TickType,
    pub basis_points: f64,
    pub formatted_basis_points: Bytes,
    pub implied_futures_price: f64,
    pub hold_days: i32,
    pub future_expiry: Bytes,
    pub dividend_impact: f64,
    pub dividends_to_expiry: f64,
}

/// Order status change.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderStatus {
    pub order_id: i32,
    pub status: Bytes,
    pub filled: i32,
    pub remaining: i32,
    pub avg_fill_price: f64,
    pub perm_id: i32,
    pub parent_id: i32,
    pub last_fill_price: f64,
    pub client_id: i32,
    pub why_held: Bytes,
}

/// An error message sent by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub id: i32,
    pub code: i32,
    pub message: Bytes,
}

/// Open order report.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenOrder {
    pub order_id: i64,
    pub contract: Contract,
    pub order: Order,
    pub order_state: OrderState,
}

/// Account value update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountValue {
    pub key: Bytes,
    pub value: Bytes,
    pub currency: Bytes,
    pub account_name: Bytes,
}

/// Portfolio update for one contract.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioUpdate {
    pub contract: Contract,
    pub position: i32,
    pub market_price: f64,
    pub market_value: f64,
    pub average_cost: f64,
    pub unrealized_pnl: f64,
    pub realized_pnl: f64,
    pub account_name: Bytes,
}

/// Position report.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub account: Bytes,
    pub contract: Contract,
    pub position: i32,
    pub avg_cost: f64,
}

/// Account summary row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSummary {
    pub req_id: i32,
    pub account: Bytes,
    pub tag: Bytes,
    pub value: Bytes,
    pub currency: Bytes,
}

/// Level 1 market depth update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketDepth {
    pub id: i32,
    pub position: i32,
    pub operation: i32,
    pub side: i32,
    pub price: f64,
    pub size: i32,
}

/// Level 2 market depth update.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketDepthL2 {
    pub id: i32,
    pub position: i32,
    pub market_maker: Bytes,
    pub operation: i32,
    pub side: i32,
    pub price: f64,
    pub size: i32,
}

/// News bulletin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsBulletin {
    pub msg_id: i32,
    pub msg_type: i32,
    pub message: Bytes,
    pub origin_exchange: Bytes,
}

// -----------------------------------------------------------------------------
// Sinks
// -----------------------------------------------------------------------------

/// Receiver of decoded events.
///
/// The engine calls [`EventSink::emit`] synchronously, once per event, in
/// wire order. There is exactly one consumer per connection.
pub trait EventSink {
    fn emit(&mut self, event: Event);
}

impl EventSink for Vec<Event> {
    fn emit(&mut self, event: Event) {
        self.push(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: Event) {
        (**self).emit(event);
    }
}

/// Adapts a closure into an [`EventSink`].
pub struct FnSink<F>(pub F);

impl<F: FnMut(Event)> EventSink for FnSink<F> {
    fn emit(&mut self, event: Event) {
        (self.0)(event);
    }
}

// -----------------------------------------------------------------------------
// Convenience helpers
// -----------------------------------------------------------------------------

impl Event {
    /// Returns `true` if this event ends the connection.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Event::ConnectionClosed)
    }

    /// Short, stable name of the variant, used for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::TickPrice(_) => "tick_price",
            Event::TickSize(_) => "tick_size",
            Event::TickOptionComputation(_) => "tick_option_computation",
            Event::TickGeneric { .. } => "tick_generic",
            Event::TickString { .. } => "tick_string",
            Event::TickEfp(_) => "tick_efp",
            Event::TickSnapshotEnd(_) => "tick_snapshot_end",
            Event::MarketDataType { .. } => "market_data_type",
            Event::MarketDepth(_) => "market_depth",
            Event::MarketDepthL2(_) => "market_depth_l2",
            Event::RealTimeBar { .. } => "real_time_bar",
            Event::HistoricalData { .. } => "historical_data",
            Event::ScannerParameters(_) => "scanner_parameters",
            Event::ScannerData { .. } => "scanner_data",
            Event::ScannerDataEnd(_) => "scanner_data_end",
            Event::FundamentalData { .. } => "fundamental_data",
            Event::NewsBulletin(_) => "news_bulletin",
            Event::OrderStatus(_) => "order_status",
            Event::OpenOrder(_) => "open_order",
            Event::OpenOrderEnd => "open_order_end",
            Event::NextValidId(_) => "next_valid_id",
            Event::ExecDetails { .. } => "exec_details",
            Event::ExecDetailsEnd(_) => "exec_details_end",
            Event::CommissionReport(_) => "commission_report",
            Event::DeltaNeutralValidation { .. } => "delta_neutral_validation",
            Event::ContractDetails { .. } => "contract_details",
            Event::BondContractDetails { .. } => "bond_contract_details",
            Event::ContractDetailsEnd(_) => "contract_details_end",
            Event::AccountValue(_) => "account_value",
            Event::Portfolio(_) => "portfolio",
            Event::AccountTime(_) => "account_time",
            Event::AccountDownloadEnd(_) => "account_download_end",
            Event::Position(_) => "position",
            Event::PositionEnd => "position_end",
            Event::AccountSummary(_) => "account_summary",
            Event::AccountSummaryEnd(_) => "account_summary_end",
            Event::ManagedAccounts(_) => "managed_accounts",
            Event::ReceiveFa { .. } => "receive_fa",
            Event::CurrentTime(_) => "current_time",
            Event::VerifyMessageApi(_) => "verify_message_api",
            Event::VerifyCompleted { .. } => "verify_completed",
            Event::DisplayGroupList { .. } => "display_group_list",
            Event::DisplayGroupUpdated { .. } => "display_group_updated",
            Event::Error(_) => "error",
            Event::ClientError(_) => "client_error",
            Event::ConnectionClosed => "connection_closed",
        }
    }
}
