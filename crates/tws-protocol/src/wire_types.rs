//! Low-level wire types and constants.
//!
//! This module defines:
//! - The field delimiter.
//! - Client / server version constants and the thresholds that gate the
//!   handshake.
//! - Message type IDs for inbound messages.
//!
//! The actual encode/decode logic lives in `field_codec`, `encoder` and
//! `decoder`.

/// Every field on the wire ends with exactly one of these.
pub const DELIMITER: u8 = 0;

/// Highest protocol version this client speaks. Sent first on connect.
pub const CLIENT_VERSION: i32 = 63;

/// Oldest server version this client accepts.
pub const MIN_SERVER_VERSION: i32 = 38;

/// Outbound request tag of the start-session request.
pub const START_API: i32 = 71;

/// Version literal sent with [`START_API`].
pub const START_API_VERSION: i32 = 1;

/// Request id used by messages that predate per-request ids.
pub const NO_REQUEST_ID: i32 = -1;

/// Server versions at which the protocol changed shape.
pub mod server_version {
    /// The server sends its client id acknowledgement from here on.
    pub const CLIENT_ID: i32 = 3;

    /// The greeting carries the server wall-clock time from here on.
    pub const TIME: i32 = 20;

    /// The one server version whose open order carries a throwaway
    /// short-sale exempt code.
    pub const SSHORTX_OLD: i32 = 51;

    /// Identification switches from a bare client id to [`super::START_API`].
    pub const LINKING: i32 = 70;
}

/// Inbound message types (server → client).
///
/// These IDs are the first field of every message.
#[repr(i32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum IncomingType {
    TickPrice = 1,
    TickSize = 2,
    OrderStatus = 3,
    ErrMsg = 4,
    OpenOrder = 5,
    AcctValue = 6,
    PortfolioValue = 7,
    AcctUpdateTime = 8,
    NextValidId = 9,
    ContractData = 10,
    ExecutionData = 11,
    MarketDepth = 12,
    MarketDepthL2 = 13,
    NewsBulletins = 14,
    ManagedAccts = 15,
    ReceiveFa = 16,
    HistoricalData = 17,
    BondContractData = 18,
    ScannerParameters = 19,
    ScannerData = 20,
    TickOptionComputation = 21,
    TickGeneric = 45,
    TickString = 46,
    TickEfp = 47,
    CurrentTime = 49,
    RealTimeBars = 50,
    FundamentalData = 51,
    ContractDataEnd = 52,
    OpenOrderEnd = 53,
    AcctDownloadEnd = 54,
    ExecutionDataEnd = 55,
    DeltaNeutralValidation = 56,
    TickSnapshotEnd = 57,
    MarketDataType = 58,
    CommissionReport = 59,
    PositionData = 61,
    PositionEnd = 62,
    AccountSummary = 63,
    AccountSummaryEnd = 64,
    VerifyMessageApi = 65,
    VerifyCompleted = 66,
    DisplayGroupList = 67,
    DisplayGroupUpdated = 68,
}

impl IncomingType {
    /// Every inbound type this client decodes.
    pub const ALL: [IncomingType; 43] = [
        IncomingType::TickPrice,
        IncomingType::TickSize,
        IncomingType::OrderStatus,
        IncomingType::ErrMsg,
        IncomingType::OpenOrder,
        IncomingType::AcctValue,
        IncomingType::PortfolioValue,
        IncomingType::AcctUpdateTime,
        IncomingType::NextValidId,
        IncomingType::ContractData,
        IncomingType::ExecutionData,
        IncomingType::MarketDepth,
        IncomingType::MarketDepthL2,
        IncomingType::NewsBulletins,
        IncomingType::ManagedAccts,
        IncomingType::ReceiveFa,
        IncomingType::HistoricalData,
        IncomingType::BondContractData,
        IncomingType::ScannerParameters,
        IncomingType::ScannerData,
        IncomingType::TickOptionComputation,
        IncomingType::TickGeneric,
        IncomingType::TickString,
        IncomingType::TickEfp,
        IncomingType::CurrentTime,
        IncomingType::RealTimeBars,
        IncomingType::FundamentalData,
        IncomingType::ContractDataEnd,
        IncomingType::OpenOrderEnd,
        IncomingType::AcctDownloadEnd,
        IncomingType::ExecutionDataEnd,
        IncomingType::DeltaNeutralValidation,
        IncomingType::TickSnapshotEnd,
        IncomingType::MarketDataType,
        IncomingType::CommissionReport,
        IncomingType::PositionData,
        IncomingType::PositionEnd,
        IncomingType::AccountSummary,
        IncomingType::AccountSummaryEnd,
        IncomingType::VerifyMessageApi,
        IncomingType::VerifyCompleted,
        IncomingType::DisplayGroupList,
        IncomingType::DisplayGroupUpdated,
    ];

    pub fn from_i32(v: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| *t as i32 == v)
    }

    /// Wire tag of this type.
    pub fn tag(self) -> i32 {
        self as i32
    }
}
