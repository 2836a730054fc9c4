//! Inbound message decoder.
//!
//! A message is a type tag, a message version and then whatever fields
//! that `(type, version, server version)` triple calls for. Decoding is a
//! pure function of those inputs and the bytes in the frame buffer:
//!
//! - [`FieldReader`] scans typed fields and carries the negotiated server
//!   version explicitly.
//! - [`decode_message`] reads the tag and version, dispatches to the
//!   per-category submodule and returns the events the message produced.
//!
//! Nothing is emitted from here. If a field runs out of bytes halfway the
//! call returns [`ProtocolError::Incomplete`] and the session rolls the
//! buffer back, so a decode may run many times over the same message.

use bytes::Bytes;
use tracing::trace;
use tws_core::{Event, TagValue};

use crate::error::ProtocolError;
use crate::field_codec;
use crate::frame_buffer::FrameBuffer;
use crate::schema::{field, FieldKind, Schema};
use crate::wire_types::IncomingType;

/// Body of the `*End` style messages that only name their request.
pub(crate) const REQ_ID_ONLY: Schema = &[field("reqId", FieldKind::Int)];

mod account;
mod contracts;
mod market_data;
mod orders;
mod system;

/// Typed field scanner over the inbound buffer.
pub struct FieldReader<'a> {
    buf: &'a mut FrameBuffer,
    server_version: i32,
}

impl<'a> FieldReader<'a> {
    pub fn new(buf: &'a mut FrameBuffer, server_version: i32) -> Self {
        FieldReader {
            buf,
            server_version,
        }
    }

    /// Negotiated server version the message is decoded against.
    pub fn server_version(&self) -> i32 {
        self.server_version
    }

    pub fn read_int(&mut self) -> Result<i32, ProtocolError> {
        field_codec::decode_int(self.buf.next_field()?)
    }

    pub fn read_int_max(&mut self) -> Result<i32, ProtocolError> {
        field_codec::decode_int_max(self.buf.next_field()?)
    }

    pub fn read_long(&mut self) -> Result<i64, ProtocolError> {
        field_codec::decode_long(self.buf.next_field()?)
    }

    pub fn read_double(&mut self) -> Result<f64, ProtocolError> {
        field_codec::decode_double(self.buf.next_field()?)
    }

    pub fn read_double_max(&mut self) -> Result<f64, ProtocolError> {
        field_codec::decode_double_max(self.buf.next_field()?)
    }

    pub fn read_bool(&mut self) -> Result<bool, ProtocolError> {
        field_codec::decode_bool(self.buf.next_field()?)
    }

    pub fn read_string(&mut self) -> Result<Bytes, ProtocolError> {
        Ok(field_codec::decode_string(self.buf.next_field()?))
    }

    /// A count followed by that many `(tag, value)` pairs.
    pub fn read_tag_values(&mut self) -> Result<Vec<TagValue>, ProtocolError> {
        let count = self.read_int()?;
        let mut list = Vec::new();
        for _ in 0..count.max(0) {
            let tag = self.read_string()?;
            let value = self.read_string()?;
            list.push(TagValue { tag, value });
        }
        Ok(list)
    }
}

/// Decode one whole message, tag included.
///
/// Returns the events in the order the message produces them.
pub fn decode_message(r: &mut FieldReader<'_>) -> Result<Vec<Event>, ProtocolError> {
    let tag = r.read_int()?;
    let msg_type = IncomingType::from_i32(tag).ok_or(ProtocolError::UnknownMessageType(tag))?;
    let version = r.read_int()?;

    trace!(?msg_type, version, "decoding message");

    let mut out = Vec::with_capacity(2);
    use IncomingType::*;
    match msg_type {
        TickPrice => market_data::tick_price(r, version, &mut out)?,
        TickSize => market_data::tick_size(r, version, &mut out)?,
        TickOptionComputation => market_data::tick_option_computation(r, version, &mut out)?,
        TickGeneric => market_data::tick_generic(r, version, &mut out)?,
        TickString => market_data::tick_string(r, version, &mut out)?,
        TickEfp => market_data::tick_efp(r, version, &mut out)?,
        TickSnapshotEnd => market_data::tick_snapshot_end(r, version, &mut out)?,
        MarketDataType => market_data::market_data_type(r, version, &mut out)?,
        MarketDepth => market_data::market_depth(r, version, &mut out)?,
        MarketDepthL2 => market_data::market_depth_l2(r, version, &mut out)?,
        RealTimeBars => market_data::real_time_bar(r, version, &mut out)?,
        HistoricalData => market_data::historical_data(r, version, &mut out)?,
        ScannerParameters => market_data::scanner_parameters(r, version, &mut out)?,
        ScannerData => market_data::scanner_data(r, version, &mut out)?,
        FundamentalData => market_data::fundamental_data(r, version, &mut out)?,
        NewsBulletins => market_data::news_bulletin(r, version, &mut out)?,

        OrderStatus => orders::order_status(r, version, &mut out)?,
        OpenOrder => orders::open_order(r, version, &mut out)?,
        OpenOrderEnd => out.push(Event::OpenOrderEnd),
        NextValidId => orders::next_valid_id(r, version, &mut out)?,
        ExecutionData => orders::execution_data(r, version, &mut out)?,
        ExecutionDataEnd => orders::execution_data_end(r, version, &mut out)?,
        CommissionReport => orders::commission_report(r, version, &mut out)?,
        DeltaNeutralValidation => orders::delta_neutral_validation(r, version, &mut out)?,

        ContractData => contracts::contract_data(r, version, &mut out)?,
        BondContractData => contracts::bond_contract_data(r, version, &mut out)?,
        ContractDataEnd => contracts::contract_data_end(r, version, &mut out)?,

        AcctValue => account::account_value(r, version, &mut out)?,
        PortfolioValue => account::portfolio_value(r, version, &mut out)?,
        AcctUpdateTime => account::account_time(r, version, &mut out)?,
        AcctDownloadEnd => account::account_download_end(r, version, &mut out)?,
        PositionData => account::position(r, version, &mut out)?,
        PositionEnd => out.push(Event::PositionEnd),
        AccountSummary => account::account_summary(r, version, &mut out)?,
        AccountSummaryEnd => account::account_summary_end(r, version, &mut out)?,
        ManagedAccts => account::managed_accounts(r, version, &mut out)?,
        ReceiveFa => account::receive_fa(r, version, &mut out)?,

        ErrMsg => system::error_message(r, version, &mut out)?,
        CurrentTime => system::current_time(r, version, &mut out)?,
        VerifyMessageApi => system::verify_message_api(r, version, &mut out)?,
        VerifyCompleted => system::verify_completed(r, version, &mut out)?,
        DisplayGroupList => system::display_group_list(r, version, &mut out)?,
        DisplayGroupUpdated => system::display_group_updated(r, version, &mut out)?,
    }
    Ok(out)
}

/// The field table of a message decoded as a flat record.
///
/// `None` for the messages decoded with straight-line code (price tick,
/// option computation, open order) and for those that carry no body.
/// Historical and scanner data return their header table; their rows
/// have tables of their own.
pub fn schema_for(msg_type: IncomingType) -> Option<Schema> {
    use IncomingType::*;
    let schema = match msg_type {
        TickSize => market_data::TICK_SIZE,
        TickGeneric => market_data::TICK_GENERIC,
        TickString => market_data::TICK_STRING,
        TickEfp => market_data::TICK_EFP,
        TickSnapshotEnd => REQ_ID_ONLY,
        MarketDataType => market_data::MARKET_DATA_TYPE,
        MarketDepth => market_data::MARKET_DEPTH,
        MarketDepthL2 => market_data::MARKET_DEPTH_L2,
        RealTimeBars => market_data::REAL_TIME_BAR,
        HistoricalData => market_data::HISTORICAL_HEADER,
        ScannerParameters => market_data::SCANNER_PARAMETERS,
        ScannerData => market_data::SCANNER_HEADER,
        FundamentalData => market_data::FUNDAMENTAL_DATA,
        NewsBulletins => market_data::NEWS_BULLETIN,

        OrderStatus => orders::ORDER_STATUS,
        NextValidId => orders::NEXT_VALID_ID,
        ExecutionData => orders::EXECUTION_DATA,
        ExecutionDataEnd => REQ_ID_ONLY,
        CommissionReport => orders::COMMISSION_REPORT,
        DeltaNeutralValidation => orders::DELTA_NEUTRAL_VALIDATION,

        ContractData => contracts::CONTRACT_DATA,
        BondContractData => contracts::BOND_CONTRACT_DATA,
        ContractDataEnd => REQ_ID_ONLY,

        AcctValue => account::ACCOUNT_VALUE,
        PortfolioValue => account::PORTFOLIO_VALUE,
        AcctUpdateTime => account::ACCOUNT_TIME,
        AcctDownloadEnd => account::ACCOUNT_DOWNLOAD_END,
        PositionData => account::POSITION,
        AccountSummary => account::ACCOUNT_SUMMARY,
        AccountSummaryEnd => REQ_ID_ONLY,
        ManagedAccts => account::MANAGED_ACCOUNTS,
        ReceiveFa => account::RECEIVE_FA,

        ErrMsg => system::ERROR_MESSAGE,
        CurrentTime => system::CURRENT_TIME,
        VerifyMessageApi => system::VERIFY_MESSAGE_API,
        VerifyCompleted => system::VERIFY_COMPLETED,
        DisplayGroupList => system::DISPLAY_GROUP_LIST,
        DisplayGroupUpdated => system::DISPLAY_GROUP_UPDATED,

        TickPrice | TickOptionComputation | OpenOrder | OpenOrderEnd | PositionEnd => {
            return None
        }
    };
    Some(schema)
}

/// Row tables of the messages that carry a counted list of rows.
pub mod rows {
    pub use super::market_data::{HISTORICAL_BAR, SCANNER_ROW};
}
