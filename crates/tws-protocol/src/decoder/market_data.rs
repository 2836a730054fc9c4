//! Market data messages: ticks, depth, bars, scanner, news.

use tws_core::{
    Bar, Contract, ContractDetails, Event, MarketDepth, MarketDepthL2, NewsBulletin, RealTimeBar,
    ScanRow, TickEfp, TickOptionComputation, TickPrice, TickSize, TickType, UNSET_DOUBLE,
};

use super::{FieldReader, REQ_ID_ONLY};
use crate::error::ProtocolError;
use crate::field_codec::decode_text_bool;
use crate::schema::{field, FieldKind::*, Record, Schema};

// ============================================================================
// Schemas
// ============================================================================

pub(crate) const TICK_SIZE: Schema = &[
    field("tickerId", Int),
    field("tickType", Int),
    field("size", Int),
];

pub(crate) const TICK_GENERIC: Schema = &[
    field("tickerId", Int),
    field("tickType", Int),
    field("value", Double),
];

pub(crate) const TICK_STRING: Schema = &[
    field("tickerId", Int),
    field("tickType", Int),
    field("value", Str),
];

pub(crate) const TICK_EFP: Schema = &[
    field("tickerId", Int),
    field("tickType", Int),
    field("basisPoints", Double),
    field("formattedBasisPoints", Str),
    field("impliedFuturesPrice", Double),
    field("holdDays", Int),
    field("futureExpiry", Str),
    field("dividendImpact", Double),
    field("dividendsToExpiry", Double),
];

pub(crate) const MARKET_DATA_TYPE: Schema = &[
    field("reqId", Int),
    field("marketDataType", Int),
];

pub(crate) const MARKET_DEPTH: Schema = &[
    field("id", Int),
    field("position", Int),
    field("operation", Int),
    field("side", Int),
    field("price", Double),
    field("size", Int),
];

pub(crate) const MARKET_DEPTH_L2: Schema = &[
    field("id", Int),
    field("position", Int),
    field("marketMaker", Str),
    field("operation", Int),
    field("side", Int),
    field("price", Double),
    field("size", Int),
];

pub(crate) const REAL_TIME_BAR: Schema = &[
    field("reqId", Int),
    field("time", Long),
    field("open", Double),
    field("high", Double),
    field("low", Double),
    field("close", Double),
    field("volume", Long),
    field("average", Double),
    field("count", Int),
];

/// Historical data up to the row count.
pub(crate) const HISTORICAL_HEADER: Schema = &[
    field("reqId", Int),
    field("startDate", Str),
    field("endDate", Str),
];

pub const HISTORICAL_BAR: Schema = &[
    field("date", Str),
    field("open", Double),
    field("high", Double),
    field("low", Double),
    field("close", Double),
    field("volume", Int),
    field("average", Double),
    field("hasGaps", Str),
    field("barCount", Int),
];

pub(crate) const SCANNER_PARAMETERS: Schema = &[field("xml", Str)];

/// Scanner data up to the row count.
pub(crate) const SCANNER_HEADER: Schema = &[field("tickerId", Int)];

pub const SCANNER_ROW: Schema = &[
    field("rank", Int),
    field("conId", Int),
    field("symbol", Str),
    field("secType", Str),
    field("expiry", Str),
    field("strike", Double),
    field("right", Str),
    field("exchange", Str),
    field("currency", Str),
    field("localSymbol", Str),
    field("marketName", Str),
    field("tradingClass", Str),
    field("distance", Str),
    field("benchmark", Str),
    field("projection", Str),
    field("legsStr", Str),
];

pub(crate) const FUNDAMENTAL_DATA: Schema = &[field("reqId", Int), field("data", Str)];

pub(crate) const NEWS_BULLETIN: Schema = &[
    field("msgId", Int),
    field("msgType", Int),
    field("message", Str),
    field("originatingExch", Str),
];

// ============================================================================
// Ticks
// ============================================================================

/// Price tick, followed by its size tick for BID / ASK / LAST.
pub(super) fn tick_price(
    r: &mut FieldReader<'_>,
    _version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let ticker_id = r.read_int()?;
    let tick_type = TickType(r.read_int()?);
    let price = r.read_double()?;
    let size = r.read_int()?;
    let can_auto_execute = r.read_bool()?;

    out.push(Event::TickPrice(TickPrice {
        ticker_id,
        tick_type,
        price,
        can_auto_execute,
    }));

    if let Some(size_type) = tick_type.companion_size() {
        out.push(Event::TickSize(TickSize {
            ticker_id,
            tick_type: size_type,
            size,
        }));
    }
    Ok(())
}

pub(super) fn tick_size(
    r: &mut FieldReader<'_>,
    version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let rec = Record::read(r, TICK_SIZE, version)?;
    out.push(Event::TickSize(TickSize {
        ticker_id: rec.int("tickerId"),
        tick_type: TickType(rec.int("tickType")),
        size: rec.int("size"),
    }));
    Ok(())
}

/// Option model tick.
///
/// Every value outside its meaningful range is replaced by the unset
/// sentinel. Option price and PV dividend are only on the wire from
/// version 6, or for the model tick type; the greeks and the underlying
/// price only from version 6.
pub(super) fn tick_option_computation(
    r: &mut FieldReader<'_>,
    version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let ticker_id = r.read_int()?;
    let tick_type = TickType(r.read_int()?);

    let implied_vol = unset_if(r.read_double()?, |v| v < 0.0);
    let delta = unset_if(r.read_double()?, |v| !(-1.0..=1.0).contains(&v));

    let mut opt_price = UNSET_DOUBLE;
    let mut pv_dividend = UNSET_DOUBLE;
    if version >= 6 || tick_type == TickType::MODEL_OPTION {
        opt_price = unset_if(r.read_double()?, |v| v < 0.0);
        pv_dividend = unset_if(r.read_double()?, |v| v < 0.0);
    }

    let mut gamma = UNSET_DOUBLE;
    let mut vega = UNSET_DOUBLE;
    let mut theta = UNSET_DOUBLE;
    let mut und_price = UNSET_DOUBLE;
    if version >= 6 {
        let out_of_unit = |v: f64| !(-1.0..=1.0).contains(&v);
        gamma = unset_if(r.read_double()?, out_of_unit);
        vega = unset_if(r.read_double()?, out_of_unit);
        theta = unset_if(r.read_double()?, out_of_unit);
        und_price = unset_if(r.read_double()?, |v| v < 0.0);
    }

    out.push(Event::TickOptionComputation(TickOptionComputation {
        ticker_id,
        tick_type,
        implied_vol,
        delta,
        opt_price,
        pv_dividend,
        gamma,
        vega,
        theta,
        und_price,
    }));
    Ok(())
}

fn unset_if(value: f64, out_of_range: impl Fn(f64) -> bool) -> f64 {
    if out_of_range(value) {
        UNSET_DOUBLE
    } else {
        value
    }
}

pub(super) fn tick_generic(
    r: &mut FieldReader<'_>,
    version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let rec = Record::read(r, TICK_GENERIC, version)?;
    out.push(Event::TickGeneric {
        ticker_id: rec.int("tickerId"),
        tick_type: TickType(rec.int("tickType")),
        value: rec.double("value"),
    });
    Ok(())
}

pub(super) fn tick_string(
    r: &mut FieldReader<'_>,
    version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let rec = Record::read(r, TICK_STRING, version)?;
    out.push(Event::TickString {
        ticker_id: rec.int("tickerId"),
        tick_type: TickType(rec.int("tickType")),
        value: rec.string("value"),
    });
    Ok(())
}

pub(super) fn tick_efp(
    r: &mut FieldReader<'_>,
    version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let rec = Record::read(r, TICK_EFP, version)?;
    out.push(Event::TickEfp(TickEfp {
        ticker_id: rec.int("tickerId"),
        tick_type: TickType(rec.int("tickType")),
        basis_points: rec.double("basisPoints"),
        formatted_basis_points: rec.string("formattedBasisPoints"),
        implied_futures_price: rec.double("impliedFuturesPrice"),
        hold_days: rec.int("holdDays"),
        future_expiry: rec.string("futureExpiry"),
        dividend_impact: rec.double("dividendImpact"),
        dividends_to_expiry: rec.double("dividendsToExpiry"),
    }));
    Ok(())
}

pub(super) fn tick_snapshot_end(
    r: &mut FieldReader<'_>,
    version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let rec = Record::read(r, REQ_ID_ONLY, version)?;
    out.push(Event::TickSnapshotEnd(rec.int("reqId")));
    Ok(())
}

pub(super) fn market_data_type(
    r: &mut FieldReader<'_>,
    version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let rec = Record::read(r, MARKET_DATA_TYPE, version)?;
    out.push(Event::MarketDataType {
        req_id: rec.int("reqId"),
        market_data_type: rec.int("marketDataType"),
    });
    Ok(())
}

// ============================================================================
// Depth
// ============================================================================

pub(super) fn market_depth(
    r: &mut FieldReader<'_>,
    version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let rec = Record::read(r, MARKET_DEPTH, version)?;
    out.push(Event::MarketDepth(MarketDepth {
        id: rec.int("id"),
        position: rec.int("position"),
        operation: rec.int("operation"),
        side: rec.int("side"),
        price: rec.double("price"),
        size: rec.int("size"),
    }));
    Ok(())
}

pub(super) fn market_depth_l2(
    r: &mut FieldReader<'_>,
    version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let rec = Record::read(r, MARKET_DEPTH_L2, version)?;
    out.push(Event::MarketDepthL2(MarketDepthL2 {
        id: rec.int("id"),
        position: rec.int("position"),
        market_maker: rec.string("marketMaker"),
        operation: rec.int("operation"),
        side: rec.int("side"),
        price: rec.double("price"),
        size: rec.int("size"),
    }));
    Ok(())
}

// ============================================================================
// Bars
// ============================================================================

pub(super) fn real_time_bar(
    r: &mut FieldReader<'_>,
    version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let rec = Record::read(r, REAL_TIME_BAR, version)?;
    out.push(Event::RealTimeBar {
        req_id: rec.int("reqId"),
        bar: RealTimeBar {
            time: rec.long("time"),
            open: rec.double("open"),
            high: rec.double("high"),
            low: rec.double("low"),
            close: rec.double("close"),
            volume: rec.long("volume"),
            wap: rec.double("average"),
            count: rec.int("count"),
        },
    });
    Ok(())
}

/// Historical bars, then the `finished-<start>-<end>` marker bar.
pub(super) fn historical_data(
    r: &mut FieldReader<'_>,
    version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let header = Record::read(r, HISTORICAL_HEADER, version)?;
    let req_id = header.int("reqId");
    let count = r.read_int()?;

    for _ in 0..count.max(0) {
        let row = Record::read(r, HISTORICAL_BAR, version)?;
        out.push(Event::HistoricalData {
            req_id,
            bar: Bar {
                date: row.string("date"),
                open: row.double("open"),
                high: row.double("high"),
                low: row.double("low"),
                close: row.double("close"),
                volume: row.int("volume"),
                bar_count: row.int("barCount"),
                wap: row.double("average"),
                has_gaps: decode_text_bool(&row.string("hasGaps")),
            },
        });
    }

    out.push(Event::HistoricalData {
        req_id,
        bar: Bar::finished_marker(&header.string("startDate"), &header.string("endDate")),
    });
    Ok(())
}

// ============================================================================
// Scanner
// ============================================================================

pub(super) fn scanner_parameters(
    r: &mut FieldReader<'_>,
    version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let rec = Record::read(r, SCANNER_PARAMETERS, version)?;
    out.push(Event::ScannerParameters(rec.string("xml")));
    Ok(())
}

/// Scanner rows, then the end-of-scan event.
pub(super) fn scanner_data(
    r: &mut FieldReader<'_>,
    version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let header = Record::read(r, SCANNER_HEADER, version)?;
    let ticker_id = header.int("tickerId");
    let count = r.read_int()?;

    for _ in 0..count.max(0) {
        let row = Record::read(r, SCANNER_ROW, version)?;
        let details = ContractDetails {
            summary: Contract {
                con_id: row.int("conId"),
                symbol: row.string("symbol"),
                sec_type: row.string("secType"),
                expiry: row.string("expiry"),
                strike: row.double("strike"),
                right: row.string("right"),
                exchange: row.string("exchange"),
                currency: row.string("currency"),
                local_symbol: row.string("localSymbol"),
                trading_class: row.string("tradingClass"),
                ..Contract::default()
            },
            market_name: row.string("marketName"),
            ..ContractDetails::default()
        };
        out.push(Event::ScannerData {
            req_id: ticker_id,
            row: Box::new(ScanRow {
                rank: row.int("rank"),
                details,
                distance: row.string("distance"),
                benchmark: row.string("benchmark"),
                projection: row.string("projection"),
                legs: row.string("legsStr"),
            }),
        });
    }

    out.push(Event::ScannerDataEnd(ticker_id));
    Ok(())
}

// ============================================================================
// Misc
// ============================================================================

pub(super) fn fundamental_data(
    r: &mut FieldReader<'_>,
    version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let rec = Record::read(r, FUNDAMENTAL_DATA, version)?;
    out.push(Event::FundamentalData {
        req_id: rec.int("reqId"),
        data: rec.string("data"),
    });
    Ok(())
}

pub(super) fn news_bulletin(
    r: &mut FieldReader<'_>,
    version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let rec = Record::read(r, NEWS_BULLETIN, version)?;
    out.push(Event::NewsBulletin(NewsBulletin {
        msg_id: rec.int("msgId"),
        msg_type: rec.int("msgType"),
        message: rec.string("message"),
        origin_exchange: rec.string("originatingExch"),
    }));
    Ok(())
}
