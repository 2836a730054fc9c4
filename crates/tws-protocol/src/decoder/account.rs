//! Account, portfolio and position messages.

use tws_core::{AccountSummary, AccountValue, Contract, Event, PortfolioUpdate, Position};

use super::{FieldReader, REQ_ID_ONLY};
use crate::error::ProtocolError;
use crate::schema::{exactly, field, since, FieldKind::*, Record, Schema};

pub(crate) const ACCOUNT_VALUE: Schema = &[
    field("key", Str),
    field("val", Str),
    field("cur", Str),
    field("accountName", Str),
];

/// Version 6 messages from server version 39 repeat the primary exchange
/// after the account name; the second copy wins.
pub(crate) const PORTFOLIO_VALUE: Schema = &[
    field("conId", Int),
    field("symbol", Str),
    field("secType", Str),
    field("expiry", Str),
    field("strike", Double),
    field("right", Str),
    since(7, "multiplier", Str),
    since(7, "primaryExchange", Str),
    field("currency", Str),
    field("localSymbol", Str),
    since(8, "tradingClass", Str),
    field("position", Int),
    field("marketPrice", Double),
    field("marketValue", Double),
    field("averageCost", Double),
    field("unrealizedPNL", Double),
    field("realizedPNL", Double),
    field("accountName", Str),
    exactly(6, 39, "primaryExchangeRepeat", Str),
];

pub(crate) const ACCOUNT_TIME: Schema = &[field("accountTime", Str)];

pub(crate) const ACCOUNT_DOWNLOAD_END: Schema = &[field("account", Str)];

pub(crate) const POSITION: Schema = &[
    field("account", Str),
    field("conId", Int),
    field("symbol", Str),
    field("secType", Str),
    field("expiry", Str),
    field("strike", Double),
    field("right", Str),
    field("multiplier", Str),
    field("exchange", Str),
    field("currency", Str),
    field("localSymbol", Str),
    since(2, "tradingClass", Str),
    field("position", Int),
    since(3, "avgCost", Double),
];

pub(crate) const ACCOUNT_SUMMARY: Schema = &[
    field("reqId", Int),
    field("account", Str),
    field("tag", Str),
    field("value", Str),
    field("currency", Str),
];

pub(crate) const MANAGED_ACCOUNTS: Schema = &[field("accountsList", Str)];

pub(crate) const RECEIVE_FA: Schema = &[field("faDataType", Int), field("cxml", Str)];

pub(super) fn account_value(
    r: &mut FieldReader<'_>,
    version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let rec = Record::read(r, ACCOUNT_VALUE, version)?;
    out.push(Event::AccountValue(AccountValue {
        key: rec.string("key"),
        value: rec.string("val"),
        currency: rec.string("cur"),
        account_name: rec.string("accountName"),
    }));
    Ok(())
}

pub(super) fn portfolio_value(
    r: &mut FieldReader<'_>,
    version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let rec = Record::read(r, PORTFOLIO_VALUE, version)?;

    let primary_exchange = if rec.has("primaryExchangeRepeat") {
        rec.string("primaryExchangeRepeat")
    } else {
        rec.string("primaryExchange")
    };

    let contract = Contract {
        con_id: rec.int("conId"),
        symbol: rec.string("symbol"),
        sec_type: rec.string("secType"),
        expiry: rec.string("expiry"),
        strike: rec.double("strike"),
        right: rec.string("right"),
        multiplier: rec.string("multiplier"),
        primary_exchange,
        currency: rec.string("currency"),
        local_symbol: rec.string("localSymbol"),
        trading_class: rec.string("tradingClass"),
        ..Contract::default()
    };

    out.push(Event::Portfolio(Box::new(PortfolioUpdate {
        contract,
        position: rec.int("position"),
        market_price: rec.double("marketPrice"),
        market_value: rec.double("marketValue"),
        average_cost: rec.double("averageCost"),
        unrealized_pnl: rec.double("unrealizedPNL"),
        realized_pnl: rec.double("realizedPNL"),
        account_name: rec.string("accountName"),
    })));
    Ok(())
}

pub(super) fn account_time(
    r: &mut FieldReader<'_>,
    version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let rec = Record::read(r, ACCOUNT_TIME, version)?;
    out.push(Event::AccountTime(rec.string("accountTime")));
    Ok(())
}

pub(super) fn account_download_end(
    r: &mut FieldReader<'_>,
    version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let rec = Record::read(r, ACCOUNT_DOWNLOAD_END, version)?;
    out.push(Event::AccountDownloadEnd(rec.string("account")));
    Ok(())
}

pub(super) fn position(
    r: &mut FieldReader<'_>,
    version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let rec = Record::read(r, POSITION, version)?;

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

    out.push(Event::Position(Box::new(Position {
        account: rec.string("account"),
        contract,
        position: rec.int("position"),
        avg_cost: rec.double("avgCost"),
    })));
    Ok(())
}

pub(super) fn account_summary(
    r: &mut FieldReader<'_>,
    version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let rec = Record::read(r, ACCOUNT_SUMMARY, version)?;
    out.push(Event::AccountSummary(AccountSummary {
        req_id: rec.int("reqId"),
        account: rec.string("account"),
        tag: rec.string("tag"),
        value: rec.string("value"),
        currency: rec.string("currency"),
    }));
    Ok(())
}

pub(super) fn account_summary_end(
    r: &mut FieldReader<'_>,
    version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let rec = Record::read(r, REQ_ID_ONLY, version)?;
    out.push(Event::AccountSummaryEnd(rec.int("reqId")));
    Ok(())
}

pub(super) fn managed_accounts(
    r: &mut FieldReader<'_>,
    version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let rec = Record::read(r, MANAGED_ACCOUNTS, version)?;
    out.push(Event::ManagedAccounts(rec.string("accountsList")));
    Ok(())
}

pub(super) fn receive_fa(
    r: &mut FieldReader<'_>,
    version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let rec = Record::read(r, RECEIVE_FA, version)?;
    out.push(Event::ReceiveFa {
        fa_data_type: rec.int("faDataType"),
        xml: rec.string("cxml"),
    });
    Ok(())
}
