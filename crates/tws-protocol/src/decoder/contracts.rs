//! Contract detail messages.

use tws_core::{Contract, ContractDetails, Event};

use super::{FieldReader, REQ_ID_ONLY};
use crate::error::ProtocolError;
use crate::schema::{field, since, FieldKind::*, Record, Schema};
use crate::wire_types::NO_REQUEST_ID;

pub(crate) const CONTRACT_DATA: Schema = &[
    since(3, "reqId", Int),
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
    field("conId", Int),
    field("minTick", Double),
    field("multiplier", Str),
    field("orderTypes", Str),
    field("validExchanges", Str),
    field("priceMagnifier", Int),
    since(4, "underConId", Int),
    since(5, "longName", Str),
    since(5, "primaryExchange", Str),
    since(6, "contractMonth", Str),
    since(6, "industry", Str),
    since(6, "category", Str),
    since(6, "subcategory", Str),
    since(6, "timeZoneId", Str),
    since(6, "tradingHours", Str),
    since(6, "liquidHours", Str),
    since(8, "evRule", Str),
    since(8, "evMultiplier", Double),
    since(7, "secIdList", TagValues),
];

pub(crate) const BOND_CONTRACT_DATA: Schema = &[
    since(3, "reqId", Int),
    field("symbol", Str),
    field("secType", Str),
    field("cusip", Str),
    field("coupon", Double),
    field("maturity", Str),
    field("issueDate", Str),
    field("ratings", Str),
    field("bondType", Str),
    field("couponType", Str),
    field("convertible", Bool),
    field("callable", Bool),
    field("putable", Bool),
    field("descAppend", Str),
    field("exchange", Str),
    field("currency", Str),
    field("marketName", Str),
    field("tradingClass", Str),
    field("conId", Int),
    field("minTick", Double),
    field("orderTypes", Str),
    field("validExchanges", Str),
    field("nextOptionDate", Str),
    field("nextOptionType", Str),
    field("nextOptionPartial", Bool),
    field("notes", Str),
    since(4, "longName", Str),
    since(6, "evRule", Str),
    since(6, "evMultiplier", Double),
    since(5, "secIdList", TagValues),
];

pub(super) fn contract_data(
    r: &mut FieldReader<'_>,
    version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let mut rec = Record::read(r, CONTRACT_DATA, version)?;

    let details = ContractDetails {
        summary: Contract {
            con_id: rec.int("conId"),
            symbol: rec.string("symbol"),
            sec_type: rec.string("secType"),
            expiry: rec.string("expiry"),
            strike: rec.double("strike"),
            right: rec.string("right"),
            multiplier: rec.string("multiplier"),
            exchange: rec.string("exchange"),
            primary_exchange: rec.string("primaryExchange"),
            currency: rec.string("currency"),
            local_symbol: rec.string("localSymbol"),
            trading_class: rec.string("tradingClass"),
            ..Contract::default()
        },
        market_name: rec.string("marketName"),
        min_tick: rec.double("minTick"),
        order_types: rec.string("orderTypes"),
        valid_exchanges: rec.string("validExchanges"),
        price_magnifier: rec.int("priceMagnifier"),
        under_con_id: rec.int("underConId"),
        long_name: rec.string("longName"),
        contract_month: rec.string("contractMonth"),
        industry: rec.string("industry"),
        category: rec.string("category"),
        subcategory: rec.string("subcategory"),
        time_zone_id: rec.string("timeZoneId"),
        trading_hours: rec.string("tradingHours"),
        liquid_hours: rec.string("liquidHours"),
        ev_rule: rec.string("evRule"),
        ev_multiplier: rec.double("evMultiplier"),
        sec_id_list: rec.take_tag_values("secIdList"),
        ..ContractDetails::default()
    };

    out.push(Event::ContractDetails {
        req_id: rec.opt_int("reqId").unwrap_or(NO_REQUEST_ID),
        details: Box::new(details),
    });
    Ok(())
}

pub(super) fn bond_contract_data(
    r: &mut FieldReader<'_>,
    version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let mut rec = Record::read(r, BOND_CONTRACT_DATA, version)?;

    let details = ContractDetails {
        summary: Contract {
            con_id: rec.int("conId"),
            symbol: rec.string("symbol"),
            sec_type: rec.string("secType"),
            exchange: rec.string("exchange"),
            currency: rec.string("currency"),
            trading_class: rec.string("tradingClass"),
            ..Contract::default()
        },
        market_name: rec.string("marketName"),
        min_tick: rec.double("minTick"),
        order_types: rec.string("orderTypes"),
        valid_exchanges: rec.string("validExchanges"),
        long_name: rec.string("longName"),
        ev_rule: rec.string("evRule"),
        ev_multiplier: rec.double("evMultiplier"),
        sec_id_list: rec.take_tag_values("secIdList"),

        cusip: rec.string("cusip"),
        ratings: rec.string("ratings"),
        desc_append: rec.string("descAppend"),
        bond_type: rec.string("bondType"),
        coupon_type: rec.string("couponType"),
        callable: rec.bool("callable"),
        putable: rec.bool("putable"),
        coupon: rec.double("coupon"),
        convertible: rec.bool("convertible"),
        maturity: rec.string("maturity"),
        issue_date: rec.string("issueDate"),
        next_option_date: rec.string("nextOptionDate"),
        next_option_type: rec.string("nextOptionType"),
        next_option_partial: rec.bool("nextOptionPartial"),
        notes: rec.string("notes"),
        ..ContractDetails::default()
    };

    out.push(Event::BondContractDetails {
        req_id: rec.opt_int("reqId").unwrap_or(NO_REQUEST_ID),
        details: Box::new(details),
    });
    Ok(())
}

pub(super) fn contract_data_end(
    r: &mut FieldReader<'_>,
    version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let rec = Record::read(r, REQ_ID_ONLY, version)?;
    out.push(Event::ContractDetailsEnd(rec.int("reqId")));
    Ok(())
}
