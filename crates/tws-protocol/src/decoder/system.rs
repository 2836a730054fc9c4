//! Session-level messages: errors, clock, API verification, display groups.

use tws_core::{ApiError, Event};

use super::FieldReader;
use crate::error::ProtocolError;
use crate::field_codec::decode_text_bool;
use crate::schema::{field, FieldKind::*, Record, Schema};

pub(crate) const ERROR_MESSAGE: Schema = &[
    field("id", Int),
    field("errorCode", Int),
    field("errorMsg", Str),
];

pub(crate) const CURRENT_TIME: Schema = &[field("time", Long)];

pub(crate) const VERIFY_MESSAGE_API: Schema = &[field("apiData", Str)];

pub(crate) const VERIFY_COMPLETED: Schema = &[field("isSuccessful", Str), field("errorText", Str)];

pub(crate) const DISPLAY_GROUP_LIST: Schema = &[field("reqId", Int), field("groups", Str)];

pub(crate) const DISPLAY_GROUP_UPDATED: Schema =
    &[field("reqId", Int), field("contractInfo", Str)];

pub(super) fn error_message(
    r: &mut FieldReader<'_>,
    version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let rec = Record::read(r, ERROR_MESSAGE, version)?;
    out.push(Event::Error(ApiError {
        id: rec.int("id"),
        code: rec.int("errorCode"),
        message: rec.string("errorMsg"),
    }));
    Ok(())
}

pub(super) fn current_time(
    r: &mut FieldReader<'_>,
    version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let rec = Record::read(r, CURRENT_TIME, version)?;
    out.push(Event::CurrentTime(rec.long("time")));
    Ok(())
}

pub(super) fn verify_message_api(
    r: &mut FieldReader<'_>,
    version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let rec = Record::read(r, VERIFY_MESSAGE_API, version)?;
    out.push(Event::VerifyMessageApi(rec.string("apiData")));
    Ok(())
}

/// The session answers a successful verification with a start request
/// before this event reaches the sink.
pub(super) fn verify_completed(
    r: &mut FieldReader<'_>,
    version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let rec = Record::read(r, VERIFY_COMPLETED, version)?;
    out.push(Event::VerifyCompleted {
        is_successful: decode_text_bool(&rec.string("isSuccessful")),
        error_text: rec.string("errorText"),
    });
    Ok(())
}

pub(super) fn display_group_list(
    r: &mut FieldReader<'_>,
    version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let rec = Record::read(r, DISPLAY_GROUP_LIST, version)?;
    out.push(Event::DisplayGroupList {
        req_id: rec.int("reqId"),
        groups: rec.string("groups"),
    });
    Ok(())
}

pub(super) fn display_group_updated(
    r: &mut FieldReader<'_>,
    version: i32,
    out: &mut Vec<Event>,
) -> Result<(), ProtocolError> {
    let rec = Record::read(r, DISPLAY_GROUP_UPDATED, version)?;
    out.push(Event::DisplayGroupUpdated {
        req_id: rec.int("reqId"),
        contract_info: rec.string("contractInfo"),
    });
    Ok(())
}
