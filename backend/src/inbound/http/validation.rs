//! Shared validation helpers for inbound HTTP adapters.
//!
//! Failures become `invalid_request` errors whose details name the field, the
//! rejected value, and a machine-readable code.

use actix_web::HttpRequest;
use actix_web::error::JsonPayloadError;
use serde_json::json;

use crate::domain::{CreatorId, Error, RecentLimit, UserId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    InvalidUuid,
    InvalidInteger,
    OutOfRange,
    InvalidBody,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidInteger => "invalid_integer",
            Self::OutOfRange => "out_of_range",
            Self::InvalidBody => "invalid_body",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn field_error(field: FieldName, message: String, code: ValidationCode, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let name = field.as_str();
    field_error(
        field,
        format!("{name} must be a valid UUID"),
        ValidationCode::InvalidUuid,
        value,
    )
}

pub(crate) fn parse_user_id(value: &str, field: FieldName) -> Result<UserId, Error> {
    UserId::new(value).map_err(|_| invalid_uuid_error(field, value))
}

pub(crate) fn parse_creator_id(value: &str, field: FieldName) -> Result<CreatorId, Error> {
    CreatorId::new(value).map_err(|_| invalid_uuid_error(field, value))
}

/// Parse an optional `limit` query value, defaulting when absent.
pub(crate) fn parse_recent_limit(
    value: Option<&str>,
    field: FieldName,
) -> Result<RecentLimit, Error> {
    let Some(raw) = value else {
        return Ok(RecentLimit::default());
    };
    let name = field.as_str();
    let requested: u32 = raw.trim().parse().map_err(|_| {
        field_error(
            field,
            format!("{name} must be a positive integer"),
            ValidationCode::InvalidInteger,
            raw,
        )
    })?;
    RecentLimit::new(requested).map_err(|err| {
        field_error(field, err.to_string(), ValidationCode::OutOfRange, raw)
    })
}

/// Map a rejected JSON body onto an `invalid_request` error.
///
/// Registered as the `JsonConfig` error handler so malformed or incomplete
/// bodies share the error payload used by field validation.
pub(crate) fn json_payload_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let reason = err.to_string();
    Error::invalid_request("request body must be valid JSON")
        .with_details(json!({
            "code": ValidationCode::InvalidBody.as_str(),
            "reason": reason,
        }))
        .into()
}
