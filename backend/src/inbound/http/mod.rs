//! HTTP inbound adapter exposing the check-in REST endpoints.

pub mod checkins;
pub mod checkins_dto;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub(crate) mod validation;

pub use error::ApiResult;
