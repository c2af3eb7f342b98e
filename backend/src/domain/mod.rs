//! Domain primitives, services, and ports for the check-in streak core.
//!
//! Purpose: keep streak arithmetic, day-boundary rules, and check-in
//! orchestration free of transport and storage concerns. Inbound adapters call
//! the driving ports in [`ports`]; outbound adapters implement its driven
//! ports.
//!
//! Public surface:
//! - [`CheckinService`]: check-in command and read models.
//! - [`AggregateReconciliationService`]: repairs drifted daily counters.
//! - [`streak_from_days`] / [`streak_length`]: pure streak calculator.
//! - [`calendar_day`] / [`day_bounds`]: UTC day-boundary helpers.
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failures.

mod aggregate_reconciliation_service;
mod calendar;
mod checkin;
mod checkin_service;
pub mod error;
mod ids;
pub mod ports;
mod profile;
mod streak;
mod trace_id;

pub use self::aggregate_reconciliation_service::AggregateReconciliationService;
pub use self::calendar::{DayBounds, calendar_day, day_bounds, today};
pub use self::checkin::{
    CheckinRecord, CheckinStatus, CreatorStreak, DailyAggregate, NewCheckin, RecentCheckin,
    RecentLimit, RecentLimitError, StreakResult,
};
pub use self::checkin_service::CheckinService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::ids::{CheckinId, CreatorId, IdValidationError, UserId};
pub use self::profile::{CreatorProfile, UserProfile};
pub use self::streak::{streak_from_days, streak_length};
pub use self::trace_id::TraceId;
