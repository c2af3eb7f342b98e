//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports (`*Repository`, [`ProfileDirectory`]) describe the storage and
//! directory collaborators. Driving ports ([`CheckinCommand`],
//! [`CheckinQuery`], [`AggregateReconciliationCommand`]) are what inbound
//! adapters call. Each driven port exposes a typed error enum so adapters map
//! their failures into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod aggregate_reconciliation;
mod checkin_command;
mod checkin_query;
mod checkin_repository;
mod daily_aggregate_repository;
mod profile_directory;

#[cfg(test)]
pub use aggregate_reconciliation::MockAggregateReconciliationCommand;
pub use aggregate_reconciliation::{AggregateReconciliationCommand, ReconciliationOutcome};
#[cfg(test)]
pub use checkin_command::MockCheckinCommand;
pub use checkin_command::{
    CheckInRequest, CheckInResponse, CheckinCommand, FixtureCheckinCommand,
};
#[cfg(test)]
pub use checkin_query::MockCheckinQuery;
pub use checkin_query::{CheckinQuery, FixtureCheckinQuery};
#[cfg(test)]
pub use checkin_repository::MockCheckinRepository;
pub use checkin_repository::{
    CheckinRepository, CheckinRepositoryError, FixtureCheckinRepository,
};
#[cfg(test)]
pub use daily_aggregate_repository::MockDailyAggregateRepository;
pub use daily_aggregate_repository::{
    DailyAggregateRepository, DailyAggregateRepositoryError, FixtureDailyAggregateRepository,
};
#[cfg(test)]
pub use profile_directory::MockProfileDirectory;
pub use profile_directory::{FixtureProfileDirectory, ProfileDirectory, ProfileDirectoryError};
