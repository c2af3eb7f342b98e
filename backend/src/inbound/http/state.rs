//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` and only see the
//! driving ports, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CheckinCommand, CheckinQuery, FixtureCheckinCommand, FixtureCheckinQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub checkins: Arc<dyn CheckinCommand>,
    pub checkins_query: Arc<dyn CheckinQuery>,
}

impl HttpState {
    /// Construct state from the check-in command and query ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use checkin_backend::domain::ports::{FixtureCheckinCommand, FixtureCheckinQuery};
    /// use checkin_backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(FixtureCheckinCommand), Arc::new(FixtureCheckinQuery));
    /// let _query = state.checkins_query.clone();
    /// ```
    pub fn new(checkins: Arc<dyn CheckinCommand>, checkins_query: Arc<dyn CheckinQuery>) -> Self {
        Self {
            checkins,
            checkins_query,
        }
    }

    /// State backed by stateless fixtures, used when no database is configured.
    pub fn fixture() -> Self {
        Self::new(Arc::new(FixtureCheckinCommand), Arc::new(FixtureCheckinQuery))
    }
}
