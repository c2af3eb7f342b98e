//! Builders wiring domain services to the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::{info, warn};

use checkin_backend::domain::CheckinService;
use checkin_backend::inbound::http::state::HttpState;
use checkin_backend::outbound::persistence::{
    DbPool, DieselCheckinRepository, DieselDailyAggregateRepository, DieselProfileDirectory,
};

use super::ServerConfig;

fn diesel_state(pool: &DbPool) -> HttpState {
    let service = Arc::new(CheckinService::new(
        Arc::new(DieselCheckinRepository::new(pool.clone())),
        Arc::new(DieselDailyAggregateRepository::new(pool.clone())),
        Arc::new(DieselProfileDirectory::new(pool.clone())),
        Arc::new(DefaultClock),
    ));
    HttpState::new(service.clone(), service)
}

/// Build handler state from the configured adapters.
///
/// Without a database pool the handlers run against stateless fixtures.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => {
            info!("check-in ports backed by PostgreSQL");
            diesel_state(pool)
        }
        None => {
            warn!("no database configured; check-in ports use fixtures");
            HttpState::fixture()
        }
    };
    web::Data::new(state)
}
