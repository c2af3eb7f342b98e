//! OpenAPI documentation for the check-in API.
//!
//! [`ApiDoc`] registers every check-in handler, the health probes, and the
//! error schema wrappers. Swagger UI serves it in debug builds and the
//! `openapi-dump` binary prints it for tooling.

use utoipa::OpenApi;

use crate::inbound::http::checkins_dto::{
    CheckInRequestBody, CheckInResponseBody, CheckinRecordBody, CheckinStatusBody,
    CreatorStreakBody, DailyStatBody, RecentCheckinBody, RecentCheckinUserBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Check-in streak API",
        description = "Daily fan check-ins, streaks, and per-creator statistics."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::checkins::create_checkin,
        crate::inbound::http::checkins::get_checkin_status,
        crate::inbound::http::checkins::list_recent_checkins,
        crate::inbound::http::checkins::get_checkin_stats,
        crate::inbound::http::checkins::list_user_streaks,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CheckInRequestBody,
        CheckInResponseBody,
        CheckinRecordBody,
        CheckinStatusBody,
        RecentCheckinBody,
        RecentCheckinUserBody,
        DailyStatBody,
        CreatorStreakBody,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "checkins", description = "Fan check-ins, streaks, and statistics"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
