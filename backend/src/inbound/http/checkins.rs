//! Check-in HTTP handlers.
//!
//! ```text
//! POST /api/v1/checkins
//! GET  /api/v1/users/{userId}/creators/{creatorId}/checkin-status
//! GET  /api/v1/creators/{creatorId}/checkins/recent?limit=N
//! GET  /api/v1/creators/{creatorId}/checkins/stats
//! GET  /api/v1/users/{userId}/streaks
//! ```

use actix_web::{HttpResponse, get, post, web};

use crate::domain::ports::CheckInRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::checkins_dto::{
    CheckInRequestBody, CheckInResponseBody, CheckinStatusBody, CreatorPath, CreatorStreakBody,
    DailyStatBody, RecentCheckinBody, RecentCheckinsQuery, UserCreatorPath, UserPath,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, json_payload_error, parse_creator_id, parse_recent_limit, parse_user_id,
};

const USER_ID: FieldName = FieldName::new("userId");
const CREATOR_ID: FieldName = FieldName::new("creatorId");
const LIMIT: FieldName = FieldName::new("limit");

/// Record today's check-in for a fan and creator.
///
/// Responds 201 with the stored record and the refreshed streak. A second
/// check-in on the same UTC day responds 409.
#[utoipa::path(
    post,
    path = "/api/v1/checkins",
    request_body = CheckInRequestBody,
    responses(
        (status = 201, description = "Check-in recorded", body = CheckInResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown user or creator", body = ErrorSchema),
        (status = 409, description = "Already checked in today", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["checkins"],
    operation_id = "createCheckin"
)]
#[post("/checkins")]
pub async fn create_checkin(
    state: web::Data<HttpState>,
    payload: web::Json<CheckInRequestBody>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let request = CheckInRequest {
        user_id: parse_user_id(&payload.user_id, USER_ID)?,
        creator_id: parse_creator_id(&payload.creator_id, CREATOR_ID)?,
    };

    let response = state.checkins.check_in(request).await?;
    Ok(HttpResponse::Created().json(CheckInResponseBody::from(response)))
}

/// Whether the fan checked in today and their current streak.
#[utoipa::path(
    get,
    path = "/api/v1/users/{userId}/creators/{creatorId}/checkin-status",
    params(
        ("userId" = String, Path, description = "Fan identifier"),
        ("creatorId" = String, Path, description = "Creator identifier")
    ),
    responses(
        (status = 200, description = "Check-in status", body = CheckinStatusBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown user or creator", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["checkins"],
    operation_id = "getCheckinStatus"
)]
#[get("/users/{userId}/creators/{creatorId}/checkin-status")]
pub async fn get_checkin_status(
    state: web::Data<HttpState>,
    path: web::Path<UserCreatorPath>,
) -> ApiResult<web::Json<CheckinStatusBody>> {
    let path = path.into_inner();
    let user_id = parse_user_id(&path.user_id, USER_ID)?;
    let creator_id = parse_creator_id(&path.creator_id, CREATOR_ID)?;

    let status = state.checkins_query.status(&user_id, &creator_id).await?;
    Ok(web::Json(CheckinStatusBody::from(status)))
}

/// The creator's most recent check-ins, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/creators/{creatorId}/checkins/recent",
    params(
        ("creatorId" = String, Path, description = "Creator identifier"),
        ("limit" = Option<u32>, Query, description = "Entries to return, 1 to 100 (default 10)")
    ),
    responses(
        (status = 200, description = "Recent check-ins", body = [RecentCheckinBody]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown creator", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["checkins"],
    operation_id = "listRecentCheckins"
)]
#[get("/creators/{creatorId}/checkins/recent")]
pub async fn list_recent_checkins(
    state: web::Data<HttpState>,
    path: web::Path<CreatorPath>,
    query: web::Query<RecentCheckinsQuery>,
) -> ApiResult<web::Json<Vec<RecentCheckinBody>>> {
    let creator_id = parse_creator_id(&path.into_inner().creator_id, CREATOR_ID)?;
    let limit = parse_recent_limit(query.into_inner().limit.as_deref(), LIMIT)?;

    let recent = state
        .checkins_query
        .recent_checkins(&creator_id, limit)
        .await?;
    Ok(web::Json(
        recent.into_iter().map(RecentCheckinBody::from).collect(),
    ))
}

/// The creator's daily check-in counts, newest date first.
#[utoipa::path(
    get,
    path = "/api/v1/creators/{creatorId}/checkins/stats",
    params(
        ("creatorId" = String, Path, description = "Creator identifier")
    ),
    responses(
        (status = 200, description = "Daily counts", body = [DailyStatBody]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown creator", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["checkins"],
    operation_id = "getCheckinStats"
)]
#[get("/creators/{creatorId}/checkins/stats")]
pub async fn get_checkin_stats(
    state: web::Data<HttpState>,
    path: web::Path<CreatorPath>,
) -> ApiResult<web::Json<Vec<DailyStatBody>>> {
    let creator_id = parse_creator_id(&path.into_inner().creator_id, CREATOR_ID)?;

    let stats = state.checkins_query.historical_stats(&creator_id).await?;
    Ok(web::Json(stats.into_iter().map(DailyStatBody::from).collect()))
}

/// The fan's streak for every creator they have checked in to.
#[utoipa::path(
    get,
    path = "/api/v1/users/{userId}/streaks",
    params(
        ("userId" = String, Path, description = "Fan identifier")
    ),
    responses(
        (status = 200, description = "Streaks by creator", body = [CreatorStreakBody]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["checkins"],
    operation_id = "listUserStreaks"
)]
#[get("/users/{userId}/streaks")]
pub async fn list_user_streaks(
    state: web::Data<HttpState>,
    path: web::Path<UserPath>,
) -> ApiResult<web::Json<Vec<CreatorStreakBody>>> {
    let user_id = parse_user_id(&path.into_inner().user_id, USER_ID)?;

    let streaks = state.checkins_query.streaks_for_user(&user_id).await?;
    Ok(web::Json(
        streaks.into_iter().map(CreatorStreakBody::from).collect(),
    ))
}

/// Register every check-in handler on `cfg`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_payload_error))
        .service(create_checkin)
        .service(get_checkin_status)
        .service(list_recent_checkins)
        .service(get_checkin_stats)
        .service(list_user_streaks);
}

#[cfg(test)]
#[path = "checkins_tests.rs"]
mod tests;
