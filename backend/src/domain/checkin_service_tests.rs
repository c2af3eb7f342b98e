//! Tests for the check-in service.

use std::sync::Arc;

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};
use uuid::Uuid;

use super::*;
use crate::domain::ports::{
    MockCheckinRepository, MockDailyAggregateRepository, MockProfileDirectory,
};
use crate::domain::{CheckinId, ErrorCode};

type TestService =
    CheckinService<MockCheckinRepository, MockDailyAggregateRepository, MockProfileDirectory>;

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 3, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn today() -> NaiveDate {
    now().date_naive()
}

fn record_at(user_id: UserId, creator_id: CreatorId, at: DateTime<Utc>) -> CheckinRecord {
    CheckinRecord {
        id: CheckinId::random(),
        user_id,
        creator_id,
        checked_in_at: at,
    }
}

fn aggregate(creator_id: CreatorId, date: NaiveDate, count: u32) -> DailyAggregate {
    DailyAggregate {
        id: Uuid::new_v4(),
        creator_id,
        date,
        count,
    }
}

/// Directory that recognises every identifier.
#[fixture]
fn directory() -> MockProfileDirectory {
    let mut directory = MockProfileDirectory::new();
    directory.expect_find_user().returning(|user_id| {
        Ok(Some(UserProfile {
            id: *user_id,
            display_name: "Ada".to_owned(),
            avatar_url: None,
        }))
    });
    directory.expect_find_creator().returning(|creator_id| {
        Ok(Some(CreatorProfile {
            id: *creator_id,
            name: "Grace".to_owned(),
            avatar_url: None,
        }))
    });
    directory
}

fn make_service(
    checkins: MockCheckinRepository,
    aggregates: MockDailyAggregateRepository,
    directory: MockProfileDirectory,
) -> TestService {
    CheckinService::new(
        Arc::new(checkins),
        Arc::new(aggregates),
        Arc::new(directory),
        Arc::new(FixtureClock { utc_now: now() }),
    )
}

fn request() -> CheckInRequest {
    CheckInRequest {
        user_id: UserId::random(),
        creator_id: CreatorId::random(),
    }
}

#[rstest]
#[tokio::test]
async fn check_in_persists_record_increments_aggregate_and_counts_streak(
    directory: MockProfileDirectory,
) {
    let request = request();
    let yesterday = record_at(request.user_id, request.creator_id, now() - Duration::days(1));

    let mut checkins = MockCheckinRepository::new();
    checkins
        .expect_has_checked_in()
        .withf(|_, _, day| *day == today())
        .times(1)
        .return_once(|_, _, _| Ok(false));
    checkins.expect_create().times(1).returning(|checkin| {
        Ok(record_at(
            checkin.user_id,
            checkin.creator_id,
            checkin.checked_in_at,
        ))
    });
    checkins
        .expect_all_by_user_creator()
        .times(1)
        .return_once(move |_, _| Ok(vec![yesterday]));

    let mut aggregates = MockDailyAggregateRepository::new();
    aggregates
        .expect_increment()
        .withf(|_, date| *date == today())
        .times(1)
        .returning(|creator_id, date| Ok(aggregate(*creator_id, date, 1)));

    let service = make_service(checkins, aggregates, directory);
    let response = service.check_in(request).await.expect("check-in succeeds");

    assert_eq!(response.record.user_id, request.user_id);
    assert_eq!(response.record.checked_in_at, now());
    assert_eq!(response.streak, 2);
    assert!(response.aggregate_recorded);
}

#[rstest]
#[tokio::test]
async fn check_in_twice_on_same_day_is_a_conflict(directory: MockProfileDirectory) {
    let mut checkins = MockCheckinRepository::new();
    checkins
        .expect_has_checked_in()
        .times(1)
        .return_once(|_, _, _| Ok(true));
    checkins.expect_create().times(0);

    let mut aggregates = MockDailyAggregateRepository::new();
    aggregates.expect_increment().times(0);

    let service = make_service(checkins, aggregates, directory);
    let error = service
        .check_in(request())
        .await
        .expect_err("second check-in conflicts");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(
        error.details().and_then(|d| d.get("code")),
        Some(&json!("already_checked_in"))
    );
}

#[rstest]
#[tokio::test]
async fn duplicate_insert_from_store_is_reported_as_already_checked_in(
    directory: MockProfileDirectory,
) {
    let mut checkins = MockCheckinRepository::new();
    checkins
        .expect_has_checked_in()
        .times(1)
        .return_once(|_, _, _| Ok(false));
    checkins.expect_create().times(1).return_once(|_| {
        Err(CheckinRepositoryError::duplicate_checkin(
            "concurrent insert detected",
        ))
    });
    checkins.expect_all_by_user_creator().times(0);

    let mut aggregates = MockDailyAggregateRepository::new();
    aggregates.expect_increment().times(0);

    let service = make_service(checkins, aggregates, directory);
    let error = service
        .check_in(request())
        .await
        .expect_err("race loser conflicts");

    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn failed_aggregate_increment_still_reports_check_in(directory: MockProfileDirectory) {
    let mut checkins = MockCheckinRepository::new();
    checkins
        .expect_has_checked_in()
        .return_once(|_, _, _| Ok(false));
    checkins.expect_create().times(1).returning(|checkin| {
        Ok(record_at(
            checkin.user_id,
            checkin.creator_id,
            checkin.checked_in_at,
        ))
    });
    checkins
        .expect_all_by_user_creator()
        .return_once(|_, _| Ok(Vec::new()));

    let mut aggregates = MockDailyAggregateRepository::new();
    aggregates
        .expect_increment()
        .times(1)
        .return_once(|_, _| Err(DailyAggregateRepositoryError::connection("pool exhausted")));

    let service = make_service(checkins, aggregates, directory);
    let response = service
        .check_in(request())
        .await
        .expect("record committed despite aggregate failure");

    assert!(!response.aggregate_recorded);
    assert_eq!(response.streak, 1);
}

#[rstest]
#[tokio::test]
async fn failed_history_read_after_insert_still_succeeds(directory: MockProfileDirectory) {
    let mut checkins = MockCheckinRepository::new();
    checkins
        .expect_has_checked_in()
        .return_once(|_, _, _| Ok(false));
    checkins.expect_create().times(1).returning(|checkin| {
        Ok(record_at(
            checkin.user_id,
            checkin.creator_id,
            checkin.checked_in_at,
        ))
    });
    checkins
        .expect_all_by_user_creator()
        .times(1)
        .return_once(|_, _| Err(CheckinRepositoryError::connection("read replica down")));

    let mut aggregates = MockDailyAggregateRepository::new();
    aggregates
        .expect_increment()
        .times(1)
        .returning(|creator_id, date| Ok(aggregate(*creator_id, date, 1)));

    let service = make_service(checkins, aggregates, directory);
    let response = service
        .check_in(request())
        .await
        .expect("committed check-in is reported as success");

    assert!(response.aggregate_recorded);
    assert_eq!(response.streak, 1);
}

#[rstest]
#[tokio::test]
async fn unknown_user_is_rejected_before_storage_calls() {
    let mut directory = MockProfileDirectory::new();
    directory.expect_find_user().return_once(|_| Ok(None));
    directory.expect_find_creator().times(0);

    let mut checkins = MockCheckinRepository::new();
    checkins.expect_has_checked_in().times(0);
    checkins.expect_create().times(0);

    let service = make_service(checkins, MockDailyAggregateRepository::new(), directory);
    let error = service
        .check_in(request())
        .await
        .expect_err("unknown user");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(
        error.details().and_then(|d| d.get("code")),
        Some(&json!("user_not_found"))
    );
}

#[rstest]
#[case::connection(
    CheckinRepositoryError::connection("refused"),
    ErrorCode::ServiceUnavailable
)]
#[case::query(CheckinRepositoryError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn storage_failures_before_commit_propagate(
    directory: MockProfileDirectory,
    #[case] failure: CheckinRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut checkins = MockCheckinRepository::new();
    checkins
        .expect_has_checked_in()
        .return_once(move |_, _, _| Err(failure));
    checkins.expect_create().times(0);

    let service = make_service(checkins, MockDailyAggregateRepository::new(), directory);
    let error = service
        .check_in(request())
        .await
        .expect_err("storage failure");

    assert_eq!(error.code(), expected);
}

#[rstest]
#[tokio::test]
async fn status_without_history_is_zero(directory: MockProfileDirectory) {
    let mut checkins = MockCheckinRepository::new();
    checkins
        .expect_has_checked_in()
        .return_once(|_, _, _| Ok(false));
    checkins
        .expect_all_by_user_creator()
        .return_once(|_, _| Ok(Vec::new()));

    let service = make_service(checkins, MockDailyAggregateRepository::new(), directory);
    let status = service
        .status(&UserId::random(), &CreatorId::random())
        .await
        .expect("status succeeds");

    assert_eq!(
        status,
        CheckinStatus {
            has_checked_in_today: false,
            streak: 0,
        }
    );
}

#[rstest]
#[tokio::test]
async fn status_reports_run_ending_yesterday(directory: MockProfileDirectory) {
    let user_id = UserId::random();
    let creator_id = CreatorId::random();
    let history = vec![
        record_at(user_id, creator_id, now() - Duration::days(1)),
        record_at(user_id, creator_id, now() - Duration::days(2)),
    ];

    let mut checkins = MockCheckinRepository::new();
    checkins
        .expect_has_checked_in()
        .return_once(|_, _, _| Ok(false));
    checkins
        .expect_all_by_user_creator()
        .return_once(move |_, _| Ok(history));

    let service = make_service(checkins, MockDailyAggregateRepository::new(), directory);
    let status = service
        .status(&user_id, &creator_id)
        .await
        .expect("status succeeds");

    assert!(!status.has_checked_in_today);
    assert_eq!(status.streak, 2);
}

#[rstest]
#[tokio::test]
async fn streak_stops_at_first_gap(directory: MockProfileDirectory) {
    let user_id = UserId::random();
    let creator_id = CreatorId::random();
    let history = vec![
        record_at(user_id, creator_id, now()),
        record_at(user_id, creator_id, now() - Duration::days(1)),
        record_at(user_id, creator_id, now() - Duration::days(3)),
    ];

    let mut checkins = MockCheckinRepository::new();
    checkins
        .expect_all_by_user_creator()
        .return_once(move |_, _| Ok(history));

    let service = make_service(checkins, MockDailyAggregateRepository::new(), directory);
    let result = service
        .streak(&user_id, &creator_id)
        .await
        .expect("streak succeeds");

    assert_eq!(
        result,
        StreakResult {
            user_id,
            creator_id,
            streak_length: 2,
        }
    );
}

#[rstest]
#[tokio::test]
async fn recent_checkins_resolve_display_metadata(directory: MockProfileDirectory) {
    let creator_id = CreatorId::random();
    let known = UserId::random();
    let departed = UserId::random();
    let records = vec![
        record_at(known, creator_id, now()),
        record_at(departed, creator_id, now() - Duration::hours(1)),
        record_at(known, creator_id, now() - Duration::days(1)),
    ];

    let mut checkins = MockCheckinRepository::new();
    checkins
        .expect_recent_by_creator()
        .withf(|_, limit| *limit == 10)
        .times(1)
        .return_once(move |_, _| Ok(records));

    let mut directory = directory;
    directory
        .expect_users_by_ids()
        .withf(|ids| ids.len() == 2)
        .times(1)
        .return_once(move |_| {
            Ok(vec![UserProfile {
                id: known,
                display_name: "Ada".to_owned(),
                avatar_url: Some("https://cdn.example/ada.png".to_owned()),
            }])
        });

    let service = make_service(checkins, MockDailyAggregateRepository::new(), directory);
    let recent = service
        .recent_checkins(&creator_id, RecentLimit::default())
        .await
        .expect("recent succeeds");

    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0].display_name.as_deref(), Some("Ada"));
    assert_eq!(recent[1].user_id, departed);
    assert!(recent[1].display_name.is_none());
    assert_eq!(recent[2].checked_in_at, now() - Duration::days(1));
}

#[rstest]
#[tokio::test]
async fn historical_stats_pass_through_counters(directory: MockProfileDirectory) {
    let creator_id = CreatorId::random();
    let stored = vec![
        aggregate(creator_id, today(), 4),
        aggregate(creator_id, today() - Duration::days(1), 9),
    ];
    let expected = stored.clone();

    let mut aggregates = MockDailyAggregateRepository::new();
    aggregates
        .expect_list_by_creator()
        .times(1)
        .return_once(move |_| Ok(stored));

    let service = make_service(MockCheckinRepository::new(), aggregates, directory);
    let stats = service
        .historical_stats(&creator_id)
        .await
        .expect("stats succeed");

    assert_eq!(stats, expected);
}

#[rstest]
#[tokio::test]
async fn streaks_for_user_are_sorted_and_skip_unknown_creators(directory: MockProfileDirectory) {
    let user_id = UserId::random();
    let zed = CreatorId::random();
    let amy = CreatorId::random();
    let long_run = CreatorId::random();
    let removed = CreatorId::random();

    let mut checkins = MockCheckinRepository::new();
    checkins
        .expect_creators_for_user()
        .return_once(move |_| Ok(vec![zed, amy, long_run, removed]));
    checkins
        .expect_all_by_user_creator()
        .returning(move |user_id, creator_id| {
            let days: i64 = if *creator_id == long_run { 3 } else { 1 };
            Ok((0..days)
                .map(|offset| record_at(*user_id, *creator_id, now() - Duration::days(offset)))
                .collect())
        });

    let mut directory = directory;
    directory.expect_creators_by_ids().return_once(move |_| {
        Ok(vec![
            CreatorProfile {
                id: zed,
                name: "Zed".to_owned(),
                avatar_url: None,
            },
            CreatorProfile {
                id: amy,
                name: "Amy".to_owned(),
                avatar_url: None,
            },
            CreatorProfile {
                id: long_run,
                name: "Mia".to_owned(),
                avatar_url: None,
            },
        ])
    });

    let service = make_service(checkins, MockDailyAggregateRepository::new(), directory);
    let streaks = service
        .streaks_for_user(&user_id)
        .await
        .expect("streaks succeed");

    let summary: Vec<_> = streaks
        .iter()
        .map(|entry| (entry.creator_name.as_str(), entry.streak))
        .collect();
    assert_eq!(summary, vec![("Mia", 3), ("Amy", 1), ("Zed", 1)]);
}
