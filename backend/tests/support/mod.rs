//! Shared in-memory adapters for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! these doubles live here instead of being copied into each file. The record
//! store enforces the one-per-day rule under a mutex, mirroring the unique
//! index the PostgreSQL adapter relies on.

#![allow(dead_code, reason = "each test crate uses a different subset")]

pub mod embedded_postgres;

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};
use checkin_backend::domain::ports::{
    CheckinRepository, CheckinRepositoryError, DailyAggregateRepository,
    DailyAggregateRepositoryError, ProfileDirectory, ProfileDirectoryError,
};
use checkin_backend::domain::{
    CheckinId, CheckinRecord, CheckinService, CreatorId, CreatorProfile, DailyAggregate,
    NewCheckin, UserId, UserProfile, day_bounds,
};
use mockable::Clock;
use tokio::sync::Barrier;
use uuid::Uuid;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Build a UTC instant at noon on the given day.
pub fn noon(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// Clock whose current instant tests can move.
pub struct SettableClock {
    now: Mutex<DateTime<Utc>>,
}

impl SettableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *lock(&self.now) = now;
    }

    pub fn advance_days(&self, days: i64) {
        let mut now = lock(&self.now);
        *now += Duration::days(days);
    }
}

impl Clock for SettableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *lock(&self.now)
    }
}

/// Append-only record store with a per-day uniqueness guarantee.
#[derive(Default)]
pub struct InMemoryCheckins {
    records: Mutex<Vec<CheckinRecord>>,
    existence_gate: Option<Arc<Barrier>>,
}

impl InMemoryCheckins {
    /// Store whose `has_checked_in` waits until `parties` callers arrive.
    ///
    /// Forces concurrent check-ins past the read before any of them inserts.
    pub fn with_existence_gate(parties: usize) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            existence_gate: Some(Arc::new(Barrier::new(parties))),
        }
    }

    /// Seed a record without going through the service.
    pub fn seed(&self, user_id: UserId, creator_id: CreatorId, at: DateTime<Utc>) {
        lock(&self.records).push(CheckinRecord {
            id: CheckinId::random(),
            user_id,
            creator_id,
            checked_in_at: at,
        });
    }

    pub fn len(&self) -> usize {
        lock(&self.records).len()
    }

    fn newest_first(mut records: Vec<CheckinRecord>) -> Vec<CheckinRecord> {
        records.sort_by(|a, b| b.checked_in_at.cmp(&a.checked_in_at));
        records
    }
}

#[async_trait]
impl CheckinRepository for InMemoryCheckins {
    async fn has_checked_in(
        &self,
        user_id: &UserId,
        creator_id: &CreatorId,
        day: NaiveDate,
    ) -> Result<bool, CheckinRepositoryError> {
        let bounds = day_bounds(day);
        let found = lock(&self.records).iter().any(|record| {
            record.user_id == *user_id
                && record.creator_id == *creator_id
                && bounds.contains(record.checked_in_at)
        });
        if let Some(gate) = &self.existence_gate {
            gate.wait().await;
        }
        Ok(found)
    }

    async fn create(&self, checkin: &NewCheckin) -> Result<CheckinRecord, CheckinRepositoryError> {
        let mut records = lock(&self.records);
        let day = checkin.day();
        let taken = records.iter().any(|record| {
            record.user_id == checkin.user_id
                && record.creator_id == checkin.creator_id
                && record.day() == day
        });
        if taken {
            return Err(CheckinRepositoryError::duplicate_checkin(
                "concurrent insert detected",
            ));
        }
        let record = CheckinRecord {
            id: CheckinId::random(),
            user_id: checkin.user_id,
            creator_id: checkin.creator_id,
            checked_in_at: checkin.checked_in_at,
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn recent_by_creator(
        &self,
        creator_id: &CreatorId,
        limit: u32,
    ) -> Result<Vec<CheckinRecord>, CheckinRepositoryError> {
        let matching = lock(&self.records)
            .iter()
            .filter(|record| record.creator_id == *creator_id)
            .cloned()
            .collect();
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(Self::newest_first(matching).into_iter().take(limit).collect())
    }

    async fn all_by_user_creator(
        &self,
        user_id: &UserId,
        creator_id: &CreatorId,
    ) -> Result<Vec<CheckinRecord>, CheckinRepositoryError> {
        let matching = lock(&self.records)
            .iter()
            .filter(|record| record.user_id == *user_id && record.creator_id == *creator_id)
            .cloned()
            .collect();
        Ok(Self::newest_first(matching))
    }

    async fn creators_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<CreatorId>, CheckinRepositoryError> {
        let mut creators: Vec<CreatorId> = lock(&self.records)
            .iter()
            .filter(|record| record.user_id == *user_id)
            .map(|record| record.creator_id)
            .collect();
        creators.sort_unstable();
        creators.dedup();
        Ok(creators)
    }

    async fn count_for_creator_day(
        &self,
        creator_id: &CreatorId,
        day: NaiveDate,
    ) -> Result<u32, CheckinRepositoryError> {
        let mut users: Vec<UserId> = lock(&self.records)
            .iter()
            .filter(|record| record.creator_id == *creator_id && record.day() == day)
            .map(|record| record.user_id)
            .collect();
        users.sort_unstable();
        users.dedup();
        u32::try_from(users.len()).map_err(|_| CheckinRepositoryError::query("count overflow"))
    }
}

/// Daily counter store that can be switched into a failing mode.
#[derive(Default)]
pub struct InMemoryAggregates {
    counters: Mutex<BTreeMap<(CreatorId, NaiveDate), DailyAggregate>>,
    failing: AtomicBool,
}

impl InMemoryAggregates {
    /// Make every subsequent call fail with a connection error.
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn recover(&self) {
        self.failing.store(false, Ordering::SeqCst);
    }

    pub fn count(&self, creator_id: CreatorId, date: NaiveDate) -> Option<u32> {
        lock(&self.counters)
            .get(&(creator_id, date))
            .map(|aggregate| aggregate.count)
    }

    fn check(&self) -> Result<(), DailyAggregateRepositoryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DailyAggregateRepositoryError::connection(
                "aggregate store offline",
            ));
        }
        Ok(())
    }

    fn write(
        &self,
        creator_id: &CreatorId,
        date: NaiveDate,
        update: impl FnOnce(u32) -> u32,
    ) -> DailyAggregate {
        let mut counters = lock(&self.counters);
        let entry = counters
            .entry((*creator_id, date))
            .or_insert_with(|| DailyAggregate {
                id: Uuid::new_v4(),
                creator_id: *creator_id,
                date,
                count: 0,
            });
        entry.count = update(entry.count);
        entry.clone()
    }
}

#[async_trait]
impl DailyAggregateRepository for InMemoryAggregates {
    async fn increment(
        &self,
        creator_id: &CreatorId,
        date: NaiveDate,
    ) -> Result<DailyAggregate, DailyAggregateRepositoryError> {
        self.check()?;
        Ok(self.write(creator_id, date, |count| count + 1))
    }

    async fn list_by_creator(
        &self,
        creator_id: &CreatorId,
    ) -> Result<Vec<DailyAggregate>, DailyAggregateRepositoryError> {
        self.check()?;
        Ok(lock(&self.counters)
            .values()
            .rev()
            .filter(|aggregate| aggregate.creator_id == *creator_id)
            .cloned()
            .collect())
    }

    async fn find(
        &self,
        creator_id: &CreatorId,
        date: NaiveDate,
    ) -> Result<Option<DailyAggregate>, DailyAggregateRepositoryError> {
        self.check()?;
        Ok(lock(&self.counters).get(&(*creator_id, date)).cloned())
    }

    async fn overwrite(
        &self,
        creator_id: &CreatorId,
        date: NaiveDate,
        count: u32,
    ) -> Result<DailyAggregate, DailyAggregateRepositoryError> {
        self.check()?;
        Ok(self.write(creator_id, date, |_| count))
    }
}

/// Directory holding a fixed set of profiles.
#[derive(Default)]
pub struct StaticDirectory {
    users: HashMap<UserId, UserProfile>,
    creators: HashMap<CreatorId, CreatorProfile>,
}

impl StaticDirectory {
    pub fn with_user(mut self, display_name: &str) -> (Self, UserId) {
        let id = UserId::random();
        self.users.insert(
            id,
            UserProfile {
                id,
                display_name: display_name.to_owned(),
                avatar_url: Some(format!("https://cdn.example/{display_name}.png")),
            },
        );
        (self, id)
    }

    pub fn with_creator(mut self, name: &str) -> (Self, CreatorId) {
        let id = CreatorId::random();
        self.creators.insert(
            id,
            CreatorProfile {
                id,
                name: name.to_owned(),
                avatar_url: None,
            },
        );
        (self, id)
    }
}

#[async_trait]
impl ProfileDirectory for StaticDirectory {
    async fn find_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UserProfile>, ProfileDirectoryError> {
        Ok(self.users.get(user_id).cloned())
    }

    async fn find_creator(
        &self,
        creator_id: &CreatorId,
    ) -> Result<Option<CreatorProfile>, ProfileDirectoryError> {
        Ok(self.creators.get(creator_id).cloned())
    }

    async fn users_by_ids(
        &self,
        user_ids: &[UserId],
    ) -> Result<Vec<UserProfile>, ProfileDirectoryError> {
        Ok(user_ids
            .iter()
            .filter_map(|id| self.users.get(id).cloned())
            .collect())
    }

    async fn creators_by_ids(
        &self,
        creator_ids: &[CreatorId],
    ) -> Result<Vec<CreatorProfile>, ProfileDirectoryError> {
        Ok(creator_ids
            .iter()
            .filter_map(|id| self.creators.get(id).cloned())
            .collect())
    }
}

pub type InMemoryService = CheckinService<InMemoryCheckins, InMemoryAggregates, StaticDirectory>;

/// A service over in-memory adapters plus handles to inspect them.
pub struct World {
    pub service: Arc<InMemoryService>,
    pub checkins: Arc<InMemoryCheckins>,
    pub aggregates: Arc<InMemoryAggregates>,
    pub clock: Arc<SettableClock>,
    pub user_id: UserId,
    pub creator_id: CreatorId,
}

impl World {
    /// One fan, one creator, clock at noon on 2024-01-03.
    pub fn new() -> Self {
        Self::with_checkins(InMemoryCheckins::default())
    }

    pub fn with_checkins(checkins: InMemoryCheckins) -> Self {
        let (directory, user_id) = StaticDirectory::default().with_user("ada");
        let (directory, creator_id) = directory.with_creator("Mia");
        Self::assemble(checkins, directory, user_id, creator_id)
    }

    pub fn assemble(
        checkins: InMemoryCheckins,
        directory: StaticDirectory,
        user_id: UserId,
        creator_id: CreatorId,
    ) -> Self {
        let checkins = Arc::new(checkins);
        let aggregates = Arc::new(InMemoryAggregates::default());
        let clock = Arc::new(SettableClock::new(noon(2024, 1, 3)));
        let service = Arc::new(CheckinService::new(
            checkins.clone(),
            aggregates.clone(),
            Arc::new(directory),
            clock.clone(),
        ));
        Self {
            service,
            checkins,
            aggregates,
            clock,
            user_id,
            creator_id,
        }
    }
}

/// Render a `postgres` error with its SQLSTATE and message.
///
/// The `Display` form collapses database errors to `db error`.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };
    let mut summary = format!("postgres error {:?}: {}", db_error.code(), db_error.message());
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}
