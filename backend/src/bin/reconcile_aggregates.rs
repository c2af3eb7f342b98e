//! Recount one creator's daily check-ins and repair the stored counter.
//!
//! Run after a check-in reported `aggregateRecorded: false`, or on a schedule
//! for the previous UTC day.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io;
use std::sync::Arc;

use chrono::NaiveDate;
use checkin_backend::domain::ports::AggregateReconciliationCommand;
use checkin_backend::domain::{AggregateReconciliationService, CreatorId, today};
use checkin_backend::outbound::persistence::{
    DbPool, DieselCheckinRepository, DieselDailyAggregateRepository, PoolConfig,
};
use clap::Parser;
use mockable::DefaultClock;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// `reconcile-aggregates` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "reconcile-aggregates",
    about = "Rebuild a creator's daily check-in counter from the check-in log",
    version
)]
struct CliArgs {
    /// Creator whose counter is rebuilt.
    #[arg(long = "creator-id", value_name = "uuid", value_parser = parse_creator_id)]
    creator_id: CreatorId,
    /// UTC calendar day as `YYYY-MM-DD`. Defaults to yesterday.
    #[arg(long = "date", value_name = "YYYY-MM-DD")]
    date: Option<NaiveDate>,
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let date = match args.date {
        Some(date) => date,
        None => default_date(today(&DefaultClock))?,
    };

    let database_url = resolve_database_url(args.database_url)?;
    let pool = DbPool::new(PoolConfig::new(&database_url))
        .await
        .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;

    let command = AggregateReconciliationService::new(
        Arc::new(DieselCheckinRepository::new(pool.clone())),
        Arc::new(DieselDailyAggregateRepository::new(pool)),
    );
    let outcome = command
        .reconcile_day(&args.creator_id, date)
        .await
        .map_err(|error| io::Error::other(format!("reconciliation failed: {error}")))?;

    println!("creator_id={}", outcome.creator_id);
    println!("date={}", outcome.date);
    match outcome.previous_count {
        Some(previous) => println!("previous_count={previous}"),
        None => println!("previous_count=none"),
    }
    println!("count={}", outcome.count);
    println!("corrected={}", outcome.corrected());

    Ok(())
}

fn parse_creator_id(raw: &str) -> Result<CreatorId, String> {
    CreatorId::new(raw).map_err(|error| format!("invalid creator id: {error}"))
}

fn default_date(today: NaiveDate) -> io::Result<NaiveDate> {
    today
        .pred_opt()
        .ok_or_else(|| io::Error::other("no calendar day precedes today"))
}

fn resolve_database_url(explicit: Option<String>) -> io::Result<String> {
    if let Some(value) = explicit {
        if value.trim().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "--database-url must not be empty when provided",
            ));
        }
        return Ok(value);
    }

    let from_env = env::var("DATABASE_URL").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "database URL missing: set --database-url or DATABASE_URL",
        )
    })?;
    if from_env.trim().is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "DATABASE_URL must not be empty",
        ));
    }
    Ok(from_env)
}
