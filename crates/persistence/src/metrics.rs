//! Query timing and connection pool gauges.
//!
//! Every repository query runs through [`QueryTimer::finish`], which records
//! its latency labelled by outcome and counts failures by kind. Pool gauges
//! are refreshed when `/metrics` is scraped.

use metrics::{counter, gauge, histogram};
use sqlx::PgPool;
use std::time::Instant;

const QUERY_DURATION: &str = "db_query_duration_seconds";
const QUERY_ERRORS: &str = "db_query_errors_total";
const POOL_CONNECTIONS: &str = "db_pool_connections";
const POOL_MAX_CONNECTIONS: &str = "db_pool_max_connections";

/// Coarse classification of a failed query, used as a metric label.
pub fn error_kind(err: &sqlx::Error) -> &'static str {
    match err {
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => "unique_violation",
        sqlx::Error::Database(_) => "database",
        sqlx::Error::RowNotFound => "row_not_found",
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => "pool",
        sqlx::Error::Io(_) | sqlx::Error::Tls(_) => "connection",
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => "decode",
        _ => "other",
    }
}

/// Times one named query.
///
/// ```ignore
/// let timer = QueryTimer::new("find_booking_by_id");
/// timer.finish(sqlx::query_as::<_, BookingEntity>(...).fetch_optional(&pool).await)
/// ```
#[derive(Debug)]
pub struct QueryTimer {
    query: &'static str,
    start: Instant,
}

impl QueryTimer {
    pub fn new(query: &'static str) -> Self {
        Self {
            query,
            start: Instant::now(),
        }
    }

    /// Records the elapsed time and hands `result` back unchanged.
    pub fn finish<T>(self, result: Result<T, sqlx::Error>) -> Result<T, sqlx::Error> {
        let elapsed = self.start.elapsed().as_secs_f64();
        let outcome = match &result {
            Ok(_) => "ok",
            Err(err) => {
                let kind = error_kind(err);
                counter!(QUERY_ERRORS, "query" => self.query, "kind" => kind).increment(1);
                // Unique violations are expected conflicts; callers map them.
                if kind != "unique_violation" {
                    tracing::warn!(query = self.query, kind, error = %err, "Query failed");
                }
                "error"
            }
        };
        histogram!(QUERY_DURATION, "query" => self.query, "outcome" => outcome).record(elapsed);
        result
    }
}

/// Publishes the pool's current size split into active and idle connections.
pub fn record_pool_gauges(pool: &PgPool) {
    let size = pool.size() as usize;
    let idle = pool.num_idle();

    gauge!(POOL_CONNECTIONS, "state" => "active").set(size.saturating_sub(idle) as f64);
    gauge!(POOL_CONNECTIONS, "state" => "idle").set(idle as f64);
    gauge!(POOL_MAX_CONNECTIONS).set(pool.options().get_max_connections() as f64);
}
