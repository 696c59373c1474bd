//! Booking repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use domain::models::{BookingChanges, NewBooking};

use crate::entities::{BookingEntity, BookingStatusDb};
use crate::metrics::QueryTimer;

/// Partial unique index allowing one active booking per (date, court, slot).
pub const BOOKINGS_ACTIVE_SLOT_INDEX: &str = "idx_bookings_active_slot";

/// Repository for booking-related database operations.
#[derive(Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    /// Creates a new BookingRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a booking unless its slot is already actively booked.
    ///
    /// Returns `None` when another active booking holds the same
    /// (date, court, slot). The check and insert are a single statement.
    pub async fn create_if_slot_free(
        &self,
        booking: &NewBooking,
    ) -> Result<Option<BookingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("create_booking");
        let result = sqlx::query_as::<_, BookingEntity>(
            r#"
            INSERT INTO bookings (id, user_id, court_number, location, date, time_slot, partner_name, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'booked')
            ON CONFLICT (date, court_number, time_slot) WHERE status = 'booked' DO NOTHING
            RETURNING id, user_id, court_number, location, date, time_slot, partner_name,
                      status, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(booking.user_id)
        .bind(booking.court_number)
        .bind(&booking.location)
        .bind(booking.date)
        .bind(&booking.time_slot)
        .bind(&booking.partner_name)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(result)
    }

    /// Find a booking by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<BookingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_booking_by_id");
        let result = sqlx::query_as::<_, BookingEntity>(
            r#"
            SELECT id, user_id, court_number, location, date, time_slot, partner_name,
                   status, created_at, updated_at
            FROM bookings
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(result)
    }

    /// List a user's bookings by date, then slot label in byte order.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<BookingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_bookings_for_user");
        let result = sqlx::query_as::<_, BookingEntity>(
            r#"
            SELECT id, user_id, court_number, location, date, time_slot, partner_name,
                   status, created_at, updated_at
            FROM bookings
            WHERE user_id = $1
            ORDER BY date ASC, time_slot COLLATE "C" ASC, created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await;
        timer.finish(result)
    }

    /// Merge changes into a booking. Absent fields keep their value.
    ///
    /// Returns `None` if the booking no longer exists. A merge that collides
    /// with another active booking fails with a unique violation on
    /// [`BOOKINGS_ACTIVE_SLOT_INDEX`].
    pub async fn update(
        &self,
        id: Uuid,
        changes: &BookingChanges,
    ) -> Result<Option<BookingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_booking");
        let result = sqlx::query_as::<_, BookingEntity>(
            r#"
            UPDATE bookings SET
                court_number = COALESCE($2, court_number),
                location = COALESCE($3, location),
                date = COALESCE($4, date),
                time_slot = COALESCE($5, time_slot),
                partner_name = COALESCE($6, partner_name),
                status = COALESCE($7, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, court_number, location, date, time_slot, partner_name,
                      status, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(changes.court_number)
        .bind(changes.location.as_deref())
        .bind(changes.date)
        .bind(changes.time_slot.as_deref())
        .bind(changes.partner_name.as_deref())
        .bind(changes.status.map(BookingStatusDb::from))
        .fetch_optional(&self.pool)
        .await;
        timer.finish(result)
    }

    /// Delete a booking.
    /// Returns the number of rows deleted (0 or 1).
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_booking");
        let result = sqlx::query(
            r#"
            DELETE FROM bookings WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await;
        timer.finish(result).map(|r| r.rows_affected())
    }
}
