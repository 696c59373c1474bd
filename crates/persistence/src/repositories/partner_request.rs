//! Partner request repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{PartnerRequestEntity, PartnerRequestStatusDb, PartnerRequestWithDetailsEntity};
use crate::metrics::QueryTimer;

const DETAILS_SELECT: &str = r#"
    SELECT pr.id, pr.status, pr.responded_at, pr.created_at, pr.updated_at,
           pr.from_user_id, fu.username AS from_username, fu.email AS from_email,
           pr.to_user_id, tu.username AS to_username, tu.email AS to_email,
           pr.booking_id,
           b.user_id AS booking_user_id,
           b.court_number AS booking_court_number,
           b.location AS booking_location,
           b.date AS booking_date,
           b.time_slot AS booking_time_slot,
           b.partner_name AS booking_partner_name,
           b.status AS booking_status,
           b.created_at AS booking_created_at,
           b.updated_at AS booking_updated_at
    FROM partner_requests pr
    JOIN users fu ON fu.id = pr.from_user_id
    JOIN users tu ON tu.id = pr.to_user_id
    LEFT JOIN bookings b ON b.id = pr.booking_id
"#;

/// Repository for partner request database operations.
#[derive(Clone)]
pub struct PartnerRequestRepository {
    pool: PgPool,
}

impl PartnerRequestRepository {
    /// Creates a new PartnerRequestRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a pending request unless one is already pending for the same
    /// sender, recipient and booking. Returns `None` in that case.
    pub async fn create_if_absent(
        &self,
        from_user_id: Uuid,
        to_user_id: Uuid,
        booking_id: Uuid,
    ) -> Result<Option<PartnerRequestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("create_partner_request");
        let result = sqlx::query_as::<_, PartnerRequestEntity>(
            r#"
            INSERT INTO partner_requests (id, from_user_id, to_user_id, booking_id, status)
            VALUES ($1, $2, $3, $4, 'pending')
            ON CONFLICT (from_user_id, to_user_id, booking_id) WHERE status = 'pending' DO NOTHING
            RETURNING id, from_user_id, to_user_id, booking_id, status, responded_at, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(from_user_id)
        .bind(to_user_id)
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(result)
    }

    /// Find a partner request by ID.
    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<PartnerRequestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_partner_request_by_id");
        let result = sqlx::query_as::<_, PartnerRequestEntity>(
            r#"
            SELECT id, from_user_id, to_user_id, booking_id, status, responded_at, created_at, updated_at
            FROM partner_requests
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(result)
    }

    /// Requests addressed to a user, newest first.
    pub async fn list_incoming(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<PartnerRequestWithDetailsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_incoming_partner_requests");
        let query = format!(
            "{} WHERE pr.to_user_id = $1 ORDER BY pr.created_at DESC, pr.id DESC",
            DETAILS_SELECT
        );
        let result = sqlx::query_as::<_, PartnerRequestWithDetailsEntity>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await;
        timer.finish(result)
    }

    /// Requests sent by a user, newest first.
    pub async fn list_outgoing(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<PartnerRequestWithDetailsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_outgoing_partner_requests");
        let query = format!(
            "{} WHERE pr.from_user_id = $1 ORDER BY pr.created_at DESC, pr.id DESC",
            DETAILS_SELECT
        );
        let result = sqlx::query_as::<_, PartnerRequestWithDetailsEntity>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await;
        timer.finish(result)
    }

    /// Resolve a pending request addressed to `responder`.
    ///
    /// The status change only applies while the request is still pending,
    /// so of two concurrent responders exactly one gets `Some`. When the new
    /// status is `Accepted`, the booking's partner name is set to the
    /// responder's username in the same transaction; a booking that has
    /// since been deleted is skipped.
    pub async fn resolve(
        &self,
        id: Uuid,
        responder: Uuid,
        status: PartnerRequestStatusDb,
    ) -> Result<Option<PartnerRequestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("resolve_partner_request");
        timer.finish(self.resolve_in_tx(id, responder, status).await)
    }

    async fn resolve_in_tx(
        &self,
        id: Uuid,
        responder: Uuid,
        status: PartnerRequestStatusDb,
    ) -> Result<Option<PartnerRequestEntity>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, PartnerRequestEntity>(
            r#"
            UPDATE partner_requests
            SET status = $3, responded_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND to_user_id = $2 AND status = 'pending'
            RETURNING id, from_user_id, to_user_id, booking_id, status, responded_at, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(responder)
        .bind(status)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(request) = updated else {
            tx.rollback().await?;
            return Ok(None);
        };

        if status == PartnerRequestStatusDb::Accepted {
            sqlx::query(
                r#"
                UPDATE bookings
                SET partner_name = (SELECT username FROM users WHERE id = $2),
                    updated_at = NOW()
                WHERE id = $1
                "#,
            )
            .bind(request.booking_id)
            .bind(responder)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(Some(request))
    }
}
