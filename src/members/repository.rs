use sqlx::PgPool;

use crate::members::error::MemberError;
use crate::members::{CreateMemberRequest, Member, UpdateMemberRequest};

/// Repository for member operations
#[derive(Clone)]
pub struct MembersRepository {
    pool: PgPool,
}

impl MembersRepository {
    /// Create a new MembersRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a new member
    pub async fn create(&self, request: CreateMemberRequest) -> Result<Member, MemberError> {
        if let Some(tier_id) = request.tier_id {
            let tier_exists: Option<i32> =
                sqlx::query_scalar("SELECT tier_id FROM membership_tier WHERE tier_id = $1")
                    .bind(tier_id)
                    .fetch_optional(&self.pool)
                    .await?;

            if tier_exists.is_none() {
                return Err(MemberError::TierNotFound(tier_id));
            }
        }

        let member = sqlx::query_as::<_, Member>(
            r#"
            INSERT INTO member (name, phone, email, date_of_birth, emergency_contact, tier_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING member_id, name, phone, email, date_of_birth, emergency_contact, tier_id
            "#,
        )
        .bind(request.name)
        .bind(request.phone)
        .bind(request.email)
        .bind(request.date_of_birth)
        .bind(request.emergency_contact)
        .bind(request.tier_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(member)
    }

    /// Update a member, leaving absent fields unchanged
    pub async fn update(
        &self,
        member_id: i32,
        request: UpdateMemberRequest,
    ) -> Result<Member, MemberError> {
        if let Some(tier_id) = request.tier_id {
            let tier_exists: Option<i32> =
                sqlx::query_scalar("SELECT tier_id FROM membership_tier WHERE tier_id = $1")
                    .bind(tier_id)
                    .fetch_optional(&self.pool)
                    .await?;

            if tier_exists.is_none() {
                return Err(MemberError::TierNotFound(tier_id));
            }
        }

        let member = sqlx::query_as::<_, Member>(
            r#"
            UPDATE member
            SET name = COALESCE($1, name),
                phone = COALESCE($2, phone),
                email = COALESCE($3, email),
                emergency_contact = COALESCE($4, emergency_contact),
                tier_id = COALESCE($5, tier_id)
            WHERE member_id = $6
            RETURNING member_id, name, phone, email, date_of_birth, emergency_contact, tier_id
            "#,
        )
        .bind(request.name)
        .bind(request.phone)
        .bind(request.email)
        .bind(request.emergency_contact)
        .bind(request.tier_id)
        .bind(member_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(MemberError::NotFound)?;

        Ok(member)
    }

    /// Delete a member, enforcing the guard rules
    ///
    /// All three guards are evaluated inside one transaction before the
    /// delete: no BOOKED or IN_PROGRESS reservations, no PENDING adoption
    /// applications, no orders that are not PAID.
    pub async fn delete(&self, member_id: i32) -> Result<(), MemberError> {
        let mut tx = self.pool.begin().await?;

        let exists: Option<i32> =
            sqlx::query_scalar("SELECT member_id FROM member WHERE member_id = $1 FOR UPDATE")
                .bind(member_id)
                .fetch_optional(&mut *tx)
                .await?;

        if exists.is_none() {
            return Err(MemberError::NotFound);
        }

        let active_reservations: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM reservation
            WHERE member_id = $1 AND status IN ('BOOKED', 'IN_PROGRESS')
            "#,
        )
        .bind(member_id)
        .fetch_one(&mut *tx)
        .await?;

        if active_reservations > 0 {
            return Err(MemberError::HasActiveReservations);
        }

        let pending_applications: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM adoption_application
            WHERE member_id = $1 AND status = 'PENDING'
            "#,
        )
        .bind(member_id)
        .fetch_one(&mut *tx)
        .await?;

        if pending_applications > 0 {
            return Err(MemberError::HasPendingApplications);
        }

        let unpaid_orders: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM customer_order
            WHERE member_id = $1 AND payment_status != 'PAID'
            "#,
        )
        .bind(member_id)
        .fetch_one(&mut *tx)
        .await?;

        if unpaid_orders > 0 {
            return Err(MemberError::HasUnpaidOrders);
        }

        sqlx::query("DELETE FROM member WHERE member_id = $1")
            .bind(member_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Find a member by ID
    pub async fn find_by_id(&self, member_id: i32) -> Result<Option<Member>, MemberError> {
        let member = sqlx::query_as::<_, Member>(
            r#"
            SELECT member_id, name, phone, email, date_of_birth, emergency_contact, tier_id
            FROM member
            WHERE member_id = $1
            "#,
        )
        .bind(member_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }

    /// List all members ordered by ID
    pub async fn list(&self) -> Result<Vec<Member>, MemberError> {
        let members = sqlx::query_as::<_, Member>(
            r#"
            SELECT member_id, name, phone, email, date_of_birth, emergency_contact, tier_id
            FROM member
            ORDER BY member_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }
}
