use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::adoptions::error::AdoptionError;
use crate::adoptions::{
    Adoption, AdoptionApplication, ApplicationRemoval, ApplicationStatus, ApplicationStatusMachine,
};

/// Repository for adoption operations
#[derive(Clone)]
pub struct AdoptionsRepository {
    pool: PgPool,
}

impl AdoptionsRepository {
    /// Create a new AdoptionsRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Submit a new PENDING application with a null review date
    pub async fn submit(
        &self,
        member_id: i32,
        pet_id: i32,
        reviewed_by: i32,
        notes: Option<String>,
    ) -> Result<AdoptionApplication, AdoptionError> {
        let member_exists: Option<i32> =
            sqlx::query_scalar("SELECT member_id FROM member WHERE member_id = $1")
                .bind(member_id)
                .fetch_optional(&self.pool)
                .await?;

        if member_exists.is_none() {
            return Err(AdoptionError::MemberNotFound(member_id));
        }

        let pet_exists: Option<i32> =
            sqlx::query_scalar("SELECT pet_id FROM pet WHERE pet_id = $1")
                .bind(pet_id)
                .fetch_optional(&self.pool)
                .await?;

        if pet_exists.is_none() {
            return Err(AdoptionError::PetNotFound(pet_id));
        }

        let staff_exists: Option<i32> =
            sqlx::query_scalar("SELECT staff_id FROM staff WHERE staff_id = $1")
                .bind(reviewed_by)
                .fetch_optional(&self.pool)
                .await?;

        if staff_exists.is_none() {
            return Err(AdoptionError::StaffNotFound(reviewed_by));
        }

        let application = sqlx::query_as::<_, AdoptionApplication>(
            r#"
            INSERT INTO adoption_application (member_id, pet_id, reviewed_by, notes)
            VALUES ($1, $2, $3, $4)
            RETURNING application_id, member_id, pet_id, status, application_date,
                      reviewed_by, review_date, notes
            "#,
        )
        .bind(member_id)
        .bind(pet_id)
        .bind(reviewed_by)
        .bind(notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(application)
    }

    /// Apply a review decision, stamping the review date
    ///
    /// The row is locked before the transition check, so two concurrent
    /// reviewers cannot both decide the same PENDING application; the
    /// second one sees the first decision and is refused.
    pub async fn review(
        &self,
        application_id: i32,
        new_status: ApplicationStatus,
        notes: Option<String>,
    ) -> Result<AdoptionApplication, AdoptionError> {
        let mut tx = self.pool.begin().await?;

        let current: ApplicationStatus = sqlx::query_scalar(
            "SELECT status FROM adoption_application WHERE application_id = $1 FOR UPDATE",
        )
        .bind(application_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AdoptionError::NotFound)?;

        ApplicationStatusMachine::transition(current, new_status)
            .map_err(AdoptionError::InvalidTransition)?;

        let application = sqlx::query_as::<_, AdoptionApplication>(
            r#"
            UPDATE adoption_application
            SET status = $1,
                review_date = CURRENT_DATE,
                notes = COALESCE($2, notes)
            WHERE application_id = $3
            RETURNING application_id, member_id, pet_id, status, application_date,
                      reviewed_by, review_date, notes
            "#,
        )
        .bind(new_status)
        .bind(notes)
        .bind(application_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(application)
    }

    /// Remove an application: hard delete while never reviewed, withdraw
    /// afterwards
    ///
    /// The row is locked so a concurrent review cannot slip between the
    /// check and the delete.
    pub async fn remove(&self, application_id: i32) -> Result<ApplicationRemoval, AdoptionError> {
        let mut tx = self.pool.begin().await?;

        let (status, review_date): (ApplicationStatus, Option<NaiveDate>) = sqlx::query_as(
            r#"
            SELECT status, review_date FROM adoption_application
            WHERE application_id = $1
            FOR UPDATE
            "#,
        )
        .bind(application_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AdoptionError::NotFound)?;

        let outcome = if review_date.is_none() {
            sqlx::query("DELETE FROM adoption_application WHERE application_id = $1")
                .bind(application_id)
                .execute(&mut *tx)
                .await?;
            ApplicationRemoval::Deleted
        } else {
            if status == ApplicationStatus::Withdrawn {
                return Err(AdoptionError::AlreadyWithdrawn);
            }
            sqlx::query("UPDATE adoption_application SET status = 'WITHDRAWN' WHERE application_id = $1")
                .bind(application_id)
                .execute(&mut *tx)
                .await?;
            ApplicationRemoval::Withdrawn
        };

        tx.commit().await?;

        Ok(outcome)
    }

    /// Record a completed adoption and flip the pet to ADOPTED
    ///
    /// Both writes happen in one transaction with the application row
    /// locked; the insert and the pet status change land together or not
    /// at all.
    pub async fn record_adoption(
        &self,
        application_id: i32,
        adoption_fee: Decimal,
        follow_up_schedule: Option<NaiveDate>,
    ) -> Result<Adoption, AdoptionError> {
        let mut tx = self.pool.begin().await?;

        let (status, pet_id, member_id): (ApplicationStatus, i32, i32) = sqlx::query_as(
            r#"
            SELECT status, pet_id, member_id FROM adoption_application
            WHERE application_id = $1
            FOR UPDATE
            "#,
        )
        .bind(application_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AdoptionError::NotFound)?;

        if status != ApplicationStatus::Approved {
            return Err(AdoptionError::NotApproved);
        }

        let existing: Option<i32> =
            sqlx::query_scalar("SELECT adoption_id FROM adoption WHERE application_id = $1")
                .bind(application_id)
                .fetch_optional(&mut *tx)
                .await?;

        if existing.is_some() {
            return Err(AdoptionError::AlreadyRecorded);
        }

        let adoption = sqlx::query_as::<_, Adoption>(
            r#"
            INSERT INTO adoption
                (application_id, pet_id, member_id, adoption_date, adoption_fee, follow_up_schedule)
            VALUES ($1, $2, $3, CURRENT_DATE, $4, $5)
            RETURNING adoption_id, application_id, pet_id, member_id, adoption_date,
                      adoption_fee, follow_up_schedule
            "#,
        )
        .bind(application_id)
        .bind(pet_id)
        .bind(member_id)
        .bind(adoption_fee)
        .bind(follow_up_schedule)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE pet SET status = 'ADOPTED' WHERE pet_id = $1")
            .bind(pet_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(adoption)
    }

    /// Find an application by ID
    pub async fn find_by_id(
        &self,
        application_id: i32,
    ) -> Result<Option<AdoptionApplication>, AdoptionError> {
        let application = sqlx::query_as::<_, AdoptionApplication>(
            r#"
            SELECT application_id, member_id, pet_id, status, application_date,
                   reviewed_by, review_date, notes
            FROM adoption_application
            WHERE application_id = $1
            "#,
        )
        .bind(application_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(application)
    }

    /// List all applications ordered by ID
    pub async fn list(&self) -> Result<Vec<AdoptionApplication>, AdoptionError> {
        let applications = sqlx::query_as::<_, AdoptionApplication>(
            r#"
            SELECT application_id, member_id, pet_id, status, application_date,
                   reviewed_by, review_date, notes
            FROM adoption_application
            ORDER BY application_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(applications)
    }

    /// List all recorded adoptions ordered by ID
    pub async fn list_adoptions(&self) -> Result<Vec<Adoption>, AdoptionError> {
        let adoptions = sqlx::query_as::<_, Adoption>(
            r#"
            SELECT adoption_id, application_id, pet_id, member_id, adoption_date,
                   adoption_fee, follow_up_schedule
            FROM adoption
            ORDER BY adoption_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(adoptions)
    }
}
