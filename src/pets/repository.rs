use sqlx::PgPool;

use crate::pets::error::PetError;
use crate::pets::{
    CreateHealthRecordRequest, CreatePetRequest, HealthRecord, Pet, PetStatus,
    UpdateHealthRecordRequest, UpdatePetRequest,
};

/// Repository for pet and health record operations
#[derive(Clone)]
pub struct PetsRepository {
    pool: PgPool,
}

impl PetsRepository {
    /// Create a new PetsRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a new pet, starting as AVAILABLE
    pub async fn create(&self, request: CreatePetRequest) -> Result<Pet, PetError> {
        let pet = sqlx::query_as::<_, Pet>(
            r#"
            INSERT INTO pet (name, species, breed, date_of_birth)
            VALUES ($1, $2, $3, $4)
            RETURNING pet_id, name, species, breed, date_of_birth, status
            "#,
        )
        .bind(request.name)
        .bind(request.species)
        .bind(request.breed)
        .bind(request.date_of_birth)
        .fetch_one(&self.pool)
        .await?;

        Ok(pet)
    }

    /// Update a pet, leaving absent fields unchanged
    pub async fn update(&self, pet_id: i32, request: UpdatePetRequest) -> Result<Pet, PetError> {
        let pet = sqlx::query_as::<_, Pet>(
            r#"
            UPDATE pet
            SET name = COALESCE($1, name),
                breed = COALESCE($2, breed),
                status = COALESCE($3, status)
            WHERE pet_id = $4
            RETURNING pet_id, name, species, breed, date_of_birth, status
            "#,
        )
        .bind(request.name)
        .bind(request.breed)
        .bind(request.status)
        .bind(pet_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(PetError::NotFound)?;

        Ok(pet)
    }

    /// Delete a pet, enforcing the guard rules
    ///
    /// Deletion is only allowed once the pet has left the cafe's care
    /// (ADOPTED or DECEASED) and nothing still points at it: no PENDING
    /// applications, no unresolved ACTIVE health records, no adoption
    /// follow-up scheduled after today. All guards run inside one
    /// transaction with the pet row locked.
    pub async fn delete(&self, pet_id: i32) -> Result<(), PetError> {
        let mut tx = self.pool.begin().await?;

        let status: PetStatus =
            sqlx::query_scalar("SELECT status FROM pet WHERE pet_id = $1 FOR UPDATE")
                .bind(pet_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(PetError::NotFound)?;

        if !status.is_departed() {
            return Err(PetError::StillInCare);
        }

        let pending_applications: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM adoption_application
            WHERE pet_id = $1 AND status = 'PENDING'
            "#,
        )
        .bind(pet_id)
        .fetch_one(&mut *tx)
        .await?;

        if pending_applications > 0 {
            return Err(PetError::HasPendingApplications);
        }

        // A record with no due date is treated as open-ended care.
        let active_records: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM health_record
            WHERE pet_id = $1
              AND status = 'ACTIVE'
              AND (next_due_date IS NULL OR next_due_date >= CURRENT_DATE)
            "#,
        )
        .bind(pet_id)
        .fetch_one(&mut *tx)
        .await?;

        if active_records > 0 {
            return Err(PetError::HasActiveHealthRecords);
        }

        let future_follow_ups: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM adoption
            WHERE pet_id = $1 AND follow_up_schedule > CURRENT_DATE
            "#,
        )
        .bind(pet_id)
        .fetch_one(&mut *tx)
        .await?;

        if future_follow_ups > 0 {
            return Err(PetError::HasFutureFollowUp);
        }

        sqlx::query("DELETE FROM health_record WHERE pet_id = $1")
            .bind(pet_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM pet WHERE pet_id = $1")
            .bind(pet_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Find a pet by ID
    pub async fn find_by_id(&self, pet_id: i32) -> Result<Option<Pet>, PetError> {
        let pet = sqlx::query_as::<_, Pet>(
            r#"
            SELECT pet_id, name, species, breed, date_of_birth, status
            FROM pet
            WHERE pet_id = $1
            "#,
        )
        .bind(pet_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(pet)
    }

    /// List all pets ordered by ID
    pub async fn list(&self) -> Result<Vec<Pet>, PetError> {
        let pets = sqlx::query_as::<_, Pet>(
            r#"
            SELECT pet_id, name, species, breed, date_of_birth, status
            FROM pet
            ORDER BY pet_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(pets)
    }

    /// Attach a health record to a pet
    pub async fn create_health_record(
        &self,
        pet_id: i32,
        request: CreateHealthRecordRequest,
    ) -> Result<HealthRecord, PetError> {
        let pet_exists: Option<i32> =
            sqlx::query_scalar("SELECT pet_id FROM pet WHERE pet_id = $1")
                .bind(pet_id)
                .fetch_optional(&self.pool)
                .await?;

        if pet_exists.is_none() {
            return Err(PetError::NotFound);
        }

        let record = sqlx::query_as::<_, HealthRecord>(
            r#"
            INSERT INTO health_record (pet_id, record_type, description, next_due_date)
            VALUES ($1, $2, $3, $4)
            RETURNING record_id, pet_id, record_type, description, record_date,
                      next_due_date, status
            "#,
        )
        .bind(pet_id)
        .bind(request.record_type)
        .bind(request.description)
        .bind(request.next_due_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    /// Update a health record's status or due date
    pub async fn update_health_record(
        &self,
        record_id: i32,
        request: UpdateHealthRecordRequest,
    ) -> Result<HealthRecord, PetError> {
        let record = sqlx::query_as::<_, HealthRecord>(
            r#"
            UPDATE health_record
            SET status = COALESCE($1, status),
                next_due_date = COALESCE($2, next_due_date)
            WHERE record_id = $3
            RETURNING record_id, pet_id, record_type, description, record_date,
                      next_due_date, status
            "#,
        )
        .bind(request.status)
        .bind(request.next_due_date)
        .bind(record_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(PetError::RecordNotFound)?;

        Ok(record)
    }

    /// List a pet's health records, newest first
    pub async fn health_records_by_pet(&self, pet_id: i32) -> Result<Vec<HealthRecord>, PetError> {
        let records = sqlx::query_as::<_, HealthRecord>(
            r#"
            SELECT record_id, pet_id, record_type, description, record_date,
                   next_due_date, status
            FROM health_record
            WHERE pet_id = $1
            ORDER BY record_date DESC, record_id DESC
            "#,
        )
        .bind(pet_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
