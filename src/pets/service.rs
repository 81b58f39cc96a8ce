use crate::pets::{
    CreateHealthRecordRequest, CreatePetRequest, HealthRecord, Pet, PetError, PetsRepository,
    UpdateHealthRecordRequest, UpdatePetRequest,
};

/// Service for pet business logic
#[derive(Clone)]
pub struct PetService {
    repo: PetsRepository,
}

impl PetService {
    /// Create a new PetService
    pub fn new(repo: PetsRepository) -> Self {
        Self { repo }
    }

    /// Register a new pet
    pub async fn create(&self, request: CreatePetRequest) -> Result<Pet, PetError> {
        let pet = self.repo.create(request).await?;
        tracing::info!("Registered pet {} ({})", pet.pet_id, pet.name);
        Ok(pet)
    }

    /// Update a pet
    pub async fn update(&self, pet_id: i32, request: UpdatePetRequest) -> Result<Pet, PetError> {
        let pet = self.repo.update(pet_id, request).await?;
        tracing::info!("Updated pet {}", pet.pet_id);
        Ok(pet)
    }

    /// Delete a pet once the guard rules allow it
    pub async fn delete(&self, pet_id: i32) -> Result<(), PetError> {
        self.repo.delete(pet_id).await?;
        tracing::info!("Deleted pet {}", pet_id);
        Ok(())
    }

    /// Get a pet by ID
    pub async fn get_by_id(&self, pet_id: i32) -> Result<Pet, PetError> {
        self.repo.find_by_id(pet_id).await?.ok_or(PetError::NotFound)
    }

    /// List all pets
    pub async fn list(&self) -> Result<Vec<Pet>, PetError> {
        self.repo.list().await
    }

    /// Attach a health record to a pet
    pub async fn create_health_record(
        &self,
        pet_id: i32,
        request: CreateHealthRecordRequest,
    ) -> Result<HealthRecord, PetError> {
        let record = self.repo.create_health_record(pet_id, request).await?;
        tracing::info!(
            "Added health record {} for pet {}",
            record.record_id,
            pet_id
        );
        Ok(record)
    }

    /// Update a health record
    pub async fn update_health_record(
        &self,
        record_id: i32,
        request: UpdateHealthRecordRequest,
    ) -> Result<HealthRecord, PetError> {
        let record = self.repo.update_health_record(record_id, request).await?;
        tracing::info!("Updated health record {}", record.record_id);
        Ok(record)
    }

    /// List a pet's health records
    pub async fn health_records(&self, pet_id: i32) -> Result<Vec<HealthRecord>, PetError> {
        self.repo.health_records_by_pet(pet_id).await
    }
}
