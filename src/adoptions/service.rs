use crate::adoptions::{
    Adoption, AdoptionApplication, AdoptionError, AdoptionsRepository, ApplicationRemoval,
    RecordAdoptionRequest, ReviewApplicationRequest, SubmitApplicationRequest,
};

/// Service for adoption business logic
#[derive(Clone)]
pub struct AdoptionService {
    repo: AdoptionsRepository,
}

impl AdoptionService {
    /// Create a new AdoptionService
    pub fn new(repo: AdoptionsRepository) -> Self {
        Self { repo }
    }

    /// Submit a new adoption application
    pub async fn submit(
        &self,
        request: SubmitApplicationRequest,
    ) -> Result<AdoptionApplication, AdoptionError> {
        let application = self
            .repo
            .submit(
                request.member_id,
                request.pet_id,
                request.reviewed_by,
                request.notes,
            )
            .await?;

        tracing::info!(
            "Submitted application {} for pet {} by member {}",
            application.application_id,
            application.pet_id,
            application.member_id
        );

        Ok(application)
    }

    /// Review an application
    ///
    /// The decision is validated against the status machine inside the
    /// repository transaction with the row locked; any accepted decision
    /// stamps the review date.
    pub async fn review(
        &self,
        application_id: i32,
        request: ReviewApplicationRequest,
    ) -> Result<AdoptionApplication, AdoptionError> {
        let reviewed = self
            .repo
            .review(application_id, request.status, request.notes)
            .await?;

        tracing::info!(
            "Reviewed application {} as {}",
            reviewed.application_id,
            reviewed.status
        );

        Ok(reviewed)
    }

    /// Remove an application
    ///
    /// Applications never reviewed are deleted outright; reviewed ones are
    /// withdrawn instead, and withdrawing twice is refused.
    pub async fn remove(&self, application_id: i32) -> Result<ApplicationRemoval, AdoptionError> {
        let outcome = self.repo.remove(application_id).await?;

        match outcome {
            ApplicationRemoval::Deleted => {
                tracing::info!("Deleted unreviewed application {}", application_id)
            }
            ApplicationRemoval::Withdrawn => {
                tracing::info!("Withdrew reviewed application {}", application_id)
            }
        }

        Ok(outcome)
    }

    /// Record a completed adoption from an approved application
    pub async fn record_adoption(
        &self,
        request: RecordAdoptionRequest,
    ) -> Result<Adoption, AdoptionError> {
        let adoption = self
            .repo
            .record_adoption(
                request.application_id,
                request.adoption_fee,
                request.follow_up_schedule,
            )
            .await?;

        tracing::info!(
            "Recorded adoption {} for application {}",
            adoption.adoption_id,
            adoption.application_id
        );

        Ok(adoption)
    }

    /// Get an application by ID
    pub async fn get_by_id(
        &self,
        application_id: i32,
    ) -> Result<AdoptionApplication, AdoptionError> {
        self.repo
            .find_by_id(application_id)
            .await?
            .ok_or(AdoptionError::NotFound)
    }

    /// List all applications
    pub async fn list(&self) -> Result<Vec<AdoptionApplication>, AdoptionError> {
        self.repo.list().await
    }

    /// List all recorded adoptions
    pub async fn list_adoptions(&self) -> Result<Vec<Adoption>, AdoptionError> {
        self.repo.list_adoptions().await
    }
}
