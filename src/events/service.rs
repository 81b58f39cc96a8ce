use crate::events::{
    AttendanceStatus, CreateEventRequest, Event, EventError, EventRegistration, EventsRepository,
    RegistrationPaymentStatus, RegistrationRemoval,
};

/// Service for event business logic
#[derive(Clone)]
pub struct EventService {
    repo: EventsRepository,
}

impl EventService {
    /// Create a new EventService
    pub fn new(repo: EventsRepository) -> Self {
        Self { repo }
    }

    /// Schedule a new event
    pub async fn create(&self, request: CreateEventRequest) -> Result<Event, EventError> {
        if request.end_time <= request.start_time {
            return Err(EventError::ValidationError(
                "End time must be after start time".to_string(),
            ));
        }

        let event = self.repo.create(request).await?;
        tracing::info!("Scheduled event {} ({})", event.event_id, event.title);
        Ok(event)
    }

    /// List all events
    pub async fn list(&self) -> Result<Vec<Event>, EventError> {
        self.repo.list().await
    }

    /// Get an event by ID
    pub async fn get_by_id(&self, event_id: i32) -> Result<Event, EventError> {
        self.repo
            .find_by_id(event_id)
            .await?
            .ok_or(EventError::NotFound)
    }

    /// Register a member for an event
    pub async fn register(
        &self,
        event_id: i32,
        member_id: i32,
    ) -> Result<EventRegistration, EventError> {
        let registration = self.repo.register(event_id, member_id).await?;

        tracing::info!(
            "Registered member {} for event {}",
            registration.member_id,
            registration.event_id
        );

        Ok(registration)
    }

    /// List an event's registrations
    pub async fn registrations(&self, event_id: i32) -> Result<Vec<EventRegistration>, EventError> {
        self.repo.registrations_by_event(event_id).await
    }

    /// Update a registration's attendance status
    ///
    /// The transition is validated inside the repository transaction with
    /// the registration row locked.
    pub async fn update_attendance(
        &self,
        event_id: i32,
        member_id: i32,
        new_status: AttendanceStatus,
    ) -> Result<EventRegistration, EventError> {
        self.repo
            .update_attendance(event_id, member_id, new_status)
            .await
    }

    /// Update a registration's payment status
    pub async fn update_payment(
        &self,
        event_id: i32,
        member_id: i32,
        new_status: RegistrationPaymentStatus,
    ) -> Result<EventRegistration, EventError> {
        self.repo
            .update_payment(event_id, member_id, new_status)
            .await
    }

    /// Remove a registration
    ///
    /// Deleted outright when the event has not started and the payment was
    /// refunded; cancelled otherwise.
    pub async fn remove_registration(
        &self,
        event_id: i32,
        member_id: i32,
    ) -> Result<RegistrationRemoval, EventError> {
        let outcome = self.repo.remove_registration(event_id, member_id).await?;

        match outcome {
            RegistrationRemoval::Deleted => tracing::info!(
                "Deleted registration of member {} for event {}",
                member_id,
                event_id
            ),
            RegistrationRemoval::Cancelled => tracing::info!(
                "Cancelled registration of member {} for event {}",
                member_id,
                event_id
            ),
        }

        Ok(outcome)
    }
}
