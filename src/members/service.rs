use crate::members::{
    CreateMemberRequest, Member, MemberError, MembersRepository, UpdateMemberRequest,
};

/// Service for member business logic
#[derive(Clone)]
pub struct MemberService {
    repo: MembersRepository,
}

impl MemberService {
    /// Create a new MemberService
    pub fn new(repo: MembersRepository) -> Self {
        Self { repo }
    }

    /// Register a new member
    pub async fn create(&self, request: CreateMemberRequest) -> Result<Member, MemberError> {
        let member = self.repo.create(request).await?;
        tracing::info!("Registered member {} ({})", member.member_id, member.name);
        Ok(member)
    }

    /// Update a member
    pub async fn update(
        &self,
        member_id: i32,
        request: UpdateMemberRequest,
    ) -> Result<Member, MemberError> {
        let member = self.repo.update(member_id, request).await?;
        tracing::info!("Updated member {}", member.member_id);
        Ok(member)
    }

    /// Delete a member once the guard rules allow it
    pub async fn delete(&self, member_id: i32) -> Result<(), MemberError> {
        self.repo.delete(member_id).await?;
        tracing::info!("Deleted member {}", member_id);
        Ok(())
    }

    /// Get a member by ID
    pub async fn get_by_id(&self, member_id: i32) -> Result<Member, MemberError> {
        self.repo
            .find_by_id(member_id)
            .await?
            .ok_or(MemberError::NotFound)
    }

    /// List all members
    pub async fn list(&self) -> Result<Vec<Member>, MemberError> {
        self.repo.list().await
    }
}
