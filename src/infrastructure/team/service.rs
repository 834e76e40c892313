//! Team rules: team lifecycle and developer membership

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::domain::audit::{AuditAction, EntityKind};
use crate::domain::project::{Project, ProjectId, ProjectRepository};
use crate::domain::team::{validate_team_name, Team, TeamId, TeamPatch, TeamRepository};
use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::audit::AuditPublisher;
use crate::infrastructure::user::UserService;

const RELEASE_ATTEMPTS: usize = 3;

/// Request for creating a new team
#[derive(Debug, Clone)]
pub struct CreateTeamRequest {
    pub name: String,
    pub manager_id: UserId,
    /// Falls back to the default project when absent
    pub project_id: Option<ProjectId>,
}

/// Team service enforcing team and membership invariants
///
/// Every mutating operation emits an audit record, except a successful delete.
#[derive(Debug)]
pub struct TeamService<T: TeamRepository, P: ProjectRepository, U: UserRepository> {
    repository: Arc<T>,
    projects: Arc<P>,
    users: Arc<UserService<U>>,
    audit: AuditPublisher,
}

impl<T, P, U> TeamService<T, P, U>
where
    T: TeamRepository,
    P: ProjectRepository,
    U: UserRepository,
{
    /// Create a new team service
    pub fn new(
        repository: Arc<T>,
        projects: Arc<P>,
        users: Arc<UserService<U>>,
        audit: AuditPublisher,
    ) -> Self {
        Self {
            repository,
            projects,
            users,
            audit,
        }
    }

    /// Create a new team
    pub async fn create(&self, request: CreateTeamRequest) -> Result<Team, DomainError> {
        info!(name = %request.name, manager_id = %request.manager_id, "Creating team");

        match self.try_create(request).await {
            Ok(team) => {
                self.audit.record(
                    AuditAction::CreateSuccess,
                    EntityKind::Team,
                    format!("Successfully created team: {}", team.name()),
                );
                Ok(team)
            }
            Err(e) => {
                self.audit_failure(AuditAction::CreateFailed, "create team", &e);
                Err(e)
            }
        }
    }

    async fn try_create(&self, request: CreateTeamRequest) -> Result<Team, DomainError> {
        let manager = self.resolve_manager(request.manager_id).await?;

        let project_id = match request.project_id {
            Some(id) => self.resolve_project(id).await?.id(),
            None => self
                .projects
                .find_by_name(Project::DEFAULT_NAME)
                .await?
                .ok_or_else(|| {
                    DomainError::internal("No project provided and could not find default project")
                })?
                .id(),
        };

        let team = Team::new(request.name, manager.id(), project_id)?;
        self.repository.create(team).await
    }

    /// Get a team by ID
    pub async fn get(&self, id: TeamId) -> Result<Team, DomainError> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Team not found"))
    }

    /// List all teams ordered by name
    pub async fn list(&self) -> Result<Vec<Team>, DomainError> {
        self.repository.list().await
    }

    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }

    /// Teams led by the given manager; the manager itself is not checked
    pub async fn list_by_manager(&self, manager_id: UserId) -> Result<Vec<Team>, DomainError> {
        self.repository.find_by_manager(manager_id).await
    }

    /// Developers currently assigned to the team
    pub async fn members(&self, id: TeamId) -> Result<Vec<User>, DomainError> {
        let team = self.get(id).await?;
        self.users.find_by_team(team.id()).await
    }

    /// Apply a partial update
    pub async fn update(&self, id: TeamId, patch: TeamPatch) -> Result<Team, DomainError> {
        info!(id = %id, "Updating team");

        match self.try_update(id, patch).await {
            Ok(team) => {
                self.audit.record(
                    AuditAction::UpdateSuccess,
                    EntityKind::Team,
                    format!("Successfully updated team: {}", team.name()),
                );
                Ok(team)
            }
            Err(e) => {
                self.audit_failure(AuditAction::UpdateFailed, "update team", &e);
                Err(e)
            }
        }
    }

    async fn try_update(&self, id: TeamId, patch: TeamPatch) -> Result<Team, DomainError> {
        let mut team = self.get(id).await?;

        let manager_id = match patch.manager_id {
            Some(manager_id) => Some(self.resolve_manager(manager_id).await?.id()),
            None => None,
        };

        let name = patch.effective_name().map(str::to_string);
        if let Some(name) = &name {
            validate_team_name(name)?;
        }

        let project_id = match patch.project_id {
            Some(project_id) => Some(self.resolve_project(project_id).await?.id()),
            None => None,
        };

        if let Some(manager_id) = manager_id {
            team.set_manager(manager_id);
        }
        if let Some(name) = name {
            team.set_name(name)?;
        }
        if let Some(project_id) = project_id {
            team.set_project(project_id);
        }

        self.repository.update(team).await
    }

    /// Delete a team and release its developers
    pub async fn delete(&self, id: TeamId) -> Result<(), DomainError> {
        info!(id = %id, "Deleting team");

        if !self.repository.delete(id).await? {
            self.audit.record(
                AuditAction::DeleteFailed,
                EntityKind::Team,
                format!("Failed to delete team. Reason: Team not found with id: {}", id),
            );
            return Err(DomainError::not_found("Team not found"));
        }

        let members = match self.users.find_by_team(id).await {
            Ok(members) => members,
            Err(e) => {
                warn!(team_id = %id, error = %e, "Team deleted but its members could not be listed");
                return Ok(());
            }
        };

        let releases = members.into_iter().map(|member| async move {
            let member_id = member.id();
            (member_id, self.release_member(member_id, id).await)
        });

        for (member_id, result) in join_all(releases).await {
            if let Err(e) = result {
                warn!(team_id = %id, user_id = %member_id, error = %e, "Failed to release developer");
            }
        }

        Ok(())
    }

    /// Assign a developer to a team
    pub async fn add_developer(
        &self,
        team_id: TeamId,
        developer_id: UserId,
    ) -> Result<(), DomainError> {
        info!(team_id = %team_id, developer_id = %developer_id, "Adding developer to team");

        match self.try_add_developer(team_id, developer_id).await {
            Ok(team) => {
                self.audit.record(
                    AuditAction::AddDeveloperSuccess,
                    EntityKind::Team,
                    format!("Successfully added developer to team: {}", team.name()),
                );
                Ok(())
            }
            Err(e) => {
                self.audit_failure(AuditAction::AddDeveloperFailed, "add developer", &e);
                Err(e)
            }
        }
    }

    async fn try_add_developer(
        &self,
        team_id: TeamId,
        developer_id: UserId,
    ) -> Result<Team, DomainError> {
        let team = self.get(team_id).await?;
        let mut developer = self.resolve_developer(developer_id).await?;

        if developer.team_id().is_some() {
            return Err(DomainError::validation("Developer already assigned to a team"));
        }

        developer.join_team(team.id());
        self.users.save(developer).await?;

        // A delete may have removed the team and released its members
        // between the read above and the save
        if self.repository.get(team_id).await?.is_none() {
            if let Err(e) = self.release_member(developer_id, team_id).await {
                warn!(team_id = %team_id, user_id = %developer_id, error = %e, "Failed to release developer");
            }
            return Err(DomainError::not_found("Team not found"));
        }

        Ok(team)
    }

    /// Remove a developer from a team
    pub async fn remove_developer(
        &self,
        team_id: TeamId,
        developer_id: UserId,
    ) -> Result<(), DomainError> {
        info!(team_id = %team_id, developer_id = %developer_id, "Removing developer from team");

        match self.try_remove_developer(team_id, developer_id).await {
            Ok(team) => {
                self.audit.record(
                    AuditAction::RemoveDeveloperSuccess,
                    EntityKind::Team,
                    format!("Successfully removed developer from team: {}", team.name()),
                );
                Ok(())
            }
            Err(e) => {
                self.audit_failure(AuditAction::RemoveDeveloperFailed, "remove developer", &e);
                Err(e)
            }
        }
    }

    async fn try_remove_developer(
        &self,
        team_id: TeamId,
        developer_id: UserId,
    ) -> Result<Team, DomainError> {
        let team = self.get(team_id).await?;
        let mut developer = self.resolve_developer(developer_id).await?;

        if !developer.is_member_of(team.id()) {
            return Err(DomainError::validation("Developer not in this team"));
        }

        developer.leave_team();
        self.users.save(developer).await?;
        Ok(team)
    }

    /// Clear the user's team reference if it still points at `team_id`
    async fn release_member(&self, user_id: UserId, team_id: TeamId) -> Result<(), DomainError> {
        for _ in 0..RELEASE_ATTEMPTS {
            let Some(mut user) = self.users.find_by_id(user_id).await? else {
                return Ok(());
            };
            if !user.is_member_of(team_id) {
                return Ok(());
            }

            user.leave_team();
            match self.users.save(user).await {
                Err(DomainError::Conflict { .. }) => continue,
                result => return result.map(|_| ()),
            }
        }

        Err(DomainError::conflict(format!(
            "User {} changed concurrently while leaving team {}",
            user_id, team_id
        )))
    }

    async fn resolve_manager(&self, id: UserId) -> Result<User, DomainError> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::validation("User not found"))?;

        if !user.role().can_manage_teams() {
            return Err(DomainError::validation("User is not a manager"));
        }

        Ok(user)
    }

    async fn resolve_developer(&self, id: UserId) -> Result<User, DomainError> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User not found"))?;

        if !user.role().can_join_team() {
            return Err(DomainError::validation("User is not a developer"));
        }

        Ok(user)
    }

    async fn resolve_project(&self, id: ProjectId) -> Result<Project, DomainError> {
        self.projects
            .get(id)
            .await?
            .ok_or_else(|| DomainError::validation("Project not found"))
    }

    fn audit_failure(&self, action: AuditAction, operation: &str, error: &DomainError) {
        debug!(action = %action, error = %error, "Team operation failed");
        self.audit.record(
            action,
            EntityKind::Team,
            format!("Failed to {}. Reason: {}", operation, error.message()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex as StdMutex;

    use chrono::NaiveDate;
    use tokio::sync::Notify;

    use crate::domain::audit::{AuditEntry, MockAuditSink};
    use crate::domain::company::CompanyId;
    use crate::domain::user::Role;
    use crate::infrastructure::audit::InMemoryAuditSink;
    use crate::infrastructure::project::StorageProjectRepository;
    use crate::infrastructure::storage::InMemoryStorage;
    use crate::infrastructure::team::StorageTeamRepository;
    use crate::infrastructure::user::StorageUserRepository;

    struct Fixture<U: UserRepository = StorageUserRepository> {
        service: Arc<TeamService<StorageTeamRepository, StorageProjectRepository, U>>,
        projects: Arc<StorageProjectRepository>,
        users: Arc<UserService<U>>,
        audit: AuditPublisher,
        sink: InMemoryAuditSink,
    }

    impl<U: UserRepository> Fixture<U> {
        async fn audit_entries(&self) -> Vec<AuditEntry> {
            self.audit.flush().await;
            self.sink.entries()
        }
    }

    fn build_fixture<U: UserRepository>(
        user_repository: Arc<U>,
        audit: AuditPublisher,
        sink: InMemoryAuditSink,
    ) -> Fixture<U> {
        let projects = Arc::new(StorageProjectRepository::new(Arc::new(
            InMemoryStorage::<Project>::new(),
        )));
        let users = Arc::new(UserService::new(user_repository));
        let teams = Arc::new(StorageTeamRepository::new(Arc::new(
            InMemoryStorage::<Team>::new(),
        )));

        Fixture {
            service: Arc::new(TeamService::new(
                teams,
                projects.clone(),
                users.clone(),
                audit.clone(),
            )),
            projects,
            users,
            audit,
            sink,
        }
    }

    fn create_fixture_with(audit: AuditPublisher, sink: InMemoryAuditSink) -> Fixture {
        let repository = Arc::new(StorageUserRepository::new(Arc::new(
            InMemoryStorage::<User>::new(),
        )));
        build_fixture(repository, audit, sink)
    }

    fn create_fixture() -> Fixture {
        let sink = InMemoryAuditSink::new();
        let audit = AuditPublisher::spawn(Arc::new(sink.clone()), 64, "staffing-service");
        create_fixture_with(audit, sink)
    }

    async fn add_project<U: UserRepository>(fixture: &Fixture<U>, name: &str) -> Project {
        let project = Project::new(
            name,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            CompanyId::new(1),
        )
        .unwrap();
        fixture.projects.create(project).await.unwrap()
    }

    async fn add_user<U: UserRepository>(fixture: &Fixture<U>, username: &str, role: Role) -> User {
        fixture.users.create(username, role).await.unwrap()
    }

    fn request(name: &str, manager: &User, project: Option<&Project>) -> CreateTeamRequest {
        CreateTeamRequest {
            name: name.to_string(),
            manager_id: manager.id(),
            project_id: project.map(|p| p.id()),
        }
    }

    /// Manager, developer, a Default project and team "T1" on project "Alpha"
    async fn create_populated() -> (Fixture, Team, User) {
        let fixture = create_fixture();
        add_project(&fixture, Project::DEFAULT_NAME).await;
        let alpha = add_project(&fixture, "Alpha").await;
        let manager = add_user(&fixture, "maria", Role::Manager).await;
        let developer = add_user(&fixture, "dev", Role::Developer).await;

        let team = fixture
            .service
            .create(request("T1", &manager, Some(&alpha)))
            .await
            .unwrap();
        (fixture, team, developer)
    }

    #[tokio::test]
    async fn test_create_team() {
        let fixture = create_fixture();
        let alpha = add_project(&fixture, "Alpha").await;
        let manager = add_user(&fixture, "maria", Role::Manager).await;

        let team = fixture
            .service
            .create(request("Core", &manager, Some(&alpha)))
            .await
            .unwrap();

        assert_eq!(team.name(), "Core");
        assert_eq!(team.manager_id(), manager.id());
        assert_eq!(team.project_id(), alpha.id());

        let entries = fixture.audit_entries().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, AuditAction::CreateSuccess);
        assert_eq!(entries[0].entity, EntityKind::Team);
        assert_eq!(entries[0].description, "Successfully created team: Core");
    }

    #[tokio::test]
    async fn test_create_falls_back_to_default_project() {
        let fixture = create_fixture();
        let default = add_project(&fixture, Project::DEFAULT_NAME).await;
        let manager = add_user(&fixture, "maria", Role::Manager).await;

        let team = fixture
            .service
            .create(request("Core", &manager, None))
            .await
            .unwrap();
        assert_eq!(team.project_id(), default.id());
    }

    #[tokio::test]
    async fn test_create_without_default_project() {
        let fixture = create_fixture();
        let manager = add_user(&fixture, "maria", Role::Manager).await;

        let err = fixture
            .service
            .create(request("Core", &manager, None))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Internal { .. }));

        let entries = fixture.audit_entries().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, AuditAction::CreateFailed);
        assert_eq!(
            entries[0].description,
            "Failed to create team. Reason: No project provided and could not find default project"
        );
    }

    #[tokio::test]
    async fn test_create_requires_manager_role() {
        let fixture = create_fixture();
        add_project(&fixture, Project::DEFAULT_NAME).await;

        for role in [Role::Developer, Role::Admin] {
            let user = add_user(&fixture, &format!("user_{}", role), role).await;
            let err = fixture
                .service
                .create(request("Core", &user, None))
                .await
                .unwrap_err();

            assert!(err.is_validation());
            assert_eq!(err.message(), "User is not a manager");
        }
    }

    #[tokio::test]
    async fn test_create_unknown_manager_and_project() {
        let fixture = create_fixture();
        let manager = add_user(&fixture, "maria", Role::Manager).await;

        let err = fixture
            .service
            .create(CreateTeamRequest {
                name: "Core".to_string(),
                manager_id: UserId::generate(),
                project_id: None,
            })
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.message(), "User not found");

        let err = fixture
            .service
            .create(CreateTeamRequest {
                name: "Core".to_string(),
                manager_id: manager.id(),
                project_id: Some(ProjectId::generate()),
            })
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.message(), "Project not found");
    }

    #[tokio::test]
    async fn test_update_team() {
        let (fixture, team, _) = create_populated().await;
        let other_manager = add_user(&fixture, "omar", Role::Manager).await;
        let beta = add_project(&fixture, "Beta").await;

        let updated = fixture
            .service
            .update(
                team.id(),
                TeamPatch {
                    name: Some("Platform".to_string()),
                    manager_id: Some(other_manager.id()),
                    project_id: Some(beta.id()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name(), "Platform");
        assert_eq!(updated.manager_id(), other_manager.id());
        assert_eq!(updated.project_id(), beta.id());

        let entries = fixture.audit_entries().await;
        let last = entries.last().unwrap();
        assert_eq!(last.action, AuditAction::UpdateSuccess);
        assert_eq!(last.description, "Successfully updated team: Platform");
    }

    #[tokio::test]
    async fn test_update_blank_name_keeps_name() {
        let (fixture, team, _) = create_populated().await;

        let updated = fixture
            .service
            .update(
                team.id(),
                TeamPatch {
                    name: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name(), "T1");
    }

    #[tokio::test]
    async fn test_rejected_update_leaves_team_untouched() {
        let (fixture, team, developer) = create_populated().await;

        let err = fixture
            .service
            .update(
                team.id(),
                TeamPatch {
                    name: Some("Renamed".to_string()),
                    manager_id: Some(developer.id()),
                    project_id: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.message(), "User is not a manager");

        let stored = fixture.service.get(team.id()).await.unwrap();
        assert_eq!(stored.name(), "T1");

        let entries = fixture.audit_entries().await;
        assert_eq!(entries.last().unwrap().action, AuditAction::UpdateFailed);
    }

    #[tokio::test]
    async fn test_update_unknown_team() {
        let fixture = create_fixture();

        let err = fixture
            .service
            .update(TeamId::generate(), TeamPatch::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_membership_scenario() {
        let (fixture, team, developer) = create_populated().await;

        fixture
            .service
            .add_developer(team.id(), developer.id())
            .await
            .unwrap();

        let err = fixture
            .service
            .add_developer(team.id(), developer.id())
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.message(), "Developer already assigned to a team");

        let members = fixture.service.members(team.id()).await.unwrap();
        assert_eq!(members.len(), 1);

        fixture
            .service
            .remove_developer(team.id(), developer.id())
            .await
            .unwrap();

        let err = fixture
            .service
            .remove_developer(team.id(), developer.id())
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.message(), "Developer not in this team");

        let actions: Vec<_> = fixture
            .audit_entries()
            .await
            .into_iter()
            .map(|e| e.action)
            .collect();
        assert_eq!(
            actions,
            vec![
                AuditAction::CreateSuccess,
                AuditAction::AddDeveloperSuccess,
                AuditAction::AddDeveloperFailed,
                AuditAction::RemoveDeveloperSuccess,
                AuditAction::RemoveDeveloperFailed,
            ]
        );
    }

    #[tokio::test]
    async fn test_remove_from_other_team() {
        let (fixture, team, developer) = create_populated().await;
        let manager = fixture.service.get(team.id()).await.unwrap().manager_id();
        let other = fixture
            .service
            .create(CreateTeamRequest {
                name: "T2".to_string(),
                manager_id: manager,
                project_id: None,
            })
            .await
            .unwrap();

        fixture
            .service
            .add_developer(team.id(), developer.id())
            .await
            .unwrap();

        let err = fixture
            .service
            .remove_developer(other.id(), developer.id())
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.message(), "Developer not in this team");
    }

    #[tokio::test]
    async fn test_add_non_developer() {
        let (fixture, team, _) = create_populated().await;
        let admin = add_user(&fixture, "root", Role::Admin).await;

        let err = fixture
            .service
            .add_developer(team.id(), admin.id())
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.message(), "User is not a developer");

        let entries = fixture.audit_entries().await;
        assert_eq!(
            entries.last().unwrap().description,
            "Failed to add developer. Reason: User is not a developer"
        );
    }

    #[tokio::test]
    async fn test_add_unknown_team_or_user() {
        let (fixture, team, developer) = create_populated().await;

        let err = fixture
            .service
            .add_developer(TeamId::generate(), developer.id())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.message(), "Team not found");

        let err = fixture
            .service
            .add_developer(team.id(), UserId::generate())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.message(), "User not found");
    }

    #[tokio::test]
    async fn test_delete_releases_developers() {
        let (fixture, team, developer) = create_populated().await;
        fixture
            .service
            .add_developer(team.id(), developer.id())
            .await
            .unwrap();

        fixture.service.delete(team.id()).await.unwrap();

        assert!(fixture.service.get(team.id()).await.unwrap_err().is_not_found());
        let released = fixture.users.find_by_id(developer.id()).await.unwrap().unwrap();
        assert!(released.team_id().is_none());

        // Successful deletes are not audited
        let entries = fixture.audit_entries().await;
        assert_eq!(entries.last().unwrap().action, AuditAction::AddDeveloperSuccess);
    }

    #[tokio::test]
    async fn test_delete_unknown_team() {
        let fixture = create_fixture();
        let id = TeamId::generate();

        let err = fixture.service.delete(id).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.message(), "Team not found");

        let entries = fixture.audit_entries().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, AuditAction::DeleteFailed);
        assert_eq!(
            entries[0].description,
            format!("Failed to delete team. Reason: Team not found with id: {}", id)
        );
    }

    #[tokio::test]
    async fn test_list_count_and_by_manager() {
        let (fixture, team, _) = create_populated().await;
        let manager = team.manager_id();
        fixture
            .service
            .create(CreateTeamRequest {
                name: "A-Team".to_string(),
                manager_id: manager,
                project_id: None,
            })
            .await
            .unwrap();

        let teams = fixture.service.list().await.unwrap();
        assert_eq!(teams[0].name(), "A-Team");
        assert_eq!(fixture.service.count().await.unwrap(), 2);

        assert_eq!(fixture.service.list_by_manager(manager).await.unwrap().len(), 2);
        assert!(fixture
            .service
            .list_by_manager(UserId::generate())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_members_of_unknown_team() {
        let fixture = create_fixture();

        let err = fixture.service.members(TeamId::generate()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_failing_sink_does_not_change_outcome() {
        let mut mock = MockAuditSink::new();
        mock.expect_name().return_const("mock");
        mock.expect_record()
            .returning(|_| Err(DomainError::storage("audit store down")));

        let audit = AuditPublisher::spawn(Arc::new(mock), 8, "staffing-service");
        let fixture = create_fixture_with(audit, InMemoryAuditSink::new());
        let manager = add_user(&fixture, "maria", Role::Manager).await;
        let alpha = add_project(&fixture, "Alpha").await;

        let team = fixture
            .service
            .create(request("Core", &manager, Some(&alpha)))
            .await;
        assert!(team.is_ok());

        let err = fixture
            .service
            .create(request("Core", &manager, None))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Internal { .. }));

        fixture.audit.flush().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_add_developer_single_winner() {
        let fixture = create_fixture();
        let alpha = add_project(&fixture, "Alpha").await;
        let manager = add_user(&fixture, "maria", Role::Manager).await;
        let developer = add_user(&fixture, "dev", Role::Developer).await;

        let mut team_ids = Vec::new();
        for i in 0..8 {
            let team = fixture
                .service
                .create(request(&format!("Team {}", i), &manager, Some(&alpha)))
                .await
                .unwrap();
            team_ids.push(team.id());
        }

        let handles: Vec<_> = team_ids
            .iter()
            .map(|&team_id| {
                let service = fixture.service.clone();
                let developer_id = developer.id();
                tokio::spawn(async move { service.add_developer(team_id, developer_id).await })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(()) => successes += 1,
                Err(e) => assert!(
                    e.is_validation() || matches!(e, DomainError::Conflict { .. }),
                    "unexpected error: {:?}",
                    e
                ),
            }
        }
        assert_eq!(successes, 1);

        let stored = fixture.users.find_by_id(developer.id()).await.unwrap().unwrap();
        let assigned = stored.team_id().unwrap();
        assert!(team_ids.contains(&assigned));
    }

    /// In-memory user repository that can hold one `get` of a chosen user
    /// until resumed, and can fail `find_by_team`
    #[derive(Debug)]
    struct HookedUserRepository {
        inner: StorageUserRepository,
        hold: StdMutex<Option<UserId>>,
        reached: Notify,
        resume: Notify,
        fail_find_by_team: AtomicBool,
    }

    impl HookedUserRepository {
        fn new() -> Self {
            Self {
                inner: StorageUserRepository::new(Arc::new(InMemoryStorage::<User>::new())),
                hold: StdMutex::new(None),
                reached: Notify::new(),
                resume: Notify::new(),
                fail_find_by_team: AtomicBool::new(false),
            }
        }

        fn hold_next_get(&self, id: UserId) {
            *self.hold.lock().unwrap() = Some(id);
        }
    }

    #[async_trait::async_trait]
    impl UserRepository for HookedUserRepository {
        async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
            let held = {
                let mut hold = self.hold.lock().unwrap();
                if *hold == Some(id) {
                    *hold = None;
                    true
                } else {
                    false
                }
            };
            if held {
                self.reached.notify_one();
                self.resume.notified().await;
            }
            self.inner.get(id).await
        }

        async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
            self.inner.get_by_username(username).await
        }

        async fn create(&self, user: User) -> Result<User, DomainError> {
            self.inner.create(user).await
        }

        async fn update(&self, user: User) -> Result<User, DomainError> {
            self.inner.update(user).await
        }

        async fn find_by_team(&self, team_id: TeamId) -> Result<Vec<User>, DomainError> {
            if self.fail_find_by_team.load(Ordering::SeqCst) {
                return Err(DomainError::storage("user store down"));
            }
            self.inner.find_by_team(team_id).await
        }

        async fn list(&self) -> Result<Vec<User>, DomainError> {
            self.inner.list().await
        }
    }

    fn create_hooked_fixture() -> (Fixture<HookedUserRepository>, Arc<HookedUserRepository>) {
        let sink = InMemoryAuditSink::new();
        let audit = AuditPublisher::spawn(Arc::new(sink.clone()), 64, "staffing-service");
        let repository = Arc::new(HookedUserRepository::new());
        (build_fixture(repository.clone(), audit, sink), repository)
    }

    #[tokio::test]
    async fn test_add_developer_to_team_deleted_mid_operation() {
        let (fixture, repository) = create_hooked_fixture();
        let alpha = add_project(&fixture, "Alpha").await;
        let manager = add_user(&fixture, "maria", Role::Manager).await;
        let developer = add_user(&fixture, "dev", Role::Developer).await;
        let t1 = fixture
            .service
            .create(request("T1", &manager, Some(&alpha)))
            .await
            .unwrap();
        let t2 = fixture
            .service
            .create(request("T2", &manager, Some(&alpha)))
            .await
            .unwrap();

        // Pause the add after it has read the team, delete the team, resume
        repository.hold_next_get(developer.id());
        let service = fixture.service.clone();
        let (t1_id, developer_id) = (t1.id(), developer.id());
        let add = tokio::spawn(async move { service.add_developer(t1_id, developer_id).await });

        repository.reached.notified().await;
        fixture.service.delete(t1_id).await.unwrap();
        repository.resume.notify_one();

        let err = add.await.unwrap().unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.message(), "Team not found");

        let stored = fixture.users.find_by_id(developer.id()).await.unwrap().unwrap();
        assert!(stored.team_id().is_none());

        fixture
            .service
            .add_developer(t2.id(), developer.id())
            .await
            .unwrap();
        let stored = fixture.users.find_by_id(developer.id()).await.unwrap().unwrap();
        assert!(stored.is_member_of(t2.id()));
    }

    #[tokio::test]
    async fn test_delete_succeeds_when_members_cannot_be_listed() {
        let (fixture, repository) = create_hooked_fixture();
        let alpha = add_project(&fixture, "Alpha").await;
        let manager = add_user(&fixture, "maria", Role::Manager).await;
        let team = fixture
            .service
            .create(request("T1", &manager, Some(&alpha)))
            .await
            .unwrap();

        repository.fail_find_by_team.store(true, Ordering::SeqCst);

        fixture.service.delete(team.id()).await.unwrap();
        assert!(fixture.service.get(team.id()).await.unwrap_err().is_not_found());
    }
}
