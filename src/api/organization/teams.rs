//! Team and membership endpoints

use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{parse_id, ApiError, Json};
use crate::domain::project::ProjectId;
use crate::domain::team::{Team, TeamId, TeamPatch};
use crate::domain::user::{Role, User, UserId};
use crate::domain::Outcome;
use crate::infrastructure::team::CreateTeamRequest;

/// Request to create a new team
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeamApiRequest {
    pub name: String,
    pub manager_id: UserId,
    #[serde(default)]
    pub project_id: Option<ProjectId>,
}

/// Request to update a team; absent fields stay unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTeamApiRequest {
    pub name: Option<String>,
    pub manager_id: Option<UserId>,
    pub project_id: Option<ProjectId>,
}

impl From<UpdateTeamApiRequest> for TeamPatch {
    fn from(request: UpdateTeamApiRequest) -> Self {
        Self {
            name: request.name,
            manager_id: request.manager_id,
            project_id: request.project_id,
        }
    }
}

/// Team response
#[derive(Debug, Clone, Serialize)]
pub struct TeamResponse {
    pub id: TeamId,
    pub name: String,
    pub manager_id: UserId,
    pub project_id: ProjectId,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id(),
            name: team.name().to_string(),
            manager_id: team.manager_id(),
            project_id: team.project_id(),
            created_at: team.created_at().to_rfc3339(),
            updated_at: team.updated_at().to_rfc3339(),
        }
    }
}

/// Team member response
#[derive(Debug, Clone, Serialize)]
pub struct MemberResponse {
    pub id: UserId,
    pub username: String,
    pub role: Role,
}

impl From<&User> for MemberResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            username: user.username().to_string(),
            role: user.role(),
        }
    }
}

fn team_list(teams: Vec<Team>) -> Vec<TeamResponse> {
    teams.iter().map(TeamResponse::from).collect()
}

/// GET /api/teams
pub async fn list_teams(State(state): State<AppState>) -> Outcome<Vec<TeamResponse>> {
    debug!("Listing teams");

    Outcome::from_result(state.team_service.list().await, |teams| {
        let message = if teams.is_empty() {
            "No teams found"
        } else {
            "Teams found"
        };
        Outcome::ok(team_list(teams), message)
    })
}

/// POST /api/teams
pub async fn create_team(
    State(state): State<AppState>,
    Json(request): Json<CreateTeamApiRequest>,
) -> Outcome<TeamId> {
    debug!(name = %request.name, manager_id = %request.manager_id, "Creating team");

    let service_request = CreateTeamRequest {
        name: request.name,
        manager_id: request.manager_id,
        project_id: request.project_id,
    };

    Outcome::from_result(state.team_service.create(service_request).await, |team| {
        Outcome::created(team.id(), "Team created successfully")
    })
}

/// GET /api/teams/count
pub async fn count_teams(State(state): State<AppState>) -> Outcome<usize> {
    debug!("Counting teams");

    Outcome::from_result(state.team_service.count().await, |count| {
        Outcome::ok(count, "Total teams count retrieved successfully")
    })
}

/// GET /api/teams/manager/{manager_id}
pub async fn list_teams_by_manager(
    State(state): State<AppState>,
    Path(manager_id): Path<String>,
) -> Result<Outcome<Vec<TeamResponse>>, ApiError> {
    debug!(manager_id = %manager_id, "Listing teams for manager");

    let manager_id: UserId = parse_id(&manager_id, "manager")?;

    Ok(Outcome::from_result(
        state.team_service.list_by_manager(manager_id).await,
        |teams| {
            let message = if teams.is_empty() {
                "No teams found for this manager"
            } else {
                "Teams found for the manager"
            };
            Outcome::ok(team_list(teams), message)
        },
    ))
}

/// GET /api/teams/{team_id}
pub async fn get_team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Outcome<TeamResponse>, ApiError> {
    debug!(team_id = %team_id, "Getting team");

    let id: TeamId = parse_id(&team_id, "team")?;

    Ok(Outcome::from_result(
        state.team_service.get(id).await,
        |team| Outcome::ok(TeamResponse::from(&team), "Team found"),
    ))
}

/// PUT /api/teams/{team_id}
pub async fn update_team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Json(request): Json<UpdateTeamApiRequest>,
) -> Result<Outcome<TeamResponse>, ApiError> {
    debug!(team_id = %team_id, "Updating team");

    let id: TeamId = parse_id(&team_id, "team")?;

    Ok(Outcome::from_result(
        state.team_service.update(id, request.into()).await,
        |team| Outcome::ok(TeamResponse::from(&team), "Team updated successfully"),
    ))
}

/// DELETE /api/teams/{team_id}
pub async fn delete_team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Outcome<()>, ApiError> {
    debug!(team_id = %team_id, "Deleting team");

    let id: TeamId = parse_id(&team_id, "team")?;

    Ok(Outcome::from_result(
        state.team_service.delete(id).await,
        |()| Outcome::no_content(),
    ))
}

/// GET /api/teams/{team_id}/members
pub async fn list_team_members(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Outcome<Vec<MemberResponse>>, ApiError> {
    debug!(team_id = %team_id, "Listing team members");

    let id: TeamId = parse_id(&team_id, "team")?;

    Ok(Outcome::from_result(
        state.team_service.members(id).await,
        |members| {
            Outcome::ok(
                members.iter().map(MemberResponse::from).collect(),
                "Team members found",
            )
        },
    ))
}

/// POST /api/teams/{team_id}/developers/{developer_id}
pub async fn add_developer(
    State(state): State<AppState>,
    Path((team_id, developer_id)): Path<(String, String)>,
) -> Result<Outcome<()>, ApiError> {
    debug!(team_id = %team_id, developer_id = %developer_id, "Adding developer to team");

    let team_id: TeamId = parse_id(&team_id, "team")?;
    let developer_id: UserId = parse_id(&developer_id, "developer")?;

    Ok(Outcome::from_result(
        state.team_service.add_developer(team_id, developer_id).await,
        |()| Outcome::no_content(),
    ))
}

/// DELETE /api/teams/{team_id}/developers/{developer_id}
pub async fn remove_developer(
    State(state): State<AppState>,
    Path((team_id, developer_id)): Path<(String, String)>,
) -> Result<Outcome<()>, ApiError> {
    debug!(team_id = %team_id, developer_id = %developer_id, "Removing developer from team");

    let team_id: TeamId = parse_id(&team_id, "team")?;
    let developer_id: UserId = parse_id(&developer_id, "developer")?;

    Ok(Outcome::from_result(
        state
            .team_service
            .remove_developer(team_id, developer_id)
            .await,
        |()| Outcome::no_content(),
    ))
}
