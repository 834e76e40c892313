//! Project endpoints

use axum::extract::{Path, State};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{parse_id, ApiError, Json};
use crate::domain::company::CompanyId;
use crate::domain::project::{Project, ProjectId, ProjectPatch};
use crate::domain::user::UserId;
use crate::domain::Outcome;
use crate::infrastructure::project::CreateProjectRequest;

/// Request to create a new project
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectApiRequest {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub company_id: Option<CompanyId>,
}

/// Request to update a project; absent fields stay unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProjectApiRequest {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub company_id: Option<CompanyId>,
}

impl From<UpdateProjectApiRequest> for ProjectPatch {
    fn from(request: UpdateProjectApiRequest) -> Self {
        Self {
            name: request.name,
            start_date: request.start_date,
            end_date: request.end_date,
            company_id: request.company_id,
        }
    }
}

/// Project response
#[derive(Debug, Clone, Serialize)]
pub struct ProjectResponse {
    pub id: ProjectId,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub company_id: CompanyId,
}

impl From<&Project> for ProjectResponse {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id(),
            name: project.name().to_string(),
            start_date: project.start_date(),
            end_date: project.end_date(),
            company_id: project.company_id(),
        }
    }
}

/// GET /api/projects
pub async fn list_projects(State(state): State<AppState>) -> Outcome<Vec<ProjectResponse>> {
    debug!("Listing projects");

    Outcome::from_result(state.project_service.list().await, |projects| {
        let message = if projects.is_empty() {
            "No projects found"
        } else {
            "Projects found"
        };
        Outcome::ok(projects.iter().map(ProjectResponse::from).collect(), message)
    })
}

/// POST /api/projects
pub async fn create_project(
    State(state): State<AppState>,
    Json(request): Json<CreateProjectApiRequest>,
) -> Outcome<ProjectId> {
    debug!(name = %request.name, "Creating project");

    let service_request = CreateProjectRequest {
        name: request.name,
        start_date: request.start_date,
        end_date: request.end_date,
        company_id: request.company_id,
    };

    Outcome::from_result(state.project_service.create(service_request).await, |project| {
        Outcome::created(project.id(), "Project created successfully")
    })
}

/// GET /api/projects/count
pub async fn count_active_projects(State(state): State<AppState>) -> Outcome<usize> {
    let today = Utc::now().date_naive();
    debug!(as_of = %today, "Counting active projects");

    Outcome::from_result(state.project_service.count_active(today).await, |count| {
        Outcome::ok(count, "Project count retrieved successfully")
    })
}

/// GET /api/projects/manager/{manager_id}
pub async fn get_current_project_for_manager(
    State(state): State<AppState>,
    Path(manager_id): Path<String>,
) -> Result<Outcome<ProjectId>, ApiError> {
    debug!(manager_id = %manager_id, "Getting current project for manager");

    let manager_id: UserId = parse_id(&manager_id, "manager")?;

    Ok(Outcome::from_result(
        state
            .project_service
            .current_project_for_manager(manager_id)
            .await,
        |project_id| Outcome::ok(project_id, "Current project ID retrieved successfully"),
    ))
}

/// GET /api/projects/{project_id}
pub async fn get_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<Outcome<ProjectResponse>, ApiError> {
    debug!(project_id = %project_id, "Getting project");

    let id: ProjectId = parse_id(&project_id, "project")?;

    Ok(Outcome::from_result(
        state.project_service.get(id).await,
        |project| Outcome::ok(ProjectResponse::from(&project), "Project found"),
    ))
}

/// PUT /api/projects/{project_id}
pub async fn update_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Json(request): Json<UpdateProjectApiRequest>,
) -> Result<Outcome<ProjectResponse>, ApiError> {
    debug!(project_id = %project_id, "Updating project");

    let id: ProjectId = parse_id(&project_id, "project")?;

    Ok(Outcome::from_result(
        state.project_service.update(id, request.into()).await,
        |project| Outcome::ok(ProjectResponse::from(&project), "Project updated successfully"),
    ))
}

/// DELETE /api/projects/{project_id}
pub async fn delete_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<Outcome<()>, ApiError> {
    debug!(project_id = %project_id, "Deleting project");

    let id: ProjectId = parse_id(&project_id, "project")?;

    Ok(Outcome::from_result(
        state.project_service.delete(id).await,
        |()| Outcome::no_content(),
    ))
}
