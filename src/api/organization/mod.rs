//! Project and team endpoints

pub mod projects;
pub mod teams;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

/// Create the organization API router
pub fn create_organization_router() -> Router<AppState> {
    Router::new()
        // Projects
        .route(
            "/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route("/projects/count", get(projects::count_active_projects))
        .route(
            "/projects/manager/{manager_id}",
            get(projects::get_current_project_for_manager),
        )
        .route(
            "/projects/{project_id}",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        // Teams
        .route("/teams", get(teams::list_teams).post(teams::create_team))
        .route("/teams/count", get(teams::count_teams))
        .route(
            "/teams/manager/{manager_id}",
            get(teams::list_teams_by_manager),
        )
        .route(
            "/teams/{team_id}",
            get(teams::get_team)
                .put(teams::update_team)
                .delete(teams::delete_team),
        )
        .route("/teams/{team_id}/members", get(teams::list_team_members))
        .route(
            "/teams/{team_id}/developers/{developer_id}",
            post(teams::add_developer).delete(teams::remove_developer),
        )
}
