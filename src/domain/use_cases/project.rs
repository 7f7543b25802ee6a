use std::sync::Arc;

use validator::Validate;

use crate::{
    entities::project::{Project, ProjectInsert, ProjectRequest, ProjectViewsResponse},
    errors::AppError,
    repositories::project::ProjectRepository,
    utils::valid_id::valid_id,
};

pub struct ProjectHandler {
    pub project_repo: Arc<dyn ProjectRepository>,
}

impl ProjectHandler {
    pub fn new(project_repo: Arc<dyn ProjectRepository>) -> Self {
        ProjectHandler { project_repo }
    }

    /// Lists all projects, newest first
    pub async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        self.project_repo.list_projects().await
    }

    pub async fn get_project(&self, id: &str) -> Result<Project, AppError> {
        let project = match valid_id(id)? {
            Some(valid_id) => self.project_repo.get_project_by_id(valid_id).await?,
            None => None,
        };

        project.ok_or_else(not_found)
    }

    /// Creates a project. A missing price is stored as zero.
    pub async fn create_project(&self, request: ProjectRequest) -> Result<Project, AppError> {
        request.validate()?;

        let insert = ProjectInsert::from(request);
        let project = self.project_repo.create_project(&insert).await?;

        tracing::info!(project_id = project.id, "Project created");
        Ok(project)
    }

    /// Replaces every writable field of an existing project
    pub async fn update_project(&self, id: &str, request: ProjectRequest) -> Result<Project, AppError> {
        let valid_id = valid_id(id)?;
        request.validate()?;

        let Some(valid_id) = valid_id else {
            return Err(not_found());
        };
        let insert = ProjectInsert::from(request);

        self.project_repo
            .replace_project(valid_id, &insert)
            .await?
            .ok_or_else(not_found)
    }

    /// Deleting an unknown id is not an error
    pub async fn delete_project(&self, id: &str) -> Result<(), AppError> {
        let Some(valid_id) = valid_id(id)? else {
            return Ok(());
        };

        let removed = self.project_repo.delete_project(valid_id).await?;
        if removed == 0 {
            tracing::debug!(project_id = valid_id, "Delete matched no project");
        }

        Ok(())
    }

    pub async fn record_view(&self, id: &str) -> Result<ProjectViewsResponse, AppError> {
        let valid_id = valid_id(id)?.ok_or_else(not_found)?;

        let views = self.project_repo
            .increment_views(valid_id)
            .await?
            .ok_or_else(not_found)?;

        Ok(ProjectViewsResponse { id: valid_id, views })
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Project not found".to_string())
}
