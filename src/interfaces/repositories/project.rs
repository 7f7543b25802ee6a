use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    entities::project::{Project, ProjectInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxProjectRepo,
};

/// Column list shared by every statement returning a full project row.
const PROJECT_COLUMNS: &str = r#"
    id, title, description, image_url, tech_stack, source_url, demo_url, github_url,
    COALESCE(price, 0)::float8 AS price,
    COALESCE(views, 0) AS views,
    created_at
"#;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn list_projects(&self) -> Result<Vec<Project>, AppError>;
    async fn get_project_by_id(&self, id: i32) -> Result<Option<Project>, AppError>;
    async fn create_project(&self, project: &ProjectInsert) -> Result<Project, AppError>;
    /// Full-row replace. `None` when no row has this id.
    async fn replace_project(&self, id: i32, project: &ProjectInsert) -> Result<Option<Project>, AppError>;
    /// Returns the number of rows removed.
    async fn delete_project(&self, id: i32) -> Result<u64, AppError>;
    /// Returns the new view count, `None` when no row has this id.
    async fn increment_views(&self, id: i32) -> Result<Option<i32>, AppError>;
}

impl SqlxProjectRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxProjectRepo { pool }
    }
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        let projects = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    async fn get_project_by_id(&self, id: i32) -> Result<Option<Project>, AppError> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    async fn create_project(&self, project: &ProjectInsert) -> Result<Project, AppError> {
        let created = sqlx::query_as::<_, Project>(&format!(
            r#"
            INSERT INTO projects (
                title, description, image_url, tech_stack, source_url, demo_url, github_url, price
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.image_url)
        .bind(&project.tech_stack)
        .bind(&project.source_url)
        .bind(&project.demo_url)
        .bind(&project.github_url)
        .bind(project.price)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn replace_project(&self, id: i32, project: &ProjectInsert) -> Result<Option<Project>, AppError> {
        let updated = sqlx::query_as::<_, Project>(&format!(
            r#"
            UPDATE projects SET
                title = $1,
                description = $2,
                image_url = $3,
                tech_stack = $4,
                source_url = $5,
                demo_url = $6,
                github_url = $7,
                price = $8
            WHERE id = $9
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.image_url)
        .bind(&project.tech_stack)
        .bind(&project.source_url)
        .bind(&project.demo_url)
        .bind(&project.github_url)
        .bind(project.price)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete_project(&self, id: i32) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn increment_views(&self, id: i32) -> Result<Option<i32>, AppError> {
        let views: Option<i32> = sqlx::query_scalar(
            r#"
            UPDATE projects
            SET views = COALESCE(views, 0) + 1
            WHERE id = $1
            RETURNING views
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(views)
    }
}
