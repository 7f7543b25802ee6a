use async_trait::async_trait;
use sqlx::PgPool;

use crate::{errors::AppError, repositories::sqlx_repo::SqlxSystemRepo};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SystemRepository: Send + Sync {
    /// Round-trips a trivial query to the database.
    async fn check_connection(&self) -> Result<(), AppError>;
    /// Sum of `views` over all projects.
    async fn total_project_views(&self) -> Result<i64, AppError>;
    async fn count_comments(&self) -> Result<i64, AppError>;
}

impl SqlxSystemRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxSystemRepo { pool }
    }
}

#[async_trait]
impl SystemRepository for SqlxSystemRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn total_project_views(&self) -> Result<i64, AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(views), 0)::int8 FROM projects")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    async fn count_comments(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
