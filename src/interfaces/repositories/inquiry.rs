use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    entities::inquiry::{Inquiry, NewInquiryForm},
    errors::AppError,
    repositories::sqlx_repo::SqlxInquiryRepo,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InquiryRepository: Send + Sync {
    async fn create_inquiry(&self, form: &NewInquiryForm) -> Result<Inquiry, AppError>;
    async fn list_inquiries(&self) -> Result<Vec<Inquiry>, AppError>;
    async fn delete_inquiry(&self, id: i32) -> Result<u64, AppError>;
}

impl SqlxInquiryRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxInquiryRepo { pool }
    }
}

#[async_trait]
impl InquiryRepository for SqlxInquiryRepo {
    async fn create_inquiry(&self, form: &NewInquiryForm) -> Result<Inquiry, AppError> {
        let inquiry = sqlx::query_as::<_, Inquiry>(
            r#"
            INSERT INTO messages (name, email, message)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, message, created_at
            "#,
        )
        .bind(&form.name)
        .bind(&form.email)
        .bind(&form.message)
        .fetch_one(&self.pool)
        .await?;

        Ok(inquiry)
    }

    async fn list_inquiries(&self) -> Result<Vec<Inquiry>, AppError> {
        let inquiries = sqlx::query_as::<_, Inquiry>(
            r#"
            SELECT id, name, email, message, created_at
            FROM messages
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(inquiries)
    }

    async fn delete_inquiry(&self, id: i32) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
