use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    entities::blog_post::{BlogPost, BlogPostInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxBlogPostRepo,
};

const BLOG_POST_COLUMNS: &str = r#"
    id, title, content, published_date, created_at,
    COALESCE(published_date::timestamptz, created_at) AS display_date
"#;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlogPostRepository: Send + Sync {
    /// Newest first by display date.
    async fn list_blog_posts(&self) -> Result<Vec<BlogPost>, AppError>;
    async fn get_blog_post_by_id(&self, id: i32) -> Result<Option<BlogPost>, AppError>;
    async fn create_blog_post(&self, post: &BlogPostInsert) -> Result<BlogPost, AppError>;
    async fn replace_blog_post(&self, id: i32, post: &BlogPostInsert) -> Result<Option<BlogPost>, AppError>;
    async fn delete_blog_post(&self, id: i32) -> Result<u64, AppError>;
}

impl SqlxBlogPostRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxBlogPostRepo { pool }
    }
}

#[async_trait]
impl BlogPostRepository for SqlxBlogPostRepo {
    async fn list_blog_posts(&self) -> Result<Vec<BlogPost>, AppError> {
        let posts = sqlx::query_as::<_, BlogPost>(&format!(
            "SELECT {BLOG_POST_COLUMNS} FROM blog_posts ORDER BY display_date DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn get_blog_post_by_id(&self, id: i32) -> Result<Option<BlogPost>, AppError> {
        let post = sqlx::query_as::<_, BlogPost>(&format!(
            "SELECT {BLOG_POST_COLUMNS} FROM blog_posts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn create_blog_post(&self, post: &BlogPostInsert) -> Result<BlogPost, AppError> {
        let created = sqlx::query_as::<_, BlogPost>(&format!(
            r#"
            INSERT INTO blog_posts (title, content, published_date)
            VALUES ($1, $2, $3)
            RETURNING {BLOG_POST_COLUMNS}
            "#
        ))
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.published_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn replace_blog_post(&self, id: i32, post: &BlogPostInsert) -> Result<Option<BlogPost>, AppError> {
        let updated = sqlx::query_as::<_, BlogPost>(&format!(
            r#"
            UPDATE blog_posts
            SET title = $1, content = $2, published_date = $3
            WHERE id = $4
            RETURNING {BLOG_POST_COLUMNS}
            "#
        ))
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.published_date)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete_blog_post(&self, id: i32) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
