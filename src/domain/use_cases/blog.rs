use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::{
    entities::blog_post::{BlogPost, BlogPostDetailResponse, BlogPostRequest},
    errors::AppError,
    repositories::blog_post::BlogPostRepository,
    utils::valid_id::valid_id,
};

pub struct BlogPostHandler {
    pub blog_post_repo: Arc<dyn BlogPostRepository>,
}

impl BlogPostHandler {
    pub fn new(blog_post_repo: Arc<dyn BlogPostRepository>) -> Self {
        BlogPostHandler { blog_post_repo }
    }

    /// Retrieves all blog posts ordered by display date
    pub async fn list_blog_posts(&self) -> Result<Vec<BlogPost>, AppError> {
        self.blog_post_repo.list_blog_posts().await
    }

    /// Retrieves a blog post with its content rendered to HTML
    pub async fn get_blog_post(&self, id: &str) -> Result<BlogPostDetailResponse, AppError> {
        let post = match valid_id(id)? {
            Some(valid_id) => self.blog_post_repo.get_blog_post_by_id(valid_id).await?,
            None => None,
        };
        let post = post.ok_or_else(not_found)?;

        Ok(BlogPostDetailResponse::from(post))
    }

    /// Creates a blog post dated today unless a date is given
    pub async fn create_blog_post(&self, request: BlogPostRequest) -> Result<BlogPost, AppError> {
        request.validate()?;

        let insert = request.into_new_post(Utc::now().date_naive());
        let post = self.blog_post_repo.create_blog_post(&insert).await?;

        tracing::info!(post_id = post.id, "Blog post created");
        Ok(post)
    }

    pub async fn update_blog_post(&self, id: &str, request: BlogPostRequest) -> Result<BlogPost, AppError> {
        let valid_id = valid_id(id)?;
        request.validate()?;

        let Some(valid_id) = valid_id else {
            return Err(not_found());
        };
        let insert = request.into_replacement();

        self.blog_post_repo
            .replace_blog_post(valid_id, &insert)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn delete_blog_post(&self, id: &str) -> Result<(), AppError> {
        if let Some(valid_id) = valid_id(id)? {
            self.blog_post_repo.delete_blog_post(valid_id).await?;
        }
        Ok(())
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Blog post not found".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::blog_post::BlogPostInsert;
    use crate::repositories::blog_post::MockBlogPostRepository;
    use chrono::NaiveDate;
    use mockall::predicate::eq;

    fn post_from(id: i32, insert: &BlogPostInsert) -> BlogPost {
        let now = Utc::now();
        BlogPost {
            id,
            title: insert.title.clone(),
            content: insert.content.clone(),
            published_date: insert.published_date,
            created_at: now,
            display_date: now,
        }
    }

    fn request(date: Option<NaiveDate>) -> BlogPostRequest {
        BlogPostRequest {
            title: "Release notes".into(),
            content: "Shipped *things*".into(),
            date,
        }
    }

    #[actix_rt::test]
    async fn create_without_date_publishes_today() {
        let today = Utc::now().date_naive();
        let mut repo = MockBlogPostRepository::new();
        repo.expect_create_blog_post()
            .withf(move |insert| insert.published_date == Some(today))
            .returning(|insert| Ok(post_from(1, insert)));

        let handler = BlogPostHandler::new(Arc::new(repo));
        let post = handler.create_blog_post(request(None)).await.unwrap();

        assert_eq!(post.published_date, Some(today));
    }

    #[actix_rt::test]
    async fn create_keeps_explicit_date() {
        let date = NaiveDate::from_ymd_opt(2021, 1, 15).unwrap();
        let mut repo = MockBlogPostRepository::new();
        repo.expect_create_blog_post()
            .withf(move |insert| insert.published_date == Some(date))
            .returning(|insert| Ok(post_from(2, insert)));

        let handler = BlogPostHandler::new(Arc::new(repo));

        assert!(handler.create_blog_post(request(Some(date))).await.is_ok());
    }

    #[actix_rt::test]
    async fn empty_content_is_rejected() {
        let mut repo = MockBlogPostRepository::new();
        repo.expect_create_blog_post().never();

        let handler = BlogPostHandler::new(Arc::new(repo));
        let mut req = request(None);
        req.content.clear();

        let err = handler.create_blog_post(req).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[actix_rt::test]
    async fn detail_renders_html() {
        let mut repo = MockBlogPostRepository::new();
        repo.expect_get_blog_post_by_id()
            .with(eq(4))
            .returning(|id| Ok(Some(post_from(id, &request(None).into_replacement()))));

        let handler = BlogPostHandler::new(Arc::new(repo));
        let detail = handler.get_blog_post("4").await.unwrap();

        assert!(detail.content_html.contains("<em>things</em>"));
    }

    #[actix_rt::test]
    async fn missing_post_is_not_found() {
        let mut repo = MockBlogPostRepository::new();
        repo.expect_replace_blog_post().returning(|_, _| Ok(None));

        let handler = BlogPostHandler::new(Arc::new(repo));
        let err = handler.update_blog_post("12", request(None)).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }
}
