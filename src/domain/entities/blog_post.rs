use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::markdown::safe_markdown_to_html;

// ───── Constants ──────────────────────────────────────────────────────
const MAX_TITLE_LENGTH: u64 = 255;

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct BlogPost {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub published_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    /// `published_date` when present, otherwise `created_at`. Lists sort on it.
    pub display_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlogPostInsert {
    pub title: String,
    pub content: String,
    pub published_date: Option<NaiveDate>,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct BlogPostDetailResponse {
    #[serde(flatten)]
    pub post: BlogPost,
    pub content_html: String,
}

// ───── Input & Validation Requests ──────────────────────────────────

/// Body of both `POST /api/blog` and `PUT /api/blog/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct BlogPostRequest {
    #[validate(length(min = 1, max = MAX_TITLE_LENGTH, message = "Title must be between 1 and 255 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Content cannot be empty"))]
    pub content: String,

    /// Calendar date (`YYYY-MM-DD`) the post is shown under.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

// ───── Conversions ──────────────────────────────────────────────────

impl BlogPostRequest {
    /// New posts without a date are published today.
    pub fn into_new_post(self, today: NaiveDate) -> BlogPostInsert {
        BlogPostInsert {
            title: self.title,
            content: self.content,
            published_date: Some(self.date.unwrap_or(today)),
        }
    }

    /// A replace without a date clears it, so the post falls back to `created_at`.
    pub fn into_replacement(self) -> BlogPostInsert {
        BlogPostInsert {
            title: self.title,
            content: self.content,
            published_date: self.date,
        }
    }
}

impl From<BlogPost> for BlogPostDetailResponse {
    fn from(post: BlogPost) -> Self {
        let content_html = safe_markdown_to_html(&post.content);
        BlogPostDetailResponse { post, content_html }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(date: Option<NaiveDate>) -> BlogPostRequest {
        BlogPostRequest {
            title: "Hello".into(),
            content: "# Hi".into(),
            date,
        }
    }

    #[test]
    fn new_post_without_date_uses_today() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        let insert = request(None).into_new_post(today);
        assert_eq!(insert.published_date, Some(today));
    }

    #[test]
    fn replacement_without_date_clears_it() {
        assert_eq!(request(None).into_replacement().published_date, None);
    }

    #[test]
    fn date_is_parsed_from_calendar_string() {
        let parsed: BlogPostRequest =
            serde_json::from_str(r#"{"title":"T","content":"C","date":"2023-11-02"}"#).unwrap();

        assert_eq!(parsed.date, NaiveDate::from_ymd_opt(2023, 11, 2));
    }

    #[test]
    fn detail_response_renders_markdown() {
        let now = Utc::now();
        let post = BlogPost {
            id: 7,
            title: "Hello".into(),
            content: "**bold**".into(),
            published_date: None,
            created_at: now,
            display_date: now,
        };

        let detail = BlogPostDetailResponse::from(post);
        assert!(detail.content_html.contains("<strong>bold</strong>"));

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["content"], "**bold**");
    }
}
