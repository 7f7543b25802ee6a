use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

// ───── Constants ──────────────────────────────────────────────────────
const MAX_TITLE_LENGTH: u64 = 255;
/// Largest value a `DECIMAL(10, 2)` column holds.
pub const MAX_PRICE: f64 = 99_999_999.99;

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    /// Comma separated, stored as typed by the admin.
    pub tech_stack: Option<String>,
    pub source_url: Option<String>,
    pub demo_url: Option<String>,
    pub github_url: Option<String>,
    pub price: f64,
    pub views: i32,
    pub created_at: DateTime<Utc>,
}

/// Row values written on create and on full replace.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectInsert {
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub tech_stack: Option<String>,
    pub source_url: Option<String>,
    pub demo_url: Option<String>,
    pub github_url: Option<String>,
    pub price: f64,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, PartialEq, Serialize)]
pub struct ProjectViewsResponse {
    pub id: i32,
    pub views: i32,
}

// ───── Input & Validation Requests ──────────────────────────────────

/// Body of both `POST /api/projects` and `PUT /api/projects/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProjectRequest {
    #[validate(length(min = 1, max = MAX_TITLE_LENGTH, message = "Title must be between 1 and 255 characters"))]
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub tech_stack: Option<String>,

    #[serde(default)]
    pub source_url: Option<String>,

    #[serde(default)]
    pub demo_url: Option<String>,

    #[serde(default)]
    pub github_url: Option<String>,

    #[validate(range(min = 0.0, max = MAX_PRICE, message = "Price must be between 0 and 99999999.99"))]
    #[serde(default)]
    pub price: Option<f64>,
}

// ───── Conversions ──────────────────────────────────────────────────

impl From<ProjectRequest> for ProjectInsert {
    fn from(request: ProjectRequest) -> Self {
        ProjectInsert {
            title: request.title,
            description: request.description,
            image_url: request.image_url,
            tech_stack: request.tech_stack,
            source_url: request.source_url,
            demo_url: request.demo_url,
            github_url: request.github_url,
            price: request.price.unwrap_or(0.0),
        }
    }
}
