use serde::Serialize;

/// Dashboard counters. Field names match what the admin dashboard reads.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_project_views: i64,
    pub recent_blog_comments: i64,
    pub db_status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub database: String,
    pub timestamp: String,
    pub start_at: String,
    pub uptime: String,
    pub version: String,
}

impl HealthCheckResponse {
    pub fn is_healthy(&self) -> bool {
        self.status == "active"
    }
}
