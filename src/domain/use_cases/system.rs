use std::{sync::Arc, time::Duration};

use chrono::Utc;
use humantime::format_duration;

use crate::{
    constants::START_TIME,
    entities::system::{HealthCheckResponse, StatsResponse},
    repositories::system::SystemRepository,
};

pub struct SystemHandler {
    pub system_repo: Arc<dyn SystemRepository>,
}

impl SystemHandler {
    pub fn new(system_repo: Arc<dyn SystemRepository>) -> Self {
        SystemHandler { system_repo }
    }

    /// Probes the store. Never fails; an unreachable store yields an inactive report.
    pub async fn health_check(&self) -> HealthCheckResponse {
        let (status, database) = match self.system_repo.check_connection().await {
            Ok(()) => ("active", "connected"),
            Err(e) => {
                tracing::error!(error = %e, "Health check failed to reach the database");
                ("inactive", "disconnected")
            }
        };

        let now = Utc::now();
        let uptime = now.signed_duration_since(*START_TIME);

        HealthCheckResponse {
            status: status.to_string(),
            database: database.to_string(),
            timestamp: now.to_rfc3339(),
            start_at: START_TIME.to_rfc3339(),
            uptime: format_duration(Duration::from_secs(uptime.num_seconds().max(0) as u64)).to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Dashboard counters. A failing aggregate reads as zero.
    pub async fn stats(&self) -> StatsResponse {
        let total_project_views = self.system_repo.total_project_views().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Could not sum project views");
            0
        });

        let recent_blog_comments = self.system_repo.count_comments().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Could not count comments");
            0
        });

        StatsResponse {
            total_project_views,
            recent_blog_comments,
            db_status: "Connected".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::repositories::system::MockSystemRepository;

    #[actix_rt::test]
    async fn stats_report_aggregates() {
        let mut repo = MockSystemRepository::new();
        repo.expect_total_project_views().returning(|| Ok(42));
        repo.expect_count_comments().returning(|| Ok(3));

        let stats = SystemHandler::new(Arc::new(repo)).stats().await;

        assert_eq!(stats, StatsResponse {
            total_project_views: 42,
            recent_blog_comments: 3,
            db_status: "Connected".to_string(),
        });
    }

    #[actix_rt::test]
    async fn failing_aggregate_degrades_to_zero() {
        let mut repo = MockSystemRepository::new();
        repo.expect_total_project_views().returning(|| Ok(7));
        repo.expect_count_comments()
            .returning(|| Err(AppError::InternalError("relation \"comments\" does not exist".into())));

        let stats = SystemHandler::new(Arc::new(repo)).stats().await;

        assert_eq!(stats.total_project_views, 7);
        assert_eq!(stats.recent_blog_comments, 0);
    }

    #[actix_rt::test]
    async fn health_reports_disconnected_store() {
        let mut repo = MockSystemRepository::new();
        repo.expect_check_connection()
            .returning(|| Err(AppError::InternalError("connection refused".into())));

        let health = SystemHandler::new(Arc::new(repo)).health_check().await;

        assert!(!health.is_healthy());
        assert_eq!(health.database, "disconnected");
    }

    #[actix_rt::test]
    async fn health_reports_connected_store() {
        let mut repo = MockSystemRepository::new();
        repo.expect_check_connection().returning(|| Ok(()));

        let health = SystemHandler::new(Arc::new(repo)).health_check().await;

        assert!(health.is_healthy());
        assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
    }
}
