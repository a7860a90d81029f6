use crate::errors::ClientError;
use crate::models::{
    CompleteProblemRequest, CompleteProblemResponse, DashboardSummary, DailyTaskResponse,
    JobReadinessResponse, ProgressSeries,
};

use super::ApiClient;

impl ApiClient {
    pub async fn dashboard(&self, user_id: &str) -> Result<DashboardSummary, ClientError> {
        self.get_json(&["dashboard", user_id]).await
    }

    pub async fn daily_task(&self, user_id: &str) -> Result<DailyTaskResponse, ClientError> {
        self.get_json(&["dashboard", user_id, "daily"]).await
    }

    pub async fn progress_series(&self, user_id: &str) -> Result<ProgressSeries, ClientError> {
        self.get_json(&["dashboard", user_id, "progress"]).await
    }

    pub async fn complete_problem(
        &self,
        user_id: &str,
        problem_id: &str,
        problem_title: &str,
    ) -> Result<CompleteProblemResponse, ClientError> {
        self.post_json(
            &["dashboard", user_id, "complete-problem"],
            &CompleteProblemRequest {
                problem_id,
                problem_title,
            },
        )
        .await
    }

    pub async fn job_readiness(&self, user_id: &str) -> Result<JobReadinessResponse, ClientError> {
        self.get_json(&["dashboard", user_id, "job-readiness"]).await
    }
}
