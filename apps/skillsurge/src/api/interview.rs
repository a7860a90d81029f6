use crate::errors::ClientError;
use crate::models::{
    EndInterviewResponse, InterviewDetails, InterviewFeedback, InterviewType,
    StartInterviewRequest, StartInterviewResponse,
};

use super::ApiClient;

impl ApiClient {
    pub async fn start_interview(
        &self,
        user_id: &str,
        target_role: &str,
        interview_type: InterviewType,
    ) -> Result<StartInterviewResponse, ClientError> {
        self.post_json(
            &["interview", "start"],
            &StartInterviewRequest {
                user_id,
                target_role,
                interview_type,
            },
        )
        .await
    }

    pub async fn interview(&self, interview_id: &str) -> Result<InterviewDetails, ClientError> {
        self.get_json(&["interview", interview_id]).await
    }

    pub async fn interview_feedback(&self, interview_id: &str) -> Result<InterviewFeedback, ClientError> {
        self.get_json(&["interview", interview_id, "feedback"]).await
    }

    pub async fn end_interview(&self, interview_id: &str) -> Result<EndInterviewResponse, ClientError> {
        self.post_empty(&["interview", interview_id, "end"]).await
    }
}
