//! Mock interview session: idle → loading → active or demo → completed.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::models::{
    FeedbackCategory, InterviewFeedback, InterviewType, PracticeRecommendation,
    StartInterviewResponse,
};

pub const DEFAULT_TARGET_ROLE: &str = "Software Engineer";
const DEMO_MESSAGE: &str = "Demo mode - Configure Tavus API key for live video interviews";
const UNREACHABLE_MESSAGE: &str = "Unable to connect to interview service. Please try again later.";
const DEMO_INTERVIEW_ID: &str = "demo-id";

#[async_trait]
pub trait InterviewService: Send + Sync {
    async fn start(
        &self,
        user_id: &str,
        target_role: &str,
        interview_type: InterviewType,
    ) -> Result<StartInterviewResponse, ClientError>;

    async fn end(&self, interview_id: &str) -> Result<(), ClientError>;

    async fn feedback(&self, interview_id: &str) -> Result<InterviewFeedback, ClientError>;
}

#[async_trait]
impl InterviewService for ApiClient {
    async fn start(
        &self,
        user_id: &str,
        target_role: &str,
        interview_type: InterviewType,
    ) -> Result<StartInterviewResponse, ClientError> {
        self.start_interview(user_id, target_role, interview_type)
            .await
    }

    async fn end(&self, interview_id: &str) -> Result<(), ClientError> {
        self.end_interview(interview_id).await.map(|_| ())
    }

    async fn feedback(&self, interview_id: &str) -> Result<InterviewFeedback, ClientError> {
        self.interview_feedback(interview_id).await
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InterviewStatus {
    Idle,
    Loading,
    Active {
        interview_id: String,
        conversation_url: String,
    },
    Demo {
        interview_id: String,
        message: String,
    },
    Completed {
        feedback: InterviewFeedback,
    },
}

impl InterviewStatus {
    pub fn name(&self) -> &'static str {
        match self {
            InterviewStatus::Idle => "idle",
            InterviewStatus::Loading => "loading",
            InterviewStatus::Active { .. } => "active",
            InterviewStatus::Demo { .. } => "demo",
            InterviewStatus::Completed { .. } => "completed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct MockInterview {
    user_id: String,
    target_role: String,
    interview_type: InterviewType,
    status: InterviewStatus,
}

impl MockInterview {
    pub fn new(user_id: impl Into<String>, target_role: Option<&str>, interview_type: InterviewType) -> Self {
        Self {
            user_id: user_id.into(),
            target_role: target_role.unwrap_or(DEFAULT_TARGET_ROLE).to_string(),
            interview_type,
            status: InterviewStatus::Idle,
        }
    }

    pub fn status(&self) -> &InterviewStatus {
        &self.status
    }

    pub fn target_role(&self) -> &str {
        &self.target_role
    }

    /// Starts a session. A demo answer, a missing conversation URL or a
    /// failed request all land in `Demo`.
    pub async fn start(&mut self, service: &dyn InterviewService) -> Result<&InterviewStatus, ClientError> {
        if !matches!(self.status, InterviewStatus::Idle) {
            return Err(ClientError::Validation(format!(
                "cannot start an interview while {}",
                self.status.name()
            )));
        }
        self.status = InterviewStatus::Loading;

        self.status = match service
            .start(&self.user_id, &self.target_role, self.interview_type)
            .await
        {
            Ok(resp) => {
                let session = resp.interview;
                let interview_id = if session.id.is_empty() {
                    DEMO_INTERVIEW_ID.to_string()
                } else {
                    session.id
                };
                match session.conversation_url.filter(|u| !u.is_empty()) {
                    Some(conversation_url) if !session.demo => {
                        info!(%interview_id, "interview started");
                        InterviewStatus::Active {
                            interview_id,
                            conversation_url,
                        }
                    }
                    _ => InterviewStatus::Demo {
                        interview_id,
                        message: session.message.unwrap_or_else(|| DEMO_MESSAGE.to_string()),
                    },
                }
            }
            Err(e) => {
                warn!("failed to start interview: {e}");
                InterviewStatus::Demo {
                    interview_id: DEMO_INTERVIEW_ID.to_string(),
                    message: UNREACHABLE_MESSAGE.to_string(),
                }
            }
        };
        Ok(&self.status)
    }

    /// Ends the session and shows feedback. Live sessions are closed on the
    /// server and their feedback fetched; demo sessions get the sample.
    pub async fn end(&mut self, service: &dyn InterviewService) -> Result<InterviewFeedback, ClientError> {
        let feedback = match &self.status {
            InterviewStatus::Active { interview_id, .. } => {
                if let Err(e) = service.end(interview_id).await {
                    warn!(%interview_id, "failed to end interview: {e}");
                }
                service.feedback(interview_id).await.unwrap_or_else(|e| {
                    warn!(%interview_id, "feedback unavailable, showing sample: {e}");
                    sample_feedback(interview_id)
                })
            }
            InterviewStatus::Demo { interview_id, .. } => sample_feedback(interview_id),
            other => {
                return Err(ClientError::Validation(format!(
                    "no interview in progress ({})",
                    other.name()
                )))
            }
        };

        self.status = InterviewStatus::Completed {
            feedback: feedback.clone(),
        };
        Ok(feedback)
    }

    /// Back to idle for another attempt.
    pub fn reset(&mut self) {
        self.status = InterviewStatus::Idle;
    }
}

/// Feedback shown when the server has none.
pub fn sample_feedback(interview_id: &str) -> InterviewFeedback {
    let category = |name: &str, score: u8, feedback: &str| FeedbackCategory {
        name: name.to_string(),
        score,
        feedback: feedback.to_string(),
    };
    InterviewFeedback {
        interview_id: interview_id.to_string(),
        interview_type: None,
        overall_score: 78,
        categories: vec![
            category("Communication", 82, "Clear and structured responses."),
            category("Technical Accuracy", 75, "Solid fundamentals, could explore edge cases more."),
            category("Problem Solving", 80, "Good approach, consider discussing trade-offs."),
        ],
        strengths: vec!["Good job with time complexity analysis".to_string()],
        improvements: vec![
            "Practice explaining your thought process more clearly".to_string(),
            "Consider edge cases before jumping into the solution".to_string(),
        ],
        recommended_practice: vec![PracticeRecommendation {
            title: "System Design Mock".to_string(),
            kind: "interview".to_string(),
        }],
    }
}
