use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterviewType {
    #[default]
    Behavioral,
    Technical,
    SystemDesign,
}

impl InterviewType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewType::Behavioral => "behavioral",
            InterviewType::Technical => "technical",
            InterviewType::SystemDesign => "system-design",
        }
    }
}

impl fmt::Display for InterviewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterviewType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "behavioral" => Ok(InterviewType::Behavioral),
            "technical" => Ok(InterviewType::Technical),
            "system-design" => Ok(InterviewType::SystemDesign),
            other => Err(format!(
                "unknown interview type '{other}' (expected behavioral, technical or system-design)"
            )),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartInterviewRequest<'a> {
    pub user_id: &'a str,
    pub target_role: &'a str,
    #[serde(rename = "type")]
    pub interview_type: InterviewType,
}

/// Conversation handle returned by `/interview/start`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InterviewSession {
    pub id: String,
    pub conversation_url: Option<String>,
    #[serde(rename = "type")]
    pub interview_type: Option<String>,
    pub status: String,
    pub demo: bool,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StartInterviewResponse {
    #[serde(default)]
    pub success: bool,
    pub interview: InterviewSession,
}

/// `/interview/{id}`: full record when the server still holds it, otherwise
/// just status and duration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InterviewDetails {
    pub id: String,
    pub user_id: Option<String>,
    #[serde(rename = "type")]
    pub interview_type: Option<String>,
    pub target_role: Option<String>,
    pub conversation_url: Option<String>,
    pub status: String,
    pub duration: u64,
    pub demo: bool,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackCategory {
    pub name: String,
    pub score: u8,
    pub feedback: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PracticeRecommendation {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InterviewFeedback {
    pub interview_id: String,
    #[serde(rename = "type")]
    pub interview_type: Option<String>,
    pub overall_score: u8,
    pub categories: Vec<FeedbackCategory>,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub recommended_practice: Vec<PracticeRecommendation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EndInterviewResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub result: serde_json::Value,
}
