use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::roadmap::Task;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardStats {
    pub streak: u32,
    pub problems_solved: u32,
    #[serde(deserialize_with = "super::de_percent")]
    pub skill_match: u8,
    pub days_until_ready: u32,
    pub weeks_until_ready: Option<u32>,
    pub completed_tasks: usize,
    pub total_tasks: usize,
    pub progress_percentage: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobReadiness {
    #[serde(deserialize_with = "super::de_percent")]
    pub readiness_score: u8,
    pub weeks_until_ready: Option<u32>,
    pub days_until_ready: Option<u32>,
    pub estimated_date: Option<String>,
    pub top_gaps: Vec<String>,
    pub recommendation: Option<String>,
    pub factors: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AchievementBadge {
    pub title: String,
    pub description: String,
    pub icon: String,
}

/// One point of the weekly chart. Older servers send `score` instead of `skills`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressPoint {
    pub week: String,
    #[serde(alias = "score")]
    pub skills: u32,
    pub problems: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardSummary {
    pub user_id: String,
    pub stats: DashboardStats,
    pub job_readiness: Option<JobReadiness>,
    pub target_role: Option<String>,
    pub upcoming_tasks: Vec<Task>,
    pub recent_achievements: Vec<AchievementBadge>,
    pub progress_data: Vec<ProgressPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProblemExample {
    pub input: String,
    pub output: String,
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelatedProblem {
    pub title: String,
    pub link: String,
    pub difficulty: String,
}

/// Today's recommended practice problem.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DailyProblem {
    pub id: String,
    pub title: String,
    pub slug: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub difficulty: String,
    pub companies: Vec<String>,
    pub frequency: Option<u8>,
    pub estimated_time: Option<String>,
    pub link: String,
    pub description: String,
    pub examples: Vec<ProblemExample>,
    pub constraints: Vec<String>,
    pub topics: Vec<String>,
    pub reason: String,
    pub hints: Vec<String>,
    pub related_problems: Vec<RelatedProblem>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTaskResponse {
    #[serde(default)]
    pub user_id: String,
    pub daily_task: DailyProblem,
    #[serde(default)]
    pub completed_today: bool,
    #[serde(default)]
    pub streak: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeeklyProgress {
    pub week: Option<u32>,
    pub title: Option<String>,
    pub completed: usize,
    pub total: usize,
    pub percentage: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrajectoryPoint {
    pub week: u32,
    #[serde(rename = "match")]
    pub match_score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProgressSeries {
    pub user_id: String,
    pub weekly_progress: Vec<WeeklyProgress>,
    pub streak: u32,
    pub problems_solved: u32,
    pub skill_trajectory: Vec<TrajectoryPoint>,
    pub predicted_ready_date: Option<String>,
    pub weeks_until_ready: Option<u32>,
    pub readiness_factors: Value,
}

#[derive(Debug, Serialize)]
pub struct CompleteProblemRequest<'a> {
    pub problem_id: &'a str,
    pub problem_title: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompleteProblemResponse {
    pub success: bool,
    pub completed_problems: Vec<String>,
    pub total_completed: usize,
    pub streak: u32,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobReadinessResponse {
    pub user_id: String,
    pub target_role: Option<String>,
    #[serde(flatten)]
    pub readiness: JobReadiness,
}
