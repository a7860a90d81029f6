//! Dashboard view model: summary, daily problem, streak and weekly chart,
//! with the demo and fallback data used when the backend is unavailable.

use serde::Serialize;
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::demo;
use crate::errors::ClientError;
use crate::models::{
    CompleteProblemResponse, DailyProblem, DailyTaskResponse, DashboardStats, DashboardSummary,
    JobReadiness, ProgressPoint,
};

const CHART_WEEKS: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Live,
    Demo,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub source: Source,
    pub target_role: Option<String>,
    pub stats: DashboardStats,
    pub daily_problem: DailyProblem,
    pub completed_today: bool,
    pub streak: u32,
    pub job_readiness: Option<JobReadiness>,
    pub progress: Vec<ProgressPoint>,
}

impl DashboardView {
    pub fn live(summary: DashboardSummary, daily: DailyTaskResponse) -> Self {
        let streak = if summary.stats.streak > 0 {
            summary.stats.streak
        } else {
            daily.streak
        };
        Self {
            source: Source::Live,
            target_role: summary.target_role,
            streak,
            stats: summary.stats,
            daily_problem: daily.daily_task,
            completed_today: daily.completed_today,
            job_readiness: summary.job_readiness,
            progress: chart_or_empty(summary.progress_data),
        }
    }

    pub fn demo(user_id: &str) -> Self {
        let summary = demo::dashboard(user_id);
        Self {
            source: Source::Demo,
            target_role: summary.target_role,
            streak: summary.stats.streak,
            stats: summary.stats,
            daily_problem: demo::daily_problem(),
            completed_today: false,
            job_readiness: summary.job_readiness,
            progress: summary.progress_data,
        }
    }

    pub fn fallback() -> Self {
        let stats = demo::default_stats();
        Self {
            source: Source::Fallback,
            target_role: None,
            streak: stats.streak,
            stats,
            daily_problem: demo::fallback_daily_problem(),
            completed_today: false,
            job_readiness: None,
            progress: empty_chart(),
        }
    }

    /// Folds a fresh summary in after a problem is completed.
    pub fn refresh_summary(&mut self, summary: DashboardSummary) {
        if summary.stats.streak > 0 {
            self.streak = summary.stats.streak;
        }
        self.stats = summary.stats;
        self.job_readiness = summary.job_readiness;
        if summary.target_role.is_some() {
            self.target_role = summary.target_role;
        }
        if !summary.progress_data.is_empty() {
            self.progress = summary.progress_data;
        }
    }
}

fn empty_chart() -> Vec<ProgressPoint> {
    (1..=CHART_WEEKS)
        .map(|n| ProgressPoint {
            week: format!("W{n}"),
            ..Default::default()
        })
        .collect()
}

fn chart_or_empty(points: Vec<ProgressPoint>) -> Vec<ProgressPoint> {
    if points.is_empty() {
        empty_chart()
    } else {
        points
    }
}

/// Loads the dashboard. With `demo` set nothing is fetched. Otherwise the
/// summary and daily problem are requested together; if either fails and
/// `fallback` is set, the fallback view is returned instead of the error.
pub async fn load(
    api: &ApiClient,
    user_id: &str,
    demo: bool,
    fallback: bool,
) -> Result<DashboardView, ClientError> {
    if demo {
        return Ok(DashboardView::demo(user_id));
    }

    let fetched = tokio::try_join!(api.dashboard(user_id), api.daily_task(user_id));
    match fetched {
        Ok((summary, daily)) => Ok(DashboardView::live(summary, daily)),
        Err(e) if fallback && !e.requires_login() => {
            warn!("dashboard fetch failed, showing fallback data: {e}");
            Ok(DashboardView::fallback())
        }
        Err(e) => Err(e),
    }
}

/// Marks the view's daily problem solved, then re-reads the summary.
pub async fn complete_daily(
    api: &ApiClient,
    user_id: &str,
    view: &mut DashboardView,
) -> Result<CompleteProblemResponse, ClientError> {
    let problem = &view.daily_problem;
    let result = api
        .complete_problem(user_id, &problem.id, &problem.title)
        .await?;
    info!(problem = %problem.title, streak = result.streak, "daily problem completed");

    if result.streak > 0 {
        view.streak = result.streak;
    }
    view.completed_today = true;

    match api.dashboard(user_id).await {
        Ok(summary) => view.refresh_summary(summary),
        Err(e) => warn!("could not refresh dashboard after completion: {e}"),
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn daily(streak: u32) -> DailyTaskResponse {
        DailyTaskResponse {
            user_id: "u1".to_string(),
            daily_task: DailyProblem {
                id: "d1".to_string(),
                title: "Merge Intervals".to_string(),
                ..Default::default()
            },
            completed_today: false,
            streak,
        }
    }

    #[test]
    fn test_live_prefers_summary_streak() {
        let mut summary = DashboardSummary::default();
        summary.stats.streak = 5;
        let view = DashboardView::live(summary.clone(), daily(2));
        assert_eq!(view.streak, 5);

        summary.stats.streak = 0;
        let view = DashboardView::live(summary, daily(2));
        assert_eq!(view.streak, 2);
        assert_eq!(view.daily_problem.title, "Merge Intervals");
    }

    #[test]
    fn test_live_fills_empty_chart() {
        let view = DashboardView::live(DashboardSummary::default(), daily(0));
        let weeks: Vec<&str> = view.progress.iter().map(|p| p.week.as_str()).collect();
        assert_eq!(weeks, vec!["W1", "W2", "W3", "W4", "W5", "W6"]);
        assert!(view.progress.iter().all(|p| p.skills == 0));
    }

    #[test]
    fn test_fallback_uses_two_sum() {
        let view = DashboardView::fallback();
        assert_eq!(view.source, Source::Fallback);
        assert_eq!(view.daily_problem.title, "Two Sum");
        assert_eq!(view.stats.skill_match, 68);
        assert_eq!(view.streak, view.stats.streak);
        assert_eq!(view.streak, 0);
    }

    #[test]
    fn test_demo_view() {
        let view = DashboardView::demo("demo-user");
        assert_eq!(view.source, Source::Demo);
        assert_eq!(view.daily_problem.title, "LRU Cache");
        assert_eq!(view.streak, 2);
        assert_eq!(view.target_role.as_deref(), Some(demo::DEMO_TARGET_ROLE));
    }

    #[test]
    fn test_refresh_summary_keeps_streak_when_missing() {
        let mut view = DashboardView::demo("demo-user");
        let mut summary = DashboardSummary::default();
        summary.stats.problems_solved = 4;
        view.refresh_summary(summary);
        assert_eq!(view.streak, 2);
        assert_eq!(view.stats.problems_solved, 4);
        assert_eq!(view.progress.len(), 6);
        assert_eq!(view.target_role.as_deref(), Some(demo::DEMO_TARGET_ROLE));
    }
}
