//! Built-in demo data, shown when the backend is unreachable and demo
//! fallback is enabled.

use serde::de::DeserializeOwned;
use tracing::error;

use crate::models::{
    DailyProblem, DashboardStats, DashboardSummary, JobReadiness, Profile, ProgressPoint, Roadmap,
    Role, Subject,
};

const PROFILE_JSON: &str = include_str!("../data/demo/profile.json");
const ROLES_JSON: &str = include_str!("../data/demo/roles.json");
const SUBJECTS_JSON: &str = include_str!("../data/demo/subjects.json");
const ROADMAP_JSON: &str = include_str!("../data/demo/roadmap.json");
const DAILY_PROBLEM_JSON: &str = include_str!("../data/demo/daily_problem.json");

pub const DEMO_TARGET_ROLE: &str = "AI/ML Engineer";

fn parse<T: DeserializeOwned + Default>(name: &str, raw: &str) -> T {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        error!("embedded demo {name} is invalid: {e}");
        T::default()
    })
}

pub fn profile() -> Profile {
    parse("profile", PROFILE_JSON)
}

pub fn roles() -> Vec<Role> {
    parse("roles", ROLES_JSON)
}

/// Subject-organised plan for the comprehensive roadmap screens.
pub fn subjects() -> Vec<Subject> {
    parse("subjects", SUBJECTS_JSON)
}

/// Ten-week plan used when roadmap generation fails.
pub fn roadmap() -> Roadmap {
    parse("roadmap", ROADMAP_JSON)
}

pub fn daily_problem() -> DailyProblem {
    parse("daily problem", DAILY_PROBLEM_JSON)
}

/// Shown when the daily problem cannot be fetched.
pub fn fallback_daily_problem() -> DailyProblem {
    DailyProblem {
        id: "daily-1".to_string(),
        title: "Two Sum".to_string(),
        kind: "problem".to_string(),
        difficulty: "Easy".to_string(),
        link: "https://leetcode.com/problems/two-sum/".to_string(),
        description: "Given an array of integers nums and an integer target, return indices of the two numbers such that they add up to target.".to_string(),
        reason: "This is the most commonly asked problem at FAANG companies.".to_string(),
        companies: vec!["Google".to_string(), "Amazon".to_string(), "Meta".to_string()],
        topics: vec!["Array".to_string(), "Hash Table".to_string()],
        frequency: Some(95),
        estimated_time: Some("30 min".to_string()),
        ..Default::default()
    }
}

/// Stats shown when the dashboard has no data at all. Nothing is known
/// about the user's streak, so it starts at zero.
pub fn default_stats() -> DashboardStats {
    DashboardStats {
        streak: 0,
        problems_solved: 0,
        skill_match: 68,
        days_until_ready: 28,
        ..Default::default()
    }
}

/// A beginner two days into the plan.
pub fn dashboard(user_id: &str) -> DashboardSummary {
    let mut progress_data = vec![ProgressPoint {
        week: "W1".to_string(),
        skills: 72,
        problems: 0,
    }];
    progress_data.extend((2..=6).map(|n| ProgressPoint {
        week: format!("W{n}"),
        ..Default::default()
    }));

    DashboardSummary {
        user_id: user_id.to_string(),
        stats: DashboardStats {
            streak: 2,
            problems_solved: 3,
            skill_match: 72,
            days_until_ready: 84,
            ..Default::default()
        },
        job_readiness: Some(JobReadiness {
            readiness_score: 72,
            weeks_until_ready: Some(12),
            top_gaps: vec![
                "System Design".to_string(),
                "Distributed Systems".to_string(),
                "Advanced ML".to_string(),
            ],
            recommendation: Some("Focus on DSA fundamentals this week".to_string()),
            ..Default::default()
        }),
        target_role: Some(DEMO_TARGET_ROLE.to_string()),
        progress_data,
        ..Default::default()
    }
}
