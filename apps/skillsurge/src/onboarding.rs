//! Onboarding wizard: resume → skill ratings → target role → timeline → plan.
//!
//! The cursor only moves forward when the current step has what it needs.
//! Moving back is always allowed.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::models::{LeveledSkill, Profile, Roadmap, Role, Skill};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Steps
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    Upload = 1,
    RateSkills = 2,
    SelectRole = 3,
    SetTimeline = 4,
    Generate = 5,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::Upload,
        Step::RateSkills,
        Step::SelectRole,
        Step::SetTimeline,
        Step::Generate,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(n: u8) -> Option<Step> {
        Step::ALL.get(usize::from(n).checked_sub(1)?).copied()
    }

    pub fn next(self) -> Option<Step> {
        Step::from_number(self.number() + 1)
    }

    pub fn prev(self) -> Option<Step> {
        Step::from_number(self.number() - 1)
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::Upload => "Upload Resume",
            Step::RateSkills => "Your Skills",
            Step::SelectRole => "Select Role",
            Step::SetTimeline => "Timeline",
            Step::Generate => "Generate Plan",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {} ({})", self.number(), self.title())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum WizardError {
    #[error("{0} is incomplete")]
    StepIncomplete(Step),

    #[error("rating must be between 1 and 5 stars, got {0}")]
    InvalidRating(u8),

    #[error("unknown skill '{0}'")]
    UnknownSkill(String),

    #[error("{0} weeks is not an available timeline (choose 4, 8, 12 or 16)")]
    InvalidWeeks(u32),
}

// ────────────────────────────────────────────────────────────────────────────
// Timeline
// ────────────────────────────────────────────────────────────────────────────

pub const WEEK_OPTIONS: [u32; 4] = [4, 8, 12, 16];
pub const DEFAULT_WEEKS: u32 = 12;
pub const DEFAULT_HOURS_PER_DAY: f32 = 3.0;
pub const MIN_HOURS_PER_DAY: f32 = 1.0;
pub const MAX_HOURS_PER_DAY: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timeline {
    pub weeks: u32,
    pub hours_per_day: f32,
}

impl Default for Timeline {
    fn default() -> Self {
        Self {
            weeks: DEFAULT_WEEKS,
            hours_per_day: DEFAULT_HOURS_PER_DAY,
        }
    }
}

impl Timeline {
    pub fn is_valid(&self) -> bool {
        self.weeks > 0 && (MIN_HOURS_PER_DAY..=MAX_HOURS_PER_DAY).contains(&self.hours_per_day)
    }

    pub fn total_hours(&self) -> f32 {
        self.weeks as f32 * 7.0 * self.hours_per_day
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeConstraint {
    pub id: &'static str,
    pub label: &'static str,
    pub weeks: u32,
    pub hours_per_day: f32,
    pub intensity: &'static str,
}

pub const TIME_CONSTRAINTS: [TimeConstraint; 4] = [
    TimeConstraint {
        id: "intensive",
        label: "8 weeks",
        weeks: 8,
        hours_per_day: 3.0,
        intensity: "Intensive",
    },
    TimeConstraint {
        id: "moderate",
        label: "12 weeks",
        weeks: 12,
        hours_per_day: 2.0,
        intensity: "Moderate",
    },
    TimeConstraint {
        id: "balanced",
        label: "16 weeks",
        weeks: 16,
        hours_per_day: 1.5,
        intensity: "Balanced",
    },
    TimeConstraint {
        id: "relaxed",
        label: "24 weeks",
        weeks: 24,
        hours_per_day: 1.0,
        intensity: "Relaxed",
    },
];

pub fn time_constraint(id: &str) -> Option<&'static TimeConstraint> {
    TIME_CONSTRAINTS.iter().find(|c| c.id.eq_ignore_ascii_case(id))
}

// ────────────────────────────────────────────────────────────────────────────
// Star ratings
// ────────────────────────────────────────────────────────────────────────────

/// 0–100 level shown as 1–5 stars; an unrated (0-star) level shows as 3.
pub fn stars_for_level(level: u8) -> u8 {
    match (f64::from(level) / 20.0).round() as u8 {
        0 => 3,
        stars => stars.min(5),
    }
}

pub fn level_for_stars(stars: u8) -> Result<u8, WizardError> {
    if !(1..=5).contains(&stars) {
        return Err(WizardError::InvalidRating(stars));
    }
    Ok(stars * 20)
}

// ────────────────────────────────────────────────────────────────────────────
// Roadmap generation seam
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub user_id: String,
    pub target_role: String,
    pub timeline: Timeline,
}

#[async_trait]
pub trait RoadmapGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<Roadmap, ClientError>;
}

/// Sends the timeline to comprehensive generation. Servers without that
/// route (404/405) get the plain generate call instead; any other failure is
/// final.
#[async_trait]
impl RoadmapGenerator for ApiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<Roadmap, ClientError> {
        let sized = self
            .generate_comprehensive_roadmap(
                &request.user_id,
                &request.target_role,
                request.timeline.weeks,
                request.timeline.hours_per_day,
            )
            .await;

        match sized {
            Ok(plan) => Ok(plan.into_roadmap()),
            Err(ClientError::NotFound(_) | ClientError::Api { status: 405, .. }) => {
                warn!("comprehensive generation unavailable, generating without the timeline");
                self.generate_roadmap(&request.user_id, &request.target_role)
                    .await
            }
            Err(e) => Err(e),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Wizard
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct OnboardingWizard {
    step: Step,
    app: AppState,
    skills: Vec<Skill>,
    timeline: Timeline,
}

impl OnboardingWizard {
    pub fn new(app: AppState) -> Self {
        Self {
            step: Step::Upload,
            app,
            skills: Vec::new(),
            timeline: Timeline::default(),
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn app(&self) -> &AppState {
        &self.app
    }

    pub fn into_app(self) -> AppState {
        self.app
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn timeline(&self) -> Timeline {
        self.timeline
    }

    pub fn can_proceed(&self, step: Step) -> bool {
        match step {
            Step::Upload | Step::RateSkills => !self.skills.is_empty(),
            Step::SelectRole => self.app.selected_role.is_some(),
            Step::SetTimeline => self.timeline.is_valid(),
            Step::Generate => false,
        }
    }

    pub fn advance(&mut self) -> Result<Step, WizardError> {
        match self.step.next() {
            Some(next) if self.can_proceed(self.step) => {
                self.step = next;
                Ok(next)
            }
            _ => Err(WizardError::StepIncomplete(self.step)),
        }
    }

    pub fn back(&mut self) -> Step {
        if let Some(prev) = self.step.prev() {
            self.step = prev;
        }
        self.step
    }

    /// Backward jumps always succeed; forward jumps need every step in
    /// between to be complete.
    pub fn go_to(&mut self, target: Step) -> Result<Step, WizardError> {
        if target > self.step {
            if let Some(blocked) = Step::ALL
                .iter()
                .copied()
                .filter(|s| *s >= self.step && *s < target)
                .find(|s| !self.can_proceed(*s))
            {
                return Err(WizardError::StepIncomplete(blocked));
            }
        }
        self.step = target;
        Ok(target)
    }

    /// Takes the analysed profile's skills for rating and moves to step 2.
    pub fn ingest_profile(&mut self, profile: Profile) {
        let mut skills = profile.graph_skills();
        if skills.is_empty() {
            skills = profile
                .skill_names()
                .into_iter()
                .enumerate()
                .map(|(i, name)| Skill {
                    id: format!("s{}", i + 1),
                    name,
                    level: 0,
                    category: "Other".to_string(),
                    connections: Vec::new(),
                    years_of_experience: None,
                    evidence: None,
                })
                .collect();
        }

        info!(skills = skills.len(), "profile ingested");
        self.skills = skills;
        self.app.set_profile(Some(profile));
        self.step = Step::RateSkills;
    }

    pub fn stars(&self, skill_id: &str) -> Option<u8> {
        self.skills
            .iter()
            .find(|s| s.id == skill_id)
            .map(|s| stars_for_level(s.level))
    }

    pub fn rate(&mut self, skill_id: &str, stars: u8) -> Result<(), WizardError> {
        let level = level_for_stars(stars)?;
        let skill = self
            .skills
            .iter_mut()
            .find(|s| s.id == skill_id)
            .ok_or_else(|| WizardError::UnknownSkill(skill_id.to_string()))?;
        skill.level = level;
        Ok(())
    }

    /// Skills with their current levels, for level-aware role recommendations.
    pub fn rated_skills(&self) -> Vec<LeveledSkill> {
        self.skills
            .iter()
            .map(|s| LeveledSkill {
                name: s.name.clone(),
                level: s.level,
            })
            .collect()
    }

    pub fn select_role(&mut self, role: Role) {
        info!(role = %role.title, "target role selected");
        self.app.set_selected_role(Some(role));
    }

    pub fn set_weeks(&mut self, weeks: u32) -> Result<(), WizardError> {
        if !WEEK_OPTIONS.contains(&weeks) {
            return Err(WizardError::InvalidWeeks(weeks));
        }
        self.timeline.weeks = weeks;
        Ok(())
    }

    pub fn set_hours_per_day(&mut self, hours: f32) -> f32 {
        self.timeline.hours_per_day = hours.clamp(MIN_HOURS_PER_DAY, MAX_HOURS_PER_DAY);
        self.timeline.hours_per_day
    }

    pub fn increase_hours(&mut self) -> f32 {
        self.set_hours_per_day(self.timeline.hours_per_day + 1.0)
    }

    pub fn decrease_hours(&mut self) -> f32 {
        self.set_hours_per_day(self.timeline.hours_per_day - 1.0)
    }

    pub fn apply_time_constraint(&mut self, constraint: &TimeConstraint) {
        self.timeline = Timeline {
            weeks: constraint.weeks,
            hours_per_day: constraint.hours_per_day,
        };
    }

    /// Moves to the final step and requests one roadmap sized to the chosen
    /// timeline. A failed request is logged and onboarding still completes,
    /// with no roadmap.
    pub async fn generate(
        &mut self,
        generator: &dyn RoadmapGenerator,
    ) -> Result<Option<Roadmap>, WizardError> {
        self.go_to(Step::Generate)?;

        let target_role = self
            .app
            .target_role()
            .ok_or(WizardError::StepIncomplete(Step::SelectRole))?
            .to_string();
        let request = GenerationRequest {
            user_id: self.app.user_id().to_string(),
            target_role,
            timeline: self.timeline,
        };

        match generator.generate(&request).await {
            Ok(roadmap) => {
                info!(weeks = roadmap.weeks.len(), "roadmap generated");
                Ok(Some(roadmap))
            }
            Err(e) => {
                warn!("roadmap generation failed, continuing without a plan: {e}");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::models::ProfileSkill;

    fn profile() -> Profile {
        Profile {
            id: "p1".to_string(),
            user_id: "user-1".to_string(),
            skill_graph: vec![
                Skill {
                    id: "s1".to_string(),
                    name: "Python".to_string(),
                    level: 90,
                    category: "Languages".to_string(),
                    connections: vec![],
                    years_of_experience: None,
                    evidence: None,
                },
                Skill {
                    id: "s2".to_string(),
                    name: "SQL".to_string(),
                    level: 0,
                    category: "Languages".to_string(),
                    connections: vec![],
                    years_of_experience: None,
                    evidence: None,
                },
            ],
            ..Default::default()
        }
    }

    fn role() -> Role {
        Role {
            id: "r1".to_string(),
            title: "AI/ML Engineer".to_string(),
            ..Default::default()
        }
    }

    fn wizard() -> OnboardingWizard {
        OnboardingWizard::new(AppState::new(Some("user-1".to_string())))
    }

    struct CountingGenerator {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl RoadmapGenerator for CountingGenerator {
        async fn generate(&self, request: &GenerationRequest) -> Result<Roadmap, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ClientError::Api {
                    status: 500,
                    message: "Failed to generate roadmap".to_string(),
                });
            }
            Ok(Roadmap {
                target_role: Some(request.target_role.clone()),
                ..Default::default()
            })
        }
    }

    #[test]
    fn test_step_numbers_round_trip() {
        for step in Step::ALL {
            assert_eq!(Step::from_number(step.number()), Some(step));
        }
        assert_eq!(Step::from_number(0), None);
        assert_eq!(Step::from_number(6), None);
    }

    #[test]
    fn test_cannot_advance_without_skills() {
        let mut w = wizard();
        assert_eq!(w.advance(), Err(WizardError::StepIncomplete(Step::Upload)));
        assert_eq!(w.step(), Step::Upload);
    }

    #[test]
    fn test_back_saturates_at_first_step() {
        let mut w = wizard();
        assert_eq!(w.back(), Step::Upload);
        w.ingest_profile(profile());
        assert_eq!(w.step(), Step::RateSkills);
        assert_eq!(w.back(), Step::Upload);
        assert_eq!(w.back(), Step::Upload);
    }

    #[test]
    fn test_role_gates_timeline() {
        let mut w = wizard();
        w.ingest_profile(profile());
        assert_eq!(w.advance(), Ok(Step::SelectRole));
        assert_eq!(w.advance(), Err(WizardError::StepIncomplete(Step::SelectRole)));

        w.select_role(role());
        assert_eq!(w.advance(), Ok(Step::SetTimeline));
        assert_eq!(w.advance(), Ok(Step::Generate));
        assert_eq!(w.advance(), Err(WizardError::StepIncomplete(Step::Generate)));
        assert_eq!(w.step(), Step::Generate);
    }

    #[test]
    fn test_go_to_forward_requires_intermediate_steps() {
        let mut w = wizard();
        w.ingest_profile(profile());
        assert_eq!(
            w.go_to(Step::SetTimeline),
            Err(WizardError::StepIncomplete(Step::SelectRole))
        );
        assert_eq!(w.go_to(Step::Upload), Ok(Step::Upload));
        w.select_role(role());
        assert_eq!(w.go_to(Step::SetTimeline), Ok(Step::SetTimeline));
    }

    #[test]
    fn test_names_only_profile_gets_default_skills() {
        let mut w = wizard();
        w.ingest_profile(Profile {
            skills: vec![
                ProfileSkill::Named("Rust".to_string()),
                ProfileSkill::Named("Go".to_string()),
            ],
            ..Default::default()
        });
        assert_eq!(w.skills().len(), 2);
        assert_eq!(w.skills()[1].id, "s2");
        assert_eq!(w.stars("s1"), Some(3));
    }

    #[test]
    fn test_star_mapping() {
        assert_eq!(stars_for_level(90), 5);
        assert_eq!(stars_for_level(70), 4);
        assert_eq!(stars_for_level(50), 3);
        assert_eq!(stars_for_level(29), 1);
        assert_eq!(stars_for_level(9), 3);
        assert_eq!(stars_for_level(0), 3);
        assert_eq!(level_for_stars(4), Ok(80));
        assert_eq!(level_for_stars(0), Err(WizardError::InvalidRating(0)));
        assert_eq!(level_for_stars(6), Err(WizardError::InvalidRating(6)));
    }

    #[test]
    fn test_rate_stores_level() {
        let mut w = wizard();
        w.ingest_profile(profile());
        w.rate("s2", 2).unwrap();
        assert_eq!(w.stars("s2"), Some(2));
        assert_eq!(w.rated_skills()[1].level, 40);
        assert_eq!(
            w.rate("missing", 3),
            Err(WizardError::UnknownSkill("missing".to_string()))
        );
    }

    #[test]
    fn test_timeline_bounds() {
        let mut w = wizard();
        assert_eq!(w.timeline(), Timeline::default());
        assert_eq!(w.set_weeks(5), Err(WizardError::InvalidWeeks(5)));
        w.set_weeks(8).unwrap();

        for _ in 0..10 {
            w.increase_hours();
        }
        assert_eq!(w.timeline().hours_per_day, MAX_HOURS_PER_DAY);
        for _ in 0..10 {
            w.decrease_hours();
        }
        assert_eq!(w.timeline().hours_per_day, MIN_HOURS_PER_DAY);

        let relaxed = time_constraint("relaxed").unwrap();
        w.apply_time_constraint(relaxed);
        assert_eq!(w.timeline().weeks, 24);
        assert!(w.timeline().is_valid());
    }

    #[tokio::test]
    async fn test_generate_calls_once_and_completes() {
        let mut w = wizard();
        w.ingest_profile(profile());
        w.select_role(role());
        let generator = CountingGenerator {
            calls: AtomicUsize::new(0),
            fail: false,
        };

        let roadmap = w.generate(&generator).await.unwrap();
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
        assert_eq!(w.step(), Step::Generate);
        assert_eq!(
            roadmap.and_then(|r| r.target_role).as_deref(),
            Some("AI/ML Engineer")
        );
    }

    #[tokio::test]
    async fn test_generate_failure_still_completes() {
        let mut w = wizard();
        w.ingest_profile(profile());
        w.select_role(role());
        let generator = CountingGenerator {
            calls: AtomicUsize::new(0),
            fail: true,
        };

        assert_eq!(w.generate(&generator).await, Ok(None));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
        assert_eq!(w.step(), Step::Generate);
    }

    #[tokio::test]
    async fn test_generate_refused_without_role() {
        let mut w = wizard();
        w.ingest_profile(profile());
        let generator = CountingGenerator {
            calls: AtomicUsize::new(0),
            fail: false,
        };

        assert_eq!(
            w.generate(&generator).await,
            Err(WizardError::StepIncomplete(Step::SelectRole))
        );
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }
}
