use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::percentage;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Video,
    Reading,
    Problem,
    Project,
    Quiz,
    Course,
    Interview,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[serde(alias = "Easy")]
    Easy,
    #[serde(alias = "Medium")]
    Medium,
    #[serde(alias = "Hard")]
    Hard,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(rename = "type", default)]
    pub task_type: TaskType,
    #[serde(default)]
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_bonus: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Week {
    pub id: String,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub focus: String,
    #[serde(default, alias = "completed")]
    pub is_completed: bool,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Week {
    pub fn progress(&self) -> Progress {
        Progress::count(self.tasks.iter())
    }

    pub fn task_mut(&mut self, task_id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == task_id)
    }
}

/// Week → Task learning plan. Fields the client does not model are kept in
/// `extra` so a fetched roadmap can be written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roadmap {
    #[serde(default)]
    pub weeks: Vec<Week>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Roadmap {
    pub fn progress(&self) -> Progress {
        Progress::count(self.weeks.iter().flat_map(|w| w.tasks.iter()))
    }

    pub fn week(&self, week_id: &str) -> Option<&Week> {
        self.weeks.iter().find(|w| w.id == week_id)
    }

    pub fn week_mut(&mut self, week_id: &str) -> Option<&mut Week> {
        self.weeks.iter_mut().find(|w| w.id == week_id)
    }

    /// Week containing `task_id`, searching every week.
    pub fn week_of_task(&self, task_id: &str) -> Option<&Week> {
        self.weeks
            .iter()
            .find(|w| w.tasks.iter().any(|t| t.id == task_id))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

/// Subject → Week → Task plan produced by comprehensive generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub total_weeks: u32,
    pub completed_weeks: u32,
    pub total_tasks: u32,
    pub completed_tasks: u32,
    pub priority: Priority,
    pub weeks: Vec<Week>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComprehensiveRoadmap {
    #[serde(default)]
    pub subjects: Vec<Subject>,
    /// Week plan sized to the timeline, when the server sends one alongside
    /// or instead of the subjects.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weeks: Vec<Week>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_role: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ComprehensiveRoadmap {
    /// Week → Task view of the plan: the server's weeks when present,
    /// otherwise every subject's weeks in subject order.
    pub fn into_roadmap(self) -> Roadmap {
        let weeks = if self.weeks.is_empty() {
            self.subjects.into_iter().flat_map(|s| s.weeks).collect()
        } else {
            self.weeks
        };
        Roadmap {
            weeks,
            target_role: self.target_role,
            user_id: None,
            extra: self.extra,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    pub percentage: u8,
}

impl Progress {
    pub fn new(completed: usize, total: usize) -> Self {
        Self {
            completed,
            total,
            percentage: percentage(completed, total),
        }
    }

    pub fn count<'a>(tasks: impl Iterator<Item = &'a Task>) -> Self {
        let (completed, total) = tasks.fold((0, 0), |(done, all), task| {
            (done + usize::from(task.completed), all + 1)
        });
        Self::new(completed, total)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WeekProgress {
    pub week_id: Option<String>,
    pub week_number: Option<u32>,
    pub title: Option<String>,
    pub completed: usize,
    pub total: usize,
    pub percentage: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadmapProgress {
    pub completed: usize,
    pub total: usize,
    pub percentage: u8,
    pub weeks: Vec<WeekProgress>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRoadmapRequest<'a> {
    pub user_id: &'a str,
    pub target_role: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComprehensiveRoadmapRequest<'a> {
    pub user_id: &'a str,
    pub target_role: &'a str,
    pub weeks: u32,
    pub hours_per_day: f32,
}

/// The generate endpoints answer either `{success, roadmap}` or the bare plan.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Wrapped { roadmap: T },
    Bare(T),
}

impl<T> Envelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { roadmap } | Envelope::Bare(roadmap) => roadmap,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdateRequest<'a> {
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_id: Option<&'a str>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BonusTopics {
    pub message: Option<String>,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaskUpdateResponse {
    pub success: bool,
    pub task: Option<Task>,
    pub week_progress: Option<Progress>,
    pub overall_progress: Option<Progress>,
    pub is_fast_learner: bool,
    pub bonus_topics_added: bool,
    pub bonus_topics: Option<BonusTopics>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, completed: bool) -> Task {
        Task {
            id: id.to_string(),
            title: id.to_string(),
            completed,
            ..Default::default()
        }
    }

    #[test]
    fn test_unknown_task_type_is_other() {
        let task: Task =
            serde_json::from_str(r#"{"id": "t1", "title": "Pair session", "type": "workshop"}"#)
                .unwrap();
        assert_eq!(task.task_type, TaskType::Other);
        assert!(!task.completed);
    }

    #[test]
    fn test_difficulty_accepts_capitalized() {
        let d: Difficulty = serde_json::from_str(r#""Medium""#).unwrap();
        assert_eq!(d, Difficulty::Medium);
    }

    #[test]
    fn test_week_completed_alias() {
        let week: Week =
            serde_json::from_str(r#"{"id": "w1", "completed": true, "tasks": []}"#).unwrap();
        assert!(week.is_completed);
    }

    #[test]
    fn test_roadmap_keeps_unknown_fields() {
        let json = serde_json::json!({
            "weeks": [],
            "targetRole": "AI/ML Engineer",
            "taskCompletionTimes": {"weekStartTimes": {}, "completedTasks": {}}
        });
        let roadmap: Roadmap = serde_json::from_value(json.clone()).unwrap();
        assert!(roadmap.extra.contains_key("taskCompletionTimes"));
        assert_eq!(serde_json::to_value(&roadmap).unwrap(), json);
    }

    #[test]
    fn test_progress_counts_all_weeks() {
        let roadmap = Roadmap {
            weeks: vec![
                Week {
                    id: "w1".to_string(),
                    tasks: vec![task("t1", true), task("t2", false)],
                    ..Default::default()
                },
                Week {
                    id: "w2".to_string(),
                    tasks: vec![task("t3", true)],
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        assert_eq!(roadmap.progress(), Progress::new(2, 3));
        assert_eq!(roadmap.progress().percentage, 67);
        assert_eq!(roadmap.week_of_task("t3").map(|w| w.id.as_str()), Some("w2"));
    }

    #[test]
    fn test_comprehensive_plan_prefers_server_weeks() {
        let plan: ComprehensiveRoadmap = serde_json::from_value(serde_json::json!({
            "overview": {"totalWeeks": 4, "hoursPerDay": 6.0},
            "weeks": [{"id": "w1", "number": 1, "tasks": [{"id": "w1t1", "title": "Two Sum"}]}],
            "targetRole": "ML Engineer",
        }))
        .unwrap();
        let roadmap = plan.into_roadmap();
        assert_eq!(roadmap.weeks.len(), 1);
        assert_eq!(roadmap.target_role.as_deref(), Some("ML Engineer"));
        assert_eq!(roadmap.extra["overview"]["totalWeeks"], 4);
    }

    #[test]
    fn test_comprehensive_plan_flattens_subject_weeks() {
        let subject = |id: &str, week: &str| Subject {
            id: id.to_string(),
            weeks: vec![Week {
                id: week.to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let plan = ComprehensiveRoadmap {
            subjects: vec![subject("dsa", "dsa-w1"), subject("sd", "sd-w1")],
            ..Default::default()
        };
        let ids: Vec<String> = plan.into_roadmap().weeks.into_iter().map(|w| w.id).collect();
        assert_eq!(ids, vec!["dsa-w1", "sd-w1"]);
    }

    #[test]
    fn test_envelope_unwraps_both_shapes() {
        let wrapped: Envelope<Roadmap> = serde_json::from_str(
            r#"{"success": true, "roadmap": {"weeks": [{"id": "w1", "tasks": []}]}}"#,
        )
        .unwrap();
        assert_eq!(wrapped.into_inner().weeks.len(), 1);

        let bare: Envelope<Roadmap> =
            serde_json::from_str(r#"{"weeks": [{"id": "w1", "tasks": []}]}"#).unwrap();
        assert_eq!(bare.into_inner().weeks.len(), 1);
    }
}
