//! Roadmap progress tracking.
//!
//! `RoadmapTracker` applies task toggles optimistically and reconciles with
//! the server's answer. `SubjectTracker` is the local-only checklist used on
//! the subject screens.

use std::collections::HashSet;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::models::{Progress, Roadmap, Subject, Task, TaskUpdateResponse, Week};

pub const DEFAULT_BONUS_MESSAGE: &str = "🎉 You're crushing it! Bonus challenges added!";

/// Persists a task's completion flag.
#[async_trait]
pub trait TaskSync: Send + Sync {
    async fn update_task(
        &self,
        user_id: &str,
        task_id: &str,
        completed: bool,
        week_id: &str,
    ) -> Result<TaskUpdateResponse, ClientError>;
}

#[async_trait]
impl TaskSync for ApiClient {
    async fn update_task(
        &self,
        user_id: &str,
        task_id: &str,
        completed: bool,
        week_id: &str,
    ) -> Result<TaskUpdateResponse, ClientError> {
        ApiClient::update_task(self, user_id, task_id, completed, Some(week_id)).await
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToggleResult {
    pub completed: bool,
    pub progress: Progress,
    pub bonus_added: usize,
    pub bonus_message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RoadmapTracker {
    user_id: String,
    roadmap: Roadmap,
    progress: Progress,
    bonus_message: Option<String>,
}

impl RoadmapTracker {
    pub fn new(user_id: impl Into<String>, roadmap: Roadmap) -> Self {
        let progress = roadmap.progress();
        Self {
            user_id: user_id.into(),
            roadmap,
            progress,
            bonus_message: None,
        }
    }

    pub fn roadmap(&self) -> &Roadmap {
        &self.roadmap
    }

    pub fn into_roadmap(self) -> Roadmap {
        self.roadmap
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn bonus_message(&self) -> Option<&str> {
        self.bonus_message.as_deref()
    }

    pub fn week_progress(&self, week_id: &str) -> Option<Progress> {
        self.roadmap.week(week_id).map(Week::progress)
    }

    /// First week that still has an open task.
    pub fn current_week(&self) -> Option<&Week> {
        self.roadmap
            .weeks
            .iter()
            .find(|w| w.tasks.iter().any(|t| !t.completed))
    }

    /// Toggles a task looked up by id alone.
    pub async fn toggle(&mut self, sync: &dyn TaskSync, task_id: &str) -> Result<ToggleResult, ClientError> {
        let week_id = self
            .roadmap
            .week_of_task(task_id)
            .map(|w| w.id.clone())
            .ok_or_else(|| ClientError::NotFound(format!("task '{task_id}'")))?;
        self.toggle_task(sync, &week_id, task_id).await
    }

    /// Flips the task locally, then persists it.
    ///
    /// On success the server's overall progress wins and any bonus tasks are
    /// appended to the week once. On failure the flag is restored and the
    /// error returned.
    pub async fn toggle_task(
        &mut self,
        sync: &dyn TaskSync,
        week_id: &str,
        task_id: &str,
    ) -> Result<ToggleResult, ClientError> {
        let previous = self.set_completed(week_id, task_id, None)?;
        let completed = !previous;
        self.progress = self.roadmap.progress();
        debug!(%week_id, %task_id, completed, "task toggled locally");

        match sync
            .update_task(&self.user_id, task_id, completed, week_id)
            .await
        {
            Ok(resp) => {
                if let Some(progress) = resp.overall_progress {
                    self.progress = progress;
                }
                let bonus_added = self.apply_bonus(week_id, resp);
                Ok(ToggleResult {
                    completed,
                    progress: self.progress,
                    bonus_added,
                    bonus_message: self.bonus_message.clone(),
                })
            }
            Err(e) => {
                warn!(%task_id, "task update failed, reverting: {e}");
                self.set_completed(week_id, task_id, Some(previous))?;
                self.progress = self.roadmap.progress();
                Err(e)
            }
        }
    }

    /// Sets the flag (or flips it when `value` is `None`), returning the
    /// previous value.
    fn set_completed(&mut self, week_id: &str, task_id: &str, value: Option<bool>) -> Result<bool, ClientError> {
        let task = self
            .roadmap
            .week_mut(week_id)
            .ok_or_else(|| ClientError::NotFound(format!("week '{week_id}'")))?
            .task_mut(task_id)
            .ok_or_else(|| ClientError::NotFound(format!("task '{task_id}' in week '{week_id}'")))?;
        let previous = task.completed;
        task.completed = value.unwrap_or(!previous);
        Ok(previous)
    }

    fn apply_bonus(&mut self, week_id: &str, resp: TaskUpdateResponse) -> usize {
        if !(resp.is_fast_learner && resp.bonus_topics_added) {
            return 0;
        }
        let bonus = resp.bonus_topics.unwrap_or_default();
        self.bonus_message = Some(
            bonus
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BONUS_MESSAGE.to_string()),
        );

        let Some(week) = self.roadmap.week_mut(week_id) else {
            return 0;
        };
        let mut added = 0;
        for (idx, task) in bonus.tasks.into_iter().enumerate() {
            let id = format!("{week_id}_bonus_{idx}");
            if week.tasks.iter().any(|t| t.id == id) {
                continue;
            }
            week.tasks.push(Task {
                id,
                is_bonus: true,
                completed: false,
                ..task
            });
            added += 1;
        }

        if added > 0 {
            info!(%week_id, added, "bonus tasks added");
        }
        added
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Subjects
// ────────────────────────────────────────────────────────────────────────────

/// Totals across all subjects, from each subject's own counters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubjectsOverview {
    pub subjects: usize,
    pub total_weeks: u32,
    pub total_tasks: u32,
    pub percentage: u8,
}

pub fn subjects_overview(subjects: &[Subject]) -> SubjectsOverview {
    let completed: u32 = subjects.iter().map(|s| s.completed_tasks).sum();
    let total_tasks: u32 = subjects.iter().map(|s| s.total_tasks).sum();
    SubjectsOverview {
        subjects: subjects.len(),
        total_weeks: subjects.iter().map(|s| s.total_weeks).sum(),
        total_tasks,
        percentage: crate::models::percentage(completed as usize, total_tasks as usize),
    }
}

pub fn subject_progress(subject: &Subject) -> Progress {
    Progress::new(subject.completed_tasks as usize, subject.total_tasks as usize)
}

/// Local checklist over one subject's tasks. Nothing is sent to the server.
#[derive(Debug, Clone)]
pub struct SubjectTracker {
    subject: Subject,
    completed: HashSet<String>,
}

impl SubjectTracker {
    pub fn new(subject: Subject) -> Self {
        let completed = subject
            .weeks
            .iter()
            .flat_map(|w| w.tasks.iter())
            .filter(|t| t.completed)
            .map(|t| t.id.clone())
            .collect();
        Self { subject, completed }
    }

    /// Demo starting point: the first two tasks of week one are done.
    pub fn with_demo_start(subject: Subject) -> Self {
        let mut tracker = Self::new(subject);
        let first_two: Vec<String> = tracker
            .subject
            .weeks
            .first()
            .map(|w| w.tasks.iter().take(2).map(|t| t.id.clone()).collect())
            .unwrap_or_default();
        tracker.completed.extend(first_two);
        tracker
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    pub fn is_completed(&self, task_id: &str) -> bool {
        self.completed.contains(task_id)
    }

    /// Returns the new state of the task.
    pub fn toggle(&mut self, task_id: &str) -> bool {
        if self.completed.remove(task_id) {
            false
        } else {
            self.completed.insert(task_id.to_string());
            true
        }
    }

    pub fn week_progress(&self, week: &Week) -> Progress {
        let done = week.tasks.iter().filter(|t| self.is_completed(&t.id)).count();
        Progress::new(done, week.tasks.len())
    }

    pub fn progress(&self) -> Progress {
        let tasks = self.subject.weeks.iter().flat_map(|w| w.tasks.iter());
        let (done, total) = tasks.fold((0, 0), |(done, total), t| {
            (done + usize::from(self.is_completed(&t.id)), total + 1)
        });
        Progress::new(done, total)
    }
}
