use crate::errors::ClientError;
use crate::models::{
    ComprehensiveRoadmap, ComprehensiveRoadmapRequest, Envelope, GenerateRoadmapRequest, Roadmap,
    RoadmapProgress, TaskUpdateRequest, TaskUpdateResponse,
};

use super::ApiClient;

impl ApiClient {
    pub async fn generate_roadmap(&self, user_id: &str, target_role: &str) -> Result<Roadmap, ClientError> {
        let envelope: Envelope<Roadmap> = self
            .post_json(
                &["roadmap", "generate"],
                &GenerateRoadmapRequest {
                    user_id,
                    target_role,
                },
            )
            .await?;
        Ok(envelope.into_inner())
    }

    /// Subject-organised roadmap sized to the chosen timeline.
    pub async fn generate_comprehensive_roadmap(
        &self,
        user_id: &str,
        target_role: &str,
        weeks: u32,
        hours_per_day: f32,
    ) -> Result<ComprehensiveRoadmap, ClientError> {
        let envelope: Envelope<ComprehensiveRoadmap> = self
            .post_json(
                &["roadmap", "generate-comprehensive"],
                &ComprehensiveRoadmapRequest {
                    user_id,
                    target_role,
                    weeks,
                    hours_per_day,
                },
            )
            .await?;
        Ok(envelope.into_inner())
    }

    pub async fn roadmap(&self, user_id: &str) -> Result<Roadmap, ClientError> {
        let envelope: Envelope<Roadmap> = self.get_json(&["roadmap", user_id]).await?;
        Ok(envelope.into_inner())
    }

    /// Replaces the stored roadmap, unknown server fields included.
    pub async fn update_roadmap(&self, user_id: &str, roadmap: &Roadmap) -> Result<Roadmap, ClientError> {
        let envelope: Envelope<Roadmap> = self.put_json(&["roadmap", user_id], roadmap).await?;
        Ok(envelope.into_inner())
    }

    pub async fn update_task(
        &self,
        user_id: &str,
        task_id: &str,
        completed: bool,
        week_id: Option<&str>,
    ) -> Result<TaskUpdateResponse, ClientError> {
        self.put_json(
            &["roadmap", user_id, "task", task_id],
            &TaskUpdateRequest { completed, week_id },
        )
        .await
    }

    pub async fn roadmap_progress(&self, user_id: &str) -> Result<RoadmapProgress, ClientError> {
        self.get_json(&["roadmap", user_id, "progress"]).await
    }
}
