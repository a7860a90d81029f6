use crate::errors::ClientError;
use crate::models::{
    LeveledSkill, MatchRolesRequest, RecommendationsRequest, RolesResponse, SelectRoleRequest,
    SelectRoleResponse,
};

use super::ApiClient;

impl ApiClient {
    /// Roles scored against a stored profile.
    pub async fn match_roles(&self, profile_id: &str) -> Result<RolesResponse, ClientError> {
        self.post_json(&["roles", "match"], &MatchRolesRequest { profile_id })
            .await
    }

    pub async fn recommendations(&self, skills: Vec<String>) -> Result<RolesResponse, ClientError> {
        self.post_json(
            &["roles", "recommendations"],
            &RecommendationsRequest::Plain { skills },
        )
        .await
    }

    /// Same endpoint as [`Self::recommendations`], sending self-rated levels.
    pub async fn recommendations_with_levels(
        &self,
        skills: Vec<LeveledSkill>,
    ) -> Result<RolesResponse, ClientError> {
        self.post_json(
            &["roles", "recommendations"],
            &RecommendationsRequest::Leveled { skills },
        )
        .await
    }

    pub async fn user_roles(&self, user_id: &str) -> Result<RolesResponse, ClientError> {
        self.get_json(&["roles", user_id]).await
    }

    pub async fn select_role(
        &self,
        user_id: &str,
        role_id: &str,
    ) -> Result<SelectRoleResponse, ClientError> {
        self.post_json(&["roles", user_id, "select"], &SelectRoleRequest { role_id })
            .await
    }
}
