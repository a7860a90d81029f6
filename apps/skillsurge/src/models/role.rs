use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Role {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(deserialize_with = "super::de_percent")]
    pub match_percentage: u8,
    pub required_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    pub subjects: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MatchRolesRequest<'a> {
    pub profile_id: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeveledSkill {
    pub name: String,
    pub level: u8,
}

/// Body of `/roles/recommendations`: plain skill names or name + level pairs.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RecommendationsRequest {
    Plain { skills: Vec<String> },
    Leveled { skills: Vec<LeveledSkill> },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RolesResponse {
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub selected_role: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectRoleRequest<'a> {
    pub role_id: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectRoleResponse {
    #[serde(default)]
    pub success: bool,
    pub selected_role: String,
}
