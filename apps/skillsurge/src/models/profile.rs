use serde::{Deserialize, Serialize};

/// A skill extracted from a resume. `connections` holds ids of related skills
/// and is treated as an undirected adjacency list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    #[serde(default)]
    pub id: String,
    pub name: String,
    /// 0–100
    #[serde(default, deserialize_with = "super::de_percent")]
    pub level: u8,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub connections: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_of_experience: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
}

fn default_category() -> String {
    "Other".to_string()
}

/// The backend sends `skills` either as bare names or as full skill objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfileSkill {
    Named(String),
    Detailed(Skill),
}

impl ProfileSkill {
    pub fn name(&self) -> &str {
        match self {
            ProfileSkill::Named(name) => name,
            ProfileSkill::Detailed(skill) => &skill.name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub company: String,
    pub role: String,
    pub duration: String,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub year: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub role: String,
    pub impact: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Certification {
    pub id: String,
    pub name: String,
    pub issuer: String,
    pub year: String,
}

/// Output of resume analysis, passed through the app state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub skills: Vec<ProfileSkill>,
    pub skill_graph: Vec<Skill>,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub projects: Vec<Project>,
    pub achievements: Vec<Achievement>,
    pub certifications: Vec<Certification>,
    pub summary: String,
    pub strongest_skills: Vec<String>,
    pub skill_gaps: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_years_experience: Option<f64>,
}

impl Profile {
    /// Skills with level/category/connections: `skillGraph` when the server
    /// filled it, otherwise the detailed entries of `skills`.
    pub fn graph_skills(&self) -> Vec<Skill> {
        if !self.skill_graph.is_empty() {
            return self.skill_graph.clone();
        }
        self.skills
            .iter()
            .filter_map(|s| match s {
                ProfileSkill::Detailed(skill) => Some(skill.clone()),
                ProfileSkill::Named(_) => None,
            })
            .collect()
    }

    pub fn skill_names(&self) -> Vec<String> {
        self.skills.iter().map(|s| s.name().to_string()).collect()
    }
}

#[derive(Debug, Serialize)]
pub struct AnalyzeRequest<'a> {
    pub resume_text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<&'a str>,
}

/// Returned by both upload and analyze.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileResponse {
    #[serde(default)]
    pub success: bool,
    pub profile: Profile,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SkillGraphSummary {
    pub total_skills: usize,
    pub avg_level: u32,
    pub strong_skills: usize,
    pub weak_skills: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGraphResponse {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub summary: SkillGraphSummary,
}
