use reqwest::multipart::{Form, Part};

use crate::errors::ClientError;
use crate::models::{AnalyzeRequest, Profile, ProfileResponse, SkillGraphResponse};
use crate::resume::ResumeFile;

use super::{decode, ApiClient};

impl ApiClient {
    /// POST /profile/upload as multipart field `file`.
    pub async fn upload_resume(&self, resume: &ResumeFile) -> Result<ProfileResponse, ClientError> {
        let url = self.endpoint(&["profile", "upload"]);
        // Form bodies are consumed on send, so each attempt builds its own.
        let response = self
            .execute(reqwest::Method::POST, url, |r| {
                let part = Part::bytes(resume.bytes.clone()).file_name(resume.file_name.clone());
                r.multipart(Form::new().part("file", part))
            })
            .await?;
        decode(response).await
    }

    pub async fn analyze_resume(
        &self,
        resume_text: &str,
        user_id: Option<&str>,
    ) -> Result<ProfileResponse, ClientError> {
        self.post_json(
            &["profile", "analyze"],
            &AnalyzeRequest {
                resume_text,
                user_id,
            },
        )
        .await
    }

    pub async fn profile(&self, user_id: &str) -> Result<Profile, ClientError> {
        self.get_json(&["profile", user_id]).await
    }

    pub async fn skill_graph(&self, user_id: &str) -> Result<SkillGraphResponse, ClientError> {
        self.get_json(&["profile", user_id, "skills"]).await
    }
}
