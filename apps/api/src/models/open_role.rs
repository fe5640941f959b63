use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{apply, double_option};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OpenRoleRow {
    pub id: i32,
    pub client_id: Option<i32>,
    pub role_desc: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub posted_on: Option<NaiveDate>,
    pub remote: Option<String>,
    pub job_desc_link: Option<String>,
    /// Generated take-home coding test (HTML).
    pub test_doc: Option<String>,
    /// Full job description text.
    pub jd_doc: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewOpenRole {
    pub client_id: Option<i32>,
    pub role_desc: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub posted_on: Option<NaiveDate>,
    pub remote: Option<String>,
    pub job_desc_link: Option<String>,
    pub test_doc: Option<String>,
    pub jd_doc: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenRolePatch {
    #[serde(default, deserialize_with = "double_option")]
    pub client_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub role_desc: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub status: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub posted_on: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub remote: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub job_desc_link: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub test_doc: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub jd_doc: Option<Option<String>>,
}

impl OpenRoleRow {
    pub fn merged(mut self, patch: OpenRolePatch) -> Self {
        apply(&mut self.client_id, patch.client_id);
        apply(&mut self.role_desc, patch.role_desc);
        apply(&mut self.location, patch.location);
        apply(&mut self.status, patch.status);
        apply(&mut self.posted_on, patch.posted_on);
        apply(&mut self.remote, patch.remote);
        apply(&mut self.job_desc_link, patch.job_desc_link);
        apply(&mut self.test_doc, patch.test_doc);
        apply(&mut self.jd_doc, patch.jd_doc);
        self
    }
}

/// A candidate's CV submitted against an open role (`submit_cv_role`).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CvSubmissionRow {
    pub id: i32,
    pub client_id: Option<i32>,
    pub open_roles_id: Option<i32>,
    pub candidates_id: Option<i32>,
    pub status: Option<String>,
    pub submitted_on: Option<NaiveDate>,
    pub remote: Option<String>,
    pub cv_link: Option<String>,
    pub test_answers: Option<String>,
    pub test_score: Option<String>,
    pub match_score: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCvSubmission {
    pub client_id: Option<i32>,
    pub open_roles_id: Option<i32>,
    pub candidates_id: Option<i32>,
    pub status: Option<String>,
    pub submitted_on: Option<NaiveDate>,
    pub remote: Option<String>,
    pub cv_link: Option<String>,
    pub test_answers: Option<String>,
    pub test_score: Option<String>,
    pub match_score: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CvSubmissionPatch {
    #[serde(default, deserialize_with = "double_option")]
    pub client_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub open_roles_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub candidates_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub status: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub submitted_on: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub remote: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub cv_link: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub test_answers: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub test_score: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub match_score: Option<Option<String>>,
}

impl CvSubmissionRow {
    pub fn merged(mut self, patch: CvSubmissionPatch) -> Self {
        apply(&mut self.client_id, patch.client_id);
        apply(&mut self.open_roles_id, patch.open_roles_id);
        apply(&mut self.candidates_id, patch.candidates_id);
        apply(&mut self.status, patch.status);
        apply(&mut self.submitted_on, patch.submitted_on);
        apply(&mut self.remote, patch.remote);
        apply(&mut self.cv_link, patch.cv_link);
        apply(&mut self.test_answers, patch.test_answers);
        apply(&mut self.test_score, patch.test_score);
        apply(&mut self.match_score, patch.match_score);
        self
    }
}
