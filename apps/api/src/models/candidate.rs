use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{apply, double_option};

/// Candidate status that marks a completed placement.
pub const STATUS_HIRED: &str = "Hired";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
    pub id: i32,
    pub name: String,
    pub role: Option<String>,
    pub location: Option<String>,
    pub candidate_cost: Option<f64>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub feedback: Option<String>,
    pub cv_link: Option<String>,
    pub status: Option<String>,
    pub client_id: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCandidate {
    pub name: String,
    pub role: Option<String>,
    pub location: Option<String>,
    pub candidate_cost: Option<f64>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub feedback: Option<String>,
    pub cv_link: Option<String>,
    pub status: Option<String>,
    pub client_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidatePatch {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub role: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub candidate_cost: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub feedback: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub cv_link: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub status: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub client_id: Option<Option<i32>>,
}

impl CandidateRow {
    pub fn merged(mut self, patch: CandidatePatch) -> Self {
        apply(&mut self.name, patch.name);
        apply(&mut self.role, patch.role);
        apply(&mut self.location, patch.location);
        apply(&mut self.candidate_cost, patch.candidate_cost);
        apply(&mut self.phone, patch.phone);
        apply(&mut self.email, patch.email);
        apply(&mut self.feedback, patch.feedback);
        apply(&mut self.cv_link, patch.cv_link);
        apply(&mut self.status, patch.status);
        apply(&mut self.client_id, patch.client_id);
        self
    }
}
