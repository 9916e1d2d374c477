use super::scores::{ScoreState, Subscale};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeedbackDetail {
    pub summary: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

/// Examiner feedback, one detail per subscale plus a general summary.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AssessmentFeedback {
    pub content: FeedbackDetail,
    pub communicative: FeedbackDetail,
    pub organisation: FeedbackDetail,
    pub language: FeedbackDetail,
    pub general: String,
}

impl AssessmentFeedback {
    pub fn detail(&self, subscale: Subscale) -> &FeedbackDetail {
        match subscale {
            Subscale::Content => &self.content,
            Subscale::Communicative => &self.communicative,
            Subscale::Organisation => &self.organisation,
            Subscale::Language => &self.language,
        }
    }
}

/// Scores and feedback produced together by one assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub scores: ScoreState,
    pub feedback: AssessmentFeedback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovedResponse {
    pub rewritten_text: String,
    pub key_changes: Vec<String>,
}
