//! 리뷰 도메인 엔티티/값 객체.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::policy::render_diff_text;

/// CLI 단발 리뷰 실행 옵션.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub url: String,
    pub model: Option<String>,
    pub json: bool,
}

/// 인증 협력자가 넘겨주는 호출자 식별자. 히스토리 조회 키로만 사용한다.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity(String);

impl Identity {
    /// 공백뿐인 값은 식별자로 인정하지 않는다.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRef {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

/// provider가 돌려준 변경 파일 한 건.
/// UI 표시용으로 알 수 없는 필드(status, additions 등)도 그대로 보존한다.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FileChange {
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FileChange {
    pub fn new(filename: impl Into<String>, patch: Option<&str>) -> Self {
        Self {
            filename: filename.into(),
            patch: patch.map(ToString::to_string),
            extra: Map::new(),
        }
    }
}

/// 요청 단위로 만들어지고 파싱 후 버려지는 diff 묶음.
#[derive(Debug, Clone)]
pub struct DiffBundle {
    pub files: Vec<FileChange>,
    pub diff_text: String,
}

impl DiffBundle {
    pub fn from_files(files: Vec<FileChange>) -> Self {
        let diff_text = render_diff_text(&files);
        Self { files, diff_text }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedReview {
    pub summary: String,
    pub potential_bugs: Vec<String>,
    pub suggestions: Vec<String>,
    pub test_cases: Vec<String>,
}

impl ParsedReview {
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty()
            && self.potential_bugs.is_empty()
            && self.suggestions.is_empty()
            && self.test_cases.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Pending,
}

/// 히스토리에 저장되는 리뷰 기록. 생성 후 변경하지 않는다.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    pub id: i64,
    pub owner: String,
    pub repo: String,
    pub pr_number: u64,
    pub review: ParsedReview,
    pub timestamp: String,
    pub status: ReviewStatus,
}

/// 사용자 피드백 결정.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackAction {
    Accept,
    Reject,
    Comment,
}

impl FeedbackAction {
    /// accept/reject 외의 값(또는 미지정)은 일반 코멘트로 취급한다.
    pub fn from_action(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("accept") => Self::Accept,
            Some("reject") => Self::Reject,
            _ => Self::Comment,
        }
    }
}

/// 인라인 코멘트 위치(커밋/파일/새 버전 라인).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineAnchor {
    pub commit_id: String,
    pub path: String,
    pub line: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatEntry {
    pub user_message: String,
    pub model_response: String,
    pub context: Value,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_rejects_blank_values() {
        assert!(Identity::new("   ").is_none());
        assert_eq!(
            Identity::new(" demo@example.com ").unwrap().as_str(),
            "demo@example.com"
        );
    }

    #[test]
    fn feedback_action_defaults_to_plain_comment() {
        assert_eq!(FeedbackAction::from_action(Some("accept")), FeedbackAction::Accept);
        assert_eq!(FeedbackAction::from_action(Some("reject")), FeedbackAction::Reject);
        assert_eq!(FeedbackAction::from_action(Some("later")), FeedbackAction::Comment);
        assert_eq!(FeedbackAction::from_action(None), FeedbackAction::Comment);
    }

    #[test]
    fn file_change_keeps_unknown_provider_fields() {
        let raw = serde_json::json!({
            "filename": "src/lib.rs",
            "status": "modified",
            "additions": 3
        });
        let file: FileChange = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(file.patch, None);
        assert_eq!(serde_json::to_value(&file).unwrap(), raw);
    }

    #[test]
    fn review_record_serializes_with_camel_case_fields() {
        let record = ReviewRecord {
            id: 1,
            owner: "acme".into(),
            repo: "api".into(),
            pr_number: 7,
            review: ParsedReview::default(),
            timestamp: "2024-01-01T00:00:00.000Z".into(),
            status: ReviewStatus::Pending,
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["prNumber"], 7);
        assert_eq!(value["status"], "pending");
        assert!(value["review"]["potentialBugs"].is_array());
    }
}
