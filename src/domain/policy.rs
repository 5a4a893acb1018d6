//! 도메인 정책(diff 텍스트 구성, 프롬프트 템플릿, 피드백 표기 규칙).

use serde_json::Value;

use crate::domain::review::{FeedbackAction, FileChange};

pub const NO_PATCH_PLACEHOLDER: &str = "No patch available";
pub const ACCEPTED_MARKER: &str = "✅ **Accepted**";
pub const REJECTED_MARKER: &str = "❌ **Rejected**";

/// provider가 돌려준 순서대로 파일 헤더 + patch를 이어 붙인다.
pub fn render_diff_text(files: &[FileChange]) -> String {
    let mut out = String::new();
    for file in files {
        out.push_str(&format!("File: {}\n", file.filename));
        out.push_str(file.patch.as_deref().unwrap_or(NO_PATCH_PLACEHOLDER));
        out.push_str("\n\n");
    }
    out
}

/// 4개 섹션 형식을 강제하는 리뷰 프롬프트. diff는 자르거나 escape하지 않는다.
pub fn build_review_prompt(diff_text: &str) -> String {
    let mut out = String::new();
    out.push_str("You are an AI Pull Request Reviewer.\n");
    out.push_str(
        "Analyze the following GitHub Pull Request diff and provide a detailed review.\n\n",
    );
    out.push_str(
        "Please structure your response EXACTLY as follows (do not include any JSON formatting, just plain text sections):\n\n",
    );
    out.push_str("SUMMARY:\n");
    out.push_str("[Provide a brief summary of the changes in 2-3 sentences]\n\n");
    out.push_str("POTENTIAL BUGS:\n");
    out.push_str("- [List each potential bug or logical issue on a new line with a dash]\n");
    out.push_str("- [Another potential issue]\n\n");
    out.push_str("SUGGESTIONS:\n");
    out.push_str(
        "- [List each suggestion for improvements (performance, style, security) on a new line with a dash]\n",
    );
    out.push_str("- [Another suggestion]\n\n");
    out.push_str("TEST CASES:\n");
    out.push_str("- [List missing test cases or edge cases on a new line with a dash]\n");
    out.push_str("- [Another test case]\n\n");
    out.push_str("Diff:\n");
    out.push_str(diff_text);
    out
}

/// 리뷰 컨텍스트와 이전 대화를 JSON으로 직렬화해 담은 채팅 프롬프트.
pub fn build_chat_prompt(message: &str, context: &Value, history: Option<&Value>) -> String {
    let review = context
        .get("review")
        .map(pretty_json)
        .unwrap_or_else(|| "None".to_string());
    let history = history
        .filter(|h| !h.is_null())
        .map(pretty_json)
        .unwrap_or_else(|| "None".to_string());

    let mut out = String::new();
    out.push_str("You are an AI assistant for code review.\n\n");
    out.push_str(&format!("User message: {message}\n\n"));
    out.push_str("PR Context:\n");
    out.push_str(&format!("Owner: {}\n", context_field(context, "owner")));
    out.push_str(&format!("Repo: {}\n", context_field(context, "repo")));
    out.push_str(&format!("PR Number: {}\n", context_field(context, "prNumber")));
    out.push_str(&format!("Review content: {review}\n\n"));
    out.push_str("Previous conversation history:\n");
    out.push_str(&history);
    out.push_str("\n\nRespond concisely and helpfully.\n");
    out
}

/// 사용자 결정에 따라 코멘트 본문 앞에 표기를 붙인다.
pub fn annotate_feedback(action: FeedbackAction, comment: &str) -> String {
    match action {
        FeedbackAction::Accept => format!("{ACCEPTED_MARKER}: {comment}"),
        FeedbackAction::Reject => format!("{REJECTED_MARKER}: {comment}"),
        FeedbackAction::Comment => comment.to_string(),
    }
}

fn context_field(context: &Value, key: &str) -> String {
    match context.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "unknown".to_string(),
        Some(other) => other.to_string(),
    }
}

fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
