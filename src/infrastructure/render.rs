//! 콘솔 출력용 Markdown 렌더링 모듈.

use crate::domain::review::ParsedReview;

/// 구조화된 리뷰를 사람이 읽기 쉬운 Markdown으로 만든다.
pub fn render_review_markdown(target_url: &str, model: &str, review: &ParsedReview) -> String {
    let mut out = String::new();
    out.push_str("# PR Review\n\n");
    out.push_str(&format!("- Target: {target_url}\n"));
    out.push_str(&format!("- Model: `{model}`\n\n"));

    out.push_str("## Summary\n\n");
    if review.summary.trim().is_empty() {
        out.push_str("_No summary._\n\n");
    } else {
        out.push_str(review.summary.trim());
        out.push_str("\n\n");
    }

    push_section(&mut out, "Potential Bugs", &review.potential_bugs);
    push_section(&mut out, "Suggestions", &review.suggestions);
    push_section(&mut out, "Test Cases", &review.test_cases);

    out
}

fn push_section(out: &mut String, title: &str, items: &[String]) {
    out.push_str(&format!("## {title}\n\n"));
    if items.is_empty() {
        out.push_str("- None\n\n");
        return;
    }
    for item in items {
        out.push_str(&format!("- {item}\n"));
    }
    out.push('\n');
}
