//! 모델 자유 형식 응답을 구조화된 리뷰로 바꾸는 라인 단위 상태 기계.
//!
//! 상태는 "현재 섹션" 하나뿐이고, 각 라인은 `classify`로 이벤트가 된 뒤
//! `transition`으로 다음 상태가 결정된다. 파서는 실패하지 않는다.

use crate::domain::review::ParsedReview;

/// 섹션 마커를 하나도 찾지 못했을 때 summary로 옮길 원문 길이(문자 수).
pub const FALLBACK_SUMMARY_CHARS: usize = 500;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Section {
    /// 첫 섹션 마커 이전
    #[default]
    Outside,
    Summary,
    PotentialBugs,
    Suggestions,
    TestCases,
}

/// 검사 순서가 곧 우선순위다.
const SECTION_MARKERS: [(&str, Section); 4] = [
    ("SUMMARY:", Section::Summary),
    ("POTENTIAL BUGS:", Section::PotentialBugs),
    ("SUGGESTIONS:", Section::Suggestions),
    ("TEST CASES:", Section::TestCases),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEvent<'a> {
    /// 섹션 헤더. SUMMARY는 같은 줄의 콜론 뒤 텍스트를 함께 가진다.
    Header {
        section: Section,
        inline: Option<&'a str>,
    },
    Blank,
    Content(&'a str),
}

/// 라인을 trim한 뒤 대소문자 구분 없이 섹션 마커를 찾는다.
pub fn classify(line: &str) -> LineEvent<'_> {
    let line = line.trim();
    let upper = line.to_uppercase();

    for (marker, section) in SECTION_MARKERS {
        if !upper.contains(marker) {
            continue;
        }
        let inline = match section {
            Section::Summary => line
                .split_once(':')
                .map(|(_, rest)| rest.trim())
                .filter(|rest| !rest.is_empty()),
            _ => None,
        };
        return LineEvent::Header { section, inline };
    }

    if line.is_empty() {
        LineEvent::Blank
    } else {
        LineEvent::Content(line)
    }
}

/// 헤더만 상태를 바꾼다.
pub fn transition(current: Section, event: &LineEvent<'_>) -> Section {
    match event {
        LineEvent::Header { section, .. } => *section,
        LineEvent::Blank | LineEvent::Content(_) => current,
    }
}

#[derive(Debug, Default)]
pub struct ReviewParser {
    state: Section,
    review: ParsedReview,
}

impl ReviewParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Section {
        self.state
    }

    /// 한 라인을 소비한다.
    pub fn feed(&mut self, line: &str) {
        let event = classify(line);
        self.state = transition(self.state, &event);

        match event {
            LineEvent::Header { inline, .. } => {
                if let Some(text) = inline {
                    self.review.summary = text.to_string();
                }
            }
            LineEvent::Blank => {}
            LineEvent::Content(text) => self.accept_content(text),
        }
    }

    fn accept_content(&mut self, text: &str) {
        let list = match self.state {
            Section::Outside => return,
            Section::Summary => {
                if self.review.summary.is_empty() {
                    self.review.summary = text.to_string();
                } else {
                    self.review.summary.push(' ');
                    self.review.summary.push_str(text);
                }
                return;
            }
            Section::PotentialBugs => &mut self.review.potential_bugs,
            Section::Suggestions => &mut self.review.suggestions,
            Section::TestCases => &mut self.review.test_cases,
        };

        // 목록 섹션에서는 대시로 시작하는 라인만 항목이 된다.
        if let Some(item) = text.strip_prefix('-') {
            list.push(item.trim().to_string());
        }
    }

    /// 모든 필드가 비었으면 원문 앞부분을 summary로 채운다.
    pub fn finish(self, raw: &str) -> ParsedReview {
        let mut review = self.review;
        if review.is_empty() {
            review.summary = raw.chars().take(FALLBACK_SUMMARY_CHARS).collect();
        }
        review
    }
}

pub fn parse_review(raw: &str) -> ParsedReview {
    let mut parser = ReviewParser::new();
    for line in raw.lines() {
        parser.feed(line);
    }
    parser.finish(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_four_sections() {
        let raw = "SUMMARY: ok\nPOTENTIAL BUGS:\n- bug one\n- bug two\nSUGGESTIONS:\n- sug one\nTEST CASES:\n- case one";
        let review = parse_review(raw);

        assert_eq!(review.summary, "ok");
        assert_eq!(review.potential_bugs, vec!["bug one", "bug two"]);
        assert_eq!(review.suggestions, vec!["sug one"]);
        assert_eq!(review.test_cases, vec!["case one"]);
    }

    #[test]
    fn drops_non_dash_lines_inside_list_sections() {
        let raw = "POTENTIAL BUGS:\n- real bug\nthis line is chatter\n  -   spaced bug  \nanother note\nSUGGESTIONS:\nnot an item\n- keep me";
        let review = parse_review(raw);

        assert_eq!(review.potential_bugs, vec!["real bug", "spaced bug"]);
        assert_eq!(review.suggestions, vec!["keep me"]);
        assert!(review.summary.is_empty());
    }

    #[test]
    fn falls_back_to_truncated_raw_text_without_markers() {
        let raw = "x".repeat(800);
        let review = parse_review(&raw);

        assert_eq!(review.summary, "x".repeat(FALLBACK_SUMMARY_CHARS));
        assert!(review.potential_bugs.is_empty());
        assert!(review.suggestions.is_empty());
        assert!(review.test_cases.is_empty());
    }

    #[test]
    fn fallback_keeps_short_text_verbatim() {
        let raw = "  The model rambled.\nNo sections here.\n";
        assert_eq!(parse_review(raw).summary, raw);
    }

    #[test]
    fn fallback_truncates_by_characters_not_bytes() {
        let raw = "가".repeat(600);
        let summary = parse_review(&raw).summary;
        assert_eq!(summary.chars().count(), FALLBACK_SUMMARY_CHARS);
    }

    #[test]
    fn fallback_applies_when_sections_are_present_but_empty() {
        let raw = "SUMMARY:\n\nPOTENTIAL BUGS:\nnothing found\n";
        assert_eq!(parse_review(raw).summary, raw);
    }

    #[test]
    fn empty_output_yields_empty_review() {
        assert_eq!(parse_review(""), ParsedReview::default());
    }

    #[test]
    fn multi_line_summary_is_joined_with_spaces() {
        let raw = "SUMMARY:\nFirst sentence.\n\n   Second sentence.   \nPOTENTIAL BUGS:\n- none";
        assert_eq!(parse_review(raw).summary, "First sentence. Second sentence.");
    }

    #[test]
    fn markers_are_case_insensitive() {
        let raw = "summary: lower\npotential bugs:\n- b\nSuggestions:\n- s\ntest cases:\n- t";
        let review = parse_review(raw);

        assert_eq!(review.summary, "lower");
        assert_eq!(review.potential_bugs, vec!["b"]);
        assert_eq!(review.suggestions, vec!["s"]);
        assert_eq!(review.test_cases, vec!["t"]);
    }

    #[test]
    fn lines_before_first_marker_are_ignored() {
        let raw = "Sure! Here is my review.\n- stray item\nSUMMARY: fine";
        let review = parse_review(raw);

        assert_eq!(review.summary, "fine");
        assert!(review.potential_bugs.is_empty());
    }

    #[test]
    fn inline_summary_text_replaces_earlier_summary() {
        let raw = "SUMMARY: first\nmore\nSUMMARY: second";
        assert_eq!(parse_review(raw).summary, "second");
    }

    #[test]
    fn header_with_decoration_still_switches_section() {
        let raw = "**SUMMARY:** bolded\n### POTENTIAL BUGS:\n- b";
        let review = parse_review(raw);

        assert_eq!(review.summary, "** bolded");
        assert_eq!(review.potential_bugs, vec!["b"]);
    }

    #[test]
    fn classify_recognises_each_event_kind() {
        assert_eq!(
            classify("  SUMMARY: text "),
            LineEvent::Header {
                section: Section::Summary,
                inline: Some("text"),
            }
        );
        assert_eq!(
            classify("Test Cases: ignored"),
            LineEvent::Header {
                section: Section::TestCases,
                inline: None,
            }
        );
        assert_eq!(classify("   "), LineEvent::Blank);
        assert_eq!(classify(" - item "), LineEvent::Content("- item"));
    }

    #[test]
    fn transition_only_moves_on_headers() {
        let header = LineEvent::Header {
            section: Section::Suggestions,
            inline: None,
        };
        assert_eq!(transition(Section::Outside, &header), Section::Suggestions);
        assert_eq!(transition(Section::Summary, &LineEvent::Blank), Section::Summary);
        assert_eq!(
            transition(Section::TestCases, &LineEvent::Content("- x")),
            Section::TestCases
        );
    }

    #[test]
    fn parser_tracks_state_across_feeds() {
        let mut parser = ReviewParser::new();
        assert_eq!(parser.state(), Section::Outside);

        parser.feed("POTENTIAL BUGS:");
        assert_eq!(parser.state(), Section::PotentialBugs);

        parser.feed("");
        assert_eq!(parser.state(), Section::PotentialBugs);

        parser.feed("- leak");
        let review = parser.finish("ignored");
        assert_eq!(review.potential_bugs, vec!["leak"]);
    }
}
