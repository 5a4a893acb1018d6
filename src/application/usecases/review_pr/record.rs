//! 히스토리 기록 생성 단계.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, SecondsFormat, Utc};

use crate::domain::review::{ParsedReview, PullRequestRef, ReviewRecord, ReviewStatus};

/// 밀리초 타임스탬프 기반 id. 같은 밀리초에 여러 건이 생겨도 항상 증가한다.
#[derive(Debug, Default)]
pub struct RecordIdSequence {
    last: AtomicI64,
}

impl RecordIdSequence {
    pub fn next(&self, now: DateTime<Utc>) -> i64 {
        let candidate = now.timestamp_millis();
        let mut prev = self.last.load(Ordering::Acquire);
        loop {
            let next = candidate.max(prev + 1);
            match self
                .last
                .compare_exchange_weak(prev, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return next,
                Err(actual) => prev = actual,
            }
        }
    }
}

pub(super) fn new_record(
    id: i64,
    pull: &PullRequestRef,
    review: ParsedReview,
    now: DateTime<Utc>,
) -> ReviewRecord {
    ReviewRecord {
        id,
        owner: pull.owner.clone(),
        repo: pull.repo.clone(),
        pr_number: pull.number,
        review,
        timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        status: ReviewStatus::Pending,
    }
}
