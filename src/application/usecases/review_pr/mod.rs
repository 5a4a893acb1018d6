//! PR 리뷰 파이프라인 유스케이스.
//! diff 조회 → 프롬프트 구성 → 모델 실행 → 응답 파싱 → 히스토리 기록 순으로 진행한다.

mod record;

use std::time::Instant;

use chrono::Utc;

use crate::application::ports::{HistoryStore, ModelRunner, VcsGateway};
use crate::domain::error::ReviewError;
use crate::domain::parser::parse_review;
use crate::domain::policy::build_review_prompt;
use crate::domain::review::{FileChange, Identity, ParsedReview, PullRequestRef};

pub use record::RecordIdSequence;
use record::new_record;

/// 리뷰 결과와 UI 표시용 원본 파일 목록.
#[derive(Debug, Clone)]
pub struct ReviewOutcome {
    pub review: ParsedReview,
    pub files: Vec<FileChange>,
}

pub struct ReviewPrUseCase<'a> {
    pub vcs: &'a dyn VcsGateway,
    pub model_runner: &'a dyn ModelRunner,
    pub history: &'a dyn HistoryStore,
    pub record_ids: &'a RecordIdSequence,
    pub model: &'a str,
}

impl<'a> ReviewPrUseCase<'a> {
    /// 단계는 엄격히 순차 실행되며, 조회/모델 오류는 그대로 전파한다.
    pub async fn execute(
        &self,
        identity: &Identity,
        pull: &PullRequestRef,
    ) -> Result<ReviewOutcome, ReviewError> {
        tracing::info!(
            owner = %pull.owner,
            repo = %pull.repo,
            pr_number = pull.number,
            "fetching PR diff"
        );
        let bundle = self.vcs.fetch_diff(pull).await?;
        tracing::debug!(
            files = bundle.files.len(),
            bytes = bundle.diff_text.len(),
            "diff fetched"
        );

        let prompt = build_review_prompt(&bundle.diff_text);

        let started = Instant::now();
        let raw = self.model_runner.run(&prompt, self.model).await?;
        tracing::info!(
            model = self.model,
            bytes = raw.len(),
            elapsed = %format!("{:.1}s", started.elapsed().as_secs_f32()),
            "model finished"
        );

        let review = parse_review(&raw);

        let now = Utc::now();
        let record = new_record(self.record_ids.next(now), pull, review.clone(), now);
        self.history.append(identity, record).await;

        Ok(ReviewOutcome {
            review,
            files: bundle.files,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::usecases::fakes::{FakeModel, FakeVcs, sample_pull};
    use crate::infrastructure::store::InMemoryHistoryStore;

    fn identity() -> Identity {
        Identity::new("demo@example.com").unwrap()
    }

    #[tokio::test]
    async fn review_flows_from_diff_to_history() {
        let vcs = FakeVcs {
            files: vec![
                FileChange::new("a.js", Some("+x")),
                FileChange::new("b.js", None),
            ],
            ..FakeVcs::default()
        };
        let model = FakeModel::answering("SUMMARY: tidy\nPOTENTIAL BUGS:\n- off by one\n");
        let history = InMemoryHistoryStore::new(50);
        let ids = RecordIdSequence::default();

        let use_case = ReviewPrUseCase {
            vcs: &vcs,
            model_runner: &model,
            history: &history,
            record_ids: &ids,
            model: "llama3",
        };
        let outcome = use_case.execute(&identity(), &sample_pull()).await.unwrap();

        assert_eq!(outcome.review.summary, "tidy");
        assert_eq!(outcome.review.potential_bugs, vec!["off by one"]);
        assert_eq!(outcome.files.len(), 2);

        let calls = model.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, "llama3");
        assert!(calls[0].0.ends_with("File: a.js\n+x\n\nFile: b.js\nNo patch available\n\n"));
        drop(calls);

        let saved = history.list(&identity()).await;
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].owner, "acme");
        assert_eq!(saved[0].pr_number, 7);
        assert_eq!(saved[0].review, outcome.review);
    }

    #[tokio::test]
    async fn fetch_failure_skips_model_and_history() {
        let vcs = FakeVcs {
            fail_fetch: true,
            ..FakeVcs::default()
        };
        let model = FakeModel::answering("SUMMARY: never");
        let history = InMemoryHistoryStore::new(50);
        let ids = RecordIdSequence::default();

        let use_case = ReviewPrUseCase {
            vcs: &vcs,
            model_runner: &model,
            history: &history,
            record_ids: &ids,
            model: "llama3",
        };
        let err = use_case
            .execute(&identity(), &sample_pull())
            .await
            .unwrap_err();

        assert!(matches!(err, ReviewError::Fetch));
        assert!(model.calls.lock().unwrap().is_empty());
        assert!(history.list(&identity()).await.is_empty());
    }

    #[tokio::test]
    async fn model_failure_propagates_without_recording() {
        let vcs = FakeVcs {
            files: vec![FileChange::new("a.js", Some("+x"))],
            ..FakeVcs::default()
        };
        let model = FakeModel::failing();
        let history = InMemoryHistoryStore::new(50);
        let ids = RecordIdSequence::default();

        let use_case = ReviewPrUseCase {
            vcs: &vcs,
            model_runner: &model,
            history: &history,
            record_ids: &ids,
            model: "llama3",
        };
        let err = use_case
            .execute(&identity(), &sample_pull())
            .await
            .unwrap_err();

        assert!(matches!(err, ReviewError::ModelInvocation(_)));
        assert_eq!(model.calls.lock().unwrap().len(), 1);
        assert!(history.list(&identity()).await.is_empty());
    }
}
