//! 사용자 결정(accept/reject/comment)을 PR 코멘트로 게시하는 유스케이스.

use serde_json::Value;

use crate::application::ports::VcsGateway;
use crate::domain::error::ReviewError;
use crate::domain::policy::annotate_feedback;
use crate::domain::review::{FeedbackAction, LineAnchor, PullRequestRef};

#[derive(Debug, Clone)]
pub struct FeedbackRequest {
    pub pull: PullRequestRef,
    pub comment: String,
    pub action: FeedbackAction,
    pub anchor: Option<LineAnchor>,
}

pub struct SubmitFeedbackUseCase<'a> {
    pub vcs: &'a dyn VcsGateway,
}

impl<'a> SubmitFeedbackUseCase<'a> {
    /// 단일 시도, 재시도 없음. provider 응답은 해석하지 않고 돌려준다.
    pub async fn execute(&self, request: &FeedbackRequest) -> Result<Value, ReviewError> {
        let body = annotate_feedback(request.action, &request.comment);
        tracing::info!(
            owner = %request.pull.owner,
            repo = %request.pull.repo,
            pr_number = request.pull.number,
            inline = request.anchor.is_some(),
            "posting feedback comment"
        );
        self.vcs
            .post_comment(&request.pull, &body, request.anchor.as_ref())
            .await
    }
}
