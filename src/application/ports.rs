//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::application::config::Config;
use crate::domain::error::ReviewError;
use crate::domain::review::{
    ChatEntry, DiffBundle, Identity, LineAnchor, PullRequestRef, ReviewRecord,
};

/// 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<Config>;
    fn inspect_pretty_json(&self) -> Result<String>;
}

/// VCS(GitHub) 연동 추상화 포트.
#[async_trait]
pub trait VcsGateway: Send + Sync {
    /// PR 변경 파일 목록과 diff 텍스트 조회
    async fn fetch_diff(&self, pull: &PullRequestRef) -> Result<DiffBundle, ReviewError>;
    /// PR 코멘트 게시. `anchor`가 있으면 인라인 리뷰 코멘트로 게시한다.
    /// provider 응답 JSON을 해석하지 않고 그대로 돌려준다.
    async fn post_comment(
        &self,
        pull: &PullRequestRef,
        body: &str,
        anchor: Option<&LineAnchor>,
    ) -> Result<Value, ReviewError>;
}

/// 로컬 텍스트 생성 모델 실행 포트.
#[async_trait]
pub trait ModelRunner: Send + Sync {
    async fn run(&self, prompt: &str, model: &str) -> Result<String, ReviewError>;
}

/// 식별자별 리뷰 히스토리 저장소 포트. 최신 기록이 앞에 온다.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn append(&self, identity: &Identity, record: ReviewRecord);
    async fn list(&self, identity: &Identity) -> Vec<ReviewRecord>;
    async fn clear(&self, identity: &Identity);
}

/// 채팅 기록 저장소 포트(식별자 구분/용량 제한 없음).
#[async_trait]
pub trait ChatStore: Send + Sync {
    async fn append(&self, entry: ChatEntry);
    async fn list(&self) -> Vec<ChatEntry>;
}
