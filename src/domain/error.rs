//! 리뷰 파이프라인 오류 분류.
//!
//! 응답 파싱 실패는 오류가 아니다. 파서는 항상 결과를 돌려준다.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReviewError {
    /// provider가 파일 목록(배열)이 아닌 응답을 돌려줬거나 요청 자체가 실패했다.
    #[error("failed to fetch PR details")]
    Fetch,

    /// 모델 프로세스를 시작/통신하지 못했다.
    #[error("failed to run model process: {0}")]
    ModelInvocation(#[source] std::io::Error),

    #[error("model process timed out after {secs}s")]
    ModelTimeout { secs: u64 },

    /// 코멘트 게시에 필요한 토큰이 없다.
    #[error("missing VCS token for host '{host}'")]
    MissingCredential { host: String },

    #[error("provider request failed: {0}")]
    Transport(String),
}
