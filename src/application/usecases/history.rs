//! 식별자별 리뷰 히스토리 조회/초기화 유스케이스.

use crate::application::ports::HistoryStore;
use crate::domain::review::{Identity, ReviewRecord};

pub struct HistoryUseCase<'a> {
    pub history: &'a dyn HistoryStore,
}

impl<'a> HistoryUseCase<'a> {
    /// 최신 기록이 앞에 오는 목록. 기록이 없으면 빈 목록.
    pub async fn list(&self, identity: &Identity) -> Vec<ReviewRecord> {
        self.history.list(identity).await
    }

    pub async fn clear(&self, identity: &Identity) {
        tracing::info!(identity = identity.as_str(), "clearing review history");
        self.history.clear(identity).await;
    }
}
