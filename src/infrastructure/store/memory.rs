//! 메모리 기반 저장소.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::application::ports::{ChatStore, HistoryStore};
use crate::domain::review::{ChatEntry, Identity, ReviewRecord};

/// 식별자별 용량 제한 로그. 앞쪽이 최신이며, 넘치면 가장 오래된 기록이 빠진다.
pub struct InMemoryHistoryStore {
    capacity: usize,
    logs: Mutex<HashMap<Identity, VecDeque<ReviewRecord>>>,
}

impl InMemoryHistoryStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            logs: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn append(&self, identity: &Identity, record: ReviewRecord) {
        // 삽입과 절단은 같은 잠금 안에서 끝난다.
        let mut logs = self.logs.lock().await;
        let log = logs.entry(identity.clone()).or_default();
        log.push_front(record);
        log.truncate(self.capacity);
    }

    async fn list(&self, identity: &Identity) -> Vec<ReviewRecord> {
        let logs = self.logs.lock().await;
        logs.get(identity)
            .map(|log| log.iter().cloned().collect())
            .unwrap_or_default()
    }

    async fn clear(&self, identity: &Identity) {
        let mut logs = self.logs.lock().await;
        logs.insert(identity.clone(), VecDeque::new());
    }
}

/// 채팅 기록. 식별자 구분도 용량 제한도 없다.
#[derive(Default)]
pub struct InMemoryChatStore {
    entries: Mutex<Vec<ChatEntry>>,
}

#[async_trait]
impl ChatStore for InMemoryChatStore {
    async fn append(&self, entry: ChatEntry) {
        self.entries.lock().await.push(entry);
    }

    async fn list(&self) -> Vec<ChatEntry> {
        self.entries.lock().await.clone()
    }
}
