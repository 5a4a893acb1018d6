//! 리뷰 히스토리/채팅 기록 저장소 구현.
//! 프로세스 수명 동안만 유지되는 메모리 구현이며, 포트 뒤에서 교체 가능하다.

mod memory;

pub use memory::{InMemoryChatStore, InMemoryHistoryStore};
