//! 리뷰 컨텍스트에 대한 자유 질의 응답 유스케이스.
//! 응답은 파싱하지 않고, 모든 대화는 식별자 구분 없이 한 저장소에 쌓인다.

use chrono::Utc;
use serde_json::Value;

use crate::application::ports::{ChatStore, ModelRunner};
use crate::domain::error::ReviewError;
use crate::domain::policy::build_chat_prompt;
use crate::domain::review::ChatEntry;

pub struct ChatUseCase<'a> {
    pub model_runner: &'a dyn ModelRunner,
    pub chat_store: &'a dyn ChatStore,
    pub model: &'a str,
}

impl<'a> ChatUseCase<'a> {
    pub async fn execute(
        &self,
        message: &str,
        context: Value,
        history: Option<&Value>,
    ) -> Result<String, ReviewError> {
        let prompt = build_chat_prompt(message, &context, history);
        let response = self.model_runner.run(&prompt, self.model).await?;

        self.chat_store
            .append(ChatEntry {
                user_message: message.to_string(),
                model_response: response.clone(),
                context,
                timestamp: Utc::now(),
            })
            .await;

        Ok(response)
    }

    pub async fn list(&self) -> Vec<ChatEntry> {
        self.chat_store.list().await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::application::usecases::fakes::FakeModel;
    use crate::infrastructure::store::InMemoryChatStore;

    #[tokio::test]
    async fn chat_returns_raw_response_and_logs_entry() {
        let model = FakeModel::answering("  SUMMARY: not parsed\n");
        let store = InMemoryChatStore::default();
        let use_case = ChatUseCase {
            model_runner: &model,
            chat_store: &store,
            model: "llama3",
        };

        let context = json!({ "owner": "acme", "repo": "widgets", "prNumber": 7 });
        let response = use_case
            .execute("what changed?", context.clone(), None)
            .await
            .unwrap();

        assert_eq!(response, "  SUMMARY: not parsed\n");
        let entries = use_case.list().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].user_message, "what changed?");
        assert_eq!(entries[0].model_response, response);
        assert_eq!(entries[0].context, context);

        let calls = model.calls.lock().unwrap();
        assert!(calls[0].0.contains("Repo: widgets"));
        assert_eq!(calls[0].1, "llama3");
    }
}
