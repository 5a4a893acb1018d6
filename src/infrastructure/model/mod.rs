//! 로컬 모델 프로세스 실행 모듈.
//! 동시 실행 수를 세마포어로 제한하고, 실행마다 독립된 프로세스를 띄운다.

mod command_runner;

use async_trait::async_trait;
use tokio::sync::Semaphore;

use crate::application::config::ModelCommandSpec;
use crate::application::ports::ModelRunner;
use crate::domain::error::ReviewError;

pub use command_runner::run_model_command;

pub struct CommandModelRunner {
    spec: ModelCommandSpec,
    permits: Semaphore,
}

impl CommandModelRunner {
    pub fn new(spec: ModelCommandSpec) -> Self {
        let permits = Semaphore::new(spec.max_concurrent.max(1));
        Self { spec, permits }
    }
}

#[async_trait]
impl ModelRunner for CommandModelRunner {
    async fn run(&self, prompt: &str, model: &str) -> Result<String, ReviewError> {
        let _permit = self.permits.acquire().await.map_err(|_| {
            ReviewError::ModelInvocation(std::io::Error::other("model runner is shut down"))
        })?;
        tracing::debug!(
            model,
            prompt_bytes = prompt.len(),
            available = self.permits.available_permits(),
            "model permit acquired"
        );
        run_model_command(&self.spec, prompt, model).await
    }
}
