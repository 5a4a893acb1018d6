//! 모델 CLI 실행기.

use std::io;
use std::process::Stdio;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;

use crate::application::config::{MODEL_PLACEHOLDER, ModelCommandSpec};
use crate::domain::error::ReviewError;

/// 모델 명령을 한 번 실행한다.
/// 프롬프트를 stdin으로 모두 쓰고 닫은 뒤, 프로세스가 stdout을 닫을 때까지 수집한다.
/// stderr는 버린다.
pub async fn run_model_command(
    spec: &ModelCommandSpec,
    prompt: &str,
    model: &str,
) -> Result<String, ReviewError> {
    let args = render_args(&spec.args, model);

    let mut child = Command::new(&spec.command)
        .args(&args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|err| {
            tracing::error!(command = %spec.command, error = %err, "failed to spawn model command");
            ReviewError::ModelInvocation(err)
        })?;

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| ReviewError::ModelInvocation(io::Error::other("model stdin unavailable")))?;
    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| ReviewError::ModelInvocation(io::Error::other("model stdout unavailable")))?;

    // 큰 프롬프트를 쓰는 동안 stdout 파이프가 가득 차 멈추지 않도록 쓰기를 분리한다.
    let input = prompt.as_bytes().to_vec();
    let writer = tokio::spawn(async move {
        let result = stdin.write_all(&input).await;
        drop(stdin);
        result
    });

    let collect = async {
        let mut buf = Vec::new();
        stdout.read_to_end(&mut buf).await?;
        let status = child.wait().await?;
        Ok::<_, io::Error>((buf, status))
    };

    let collected = match spec.timeout {
        Some(limit) => {
            let timed = tokio::time::timeout(limit, collect).await;
            match timed {
                Ok(result) => result,
                Err(_) => {
                    writer.abort();
                    if let Err(err) = child.kill().await {
                        tracing::warn!(error = %err, "failed to kill timed-out model process");
                    }
                    return Err(ReviewError::ModelTimeout {
                        secs: limit.as_secs(),
                    });
                }
            }
        }
        None => collect.await,
    };

    let (buf, status) = collected.map_err(ReviewError::ModelInvocation)?;

    match writer.await {
        Ok(Err(err)) => tracing::debug!(error = %err, "model process did not consume full prompt"),
        Err(err) => tracing::debug!(error = %err, "prompt writer task failed"),
        Ok(Ok(())) => {}
    }

    if !status.success() {
        tracing::warn!(command = %spec.command, %status, "model command exited unsuccessfully");
    }

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// `{model}` 자리표시자를 치환하고, 없으면 모델 식별자를 마지막 인자로 붙인다.
pub(super) fn render_args(args: &[String], model: &str) -> Vec<String> {
    let mut out = Vec::with_capacity(args.len() + 1);
    let mut model_in_args = false;
    for arg in args {
        if arg.contains(MODEL_PLACEHOLDER) {
            model_in_args = true;
            out.push(arg.replace(MODEL_PLACEHOLDER, model));
        } else {
            out.push(arg.clone());
        }
    }
    if !model_in_args {
        out.push(model.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn sh(script: &str, timeout: Option<Duration>) -> ModelCommandSpec {
        ModelCommandSpec {
            command: "sh".to_string(),
            // `sh -c <script> <model>`: 모델 식별자는 $0으로 들어간다.
            args: vec!["-c".to_string(), script.to_string(), "{model}".to_string()],
            max_concurrent: 1,
            timeout,
        }
    }

    #[test]
    fn model_placeholder_is_substituted_or_appended() {
        let with = render_args(&["run".to_string(), "{model}".to_string()], "llama3");
        assert_eq!(with, vec!["run", "llama3"]);

        let without = render_args(&["run".to_string()], "llama3");
        assert_eq!(without, vec!["run", "llama3"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn collects_stdout_of_prompt_echo() {
        let out = run_model_command(&sh("cat", None), "hello\nworld", "llama3")
            .await
            .unwrap();
        assert_eq!(out, "hello\nworld");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn large_prompts_do_not_deadlock() {
        let prompt = "diff line\n".repeat(200_000);
        let out = run_model_command(&sh("cat", Some(Duration::from_secs(30))), &prompt, "m")
            .await
            .unwrap();
        assert_eq!(out.len(), prompt.len());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn passes_model_identifier_and_discards_stderr() {
        let spec = sh("echo \"$0\"; echo noisy >&2", None);
        let out = run_model_command(&spec, "", "codellama").await.unwrap();
        assert_eq!(out, "codellama\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_still_returns_output() {
        let out = run_model_command(&sh("echo partial; exit 3", None), "", "m")
            .await
            .unwrap();
        assert_eq!(out, "partial\n");
    }

    #[tokio::test]
    async fn missing_binary_is_an_invocation_error() {
        let spec = ModelCommandSpec {
            command: "prlens-no-such-model-binary".to_string(),
            args: vec![],
            max_concurrent: 1,
            timeout: None,
        };
        let err = run_model_command(&spec, "prompt", "m").await.unwrap_err();
        assert!(matches!(err, ReviewError::ModelInvocation(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn hung_process_is_killed_after_timeout() {
        let started = std::time::Instant::now();
        let err = run_model_command(&sh("sleep 10", Some(Duration::from_millis(200))), "", "m")
            .await
            .unwrap_err();

        assert!(matches!(err, ReviewError::ModelTimeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
