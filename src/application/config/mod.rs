//! 애플리케이션이 사용하는 설정 스키마(순수 데이터).
//!
//! 주의: 파일/환경변수/프로세스 접근은 `infrastructure`에서만 수행한다.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "llama3";
pub const DEFAULT_MODEL_COMMAND: &str = "ollama";
pub const MODEL_PLACEHOLDER: &str = "{model}";
pub const DEFAULT_MAX_CONCURRENT_MODELS: usize = 2;
pub const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 600;
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;
pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub const DEFAULT_IDENTITY_HEADER: &str = "x-caller-identity";
pub const DEFAULT_TOKEN_ENV: &str = "GITHUB_TOKEN";
pub const GITHUB_HOST: &str = "github.com";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// 전역 기본값
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// 로컬 모델 프로세스 실행 설정
    #[serde(default)]
    pub model: ModelConfig,
    /// VCS 호스트별 인증/엔드포인트 설정
    #[serde(default)]
    pub hosts: HashMap<String, HostConfig>,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DefaultsConfig {
    /// 리뷰에 사용할 모델 식별자
    pub model: Option<String>,
    /// 채팅에 사용할 모델 식별자
    pub chat_model: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ModelConfig {
    /// 실행할 로컬 명령(기본 ollama)
    pub command: Option<String>,
    /// 명령 인자. `{model}`은 모델 식별자로 치환된다.
    pub args: Option<Vec<String>>,
    /// 동시에 실행할 수 있는 모델 프로세스 수
    pub max_concurrent: Option<usize>,
    /// 모델 프로세스 제한 시간(초). 0이면 제한 없음.
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct HostConfig {
    /// 고정 토큰(민감정보: 권장하지 않음)
    pub token: Option<String>,
    /// 토큰을 읽을 환경변수 이름(기본 GITHUB_TOKEN)
    pub token_env: Option<String>,
    /// API base URL override(선택)
    pub api_base: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct HistoryConfig {
    pub capacity: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ServerConfig {
    pub bind: Option<String>,
    /// 인증 협력자가 호출자 식별자를 실어 보내는 헤더 이름
    pub identity_header: Option<String>,
}

/// 정규화된 모델 실행 사양.
#[derive(Debug, Clone)]
pub struct ModelCommandSpec {
    pub command: String,
    pub args: Vec<String>,
    pub max_concurrent: usize,
    pub timeout: Option<Duration>,
}

impl Config {
    pub fn chat_model(&self) -> String {
        self.defaults
            .chat_model
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    pub fn model_command_spec(&self) -> ModelCommandSpec {
        let timeout_secs = self
            .model
            .timeout_secs
            .unwrap_or(DEFAULT_MODEL_TIMEOUT_SECS);

        ModelCommandSpec {
            command: self
                .model
                .command
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL_COMMAND.to_string()),
            args: self
                .model
                .args
                .clone()
                .unwrap_or_else(|| vec!["run".to_string(), MODEL_PLACEHOLDER.to_string()]),
            max_concurrent: self
                .model
                .max_concurrent
                .unwrap_or(DEFAULT_MAX_CONCURRENT_MODELS)
                .max(1),
            timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
        }
    }

    pub fn history_capacity(&self) -> usize {
        self.history
            .capacity
            .unwrap_or(DEFAULT_HISTORY_CAPACITY)
            .max(1)
    }

    pub fn bind_address(&self) -> String {
        self.server
            .bind
            .clone()
            .unwrap_or_else(|| DEFAULT_BIND.to_string())
    }

    pub fn identity_header(&self) -> String {
        self.server
            .identity_header
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_IDENTITY_HEADER)
            .to_ascii_lowercase()
    }

    pub fn host_config(&self, host: &str) -> Option<&HostConfig> {
        self.hosts.get(host)
    }

    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub fn merge_from(&mut self, other: Config) {
        self.defaults.merge_from(other.defaults);
        self.model.merge_from(other.model);

        for (host, incoming) in other.hosts {
            if let Some(existing) = self.hosts.get_mut(&host) {
                existing.merge_from(incoming);
            } else {
                self.hosts.insert(host, incoming);
            }
        }

        if other.history.capacity.is_some() {
            self.history.capacity = other.history.capacity;
        }
        if other.server.bind.is_some() {
            self.server.bind = other.server.bind;
        }
        if other.server.identity_header.is_some() {
            self.server.identity_header = other.server.identity_header;
        }
    }
}

impl DefaultsConfig {
    pub fn merge_from(&mut self, other: DefaultsConfig) {
        if other.model.is_some() {
            self.model = other.model;
        }
        if other.chat_model.is_some() {
            self.chat_model = other.chat_model;
        }
    }
}

impl ModelConfig {
    pub fn merge_from(&mut self, other: ModelConfig) {
        if other.command.is_some() {
            self.command = other.command;
        }
        if other.args.is_some() {
            self.args = other.args;
        }
        if other.max_concurrent.is_some() {
            self.max_concurrent = other.max_concurrent;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
    }
}

impl HostConfig {
    pub fn token_env_name(&self) -> &str {
        self.token_env
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_TOKEN_ENV)
    }

    pub fn merge_from(&mut self, other: HostConfig) {
        if other.token.is_some() {
            self.token = other.token;
        }
        if other.token_env.is_some() {
            self.token_env = other.token_env;
        }
        if other.api_base.is_some() {
            self.api_base = other.api_base;
        }
    }
}
