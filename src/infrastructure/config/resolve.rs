//! 설정 값(token/env 등)을 실제 런타임 값으로 해석하는 유틸리티.
//!
//! - 환경변수 접근은 인프라 계층에서만 수행한다.

use std::env;

use crate::application::config::{Config, DEFAULT_MODEL, HostConfig};

pub const MODEL_ENV: &str = "MODEL";

/// Host(VCS) 토큰 해석 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostTokenResolution {
    pub token: Option<String>,
    pub source: Option<String>,
}

/// 리뷰 모델 해석 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelResolution {
    pub model: String,
    pub source: String,
}

/// Host(VCS) 토큰을 해석한다. 설정이 없으면 기본 환경변수를 본다.
pub fn resolve_host_token(host_cfg: Option<&HostConfig>) -> HostTokenResolution {
    resolve_host_token_with(host_cfg, |name| env::var(name).ok())
}

pub(crate) fn resolve_host_token_with(
    host_cfg: Option<&HostConfig>,
    lookup: impl Fn(&str) -> Option<String>,
) -> HostTokenResolution {
    let fallback = HostConfig::default();
    let cfg = host_cfg.unwrap_or(&fallback);

    if let Some(token) = cfg.token.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        return HostTokenResolution {
            token: Some(token.to_string()),
            source: Some("inline".to_string()),
        };
    }

    let env_name = cfg.token_env_name();
    match lookup(env_name).map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => HostTokenResolution {
            token: Some(v),
            source: Some(format!("env:{env_name}")),
        },
        _ => HostTokenResolution {
            token: None,
            source: Some(format!("env:{env_name} (missing)")),
        },
    }
}

/// 리뷰 모델: 설정 파일 > `MODEL` 환경변수 > 기본값.
pub fn resolve_review_model(config: &Config) -> ModelResolution {
    resolve_review_model_with(config, |name| env::var(name).ok())
}

pub(crate) fn resolve_review_model_with(
    config: &Config,
    lookup: impl Fn(&str) -> Option<String>,
) -> ModelResolution {
    if let Some(model) = config
        .defaults
        .model
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return ModelResolution {
            model: model.to_string(),
            source: "config".to_string(),
        };
    }

    match lookup(MODEL_ENV).map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => ModelResolution {
            model: v,
            source: format!("env:{MODEL_ENV}"),
        },
        _ => ModelResolution {
            model: DEFAULT_MODEL.to_string(),
            source: "default".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_of(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |name| {
            pairs
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn inline_token_beats_environment() {
        let cfg = HostConfig {
            token: Some(" abc ".into()),
            ..HostConfig::default()
        };
        let resolved = resolve_host_token_with(Some(&cfg), env_of(&[("GITHUB_TOKEN", "env")]));

        assert_eq!(resolved.token.as_deref(), Some("abc"));
        assert_eq!(resolved.source.as_deref(), Some("inline"));
    }

    #[test]
    fn unconfigured_host_reads_default_env() {
        let resolved = resolve_host_token_with(None, env_of(&[("GITHUB_TOKEN", "ghp_1")]));

        assert_eq!(resolved.token.as_deref(), Some("ghp_1"));
        assert_eq!(resolved.source.as_deref(), Some("env:GITHUB_TOKEN"));
    }

    #[test]
    fn missing_env_token_is_reported() {
        let cfg = HostConfig {
            token_env: Some("CORP_TOKEN".into()),
            ..HostConfig::default()
        };
        let resolved = resolve_host_token_with(Some(&cfg), env_of(&[("CORP_TOKEN", "  ")]));

        assert_eq!(resolved.token, None);
        assert_eq!(resolved.source.as_deref(), Some("env:CORP_TOKEN (missing)"));
    }

    #[test]
    fn review_model_precedence() {
        let mut config = Config::default();
        assert_eq!(
            resolve_review_model_with(&config, env_of(&[])).model,
            "llama3"
        );

        let from_env = resolve_review_model_with(&config, env_of(&[("MODEL", "mistral")]));
        assert_eq!(from_env.model, "mistral");
        assert_eq!(from_env.source, "env:MODEL");

        config.defaults.model = Some("codellama".into());
        let from_config = resolve_review_model_with(&config, env_of(&[("MODEL", "mistral")]));
        assert_eq!(from_config.model, "codellama");
        assert_eq!(from_config.source, "config");
    }
}
