//! 程序配置
//!
//! 默认值 → TOML 文件 → 环境变量，三者按需组合

use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::services::csv_codec::{EXPORT_FILE_NAME, TEMPLATE_FILE_NAME};

/// 证书智能体的默认 ID
pub const DEFAULT_AGENT_ID: &str = "69996d91cf2aa167c0547540";

/// 智能体后端类型
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentBackend {
    /// 通过 HTTP 调用远程智能体
    Http,
    /// 通过 OpenAI 兼容接口直接调用 LLM
    Llm,
}

impl FromStr for AgentBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(AgentBackend::Http),
            "llm" => Ok(AgentBackend::Llm),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    // --- 智能体配置 ---
    pub agent_backend: AgentBackend,
    pub agent_id: String,
    /// 智能体调用地址（HTTP 后端）
    pub agent_api_url: String,
    pub agent_api_key: Option<String>,
    /// 单次智能体调用的超时时间（秒）
    pub agent_timeout_secs: u64,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    // --- 控制台配置 ---
    /// 每条记录最多允许的重试次数
    pub max_retries: u32,
    /// 列表每页条数
    pub page_size: usize,
    // --- 批量处理 ---
    /// 待批量签发的 CSV 文件
    pub bulk_csv_file: String,
    pub export_file: String,
    pub template_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            agent_backend: AgentBackend::Http,
            agent_id: DEFAULT_AGENT_ID.to_string(),
            agent_api_url: "http://localhost:3000/api/agent".to_string(),
            agent_api_key: None,
            agent_timeout_secs: 120,
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4o-mini".to_string(),
            max_retries: 3,
            page_size: 10,
            bulk_csv_file: "participants.csv".to_string(),
            export_file: EXPORT_FILE_NAME.to_string(),
            template_file: TEMPLATE_FILE_NAME.to_string(),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
        }
    }
}

impl Config {
    /// 从环境变量读取配置，未设置的字段使用默认值
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().overlay_env()
    }

    /// 从 TOML 文件读取配置，文件中未出现的字段使用默认值
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 程序入口使用的加载方式
    ///
    /// 设置了 `CERTIFLOW_CONFIG` 时先读 TOML 文件，再用环境变量覆盖
    pub fn load() -> Result<Self, ConfigError> {
        let base = match std::env::var("CERTIFLOW_CONFIG") {
            Ok(path) => Self::from_toml_file(path)?,
            Err(_) => Self::default(),
        };
        base.overlay_env()
    }

    fn overlay_env(self) -> Result<Self, ConfigError> {
        Ok(Self {
            agent_backend: parse_env("AGENT_BACKEND", "http|llm")?.unwrap_or(self.agent_backend),
            agent_id: std::env::var("AGENT_ID").unwrap_or(self.agent_id),
            agent_api_url: std::env::var("AGENT_API_URL").unwrap_or(self.agent_api_url),
            agent_api_key: std::env::var("AGENT_API_KEY").ok().or(self.agent_api_key),
            agent_timeout_secs: parse_env("AGENT_TIMEOUT_SECS", "u64")?.unwrap_or(self.agent_timeout_secs),
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(self.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(self.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(self.llm_model_name),
            max_retries: parse_env("MAX_RETRIES", "u32")?.unwrap_or(self.max_retries),
            page_size: parse_env("PAGE_SIZE", "usize")?.unwrap_or(self.page_size),
            bulk_csv_file: std::env::var("BULK_CSV_FILE").unwrap_or(self.bulk_csv_file),
            export_file: std::env::var("EXPORT_FILE").unwrap_or(self.export_file),
            template_file: std::env::var("TEMPLATE_FILE").unwrap_or(self.template_file),
            verbose_logging: parse_env("VERBOSE_LOGGING", "bool")?.unwrap_or(self.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(self.output_log_file),
        })
    }
}

/// 读取并解析环境变量；未设置返回 `None`，设置了但无法解析则报错
fn parse_env<T: FromStr>(var_name: &str, expected_type: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(var_name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_console_constants() {
        let config = Config::default();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.agent_id, DEFAULT_AGENT_ID);
        assert_eq!(config.agent_backend, AgentBackend::Http);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            agent_backend = "llm"
            llm_model_name = "doubao-seed-1.6"
            page_size = 25
            "#,
        )
        .unwrap();

        assert_eq!(config.agent_backend, AgentBackend::Llm);
        assert_eq!(config.llm_model_name, "doubao-seed-1.6");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.export_file, EXPORT_FILE_NAME);
        assert_eq!(config.template_file, TEMPLATE_FILE_NAME);
    }

    #[test]
    fn test_unknown_backend_rejected() {
        assert!(Config::from_toml_str(r#"agent_backend = "grpc""#).is_err());
        assert!(matches!(
            "grpc".parse::<AgentBackend>(),
            Err(ConfigError::UnknownBackend(name)) if name == "grpc"
        ));
        assert_eq!(" LLM ".parse::<AgentBackend>().unwrap(), AgentBackend::Llm);
    }
}
