use thiserror::Error;

use crate::services::validation::FieldErrors;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 表单字段缺失或格式错误
    #[error("表单校验失败: {0}")]
    Validation(FieldErrors),
    /// 同一参与者同一活动已签发过证书
    #[error("A certificate has already been issued for {name} for the event \"{event}\".")]
    Duplicate { name: String, event: String },
    /// CSV 导入错误
    #[error("{0}")]
    Csv(#[from] CsvError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 文件读写错误
    #[error("文件错误 ({path}): {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 智能体调用错误
///
/// 工作流内部会把这些错误转换成 `failed` 记录，不会抛给调用方
#[derive(Debug, Error)]
pub enum AgentError {
    /// 网络请求失败
    #[error("智能体请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 非 2xx 且无法解析的响应
    #[error("智能体返回错误状态 ({endpoint}): HTTP {status}")]
    BadStatus { endpoint: String, status: u16 },
    /// 响应体不符合约定的结构
    #[error("智能体响应解析失败: {0}")]
    InvalidResponse(String),
    #[error("智能体调用超时 ({0} 秒)")]
    Timeout(u64),
    /// LLM 后端调用失败
    #[error("LLM API调用失败 (模型: {model}): {message}")]
    Llm { model: String, message: String },
}

/// CSV 导入错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CsvError {
    #[error("No valid rows found. Ensure CSV has name, email, event columns.")]
    NoValidRows,
    #[error("导出 CSV 失败: {0}")]
    Export(String),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("未知的智能体后端: {0}")]
    UnknownBackend(String),
    #[error("智能体客户端初始化失败: {0}")]
    ClientBuildFailed(String),
}

// ========== 便捷构造函数 ==========

impl AgentError {
    /// 创建请求失败错误
    pub fn request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AgentError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        }
    }

    /// 创建 LLM 调用错误
    pub fn llm(model: impl Into<String>, message: impl std::fmt::Display) -> Self {
        AgentError::Llm {
            model: model.into(),
            message: message.to_string(),
        }
    }
}

impl AppError {
    /// 创建文件读写错误
    pub fn file(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File {
            path: path.into(),
            source,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
