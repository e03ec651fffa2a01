use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// ChEMBL API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
}

/// API 调用错误
///
/// 分页循环内出现的 API 错误都只会导致跳过当前页，不会向外传播。
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败（连接、超时、DNS 等）
    #[error("请求失败 (offset={offset}): {source}")]
    RequestFailed {
        offset: u64,
        #[source]
        source: reqwest::Error,
    },
    /// 服务端返回非 200 状态码
    #[error("服务端返回 HTTP {status} (offset={offset})")]
    BadStatus { offset: u64, status: u16 },
    /// 响应体 JSON 解析失败
    #[error("JSON解析失败 (offset={offset}): {source}")]
    JsonParseFailed {
        offset: u64,
        #[source]
        source: serde_json::Error,
    },
    /// HTTP 客户端构建失败
    #[error("HTTP客户端构建失败: {0}")]
    ClientBuildFailed(String),
}

impl ApiError {
    /// 失败请求对应的 offset（客户端构建失败时没有 offset）
    pub fn offset(&self) -> Option<u64> {
        match self {
            ApiError::RequestFailed { offset, .. }
            | ApiError::BadStatus { offset, .. }
            | ApiError::JsonParseFailed { offset, .. } => Some(*offset),
            ApiError::ClientBuildFailed(_) => None,
        }
    }
}

/// 配置错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 配置项取值非法
    #[error("配置项 {field} 非法: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 便捷构造函数 ==========

impl ConfigError {
    /// 创建配置项非法错误
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
