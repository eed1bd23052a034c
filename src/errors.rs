use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnaplinkError {
    Validation(String),
    NotFound(String),
    RandomSource(String),
    IdExhausted(String),
    Internal(String),
    Config(String),
}

impl SnaplinkError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            SnaplinkError::Validation(_) => "E001",
            SnaplinkError::NotFound(_) => "E002",
            SnaplinkError::RandomSource(_) => "E003",
            SnaplinkError::IdExhausted(_) => "E004",
            SnaplinkError::Internal(_) => "E005",
            SnaplinkError::Config(_) => "E006",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            SnaplinkError::Validation(_) => "Validation Error",
            SnaplinkError::NotFound(_) => "Resource Not Found",
            SnaplinkError::RandomSource(_) => "Random Source Error",
            SnaplinkError::IdExhausted(_) => "ID Generation Exhausted",
            SnaplinkError::Internal(_) => "Internal Error",
            SnaplinkError::Config(_) => "Configuration Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            SnaplinkError::Validation(msg)
            | SnaplinkError::NotFound(msg)
            | SnaplinkError::RandomSource(msg)
            | SnaplinkError::IdExhausted(msg)
            | SnaplinkError::Internal(msg)
            | SnaplinkError::Config(msg) => msg,
        }
    }

    /// HTTP status the error maps to when it reaches a client.
    pub fn http_status(&self) -> StatusCode {
        match self {
            SnaplinkError::Validation(_) => StatusCode::BAD_REQUEST,
            SnaplinkError::NotFound(_) => StatusCode::NOT_FOUND,
            SnaplinkError::RandomSource(_)
            | SnaplinkError::IdExhausted(_)
            | SnaplinkError::Internal(_)
            | SnaplinkError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Masked errors never show their message to a client.
    pub fn is_masked(&self) -> bool {
        self.http_status().is_server_error()
    }

    /// Whether the error came out of short id generation.
    pub fn is_generation(&self) -> bool {
        matches!(
            self,
            SnaplinkError::RandomSource(_) | SnaplinkError::IdExhausted(_)
        )
    }

    /// 格式化为彩色输出（用于开发日志模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for SnaplinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SnaplinkError {}

// 便捷的构造函数
impl SnaplinkError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::NotFound(msg.into())
    }

    pub fn random_source<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::RandomSource(msg.into())
    }

    pub fn id_exhausted<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::IdExhausted(msg.into())
    }

    pub fn internal<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::Internal(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::Config(msg.into())
    }
}

impl From<std::io::Error> for SnaplinkError {
    fn from(err: std::io::Error) -> Self {
        SnaplinkError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for SnaplinkError {
    fn from(err: serde_json::Error) -> Self {
        SnaplinkError::Internal(err.to_string())
    }
}

impl From<config::ConfigError> for SnaplinkError {
    fn from(err: config::ConfigError) -> Self {
        SnaplinkError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SnaplinkError>;
