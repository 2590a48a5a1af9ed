//! 领域层统一错误定义
//!
//! 仅覆盖核心库自身的最小必要集合：构造参数、序列化投影与类型注册。
//! 业务规则失败不是错误：它们以 `BrokenRule` 数据的形式被收集与查询，
//! 见 `broken_rules` 模块。
//!
use thiserror::Error;

/// 统一错误类型（基础库最小必要集）
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomainError {
    // --- 序列化/投影 ---
    #[error("serialization error: {source}")]
    Serde {
        #[from]
        source: serde_json::Error,
    },
    #[error("parse error: {reason}")]
    Parse { reason: String },
    #[error("type mismatch: expected={expected}, found={found}")]
    TypeMismatch { expected: String, found: String },

    // --- 构造与入参 ---
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    // --- 类型注册表 ---
    #[error("duplicate registration: kind={kind}, name={name}")]
    DuplicateRegistration { kind: String, name: String },
    #[error("unregistered type: kind={kind}, name={name}")]
    Unregistered { kind: String, name: String },
}

/// 统一 Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;

// ---- Cross-crate conversions for caller convenience ----
// 允许调用方直接使用 `?` 将标识/时间戳解析错误转换为 DomainError

impl From<uuid::Error> for DomainError {
    fn from(err: uuid::Error) -> Self {
        DomainError::Parse {
            reason: err.to_string(),
        }
    }
}

impl From<chrono::ParseError> for DomainError {
    fn from(err: chrono::ParseError) -> Self {
        DomainError::Parse {
            reason: err.to_string(),
        }
    }
}
