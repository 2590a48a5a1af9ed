//! 领域事件（Domain Event）
//!
//! 事件载荷的唯一规范定义。核心库不承担事件投递与顺序保证；
//! 事件类型经 `registry::TypeRegistry` 显式注册后获得稳定标识。
//!
use serde::Serialize;
use std::fmt;

/// 领域事件载荷需要满足的通用能力边界
pub trait DomainEvent: Clone + fmt::Debug + Serialize + Send + Sync {
    /// 事件类型名（注册表描述符，形如 `singer.created`）
    const TYPE: &'static str;

    /// 事件载荷版本（用于版本兼容）
    fn event_version(&self) -> usize {
        1
    }
}
