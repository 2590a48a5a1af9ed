//! 命令（Command）
//!
//! 命令载荷的唯一规范定义。核心库不承担命令派发；命令处理器在持久化
//! 前通过 `check_rules` 校验载荷，命令类型经 `registry::TypeRegistry`
//! 显式注册后获得稳定标识。
//!
use std::fmt;

use crate::broken_rules::BrokenRules;

/// 命令载荷需要满足的通用能力边界
pub trait Command: fmt::Debug + Send + Sync {
    /// 命令类型名（注册表描述符，形如 `singer.register`）
    const TYPE: &'static str;

    /// 派发前校验载荷；违规记入通知对象
    fn check_rules(&self, notification: &mut BrokenRules) {
        let _ = notification;
    }
}
