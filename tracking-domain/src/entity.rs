//! 实体（Entity）基础抽象
//!
//! 为聚合与子实体提供统一的标识与版本能力；实体相等只看标识
//! （见 `equality::AggregateEquality`），与属性值无关。
//!
use std::fmt::Display;

/// 具备唯一标识与版本的实体抽象
pub trait Entity: Send + Sync {
    /// 实体标识类型，要求可比较、可显示与可克隆
    type Id: Clone + PartialEq + Display;

    /// 使用给定标识创建实体（聚合）
    fn new(id: Self::Id) -> Self;

    /// 获取实体标识
    fn id(&self) -> &Self::Id;

    /// 获取当前版本（用于乐观锁与并发控制）
    fn version(&self) -> usize;
}
