//! 聚合变更跟踪基础库（tracking-domain）
//!
//! 提供以 DDD 为中心的聚合生命周期跟踪构件，用于在仓储层决定
//! 插入/更新/删除动作：
//! - 跟踪状态与嵌套变更探测（`tracking`）
//! - 标识相等与结构相等（`equality`）
//! - 实体（`entity`）、值对象（`value_object`）与聚合根（`aggregate`）抽象
//! - 破坏规则收集与规约（`broken_rules`、`specification`）
//! - 聚合序列化投影（`serializer`）
//! - 事件/命令规范契约与显式类型注册表（`domain_event`、`command`、`registry`）
//!
//! 本 crate 不承担事件投递、命令派发与持久化事务；核心是单线程、
//! 同步的，状态迁移对同步调用方立即一致。
//!
//! 典型用法：
//! 1. 以 `#[aggregate]` 定义聚合并实现 `AggregateRoot` 的属性投影与规则；
//! 2. 每次变更操作后调用 `detect_changes`，仓储按跟踪状态选择动作；
//! 3. 持久化完成后 `mark_as_clean`；
//! 4. 以 `AggregateSerializer` 产出持久化/审计视图。
//!
pub mod aggregate;
pub mod broken_rules;
pub mod command;
pub mod domain_event;
pub mod entity;
pub mod equality;
pub mod error;
pub mod registry;
pub mod serializer;
pub mod specification;
pub mod tracking;
pub mod value_object;

// 允许在本 crate 内部通过 ::tracking_domain 进行自引用，
// 以便过程宏在本 crate 的单元测试中也能解析到 ::tracking_domain 路径。
extern crate self as tracking_domain;
