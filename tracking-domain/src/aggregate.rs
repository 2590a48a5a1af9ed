//! 聚合根（Aggregate Root）抽象
//!
//! 约束一个被跟踪聚合的核心行为：
//! - `tracked_props` 把当前状态投影为可跟踪的属性树；
//! - `check_rules` 申报业务规则违规；
//! - 由 trait 提供变更探测、校验与生命周期标记的默认编排。
//!
//! 并发模型：单线程、同步。跟踪状态由处理该聚合的单一逻辑线程独占
//! 修改，跨线程共享同一实例需由调用方在外部串行化。
//!
use serde::Serialize;

use crate::broken_rules::{BrokenRule, BrokenRules};
use crate::entity::Entity;
use crate::tracking::{Props, Tracked, TrackedValue, TrackingState};

/// 聚合根接口
///
/// `#[aggregate]` 宏负责注入 `id`/`version`/跟踪簿记字段并实现
/// `Entity` 与 `Tracked`；聚合自身只需给出 `TYPE`、属性投影与业务规则。
pub trait AggregateRoot: Entity + Tracked + Serialize {
    const TYPE: &'static str;

    /// 把当前状态投影为可跟踪的属性树
    fn tracked_props(&self) -> Props;

    /// 申报业务规则；违规记入通知对象，不抛出
    fn check_rules(&self, notification: &mut BrokenRules);

    /// 创建聚合：建立初始快照（状态为 new）并执行一次规则校验
    fn create(id: Self::Id) -> Self
    where
        Self: Sized,
    {
        let mut aggregate = <Self as Entity>::new(id);
        aggregate.detect_changes();
        aggregate.validate();
        aggregate
    }

    /// 每次变更操作之后调用：对比快照并驱动状态迁移
    fn detect_changes(&mut self) -> &TrackingState {
        let current = self.tracked_props();
        self.tracker_mut().detect_changes(current)
    }

    /// 清空上一轮结果并重跑全部规则检查，返回本轮违规列表
    fn validate(&mut self) -> &[BrokenRule] {
        let mut notification = BrokenRules::new();
        self.check_rules(&mut notification);
        *self.broken_rules_mut() = notification;
        self.broken_rules().items()
    }

    /// 最近一轮校验是否无 Error 级违规（不重跑检查；
    /// `create` 在构造时执行过一轮）
    fn is_valid(&self) -> bool {
        !self.broken_rules().has_errors()
    }

    /// 当前跟踪状态
    fn tracking_state(&self) -> &TrackingState {
        self.tracker().state()
    }

    /// 标记为新建
    fn mark_as_new(&mut self) {
        self.tracker_mut().state_mut().mark_as_new();
    }

    /// 标记为已变更
    fn mark_as_dirty(&mut self) {
        self.tracker_mut().state_mut().mark_as_dirty();
    }

    /// 标记为被外层聚合级联删除
    fn mark_as_deleted(&mut self) {
        self.tracker_mut().state_mut().mark_as_deleted();
    }

    /// 标记为由自身操作删除
    fn mark_as_self_deleted(&mut self) {
        self.tracker_mut().state_mut().mark_as_self_deleted();
    }

    /// 持久化完成后标记为干净
    fn mark_as_clean(&mut self) {
        self.tracker_mut().state_mut().mark_as_clean();
    }

    /// 同类型实例相等性：只比较标识
    fn equals(&self, other: &Self) -> bool
    where
        Self: Sized,
    {
        self.id() == other.id()
    }

    /// 以子实体节点投影自身，供外层聚合的属性树引用
    fn as_child(&self) -> TrackedValue {
        TrackedValue::child(self.id(), *self.tracking_state(), self.tracked_props())
    }
}
