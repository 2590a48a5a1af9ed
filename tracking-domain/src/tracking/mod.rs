//! 变更跟踪子系统
//!
//! - `TrackingState`：四个互斥生命周期标志（new/dirty/deleted/self-deleted），
//!   全假即 clean；
//! - `ChangeTracker`：持有状态与上一次属性快照，`detect_changes` 驱动迁移；
//! - `Tracked`：聚合向跟踪设施暴露注入字段的访问接口（由 `#[aggregate]`
//!   宏生成实现）。
//!
pub mod change_detector;
pub mod state;

pub use change_detector::{ChangeTracker, Props, TrackedValue, props_from_json};
pub use state::TrackingState;

use crate::broken_rules::BrokenRules;

/// 聚合携带的跟踪簿记访问接口
///
/// 实现通常由 `#[aggregate]` 宏生成：跟踪器与违规收集器作为聚合的
/// 注入字段存在，且不参与序列化投影。
pub trait Tracked {
    fn tracker(&self) -> &ChangeTracker;

    fn tracker_mut(&mut self) -> &mut ChangeTracker;

    fn broken_rules(&self) -> &BrokenRules;

    fn broken_rules_mut(&mut self) -> &mut BrokenRules;
}
