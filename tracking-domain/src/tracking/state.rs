//! 跟踪状态（Tracking State）
//!
//! 描述一个聚合实例需要何种持久化动作的生命周期标志集：
//! `new` / `dirty` / `deleted` / `self-deleted`，四者互斥；
//! 全部为假时即第五个隐含状态 `clean`。
//!
use serde::{Deserialize, Serialize};
use std::fmt;

/// 聚合实例的生命周期标志集
///
/// 每个迁移操作先清空全部标志、再置位目标标志（`mark_as_clean` 只清空），
/// 因此任意时刻至多一个标志为真。迁移合法性是全量的：任意状态可达任意
/// 状态，限制策略（若需要）由调用方（聚合）负责。
///
/// # 示例
///
/// ```
/// use tracking_domain::tracking::TrackingState;
///
/// let mut state = TrackingState::default();
/// assert!(state.is_new());
///
/// state.mark_as_dirty();
/// assert!(state.is_dirty());
/// assert!(!state.is_new());
///
/// state.mark_as_clean();
/// assert!(state.is_clean());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingState {
    is_new: bool,
    is_dirty: bool,
    is_deleted: bool,
    is_self_deleted: bool,
}

impl Default for TrackingState {
    // 与所属聚合一同创建，初始即为 new
    fn default() -> Self {
        Self {
            is_new: true,
            is_dirty: false,
            is_deleted: false,
            is_self_deleted: false,
        }
    }
}

impl TrackingState {
    /// 全部标志为假的 clean 状态（已持久化聚合的起点）
    pub fn clean() -> Self {
        Self {
            is_new: false,
            is_dirty: false,
            is_deleted: false,
            is_self_deleted: false,
        }
    }

    fn reset(&mut self) {
        self.is_new = false;
        self.is_dirty = false;
        self.is_deleted = false;
        self.is_self_deleted = false;
    }

    /// 标记为新建（尚未持久化）
    pub fn mark_as_new(&mut self) {
        self.reset();
        self.is_new = true;
    }

    /// 标记为已变更（需要更新）
    pub fn mark_as_dirty(&mut self) {
        self.reset();
        self.is_dirty = true;
    }

    /// 标记为被外层聚合级联删除
    pub fn mark_as_deleted(&mut self) {
        self.reset();
        self.is_deleted = true;
    }

    /// 标记为由自身操作删除
    pub fn mark_as_self_deleted(&mut self) {
        self.reset();
        self.is_self_deleted = true;
    }

    /// 标记为干净（持久化完成后）
    pub fn mark_as_clean(&mut self) {
        self.reset();
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    pub fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    pub fn is_self_deleted(&self) -> bool {
        self.is_self_deleted
    }

    /// 四个标志全部为假
    pub fn is_clean(&self) -> bool {
        !(self.is_new || self.is_dirty || self.is_deleted || self.is_self_deleted)
    }

    /// 任一删除标志为真
    pub fn is_any_deleted(&self) -> bool {
        self.is_deleted || self.is_self_deleted
    }

    fn facet_count(&self) -> usize {
        [self.is_new, self.is_dirty, self.is_deleted, self.is_self_deleted]
            .into_iter()
            .filter(|set| *set)
            .count()
    }
}

impl fmt::Display for TrackingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = if self.is_new {
            "new"
        } else if self.is_dirty {
            "dirty"
        } else if self.is_deleted {
            "deleted"
        } else if self.is_self_deleted {
            "self-deleted"
        } else {
            "clean"
        };
        write!(f, "{label}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 测试初始状态为 new
    #[test]
    fn test_default_is_new() {
        let state = TrackingState::default();
        assert!(state.is_new());
        assert!(!state.is_dirty());
        assert!(!state.is_deleted());
        assert!(!state.is_self_deleted());
        assert!(!state.is_clean());
    }

    // 测试任意迁移序列后至多一个标志为真
    #[test]
    fn test_mutual_exclusivity_over_all_sequences() {
        let transitions: [fn(&mut TrackingState); 5] = [
            TrackingState::mark_as_new,
            TrackingState::mark_as_dirty,
            TrackingState::mark_as_deleted,
            TrackingState::mark_as_self_deleted,
            TrackingState::mark_as_clean,
        ];

        // 遍历全部两步迁移组合；clear-then-set 保证不变式与历史无关
        for first in transitions {
            for second in transitions {
                let mut state = TrackingState::default();
                first(&mut state);
                second(&mut state);
                assert!(state.facet_count() <= 1, "state={state}");
            }
        }
    }

    // 测试 clean 与四个标志互斥
    #[test]
    fn test_clean_means_no_facets() {
        let mut state = TrackingState::default();
        state.mark_as_clean();
        assert!(state.is_clean());
        assert_eq!(state.facet_count(), 0);
        assert_eq!(state, TrackingState::clean());
    }

    // 测试任意状态间可直接迁移
    #[test]
    fn test_transitions_are_total() {
        let mut state = TrackingState::default();
        state.mark_as_deleted();
        assert!(state.is_deleted());

        state.mark_as_new();
        assert!(state.is_new());

        state.mark_as_self_deleted();
        assert!(state.is_self_deleted());
        assert!(state.is_any_deleted());

        state.mark_as_dirty();
        assert!(state.is_dirty());
        assert!(!state.is_any_deleted());
    }

    // 测试 Display 输出
    #[test]
    fn test_display() {
        let mut state = TrackingState::default();
        assert_eq!(state.to_string(), "new");
        state.mark_as_dirty();
        assert_eq!(state.to_string(), "dirty");
        state.mark_as_self_deleted();
        assert_eq!(state.to_string(), "self-deleted");
        state.mark_as_clean();
        assert_eq!(state.to_string(), "clean");
    }

    // 测试序列化往返
    #[test]
    fn test_serde_round_trip() {
        let mut state = TrackingState::default();
        state.mark_as_dirty();

        let json = serde_json::to_string(&state).unwrap();
        let back: TrackingState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
