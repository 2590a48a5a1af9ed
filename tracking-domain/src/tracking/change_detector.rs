//! 嵌套变更探测（Nested Change Detector）
//!
//! 遍历聚合的属性树（含嵌套值对象、子实体与有序集合），对比上一次记录的
//! 快照并驱动 `TrackingState` 迁移：
//! - 尚无快照（刚构造）→ `new`；
//! - 任一子实体自身处于 deleted / self-deleted → 父聚合 `dirty`（而非 deleted）；
//! - 任一属性按适用的相等规则（子实体按标识、值对象按分量、标量按值）
//!   与快照不同 → `dirty`；
//! - 否则不产生任何迁移。
//!
//! 属性树是完全拥有型的（owned tree），循环引用无法表达，遍历终止由
//! 结构保证。属性缺失或 `Absent` 标记按"无变更"贡献处理，不报错。
//!
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::equality::{EqualityComponent, components_equal};
use crate::error::{DomainError, DomainResult};
use crate::tracking::state::TrackingState;
use crate::value_object::ValueObject;

/// 聚合属性包：属性名到被跟踪值的有序映射
pub type Props = BTreeMap<String, TrackedValue>;

/// 属性树中的单个被跟踪值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TrackedValue {
    /// 缺失跟踪元数据的属性；对比时按"无变更"贡献处理
    Absent,
    /// 标量（原始类型、时间戳）
    Scalar(EqualityComponent),
    /// 值对象：声明的相等分量列表
    Value(Vec<EqualityComponent>),
    /// 子实体：按标识对比，并携带其自身的跟踪状态
    Child {
        id: String,
        state: TrackingState,
        props: Props,
    },
    /// 有序集合：逐元素对比，长度不同即视为变更
    Sequence(Vec<TrackedValue>),
    /// 无标识的嵌套映射
    Nested(Props),
}

impl TrackedValue {
    pub fn scalar(value: impl Into<EqualityComponent>) -> Self {
        Self::Scalar(value.into())
    }

    /// 以值对象声明的相等分量投影
    pub fn value_object<V>(value: &V) -> Self
    where
        V: ValueObject + ?Sized,
    {
        Self::Value(value.equality_components())
    }

    pub fn child(id: impl ToString, state: TrackingState, props: Props) -> Self {
        Self::Child {
            id: id.to_string(),
            state,
            props,
        }
    }

    pub fn sequence(items: impl IntoIterator<Item = TrackedValue>) -> Self {
        Self::Sequence(items.into_iter().collect())
    }
}

/// 两个被跟踪值在适用的相等规则下是否不同
fn values_differ(previous: &TrackedValue, current: &TrackedValue) -> bool {
    use TrackedValue::*;
    match (previous, current) {
        // 任一侧缺失跟踪元数据：无变更贡献
        (Absent, _) | (_, Absent) => false,
        (Scalar(a), Scalar(b)) => a != b,
        (Value(a), Value(b)) => !components_equal(a, b),
        (
            Child {
                id: previous_id,
                props: previous_props,
                ..
            },
            Child {
                id: current_id,
                props: current_props,
                ..
            },
        ) => {
            // 子实体先按标识对比；标识一致时继续深入其属性，
            // 使子实体内部的变更同样弄脏父聚合
            previous_id != current_id || props_changed(previous_props, current_props)
        }
        (Sequence(a), Sequence(b)) => {
            a.len() != b.len() || a.iter().zip(b.iter()).any(|(x, y)| values_differ(x, y))
        }
        (Nested(a), Nested(b)) => props_changed(a, b),
        // 形态变化（例如标量变集合）即视为变更
        _ => true,
    }
}

/// 属性包对比：仅对两侧均存在的属性产生变更贡献
fn props_changed(previous: &Props, current: &Props) -> bool {
    current.iter().any(|(name, current_value)| {
        previous
            .get(name)
            .is_some_and(|previous_value| values_differ(previous_value, current_value))
    })
}

/// 当前属性树中是否存在处于删除状态的子实体
fn has_deleted_child(props: &Props) -> bool {
    props.values().any(value_has_deleted_child)
}

fn value_has_deleted_child(value: &TrackedValue) -> bool {
    match value {
        TrackedValue::Child { state, props, .. } => {
            state.is_any_deleted() || has_deleted_child(props)
        }
        TrackedValue::Sequence(items) => items.iter().any(value_has_deleted_child),
        TrackedValue::Nested(props) => has_deleted_child(props),
        _ => false,
    }
}

/// 一个聚合实例的变更跟踪器：跟踪状态 + 上一次属性快照
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeTracker {
    state: TrackingState,
    snapshot: Option<Props>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &TrackingState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut TrackingState {
        &mut self.state
    }

    pub fn snapshot(&self) -> Option<&Props> {
        self.snapshot.as_ref()
    }

    /// 对比当前属性与快照，原地驱动状态迁移并刷新快照；
    /// 返回同一个状态实例，不分配新的管理器
    pub fn detect_changes(&mut self, current: Props) -> &TrackingState {
        match self.snapshot.take() {
            None => {
                // 尚未建立任何状态：刚构造，标记为 new
                self.state.mark_as_new();
            }
            Some(previous) => {
                if has_deleted_child(&current) || props_changed(&previous, &current) {
                    self.state.mark_as_dirty();
                }
            }
        }
        self.snapshot = Some(current);
        &self.state
    }
}

/// 把 JSON 属性包转换为可跟踪的属性树
///
/// 非映射输入是调用方实现错误，立即以 `InvalidArgument` 失败。
pub fn props_from_json(value: Value) -> DomainResult<Props> {
    match value {
        Value::Object(map) => {
            let mut props = Props::new();
            for (name, item) in map {
                props.insert(name, tracked_value_from_json(item)?);
            }
            Ok(props)
        }
        other => Err(DomainError::InvalidArgument {
            reason: format!("props must be a mapping, got {}", json_kind(&other)),
        }),
    }
}

fn tracked_value_from_json(value: Value) -> DomainResult<TrackedValue> {
    Ok(match value {
        Value::Null => TrackedValue::Scalar(EqualityComponent::Null),
        Value::Bool(flag) => TrackedValue::scalar(flag),
        Value::Number(number) => {
            if let Some(integer) = number.as_i64() {
                TrackedValue::scalar(integer)
            } else {
                let float = number.as_f64().ok_or_else(|| DomainError::InvalidArgument {
                    reason: format!("unsupported numeric prop: {number}"),
                })?;
                TrackedValue::Scalar(EqualityComponent::float(float)?)
            }
        }
        Value::String(text) => TrackedValue::scalar(text),
        Value::Array(items) => TrackedValue::Sequence(
            items
                .into_iter()
                .map(tracked_value_from_json)
                .collect::<DomainResult<Vec<_>>>()?,
        ),
        Value::Object(map) => TrackedValue::Nested(props_from_json(Value::Object(map))?),
    })
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
