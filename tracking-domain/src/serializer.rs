//! 聚合序列化投影
//!
//! 把聚合 + 跟踪状态 + 违规记录投影为三种只读视图：
//! - `to_plain_object`：面向持久化/传输的浅投影（不含簿记键）；
//! - `to_full_object`：含跟踪状态与违规记录的诊断/审计投影；
//! - `frozen_copy`：时间点不可变快照（乐观并发对比、审计日志）。
//!
//! 三者都是纯投影，从不修改源聚合、跟踪状态或违规集合。
//!
use serde::Serialize;
use serde_json::{Map, Value};

use crate::aggregate::AggregateRoot;
use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use crate::tracking::TrackingState;
use crate::tracking::change_detector::json_kind;

/// 聚合的时间点不可变快照
///
/// 只提供读取访问，没有任何修改入口。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrozenAggregate {
    id: String,
    tracking_state: TrackingState,
    props: Value,
}

impl FrozenAggregate {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tracking_state(&self) -> &TrackingState {
        &self.tracking_state
    }

    pub fn props(&self) -> &Value {
        &self.props
    }
}

/// 聚合投影扩展；对全部 `AggregateRoot` 生效
pub trait AggregateSerializer: AggregateRoot {
    /// 浅投影：`{ id, version, ...props, is_valid }`，
    /// 不含 `tracking_state` 与 `broken_rules` 键
    fn to_plain_object(&self) -> DomainResult<Value> {
        let mut map = serialized_fields(self)?;
        map.insert("is_valid".to_string(), Value::Bool(self.is_valid()));
        Ok(Value::Object(map))
    }

    /// 完整投影：浅投影 + `tracking_state` + `broken_rules`
    fn to_full_object(&self) -> DomainResult<Value> {
        let mut map = serialized_fields(self)?;
        map.insert("is_valid".to_string(), Value::Bool(self.is_valid()));
        map.insert(
            "tracking_state".to_string(),
            serde_json::to_value(self.tracking_state())?,
        );
        map.insert(
            "broken_rules".to_string(),
            serde_json::to_value(self.broken_rules().items())?,
        );
        Ok(Value::Object(map))
    }

    /// 不可变时间点快照：`{ id, tracking_state, props }`
    fn frozen_copy(&self) -> DomainResult<FrozenAggregate> {
        let mut map = serialized_fields(self)?;
        map.remove("id");
        map.remove("version");
        Ok(FrozenAggregate {
            id: self.id().to_string(),
            tracking_state: *self.tracking_state(),
            props: Value::Object(map),
        })
    }
}

impl<A: AggregateRoot> AggregateSerializer for A {}

/// 聚合的 serde 投影必须是对象（簿记字段经 `#[serde(skip)]` 已排除）
fn serialized_fields<A>(aggregate: &A) -> DomainResult<Map<String, Value>>
where
    A: AggregateRoot + ?Sized,
{
    match serde_json::to_value(aggregate)? {
        Value::Object(map) => Ok(map),
        other => Err(DomainError::TypeMismatch {
            expected: "object".to_string(),
            found: json_kind(&other).to_string(),
        }),
    }
}
