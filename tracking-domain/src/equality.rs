//! 标识相等与结构相等
//!
//! 实体（聚合）按标识比较，值对象按声明的相等分量逐项比较，两者不可混用：
//! - `identity_equals`：两侧均缺失视为相等，任一侧缺失视为不等，否则按标识自身的值相等；
//! - `structural_equals` / `components_equal`：长度相同且逐对相等；
//! - `AggregateEquality::are_equal`：只委托标识相等，从不比较属性。
//!
//! 跨类型的标识碰撞在本设计中不可表达：泛型参数将比较固定在同一实体类型上。
//!
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// 值对象声明的单个相等分量
///
/// 浮点分量仅接受有限值（NaN/Infinity 在构造时被拒绝），
/// 时间戳分量按 epoch 毫秒比较。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EqualityComponent {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// epoch 毫秒
    Timestamp(i64),
}

impl EqualityComponent {
    /// 构造浮点分量，非有限值（NaN/Infinity）拒绝
    pub fn float(value: f64) -> DomainResult<Self> {
        if !value.is_finite() {
            return Err(DomainError::InvalidArgument {
                reason: format!("equality component must be finite, got {value}"),
            });
        }
        Ok(Self::Float(value))
    }
}

impl From<bool> for EqualityComponent {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for EqualityComponent {
    fn from(value: i32) -> Self {
        Self::Int(value as i64)
    }
}

impl From<i64> for EqualityComponent {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for EqualityComponent {
    fn from(value: u32) -> Self {
        Self::Int(value as i64)
    }
}

impl From<&str> for EqualityComponent {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for EqualityComponent {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Uuid> for EqualityComponent {
    fn from(value: Uuid) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<DateTime<Utc>> for EqualityComponent {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value.timestamp_millis())
    }
}

impl<T> From<Option<T>> for EqualityComponent
where
    T: Into<EqualityComponent>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => Self::Null,
        }
    }
}

/// 标识相等：两侧均缺失相等，任一侧缺失不等，否则按值比较
///
/// # 示例
///
/// ```
/// use tracking_domain::equality::identity_equals;
///
/// let a = "singer-1".to_string();
/// let b = "singer-1".to_string();
/// assert!(identity_equals(Some(&a), Some(&b)));
/// assert!(identity_equals::<String>(None, None));
/// assert!(!identity_equals(Some(&a), None));
/// ```
pub fn identity_equals<I: PartialEq>(a: Option<&I>, b: Option<&I>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(left), Some(right)) => left == right,
        _ => false,
    }
}

/// 相等分量列表比较：长度相同且逐对相等
pub fn components_equal(a: &[EqualityComponent], b: &[EqualityComponent]) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x == y)
}

/// 值对象结构相等：按声明的相等分量比较
pub fn structural_equals<T>(a: &T, b: &T) -> bool
where
    T: ValueObject + ?Sized,
{
    components_equal(&a.equality_components(), &b.equality_components())
}

/// 聚合（实体）相等性：只看标识，从不看属性
pub struct AggregateEquality;

impl AggregateEquality {
    /// 两个实体相等当且仅当标识相等；两侧均缺失视为相等
    pub fn are_equal<A: Entity>(left: Option<&A>, right: Option<&A>) -> bool {
        identity_equals(left.map(Entity::id), right.map(Entity::id))
    }
}
