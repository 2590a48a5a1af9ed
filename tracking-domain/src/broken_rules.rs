//! 破坏规则（Broken Rule）收集
//!
//! 业务规则违规以数据形式记录与查询，而非异常：
//! - `BrokenRule`：一次违规（属性、消息、严重级别），创建后不可变；
//! - `BrokenRules`：一次校验通道内的收集器，每次校验先清空再重填；
//! - `RuleSet`：把规约（`Specification`）登记为具名规则并批量评估。
//!
//! 有效性策略：仅 `Severity::Error` 影响 `is_valid`，`Warning` 仅报告。
//!
use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::specification::Specification;

/// 违规严重级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

/// 一条业务规则违规记录，创建后不可变
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokenRule {
    #[builder(into)]
    property: String,
    #[builder(into)]
    message: String,
    severity: Severity,
}

impl BrokenRule {
    pub fn new(
        property: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            property: property.into(),
            message: message.into(),
            severity,
        }
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }
}

/// 单次校验通道的违规收集器
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrokenRules {
    items: Vec<BrokenRule>,
}

impl BrokenRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一条违规记录
    pub fn add(
        &mut self,
        property: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
    ) {
        self.items.push(BrokenRule::new(property, message, severity));
    }

    /// 追加一条已构造的违规记录
    pub fn push(&mut self, rule: BrokenRule) {
        self.items.push(rule);
    }

    /// 合并另一个收集器的全部记录（用于聚合值对象的级联收集）
    pub fn merge(&mut self, other: BrokenRules) {
        self.items.extend(other.items);
    }

    pub fn items(&self) -> &[BrokenRule] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 是否存在 Error 级违规（Warning 不计入）
    pub fn has_errors(&self) -> bool {
        self.items
            .iter()
            .any(|rule| rule.severity() == Severity::Error)
    }

    /// 清空全部记录；每次校验通道开始前调用
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// 规则登记项：规约 + 违规描述
struct Rule<T> {
    property: String,
    message: String,
    severity: Severity,
    spec: Box<dyn Specification<T>>,
}

/// 已注册规则检查的集合
///
/// `evaluate` 对候选对象重跑全部登记规则，未满足者各记一条违规。
pub struct RuleSet<T> {
    rules: Vec<Rule<T>>,
}

impl<T> RuleSet<T> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// 登记一条规则（链式）
    pub fn add(
        mut self,
        property: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
        spec: impl Specification<T> + 'static,
    ) -> Self {
        self.rules.push(Rule {
            property: property.into(),
            message: message.into(),
            severity,
            spec: Box::new(spec),
        });
        self
    }

    /// 评估候选对象，把每条未满足规则的违规记入通知对象
    pub fn evaluate(&self, candidate: &T, notification: &mut BrokenRules) {
        for rule in &self.rules {
            if !rule.spec.is_satisfied_by(candidate) {
                notification.add(rule.property.clone(), rule.message.clone(), rule.severity);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<T> Default for RuleSet<T> {
    fn default() -> Self {
        Self::new()
    }
}
