//! 值对象（Value Object）
//!
//! 无标识、以值相等为准的不可变对象：
//! - 相等性由 `equality_components` 声明的有序分量决定（见 `equality` 模块）；
//! - 构造入参的结构性错误（空串、非法格式等）在构造时快速失败（`InvalidArgument`）；
//! - 业务规则在构造后通过 `check_rules` 记录为 `BrokenRule`，不抛出。
//!
use crate::broken_rules::BrokenRules;
use crate::equality::EqualityComponent;

/// 值对象抽象
///
/// # 示例
///
/// ```
/// use tracking_domain::broken_rules::{BrokenRules, Severity};
/// use tracking_domain::equality::{structural_equals, EqualityComponent};
/// use tracking_domain::error::{DomainError, DomainResult};
/// use tracking_domain::value_object::ValueObject;
///
/// struct Money {
///     amount: i64,
///     currency: String,
/// }
///
/// impl Money {
///     fn new(amount: i64, currency: &str) -> DomainResult<Self> {
///         if currency.trim().is_empty() {
///             return Err(DomainError::InvalidArgument {
///                 reason: "currency must not be empty".into(),
///             });
///         }
///         Ok(Self { amount, currency: currency.to_string() })
///     }
/// }
///
/// impl ValueObject for Money {
///     fn equality_components(&self) -> Vec<EqualityComponent> {
///         vec![self.amount.into(), self.currency.clone().into()]
///     }
///
///     fn check_rules(&self, notification: &mut BrokenRules) {
///         if self.amount < 0 {
///             notification.add("amount", "amount must not be negative", Severity::Error);
///         }
///     }
/// }
///
/// let a = Money::new(10, "USD").unwrap();
/// let b = Money::new(10, "USD").unwrap();
/// assert!(structural_equals(&a, &b));
/// assert!(!structural_equals(&a, &Money::new(10, "EUR").unwrap()));
///
/// // 结构性错误快速失败
/// assert!(matches!(
///     Money::new(1, "  "),
///     Err(DomainError::InvalidArgument { .. })
/// ));
///
/// // 业务规则记录为数据，不抛出
/// let debt = Money::new(-5, "USD").unwrap();
/// assert!(!debt.is_valid());
/// ```
pub trait ValueObject {
    /// 声明参与相等比较的有序分量
    fn equality_components(&self) -> Vec<EqualityComponent>;

    /// 检查业务规则，违规项记入通知对象
    fn check_rules(&self, notification: &mut BrokenRules) {
        let _ = notification;
    }

    /// 当前值是否满足全部 Error 级规则
    fn is_valid(&self) -> bool {
        let mut notification = BrokenRules::new();
        self.check_rules(&mut notification);
        !notification.has_errors()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broken_rules::Severity;

    struct FullName {
        first: String,
        last: String,
    }

    impl ValueObject for FullName {
        fn equality_components(&self) -> Vec<EqualityComponent> {
            vec![self.first.clone().into(), self.last.clone().into()]
        }

        fn check_rules(&self, notification: &mut BrokenRules) {
            if self.first.trim().is_empty() {
                notification.add("first", "first name must not be empty", Severity::Error);
            }
            if self.last.trim().is_empty() {
                notification.add("last", "last name is recommended", Severity::Warning);
            }
        }
    }

    // 测试 Error 级违规使值对象无效
    #[test]
    fn test_error_rule_invalidates() {
        let name = FullName {
            first: "".into(),
            last: "Jackson".into(),
        };
        assert!(!name.is_valid());
    }

    // 测试 Warning 级违规不影响有效性
    #[test]
    fn test_warning_rule_keeps_valid() {
        let name = FullName {
            first: "Michael".into(),
            last: "".into(),
        };
        assert!(name.is_valid());

        let mut notification = BrokenRules::new();
        name.check_rules(&mut notification);
        assert_eq!(notification.items().len(), 1);
        assert_eq!(notification.items()[0].severity(), Severity::Warning);
    }
}
