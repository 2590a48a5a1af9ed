//! 过程宏（tracking-macros）
//!
//! 为 `tracking-domain` 提供声明式接入：注入跟踪簿记字段、合并标准
//! 派生并生成 `Entity`/`Tracked` 实现。注册表元数据不在此处附着；
//! 类型标识通过 `tracking_domain::registry` 的显式注册分配。
//!
use proc_macro::TokenStream;

mod aggregate;
mod derive_utils;
mod field_utils;
mod identity;
mod value_object;

/// 聚合宏
/// - 追加字段（若缺失）并置于最前：`id: IdType`、`version: usize`、
///   `#[serde(skip)] tracking`、`#[serde(skip)] broken_rules`
/// - 自动实现 `Entity`（new/id/version）与 `Tracked`（簿记字段访问）
/// - 支持参数：`#[aggregate(id = IdType, debug = true|false)]`，`id` 默认 `String`
#[proc_macro_attribute]
pub fn aggregate(attr: TokenStream, item: TokenStream) -> TokenStream {
    aggregate::expand(attr, item)
}

/// 值对象宏
/// - 合并派生：Debug（可控）、Default、Clone、Serialize、Deserialize、PartialEq、Eq
/// - 支持结构体与枚举；参数：`#[value_object(debug = true|false)]`
#[proc_macro_attribute]
pub fn value_object(attr: TokenStream, item: TokenStream) -> TokenStream {
    value_object::expand(attr, item)
}

/// 标识宏
/// 用于单字段 `tuple struct` 标识类型：合并标识派生并实现
/// `Display`/`FromStr`（委托内部类型）
#[proc_macro_attribute]
pub fn identity(attr: TokenStream, item: TokenStream) -> TokenStream {
    identity::expand(attr, item)
}
