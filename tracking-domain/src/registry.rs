//! 类型注册表（Type Registry）
//!
//! 为事件/命令类型分配稳定标识。注册表是显式传入的对象，在进程启动时
//! 通过显式调用一次性填充；没有任何全局可变状态或注解副作用。
//! 重复注册与查询未注册类型都是错误。
//!
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::command::Command;
use crate::domain_event::DomainEvent;
use crate::error::{DomainError, DomainResult};

/// 描述符类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    Command,
    Event,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command => write!(f, "command"),
            Self::Event => write!(f, "event"),
        }
    }
}

/// 类型描述符：类别 + 类型名
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeDescriptor {
    kind: TypeKind,
    name: String,
}

impl TypeDescriptor {
    pub fn event(name: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::Event,
            name: name.into(),
        }
    }

    pub fn command(name: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::Command,
            name: name.into(),
        }
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.name)
    }
}

/// 注册表分配的稳定标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeId(u64);

impl TypeId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 显式类型注册表
///
/// 标识按注册顺序递增分配；进程启动时的一次性注册使其在进程生命周期
/// 内保持稳定。
///
/// # 示例
///
/// ```
/// use tracking_domain::registry::{TypeDescriptor, TypeRegistry};
///
/// let mut registry = TypeRegistry::new();
/// let id = registry.register(TypeDescriptor::event("singer.created")).unwrap();
/// assert_eq!(
///     registry.require(&TypeDescriptor::event("singer.created")).unwrap(),
///     id
/// );
///
/// // 重复注册是错误
/// assert!(registry.register(TypeDescriptor::event("singer.created")).is_err());
/// ```
#[derive(Debug, Default)]
pub struct TypeRegistry {
    assigned: HashMap<TypeDescriptor, TypeId>,
    next: u64,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册一个描述符并分配稳定标识
    pub fn register(&mut self, descriptor: TypeDescriptor) -> DomainResult<TypeId> {
        if self.assigned.contains_key(&descriptor) {
            return Err(DomainError::DuplicateRegistration {
                kind: descriptor.kind().to_string(),
                name: descriptor.name().to_string(),
            });
        }
        self.next += 1;
        let id = TypeId(self.next);
        self.assigned.insert(descriptor, id);
        Ok(id)
    }

    /// 按事件类型注册
    pub fn register_event<E: DomainEvent>(&mut self) -> DomainResult<TypeId> {
        self.register(TypeDescriptor::event(E::TYPE))
    }

    /// 按命令类型注册
    pub fn register_command<C: Command>(&mut self) -> DomainResult<TypeId> {
        self.register(TypeDescriptor::command(C::TYPE))
    }

    /// 查询已分配的标识
    pub fn lookup(&self, descriptor: &TypeDescriptor) -> Option<TypeId> {
        self.assigned.get(descriptor).copied()
    }

    /// 查询已分配的标识；未注册视为错误
    pub fn require(&self, descriptor: &TypeDescriptor) -> DomainResult<TypeId> {
        self.lookup(descriptor)
            .ok_or_else(|| DomainError::Unregistered {
                kind: descriptor.kind().to_string(),
                name: descriptor.name().to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}
