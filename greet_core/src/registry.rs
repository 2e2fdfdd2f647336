// greet_core/src/registry.rs

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::greeting::greeting_op;

/// 逻辑操作名：宿主侧声明的方法名
pub const GET_GREETING: &str = "getGreeting";

/// 无参、返回文本的操作
pub type Operation = fn() -> anyhow::Result<String>;

static DEFAULTS: Lazy<OperationRegistry> = Lazy::new(OperationRegistry::with_defaults);

/**
 * 操作注册表：逻辑名 → 实现。
 *
 * 构造完成后只读，可在多个线程间共享。
 */
#[derive(Clone, Debug, Default)]
pub struct OperationRegistry {
    ops: HashMap<String, Operation>,
}

impl OperationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut r = Self::new();
        r.register(GET_GREETING, greeting_op);
        r
    }

    /// 进程内共享的默认注册表
    pub fn global() -> &'static OperationRegistry {
        &DEFAULTS
    }

    /// 同名覆盖，返回旧实现
    pub fn register(&mut self, name: impl Into<String>, op: Operation) -> Option<Operation> {
        self.ops.insert(name.into(), op)
    }

    pub fn lookup(&self, name: &str) -> Option<Operation> {
        self.ops.get(name).copied()
    }

    pub fn invoke(&self, name: &str) -> anyhow::Result<String> {
        let op = self
            .lookup(name)
            .ok_or_else(|| anyhow::anyhow!("unknown operation: {name}"))?;
        tracing::debug!(operation = name, "invoke");
        op()
    }

    pub fn names(&self) -> Vec<&str> {
        let mut v: Vec<&str> = self.ops.keys().map(String::as_str).collect();
        v.sort_unstable();
        v
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}
