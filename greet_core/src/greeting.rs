// greet_core/src/greeting.rs

use anyhow::Context;

/// 固定问候语。内容本身没有业务含义，只要求一旦选定就保持不变。
pub const GREETING: &str = "Hello, World from Rust!";

/**
 * 问候语提供者。
 *
 * 无状态、可重入：每次调用都分配一份新的、由调用方独占的字符串，
 * 多线程并发调用无需任何同步。
 */
#[derive(Clone, Copy, Debug, Default)]
pub struct GreetingProvider;

impl GreetingProvider {
    pub fn new() -> Self {
        Self
    }

    /// 宿主侧的 `getGreeting()`。分配失败按 Rust 默认行为直接 abort。
    pub fn get_greeting(&self) -> String {
        GREETING.to_owned()
    }

    /// 与 `get_greeting` 返回同一个值，但把分配失败作为错误交给调用方。
    pub fn try_get_greeting(&self) -> anyhow::Result<String> {
        let mut s = String::new();
        s.try_reserve_exact(GREETING.len())
            .context("allocate greeting")?;
        s.push_str(GREETING);
        Ok(s)
    }
}

/// 注册表里使用的无参入口
pub fn greeting_op() -> anyhow::Result<String> {
    GreetingProvider::new().try_get_greeting()
}
