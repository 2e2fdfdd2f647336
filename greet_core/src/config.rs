use anyhow::Context;
use serde::{Deserialize, Serialize};

/// 宿主侧声明 native 方法的类（全限定名）
pub const DEFAULT_CLASS_NAME: &str = "com.clipbridge.greet.NativeGreeter";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/**
 * 绑定配置。
 *
 * 把"方法全名编码进 native 函数名"这条约定变成配置：
 * 只需给出宿主类名，限定名和导出符号名都由它推导。
 */
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingConfig {
    #[serde(default = "default_class_name")]
    pub class_name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_class_name() -> String {
    DEFAULT_CLASS_NAME.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            class_name: default_class_name(),
            log_level: default_log_level(),
        }
    }
}

impl BindingConfig {
    pub fn from_json(s: &str) -> anyhow::Result<Self> {
        let cfg: BindingConfig = serde_json::from_str(s).context("invalid binding config json")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let name = self.class_name.as_str();
        if name.is_empty() {
            anyhow::bail!("class_name must not be empty");
        }
        if name.split('.').any(|seg| seg.is_empty()) {
            anyhow::bail!("malformed class_name: {name}");
        }
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            anyhow::bail!("unknown log_level: {}", self.log_level);
        }
        Ok(())
    }

    /// `com.foo.Bar` + `getGreeting` -> `com.foo.Bar.getGreeting`
    pub fn qualified_name(&self, op: &str) -> String {
        format!("{}.{}", self.class_name, op)
    }

    /// JNI 短名：`Java_<mangled class>_<mangled method>`
    pub fn native_symbol(&self, op: &str) -> String {
        let class_path = self.class_name.replace('.', "/");
        format!("Java_{}_{}", mangle(&class_path), mangle(op))
    }
}

/// JNI 名称转义
pub fn mangle(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        match ch {
            '/' => out.push('_'),
            '_' => out.push_str("_1"),
            ';' => out.push_str("_2"),
            '[' => out.push_str("_3"),
            c if c.is_ascii_alphanumeric() => out.push(c),
            c => {
                let mut buf = [0u16; 2];
                for unit in c.encode_utf16(&mut buf) {
                    out.push_str(&format!("_0{:04x}", unit));
                }
            }
        }
    }
    out
}
