// platforms/android/core-ffi/src/table.rs

use std::collections::HashMap;
use std::os::raw::c_char;

use greet_core::BindingConfig;

/// 导出给宿主的 native 函数原型：无参，返回本库分配的 C 字符串
pub type NativeFn = extern "C" fn() -> *const c_char;

#[derive(Clone, Copy)]
pub struct NativeEntry {
    pub operation: &'static str,
    pub native: NativeFn,
}

#[derive(Debug, Clone, serde::Serialize, PartialEq)]
pub struct BoundName {
    pub class_name: String,
    pub operation: String,
    pub qualified_name: String,
    pub symbol: String,
}

/**
 * native 函数表。
 *
 * 键可以是逻辑名（getGreeting）、限定名（com.x.Cls.getGreeting）
 * 或 JNI 符号名（Java_com_x_Cls_getGreeting）。
 * 只增不删：已经解析出去的名字一直有效。
 */
pub struct NativeTable {
    natives: &'static [NativeEntry],
    by_name: HashMap<String, NativeEntry>,
    bound: Vec<BoundName>,
    classes: Vec<String>,
}

impl NativeTable {
    pub fn new(natives: &'static [NativeEntry], binding: &BindingConfig) -> Self {
        let mut t = Self {
            natives,
            by_name: HashMap::new(),
            bound: Vec::new(),
            classes: Vec::new(),
        };
        for e in natives {
            t.by_name.insert(e.operation.to_string(), *e);
        }
        t.bind(binding);
        t
    }

    /// 追加一个宿主类的绑定；重复绑定同一个类返回 false
    pub fn bind(&mut self, binding: &BindingConfig) -> bool {
        if self.classes.iter().any(|c| c == &binding.class_name) {
            return false;
        }
        self.classes.push(binding.class_name.clone());

        for e in self.natives {
            let qualified_name = binding.qualified_name(e.operation);
            let symbol = binding.native_symbol(e.operation);
            self.by_name.insert(qualified_name.clone(), *e);
            self.by_name.insert(symbol.clone(), *e);
            self.bound.push(BoundName {
                class_name: binding.class_name.clone(),
                operation: e.operation.to_string(),
                qualified_name,
                symbol,
            });
        }
        true
    }

    pub fn resolve(&self, name: &str) -> Option<NativeEntry> {
        self.by_name.get(name).copied()
    }

    pub fn bound(&self) -> &[BoundName] {
        &self.bound
    }

    /// 某个宿主类名下的绑定（类名精确匹配）
    pub fn bound_for(&self, class_name: &str) -> Vec<BoundName> {
        self.bound
            .iter()
            .filter(|b| b.class_name == class_name)
            .cloned()
            .collect()
    }
}
