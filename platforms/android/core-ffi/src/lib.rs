mod bridge;
mod error;
mod marshal;
mod table;

use std::os::raw::c_char;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{PoisonError, RwLock, RwLockReadGuard};

use greet_core::{BindingConfig, GreetingProvider, OperationRegistry, GET_GREETING};
use once_cell::sync::Lazy;

use crate::error::{err_json, ok_json, ErrorCode};
pub use crate::table::NativeFn;
use crate::table::{NativeEntry, NativeTable};

// --- 捕获 Panic 和 Result，统一转成 JSON 信封 ---
macro_rules! ffi_safe {
    ($body:block) => {{
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let run = (|| -> anyhow::Result<String> {
                $body
            })();

            match run {
                Ok(s) => crate::ret(s),
                Err(e) => {
                    tracing::warn!(error = %format!("{e:#}"), "ffi call failed");
                    crate::ret(err_json(ErrorCode::FfiErr, &format!("{e:#}")))
                }
            }
        }));

        match result {
            Ok(ptr) => ptr,
            Err(_) => {
                tracing::error!("panic caught at ffi boundary");
                crate::ret(err_json(ErrorCode::Panic, "Rust panicked internally"))
            }
        }
    }};
}

// 宿主可直接绑定的 native 函数；加载时登记
static NATIVES: &[NativeEntry] = &[NativeEntry {
    operation: GET_GREETING,
    native: gb_get_greeting,
}];

static TABLE: Lazy<RwLock<NativeTable>> =
    Lazy::new(|| RwLock::new(NativeTable::new(NATIVES, &BindingConfig::default())));

fn table() -> RwLockReadGuard<'static, NativeTable> {
    TABLE.read().unwrap_or_else(PoisonError::into_inner)
}

/// 这一层的失败没有恢复意义
fn fatal(msg: &str) -> ! {
    tracing::error!(msg, "fatal error at ffi boundary, aborting");
    eprintln!("CRITICAL: {msg}");
    std::process::abort()
}

fn ret(s: String) -> *const c_char {
    marshal::into_raw(s).unwrap_or_else(|e| fatal(&format!("{e:#}")))
}

/// # `gb_free_string`
///
/// 释放本库返回给壳侧的字符串。传入空指针时什么也不做。
///
/// # 安全性
/// - 指针必须来自本库（`gb_get_greeting` / `gb_invoke` 等）。
/// - 同一个指针只能释放一次，释放后不得再使用。
#[no_mangle]
pub extern "C" fn gb_free_string(s: *const c_char) {
	unsafe { marshal::free_raw(s) }
}

/// # `gb_get_greeting`
///
/// 宿主侧 `getGreeting()` 的 native 实现。返回一个新分配的 UTF-8 C 字符串，
/// 所有权交给调用方，用完调用 `gb_free_string`。
///
/// 分配失败或内部 panic 视为致命错误，直接 abort。
#[no_mangle]
pub extern "C" fn gb_get_greeting() -> *const c_char {
	match panic::catch_unwind(|| ret(GreetingProvider::new().get_greeting())) {
		Ok(p) => p,
		Err(_) => fatal("panic in gb_get_greeting"),
	}
}

/// # `gb_init`
///
/// 解析绑定配置（JSON，字段均可省略），安装日志，并把该宿主类的名字登记进 native 表。
///
/// 日志只在第一次调用时安装，之后的 `log_level` 不再生效；
/// 返回的 `logging` 表示本次请求的级别是否就是当前生效的级别。
///
/// ```json
/// { "class_name": "com.example.hello.HelloJni", "log_level": "debug" }
/// ```
#[no_mangle]
pub extern "C" fn gb_init(cfg_json: *const c_char) -> *const c_char {
	ffi_safe!({
        let cfg_s = marshal::cstr_to_str(cfg_json)?;
        let cfg = bridge::parse_cfg(cfg_s)?;

        let logging = bridge::init_logging(&cfg.log_level);
        let added = TABLE
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .bind(&cfg);
        tracing::info!(class_name = %cfg.class_name, added, "binding registered");

        let bound = table().bound_for(&cfg.class_name);

        Ok(ok_json(serde_json::json!({
            "class_name": cfg.class_name,
            "logging": logging,
            "operations": bound
        })))
    })
}

/// # `gb_lookup`
///
/// 按逻辑名、限定名或 JNI 符号名查找 native 函数指针。找不到、名字为空指针或非 UTF-8 时返回 NULL。
#[no_mangle]
pub extern "C" fn gb_lookup(name: *const c_char) -> Option<NativeFn> {
	let found = panic::catch_unwind(|| {
		let name = match marshal::cstr_to_str(name) {
			Ok(s) => s,
			Err(e) => {
				tracing::warn!(error = %e, "gb_lookup rejected name");
				return None;
			}
		};
		let entry = table().resolve(name);
		tracing::debug!(name, found = entry.is_some(), "gb_lookup");
		entry.map(|e| e.native)
	});
	found.ok().flatten()
}

/// # `gb_invoke`
///
/// 按名字调用已注册的操作，结果包在 JSON 信封里：`{"ok":true,"data":"..."}`。
#[no_mangle]
pub extern "C" fn gb_invoke(name: *const c_char) -> *const c_char {
	ffi_safe!({
        let name = marshal::cstr_to_str(name)?;
        let op = table()
            .resolve(name)
            .map(|e| e.operation)
            .unwrap_or(name);

        let out = OperationRegistry::global().invoke(op)?;
        Ok(ok_json(out))
    })
}

/// # `gb_list_operations`
///
/// `operations` 是注册表里的逻辑名，`bindings` 是每个宿主类下导出的名字。
#[no_mangle]
pub extern "C" fn gb_list_operations() -> *const c_char {
	ffi_safe!({
        let bindings = table().bound().to_vec();
        Ok(ok_json(serde_json::json!({
            "operations": OperationRegistry::global().names(),
            "bindings": bindings
        })))
    })
}

#[no_mangle]
pub extern "C" fn gb_get_ffi_version(major: *mut u32, minor: *mut u32) {
	unsafe {
		if !major.is_null() { *major = 1; }
		if !minor.is_null() { *minor = 0; }
	}
}

#[cfg(test)]
mod tests;
