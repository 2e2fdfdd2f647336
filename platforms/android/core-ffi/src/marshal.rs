// platforms/android/core-ffi/src/marshal.rs
//
// Rust 字符串 <-> C 字符串。
// 交给壳侧的指针所有权随返回值转移，壳侧用完必须调用 gb_free_string。

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use anyhow::Context;

pub fn cstr_to_str<'a>(p: *const c_char) -> anyhow::Result<&'a str> {
    if p.is_null() {
        anyhow::bail!("null c string");
    }
    let s = unsafe { CStr::from_ptr(p) }.to_str().context("c string is not utf-8")?;
    Ok(s)
}

/// String -> 堆上的 C 字符串。内部含 NUL 时报错。
pub fn into_raw(s: String) -> anyhow::Result<*const c_char> {
    let c = CString::new(s).context("string contains interior nul")?;
    Ok(c.into_raw())
}

/// 回收 `into_raw` 交出去的指针
///
/// # Safety
/// `p` 必须来自本库的 `into_raw`，且只能释放一次。
pub unsafe fn free_raw(p: *const c_char) {
    if p.is_null() {
        return;
    }
    drop(CString::from_raw(p as *mut c_char));
}
