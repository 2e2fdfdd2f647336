use super::super::*;
use std::ffi::{CStr, CString};
use std::thread;

unsafe fn take_string(p: *const c_char) -> String {
    assert!(!p.is_null());
    let s = CStr::from_ptr(p).to_string_lossy().into_owned();
    gb_free_string(p);
    s
}

unsafe fn take_json(p: *const c_char) -> serde_json::Value {
    serde_json::from_str(&take_string(p)).unwrap()
}

fn c(s: &str) -> CString {
    CString::new(s).unwrap()
}

#[test]
fn ffi_get_greeting_returns_literal() {
    unsafe {
        let g = take_string(gb_get_greeting());
        assert_eq!(g, greet_core::GREETING);
        assert!(!g.is_empty());
    }
}

#[test]
fn ffi_get_greeting_tight_loop() {
    unsafe {
        for _ in 0..10_000 {
            let p = gb_get_greeting();
            assert_eq!(CStr::from_ptr(p).to_str().unwrap(), greet_core::GREETING);
            gb_free_string(p);
        }
    }
}

#[test]
fn ffi_get_greeting_concurrent() {
    let handles: Vec<_> = (0..8)
        .map(|_| {
            thread::spawn(|| unsafe {
                (0..500).all(|_| take_string(gb_get_greeting()) == greet_core::GREETING)
            })
        })
        .collect();

    for h in handles {
        assert!(h.join().unwrap());
    }
}

#[test]
fn ffi_free_null_is_noop() {
    gb_free_string(std::ptr::null());
}

#[test]
fn ffi_lookup_default_symbol_calls_through() {
    unsafe {
        let sym = c("Java_com_clipbridge_greet_NativeGreeter_getGreeting");
        let f = gb_lookup(sym.as_ptr()).expect("symbol registered at load");
        assert_eq!(take_string(f()), greet_core::GREETING);

        let qualified = c("com.clipbridge.greet.NativeGreeter.getGreeting");
        assert!(gb_lookup(qualified.as_ptr()).is_some());
    }
}

#[test]
fn ffi_lookup_unknown_or_null() {
    let unknown = c("Java_com_clipbridge_greet_NativeGreeter_getFarewell");
    assert!(gb_lookup(unknown.as_ptr()).is_none());
    assert!(gb_lookup(std::ptr::null()).is_none());
}

#[test]
fn ffi_init_adds_binding() {
    unsafe {
        let cfg = c(r#"{"class_name":"com.example.hello.Hello_Jni","log_level":"debug"}"#);
        let v = take_json(gb_init(cfg.as_ptr()));
        assert!(v["ok"].as_bool().unwrap());
        assert_eq!(v["data"]["class_name"].as_str().unwrap(), "com.example.hello.Hello_Jni");
        assert_eq!(
            v["data"]["operations"][0]["symbol"].as_str().unwrap(),
            "Java_com_example_hello_Hello_1Jni_getGreeting"
        );

        let sym = c("Java_com_example_hello_Hello_1Jni_getGreeting");
        let f = gb_lookup(sym.as_ptr()).unwrap();
        assert_eq!(take_string(f()), greet_core::GREETING);

        // 默认绑定仍然有效
        let old = c("Java_com_clipbridge_greet_NativeGreeter_getGreeting");
        assert!(gb_lookup(old.as_ptr()).is_some());

        // 再次初始化同一个类不会报错
        let v2 = take_json(gb_init(cfg.as_ptr()));
        assert!(v2["ok"].as_bool().unwrap());
        assert_eq!(v2["data"]["operations"].as_array().unwrap().len(), 1);
    }
}

#[test]
fn ffi_init_reports_only_its_own_class() {
    unsafe {
        let inner = c(r#"{"class_name":"org.p.Outer.Inner"}"#);
        let v = take_json(gb_init(inner.as_ptr()));
        assert!(v["ok"].as_bool().unwrap());

        let outer = c(r#"{"class_name":"org.p.Outer"}"#);
        let v = take_json(gb_init(outer.as_ptr()));
        assert!(v["ok"].as_bool().unwrap());
        let ops = v["data"]["operations"].as_array().unwrap();
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0]["qualified_name"].as_str().unwrap(), "org.p.Outer.getGreeting");
        assert_eq!(ops[0]["symbol"].as_str().unwrap(), "Java_org_p_Outer_getGreeting");
    }
}

#[test]
fn ffi_init_rejects_bad_input() {
    unsafe {
        let v = take_json(gb_init(std::ptr::null()));
        assert!(!v["ok"].as_bool().unwrap());
        assert_eq!(v["error"]["code"].as_str().unwrap(), "FFI_ERR");
        assert_eq!(v["error"]["message"].as_str().unwrap(), "null c string");

        let bad = c(r#"{"class_name":"com..Broken"}"#);
        let v = take_json(gb_init(bad.as_ptr()));
        assert!(!v["ok"].as_bool().unwrap());
        assert!(v["error"]["message"].as_str().unwrap().contains("malformed class_name"));

        let junk = c("{not json");
        let v = take_json(gb_init(junk.as_ptr()));
        assert!(!v["ok"].as_bool().unwrap());
    }
}

#[test]
fn ffi_invoke_by_any_name() {
    unsafe {
        for name in [
            "getGreeting",
            "com.clipbridge.greet.NativeGreeter.getGreeting",
            "Java_com_clipbridge_greet_NativeGreeter_getGreeting",
        ] {
            let n = c(name);
            let v = take_json(gb_invoke(n.as_ptr()));
            assert!(v["ok"].as_bool().unwrap(), "{name}");
            assert_eq!(v["data"].as_str().unwrap(), greet_core::GREETING);
        }
    }
}

#[test]
fn ffi_invoke_unknown_is_error_envelope() {
    unsafe {
        let n = c("getFarewell");
        let v = take_json(gb_invoke(n.as_ptr()));
        assert!(!v["ok"].as_bool().unwrap());
        assert_eq!(v["error"]["code"].as_str().unwrap(), "FFI_ERR");
        assert_eq!(
            v["error"]["message"].as_str().unwrap(),
            "unknown operation: getFarewell"
        );
    }
}

#[test]
fn ffi_list_operations_includes_default_binding() {
    unsafe {
        let v = take_json(gb_list_operations());
        assert!(v["ok"].as_bool().unwrap());
        assert_eq!(v["data"]["operations"], serde_json::json!(["getGreeting"]));
        let bindings = v["data"]["bindings"].as_array().unwrap();
        assert!(bindings.iter().any(|o| {
            o["class_name"] == "com.clipbridge.greet.NativeGreeter"
                && o["operation"] == "getGreeting"
                && o["qualified_name"] == "com.clipbridge.greet.NativeGreeter.getGreeting"
                && o["symbol"] == "Java_com_clipbridge_greet_NativeGreeter_getGreeting"
        }));
    }
}

#[test]
fn ffi_version() {
    let (mut major, mut minor) = (0u32, 9u32);
    gb_get_ffi_version(&mut major, &mut minor);
    assert_eq!((major, minor), (1, 0));
    gb_get_ffi_version(std::ptr::null_mut(), std::ptr::null_mut());
}
