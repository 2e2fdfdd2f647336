use serde::Serialize;

/// 信封里的错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// 业务返回的 anyhow 错误，包括入参不合法
    FfiErr,
    /// 边界上捕获到的 panic
    Panic,
}

pub fn err_json(code: ErrorCode, message: &str) -> String {
    serde_json::json!({
        "ok": false,
        "error": { "code": code, "message": message }
    })
        .to_string()
}

pub fn ok_json<T: Serialize>(data: T) -> String {
    serde_json::json!({
        "ok": true,
        "data": data
    })
        .to_string()
}
