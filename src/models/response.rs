//! 通用 API 响应模型
//!
//! 成功: `{code: 0, msg: "", list | data}`
//! 失败: `{code: "400" | "500", msg}`

use serde::Serialize;

/// 失败时返回给客户端的固定文案，具体原因只记录在服务端日志
pub const INTERNAL_ERROR_MSG: &str = "service internal error";

/// 统一成功响应结构
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub msg: String,
    /// 列表型接口的数据
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<Vec<T>>,
    /// 单对象接口的数据
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// 列表响应，空结果也序列化为 `[]`
    pub fn list(items: Vec<T>) -> Self {
        Self {
            code: 0,
            msg: String::new(),
            list: Some(items),
            data: None,
        }
    }

    /// 单对象响应
    pub fn data(item: T) -> Self {
        Self {
            code: 0,
            msg: String::new(),
            list: None,
            data: Some(item),
        }
    }
}

/// 统一错误响应结构
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub msg: String,
}

impl ErrorResponse {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            code: "400".to_string(),
            msg: msg.into(),
        }
    }

    pub fn internal() -> Self {
        Self {
            code: "500".to_string(),
            msg: INTERNAL_ERROR_MSG.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_is_not_null() {
        let value = serde_json::to_value(ApiResponse::<String>::list(Vec::new())).unwrap();
        assert_eq!(value, serde_json::json!({"code": 0, "msg": "", "list": []}));
    }

    #[test]
    fn test_error_codes_are_strings() {
        let value = serde_json::to_value(ErrorResponse::internal()).unwrap();
        assert_eq!(value["code"], "500");
        assert_eq!(value["msg"], INTERNAL_ERROR_MSG);

        let value = serde_json::to_value(ErrorResponse::bad_request("missing field `code`")).unwrap();
        assert_eq!(value["code"], "400");
    }
}
