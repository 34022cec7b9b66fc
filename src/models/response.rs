use serde::Serialize;

pub const USER_NOT_FOUND: &str = "USER_NOT_FOUND";
pub const PRODUCT_NOT_FOUND: &str = "PRODUCT_NOT_FOUND";
pub const USER_CREATE_FAILED: &str = "USER_CREATE_FAILED";

/// Uniform body for successes and soft failures. Not-found outcomes are
/// reported through this with `success: false` and an error code, while
/// conflicts, bad input and auth failures surface as plain HTTP errors.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error: None,
        }
    }

    pub fn fail(message: impl Into<String>, code: Option<&str>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            error: code.map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_omits_error_key() {
        let value = serde_json::to_value(ApiResponse::ok("done", 7)).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["data"], 7);
        assert!(value.get("error").is_none());
    }

    #[test]
    fn fail_carries_code_and_null_data() {
        let value =
            serde_json::to_value(ApiResponse::<()>::fail("missing", Some(USER_NOT_FOUND))).unwrap();

        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "USER_NOT_FOUND");
        assert!(value["data"].is_null());
    }

    #[test]
    fn fail_without_code_omits_error_key() {
        let value = serde_json::to_value(ApiResponse::<()>::fail("no file", None)).unwrap();

        assert_eq!(value["success"], false);
        assert!(value.get("error").is_none());
    }
}
