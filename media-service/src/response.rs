/// Success envelope returned by every engine operation
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status_code: u16,
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T> {
    /// 200 envelope
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            data,
            message: message.into(),
        }
    }

    /// 201 envelope for freshly created entities
    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self {
            status_code: 201,
            data,
            message: message.into(),
        }
    }
}
