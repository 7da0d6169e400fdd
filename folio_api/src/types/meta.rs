use serde::{Deserialize, Serialize};

/// List envelope returned by the admin collection endpoints.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    /// Total rows on the server, when the endpoint reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
}

/// Single-item envelope.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DataResponse<T> {
    pub data: T,
}

/// Acknowledgement returned by delete and status-change endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
