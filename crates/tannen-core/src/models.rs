//! Response models shared between the API server and its clients.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response body of the multipart upload endpoint.
///
/// `count` is the number of body photos written; the top photo is not
/// included in the count.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EndpointUploadResponse {
    pub success: bool,
    pub count: usize,
}

/// Stored photo names, in display order (`top.jpg` first, then `1.jpg`, …).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PhotoListResponse {
    pub photos: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_response_serializes_to_the_endpoint_contract() {
        let response = EndpointUploadResponse {
            success: true,
            count: 2,
        };
        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(json, serde_json::json!({"success": true, "count": 2}));
    }
}
