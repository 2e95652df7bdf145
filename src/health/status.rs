//! Static service status served on `/health`.

use chrono::Utc;
use serde::Serialize;

use crate::http::response::format_timestamp;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointIndex {
    pub hu: &'static str,
    pub hu_with_key: &'static str,
    pub md5: &'static str,
    pub md5_with_key: &'static str,
    pub flexible: &'static str,
}

pub const ENDPOINTS: EndpointIndex = EndpointIndex {
    hu: "/api/tx",
    hu_with_key: "/api/cutools/hu/with-key?key=YOUR_KEY",
    md5: "/api/md5",
    md5_with_key: "/api/cutools/md5/with-key?key=YOUR_KEY",
    flexible: "/api/all?type=lc79_hu&key=YOUR_KEY",
};

#[derive(Debug, Clone, Serialize)]
pub struct ServiceStatus {
    pub status: &'static str,
    pub message: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    pub endpoints: EndpointIndex,
}

impl ServiceStatus {
    pub fn current() -> Self {
        Self {
            status: "ok",
            message: "proxy server is running",
            version: env!("CARGO_PKG_VERSION"),
            timestamp: format_timestamp(Utc::now()),
            endpoints: ENDPOINTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_lists_endpoints() {
        let value = serde_json::to_value(ServiceStatus::current()).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["endpoints"]["huWithKey"], "/api/cutools/hu/with-key?key=YOUR_KEY");
        assert_eq!(value["endpoints"]["md5"], "/api/md5");
        assert!(value["timestamp"].as_str().unwrap().ends_with('Z'));
    }
}
