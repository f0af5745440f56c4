// Typed views of the scanner's JSON responses.
//
// Firmware revisions add and drop fields, so everything except a scan's
// name is optional and unrecognized keys are kept in `extra`.

use serde::{Deserialize, Serialize};

/// `GET /hello.json`: basic device status.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Hello {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "firmwareWiFi")]
    pub firmware_wifi: Option<String>,
    #[serde(default)]
    pub has_password: Option<bool>,
    #[serde(default, rename = "MAC")]
    pub mac: Option<String>,
    /// "AP" when the scanner hosts its own network, "Client" when joined.
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// `GET /hello_extra.json`: scanner-side firmware and power state.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HelloExtra {
    #[serde(default)]
    pub firmware: Option<String>,
    #[serde(default)]
    pub connected_to_external_power: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One entry of `GET /scans.json`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ScanEntry {
    /// Path on the scanner's card, usable as a scan identifier.
    pub name: String,
    /// Size in bytes.
    #[serde(default)]
    pub size: Option<u64>,
    /// Modification time as reported by the device (`YYYY-MM-DD HH:MM:SS`).
    #[serde(default)]
    pub modified: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn hello_decodes_device_field_names() {
        let hello: Hello = serde_json::from_value(json!({
            "model": "DX250",
            "name": "Doxie_042D6A",
            "firmwareWiFi": "1.29",
            "hasPassword": true,
            "MAC": "00:11:E5:04:2D:6A",
            "mode": "Client",
            "network": "HomeNet",
            "ip": "192.168.1.20",
            "connectedToAP": true
        }))
        .unwrap();

        assert_eq!(hello.model.as_deref(), Some("DX250"));
        assert_eq!(hello.firmware_wifi.as_deref(), Some("1.29"));
        assert_eq!(hello.has_password, Some(true));
        assert_eq!(hello.mac.as_deref(), Some("00:11:E5:04:2D:6A"));
        assert_eq!(hello.extra.get("connectedToAP"), Some(&json!(true)));
    }

    #[test]
    fn hello_tolerates_missing_fields() {
        let hello: Hello = serde_json::from_value(json!({ "model": "DX300" })).unwrap();
        assert_eq!(hello.model.as_deref(), Some("DX300"));
        assert!(hello.ip.is_none());
        assert!(hello.extra.is_empty());
    }

    #[test]
    fn hello_extra_decodes() {
        let extra: HelloExtra = serde_json::from_value(json!({
            "firmware": "0.29",
            "connectedToExternalPower": false
        }))
        .unwrap();
        assert_eq!(extra.firmware.as_deref(), Some("0.29"));
        assert_eq!(extra.connected_to_external_power, Some(false));
    }

    #[test]
    fn scan_entries_decode() {
        let scans: Vec<ScanEntry> = serde_json::from_value(json!([
            { "name": "/DOXIE/JPEG/IMG_0001.JPG", "size": 241_518, "modified": "2010-05-01 00:10:34" },
            { "name": "/DOXIE/PDF/IMG_0002.PDF" }
        ]))
        .unwrap();

        assert_eq!(scans.len(), 2);
        assert_eq!(scans[0].size, Some(241_518));
        assert_eq!(scans[0].modified.as_deref(), Some("2010-05-01 00:10:34"));
        assert_eq!(scans[1].size, None);
    }
}
