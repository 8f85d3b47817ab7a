// ── Read projections ──
//
// Pure builders that join configuration entries with live daemon state.
// Fetching lives on `Console`; these only combine what was fetched.

use chrono::{DateTime, Datelike, Utc};
use syncdeck_api::Connections;

use crate::model::{ConfigDocument, DeviceView, FolderStatus, FolderView};

/// One view per configured device, in document order.
///
/// Devices absent from the connections map are reported disconnected
/// with no last-seen time. The daemon's zero time (`0001-01-01`) for a
/// never-seen device also maps to no last-seen time.
pub fn device_views(doc: &ConfigDocument, connections: &Connections) -> Vec<DeviceView> {
    doc.devices
        .iter()
        .map(|device| {
            let conn = connections.get(&device.device_id);
            DeviceView::new(
                device,
                conn.is_some_and(|c| c.connected),
                conn.and_then(|c| c.at).filter(is_real_timestamp),
            )
        })
        .collect()
}

fn is_real_timestamp(at: &DateTime<Utc>) -> bool {
    at.year() > 1
}

/// One view per configured folder, pairing each with its status.
///
/// `statuses` must be in document order; a short list leaves the
/// remaining folders with an unknown status.
pub fn folder_views(doc: &ConfigDocument, statuses: Vec<FolderStatus>) -> Vec<FolderView> {
    let mut statuses = statuses.into_iter();
    doc.folders
        .iter()
        .map(|folder| {
            let status = statuses
                .next()
                .unwrap_or_else(|| FolderStatus::unavailable("No status reported"));
            FolderView::new(folder, status)
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::model::SyncState;
    use crate::sharing::tests::fixture;

    #[test]
    fn device_views_merge_connection_state() {
        let doc = fixture();
        let connections: Connections = serde_json::from_value(json!({
            "total": {},
            "connections": {
                "D1": { "connected": true, "at": "2026-03-01T12:00:00Z", "paused": false }
            }
        }))
        .unwrap();

        let views = device_views(&doc, &connections);

        assert_eq!(views.len(), 2);
        assert!(views[0].connected);
        assert_eq!(
            views[0].last_seen.unwrap().to_rfc3339(),
            "2026-03-01T12:00:00+00:00"
        );
        assert!(!views[1].connected);
        assert_eq!(views[1].last_seen, None);
    }

    #[test]
    fn zero_time_means_never_seen() {
        let doc = fixture();
        let connections: Connections = serde_json::from_value(json!({
            "connections": {
                "D1": { "connected": false, "at": "0001-01-01T00:00:00Z" },
                "D2": { "connected": false, "at": "2025-11-30T08:15:00Z" }
            }
        }))
        .unwrap();

        let views = device_views(&doc, &connections);

        assert_eq!(views[0].last_seen, None);
        assert!(views[1].last_seen.is_some());
        let value = serde_json::to_value(&views[0]).unwrap();
        assert_eq!(value["lastSeen"], serde_json::Value::Null);
    }

    #[test]
    fn device_view_wire_shape() {
        let doc = fixture();
        let views = device_views(&doc, &Connections::default());
        let value = serde_json::to_value(&views[1]).unwrap();

        assert_eq!(value["deviceID"], "D2");
        assert_eq!(value["connected"], false);
        assert_eq!(value["lastSeen"], serde_json::Value::Null);
        assert_eq!(value["compression"], "metadata");
    }

    #[test]
    fn folder_views_pair_statuses_in_order() {
        let doc = fixture();
        let statuses = vec![
            FolderStatus::from_report(json!({ "state": "idle" })),
            FolderStatus::unavailable("Failed to get status"),
        ];

        let views = folder_views(&doc, statuses);

        assert_eq!(views.len(), 3);
        assert_eq!(views[0].status.state, SyncState::Idle);
        assert_eq!(views[1].status.error.as_deref(), Some("Failed to get status"));
        assert_eq!(views[2].status.state, SyncState::Unknown);
        assert_eq!(views[0].devices.len(), 2);
    }
}
