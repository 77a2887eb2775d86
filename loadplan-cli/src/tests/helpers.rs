//! Fixtures for writing evaluation requests and fleets to a scratch directory.

use camino::{Utf8Path, Utf8PathBuf};
use loadplan_core::{Booking, CapacityProfile, Item};
use tempfile::TempDir;

use super::EvaluateRequest;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write fixture");
}

pub(super) fn workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

pub(super) fn item(id: &str, volume_m3: f64, weight_kg: f64) -> Item {
    Item::new(id, volume_m3, weight_kg).expect("valid item")
}

/// One booking moving a single item of the given size.
pub(super) fn single_item_request(volume_m3: f64, weight_kg: f64) -> EvaluateRequest {
    EvaluateRequest {
        bookings: vec![Booking::new("b1", "1 Mill Lane", "4 Quay Street", ["load"])],
        catalog: vec![item("load", volume_m3, weight_kg)],
    }
}

pub(super) fn write_request(path: &Utf8Path, request: &EvaluateRequest) {
    let payload = serde_json::to_string_pretty(request).expect("serialise request");
    write_utf8(path, payload.as_bytes());
}

pub(super) fn write_fleet(path: &Utf8Path, profiles: &[CapacityProfile]) {
    let payload = serde_json::to_string_pretty(profiles).expect("serialise fleet");
    write_utf8(path, payload.as_bytes());
}

/// A Luton van offered as standard and a larger lorry offered as `lorry`.
pub(super) fn luton_and_lorry() -> Vec<CapacityProfile> {
    vec![
        CapacityProfile::new("standard", 20.0, 1_000.0, 0.1).expect("standard profile"),
        CapacityProfile::new("lorry", 40.0, 3_500.0, 0.05).expect("lorry profile"),
    ]
}
