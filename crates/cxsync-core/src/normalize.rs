// ── Normalization ──
//
// Device-canonical forms of caller input. Desired records pass through
// these before they are compared with a read, so an unchanged
// declaration produces an empty patch set on every run.

use std::str::FromStr;

use serde_json::Value;
use similar::TextDiff;
use tracing::debug;

use crate::model::VlanMode;

// ── IPv4 address lists ──────────────────────────────────────────────

/// Switch ordering of an address list: the primary (first) address stays
/// in place and the secondaries are sorted lexically.
///
/// Idempotent: `canonical_ipv4(&canonical_ipv4(x)) == canonical_ipv4(x)`.
pub fn canonical_ipv4(addresses: &[String]) -> Vec<String> {
    let mut out = addresses.to_vec();
    if let Some(secondaries) = out.get_mut(1..) {
        secondaries.sort();
    }
    out
}

// ── VLAN mode aliasing ──────────────────────────────────────────────

/// Port mode as the switch stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum DeviceVlanMode {
    Access,
    Trunk,
    NativeTagged,
    NativeUntagged,
}

impl DeviceVlanMode {
    /// Expand a caller mode to the switch vocabulary.
    pub fn from_caller(mode: VlanMode, native_vlan_tag: bool) -> Self {
        match (mode, native_vlan_tag) {
            (VlanMode::Access, _) => Self::Access,
            (VlanMode::Trunk, true) => Self::NativeTagged,
            (VlanMode::Trunk, false) => Self::NativeUntagged,
        }
    }

    /// Fold back to the caller mode plus the native-tagged flag.
    pub fn to_caller(self) -> (VlanMode, bool) {
        match self {
            Self::Access => (VlanMode::Access, false),
            Self::NativeTagged => (VlanMode::Trunk, true),
            Self::Trunk | Self::NativeUntagged => (VlanMode::Trunk, false),
        }
    }

    /// Parse a switch-reported mode. Missing, empty or unknown values are
    /// treated as access.
    pub fn from_device(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => Self::Access,
            Some(v) => Self::from_str(v).unwrap_or_else(|_| {
                debug!(mode = v, "unknown vlan_mode from switch, treating as access");
                Self::Access
            }),
        }
    }
}

// ── Full configuration text ─────────────────────────────────────────

/// Stable text rendering of a configuration document.
pub fn canonical_config(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Canonicalize local file content: JSON is re-rendered, anything else is
/// compared as-is.
pub fn canonical_config_text(text: &str) -> String {
    serde_json::from_str::<Value>(text).map_or_else(|_| text.to_owned(), |v| canonical_config(&v))
}

/// Unified line diff from the switch view to the local file. Empty when
/// the two agree.
pub fn config_diff(device: &str, local: &str) -> String {
    if device == local {
        return String::new();
    }
    TextDiff::from_lines(device, local)
        .unified_diff()
        .context_radius(3)
        .header("running-config", "local")
        .to_string()
}

/// 32-bit FNV-1 hash, used as the content-derived id of a pushed config.
pub fn fnv1_32(bytes: &[u8]) -> u32 {
    const OFFSET_BASIS: u32 = 0x811c_9dc5;
    const PRIME: u32 = 0x0100_0193;

    bytes.iter().fold(OFFSET_BASIS, |hash, &b| {
        hash.wrapping_mul(PRIME) ^ u32::from(b)
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn primary_address_stays_first() {
        let input = list(&["10.0.0.9/24", "10.0.2.1/24", "10.0.1.1/24"]);
        assert_eq!(
            canonical_ipv4(&input),
            list(&["10.0.0.9/24", "10.0.1.1/24", "10.0.2.1/24"])
        );
    }

    #[test]
    fn canonical_ipv4_is_a_fixed_point() {
        let input = list(&["192.168.1.1/24", "172.16.0.1/16", "10.0.0.1/8"]);
        let once = canonical_ipv4(&input);
        assert_eq!(canonical_ipv4(&once), once);
    }

    #[test]
    fn short_lists_are_untouched() {
        assert!(canonical_ipv4(&[]).is_empty());
        assert_eq!(canonical_ipv4(&list(&["10.0.0.1/24"])), list(&["10.0.0.1/24"]));
    }

    #[test]
    fn secondaries_sort_lexically_not_numerically() {
        let input = list(&["1.1.1.1/32", "10.0.0.9/24", "10.0.0.10/24"]);
        assert_eq!(
            canonical_ipv4(&input),
            list(&["1.1.1.1/32", "10.0.0.10/24", "10.0.0.9/24"])
        );
    }

    #[test]
    fn trunk_aliases_round_trip() {
        for native in [true, false] {
            let device = DeviceVlanMode::from_caller(VlanMode::Trunk, native);
            let parsed = DeviceVlanMode::from_device(Some(&device.to_string()));
            assert_eq!(parsed.to_caller(), (VlanMode::Trunk, native));
        }
        assert_eq!(
            DeviceVlanMode::from_caller(VlanMode::Trunk, true).to_string(),
            "native-tagged"
        );
    }

    #[test]
    fn every_device_trunk_variant_folds_to_trunk() {
        for raw in ["trunk", "native-tagged", "native-untagged"] {
            let (mode, _) = DeviceVlanMode::from_device(Some(raw)).to_caller();
            assert_eq!(mode, VlanMode::Trunk, "{raw}");
        }
        assert_eq!(
            DeviceVlanMode::from_device(Some("")).to_caller(),
            (VlanMode::Access, false)
        );
        assert_eq!(
            DeviceVlanMode::from_device(None).to_caller(),
            (VlanMode::Access, false)
        );
    }

    #[test]
    fn fnv1_matches_reference_vectors() {
        assert_eq!(fnv1_32(b""), 0x811c_9dc5);
        assert_eq!(fnv1_32(b"a"), 0x050c_5d7e);
        assert_eq!(fnv1_32(b"foobar"), 0x31f0_b262);
    }

    #[test]
    fn identical_configs_have_no_diff() {
        let text = canonical_config_text(r#"{"b": 1, "a": 2}"#);
        assert_eq!(config_diff(&text, &canonical_config_text(r#"{"a":2,"b":1}"#)), "");
    }

    #[test]
    fn diff_shows_changed_lines() {
        let diff = config_diff("hostname a\n", "hostname b\n");
        assert!(diff.contains("-hostname a"));
        assert!(diff.contains("+hostname b"));
    }
}
