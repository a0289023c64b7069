// ── Patch sets ──
//
// Field name -> new value, computed once from the last read and the
// desired record. Fields absent from the set keep their device value.

use indexmap::IndexMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::CoreError;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PatchSet {
    changes: IndexMap<String, Value>,
}

impl PatchSet {
    /// Fields of `desired` whose value differs from `current`.
    pub fn diff<R: Serialize>(current: &R, desired: &R) -> Result<Self, CoreError> {
        let current = to_object(current)?;
        let changes = to_object(desired)?
            .into_iter()
            .filter(|(field, value)| current.get(field) != Some(value))
            .collect();
        Ok(Self { changes })
    }

    /// Overlay the changed fields onto `current`.
    pub fn apply<R: Serialize + DeserializeOwned>(&self, current: &R) -> Result<R, CoreError> {
        let mut object = to_object(current)?;
        for (field, value) in &self.changes {
            object.insert(field.clone(), value.clone());
        }
        serde_json::from_value(Value::Object(object))
            .map_err(|e| CoreError::Internal(format!("cannot apply patch set: {e}")))
    }

    pub fn contains(&self, field: &str) -> bool {
        self.changes.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.changes.get(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.changes.keys().map(String::as_str)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.changes.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }
}

impl<'a> IntoIterator for &'a PatchSet {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}

fn to_object<R: Serialize>(record: &R) -> Result<Map<String, Value>, CoreError> {
    match serde_json::to_value(record) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(CoreError::Internal(format!(
            "expected a record, got {other}"
        ))),
        Err(e) => Err(CoreError::Internal(format!("cannot serialize record: {e}"))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::model::{AdminState, Vlan};

    #[test]
    fn identical_records_produce_no_changes() {
        let vlan = Vlan::new(100, "eng");
        assert!(PatchSet::diff(&vlan, &vlan).unwrap().is_empty());
    }

    #[test]
    fn only_changed_fields_are_listed() {
        let current = Vlan::new(100, "old");
        let desired = Vlan {
            admin_state: AdminState::Down,
            ..Vlan::new(100, "eng")
        };

        let patch = PatchSet::diff(&current, &desired).unwrap();

        let mut fields: Vec<_> = patch.fields().collect();
        fields.sort_unstable();
        assert_eq!(fields, vec!["admin_state", "name"]);
        assert_eq!(patch.get("name"), Some(&json!("eng")));
    }

    #[test]
    fn apply_keeps_unpatched_fields() {
        let current = Vlan {
            description: "set elsewhere".into(),
            ..Vlan::new(100, "old")
        };
        let mut desired = current.clone();
        desired.name = "eng".into();

        let patch = PatchSet::diff(&current, &desired).unwrap();
        let merged = patch.apply(&current).unwrap();

        assert_eq!(merged.name, "eng");
        assert_eq!(merged.description, "set elsewhere");
    }
}
