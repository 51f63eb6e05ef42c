//! The telemetry identifiers in `storage.json`: reading them and replacing
//! them with fresh random values.
//!
//! Only the four identifier keys are ever touched; every other key in the
//! document survives a rewrite. A document that is missing, not valid JSON,
//! or not a JSON object is treated as `{}`.

use crate::error::Result;
use crate::store::BackupStore;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKey {
    MachineId,
    MacMachineId,
    DevDeviceId,
    SqmId,
}

impl IdentifierKey {
    pub const ALL: [IdentifierKey; 4] = [
        IdentifierKey::MachineId,
        IdentifierKey::MacMachineId,
        IdentifierKey::DevDeviceId,
        IdentifierKey::SqmId,
    ];

    pub fn json_key(&self) -> &'static str {
        match self {
            IdentifierKey::MachineId => "telemetry.machineId",
            IdentifierKey::MacMachineId => "telemetry.macMachineId",
            IdentifierKey::DevDeviceId => "telemetry.devDeviceId",
            IdentifierKey::SqmId => "telemetry.sqmId",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IdentifierKey::MachineId => "machineId",
            IdentifierKey::MacMachineId => "macMachineId",
            IdentifierKey::DevDeviceId => "devDeviceId",
            IdentifierKey::SqmId => "sqmId",
        }
    }

    /// Whether `value` has the shape the editor writes for this key.
    pub fn is_well_formed(&self, value: &str) -> bool {
        match self {
            IdentifierKey::MachineId | IdentifierKey::MacMachineId => {
                value.len() == 64
                    && value
                        .bytes()
                        .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
            }
            IdentifierKey::DevDeviceId => Uuid::try_parse(value)
                .is_ok_and(|u| u.hyphenated().to_string() == value),
            IdentifierKey::SqmId => value
                .strip_prefix('{')
                .and_then(|v| v.strip_suffix('}'))
                .and_then(|inner| Uuid::try_parse(inner).ok().map(|u| (inner, u)))
                .is_some_and(|(inner, u)| {
                    let mut buf = Uuid::encode_buffer();
                    u.hyphenated().encode_upper(&mut buf) == inner
                }),
        }
    }

    /// A fresh random value in the shape the editor writes for this key.
    pub fn generate(&self) -> String {
        match self {
            IdentifierKey::MachineId | IdentifierKey::MacMachineId => format!(
                "{}{}",
                Uuid::new_v4().simple(),
                Uuid::new_v4().simple()
            ),
            IdentifierKey::DevDeviceId => Uuid::new_v4().hyphenated().to_string(),
            IdentifierKey::SqmId => {
                let mut buf = Uuid::encode_buffer();
                format!("{{{}}}", Uuid::new_v4().hyphenated().encode_upper(&mut buf))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierValue {
    pub key: IdentifierKey,
    /// `None` when the key is absent. Non-string JSON values are rendered as JSON.
    pub value: Option<String>,
}

impl IdentifierValue {
    pub fn is_well_formed(&self) -> bool {
        self.value
            .as_deref()
            .is_some_and(|v| self.key.is_well_formed(v))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifiers {
    pub values: Vec<IdentifierValue>,
}

impl Identifiers {
    fn from_object(doc: &Map<String, Value>) -> Self {
        let values = IdentifierKey::ALL
            .iter()
            .map(|key| IdentifierValue {
                key: *key,
                value: doc.get(key.json_key()).map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                }),
            })
            .collect();
        Self { values }
    }

    pub fn get(&self, key: IdentifierKey) -> Option<&str> {
        self.values
            .iter()
            .find(|v| v.key == key)
            .and_then(|v| v.value.as_deref())
    }
}

/// `None` when the storage file does not exist.
fn load_document<S: BackupStore>(
    store: &S,
    storage_file: &Path,
) -> Result<Option<Map<String, Value>>> {
    let Some(content) = store.read_file(storage_file)? else {
        return Ok(None);
    };

    let doc = match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            warn!(path = %storage_file.display(), "storage file is not a JSON object");
            Map::new()
        }
        Err(e) => {
            warn!(path = %storage_file.display(), error = %e, "storage file is not valid JSON");
            Map::new()
        }
    };
    Ok(Some(doc))
}

/// `None` when the storage file does not exist.
pub fn current<S: BackupStore>(store: &S, storage_file: &Path) -> Result<Option<Identifiers>> {
    Ok(load_document(store, storage_file)?.map(|doc| Identifiers::from_object(&doc)))
}

/// Replaces the four identifiers with fresh values and writes the document
/// back, pretty-printed. Creates the file (and its directory) if missing.
pub fn rewrite<S: BackupStore>(store: &mut S, storage_file: &Path) -> Result<Identifiers> {
    let mut doc = load_document(store, storage_file)?.unwrap_or_default();
    for key in IdentifierKey::ALL {
        doc.insert(key.json_key().to_string(), Value::String(key.generate()));
    }

    let content = serde_json::to_string_pretty(&doc)?;
    store.write_file(storage_file, &content)?;
    info!(path = %storage_file.display(), "rewrote identifiers");

    Ok(Identifiers::from_object(&doc))
}
