//! World state persisted between CLI runs.
//!
//! The file is a JSON object mapping ledger keys to their stored values as
//! text. A missing file is an empty ledger. Saves go through a temporary
//! file in the same directory and a rename, so a crash never leaves a
//! half-written state file behind.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use gcoin_store::InMemoryLedgerStore;

pub fn load(path: &Path) -> anyhow::Result<InMemoryLedgerStore> {
    if !path.exists() {
        return Ok(InMemoryLedgerStore::new());
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading state file {}", path.display()))?;
    let entries: BTreeMap<String, String> = serde_json::from_str(&text)
        .with_context(|| format!("parsing state file {}", path.display()))?;
    let state = entries
        .into_iter()
        .map(|(key, value)| (key, value.into_bytes()))
        .collect();
    Ok(InMemoryLedgerStore::from_snapshot(state))
}

pub fn save(path: &Path, store: &InMemoryLedgerStore) -> anyhow::Result<()> {
    let entries: BTreeMap<String, String> = store
        .snapshot()?
        .into_iter()
        .map(|(key, value)| (key, String::from_utf8_lossy(&value).into_owned()))
        .collect();
    let json = serde_json::to_string_pretty(&entries)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temporary file in {}", dir.display()))?;
    tmp.write_all(json.as_bytes())?;
    tmp.persist(path)
        .with_context(|| format!("writing state file {}", path.display()))?;
    Ok(())
}
