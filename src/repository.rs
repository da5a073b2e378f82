use std::collections::{BTreeMap, BTreeSet};

use crate::element::{ElementField, ElementRecord};
use crate::store::{OverlayStore, StoreError};

/// Store key under which the edit overlay is persisted.
pub const OVERLAY_KEY: &str = "periodic-table-edits";

/// User edits keyed by atomic number. Each value is a full replacement record.
pub type EditOverlay = BTreeMap<u32, ElementRecord>;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("no element with atomic number {number}")]
    UnknownElement { number: u32 },
}

/// Built-in records plus the persisted overlay of user edits.
#[derive(Debug)]
pub struct ElementRepository<S: OverlayStore> {
    base: Vec<ElementRecord>,
    overlay: EditOverlay,
    store: S,
}

impl<S: OverlayStore> ElementRepository<S> {
    /// Creates a repository and loads whatever overlay `store` already holds.
    pub fn open(base: Vec<ElementRecord>, store: S) -> Self {
        let overlay = read_overlay(&store);
        Self {
            base,
            overlay,
            store,
        }
    }

    pub fn list_base(&self) -> &[ElementRecord] {
        &self.base
    }

    pub fn overlay(&self) -> &EditOverlay {
        &self.overlay
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Re-reads the persisted overlay, replacing the in-memory one.
    pub fn load_overlay(&mut self) -> &EditOverlay {
        self.overlay = read_overlay(&self.store);
        &self.overlay
    }

    /// Inserts or replaces `record` in the overlay, persists it and returns the
    /// new effective list. Field values are taken as given.
    pub fn save_edit(&mut self, record: ElementRecord) -> Vec<ElementRecord> {
        log::info!("saving edit for element {}", record.number);
        self.overlay.insert(record.number, record);
        self.persist();
        self.effective()
    }

    /// Applies one raw field edit on top of the current effective record.
    pub fn edit_field(
        &mut self,
        number: u32,
        field: ElementField,
        raw: &str,
    ) -> Result<Vec<ElementRecord>, RepositoryError> {
        let current = self
            .find(number)
            .ok_or(RepositoryError::UnknownElement { number })?;

        Ok(self.save_edit(current.with_field(field, raw)))
    }

    /// Drops every edit. Calling it on an empty overlay is harmless.
    pub fn reset_overlay(&mut self) -> Vec<ElementRecord> {
        log::info!("resetting {} element edit(s)", self.overlay.len());
        self.overlay.clear();
        self.persist();
        self.effective()
    }

    pub fn effective(&self) -> Vec<ElementRecord> {
        effective_list(&self.base, &self.overlay)
    }

    pub fn find(&self, number: u32) -> Option<ElementRecord> {
        self.overlay
            .get(&number)
            .or_else(|| self.base.iter().find(|record| record.number == number))
            .cloned()
    }

    pub fn is_edited(&self, number: u32) -> bool {
        self.overlay.contains_key(&number)
    }

    pub fn edited_numbers(&self) -> BTreeSet<u32> {
        self.overlay.keys().copied().collect()
    }

    fn persist(&mut self) {
        let result = encode_overlay(&self.overlay)
            .and_then(|encoded| self.store.write(OVERLAY_KEY, &encoded));

        if let Err(error) = result {
            log::error!("failed to persist element edits: {}", error);
        }
    }
}

/// Merges `overlay` onto `base`, keeping base order and length.
pub fn effective_list(base: &[ElementRecord], overlay: &EditOverlay) -> Vec<ElementRecord> {
    base.iter()
        .map(|record| overlay.get(&record.number).unwrap_or(record).clone())
        .collect()
}

/// Reads the overlay from `store`. Missing or unreadable data yields an empty
/// overlay, and an entry that is not a valid record is skipped on its own.
pub fn read_overlay(store: &impl OverlayStore) -> EditOverlay {
    let raw = match store.read(OVERLAY_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return EditOverlay::new(),
        Err(error) => {
            log::warn!("ignoring element edits: {}", error);
            return EditOverlay::new();
        }
    };

    let entries = match serde_json::from_str::<BTreeMap<String, serde_json::Value>>(&raw) {
        Ok(entries) => entries,
        Err(error) => {
            log::warn!("discarding malformed element edits: {}", error);
            return EditOverlay::new();
        }
    };

    entries
        .into_iter()
        .filter_map(
            |(key, value)| match serde_json::from_value::<ElementRecord>(value) {
                Ok(record) => Some((record.number, record)),
                Err(error) => {
                    log::warn!("skipping element edit {:?}: {}", key, error);
                    None
                }
            },
        )
        .collect()
}

pub fn encode_overlay(overlay: &EditOverlay) -> Result<String, StoreError> {
    Ok(serde_json::to_string(overlay)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::builtin_elements;
    use crate::store::MemoryStore;

    fn repository() -> ElementRepository<MemoryStore> {
        ElementRepository::open(builtin_elements(), MemoryStore::new())
    }

    #[test]
    fn empty_store_yields_base_list() {
        let repository = repository();

        assert!(repository.overlay().is_empty());
        assert_eq!(repository.effective(), builtin_elements());
    }

    #[test]
    fn overlay_shadows_base_without_reordering() {
        let base = builtin_elements();
        let mut overlay = EditOverlay::new();
        let mut oxygen = base[7].clone();
        oxygen.name_ko = "옥시젠".to_string();
        overlay.insert(8, oxygen.clone());

        let merged = effective_list(&base, &overlay);

        assert_eq!(merged.len(), base.len());
        for (merged, base_record) in merged.iter().zip(&base) {
            assert_eq!(merged.number, base_record.number);
            if merged.number == 8 {
                assert_eq!(merged, &oxygen);
            } else {
                assert_eq!(merged, base_record);
            }
        }
    }

    #[test]
    fn save_edit_persists_whole_overlay() {
        let mut repository = repository();
        let mut neon = repository.find(10).expect("neon exists");
        neon.symbol = "Nn".to_string();

        let effective = repository.save_edit(neon.clone());

        assert_eq!(effective[9], neon);
        assert!(repository.is_edited(10));
        let stored = repository
            .store()
            .get(OVERLAY_KEY)
            .expect("overlay should be persisted");
        assert!(stored.contains("\"10\""));
    }

    #[test]
    fn edits_for_unknown_numbers_only_grow_overlay() {
        let mut repository = repository();
        let mut phantom = repository.find(1).expect("hydrogen exists");
        phantom.number = 500;

        let effective = repository.save_edit(phantom);

        assert_eq!(effective.len(), 118);
        assert_eq!(repository.edited_numbers(), BTreeSet::from([500]));
    }

    #[test]
    fn reset_is_idempotent() {
        let mut repository = repository();
        repository
            .edit_field(1, ElementField::NameKo, "하이드로젠")
            .expect("edit should apply");

        let first = repository.reset_overlay();
        let second = repository.reset_overlay();

        assert_eq!(first, builtin_elements());
        assert_eq!(second, builtin_elements());
        assert_eq!(repository.store().get(OVERLAY_KEY), Some("{}"));
    }

    #[test]
    fn malformed_overlay_is_discarded() {
        let store = MemoryStore::with_entry(OVERLAY_KEY, "{not json");
        let repository = ElementRepository::open(builtin_elements(), store);

        assert!(repository.overlay().is_empty());
        assert_eq!(repository.effective(), builtin_elements());
    }

    #[test]
    fn overlay_is_rekeyed_by_record_number() {
        let mut helium = builtin_elements()[1].clone();
        helium.name = "Helios".to_string();
        let payload = format!(
            "{{\"99\":{}}}",
            serde_json::to_string(&helium).expect("record should serialize")
        );
        let store = MemoryStore::with_entry(OVERLAY_KEY, &payload);

        let repository = ElementRepository::open(builtin_elements(), store);

        assert_eq!(repository.edited_numbers(), BTreeSet::from([2]));
        assert_eq!(repository.find(2).map(|record| record.name), Some("Helios".to_string()));
    }

    #[test]
    fn field_edit_on_unknown_element_errors() {
        let mut repository = repository();
        let error = repository
            .edit_field(200, ElementField::Name, "Nothing")
            .expect_err("unknown element should error");

        assert_eq!(error, RepositoryError::UnknownElement { number: 200 });
        assert!(repository.overlay().is_empty());
    }

    #[test]
    fn blank_mass_edit_is_saved_as_absent() {
        let mut repository = repository();
        let effective = repository
            .edit_field(3, ElementField::AtomicMass, "")
            .expect("every value is accepted");

        assert!(repository.is_edited(3));
        assert_eq!(effective[2].atomic_mass, None);
        assert_eq!(effective[2].mass_label(), "N/A");
    }

    #[test]
    fn one_bad_entry_does_not_drop_other_edits() {
        let base = builtin_elements();
        let mut carbon = base[5].clone();
        carbon.name_ko = "카본".to_string();
        let mut helium = serde_json::to_value(&base[1]).expect("record should serialize");
        helium["atomic_mass"] = serde_json::Value::String(String::new());
        let mut broken = serde_json::to_value(&base[2]).expect("record should serialize");
        broken["symbol"] = serde_json::Value::Null;
        let payload = serde_json::json!({
            "6": carbon,
            "2": helium,
            "3": broken,
        });
        let store = MemoryStore::with_entry(OVERLAY_KEY, &payload.to_string());

        let repository = ElementRepository::open(base, store);

        assert_eq!(repository.edited_numbers(), BTreeSet::from([2, 6]));
        assert_eq!(repository.find(6).map(|record| record.name_ko), Some("카본".to_string()));
        assert_eq!(repository.find(2).and_then(|record| record.atomic_mass), None);
        assert_eq!(repository.find(3), builtin_elements().into_iter().nth(2));
    }

    #[test]
    fn load_overlay_picks_up_external_writes() {
        let mut repository = repository();
        let mut lithium = repository.find(3).expect("lithium exists");
        lithium.phase = "Liquid".to_string();
        let mut overlay = EditOverlay::new();
        overlay.insert(3, lithium);

        let encoded = encode_overlay(&overlay).expect("overlay should encode");
        repository
            .store
            .write(OVERLAY_KEY, &encoded)
            .expect("memory write succeeds");

        assert_eq!(repository.load_overlay(), &overlay);
    }
}
