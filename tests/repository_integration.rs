use elemquiz::{
    ElementField, ElementRepository, FileStore, OVERLAY_KEY, builtin_elements, effective_list,
};

#[test]
fn edit_survives_a_restart() {
    let root = tempfile::tempdir().expect("temporary directory should be created");

    {
        let mut repository =
            ElementRepository::open(builtin_elements(), FileStore::new(root.path()));
        let mut carbon = repository.find(6).expect("carbon exists");
        assert_eq!(carbon.name_ko, "탄소");
        carbon.name_ko = "카본".to_string();

        let effective = repository.save_edit(carbon);
        let position = effective
            .iter()
            .position(|record| record.number == 6)
            .expect("carbon stays in the list");
        assert_eq!(position, 5);
        assert_eq!(effective[position].name_ko, "카본");
    }

    let reopened = ElementRepository::open(builtin_elements(), FileStore::new(root.path()));

    assert!(reopened.is_edited(6));
    assert_eq!(reopened.effective()[5].name_ko, "카본");
    assert_eq!(reopened.effective().len(), 118);
}

#[test]
fn reset_restores_the_base_list_across_restarts() {
    let root = tempfile::tempdir().expect("temporary directory should be created");
    let mut repository = ElementRepository::open(builtin_elements(), FileStore::new(root.path()));
    repository
        .edit_field(26, ElementField::Density, "7.874")
        .expect("edit should apply");
    repository
        .edit_field(79, ElementField::DiscoveredBy, "Ancient")
        .expect("edit should apply");

    let after_reset = repository.reset_overlay();
    assert_eq!(after_reset, builtin_elements());

    let reopened = ElementRepository::open(builtin_elements(), FileStore::new(root.path()));
    assert!(reopened.overlay().is_empty());
    assert_eq!(
        effective_list(reopened.list_base(), reopened.overlay()),
        builtin_elements()
    );
}

#[test]
fn corrupt_overlay_file_falls_back_to_base() {
    let root = tempfile::tempdir().expect("temporary directory should be created");
    let store = FileStore::new(root.path());
    std::fs::write(store.path_for(OVERLAY_KEY), "[1, 2, 3").expect("file should be written");

    let repository = ElementRepository::open(builtin_elements(), store);

    assert!(repository.overlay().is_empty());
    assert_eq!(repository.effective(), builtin_elements());
}

#[test]
fn persisted_overlay_uses_decimal_keys() {
    let root = tempfile::tempdir().expect("temporary directory should be created");
    let store = FileStore::new(root.path());
    let path = store.path_for(OVERLAY_KEY);
    let mut repository = ElementRepository::open(builtin_elements(), store);

    repository
        .edit_field(118, ElementField::Phase, "Gas")
        .expect("edit should apply");

    let raw = std::fs::read_to_string(path).expect("overlay file should exist");
    let parsed: serde_json::Value = serde_json::from_str(&raw).expect("overlay is JSON");
    assert_eq!(parsed["118"]["phase"], "Gas");
    assert_eq!(parsed["118"]["number"], 118);
}

#[test]
fn permissive_numeric_edit_reads_back_as_absent() {
    let root = tempfile::tempdir().expect("temporary directory should be created");
    let mut repository = ElementRepository::open(builtin_elements(), FileStore::new(root.path()));

    repository
        .edit_field(1, ElementField::Melt, "cold")
        .expect("optional numeric edits are accepted");

    let reopened = ElementRepository::open(builtin_elements(), FileStore::new(root.path()));
    let hydrogen = reopened.find(1).expect("hydrogen exists");
    assert_eq!(hydrogen.melt, None);
    assert_eq!(hydrogen.melt_label(), "N/A");
}

#[test]
fn one_unreadable_edit_keeps_the_others() {
    let root = tempfile::tempdir().expect("temporary directory should be created");
    let store = FileStore::new(root.path());
    let base = builtin_elements();

    let mut carbon = base[5].clone();
    carbon.name_ko = "카본".to_string();
    let mut helium = serde_json::to_value(&base[1]).expect("record should serialize");
    helium["atomic_mass"] = serde_json::Value::String(String::new());
    let payload = serde_json::json!({
        "6": carbon,
        "2": helium,
        "7": { "number": 7, "symbol": 14 },
    });
    std::fs::write(store.path_for(OVERLAY_KEY), payload.to_string())
        .expect("file should be written");

    let repository = ElementRepository::open(base, store);

    assert_eq!(repository.overlay().len(), 2);
    assert_eq!(repository.effective()[5].name_ko, "카본");
    assert_eq!(repository.effective()[1].mass_label(), "N/A");
    assert!(!repository.is_edited(7));
}

#[test]
fn blank_mass_edit_is_accepted_and_persisted() {
    let root = tempfile::tempdir().expect("temporary directory should be created");
    let mut repository = ElementRepository::open(builtin_elements(), FileStore::new(root.path()));

    repository
        .edit_field(6, ElementField::AtomicMass, "")
        .expect("every value is accepted");

    let reopened = ElementRepository::open(builtin_elements(), FileStore::new(root.path()));
    let carbon = reopened.find(6).expect("carbon exists");
    assert!(reopened.is_edited(6));
    assert_eq!(carbon.atomic_mass, None);
    assert_eq!(carbon.name_ko, "탄소");
}
