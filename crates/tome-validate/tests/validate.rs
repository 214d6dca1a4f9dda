//! Validation of canonical records.

use serde_json::{Value, json};

use tome_model::Domain;
use tome_validate::{Issue, Severity, render_log, validate_records};

fn owlbear() -> Value {
    json!({
        "id": "mo-srd-owlbear",
        "sources": [{"source": "SRD", "page": "343"}],
        "name": "Owlbear",
        "creature_type": "monstrosity",
        "size": "Large",
        "alignment": "unaligned",
        "ac": 13,
        "armor_type": "natural armor",
        "hp": 59,
        "hit_dice": "7d10+21",
        "speed": {"walk": "40 ft."},
        "stats": {"str": 20, "dex": 12, "con": 17, "int": 3, "wis": 12, "cha": 7},
        "senses": {"darkvision": "60 ft.", "passive_perception": 13},
        "cr": 3,
        "xp": 700
    })
}

#[test]
fn canonical_monster_is_clean() {
    let report = validate_records(Domain::Monsters, &[owlbear()]);
    assert!(report.findings.is_empty(), "{:?}", report.findings);
}

#[test]
fn every_record_is_checked() {
    let mut no_hp = owlbear();
    no_hp.as_object_mut().unwrap().remove("hp");
    no_hp["id"] = json!("mo-a");
    let mut bad_ac = owlbear();
    bad_ac["ac"] = json!("13");
    bad_ac["id"] = json!("mo-b");

    let report = validate_records(Domain::Monsters, &[no_hp, bad_ac, json!(7)]);
    assert_eq!(report.error_count(), 3);
    assert_eq!(
        report.findings[0].issue,
        Issue::RequiredMissing {
            field: "hp".to_string()
        }
    );
    assert_eq!(report.findings[1].index, 1);
    assert!(matches!(
        report.findings[1].issue,
        Issue::TypeMismatch { ref field, .. } if field == "ac"
    ));
    assert!(matches!(report.findings[2].issue, Issue::NotAnObject { .. }));
}

#[test]
fn duplicate_ids_are_errors() {
    let report = validate_records(Domain::Monsters, &[owlbear(), owlbear()]);
    assert_eq!(report.error_count(), 1);
    let finding = &report.findings[0];
    assert_eq!(finding.index, 1);
    assert_eq!(
        finding.issue,
        Issue::DuplicateId {
            id: "mo-srd-owlbear".to_string(),
            first_index: 0
        }
    );
}

#[test]
fn unknown_fields_warn_on_closed_schemas() {
    let mut legacy = owlbear();
    legacy["abilities"] = json!({});
    let report = validate_records(Domain::Monsters, &[legacy]);
    assert!(!report.has_errors());
    assert_eq!(report.warning_count(), 1);
    assert_eq!(report.findings[0].severity, Severity::Warning);
}

#[test]
fn spells_allow_extra_fields() {
    let spell = json!({
        "id": "sp-light", "name": "Light", "type": "spell",
        "spell_desc": ["Glow."], "higher_level": "",
        "sources": [{"source": "SRD", "page": ""}],
        "classes": ["Wizard"], "components": ["V", "M"], "material": "a firefly",
        "ritual": false, "concentration": false,
        "level": 0, "school": "evocation"
    });
    let report = validate_records(Domain::Spells, &[spell]);
    assert!(report.findings.is_empty(), "{:?}", report.findings);
}

#[test]
fn empty_optional_collection_is_reported() {
    let mut item = json!({
        "id": "mi-srd-1", "name": "Bag of Holding",
        "sources": [{"source": "SRD", "page": null}],
        "magic_item_category": "Wondrous item", "rarity": "uncommon",
        "item_desc": ["This bag has an interior space."]
    });
    assert!(validate_records(Domain::MagicItems, std::slice::from_ref(&item)).findings.is_empty());

    item["properties"] = json!([]);
    let report = validate_records(Domain::MagicItems, &[item]);
    assert_eq!(
        report.log_lines(),
        vec![
            "[ERROR] magic-items record #0 (Bag of Holding): field 'properties' must be a non-empty array, found an empty array"
                .to_string()
        ]
    );
}

#[test]
fn log_has_domain_headers() {
    let reports = vec![
        validate_records(Domain::Spells, &[]),
        validate_records(Domain::Monsters, &[json!("x")]),
    ];
    let log = render_log(&reports);
    assert!(log.starts_with("# spells: 0 records, 0 errors, 0 warnings\n"));
    assert!(log.contains("# monsters: 1 records, 1 errors, 0 warnings\n"));
    assert!(log.contains("[ERROR] monsters record #0: record must be an object, found string"));
}
