//! Integration tests for the domain normalizers.

use proptest::prelude::*;
use serde_json::{Value, json};

use tome_model::{CatalogError, Domain, ErrorKind};
use tome_normalize::{
    NormalizedDataset, content_id, normalize, normalize_magic_item, normalize_monster,
    normalize_spells,
};

fn small_beast() -> Value {
    json!({
        "name": "X",
        "creature_type": "beast",
        "size": "Small",
        "alignment": "any",
        "ac": 12,
        "hp": 5,
        "hit_dice": "1d6+1",
        "speed": {"walk": "30 ft."},
        "str": 10, "dex": 10, "con": 10, "int": 10, "wis": 10, "cha": 10,
        "cr": 0.25,
        "sources": [{"source": "SRD"}]
    })
}

fn potion() -> Value {
    json!({
        "name": "Potion of Healing",
        "sources": [{"source": "SRD", "page": 187}],
        "magic_item_category": "Potion",
        "rarity": "common",
        "desc": ["You regain 2d4 + 2 hit points when you drink this potion."]
    })
}

#[test]
fn top_level_scores_become_stats() {
    let monster = normalize_monster(&small_beast(), 0).unwrap();
    let stats = serde_json::to_value(&monster.stats).unwrap();
    assert_eq!(
        stats,
        json!({"str": 10, "dex": 10, "con": 10, "int": 10, "wis": 10, "cha": 10})
    );
    assert_eq!(monster.cr.as_f64(), Some(0.25));
}

#[test]
fn missing_hp_names_the_field() {
    let mut raw = small_beast();
    raw.as_object_mut().unwrap().remove("hp");
    let err = normalize_monster(&raw, 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingField);
    assert_eq!(err.field(), Some("hp"));
    assert!(err.to_string().contains("'hp'"));
}

#[test]
fn legacy_ability_layouts_agree() {
    let scores = json!({"str": 8, "dex": 14, "con": 10, "int": 10, "wis": 8, "cha": 8});

    let mut top_level = small_beast();
    for (key, value) in scores.as_object().unwrap() {
        top_level[key] = value.clone();
    }
    let mut nested_abilities = small_beast();
    nested_abilities["abilities"] = scores.clone();
    for key in tome_model::ABILITY_KEYS {
        nested_abilities.as_object_mut().unwrap().remove(key);
    }
    let mut canonical = nested_abilities.clone();
    canonical.as_object_mut().unwrap().remove("abilities");
    canonical["stats"] = scores;

    let a = normalize_monster(&top_level, 0).unwrap().stats;
    let b = normalize_monster(&nested_abilities, 0).unwrap().stats;
    let c = normalize_monster(&canonical, 0).unwrap().stats;
    assert_eq!(a, b);
    assert_eq!(b, c);
}

#[test]
fn renormalizing_is_idempotent() {
    for (domain, raw) in [
        (Domain::Monsters, json!([small_beast()])),
        (Domain::MagicItems, json!([potion()])),
        (
            Domain::Spells,
            json!([{"id": "sp-light", "name": "Light", "desc": "Glow.", "school": "evocation"}]),
        ),
    ] {
        let first = normalize(domain, &raw).unwrap();
        let once = Value::Array(first.to_values().unwrap());
        let twice = Value::Array(normalize(domain, &once).unwrap().to_values().unwrap());
        assert_eq!(
            serde_json::to_string(&once).unwrap(),
            serde_json::to_string(&twice).unwrap(),
            "{domain} output changed on second pass"
        );
    }
}

#[test]
fn magic_item_without_rarity_fails() {
    let mut raw = potion();
    raw.as_object_mut().unwrap().remove("rarity");
    let err = normalize_magic_item(&raw, 5).unwrap_err();
    assert!(matches!(
        err,
        CatalogError::MissingField { ref field, .. } if field == "rarity"
    ));
    assert!(err.to_string().contains("#5 (Potion of Healing)"));
}

#[test]
fn monster_without_sources_fails() {
    let mut raw = small_beast();
    raw["sources"] = json!([]);
    let err = normalize_monster(&raw, 0).unwrap_err();
    assert_eq!(err.field(), Some("sources"));
}

#[test]
fn every_required_monster_field_is_named_when_absent() {
    let required = [
        "name",
        "creature_type",
        "size",
        "alignment",
        "hit_dice",
        "ac",
        "hp",
        "cr",
        "speed",
        "sources",
    ];
    for key in required {
        let mut raw = small_beast();
        raw.as_object_mut().unwrap().remove(key);
        let err = normalize_monster(&raw, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingField, "removed {key}");
        assert_eq!(err.field(), Some(key), "removed {key}");
    }
}

#[test]
fn every_required_magic_item_field_is_named_when_absent() {
    // The legacy `desc` key feeds `item_desc`.
    let required = [
        ("name", "name"),
        ("magic_item_category", "magic_item_category"),
        ("rarity", "rarity"),
        ("sources", "sources"),
        ("desc", "item_desc"),
    ];
    for (key, field) in required {
        let mut raw = potion();
        raw.as_object_mut().unwrap().remove(key);
        let err = normalize_magic_item(&raw, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingField, "removed {key}");
        assert_eq!(err.field(), Some(field), "removed {key}");
    }
}

#[test]
fn null_description_entry_is_a_type_mismatch() {
    let mut raw = potion();
    raw.as_object_mut().unwrap().remove("desc");
    raw["item_desc"] = json!([null]);
    let err = normalize_magic_item(&raw, 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert_eq!(err.field(), Some("item_desc[0]"));
}

#[test]
fn spells_never_fail_on_missing_fields() {
    let spells = normalize_spells(&json!([{}, {"name": "Mage Hand"}])).unwrap();
    assert_eq!(spells.len(), 2);
    assert!(spells[0].id.is_none());
    assert_eq!(spells[1].name.as_deref(), Some("Mage Hand"));
}

#[test]
fn dispatcher_keeps_domain_and_order() {
    let dataset = normalize(
        Domain::Monsters,
        &json!([small_beast(), {
            "id": "mo-srd-wolf",
            "name": "Wolf",
            "creature_type": "beast",
            "size": "Medium",
            "alignment": "unaligned",
            "ac": 13,
            "hp": 11,
            "hit_dice": "2d8+2",
            "speed": {"walk": "40 ft."},
            "stats": {"str": 12, "dex": 15, "con": 12, "int": 3, "wis": 12, "cha": 6},
            "cr": 0.25,
            "xp": 50,
            "sources": [{"source": "SRD", "page": "341"}]
        }]),
    )
    .unwrap();
    assert!(matches!(dataset, NormalizedDataset::Monsters(_)));
    assert_eq!(dataset.domain(), Domain::Monsters);
    assert_eq!(
        dataset.ids(),
        vec![Some("mo-UNKNOWN-0000"), Some("mo-srd-wolf")]
    );
}

#[test]
fn normalized_magic_item_shape() {
    let item = normalize_magic_item(&potion(), 0).unwrap();
    let id = content_id(Domain::MagicItems, "Potion of Healing", Some("SRD"));
    assert_eq!(item.id, id);
    let mut value = serde_json::to_value(&item).unwrap();
    value["id"] = json!("<content-id>");
    insta::assert_json_snapshot!(value, @r#"
    {
      "id": "<content-id>",
      "name": "Potion of Healing",
      "sources": [
        {
          "source": "SRD",
          "page": "187"
        }
      ],
      "magic_item_category": "Potion",
      "rarity": "common",
      "item_desc": [
        "You regain 2d4 + 2 hit points when you drink this potion."
      ]
    }
    "#);
}

#[test]
fn normalized_monster_shape() {
    let monster = normalize_monster(&small_beast(), 3).unwrap();
    insta::assert_json_snapshot!(monster, @r#"
    {
      "id": "mo-UNKNOWN-0003",
      "sources": [
        {
          "source": "SRD",
          "page": null
        }
      ],
      "name": "X",
      "creature_type": "beast",
      "size": "Small",
      "alignment": "any",
      "ac": 12,
      "armor_type": "",
      "hp": 5,
      "hit_dice": "1d6+1",
      "speed": {
        "walk": "30 ft."
      },
      "stats": {
        "str": 10,
        "dex": 10,
        "con": 10,
        "int": 10,
        "wis": 10,
        "cha": 10
      },
      "cr": 0.25
    }
    "#);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn content_id_is_deterministic(name in "[A-Za-z ]{1,24}", source in "[A-Z]{2,5}") {
        let first = content_id(Domain::MagicItems, &name, Some(&source));
        let second = content_id(Domain::MagicItems, &name, Some(&source));
        prop_assert_eq!(&first, &second);
        let prefix = format!("mi-{source}-");
        prop_assert!(first.starts_with(&prefix));
        prop_assert_eq!(first.len(), prefix.len() + 8);
    }
}
