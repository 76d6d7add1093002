use stratum::construct::{FieldMap, Record};
use stratum::datatype::Value;
use stratum::error::StratumError;

#[test]
fn own_field_shadows_inherited_one() {
    let a = Record::new(FieldMap::from_iter([("x", 1i64)]), vec![]);
    let b = Record::new(
        FieldMap::from_iter([("x", 2i64), ("y", 3i64)]),
        vec![a.clone()],
    );
    assert_eq!(b.lookup("x").unwrap(), Value::Int(2));
    assert_eq!(b.lookup("y").unwrap(), Value::Int(3));
    // the base is untouched
    assert_eq!(a.lookup("x").unwrap(), Value::Int(1));
}

#[test]
fn absent_key_is_not_found() {
    let record = Record::new(FieldMap::from_iter([("x", 1i64)]), vec![]);
    assert_eq!(
        record.lookup("y"),
        Err(StratumError::NotFound("y".to_owned()))
    );
    assert_eq!(record.get("y"), Ok(None));
    assert_eq!(record.contains("y"), Ok(false));
}

#[test]
fn presence_is_membership_not_truthiness() {
    let mut fields = FieldMap::new();
    fields.set("flag", false);
    fields.set("nothing", Value::None);
    fields.set("zero", 0i64);
    fields.set("empty", "");
    let record = Record::new(fields, vec![]);
    for key in ["flag", "nothing", "zero", "empty"] {
        assert_eq!(record.contains(key), Ok(true), "{key} should be present");
    }
    let heir = Record::from_bases(vec![record]);
    assert_eq!(heir.contains("nothing"), Ok(true));
    assert_eq!(heir.lookup("flag").unwrap(), Value::Bool(false));
}

#[test]
fn set_is_local_and_last_write_wins() {
    let base = Record::new(FieldMap::from_iter([("x", 1i64)]), vec![]);
    let record = Record::from_bases(vec![base.clone()]);
    assert_eq!(record.lookup("x").unwrap(), Value::Int(1));

    // first local write shadows the base and reports no previous local value
    assert_eq!(record.set("x", 2i64), None);
    assert_eq!(record.lookup("x").unwrap(), Value::Int(2));
    // second write overwrites and surrenders the first
    assert_eq!(record.set("x", 3i64), Some(Value::Int(2)));
    assert_eq!(record.lookup("x").unwrap(), Value::Int(3));
    // the base never noticed
    assert_eq!(base.lookup("x").unwrap(), Value::Int(1));
}

#[test]
fn items_yields_each_key_once_at_its_nearest_definition() {
    let a = Record::new(
        FieldMap::from_iter([("x", 1i64), ("z", 9i64)]),
        vec![],
    );
    let b = Record::new(
        FieldMap::from_iter([("x", 2i64), ("y", 3i64)]),
        vec![a.clone()],
    );
    let entries: Vec<(String, Value)> = b.items().unwrap().collect();
    assert_eq!(
        entries,
        vec![
            ("x".to_owned(), Value::Int(2)),
            ("y".to_owned(), Value::Int(3)),
            ("z".to_owned(), Value::Int(9)),
        ]
    );
}

#[test]
fn items_is_restartable() {
    let a = Record::new(FieldMap::from_iter([("x", 1i64)]), vec![]);
    let b = Record::new(FieldMap::from_iter([("y", 2i64)]), vec![a]);
    let first: Vec<(String, Value)> = b.items().unwrap().collect();
    let second: Vec<(String, Value)> = b.items().unwrap().collect();
    assert_eq!(first, second);
}

#[test]
fn inconsistent_hierarchy_surfaces_from_reads() {
    // the conflicting diamond, built out of records
    let r1 = Record::empty();
    let r2 = Record::empty();
    let r3 = Record::empty();
    let r4 = Record::from_bases(vec![r1.clone(), r2.clone()]);
    let r5 = Record::from_bases(vec![r2.clone(), r3.clone()]);
    let r6 = Record::from_bases(vec![r3.clone(), r1.clone()]);
    let r7 = Record::from_bases(vec![r4, r5, r6]);

    let expected = StratumError::InconsistentHierarchy(r7.thing());
    assert_eq!(r7.mro().unwrap_err(), expected);
    assert_eq!(r7.lookup("anything").unwrap_err(), expected);
    assert_eq!(r7.get("anything").unwrap_err(), expected);
    assert_eq!(r7.contains("anything").unwrap_err(), expected);
    assert!(r7.items().is_err());
}

#[test]
fn field_map_merge_reports_overwritten_keys() {
    let mut target = FieldMap::from_iter([("a", 1i64), ("b", 2i64)]);
    let incoming = FieldMap::from_iter([("b", 20i64), ("c", 30i64)]);
    let overwritten = target.merge(incoming);
    assert_eq!(overwritten, vec!["b".to_owned()]);
    assert_eq!(target.get("a"), Some(&Value::Int(1)));
    assert_eq!(target.get("b"), Some(&Value::Int(20)));
    assert_eq!(target.get("c"), Some(&Value::Int(30)));
    // merged keys extend the insertion order, overwritten ones keep their slot
    let keys: Vec<&str> = target.iter().map(|(key, _)| key).collect();
    assert_eq!(keys, vec!["a", "b", "c"]);
}

#[test]
fn segment_composition_resolves_through_bases() {
    // registries are themselves layered namespaces: one record per segment,
    // stacked in declaration order, earlier segments shadowing later ones
    let first = Record::empty();
    first.set("alpha", Record::new(FieldMap::from_iter([("v", 1i64)]), vec![]));
    let second = Record::empty();
    second.set("alpha", Record::new(FieldMap::from_iter([("v", 2i64)]), vec![]));
    second.set("beta", Record::new(FieldMap::from_iter([("v", 3i64)]), vec![]));

    let registry = Record::from_bases(vec![first, second]);
    let Value::Record(alpha) = registry.lookup("alpha").unwrap() else {
        panic!("alpha should be a record");
    };
    assert_eq!(alpha.lookup("v").unwrap(), Value::Int(1));
    let Value::Record(beta) = registry.lookup("beta").unwrap() else {
        panic!("beta should be a record");
    };
    assert_eq!(beta.lookup("v").unwrap(), Value::Int(3));
}

#[test]
fn record_fields_may_be_prepopulated_and_extended() {
    let record = Record::new(FieldMap::from_iter([("a", 1i64)]), vec![]);
    record.set("b", 2i64);
    let keys: Vec<String> = record.items().unwrap().map(|(key, _)| key).collect();
    assert_eq!(keys, vec!["a".to_owned(), "b".to_owned()]);
}
