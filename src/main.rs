/// Demonstrates the layered namespace engine on a small template hierarchy:
/// a builtin template, two refinements forming a diamond, and a concrete
/// record that inherits from both. Prints the resolution order and an
/// inheritance-free JSON snapshot.
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use stratum::construct::{FieldMap, Record, Thing};
use stratum::datatype::Value;

#[derive(Serialize)]
struct Snapshot {
    resolution: Vec<Thing>,
    record: Value,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let builtin = Record::new(
        FieldMap::from_iter([("format", "online"), ("rating", "0")]),
        vec![],
    );
    let olympiad = Record::new(
        FieldMap::from_iter([("rating", "2")]),
        vec![builtin.clone()],
    );
    let onsite = Record::new(
        FieldMap::from_iter([("format", "offline")]),
        vec![builtin.clone()],
    );
    let finals = Record::new(
        FieldMap::from_iter([("name", "finals")]),
        vec![olympiad.clone(), onsite.clone()],
    );
    finals.set(
        "grades",
        Value::List(vec![Value::Int(9), Value::Int(10), Value::Int(11)]),
    );

    let order = finals.mro().expect("the demo graph is consistent");
    let resolution: Vec<Thing> = order.iter().map(|record| record.thing()).collect();
    info!(order = ?resolution, "resolution order");

    for key in ["name", "format", "rating"] {
        let value = finals.lookup(key).expect("demo keys resolve");
        info!(%key, %value, "resolved");
    }

    let snapshot = Snapshot {
        resolution,
        record: finals.dump().expect("the demo graph dumps"),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&snapshot).expect("snapshot serializes")
    );
}
