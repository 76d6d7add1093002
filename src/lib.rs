//! Stratum – a layered, multiply-inherited namespace engine.
//!
//! Stratum centers on the *record* concept: a node in a DAG of namespaces,
//! where:
//! * A [`construct::Thing`] is an opaque identity (a simple `u64`).
//! * A [`construct::FieldMap`] is a string-keyed, insertion-ordered map of
//!   local field values.
//! * A [`construct::Record`] couples a field map with an ordered list of
//!   base records, shared through `Arc` and fixed at construction.
//! * A [`datatype::Value`] is what a field holds: a scalar, a list, a plain
//!   map, or another record.
//!
//! Field lookup on a record resolves through the C3 linearization of its
//! base graph (the same algorithm behind method resolution order in
//! multiply-inherited class systems): the record itself first, then its
//! ancestors in an order that respects every declared base order. Nearer
//! definitions shadow farther ones, for iteration exactly as for lookup.
//!
//! ## Modules
//! * [`linearize`] – The generic C3 merge over anything with a `Thing`
//!   identity, plus the [`linearize::Node`] trait.
//! * [`construct`] – Field maps, records, and the resolved-view iterator.
//! * [`datatype`] – The closed [`datatype::Value`] variant set and the
//!   recursive structural [`datatype::dump`].
//! * [`error`] – [`error::StratumError`] and the crate `Result` alias.
//!
//! ## Quick Start
//! ```
//! use stratum::construct::{FieldMap, Record};
//! use stratum::datatype::Value;
//! let template = Record::new(FieldMap::from_iter([("rating", 3i64)]), vec![]);
//! let event = Record::new(
//!     FieldMap::from_iter([("name", "finals")]),
//!     vec![template.clone()],
//! );
//! assert_eq!(event.lookup("rating").unwrap(), Value::Int(3));
//! assert_eq!(event.mro().unwrap().len(), 2);
//! ```
//!
//! ## Failure Modes
//! Two errors originate here: [`error::StratumError::InconsistentHierarchy`]
//! when a base graph admits no legal resolution order (contradictory base
//! orders, or a cycle), and [`error::StratumError::NotFound`] when a key is
//! absent across the whole order. Both are local and leave no partial
//! state; a failed linearization caches nothing and can be retried against
//! a corrected graph.

pub mod construct;
pub mod datatype;
pub mod error;
pub mod linearize;
