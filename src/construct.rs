use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

// field maps and seen-sets use a fast hasher since keys are plain strings
use core::hash::BuildHasherDefault;
use seahash::SeaHasher;
use std::collections::{HashMap, HashSet, VecDeque};

// used to print out readable forms of a construct
use std::fmt;

// our own stuff that we need
use crate::datatype::{Value, dump};
use crate::error::{Result, StratumError};
use crate::linearize::{Node, linearize};

// ------------- Thing -------------
pub type Thing = u64;

pub type OtherHasher = BuildHasherDefault<SeaHasher>;

pub const GENESIS: Thing = 0;

// Identities are handed out once, process-wide, so that every record is a
// distinct thing regardless of its content. Nothing is ever handed out twice
// and nothing is reclaimed; records live for as long as anything holds an
// Arc to them.
static THING_SEQUENCE: AtomicU64 = AtomicU64::new(GENESIS);

fn generate_thing() -> Thing {
    THING_SEQUENCE.fetch_add(1, Ordering::Relaxed) + 1
}

// ------------- FieldMap -------------
/// A string-keyed map that remembers insertion order. Lookup order is not
/// affected by insertion order, but iteration replays keys in the order they
/// first appeared, which is what gives [`Record::items`] its stable
/// tie-breaks.
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    kept: HashMap<String, Value, OtherHasher>,
    order: Vec<String>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self {
            kept: HashMap::default(),
            order: Vec::new(),
        }
    }
    /// Sets a field, returning the previous value when the key was already
    /// present. Last write wins; the key keeps its original position in the
    /// insertion order.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let previous = self.kept.insert(key.clone(), value.into());
        if previous.is_none() {
            self.order.push(key);
        }
        previous
    }
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.kept.get(key)
    }
    pub fn contains(&self, key: &str) -> bool {
        self.kept.contains_key(key)
    }
    /// Folds another map into this one, last write wins. Keys that lost
    /// their value are returned so callers can decide whether the overlap
    /// was intended; each one is also logged as a warning.
    pub fn merge(&mut self, other: FieldMap) -> Vec<String> {
        let mut overwritten = Vec::new();
        for (key, value) in other.into_iter() {
            if self.set(key.clone(), value).is_some() {
                tracing::warn!(%key, "duplicate field overwritten during merge");
                overwritten.push(key);
            }
        }
        overwritten
    }
    /// Iterates local entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.order
            .iter()
            .map(|key| (key.as_str(), &self.kept[key]))
    }
    pub fn len(&self) -> usize {
        self.order.len()
    }
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl IntoIterator for FieldMap {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        let FieldMap { mut kept, order } = self;
        let mut entries = Vec::with_capacity(order.len());
        for key in order {
            if let Some(value) = kept.remove(&key) {
                entries.push((key, value));
            }
        }
        entries.into_iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(entries: I) -> Self {
        let mut map = FieldMap::new();
        for (key, value) in entries {
            map.set(key, value);
        }
        map
    }
}

// ------------- Record -------------
/// A layered namespace: local fields plus an ordered list of base records,
/// with lookups resolved through the C3 linearization of the base graph.
///
/// Bases are shared references fixed at construction. Local fields may be
/// added or overwritten afterwards, which never disturbs the resolution
/// order, so the order is cached on first successful computation.
#[derive(Debug)]
pub struct Record {
    thing: Thing,
    fields: Mutex<FieldMap>,
    bases: Vec<Arc<Record>>,
    resolution: OnceLock<Vec<Arc<Record>>>,
}

impl Node for Arc<Record> {
    fn identity(&self) -> Thing {
        self.thing
    }
}

impl Record {
    /// Creates a record over the given bases. Nothing is validated here;
    /// a base graph that admits no linearization only surfaces once a
    /// lookup (or an explicit [`Record::mro`] call) needs the order.
    pub fn new(fields: FieldMap, bases: Vec<Arc<Record>>) -> Arc<Record> {
        Arc::new(Record {
            thing: generate_thing(),
            fields: Mutex::new(fields),
            bases,
            resolution: OnceLock::new(),
        })
    }
    /// A record with no fields of its own: pure composition over its bases,
    /// as used when stacking segment namespaces into one registry.
    pub fn from_bases(bases: Vec<Arc<Record>>) -> Arc<Record> {
        Record::new(FieldMap::new(), bases)
    }
    pub fn empty() -> Arc<Record> {
        Record::new(FieldMap::new(), Vec::new())
    }
    pub fn thing(&self) -> Thing {
        self.thing
    }
    pub fn bases(&self) -> &[Arc<Record>] {
        &self.bases
    }
    /// The record's resolution order: itself first, then every transitive
    /// base exactly once, as computed by the C3 merge. The order is cached
    /// after the first success; a failed linearization caches nothing.
    pub fn mro(self: &Arc<Self>) -> Result<Vec<Arc<Record>>> {
        if let Some(order) = self.resolution.get() {
            return Ok(order.clone());
        }
        let order = linearize(self, &|record: &Arc<Record>| record.bases.clone())?;
        Ok(self.resolution.get_or_init(|| order).clone())
    }
    /// Resolves a key through the resolution order: the first record whose
    /// local map contains the key wins, so nearer values shadow farther
    /// ones and a record's own fields always win outright.
    pub fn lookup(self: &Arc<Self>, key: &str) -> Result<Value> {
        for record in self.mro()? {
            if let Some(value) = record.fields.lock().unwrap().get(key) {
                return Ok(value.clone());
            }
        }
        Err(StratumError::NotFound(key.to_owned()))
    }
    /// The recoverable variant of [`Record::lookup`]: an absent key becomes
    /// `Ok(None)` while hierarchy failures still propagate.
    pub fn get(self: &Arc<Self>, key: &str) -> Result<Option<Value>> {
        match self.lookup(key) {
            Ok(value) => Ok(Some(value)),
            Err(StratumError::NotFound(_)) => Ok(None),
            Err(error) => Err(error),
        }
    }
    /// Whether any record in the resolution order carries the key. Presence
    /// is map membership; a stored `Value::None` or `false` still counts.
    pub fn contains(self: &Arc<Self>, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
    /// Sets a field in the local map only, returning the previous local
    /// value when one is overwritten. Inherited records are untouched and
    /// the cached resolution order stays valid.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.lock().unwrap().set(key, value)
    }
    /// Iterates `(key, value)` pairs in resolution order, each record's
    /// local fields in insertion order, yielding every key exactly once at
    /// its nearest definition. Calling `items` again restarts the walk.
    pub fn items(self: &Arc<Self>) -> Result<Items> {
        Ok(Items {
            order: self.mro()?.into_iter(),
            pending: VecDeque::new(),
            seen: HashSet::default(),
        })
    }
    /// Flattens the record into a plain nested [`Value`]: the resolved view
    /// from [`Record::items`], with contained records, maps and lists
    /// dumped recursively and scalars passed through untouched.
    pub fn dump(self: &Arc<Self>) -> Result<Value> {
        let mut entries = Vec::new();
        for (key, value) in self.items()? {
            entries.push((key, dump(&value)?));
        }
        Ok(Value::Map(entries))
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.thing == other.thing
    }
}
impl Eq for Record {}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let fields = self.fields.lock().unwrap();
        let mut s = String::new();
        for (key, value) in fields.iter() {
            s += &format!("{}: {}, ", key, value);
        }
        s.pop();
        s.pop();
        write!(f, "{} {{{}}}", self.thing, s)
    }
}

// ------------- Items -------------
/// Lazy iterator over the resolved `(key, value)` view of a record. Records
/// are visited one at a time; a record's field lock is held only while its
/// local entries are copied out.
pub struct Items {
    order: std::vec::IntoIter<Arc<Record>>,
    pending: VecDeque<(String, Value)>,
    seen: HashSet<String, OtherHasher>,
}

impl Iterator for Items {
    type Item = (String, Value);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.pending.pop_front() {
                return Some(entry);
            }
            let record = self.order.next()?;
            let fields = record.fields.lock().unwrap();
            for (key, value) in fields.iter() {
                if self.seen.insert(key.to_owned()) {
                    self.pending.push_back((key.to_owned(), value.clone()));
                }
            }
        }
    }
}
