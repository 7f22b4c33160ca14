//! Deterministic, key-order-independent serialization.
//!
//! Two values that are equal once mapping keys are ignored produce byte-identical
//! output. Sequence order is significant and kept as-is.

use log::warn;
use serde::Serialize;
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// Rebuilds `value` with every mapping's keys in lexicographic order, at any depth.
pub fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut sorted = Map::with_capacity(map.len());
            for key in keys {
                sorted.insert(key.clone(), canonicalize(&map[key.as_str()]));
            }
            Value::Object(sorted)
        }
        scalar => scalar.clone(),
    }
}

pub fn to_canonical_string(value: &Value) -> String {
    canonicalize(value).to_string()
}

/// Canonical text of any serializable value. A value serde cannot represent as JSON
/// (e.g. a map with non-string keys) canonicalizes to `null` rather than failing.
pub fn canonical_json<T: Serialize + ?Sized>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(v) => to_canonical_string(&v),
        Err(e) => {
            warn!("Value could not be canonicalized, substituting null: {}", e);
            Value::Null.to_string()
        }
    }
}

/// A value graph whose composite nodes may be shared, and therefore may form cycles.
/// Documents coming out of the replication layer can alias sub-trees; this is the
/// shape the canonicalizer accepts for them.
#[derive(Clone, Debug)]
pub enum Node {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    List(Rc<RefCell<Vec<Node>>>),
    Map(Rc<RefCell<Vec<(String, Node)>>>),
}

impl Node {
    pub fn list(items: Vec<Node>) -> Self {
        Node::List(Rc::new(RefCell::new(items)))
    }

    pub fn map<K: Into<String>>(pairs: Vec<(K, Node)>) -> Self {
        Node::Map(Rc::new(RefCell::new(
            pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        )))
    }

    pub fn string(s: impl Into<String>) -> Self {
        Node::String(s.into())
    }

    fn identity(&self) -> Option<*const ()> {
        match self {
            Node::List(rc) => Some(Rc::as_ptr(rc) as *const ()),
            Node::Map(rc) => Some(Rc::as_ptr(rc) as *const ()),
            _ => None,
        }
    }
}

/// Canonicalizes a possibly cyclic graph. A composite met again while it is still being
/// walked is replaced by `null`. Shared but acyclic sub-trees are emitted in full.
pub fn canonicalize_node(node: &Node) -> Value {
    let mut in_progress = HashSet::new();
    walk(node, &mut in_progress)
}

fn walk(node: &Node, in_progress: &mut HashSet<*const ()>) -> Value {
    let identity = node.identity();
    if let Some(id) = identity {
        if !in_progress.insert(id) {
            return Value::Null;
        }
    }

    let value = match node {
        Node::Null => Value::Null,
        Node::Bool(b) => Value::Bool(*b),
        Node::Number(n) => serde_json::Number::from_f64(*n)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Node::String(s) => Value::String(s.clone()),
        Node::List(items) => Value::Array(items.borrow().iter().map(|n| walk(n, in_progress)).collect()),
        Node::Map(pairs) => {
            let pairs = pairs.borrow();
            let mut sorted: Vec<&(String, Node)> = pairs.iter().collect();
            sorted.sort_by(|a, b| a.0.cmp(&b.0));
            let mut map = Map::with_capacity(sorted.len());
            for (key, child) in sorted {
                let child = walk(child, in_progress);
                map.insert(key.clone(), child);
            }
            Value::Object(map)
        }
    };

    if let Some(id) = identity {
        in_progress.remove(&id);
    }
    value
}
