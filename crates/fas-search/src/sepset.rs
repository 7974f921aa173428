//! Separating sets recorded for removed adjacencies.

use fas_core::Node;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Conditioning set that separated a pair, with the oracle's p-value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SepsetEntry {
    pub conditioning: Vec<Node>,
    pub p_value: Option<f64>,
}

/// Flat form used for serialization: one record per separated pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SepsetRecord {
    pub x: Node,
    pub y: Node,
    pub conditioning: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p_value: Option<f64>,
}

/// Map from unordered pair `{x, y}` to the set that separated them.
///
/// Absence of an entry means the pair was never judged independent: it is
/// still adjacent, was outside the seed graph, or was forbidden by knowledge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<SepsetRecord>", from = "Vec<SepsetRecord>")]
pub struct SepsetMap {
    entries: FxHashMap<(Node, Node), SepsetEntry>,
}

impl SepsetMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `z` for `{x, y}` unless an entry already exists.
    /// Returns whether the entry was recorded.
    pub fn set(&mut self, x: &Node, y: &Node, z: Vec<Node>, p_value: Option<f64>) -> bool {
        let key = pair_key(x, y);
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(
            key,
            SepsetEntry {
                conditioning: z,
                p_value,
            },
        );
        true
    }

    pub fn get(&self, x: &Node, y: &Node) -> Option<&[Node]> {
        self.entries
            .get(&pair_key(x, y))
            .map(|e| e.conditioning.as_slice())
    }

    pub fn entry(&self, x: &Node, y: &Node) -> Option<&SepsetEntry> {
        self.entries.get(&pair_key(x, y))
    }

    pub fn p_value(&self, x: &Node, y: &Node) -> Option<f64> {
        self.entry(x, y).and_then(|e| e.p_value)
    }

    pub fn contains(&self, x: &Node, y: &Node) -> bool {
        self.entries.contains_key(&pair_key(x, y))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Node, &Node, &SepsetEntry)> {
        self.entries.iter().map(|((x, y), e)| (x, y, e))
    }

    /// Records sorted by pair name.
    pub fn records(&self) -> Vec<SepsetRecord> {
        let mut records: Vec<SepsetRecord> = self
            .entries
            .iter()
            .map(|((x, y), e)| SepsetRecord {
                x: x.clone(),
                y: y.clone(),
                conditioning: e.conditioning.clone(),
                p_value: e.p_value,
            })
            .collect();
        records.sort_by(|a, b| (&a.x, &a.y).cmp(&(&b.x, &b.y)));
        records
    }
}

impl From<SepsetMap> for Vec<SepsetRecord> {
    fn from(map: SepsetMap) -> Self {
        map.records()
    }
}

impl From<Vec<SepsetRecord>> for SepsetMap {
    fn from(records: Vec<SepsetRecord>) -> Self {
        let mut map = SepsetMap::new();
        for r in records {
            map.set(&r.x, &r.y, r.conditioning, r.p_value);
        }
        map
    }
}

fn pair_key(x: &Node, y: &Node) -> (Node, Node) {
    if x <= y {
        (x.clone(), y.clone())
    } else {
        (y.clone(), x.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_unordered() {
        let (x, y, z) = (Node::new("X"), Node::new("Y"), Node::new("Z"));
        let mut map = SepsetMap::new();
        assert!(map.set(&y, &x, vec![z.clone()], Some(0.4)));
        assert_eq!(map.get(&x, &y), Some(&[z][..]));
        assert_eq!(map.p_value(&x, &y), Some(0.4));
        assert!(map.contains(&y, &x));
    }

    #[test]
    fn first_entry_wins() {
        let (x, y) = (Node::new("X"), Node::new("Y"));
        let mut map = SepsetMap::new();
        assert!(map.set(&x, &y, vec![], None));
        assert!(!map.set(&y, &x, vec![Node::new("W")], None));
        assert_eq!(map.get(&x, &y), Some(&[][..]));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn json_is_a_sorted_record_list() {
        let mut map = SepsetMap::new();
        map.set(&Node::new("B"), &Node::new("C"), vec![Node::new("A")], None);
        map.set(&Node::new("A"), &Node::new("B"), vec![], Some(0.9));
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json[0]["x"], "A");
        assert_eq!(json[0]["p_value"], 0.9);
        assert_eq!(json[1]["conditioning"][0], "A");

        let back: SepsetMap = serde_json::from_value(json).unwrap();
        assert_eq!(back, map);
    }
}
