use serde::{Deserialize, Serialize};

/// Background knowledge as written in a config file.
///
/// Edge pairs are directed `[from, to]`. Tiers are listed earliest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeConfig {
    pub forbidden: Vec<(String, String)>,
    pub required: Vec<(String, String)>,
    pub tiers: Vec<Vec<String>>,
    /// Indices of tiers whose members may not be adjacent to each other.
    pub forbidden_within_tiers: Vec<usize>,
}

impl KnowledgeConfig {
    pub fn is_empty(&self) -> bool {
        self.forbidden.is_empty()
            && self.required.is_empty()
            && self.tiers.is_empty()
            && self.forbidden_within_tiers.is_empty()
    }
}
