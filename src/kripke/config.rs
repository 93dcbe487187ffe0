//! Generator configuration.

use serde::{Deserialize, Serialize};

/// Which end of the worklist the next job is taken from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorklistOrder {
    /// Breadth-first.
    #[default]
    Fifo,
    /// Depth-first.
    Lifo,
}

/// Options threaded through a generation run.
///
/// # Example
///
/// ```rust
/// use ringlet_kripke::kripke::{GeneratorConfig, WorklistOrder};
///
/// let config = GeneratorConfig::from_json(r#"{ "order": "lifo", "max_jobs": 5000 }"#).unwrap();
///
/// assert_eq!(config.order, WorklistOrder::Lifo);
/// assert_eq!(config.max_jobs, Some(5000));
/// assert!(config.link_revisits);
/// assert!(config.share_explored);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub order: WorklistOrder,
    /// Abort once this many jobs have been processed.
    pub max_jobs: Option<usize>,
    /// Add an edge into an already explored world when a branch reaches it
    /// again.
    pub link_revisits: bool,
    /// Expand each world at most once per run, across all branches.
    ///
    /// When disabled only the per-branch cycle detector bounds exploration,
    /// and the number of jobs can grow exponentially with the depth of the
    /// reachable world graph.
    pub share_explored: bool,
}

impl GeneratorConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_order(mut self, order: WorklistOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_max_jobs(mut self, max_jobs: usize) -> Self {
        self.max_jobs = Some(max_jobs);
        self
    }

    pub fn with_link_revisits(mut self, link_revisits: bool) -> Self {
        self.link_revisits = link_revisits;
        self
    }

    pub fn with_share_explored(mut self, share_explored: bool) -> Self {
        self.share_explored = share_explored;
        self
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            order: WorklistOrder::Fifo,
            max_jobs: None,
            link_revisits: true,
            share_explored: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        assert_eq!(
            GeneratorConfig::from_json("{}").unwrap(),
            GeneratorConfig::default()
        );
    }

    #[test]
    fn builder_methods_set_fields() {
        let config = GeneratorConfig::default()
            .with_order(WorklistOrder::Lifo)
            .with_max_jobs(10)
            .with_link_revisits(false)
            .with_share_explored(false);

        assert_eq!(config.order, WorklistOrder::Lifo);
        assert_eq!(config.max_jobs, Some(10));
        assert!(!config.link_revisits);
        assert!(!config.share_explored);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = GeneratorConfig::default().with_max_jobs(3);
        let json = serde_json::to_string(&config).unwrap();

        assert!(json.contains("\"fifo\""));
        assert_eq!(GeneratorConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn unknown_order_is_rejected() {
        assert!(GeneratorConfig::from_json(r#"{ "order": "random" }"#).is_err());
    }
}
