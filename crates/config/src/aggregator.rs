use serde::{Deserialize, Serialize};

/// Default value for `worker_threads` in [`AggregatorConfig`].
const DEFAULT_WORKER_THREADS: usize = 1;

/// Default value for `max_subtree_height` in [`AggregatorConfig`].
const DEFAULT_MAX_SUBTREE_HEIGHT: u32 = 16;

/// Controls how a batch of rollup records is folded into a single root.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct AggregatorConfig {
    /// Number of threads merging sibling pairs at the same level.  With 1 all
    /// merges run on the calling thread.
    #[serde(default = "default_worker_threads")]
    pub worker_threads: usize,

    /// Refuse to build a tree whose root would be taller than this.
    #[serde(default = "default_max_subtree_height")]
    pub max_subtree_height: u32,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            worker_threads: DEFAULT_WORKER_THREADS,
            max_subtree_height: DEFAULT_MAX_SUBTREE_HEIGHT,
        }
    }
}

fn default_worker_threads() -> usize {
    DEFAULT_WORKER_THREADS
}

fn default_max_subtree_height() -> u32 {
    DEFAULT_MAX_SUBTREE_HEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_load() {
        let config_string = r#"
            worker_threads = 4
            max_subtree_height = 10
        "#;

        let config = toml::from_str::<AggregatorConfig>(config_string);
        assert!(
            config.is_ok(),
            "should be able to load TOML config but got: {:?}",
            config.err()
        );

        let config = config.unwrap();
        assert_eq!(config.worker_threads, 4);
        assert_eq!(config.max_subtree_height, 10);
    }

    #[test]
    fn test_config_defaults() {
        let config = toml::from_str::<AggregatorConfig>("").unwrap();
        assert_eq!(config, AggregatorConfig::default());

        let config = toml::from_str::<AggregatorConfig>("worker_threads = 2").unwrap();
        assert_eq!(config.worker_threads, 2);
        assert_eq!(config.max_subtree_height, DEFAULT_MAX_SUBTREE_HEIGHT);
    }
}
