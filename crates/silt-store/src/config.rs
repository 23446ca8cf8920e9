//! Store configuration

/// Configuration for a [`Store`](crate::Store)
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// How many committed changes the history ring retains
    pub history_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            history_capacity: silt_ring::DEFAULT_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.history_capacity, 10);
    }
}
