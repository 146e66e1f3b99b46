use serde::{Deserialize, Serialize};

/// Configuration for the customers module (`modules.customers` in the app config)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomersConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_seed_on_startup")]
    pub seed_on_startup: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Relational storage through SeaORM, using the `database` section.
    #[default]
    SeaOrm,
    /// Process-local map; nothing survives the process.
    Memory,
}

impl Default for CustomersConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            seed_on_startup: default_seed_on_startup(),
        }
    }
}

fn default_seed_on_startup() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let cfg: CustomersConfig = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(cfg, CustomersConfig::default());
        assert_eq!(cfg.backend, StorageBackend::SeaOrm);
        assert!(cfg.seed_on_startup);
    }

    #[test]
    fn backend_names_are_snake_case() {
        let cfg: CustomersConfig = serde_json::from_value(serde_json::json!({
            "backend": "memory",
            "seed_on_startup": false
        }))
        .unwrap();
        assert_eq!(cfg.backend, StorageBackend::Memory);
        assert!(!cfg.seed_on_startup);

        let cfg: CustomersConfig =
            serde_json::from_value(serde_json::json!({ "backend": "sea_orm" })).unwrap();
        assert_eq!(cfg.backend, StorageBackend::SeaOrm);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let res: Result<CustomersConfig, _> =
            serde_json::from_value(serde_json::json!({ "page_size": 10 }));
        assert!(res.is_err());
    }
}
