use crate::catalog::Catalog;
use crate::config::CatalogFileConfig;
use crate::ConfigError;
use gear_core::builtin;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Answers "what does the shop sell before stage N?"
///
/// Implementations must be pure: the same stage always yields the same catalog.
pub trait CatalogSource {
    fn catalog_for_stage(&self, stage: u32) -> Catalog;
}

/// Registry of stage catalogs, loaded from TOML files
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogRegistry {
    catalogs: BTreeMap<u32, Catalog>,
}

impl CatalogRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock catalogs for stages 2 to 5
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.insert(
            2,
            Catalog::new(
                vec![builtin::combat_knife(), builtin::machete()],
                vec![builtin::leather_jacket()],
                vec![builtin::small_medkit()],
            ),
        );
        registry.insert(
            3,
            Catalog::new(
                vec![builtin::hammer(), builtin::knuckle_dusters()],
                vec![builtin::riot_suit()],
                vec![builtin::medium_medkit()],
            ),
        );
        registry.insert(
            4,
            Catalog::new(
                vec![builtin::revolver(), builtin::shotgun()],
                vec![builtin::kevlar_jacket()],
                vec![builtin::big_medkit()],
            ),
        );
        registry.insert(
            5,
            Catalog::new(
                vec![builtin::rifle(), builtin::axe()],
                vec![builtin::riot_suit()],
                vec![builtin::emergency_kit()],
            ),
        );
        registry
    }

    /// Load all stage catalogs from a directory (recursively)
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        registry.load_dir(dir)?;
        Ok(registry)
    }

    /// Load catalogs from a directory recursively
    fn load_dir(&mut self, dir: &Path) -> Result<(), ConfigError> {
        if !dir.exists() {
            return Ok(());
        }

        let entries = std::fs::read_dir(dir).map_err(|e| ConfigError::Io {
            error: e,
            path: Some(dir.to_path_buf()),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ConfigError::Io {
                error: e,
                path: Some(dir.to_path_buf()),
            })?;
            paths.push(entry.path());
        }
        // read_dir order is platform dependent; keep duplicate-stage errors stable
        paths.sort();

        for path in paths {
            if path.is_dir() {
                self.load_dir(&path)?;
            } else if path.extension().is_some_and(|ext| ext == "toml") {
                self.load_file(&path)?;
            }
        }

        Ok(())
    }

    /// Load a single catalog file
    fn load_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            error: e,
            path: Some(path.to_path_buf()),
        })?;

        let config: CatalogFileConfig =
            toml::from_str(&content).map_err(|e| ConfigError::Parse {
                error: e,
                path: path.to_path_buf(),
            })?;

        let (stage, catalog) = config
            .into_catalog()
            .map_err(|message| ConfigError::Validation {
                message,
                path: path.to_path_buf(),
            })?;

        if self.catalogs.contains_key(&stage) {
            return Err(ConfigError::Validation {
                message: format!("stage {} is defined more than once", stage),
                path: path.to_path_buf(),
            });
        }

        debug!(stage, path = %path.display(), "catalog loaded");
        self.catalogs.insert(stage, catalog);
        Ok(())
    }

    /// Add or replace the catalog for a stage
    pub fn insert(&mut self, stage: u32, catalog: Catalog) {
        self.catalogs.insert(stage, catalog);
    }

    /// Get a catalog by stage
    pub fn get(&self, stage: u32) -> Option<&Catalog> {
        self.catalogs.get(&stage)
    }

    /// Check if a stage has a catalog
    pub fn contains(&self, stage: u32) -> bool {
        self.catalogs.contains_key(&stage)
    }

    /// List stages with a catalog, ascending
    pub fn stages(&self) -> impl Iterator<Item = u32> + '_ {
        self.catalogs.keys().copied()
    }
}

impl CatalogSource for CatalogRegistry {
    /// Stages without an entry get an empty catalog
    fn catalog_for_stage(&self, stage: u32) -> Catalog {
        self.get(stage).cloned().unwrap_or_default()
    }
}
