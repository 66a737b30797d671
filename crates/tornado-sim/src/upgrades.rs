//! Upgrade data source.

use std::collections::HashMap;
use std::sync::Arc;

use tornado_core::enums::UpgradeType;
use tornado_core::settings::TornadoUpgradeSettings;

/// Supplies the upgrade settings for an upgrade category.
pub trait UpgradeDataSource {
    /// `None` when nothing is configured for `category`.
    fn upgrade_settings(&self, category: UpgradeType) -> Option<Arc<TornadoUpgradeSettings>>;
}

/// In-memory upgrade tables keyed by category.
#[derive(Debug, Clone, Default)]
pub struct UpgradeLibrary {
    tables: HashMap<UpgradeType, Arc<TornadoUpgradeSettings>>,
}

impl UpgradeLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Library holding only the tornado table.
    pub fn with_tornado(settings: TornadoUpgradeSettings) -> Self {
        let mut library = Self::new();
        library.insert(UpgradeType::Tornado, settings);
        library
    }

    pub fn insert(&mut self, category: UpgradeType, settings: TornadoUpgradeSettings) {
        self.tables.insert(category, Arc::new(settings));
    }
}

impl UpgradeDataSource for UpgradeLibrary {
    fn upgrade_settings(&self, category: UpgradeType) -> Option<Arc<TornadoUpgradeSettings>> {
        self.tables.get(&category).cloned()
    }
}
