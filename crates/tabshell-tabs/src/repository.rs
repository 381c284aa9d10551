//! Tab repository
//!
//! Boundary between persisted tab rows and in-memory [`TabRecord`]s.

use tabshell_storage::{Database, TabRow, TabStore};

use crate::icon::TabIcon;
use crate::tab::{TabId, TabRecord};
use crate::Result;

/// All reads and writes of persisted tabs go through this trait.
///
/// Implementations must not retry: a failed call is reported to the caller,
/// which leaves its in-memory state untouched.
pub trait TabRepository: Send + Sync {
    /// Persist a new tab and return it with its generated id
    fn add_tab(&self, tab: &TabRecord) -> Result<TabRecord>;

    /// Every persisted tab in display order
    fn list_tabs(&self) -> Result<Vec<TabRecord>>;

    /// Every persisted tab, persisting `seed` first when there are none.
    /// Listing and seeding are atomic.
    fn list_or_create(&self, seed: &TabRecord) -> Result<Vec<TabRecord>>;

    fn delete_tab(&self, tab: &TabRecord) -> Result<()>;

    fn remove_tab_by_id(&self, id: TabId) -> Result<()>;

    fn update_url(&self, id: TabId, url: &str) -> Result<()>;
}

pub struct SqliteTabRepository {
    store: TabStore,
}

impl SqliteTabRepository {
    pub fn new(db: Database) -> Self {
        Self {
            store: TabStore::new(db),
        }
    }

    fn record_to_row(tab: &TabRecord) -> Result<TabRow> {
        Ok(TabRow {
            id: tab.id,
            name: tab.name.clone(),
            url: tab.url.clone(),
            icon: tab.icon.to_png()?,
        })
    }

    fn row_to_record(row: TabRow) -> TabRecord {
        let icon = TabIcon::from_png(&row.icon).unwrap_or_else(|e| {
            tracing::warn!(tab_id = row.id, error = %e, "Unreadable tab icon, using placeholder");
            TabIcon::placeholder()
        });

        TabRecord {
            id: row.id,
            name: row.name,
            url: row.url,
            icon,
        }
    }
}

impl TabRepository for SqliteTabRepository {
    fn add_tab(&self, tab: &TabRecord) -> Result<TabRecord> {
        let icon = tab.icon.to_png()?;
        let id = self.store.insert(&tab.name, &tab.url, &icon)?;

        tracing::info!(tab_id = id, url = %tab.url, "Persisted new tab");

        Ok(tab.clone().with_id(id))
    }

    fn list_tabs(&self) -> Result<Vec<TabRecord>> {
        Ok(self
            .store
            .select_all()?
            .into_iter()
            .map(Self::row_to_record)
            .collect())
    }

    fn list_or_create(&self, seed: &TabRecord) -> Result<Vec<TabRecord>> {
        let seed = Self::record_to_row(seed)?;
        Ok(self
            .store
            .select_all_or_insert(&seed.name, &seed.url, &seed.icon)?
            .into_iter()
            .map(Self::row_to_record)
            .collect())
    }

    fn delete_tab(&self, tab: &TabRecord) -> Result<()> {
        self.store.delete_matching(&Self::record_to_row(tab)?)?;
        Ok(())
    }

    fn remove_tab_by_id(&self, id: TabId) -> Result<()> {
        self.store.delete_by_id(id)?;
        tracing::info!(tab_id = id, "Removed persisted tab");
        Ok(())
    }

    fn update_url(&self, id: TabId, url: &str) -> Result<()> {
        self.store.update_url(id, url)?;
        tracing::debug!(tab_id = id, url = %url, "Persisted tab URL");
        Ok(())
    }
}

impl Clone for SqliteTabRepository {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}
