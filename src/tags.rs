//! Tag and category repository.
//!
//! Tags and categories live in an external store. Every component that needs
//! them takes a [`TagRepository`] as a parameter instead of reaching for
//! global state. Adapters only implement four storage primitives; the
//! capabilities (create, update, delete, usage counters, search) are provided
//! methods shared by all adapters.
//!
//! # Adapters
//!
//! - [`MemoryTagStore`] - process-local, used by tests and one-shot commands
//! - [`JsonFileTagStore`] - a single JSON file holding `{tags, categories}`
//!
//! # Usage counters
//!
//! `usage_count` and `query_count` are maintained counters. Callers increment
//! and decrement them; decrements are clamped at zero. They are never
//! reconciled against actual query references.
//!
//! # Example
//!
//! ```
//! use sql_snippet_vault::tags::{MemoryTagStore, TagRepository};
//!
//! let store = MemoryTagStore::default();
//! let tag = store.create_tag("reporting", None).unwrap();
//! store.increment_tag_usage(&tag.id).unwrap();
//!
//! assert_eq!(store.tag_name(&tag.id).unwrap().as_deref(), Some("reporting"));
//! assert!(store.create_tag("Reporting", None).is_err());
//! ```

mod store;
mod suggest;
mod types;

use chrono::Utc;
pub use store::{JsonFileTagStore, MemoryTagStore};
pub use suggest::suggest_tags;
pub use types::{Category, CategoryUpdate, NewCategory, Tag, TagSnapshot, TagUpdate};
use uuid::Uuid;

use crate::error::{AppResult, already_exists_error, not_found_error};

/// Colors assigned to new tags and categories without an explicit color
pub const TAG_COLORS: [&str; 10] = [
    "#3b82f6", "#ef4444", "#10b981", "#f59e0b", "#8b5cf6", "#06b6d4", "#f97316", "#84cc16",
    "#ec4899", "#6366f1"
];

/// Categories seeded on first access: (name, description, color, icon)
pub const DEFAULT_CATEGORIES: [(&str, &str, &str, &str); 8] = [
    ("Analytics", "Data analysis and reporting queries", "#3b82f6", "📊"),
    ("CRUD Operations", "Create, Read, Update, Delete operations", "#10b981", "🔄"),
    ("Performance", "Performance optimization queries", "#f59e0b", "⚡"),
    ("Maintenance", "Database maintenance and admin queries", "#6b7280", "🔧"),
    ("Migration", "Schema changes and data migration", "#8b5cf6", "🚀"),
    ("Backup", "Backup and restore operations", "#06b6d4", "💾"),
    ("Security", "Security and permissions related queries", "#ef4444", "🔒"),
    ("Testing", "Test data and validation queries", "#84cc16", "🧪")
];

/// Storage-agnostic access to tags and categories.
///
/// Implementors provide the four `load_*`/`save_*` primitives. All other
/// methods are built on top of them and read the whole collection, change it
/// and write it back.
pub trait TagRepository: Send + Sync {
    /// Load all stored tags (empty when nothing was stored yet)
    fn load_tags(&self) -> AppResult<Vec<Tag>>;

    /// Replace all stored tags
    fn save_tags(&self, tags: &[Tag]) -> AppResult<()>;

    /// Load stored categories, `None` when categories were never stored
    fn load_categories(&self) -> AppResult<Option<Vec<Category>>>;

    /// Replace all stored categories
    fn save_categories(&self, categories: &[Category]) -> AppResult<()>;

    fn list_tags(&self) -> AppResult<Vec<Tag>> {
        self.load_tags()
    }

    /// List categories, seeding [`DEFAULT_CATEGORIES`] on first access
    fn list_categories(&self) -> AppResult<Vec<Category>> {
        if let Some(categories) = self.load_categories()? {
            return Ok(categories);
        }
        let created_at = Utc::now().to_rfc3339();
        let defaults: Vec<Category> = DEFAULT_CATEGORIES
            .iter()
            .map(|(name, description, color, icon)| Category {
                id:          generate_id(),
                name:        name.to_string(),
                description: Some(description.to_string()),
                color:       color.to_string(),
                icon:        Some(icon.to_string()),
                created_at:  created_at.clone(),
                query_count: 0
            })
            .collect();
        tracing::debug!(count = defaults.len(), "seeding default categories");
        self.save_categories(&defaults)?;
        Ok(defaults)
    }

    /// Create a tag, names are unique case-insensitively
    fn create_tag(&self, name: &str, description: Option<&str>) -> AppResult<Tag> {
        let mut tags = self.load_tags()?;
        if tags.iter().any(|t| same_name(&t.name, name.trim())) {
            return Err(already_exists_error("Tag"));
        }
        let tag = Tag {
            id:          generate_id(),
            name:        name.trim().to_string(),
            color:       pick_color().to_string(),
            description: description.map(|d| d.trim().to_string()),
            created_at:  Utc::now().to_rfc3339(),
            usage_count: 0
        };
        tags.push(tag.clone());
        self.save_tags(&tags)?;
        Ok(tag)
    }

    /// Create a category, names are unique case-insensitively
    fn create_category(&self, new: NewCategory) -> AppResult<Category> {
        let mut categories = self.list_categories()?;
        if categories
            .iter()
            .any(|c| same_name(&c.name, new.name.trim()))
        {
            return Err(already_exists_error("Category"));
        }
        let category = Category {
            id:          generate_id(),
            name:        new.name.trim().to_string(),
            description: new.description.map(|d| d.trim().to_string()),
            color:       new.color.unwrap_or_else(|| pick_color().to_string()),
            icon:        new.icon.map(|i| i.trim().to_string()),
            created_at:  Utc::now().to_rfc3339(),
            query_count: 0
        };
        categories.push(category.clone());
        self.save_categories(&categories)?;
        Ok(category)
    }

    fn update_tag(&self, id: &str, update: TagUpdate) -> AppResult<Tag> {
        let mut tags = self.load_tags()?;
        let tag = tags
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| not_found_error("Tag"))?;
        update.apply(tag);
        let updated = tag.clone();
        self.save_tags(&tags)?;
        Ok(updated)
    }

    fn update_category(&self, id: &str, update: CategoryUpdate) -> AppResult<Category> {
        let mut categories = self.list_categories()?;
        let category = categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found_error("Category"))?;
        update.apply(category);
        let updated = category.clone();
        self.save_categories(&categories)?;
        Ok(updated)
    }

    fn delete_tag(&self, id: &str) -> AppResult<()> {
        let tags: Vec<Tag> = self
            .load_tags()?
            .into_iter()
            .filter(|t| t.id != id)
            .collect();
        self.save_tags(&tags)
    }

    fn delete_category(&self, id: &str) -> AppResult<()> {
        let categories: Vec<Category> = self
            .list_categories()?
            .into_iter()
            .filter(|c| c.id != id)
            .collect();
        self.save_categories(&categories)
    }

    /// Unknown ids are ignored
    fn increment_tag_usage(&self, id: &str) -> AppResult<()> {
        let mut tags = self.load_tags()?;
        if let Some(tag) = tags.iter_mut().find(|t| t.id == id) {
            tag.usage_count += 1;
            self.save_tags(&tags)?;
        }
        Ok(())
    }

    /// Clamped at zero, unknown ids are ignored
    fn decrement_tag_usage(&self, id: &str) -> AppResult<()> {
        let mut tags = self.load_tags()?;
        if let Some(tag) = tags.iter_mut().find(|t| t.id == id)
            && tag.usage_count > 0
        {
            tag.usage_count -= 1;
            self.save_tags(&tags)?;
        }
        Ok(())
    }

    fn increment_category_usage(&self, id: &str) -> AppResult<()> {
        let mut categories = self.list_categories()?;
        if let Some(category) = categories.iter_mut().find(|c| c.id == id) {
            category.query_count += 1;
            self.save_categories(&categories)?;
        }
        Ok(())
    }

    fn decrement_category_usage(&self, id: &str) -> AppResult<()> {
        let mut categories = self.list_categories()?;
        if let Some(category) = categories.iter_mut().find(|c| c.id == id)
            && category.query_count > 0
        {
            category.query_count -= 1;
            self.save_categories(&categories)?;
        }
        Ok(())
    }

    /// Most used tags first
    fn popular_tags(&self, limit: usize) -> AppResult<Vec<Tag>> {
        let mut tags = self.load_tags()?;
        tags.sort_by(|a, b| b.usage_count.cmp(&a.usage_count));
        tags.truncate(limit);
        Ok(tags)
    }

    /// Case-insensitive match on name or description
    fn search_tags(&self, query: &str) -> AppResult<Vec<Tag>> {
        let term = query.to_lowercase();
        Ok(self
            .load_tags()?
            .into_iter()
            .filter(|t| {
                t.name.to_lowercase().contains(&term)
                    || t.description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&term))
            })
            .collect())
    }

    fn search_categories(&self, query: &str) -> AppResult<Vec<Category>> {
        let term = query.to_lowercase();
        Ok(self
            .list_categories()?
            .into_iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&term)
                    || c.description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&term))
            })
            .collect())
    }

    /// Name of the tag with the given id
    fn tag_name(&self, id: &str) -> AppResult<Option<String>> {
        Ok(self
            .load_tags()?
            .into_iter()
            .find(|t| t.id == id)
            .map(|t| t.name))
    }

    /// Map tag names (case-insensitive) to ids, `None` for unknown names.
    ///
    /// The result is parallel to `names`.
    fn resolve_tag_names(&self, names: &[&str]) -> AppResult<Vec<Option<String>>> {
        let tags = self.load_tags()?;
        Ok(names
            .iter()
            .map(|name| {
                tags.iter()
                    .find(|t| same_name(&t.name, name))
                    .map(|t| t.id.clone())
            })
            .collect())
    }

    /// Snapshot of tags and categories with an export timestamp
    fn export_snapshot(&self) -> AppResult<TagSnapshot> {
        Ok(TagSnapshot {
            tags:        Some(self.load_tags()?),
            categories:  Some(self.list_categories()?),
            exported_at: Some(Utc::now().to_rfc3339())
        })
    }

    /// Replace stored tags and categories with the ones present in `snapshot`
    fn import_snapshot(&self, snapshot: TagSnapshot) -> AppResult<()> {
        if let Some(tags) = snapshot.tags {
            self.save_tags(&tags)?;
        }
        if let Some(categories) = snapshot.categories {
            self.save_categories(&categories)?;
        }
        Ok(())
    }
}

/// Case-insensitive name equality with full Unicode lowercasing
fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Opaque identifier for tags and categories
pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

fn pick_color() -> &'static str {
    let index = Uuid::new_v4().as_bytes()[0] as usize % TAG_COLORS.len();
    TAG_COLORS[index]
}
