use serde::{Deserialize, Serialize};

/// A user-defined label attached to queries by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id:          String,
    pub name:        String,
    pub color:       String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at:  String,
    #[serde(default)]
    pub usage_count: u32
}

/// A coarse grouping of queries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id:          String,
    pub name:        String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub color:       String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon:        Option<String>,
    pub created_at:  String,
    #[serde(default)]
    pub query_count: u32
}

/// Partial tag update, `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct TagUpdate {
    pub name:        Option<String>,
    pub color:       Option<String>,
    pub description: Option<String>,
    pub usage_count: Option<u32>
}

/// Partial category update, `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct CategoryUpdate {
    pub name:        Option<String>,
    pub color:       Option<String>,
    pub description: Option<String>,
    pub icon:        Option<String>,
    pub query_count: Option<u32>
}

/// Fields for a new category
#[derive(Debug, Clone, Default)]
pub struct NewCategory {
    pub name:        String,
    pub description: Option<String>,
    pub color:       Option<String>,
    pub icon:        Option<String>
}

/// Tags and categories as stored on disk and exchanged between stores
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags:        Option<Vec<Tag>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories:  Option<Vec<Category>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<String>
}

impl TagUpdate {
    pub(crate) fn apply(self, tag: &mut Tag) {
        if let Some(name) = self.name {
            tag.name = name;
        }
        if let Some(color) = self.color {
            tag.color = color;
        }
        if let Some(description) = self.description {
            tag.description = Some(description);
        }
        if let Some(count) = self.usage_count {
            tag.usage_count = count;
        }
    }
}

impl CategoryUpdate {
    pub(crate) fn apply(self, category: &mut Category) {
        if let Some(name) = self.name {
            category.name = name;
        }
        if let Some(color) = self.color {
            category.color = color;
        }
        if let Some(description) = self.description {
            category.description = Some(description);
        }
        if let Some(icon) = self.icon {
            category.icon = Some(icon);
        }
        if let Some(count) = self.query_count {
            category.query_count = count;
        }
    }
}
