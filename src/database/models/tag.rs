// Database models - Tags
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Semantic group a tag belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TagCategory {
    Behaviour,
    Motivation,
    Friction,
    Impact,
}

impl TagCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagCategory::Behaviour => "Behaviour",
            TagCategory::Motivation => "Motivation",
            TagCategory::Friction => "Friction",
            TagCategory::Impact => "Impact",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Behaviour" => Some(TagCategory::Behaviour),
            "Motivation" => Some(TagCategory::Motivation),
            "Friction" => Some(TagCategory::Friction),
            "Impact" => Some(TagCategory::Impact),
            _ => None,
        }
    }
}

/// A behavioural tag (predefined or user-created)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub category: TagCategory,
    pub is_custom: bool,
}

impl Tag {
    /// Entry of the fixed predefined catalog
    pub fn predefined(id: &str, name: &str, category: TagCategory) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category,
            is_custom: false,
        }
    }

    /// Create a user-defined tag with a normalized name and a fresh id
    pub fn new_custom(name: &str, category: TagCategory) -> Self {
        Self {
            id: format!("c_{}", Uuid::new_v4().simple()),
            name: normalize_tag_name(name),
            category,
            is_custom: true,
        }
    }
}

/// Tag names are stored lowercase with whitespace runs collapsed to hyphens
pub fn normalize_tag_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_tag_name() {
        assert_eq!(normalize_tag_name("Dark Mode"), "dark-mode");
        assert_eq!(normalize_tag_name("  power   user "), "power-user");
        assert_eq!(normalize_tag_name("ux"), "ux");
    }

    #[test]
    fn test_new_custom_tag() {
        let tag = Tag::new_custom("Price Sensitive", TagCategory::Motivation);
        assert!(tag.id.starts_with("c_"));
        assert_eq!(tag.name, "price-sensitive");
        assert!(tag.is_custom);
    }

    #[test]
    fn test_category_round_trip() {
        for cat in [
            TagCategory::Behaviour,
            TagCategory::Motivation,
            TagCategory::Friction,
            TagCategory::Impact,
        ] {
            assert_eq!(TagCategory::parse(cat.as_str()), Some(cat));
        }
        assert_eq!(TagCategory::parse("Unknown"), None);
    }
}
