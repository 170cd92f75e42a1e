use serde::Serialize;

/// A spending/income category from the fixed, compiled-in taxonomy.
///
/// Categories are not user-mutable: transactions reference them by `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
}

/// Category assigned when a parsed transaction names an unknown category.
pub const FALLBACK_CATEGORY_ID: &str = "cat-other";

/// The full taxonomy, in display order.
pub const CATEGORIES: &[Category] = &[
    Category { id: "cat-1", name: "Food", icon: "🍔" },
    Category { id: "cat-2", name: "Transport", icon: "🚗" },
    Category { id: "cat-3", name: "Salary", icon: "💰" },
    Category { id: "cat-4", name: "Shopping", icon: "🛍️" },
    Category { id: "cat-5", name: "Entertainment", icon: "🎮" },
    Category { id: "cat-6", name: "Housing", icon: "🏠" },
    Category { id: "cat-7", name: "Medical", icon: "🏥" },
    Category { id: "cat-8", name: "Investment", icon: "📈" },
    Category { id: FALLBACK_CATEGORY_ID, name: "Other", icon: "✨" },
];

/// Color tags offered for new accounts.
pub const ACCOUNT_COLORS: &[&str] = &[
    "blue", "indigo", "purple", "pink", "rose", "orange",
];

/// Look up a category by id.
pub fn category_by_id(id: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.id == id)
}

pub fn is_known_category(id: &str) -> bool {
    category_by_id(id).is_some()
}

/// Display name for a category id, `"Unknown"` if it is not in the taxonomy.
pub fn category_name(id: &str) -> &'static str {
    category_by_id(id).map_or("Unknown", |c| c.name)
}
