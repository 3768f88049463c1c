use quiz_core::model::{Category, CategoryId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryCardVm {
    pub id: CategoryId,
    pub name: String,
    /// Text stand-in for the category icon.
    pub glyph: &'static str,
    /// Style token of the resolved color, used as the card's class.
    pub color_class: &'static str,
    pub description: String,
    pub count_label: Option<String>,
}

/// Map a category to its home-screen card. Unknown icons and colors fall back
/// to the neutral entries.
#[must_use]
pub fn map_category_card(category: &Category, question_count: Option<usize>) -> CategoryCardVm {
    let count_label = question_count.map(|count| match count {
        1 => "1 question".to_string(),
        n => format!("{n} questions"),
    });

    CategoryCardVm {
        id: category.id().clone(),
        name: category.name().to_string(),
        glyph: category.icon().glyph(),
        color_class: category.color().token(),
        description: category.description().unwrap_or_default().to_string(),
        count_label,
    }
}

impl CategoryCardVm {
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&query)
    }
}
