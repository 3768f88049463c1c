use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::CategoryId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CategoryError {
    #[error("category name cannot be empty")]
    EmptyName,

    #[error("category icon cannot be empty")]
    EmptyIcon,

    #[error("category color cannot be empty")]
    EmptyColor,
}

//
// ─── ICON ──────────────────────────────────────────────────────────────────────
//

/// Fixed set of icons a category can be rendered with.
///
/// Stored categories keep the raw symbolic name; unknown names render as `Help`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryIcon {
    Cpu,
    Code,
    Earth,
    Beaker,
    BookOpen,
    Lightbulb,
    Rocket,
    NotepadText,
    Help,
}

impl CategoryIcon {
    /// Icons offered by the admin picker, in display order.
    pub const CHOICES: [CategoryIcon; 8] = [
        CategoryIcon::Cpu,
        CategoryIcon::Code,
        CategoryIcon::Earth,
        CategoryIcon::Beaker,
        CategoryIcon::BookOpen,
        CategoryIcon::Lightbulb,
        CategoryIcon::Rocket,
        CategoryIcon::NotepadText,
    ];

    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "Cpu" => CategoryIcon::Cpu,
            "Code" => CategoryIcon::Code,
            "Earth" => CategoryIcon::Earth,
            "Beaker" => CategoryIcon::Beaker,
            "BookOpen" => CategoryIcon::BookOpen,
            "Lightbulb" => CategoryIcon::Lightbulb,
            "Rocket" => CategoryIcon::Rocket,
            "NotepadText" => CategoryIcon::NotepadText,
            _ => CategoryIcon::Help,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            CategoryIcon::Cpu => "Cpu",
            CategoryIcon::Code => "Code",
            CategoryIcon::Earth => "Earth",
            CategoryIcon::Beaker => "Beaker",
            CategoryIcon::BookOpen => "BookOpen",
            CategoryIcon::Lightbulb => "Lightbulb",
            CategoryIcon::Rocket => "Rocket",
            CategoryIcon::NotepadText => "NotepadText",
            CategoryIcon::Help => "HelpCircle",
        }
    }

    /// Short glyph used by text front-ends.
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            CategoryIcon::Cpu => "[cpu]",
            CategoryIcon::Code => "</>",
            CategoryIcon::Earth => "(o)",
            CategoryIcon::Beaker => "[~]",
            CategoryIcon::BookOpen => "[=]",
            CategoryIcon::Lightbulb => "(*)",
            CategoryIcon::Rocket => "/^\\",
            CategoryIcon::NotepadText => "[#]",
            CategoryIcon::Help => "(?)",
        }
    }
}

//
// ─── COLOR ─────────────────────────────────────────────────────────────────────
//

/// Fixed palette for category badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryColor {
    Purple,
    Blue,
    Amber,
    Green,
    Red,
    Pink,
    Cyan,
    Indigo,
    Neutral,
}

impl CategoryColor {
    pub const CHOICES: [CategoryColor; 8] = [
        CategoryColor::Purple,
        CategoryColor::Blue,
        CategoryColor::Amber,
        CategoryColor::Green,
        CategoryColor::Red,
        CategoryColor::Pink,
        CategoryColor::Cyan,
        CategoryColor::Indigo,
    ];

    /// Maps a stored style token (`bg-<c>-100 text-<c>-600`) to a palette entry.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        Self::CHOICES
            .into_iter()
            .find(|color| color.token() == token.trim())
            .unwrap_or(CategoryColor::Neutral)
    }

    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            CategoryColor::Purple => "bg-purple-100 text-purple-600",
            CategoryColor::Blue => "bg-blue-100 text-blue-600",
            CategoryColor::Amber => "bg-amber-100 text-amber-600",
            CategoryColor::Green => "bg-green-100 text-green-600",
            CategoryColor::Red => "bg-red-100 text-red-600",
            CategoryColor::Pink => "bg-pink-100 text-pink-600",
            CategoryColor::Cyan => "bg-cyan-100 text-cyan-600",
            CategoryColor::Indigo => "bg-indigo-100 text-indigo-600",
            CategoryColor::Neutral => "bg-gray-100 text-gray-600",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CategoryColor::Purple => "purple",
            CategoryColor::Blue => "blue",
            CategoryColor::Amber => "amber",
            CategoryColor::Green => "green",
            CategoryColor::Red => "red",
            CategoryColor::Pink => "pink",
            CategoryColor::Cyan => "cyan",
            CategoryColor::Indigo => "indigo",
            CategoryColor::Neutral => "neutral",
        }
    }
}

//
// ─── CATEGORY ──────────────────────────────────────────────────────────────────
//

/// A named subject that groups questions.
///
/// Questions reference their category by `name`, so names are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    id: CategoryId,
    name: String,
    icon: String,
    color: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl Category {
    /// Creates a new Category.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError` if the name, icon or color is blank.
    pub fn new(
        id: CategoryId,
        name: impl Into<String>,
        icon: impl Into<String>,
        color: impl Into<String>,
        description: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, CategoryError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CategoryError::EmptyName);
        }
        let icon = icon.into();
        if icon.trim().is_empty() {
            return Err(CategoryError::EmptyIcon);
        }
        let color = color.into();
        if color.trim().is_empty() {
            return Err(CategoryError::EmptyColor);
        }

        let description = description
            .map(|d| d.trim().to_owned())
            .filter(|d| !d.is_empty());

        Ok(Self {
            id,
            name: name.trim().to_owned(),
            icon: icon.trim().to_owned(),
            color: color.trim().to_owned(),
            description,
            created_at,
        })
    }

    /// Returns a copy with a new creation timestamp.
    #[must_use]
    pub fn with_created_at(&self, created_at: DateTime<Utc>) -> Self {
        Self {
            created_at,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn id(&self) -> &CategoryId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw symbolic icon name as stored.
    #[must_use]
    pub fn icon_name(&self) -> &str {
        &self.icon
    }

    #[must_use]
    pub fn icon(&self) -> CategoryIcon {
        CategoryIcon::from_name(&self.icon)
    }

    /// Raw style token as stored.
    #[must_use]
    pub fn color_token(&self) -> &str {
        &self.color
    }

    #[must_use]
    pub fn color(&self) -> CategoryColor {
        CategoryColor::from_token(&self.color)
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
