//! The fixed set of expense categories and their display styling.
//!
//! Categories are stored as plain text, so values written by older versions
//! of the app (or edited by hand) may not match the built-in set. Unknown
//! values are kept verbatim in [Category::Other] and render with the
//! default grey styling instead of being dropped.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// An expense category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    /// Groceries and eating out.
    Food,
    /// Fuel.
    Gas,
    /// Movies, concerts, subscriptions and the like.
    Entertainment,
    /// Planned one-off purchases.
    Planned,
    /// Car maintenance, insurance and repairs.
    Car,
    /// Gym memberships and sports.
    Fitness,
    /// Clothing and shoes.
    Clothes,
    /// Bills and other unavoidable spending.
    Necessary,
    /// Haircuts.
    Barber,
    /// Any category value that is not one of the built-in ones.
    Other(String),
}

/// The built-in categories, in the order they appear in forms.
pub const ALL_CATEGORIES: [Category; 9] = [
    Category::Food,
    Category::Gas,
    Category::Entertainment,
    Category::Planned,
    Category::Car,
    Category::Fitness,
    Category::Clothes,
    Category::Necessary,
    Category::Barber,
];

impl Category {
    /// The category name as stored in the database and shown in the UI.
    pub fn as_str(&self) -> &str {
        match self {
            Category::Food => "Food",
            Category::Gas => "Gas",
            Category::Entertainment => "Entertainment",
            Category::Planned => "Planned",
            Category::Car => "Car",
            Category::Fitness => "Fitness",
            Category::Clothes => "Clothes",
            Category::Necessary => "Necessary",
            Category::Barber => "Barber",
            Category::Other(name) => name,
        }
    }

    /// The Tailwind classes for the category's badge.
    ///
    /// Unknown categories get the same grey styling as Barber.
    pub fn badge_class(&self) -> &'static str {
        match self {
            Category::Food => "bg-green-100 text-green-800",
            Category::Gas => "bg-yellow-100 text-yellow-800",
            Category::Entertainment => "bg-red-100 text-red-800",
            Category::Planned => "bg-blue-100 text-blue-800",
            Category::Car => "bg-purple-100 text-purple-800",
            Category::Fitness => "bg-emerald-100 text-emerald-800",
            Category::Clothes => "bg-yellow-300 text-yellow-900",
            Category::Necessary => "bg-orange-100 text-orange-800",
            Category::Barber | Category::Other(_) => "bg-gray-100 text-gray-800",
        }
    }

    /// The Tailwind classes for the category's breakdown progress bar.
    pub fn bar_class(&self) -> &'static str {
        match self {
            Category::Food => "bg-green-600",
            Category::Gas => "bg-yellow-600",
            Category::Entertainment => "bg-red-600",
            Category::Planned => "bg-blue-600",
            Category::Car => "bg-purple-600",
            Category::Fitness => "bg-emerald-600",
            Category::Clothes => "bg-yellow-500",
            Category::Necessary => "bg-orange-600",
            Category::Barber | Category::Other(_) => "bg-gray-600",
        }
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        match name {
            "Food" => Category::Food,
            "Gas" => Category::Gas,
            "Entertainment" => Category::Entertainment,
            "Planned" => Category::Planned,
            "Car" => Category::Car,
            "Fitness" => Category::Fitness,
            "Clothes" => Category::Clothes,
            "Necessary" => Category::Necessary,
            "Barber" => Category::Barber,
            other => Category::Other(other.to_owned()),
        }
    }
}

impl From<String> for Category {
    fn from(name: String) -> Self {
        Category::from(name.as_str())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_owned()
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{ALL_CATEGORIES, Category};

    #[test]
    fn built_in_names_round_trip() {
        for category in ALL_CATEGORIES {
            let name = category.as_str().to_owned();

            assert_eq!(Category::from(name.as_str()), category);
        }
    }

    #[test]
    fn unknown_names_are_kept_verbatim() {
        let category = Category::from("Ski Trip");

        assert_eq!(category, Category::Other("Ski Trip".to_owned()));
        assert_eq!(category.as_str(), "Ski Trip");
    }

    #[test]
    fn category_match_is_case_sensitive() {
        // "food" is not the built-in "Food" category, it is its own value.
        assert_eq!(Category::from("food"), Category::Other("food".to_owned()));
    }

    #[test]
    fn unknown_categories_use_the_default_style() {
        let category = Category::from("Ski Trip");

        assert_eq!(category.badge_class(), Category::Barber.badge_class());
        assert_eq!(category.bar_class(), Category::Barber.bar_class());
    }
}
