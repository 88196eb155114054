//! The caller-owned view state for the dashboard.
//!
//! The dashboard is server rendered, so the state that would live in a
//! client-side store (the active category filter, the sort column and
//! direction, which month is selected and which months are expanded) is
//! round-tripped through the URL query string instead. Every aggregation
//! function takes this state as an explicit value; none of them keep any
//! state of their own between calls.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{category::Category, date_format::MonthKey};

/// The column to sort the expense tables by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortColumn {
    /// Sort by expense date.
    Date,
    /// Sort by category name.
    Category,
    /// Sort by amount.
    Amount,
    /// Sort by description.
    Description,
}

/// The direction to sort in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest (or oldest, or alphabetically first) values first.
    Asc,
    /// Largest (or newest, or alphabetically last) values first.
    Desc,
}

/// A sort column paired with a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig {
    /// The column to sort by.
    pub column: SortColumn,
    /// The direction to sort in.
    pub direction: SortDirection,
}

impl Default for SortConfig {
    /// Newest expenses first.
    fn default() -> Self {
        Self {
            column: SortColumn::Date,
            direction: SortDirection::Desc,
        }
    }
}

impl SortConfig {
    /// The sort config after clicking the header for `column`.
    ///
    /// Clicking the column that is already active flips its direction;
    /// clicking a different column selects it in ascending order.
    pub fn toggle(self, column: SortColumn) -> Self {
        let direction = if self.column == column && self.direction == SortDirection::Asc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };

        Self { column, direction }
    }
}

/// The complete view state the dashboard handler passes into the
/// aggregation and statistics functions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    /// Keep only expenses in this category, if set.
    pub filter_category: Option<Category>,
    /// How to sort expenses within each month group.
    pub sort: SortConfig,
    /// The month whose summary cards are shown, if one is selected.
    pub selected_month: Option<MonthKey>,
    /// The months whose expense tables are expanded.
    pub expanded_months: HashSet<MonthKey>,
}

impl SelectionState {
    /// Whether the summary cards should show month-scoped statistics.
    ///
    /// A month drives the summary cards only while it is both selected and
    /// expanded; collapsing it falls back to the year view without
    /// clearing the selection.
    pub fn is_month_focused(&self) -> bool {
        self.selected_month
            .map(|month| self.expanded_months.contains(&month))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use time::macros::date;

    use crate::date_format::MonthKey;

    use super::{SelectionState, SortColumn, SortConfig, SortDirection};

    #[test]
    fn default_sort_is_date_descending() {
        let config = SortConfig::default();

        assert_eq!(config.column, SortColumn::Date);
        assert_eq!(config.direction, SortDirection::Desc);
    }

    #[test]
    fn toggling_the_active_column_flips_direction() {
        let config = SortConfig {
            column: SortColumn::Amount,
            direction: SortDirection::Asc,
        };

        let toggled = config.toggle(SortColumn::Amount);

        assert_eq!(toggled.column, SortColumn::Amount);
        assert_eq!(toggled.direction, SortDirection::Desc);

        let toggled_again = toggled.toggle(SortColumn::Amount);
        assert_eq!(toggled_again.direction, SortDirection::Asc);
    }

    #[test]
    fn toggling_a_different_column_selects_it_ascending() {
        let config = SortConfig {
            column: SortColumn::Date,
            direction: SortDirection::Desc,
        };

        let toggled = config.toggle(SortColumn::Category);

        assert_eq!(toggled.column, SortColumn::Category);
        assert_eq!(toggled.direction, SortDirection::Asc);
    }

    #[test]
    fn month_focus_requires_selection_and_expansion() {
        let month = MonthKey::from_date(date!(2025 - 03 - 01));
        let other = MonthKey::from_date(date!(2025 - 04 - 01));

        let mut state = SelectionState::default();
        assert!(!state.is_month_focused());

        // Selected but collapsed: still the year view.
        state.selected_month = Some(month);
        assert!(!state.is_month_focused());

        // A different month being expanded does not count.
        state.expanded_months = HashSet::from([other]);
        assert!(!state.is_month_focused());

        state.expanded_months.insert(month);
        assert!(state.is_month_focused());
    }
}
