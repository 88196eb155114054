//! The shared form fields for creating and editing expenses.

use maud::{Markup, html};
use time::Date;

use crate::{
    category::{ALL_CATEGORIES, Category},
    date_format::format_iso_date,
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
};

/// The values the form fields start out with.
pub struct ExpenseFormDefaults<'a> {
    /// The pre-filled amount, if any.
    pub amount: Option<f64>,
    /// The pre-selected category, if any.
    pub category: Option<&'a Category>,
    /// The pre-filled description, if any.
    pub description: Option<&'a str>,
    /// The pre-filled date.
    pub date: Date,
}

/// Render the amount, category, description and date fields.
///
/// The date input uses the browser's ISO format; the endpoints convert it to
/// the canonical display format when the form is submitted.
pub fn expense_form_fields(defaults: &ExpenseFormDefaults<'_>) -> Markup {
    let amount_str = defaults.amount.map(|amount| format!("{amount:.2}"));

    html! {
        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "Amount (лв)"
            }

            input
                name="amount"
                id="amount"
                type="number"
                step="0.01"
                min="0.01"
                placeholder="0.00"
                required
                value=[amount_str.as_deref()]
                autofocus
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="category"
                class=(FORM_LABEL_STYLE)
            {
                "Category"
            }

            select
                name="category"
                id="category"
                required
                class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" { "Select category" }

                @for category in &ALL_CATEGORIES {
                    @if Some(category) == defaults.category {
                        option value=(category) selected { (category) }
                    } @else {
                        option value=(category) { (category) }
                    }
                }
            }
        }

        div
        {
            label
                for="description"
                class=(FORM_LABEL_STYLE)
            {
                "Description"
            }

            input
                name="description"
                id="description"
                type="text"
                placeholder="Enter description..."
                required
                value=[defaults.description]
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="date"
                class=(FORM_LABEL_STYLE)
            {
                "Date"
            }

            input
                name="date"
                id="date"
                type="date"
                value=(format_iso_date(defaults.date))
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}
