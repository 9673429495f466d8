//! The transaction creation form, shared by the full page and the modal.

use maud::{Markup, html};
use time::Date;

use crate::{
    category::category_options_view,
    currency::Currency,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner},
    notification::TOAST_CONTAINER_ID,
    operation::Operation,
};

/// Default values for the transaction form fields.
pub(crate) struct TransactionFormDefaults {
    /// The initially selected date.
    pub date: Date,
    /// The latest date the date picker allows.
    pub max_date: Date,
}

/// The transaction creation form.
///
/// The operation and currency selects are populated server-side. The
/// category select is dependent: changing the operation re-requests its
/// options for the chosen operation.
pub(crate) fn transaction_form_view(
    operations: &[Operation],
    currencies: &[Currency],
    defaults: &TransactionFormDefaults,
) -> Markup {
    html! {
        form
            hx-post=(endpoints::POST_TRANSACTION)
            hx-target-error=(format!("#{TOAST_CONTAINER_ID}"))
            hx-indicator="#indicator"
            class="w-full space-y-4 md:space-y-6"
        {
            div
            {
                label
                    for="operation_id"
                    class=(FORM_LABEL_STYLE)
                {
                    "Operation"
                }

                select
                    name="operation_id"
                    id="operation_id"
                    required
                    hx-get=(endpoints::CATEGORY_OPTIONS)
                    hx-target="#category_id"
                    hx-trigger="change"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" disabled selected { "Select an operation" }

                    @for operation in operations {
                        option value=(operation.id) { (operation.name) }
                    }
                }
            }

            div
            {
                label
                    for="category_id"
                    class=(FORM_LABEL_STYLE)
                {
                    "Category"
                }

                select
                    name="category_id"
                    id="category_id"
                    required
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    (category_options_view(&[]))
                }
            }

            div
            {
                label
                    for="currency_id"
                    class=(FORM_LABEL_STYLE)
                {
                    "Currency"
                }

                select
                    name="currency_id"
                    id="currency_id"
                    required
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" disabled selected { "Select a currency" }

                    @for currency in currencies {
                        option value=(currency.id) { (currency.code) " (" (currency.symbol) ")" }
                    }
                }
            }

            div
            {
                label
                    for="amount"
                    class=(FORM_LABEL_STYLE)
                {
                    "Amount"
                }

                input
                    name="amount"
                    id="amount"
                    type="number"
                    step="0.01"
                    min="0.01"
                    placeholder="0.01"
                    required
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
                    max=(defaults.max_date)
                    value=(defaults.date)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
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
                    placeholder="Description"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE)
            {
                span id="indicator" class="htmx-indicator" { (loading_spinner()) }
                "Save Transaction"
            }
        }
    }
}
