//! Alert fragments for displaying success and error messages to users.
//!
//! Alerts are rendered as small HTML fragments that HTMX swaps into the
//! `#alert-container` element of the current page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

/// A dismissable message shown at the bottom of the current page.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// A success message with no further details.
    SuccessSimple {
        message: String,
    },
    /// An error message with a short description of what went wrong.
    Error {
        message: String,
        details: String,
    },
}

impl Alert {
    /// Create a new error alert.
    pub fn error(message: &str, details: &str) -> Self {
        Self::Error {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    fn into_markup(self) -> Markup {
        let (container_style, message, details) = match self {
            Alert::SuccessSimple { message } => (
                "p-4 mb-4 text-green-800 border border-green-300 rounded-lg \
                bg-green-50 dark:bg-gray-800 dark:text-green-400 dark:border-green-800",
                message,
                String::new(),
            ),
            Alert::Error { message, details } => (
                "p-4 mb-4 text-red-800 border border-red-300 rounded-lg \
                bg-red-50 dark:bg-gray-800 dark:text-red-400 dark:border-red-800",
                message,
                details,
            ),
        };

        html!(
            div class=(container_style) role="alert"
            {
                h3 class="font-medium" { (message) }

                @if !details.is_empty() {
                    p { (details) }
                }

                button
                    type="button"
                    class="mt-2 text-sm underline cursor-pointer bg-transparent border-none"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    "Dismiss"
                }
            }
        )
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_markup().into_response()
    }
}

/// Render `alert` as an HTML fragment response with `status_code`.
pub fn render_alert(status_code: StatusCode, alert: Alert) -> Response {
    (status_code, alert.into_markup()).into_response()
}

#[cfg(test)]
mod alert_tests {
    use scraper::{Html, Selector};

    use super::Alert;

    #[test]
    fn error_alert_contains_message_and_details() {
        let alert = Alert::error("Could not delete customer", "The customer could not be found.");

        let html = Html::parse_fragment(&alert.into_markup().into_string());

        let heading = html
            .select(&Selector::parse("h3").unwrap())
            .next()
            .expect("No heading found")
            .text()
            .collect::<String>();
        assert_eq!(heading.trim(), "Could not delete customer");

        let details = html
            .select(&Selector::parse("p").unwrap())
            .next()
            .expect("No details paragraph found")
            .text()
            .collect::<String>();
        assert_eq!(details.trim(), "The customer could not be found.");
    }

    #[test]
    fn success_alert_omits_details_paragraph() {
        let alert = Alert::SuccessSimple {
            message: "Customer deleted successfully".to_owned(),
        };

        let html = Html::parse_fragment(&alert.into_markup().into_string());

        assert!(html.select(&Selector::parse("p").unwrap()).next().is_none());
    }
}
