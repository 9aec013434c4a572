//! The API endpoints URIs.
//!
//! For endpoints that take parameters, e.g., '/api/users/{user_id}', use [format_endpoint].

/// The route for registering a new user.
pub const REGISTER: &str = "/api/auth/register";
/// The route for logging in a user.
pub const LOG_IN: &str = "/api/auth/login";
/// The route to access a single user's profile.
pub const USER: &str = "/api/users/{user_id}";
/// The route to access a user's categories.
pub const CATEGORIES: &str = "/api/users/{user_id}/categories";
/// The route to access a single category.
pub const CATEGORY: &str = "/api/users/{user_id}/categories/{category_id}";
/// The route to access a user's transactions.
pub const TRANSACTIONS: &str = "/api/users/{user_id}/transactions";
/// The route to access a single transaction.
pub const TRANSACTION: &str = "/api/users/{user_id}/transactions/{transaction_id}";
/// The route for the income/expense summary of a month or year.
pub const SUMMARY_REPORT: &str = "/api/users/{user_id}/reports/summary";
/// The route for the spending per category of a month.
pub const CATEGORY_CHART_REPORT: &str = "/api/users/{user_id}/reports/category-chart";

/// Replace the parameters in `endpoint_path` with `ids`, in order.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/users/{user_id}', '{user_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters.
/// Parameters without a matching ID are left as is, and extra IDs are ignored.
pub fn format_endpoint(endpoint_path: &str, ids: &[i64]) -> String {
    let mut formatted = String::with_capacity(endpoint_path.len());
    let mut remaining = endpoint_path;
    let mut ids = ids.iter();

    while let Some(param_start) = remaining.find('{') {
        let Some(param_length) = remaining[param_start..].find('}') else {
            break;
        };

        let Some(id) = ids.next() else {
            break;
        };

        formatted.push_str(&remaining[..param_start]);
        formatted.push_str(&id.to_string());
        remaining = &remaining[param_start + param_length + 1..];
    }

    formatted.push_str(remaining);
    formatted
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::REGISTER);
        assert_endpoint_is_valid_uri(endpoints::LOG_IN);
        assert_endpoint_is_valid_uri(&format_endpoint(endpoints::USER, &[1]));
        assert_endpoint_is_valid_uri(&format_endpoint(endpoints::CATEGORIES, &[1]));
        assert_endpoint_is_valid_uri(&format_endpoint(endpoints::CATEGORY, &[1, 2]));
        assert_endpoint_is_valid_uri(&format_endpoint(endpoints::TRANSACTIONS, &[1]));
        assert_endpoint_is_valid_uri(&format_endpoint(endpoints::TRANSACTION, &[1, 2]));
        assert_endpoint_is_valid_uri(&format_endpoint(endpoints::SUMMARY_REPORT, &[1]));
        assert_endpoint_is_valid_uri(&format_endpoint(
            endpoints::CATEGORY_CHART_REPORT,
            &[1],
        ));
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint("/hello/{world_id}", &[1]);

        assert_eq!(formatted_path, "/hello/1");
        assert!(formatted_path.parse::<Uri>().is_ok());

        // Parameter with single word should also work.
        let formatted_path = format_endpoint("/hello/{world}", &[1]);

        assert_eq!(formatted_path, "/hello/1");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/hello/world", &[1]);

        assert_eq!(formatted_path, "/hello/world");
    }

    #[test]
    fn parameter_in_middle() {
        let formatted_path = format_endpoint("/hello/{world}/bye", &[1]);

        assert_eq!(formatted_path, "/hello/1/bye");
    }

    #[test]
    fn replaces_parameters_in_order() {
        let formatted_path = format_endpoint(endpoints::TRANSACTION, &[3, 14]);

        assert_eq!(formatted_path, "/api/users/3/transactions/14");
    }

    #[test]
    fn leaves_parameters_without_ids() {
        let formatted_path = format_endpoint(endpoints::CATEGORY, &[3]);

        assert_eq!(formatted_path, "/api/users/3/categories/{category_id}");
    }
}
