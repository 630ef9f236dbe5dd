//! Validated query-string extractor.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use std::{fmt::Display, str::FromStr};
use validator::Validate;

use super::validated_json::format_validation_errors;
use crate::errors::AppError;

/// Query-string counterpart of `ValidatedJson`: malformed parameters and
/// failed validation both become `AppError::Validation`.
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

        Ok(ValidatedQuery(value))
    }
}

/// Deserialize an optional query parameter, treating an empty value
/// (`?year=`) the same as an absent one.
///
/// Use with `#[serde(default, deserialize_with = "empty_string_as_none")]`.
pub fn empty_string_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = Option::<String>::deserialize(de)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse::<T>().map(Some).map_err(D::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Uri;

    #[derive(Debug, Deserialize)]
    struct YearQuery {
        #[serde(default, deserialize_with = "empty_string_as_none")]
        year: Option<i32>,
        client: Option<String>,
    }

    fn parse(uri: &str) -> Result<YearQuery, String> {
        let uri: Uri = uri.parse().unwrap();
        Query::<YearQuery>::try_from_uri(&uri)
            .map(|Query(q)| q)
            .map_err(|e| e.body_text())
    }

    #[test]
    fn test_blank_number_is_none() {
        let query = parse("/reports?year=&client=").unwrap();
        assert_eq!(query.year, None);
        assert_eq!(query.client.as_deref(), Some(""));
    }

    #[test]
    fn test_missing_and_present_number() {
        assert_eq!(parse("/reports").unwrap().year, None);
        assert_eq!(parse("/reports?year=2025").unwrap().year, Some(2025));
        assert_eq!(parse("/reports?year=%202025%20").unwrap().year, Some(2025));
    }

    #[test]
    fn test_malformed_number_is_rejected() {
        assert!(parse("/reports?year=abc").is_err());
    }
}
