//! Custom request extractors.

mod validated_json;
mod validated_query;

pub use validated_json::ValidatedJson;
pub use validated_query::{empty_string_as_none, ValidatedQuery};
