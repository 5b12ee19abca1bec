pub mod current_subject;
pub mod page_query;
pub mod validated_json;

pub use current_subject::CurrentSubject;
pub use page_query::PageQuery;
pub use validated_json::ValidatedJson;
