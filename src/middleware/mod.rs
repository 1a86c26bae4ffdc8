pub mod query_id;

pub use query_id::{make_span_with_query_id, query_id_middleware, QueryId, QUERY_ID_HEADER};
