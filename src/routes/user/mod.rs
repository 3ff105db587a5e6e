mod handler;
mod model;

pub use handler::{batch_insert_users, cached_data, list_users};
pub use model::{BatchInsertRequest, BatchInsertResponse, BatchInsertResult, CandidateUser};
