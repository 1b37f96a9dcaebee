pub mod batch;

pub use batch::{BatchRequest, run_client_batch};
