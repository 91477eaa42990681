pub mod fake_store;
pub mod requests;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use fake_store::{FakeStore, RecordedRequest};
#[allow(unused_imports)]
pub use requests::GameClient;
