//! Test doubles shared by the integration tests.

pub mod mock_record_gateway;

pub use mock_record_gateway::{Failure, MockRecordGateway};
