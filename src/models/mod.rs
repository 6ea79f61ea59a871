//! Data models for the CRM entities.
//!
//! Each persisted entity has three shapes: the stored record (storage field
//! names on the wire), a caller-facing input with one canonical name per field,
//! and the write payload built from that input.

pub mod activity;
pub mod company;
pub mod contact;
pub mod deal;
pub mod fields;
pub mod metric;
pub mod task;

pub use activity::{Activity, ActivityInput, ActivityPayload};
pub use company::{Company, CompanyInput, CompanyPayload, CompanySummary};
pub use contact::{Contact, ContactInput, ContactPayload};
pub use deal::{Deal, DealInput, DealPayload};
pub use metric::{Metric, MetricValue};
pub use task::{CompletionData, Task, TaskCompletion, TaskInput, TaskPatch};
