//! CRM services - typed async access to a hosted CRM record store.
//!
//! The record store keeps contacts, companies, deals, activities and
//! dashboard metrics as generic records. This crate wraps its fetch/create/
//! update/delete protocol in one service per entity, and keeps a small
//! in-memory task list whose completion is logged back as an activity.
//!
//! # Architecture
//!
//! - **config**: Configuration management from environment variables
//! - **error**: Error types for the gateway, tasks and configuration
//! - **client**: HTTP client for the record store and its async gateway trait
//! - **repositories**: Per-entity envelope handling on top of the gateway
//! - **models**: Records, caller inputs and write payloads
//! - **services**: Business operations per entity, plus the task store
//! - **metrics**: Request counters and timings
//! - **observability**: Logging setup

pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod observability;
pub mod repositories;
pub mod services;

pub use client::{AsyncRecordClient, AsyncRecordGateway, FetchQuery, RecordClient};
pub use config::Config;
pub use error::{ConfigError, GatewayError, TaskError};
pub use metrics::{HttpTimer, Metrics, MetricsSummary};
pub use models::{
    Activity, ActivityInput, Company, CompanyInput, CompanySummary, CompletionData, Contact,
    ContactInput, Deal, DealInput, Metric, Task, TaskCompletion, TaskInput, TaskPatch,
};
pub use services::{
    ActivityService, CompanyService, ContactService, DealService, MetricService, Services,
    TaskStore,
};
