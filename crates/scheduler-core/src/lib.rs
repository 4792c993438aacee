//! # Scheduler Core Library
//!
//! The domain core of a personal task scheduler: tasks carrying an optional
//! compact recurrence rule, a pure evaluator that computes a rule's next
//! occurrence, and the lifecycle that applies it on create, edit and
//! completion.
//!
//! ## Core Modules
//!
//! - [`recurrence`]: Rule grammar (`d N`, `y`, `w …`, `m … […]`) and evaluator
//! - [`lifecycle`]: Create/get/edit/complete/delete/list orchestration
//! - [`repository`]: The [`repository::TaskStore`] seam and its SQLite implementation
//! - [`db`]: Database connection and migration management
//! - [`models`]: Core data structures and transfer objects
//! - [`date`]: Canonical `YYYYMMDD` dates and the clock abstraction
//! - [`error`]: Error types and their classification
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use scheduler_core::{
//!     db, lifecycle::TaskLifecycle, models::NewTaskData, repository::SqliteRepository,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), scheduler_core::error::CoreError> {
//!     let pool = db::establish_connection("scheduler.db").await?;
//!     let lifecycle = TaskLifecycle::with_system_clock(SqliteRepository::new(pool));
//!
//!     let id = lifecycle
//!         .create_task(NewTaskData {
//!             title: "Pay rent".to_string(),
//!             repeat: "m -1".to_string(),
//!             ..Default::default()
//!         })
//!         .await?;
//!     println!("Created task {id}");
//!
//!     Ok(())
//! }
//! ```

pub mod date;
pub mod db;
pub mod error;
pub mod lifecycle;
pub mod models;
pub mod recurrence;
pub mod repository;
