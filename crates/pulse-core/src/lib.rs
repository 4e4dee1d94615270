#![forbid(unsafe_code)]
//! Work item tracking engine behind the Project Pulse dashboard.
//!
//! The presentation layer is an external consumer: it reads snapshots and
//! projections from here and applies changes only through the mutation
//! API on [`store::Store`]. All state is process-local and ephemeral; a
//! restart returns to the seed dataset.
//!
//! # Conventions
//!
//! - **Errors**: library code returns [`error::StoreError`]; binaries
//!   wrap with `anyhow`.
//! - **Logging**: `tracing` macros (`info!`, `warn!`, `error!`, `debug!`,
//!   `trace!`).

pub mod config;
pub mod error;
pub mod model;
pub mod query;
pub mod seed;
pub mod store;

pub use config::{DriftSettings, EngineConfig};
pub use error::{EntityKind, StoreError};
pub use model::{
    MemberStatus, Priority, Project, Report, ReportStatus, TeamMember, WorkItem,
};
pub use seed::Seed;
pub use store::Store;
