// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! rv-client: request/response clients for the Renova backend services.
//!
//! Three stateless-per-call clients, one per service: the learning
//! service (runs), the capability service (packs), and the workspace +
//! artifact services. Each sits behind a trait seam so the store can be
//! driven by fakes in tests.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod capability;
pub mod config;
pub mod error;
pub mod http;
pub mod learning;
pub mod traits;
pub mod workspace;

#[cfg(any(test, feature = "test-support"))]
pub mod fakes;

pub use capability::CapabilityClient;
pub use config::ServiceConfig;
pub use error::ClientError;
pub use http::Http;
pub use learning::LearningClient;
pub use traits::{Page, PackResolver, RunDirectory, WorkspaceDirectory};
pub use workspace::{ArtifactRead, WorkspaceClient};

#[cfg(any(test, feature = "test-support"))]
pub use fakes::{FakePackResolver, FakeRunDirectory, FakeWorkspaceDirectory};
