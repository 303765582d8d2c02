//! # setup-inspequte
//!
//! Installs a platform-specific `inspequte` release into a CI runner's tool
//! cache and puts it on the job's `PATH`.
//!
//! The interesting part is release resolution: turning the runner's
//! platform/arch and a free-form version request into one downloadable
//! archive. Everything around it (downloading, unpacking, caching, talking to
//! the runner) sits behind small traits so it can be swapped out in tests.
//!
//! ## Modules Overview
//! - [`target`] – Host platform/arch to target triples and archive format
//! - [`version`] – Version input to release tag, release tag to cache key
//! - [`registry`] – Release metadata types and the GitHub releases client
//! - [`resolve`] – Picking the release asset for a target
//! - [`tool_cache`] – Download, extract and cache-store operations
//! - [`runner`] – Inputs, outputs, `PATH` and failure reporting
//! - [`setup`] – The install sequence and its single failure boundary
//! - [`config`] – Constants and registry configuration
//! - [`error`] – Error type shared by all of the above

pub mod config;
pub mod error;
pub mod registry;
pub mod resolve;
pub mod runner;
pub mod setup;
pub mod target;
pub mod tool_cache;
pub mod version;

pub use config::*;
pub use error::SetupError;
pub use registry::*;
pub use resolve::*;
pub use runner::*;
pub use setup::*;
pub use target::*;
pub use tool_cache::*;
pub use version::*;
