//! # roster
//!
//! A minimal student roster served over HTTP: list, add, rename and remove
//! students held in process memory.
//!
//! The crate has two halves:
//!
//! - The collection itself, [`StudentStore`], with no knowledge of HTTP or
//!   threads, and [`StudentService`], which serialises access to it.
//! - A small HTTP layer: radix-tree routing via [`matchit`], hyper for the
//!   wire, graceful shutdown on SIGTERM / Ctrl-C. [`api::router`] maps the
//!   service onto `/students`.
//!
//! Nothing is persisted. Restarting the process restores the seed roster.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use roster::{Server, StudentService, api};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), roster::Error> {
//!     let service = Arc::new(StudentService::default());
//!     Server::bind("0.0.0.0:3000".parse().unwrap())
//!         .await?
//!         .serve(api::router(service))
//!         .await
//! }
//! ```

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod service;
mod status;
mod store;

pub mod api;
pub mod config;
pub mod telemetry;

pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use service::StudentService;
pub use status::Status;
pub use store::{IdPolicy, StoreError, Student, StudentStore};
