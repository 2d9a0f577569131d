/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

#![warn(
    missing_debug_implementations,
    missing_docs,
    rustdoc::missing_crate_level_docs,
    unreachable_pub,
    rust_2018_idioms
)]

//! An HTTP gateway in front of an S3-compatible object store.
//!
//! The core of the crate is a streaming transfer engine: uploads and
//! downloads move bytes between a local source/sink and a remote object under
//! a caller-supplied deadline, classify failures, and report authoritative
//! byte counts. The HTTP layer is thin glue that maps REST requests onto the
//! engine and shapes JSON responses.
//!
//! # Examples
//!
//! Load configuration from the environment and upload a buffer:
//!
//! ```no_run
//! # async fn example() -> Result<(), object_storage_gateway::error::Error> {
//! use object_storage_gateway::io::InputStream;
//!
//! let config = object_storage_gateway::from_env().load().await?;
//! let session = object_storage_gateway::Session::new(config);
//!
//! let output = session
//!     .upload()
//!     .key("api-test/123/buf.txt")
//!     .body(InputStream::from_static(b"hello buffer"))
//!     .send()
//!     .await?;
//!
//! assert_eq!(output.bytes_written(), 12);
//! # Ok(())
//! # }
//! ```
//!
//! See the documentation for each session operation for more information:
//!
//! * [`upload`](crate::Session::upload) - stream a byte source to an object key
//! * [`download`](crate::Session::download) - stream an object into a local sink
//! * [`list_objects`](crate::Session::list_objects) - materialize all keys under a prefix
//! * [`delete_object`](crate::Session::delete_object) - delete a single object

/// Grace period for best-effort remote cleanup after a cancelled transfer
pub(crate) const ABORT_GRACE: std::time::Duration = std::time::Duration::from_secs(5);

/// Error types emitted by `object-storage-gateway`
pub mod error;

/// Common types used by `object-storage-gateway`
pub mod types;

/// Object key resolution and validation
pub mod key;

/// Types and helpers for I/O
pub mod io;

/// Store session bound to a single bucket
pub mod client;

/// Transfer engine operations
pub mod operation;

/// Session configuration
pub mod config;

/// HTTP gateway layer
pub mod server;

pub use self::client::Session;
use self::config::loader::ConfigLoader;
pub use self::config::Config;
pub use self::key::ObjectKey;

/// Create a config loader
pub fn from_env() -> ConfigLoader {
    ConfigLoader::default()
}
