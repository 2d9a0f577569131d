/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use crate::config::DEFAULT_PART_SIZE_BYTES;
use crate::types::PartSize;
use crate::Config;

/// Store session bound to a single bucket.
///
/// A session owns the authenticated connection to the remote store. It is
/// created once at startup and shared (cheaply cloned) across all concurrent
/// requests; the underlying S3 client is safe for concurrent use. All mutable
/// transfer state lives in per-call operation inputs, so concurrent transfers
/// never contend on the session.
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) handle: Arc<Handle>,
}

/// Whatever is needed to carry out operations, e.g. config, bucket binding, env details
#[derive(Debug)]
pub(crate) struct Handle {
    pub(crate) config: Config,
}

impl Handle {
    /// Get the concrete target part size to use for uploads
    pub(crate) fn upload_part_size_bytes(&self) -> u64 {
        match self.config.part_size() {
            PartSize::Auto => DEFAULT_PART_SIZE_BYTES,
            PartSize::Target(explicit) => *explicit,
        }
    }
}

impl Session {
    /// Creates a new session from a validated config.
    pub fn new(config: Config) -> Session {
        let handle = Arc::new(Handle { config });
        Session { handle }
    }

    /// Returns the session's configuration
    pub fn config(&self) -> &Config {
        &self.handle.config
    }

    /// Upload a single object to the session's bucket.
    ///
    /// Constructs a fluent builder for the
    /// [`Upload`](crate::operation::upload::builders::UploadFluentBuilder) operation.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use object_storage_gateway::error::Error;
    /// use object_storage_gateway::io::InputStream;
    /// use std::path::Path;
    ///
    /// async fn upload_file(
    ///     session: &object_storage_gateway::Session,
    ///     path: impl AsRef<Path>,
    /// ) -> Result<(), Error> {
    ///     let stream = InputStream::from_path(path)?;
    ///     let output = session
    ///         .upload()
    ///         .key("my-key")
    ///         .body(stream)
    ///         .send()
    ///         .await?;
    ///     println!("wrote {} bytes", output.bytes_written());
    ///     Ok(())
    /// }
    /// ```
    pub fn upload(&self) -> crate::operation::upload::builders::UploadFluentBuilder {
        crate::operation::upload::builders::UploadFluentBuilder::new(self.handle.clone())
    }

    /// Download a single object from the session's bucket into a caller-opened sink.
    ///
    /// Constructs a fluent builder for the
    /// [`Download`](crate::operation::download::builders::DownloadFluentBuilder) operation.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use object_storage_gateway::error::Error;
    ///
    /// async fn get_object(session: &object_storage_gateway::Session) -> Result<(), Error> {
    ///     let mut dest = tokio::fs::File::create("/tmp/my-key").await?;
    ///     let output = session.download().key("my-key").send(&mut dest).await?;
    ///     println!("read {} bytes", output.bytes_read());
    ///     Ok(())
    /// }
    /// ```
    pub fn download(&self) -> crate::operation::download::builders::DownloadFluentBuilder {
        crate::operation::download::builders::DownloadFluentBuilder::new(self.handle.clone())
    }

    /// List every object key under a prefix in the session's bucket.
    ///
    /// Pagination is handled internally and the result is fully materialized
    /// before it is returned; an empty result is a normal, successful
    /// outcome.
    ///
    /// Constructs a fluent builder for the
    /// [`ListObjects`](crate::operation::list_objects::builders::ListObjectsFluentBuilder) operation.
    pub fn list_objects(&self) -> crate::operation::list_objects::builders::ListObjectsFluentBuilder {
        crate::operation::list_objects::builders::ListObjectsFluentBuilder::new(self.handle.clone())
    }

    /// Delete a single object from the session's bucket.
    ///
    /// Deleting a key that does not exist fails with a not-found error,
    /// distinct from transient or permission failures.
    ///
    /// Constructs a fluent builder for the
    /// [`DeleteObject`](crate::operation::delete_object::builders::DeleteObjectFluentBuilder) operation.
    pub fn delete_object(
        &self,
    ) -> crate::operation::delete_object::builders::DeleteObjectFluentBuilder {
        crate::operation::delete_object::builders::DeleteObjectFluentBuilder::new(
            self.handle.clone(),
        )
    }
}
