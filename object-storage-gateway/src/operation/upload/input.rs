/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;
use std::mem;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{invalid_input, Error};
use crate::io::InputStream;
use crate::key::ObjectKey;
use crate::types::ProgressFn;

/// Input type for uploading a single object
#[non_exhaustive]
pub struct UploadInput {
    pub(crate) key: String,
    pub(crate) body: InputStream,
    pub(crate) part_size: Option<u64>,
    pub(crate) progress: Option<ProgressFn>,
    pub(crate) deadline: Option<Instant>,
    pub(crate) cancellation_token: Option<CancellationToken>,
}

impl UploadInput {
    /// Create a new builder for `UploadInput`
    pub fn builder() -> UploadInputBuilder {
        UploadInputBuilder::default()
    }

    /// The canonical object key the body is uploaded to
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Take the body out of the input, replacing it with an empty stream
    pub(crate) fn take_body(&mut self) -> InputStream {
        mem::replace(&mut self.body, InputStream::from_static(b""))
    }
}

impl fmt::Debug for UploadInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadInput")
            .field("key", &self.key)
            .field("body", &self.body)
            .field("part_size", &self.part_size)
            .field("progress", &self.progress.is_some())
            .field("deadline", &self.deadline)
            .finish_non_exhaustive()
    }
}

/// Builder for [`UploadInput`]
#[derive(Default)]
pub struct UploadInputBuilder {
    key: Option<String>,
    body: Option<InputStream>,
    part_size: Option<u64>,
    progress: Option<ProgressFn>,
    deadline: Option<Instant>,
    cancellation_token: Option<CancellationToken>,
}

impl UploadInputBuilder {
    /// Set the object key to upload to. Required.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set the byte source to upload. Defaults to an empty body.
    pub fn body(mut self, body: InputStream) -> Self {
        self.body = Some(body);
        self
    }

    /// Override the session part size for this request.
    ///
    /// Zero means "use the session default". Values below the store's
    /// minimum part size are rounded up at transfer time.
    pub fn part_size(mut self, part_size: u64) -> Self {
        self.part_size = Some(part_size);
        self
    }

    /// Set a progress observer invoked with the cumulative byte count after
    /// each flushed part. Observer failures never abort the transfer.
    pub fn progress(mut self, progress: impl Fn(u64) + Send + Sync + 'static) -> Self {
        self.progress = Some(std::sync::Arc::new(progress));
        self
    }

    /// Set an absolute deadline after which the transfer aborts with a
    /// cancellation error.
    pub fn deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set a token the caller can use to cancel the transfer mid-flight.
    pub fn cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Consume the builder and construct an [`UploadInput`]
    ///
    /// The key is validated and canonicalized here; traversal segments and
    /// empty components are rejected.
    pub fn build(self) -> Result<UploadInput, Error> {
        let key = self.key.ok_or_else(|| invalid_input("an object key is required"))?;
        let key = ObjectKey::parse(&key)?.into_string();

        Ok(UploadInput {
            key,
            body: self.body.unwrap_or_else(|| InputStream::from_static(b"")),
            part_size: self.part_size.filter(|size| *size > 0),
            progress: self.progress,
            deadline: self.deadline,
            cancellation_token: self.cancellation_token,
        })
    }
}

impl fmt::Debug for UploadInputBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadInputBuilder")
            .field("key", &self.key)
            .field("body", &self.body)
            .field("part_size", &self.part_size)
            .field("progress", &self.progress.is_some())
            .field("deadline", &self.deadline)
            .finish_non_exhaustive()
    }
}
