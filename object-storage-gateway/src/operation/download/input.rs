/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{invalid_input, Error};
use crate::key::ObjectKey;
use crate::types::ProgressFn;

/// Input type for downloading a single object into a caller-opened sink
#[non_exhaustive]
pub struct DownloadInput {
    pub(crate) key: String,
    pub(crate) progress: Option<ProgressFn>,
    pub(crate) deadline: Option<Instant>,
    pub(crate) cancellation_token: Option<CancellationToken>,
}

impl DownloadInput {
    /// Create a new builder for `DownloadInput`
    pub fn builder() -> DownloadInputBuilder {
        DownloadInputBuilder::default()
    }

    /// The canonical object key to download
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Debug for DownloadInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DownloadInput")
            .field("key", &self.key)
            .field("progress", &self.progress.is_some())
            .field("deadline", &self.deadline)
            .finish_non_exhaustive()
    }
}

/// Builder for [`DownloadInput`]
#[derive(Default)]
pub struct DownloadInputBuilder {
    key: Option<String>,
    progress: Option<ProgressFn>,
    deadline: Option<Instant>,
    cancellation_token: Option<CancellationToken>,
}

impl DownloadInputBuilder {
    /// Set the object key to download. Required.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set a progress observer invoked with the cumulative byte count after
    /// each chunk is flushed to the sink.
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

    /// Consume the builder and construct a [`DownloadInput`]
    pub fn build(self) -> Result<DownloadInput, Error> {
        let key = self.key.ok_or_else(|| invalid_input("an object key is required"))?;
        let key = ObjectKey::parse(&key)?.into_string();

        Ok(DownloadInput {
            key,
            progress: self.progress,
            deadline: self.deadline,
            cancellation_token: self.cancellation_token,
        })
    }
}

impl fmt::Debug for DownloadInputBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DownloadInputBuilder")
            .field("key", &self.key)
            .field("progress", &self.progress.is_some())
            .field("deadline", &self.deadline)
            .finish_non_exhaustive()
    }
}
