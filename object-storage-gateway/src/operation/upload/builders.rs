/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;
use std::sync::Arc;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::Error;
use crate::io::InputStream;
use crate::operation::upload::{UploadInputBuilder, UploadOutput};

/// Fluent builder for constructing a single object upload transfer
pub struct UploadFluentBuilder {
    handle: Arc<crate::client::Handle>,
    inner: UploadInputBuilder,
}

impl UploadFluentBuilder {
    pub(crate) fn new(handle: Arc<crate::client::Handle>) -> Self {
        Self {
            handle,
            inner: ::std::default::Default::default(),
        }
    }

    /// Set the object key to upload to. Required.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.inner = self.inner.key(key);
        self
    }

    /// Set the byte source to upload. Defaults to an empty body.
    pub fn body(mut self, body: InputStream) -> Self {
        self.inner = self.inner.body(body);
        self
    }

    /// Override the session part size for this request. Zero means "use the
    /// session default".
    pub fn part_size(mut self, part_size: u64) -> Self {
        self.inner = self.inner.part_size(part_size);
        self
    }

    /// Set a progress observer invoked with the cumulative byte count after
    /// each flushed part.
    pub fn progress(mut self, progress: impl Fn(u64) + Send + Sync + 'static) -> Self {
        self.inner = self.inner.progress(progress);
        self
    }

    /// Set an absolute deadline after which the transfer aborts with a
    /// cancellation error.
    pub fn deadline(mut self, deadline: Instant) -> Self {
        self.inner = self.inner.deadline(deadline);
        self
    }

    /// Set a token the caller can use to cancel the transfer mid-flight.
    pub fn cancellation_token(mut self, token: CancellationToken) -> Self {
        self.inner = self.inner.cancellation_token(token);
        self
    }

    /// Initiate the upload and drive it to completion.
    pub async fn send(self) -> Result<UploadOutput, Error> {
        let input = self.inner.build()?;
        crate::operation::upload::Upload::orchestrate(self.handle, input).await
    }
}

impl fmt::Debug for UploadFluentBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadFluentBuilder")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl crate::operation::upload::UploadInputBuilder {
    /// Initiate an upload transfer for a single object with this input using the given session.
    pub async fn send_with(self, session: &crate::Session) -> Result<UploadOutput, Error> {
        let mut fluent_builder = session.upload();
        fluent_builder.inner = self;
        fluent_builder.send().await
    }
}
