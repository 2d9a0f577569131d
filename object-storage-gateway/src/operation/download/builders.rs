/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;
use std::sync::Arc;

use tokio::io::AsyncWrite;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::Error;
use crate::operation::download::{DownloadInputBuilder, DownloadOutput};

/// Fluent builder for constructing a single object download transfer
pub struct DownloadFluentBuilder {
    handle: Arc<crate::client::Handle>,
    inner: DownloadInputBuilder,
}

impl DownloadFluentBuilder {
    pub(crate) fn new(handle: Arc<crate::client::Handle>) -> Self {
        Self {
            handle,
            inner: ::std::default::Default::default(),
        }
    }

    /// Set the object key to download. Required.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.inner = self.inner.key(key);
        self
    }

    /// Set a progress observer invoked with the cumulative byte count after
    /// each chunk is flushed to the sink.
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

    /// Initiate the download and stream the object body into `sink`.
    ///
    /// The sink is opened (and later closed/synced) by the caller; on failure
    /// partially written bytes are left in the sink for the caller to discard.
    pub async fn send<W>(self, sink: &mut W) -> Result<DownloadOutput, Error>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let input = self.inner.build()?;
        crate::operation::download::Download::orchestrate(self.handle, input, sink).await
    }
}

impl fmt::Debug for DownloadFluentBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DownloadFluentBuilder")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}
