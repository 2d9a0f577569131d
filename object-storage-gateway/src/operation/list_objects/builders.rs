/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;
use std::sync::Arc;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::Error;
use crate::operation::list_objects::{ListObjectsInputBuilder, ListObjectsOutput};

/// Fluent builder for constructing an object listing
pub struct ListObjectsFluentBuilder {
    handle: Arc<crate::client::Handle>,
    inner: ListObjectsInputBuilder,
}

impl ListObjectsFluentBuilder {
    pub(crate) fn new(handle: Arc<crate::client::Handle>) -> Self {
        Self {
            handle,
            inner: ::std::default::Default::default(),
        }
    }

    /// Scope the listing to keys under the given prefix.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.inner = self.inner.prefix(prefix);
        self
    }

    /// Set an absolute deadline after which the listing aborts with a
    /// cancellation error.
    pub fn deadline(mut self, deadline: Instant) -> Self {
        self.inner = self.inner.deadline(deadline);
        self
    }

    /// Set a token the caller can use to cancel the listing mid-flight.
    pub fn cancellation_token(mut self, token: CancellationToken) -> Self {
        self.inner = self.inner.cancellation_token(token);
        self
    }

    /// Run the listing to completion, following continuation tokens until the
    /// result is fully materialized.
    pub async fn send(self) -> Result<ListObjectsOutput, Error> {
        let input = self.inner.build()?;
        crate::operation::list_objects::ListObjects::orchestrate(self.handle, input).await
    }
}

impl fmt::Debug for ListObjectsFluentBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListObjectsFluentBuilder")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}
