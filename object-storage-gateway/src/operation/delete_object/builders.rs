/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;
use std::sync::Arc;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::Error;
use crate::operation::delete_object::{DeleteObjectInputBuilder, DeleteObjectOutput};

/// Fluent builder for constructing a single object delete
pub struct DeleteObjectFluentBuilder {
    handle: Arc<crate::client::Handle>,
    inner: DeleteObjectInputBuilder,
}

impl DeleteObjectFluentBuilder {
    pub(crate) fn new(handle: Arc<crate::client::Handle>) -> Self {
        Self {
            handle,
            inner: ::std::default::Default::default(),
        }
    }

    /// Set the object key to delete. Required.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.inner = self.inner.key(key);
        self
    }

    /// Set an absolute deadline after which the operation aborts with a
    /// cancellation error.
    pub fn deadline(mut self, deadline: Instant) -> Self {
        self.inner = self.inner.deadline(deadline);
        self
    }

    /// Set a token the caller can use to cancel the operation mid-flight.
    pub fn cancellation_token(mut self, token: CancellationToken) -> Self {
        self.inner = self.inner.cancellation_token(token);
        self
    }

    /// Run the delete to completion.
    pub async fn send(self) -> Result<DeleteObjectOutput, Error> {
        let input = self.inner.build()?;
        crate::operation::delete_object::DeleteObject::orchestrate(self.handle, input).await
    }
}

impl fmt::Debug for DeleteObjectFluentBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeleteObjectFluentBuilder")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}
