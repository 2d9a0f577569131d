/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::Error;

/// Input type for listing object keys under a prefix
#[derive(Debug)]
#[non_exhaustive]
pub struct ListObjectsInput {
    pub(crate) prefix: Option<String>,
    pub(crate) deadline: Option<Instant>,
    pub(crate) cancellation_token: Option<CancellationToken>,
}

impl ListObjectsInput {
    /// Create a new builder for `ListObjectsInput`
    pub fn builder() -> ListObjectsInputBuilder {
        ListObjectsInputBuilder::default()
    }

    /// The key prefix the listing is scoped to, if any
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }
}

/// Builder for [`ListObjectsInput`]
#[derive(Debug, Default)]
pub struct ListObjectsInputBuilder {
    prefix: Option<String>,
    deadline: Option<Instant>,
    cancellation_token: Option<CancellationToken>,
}

impl ListObjectsInputBuilder {
    /// Scope the listing to keys under the given prefix.
    ///
    /// A blank prefix is treated the same as no prefix at all and lists the
    /// whole bucket.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Set an absolute deadline after which the listing aborts with a
    /// cancellation error.
    pub fn deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set a token the caller can use to cancel the listing mid-flight.
    pub fn cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Consume the builder and construct a [`ListObjectsInput`]
    pub fn build(self) -> Result<ListObjectsInput, Error> {
        Ok(ListObjectsInput {
            prefix: self.prefix.filter(|p| !p.trim().is_empty()),
            deadline: self.deadline,
            cancellation_token: self.cancellation_token,
        })
    }
}
