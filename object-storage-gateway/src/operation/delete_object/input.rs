/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{invalid_input, Error};
use crate::key::ObjectKey;

/// Input type for deleting a single object
#[derive(Debug)]
#[non_exhaustive]
pub struct DeleteObjectInput {
    pub(crate) key: String,
    pub(crate) deadline: Option<Instant>,
    pub(crate) cancellation_token: Option<CancellationToken>,
}

impl DeleteObjectInput {
    /// Create a new builder for `DeleteObjectInput`
    pub fn builder() -> DeleteObjectInputBuilder {
        DeleteObjectInputBuilder::default()
    }

    /// The canonical object key to delete
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Builder for [`DeleteObjectInput`]
#[derive(Debug, Default)]
pub struct DeleteObjectInputBuilder {
    key: Option<String>,
    deadline: Option<Instant>,
    cancellation_token: Option<CancellationToken>,
}

impl DeleteObjectInputBuilder {
    /// Set the object key to delete. Required.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set an absolute deadline after which the operation aborts with a
    /// cancellation error.
    pub fn deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set a token the caller can use to cancel the operation mid-flight.
    pub fn cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Consume the builder and construct a [`DeleteObjectInput`]
    pub fn build(self) -> Result<DeleteObjectInput, Error> {
        let key = self.key.ok_or_else(|| invalid_input("an object key is required"))?;
        let key = ObjectKey::parse(&key)?.into_string();

        Ok(DeleteObjectInput {
            key,
            deadline: self.deadline,
            cancellation_token: self.cancellation_token,
        })
    }
}
