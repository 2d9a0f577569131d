/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::cmp;

use crate::error::{invalid_input, Error};
use crate::types::PartSize;

pub(crate) mod loader;

/// Minimum upload part size in bytes
pub(crate) const MIN_PART_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// Default upload part size in bytes when [`PartSize::Auto`] is in effect
pub(crate) const DEFAULT_PART_SIZE_BYTES: u64 = 8 * 1024 * 1024;

/// Configuration for a [`Session`](crate::client::Session)
///
/// Holds the credentialed S3 client and the bucket the session is bound to.
/// Constructed once at startup; a session cannot exist without a validated
/// config, so operations can never run against an unbound bucket.
#[derive(Debug, Clone)]
pub struct Config {
    bucket: String,
    target_part_size: PartSize,
    client: aws_sdk_s3::client::Client,
}

impl Config {
    /// Create a new `Config` builder
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// The bucket all session operations are bound to.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Returns a reference to the target part size to use for upload operations
    pub fn part_size(&self) -> &PartSize {
        &self.target_part_size
    }

    /// The Amazon S3 client instance that will be used to send requests to the store.
    pub fn client(&self) -> &aws_sdk_s3::Client {
        &self.client
    }
}

/// Fluent style builder for [Config]
#[derive(Debug, Clone, Default)]
pub struct Builder {
    bucket: Option<String>,
    target_part_size: PartSize,
    client: Option<aws_sdk_s3::Client>,
}

impl Builder {
    /// Set the bucket all session operations are bound to.
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    /// The target size of each part when streaming an upload as a multipart request.
    ///
    /// The minimum part size is 5 MiB, any part size less than that will be rounded up.
    /// Default is [PartSize::Auto]
    pub fn part_size(self, part_size: PartSize) -> Self {
        let part_size = match part_size {
            PartSize::Target(explicit) => {
                PartSize::Target(cmp::max(explicit, MIN_PART_SIZE_BYTES))
            }
            tps => tps,
        };

        self.set_target_part_size(part_size)
    }

    /// Target part size for an upload.
    ///
    /// NOTE: This does not validate the setting and is meant for internal use only.
    pub(crate) fn set_target_part_size(mut self, part_size: PartSize) -> Self {
        self.target_part_size = part_size;
        self
    }

    /// Set an explicit S3 client to use.
    pub fn client(mut self, client: aws_sdk_s3::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Consumes the builder and constructs a [`Config`]
    ///
    /// Fails with an input error when the bucket is missing/blank or no
    /// client was supplied.
    pub fn build(self) -> Result<Config, Error> {
        let bucket = self
            .bucket
            .filter(|b| !b.trim().is_empty())
            .ok_or_else(|| invalid_input("a non-empty bucket is required"))?;
        let client = self
            .client
            .ok_or_else(|| invalid_input("an S3 client is required"))?;

        Ok(Config {
            bucket,
            target_part_size: self.target_part_size,
            client,
        })
    }
}
