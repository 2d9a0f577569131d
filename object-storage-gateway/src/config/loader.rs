/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::config::Builder;
use crate::error::{invalid_input, Error};
use crate::types::PartSize;
use crate::Config;

/// Environment variable naming the bucket the session binds to
const BUCKET_VAR: &str = "GATEWAY_BUCKET";

/// Load session [`Config`] from the environment.
///
/// Credentials, region, and endpoint come from the standard AWS environment
/// chain (env vars, shared credentials/config files). The bucket comes from
/// `GATEWAY_BUCKET` unless set explicitly on the loader.
#[derive(Default, Debug)]
pub struct ConfigLoader {
    builder: Builder,
    bucket: Option<String>,
}

impl ConfigLoader {
    /// Set the bucket to bind to, overriding `GATEWAY_BUCKET`.
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    /// The target size of each part when streaming an upload as a multipart request.
    ///
    /// The minimum part size is 5 MiB, any part size less than that will be rounded up.
    /// Default is [PartSize::Auto]
    pub fn part_size(mut self, part_size: PartSize) -> Self {
        self.builder = self.builder.part_size(part_size);
        self
    }

    /// Load the configuration, authenticating against the environment chain.
    ///
    /// Failure here is fatal to startup; nothing is retried.
    pub async fn load(self) -> Result<Config, Error> {
        let bucket = match self.bucket {
            Some(bucket) => bucket,
            None => std::env::var(BUCKET_VAR)
                .map_err(|_| invalid_input(format!("{BUCKET_VAR} is not set")))?,
        };

        let shared_config = aws_config::from_env().load().await;
        let client = aws_sdk_s3::Client::new(&shared_config);

        self.builder.bucket(bucket).client(client).build()
    }
}
