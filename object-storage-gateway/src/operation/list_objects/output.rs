/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Output type for listing object keys under a prefix
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ListObjectsOutput {
    pub(crate) keys: Vec<String>,
}

impl ListObjectsOutput {
    /// Every key that matched, in the order the store returned them.
    ///
    /// An empty slice is a normal outcome, not an error.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Consume the output and take ownership of the matched keys.
    pub fn into_keys(self) -> Vec<String> {
        self.keys
    }
}
