/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Output type for downloading a single object
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct DownloadOutput {
    pub(crate) bytes_read: u64,
    pub(crate) e_tag: Option<String>,
}

impl DownloadOutput {
    /// Total number of bytes read from the store and flushed into the sink.
    ///
    /// This is the authoritative transfer size; it is counted as the bytes
    /// pass through, never taken from response metadata.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Entity tag of the object that was read, when the store returned one.
    pub fn e_tag(&self) -> Option<&str> {
        self.e_tag.as_deref()
    }
}
