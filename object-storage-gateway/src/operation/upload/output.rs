/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Output type for uploading a single object
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct UploadOutput {
    pub(crate) bytes_written: u64,
    pub(crate) e_tag: Option<String>,
    pub(crate) upload_id: Option<String>,
}

impl UploadOutput {
    /// Total number of bytes consumed from the source and flushed remotely.
    ///
    /// This is the authoritative transfer size; it is never re-queried from
    /// the store.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Entity tag of the committed object, when the store returned one.
    pub fn e_tag(&self) -> Option<&str> {
        self.e_tag.as_deref()
    }

    /// The multipart upload ID, when the transfer streamed as multipart.
    pub fn upload_id(&self) -> Option<&str> {
        self.upload_id.as_deref()
    }
}
