/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::cmp;
use std::sync::Mutex;

use crate::config::MIN_PART_SIZE_BYTES;
use crate::operation::upload::UploadInput;
use crate::operation::TransferContext;

pub(crate) type UploadContext = TransferContext<UploadState>;

/// Per-call upload state; destroyed when the call returns.
#[derive(Debug)]
pub(crate) struct UploadState {
    pub(crate) input: UploadInput,
    /// Set once `CreateMultipartUpload` succeeds; used for cleanup
    pub(crate) upload_id: Mutex<Option<String>>,
}

impl UploadContext {
    pub(crate) fn key(&self) -> &str {
        &self.state.input.key
    }

    /// Concrete part size for this request, honoring the per-request
    /// override and the store's minimum.
    pub(crate) fn part_size_bytes(&self) -> u64 {
        match self.state.input.part_size {
            Some(explicit) => cmp::max(explicit, MIN_PART_SIZE_BYTES),
            None => self.handle.upload_part_size_bytes(),
        }
    }

    pub(crate) fn set_upload_id(&self, upload_id: String) {
        let mut id = self.state.upload_id.lock().expect("lock valid");
        id.replace(upload_id);
    }

    pub(crate) fn upload_id(&self) -> Option<String> {
        self.state.upload_id.lock().expect("lock valid").clone()
    }

    /// Fire-and-forget progress notification
    pub(crate) fn notify_progress(&self, total_bytes: u64) {
        if let Some(progress) = &self.state.input.progress {
            progress(total_bytes);
        }
    }
}
