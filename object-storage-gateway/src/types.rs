/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

/// The target part size for an upload request.
#[derive(Debug, Clone, Default)]
pub enum PartSize {
    /// Automatically configure an optimal target part size.
    #[default]
    Auto,

    /// Target part size explicitly given.
    ///
    /// NOTE: This is a suggestion and will be used if possible but may be adjusted for an individual request
    /// as required by the underlying API.
    Target(u64),
}

/// Progress observer invoked with the cumulative byte count after each
/// flushed part of an upload.
///
/// The observer is a fire-and-forget side channel; it cannot fail the
/// transfer it observes.
pub type ProgressFn = Arc<dyn Fn(u64) + Send + Sync>;
