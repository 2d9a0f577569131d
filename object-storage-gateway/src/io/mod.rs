/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

mod stream;

pub(crate) mod part_reader;

pub use self::stream::InputStream;

/// The bounds on the remaining length of a stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SizeHint {
    lower: u64,
    upper: Option<u64>,
}

impl SizeHint {
    /// Set an exact size hint with upper and lower set to `size` bytes.
    pub fn exact(size: u64) -> Self {
        Self {
            lower: size,
            upper: Some(size),
        }
    }

    /// Get the lower bound of the stream size.
    pub fn lower(&self) -> u64 {
        self.lower
    }

    /// Get the upper bound of the stream size if known.
    pub fn upper(&self) -> Option<u64> {
        self.upper
    }
}
