/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;
use std::path::{Path, PathBuf};

use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tokio::io::AsyncRead;

use crate::error;
use crate::io::SizeHint;

/// Source of binary data for an upload.
///
/// `InputStream` wraps a stream of data for ease of use. Buffer and file
/// backed streams carry an exact size hint; reader backed streams have an
/// unknown length and always go out as a chunked multipart transfer.
pub struct InputStream {
    pub(crate) inner: RawInputStream,
}

impl InputStream {
    /// Create a new `InputStream` from a static byte slice
    pub fn from_static(bytes: &'static [u8]) -> Self {
        let inner = RawInputStream::Buf(bytes.into());
        Self { inner }
    }

    /// Create a new `InputStream` that reads data from a given `path`.
    ///
    /// The file length is captured at construction time; the contents MUST
    /// not change before the transfer completes.
    pub fn from_path(path: impl AsRef<Path>) -> Result<InputStream, error::Error> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)?;
        let inner = RawInputStream::Fs(PathBody {
            path: path.to_owned(),
            length: metadata.len(),
        });
        Ok(Self { inner })
    }

    /// Create a new `InputStream` from an arbitrary async reader.
    ///
    /// The length is unknown up front, so the transfer is always streamed as
    /// a chunked multipart upload.
    pub fn from_reader(reader: impl AsyncRead + Send + Sync + Unpin + 'static) -> Self {
        let inner = RawInputStream::Reader(Box::new(reader));
        Self { inner }
    }

    /// Return the bounds on the remaining length of the `InputStream`
    pub fn size_hint(&self) -> SizeHint {
        self.inner.size_hint()
    }

    /// Whether this stream can only be sent as a multipart upload
    pub(crate) fn is_mpu_only(&self) -> bool {
        matches!(self.inner, RawInputStream::Reader(_))
    }

    /// Converts `InputStream` to a ByteStream that can be used in `PutObject`.
    ///
    /// Only sized streams (buffer/file) can be converted; reader backed
    /// streams must go through the part reader.
    pub(crate) async fn into_byte_stream(self) -> Result<ByteStream, error::Error> {
        match self.inner {
            RawInputStream::Buf(bytes) => Ok(ByteStream::from(bytes)),
            RawInputStream::Fs(body) => ByteStream::from_path(body.path)
                .await
                .map_err(error::copy_failed),
            RawInputStream::Reader(_) => Err(error::invalid_input(
                "a reader backed stream cannot be sent as a single request",
            )),
        }
    }
}

impl From<Bytes> for InputStream {
    fn from(value: Bytes) -> Self {
        Self {
            inner: RawInputStream::Buf(value),
        }
    }
}

impl From<Vec<u8>> for InputStream {
    fn from(value: Vec<u8>) -> Self {
        Self::from(Bytes::from(value))
    }
}

impl fmt::Debug for InputStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputStream")
            .field("inner", &self.inner)
            .finish()
    }
}

pub(crate) enum RawInputStream {
    /// In-memory buffer to read from
    Buf(Bytes),
    /// File based input
    Fs(PathBody),
    /// Caller provided reader, length unknown
    Reader(Box<dyn AsyncRead + Send + Sync + Unpin>),
}

impl RawInputStream {
    pub(crate) fn size_hint(&self) -> SizeHint {
        match self {
            RawInputStream::Buf(bytes) => SizeHint::exact(bytes.len() as u64),
            RawInputStream::Fs(body) => SizeHint::exact(body.length),
            RawInputStream::Reader(_) => SizeHint::default(),
        }
    }
}

impl fmt::Debug for RawInputStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawInputStream::Buf(bytes) => f.debug_tuple("Buf").field(&bytes.len()).finish(),
            RawInputStream::Fs(body) => f.debug_tuple("Fs").field(body).finish(),
            RawInputStream::Reader(_) => f.debug_tuple("Reader").finish(),
        }
    }
}

/// File based body with its length captured at construction.
#[derive(Debug)]
pub(crate) struct PathBody {
    pub(crate) path: PathBuf,
    pub(crate) length: u64,
}
