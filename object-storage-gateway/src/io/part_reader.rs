/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::cmp;

use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error;
use crate::io::stream::RawInputStream;
use crate::io::InputStream;

/// Data for a single part of an upload
#[derive(Debug)]
pub(crate) struct PartData {
    /// 1-indexed part number
    pub(crate) part_number: u64,
    /// The data for this part
    pub(crate) data: Bytes,
}

/// Windows an [`InputStream`] into sequential part-sized chunks.
///
/// Each chunk is flushed to the remote store as an independent unit, which
/// bounds memory to one part regardless of source size.
pub(crate) struct PartReader {
    source: Source,
    part_size: usize,
    next_part_number: u64,
    eof: bool,
}

enum Source {
    Buf(Bytes),
    /// File path not yet opened
    Fs(std::path::PathBuf),
    Reader(Box<dyn AsyncRead + Send + Unpin>),
}

impl PartReader {
    pub(crate) fn new(stream: InputStream, part_size: u64) -> Self {
        let source = match stream.inner {
            RawInputStream::Buf(bytes) => Source::Buf(bytes),
            RawInputStream::Fs(body) => Source::Fs(body.path),
            RawInputStream::Reader(reader) => Source::Reader(reader),
        };
        Self {
            source,
            part_size: part_size as usize,
            next_part_number: 1,
            eof: false,
        }
    }

    /// Yield the next part of the stream, or `None` once the source is exhausted.
    pub(crate) async fn next_part(&mut self) -> Result<Option<PartData>, error::Error> {
        if self.eof {
            return Ok(None);
        }

        // file sources are opened lazily on first read
        if let Source::Fs(path) = &self.source {
            let file = tokio::fs::File::open(path).await?;
            self.source = Source::Reader(Box::new(file));
        }

        let data = match &mut self.source {
            Source::Buf(bytes) => {
                let split_at = cmp::min(self.part_size, bytes.len());
                bytes.split_to(split_at)
            }
            Source::Reader(reader) => read_part(reader.as_mut(), self.part_size).await?,
            Source::Fs(_) => unreachable!("file source opened above"),
        };

        if data.is_empty() {
            self.eof = true;
            return Ok(None);
        }
        if data.len() < self.part_size {
            self.eof = true;
        }

        let part_number = self.next_part_number;
        self.next_part_number += 1;
        Ok(Some(PartData { part_number, data }))
    }
}

/// Read up to `part_size` bytes from the reader; short only at EOF.
async fn read_part(
    reader: &mut (dyn AsyncRead + Send + Unpin),
    part_size: usize,
) -> Result<Bytes, error::Error> {
    let mut buf = BytesMut::with_capacity(part_size);
    let mut take = reader.take(part_size as u64);
    loop {
        let n = take.read_buf(&mut buf).await?;
        if n == 0 {
            break;
        }
    }
    Ok(buf.freeze())
}
