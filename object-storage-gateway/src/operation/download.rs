/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::Instrument;

use crate::error::{self, Error, ErrorKind};

/// Request type for downloading a single object
mod input;
pub use self::input::{DownloadInput, DownloadInputBuilder};

/// Operation builders
pub mod builders;

/// Response type for downloading a single object
mod output;
pub use self::output::DownloadOutput;

/// Operation struct for downloading a single object into a caller-opened sink
#[derive(Clone, Default, Debug)]
pub(crate) struct Download;

impl Download {
    /// Execute a single `Download` transfer operation
    pub(crate) async fn orchestrate<W>(
        handle: Arc<crate::client::Handle>,
        input: DownloadInput,
        sink: &mut W,
    ) -> Result<DownloadOutput, Error>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let deadline = input.deadline;
        let cancel = input.cancellation_token.clone().unwrap_or_default();
        crate::operation::bounded(deadline, cancel, try_download(handle, input, sink)).await
    }
}

async fn try_download<W>(
    handle: Arc<crate::client::Handle>,
    input: DownloadInput,
    sink: &mut W,
) -> Result<DownloadOutput, Error>
where
    W: AsyncWrite + Unpin + Send,
{
    let resp = handle
        .config
        .client()
        .get_object()
        .bucket(handle.config.bucket())
        .key(input.key())
        .send()
        .instrument(tracing::debug_span!("send-get-object"))
        .await
        .map_err(|err| {
            if matches!(err.as_service_error(), Some(e) if e.is_no_such_key()) {
                return Error::new(ErrorKind::NotFound, err);
            }
            Error::from(err)
        })?;

    let mut body = resp.body;
    let mut bytes_read: u64 = 0;

    while let Some(chunk) = body.try_next().await.map_err(error::copy_failed)? {
        sink.write_all(&chunk).await?;
        bytes_read += chunk.len() as u64;
        if let Some(progress) = &input.progress {
            progress(bytes_read);
        }
    }
    sink.flush().await?;

    tracing::trace!("download of {bytes_read} bytes completed");

    Ok(DownloadOutput {
        bytes_read,
        e_tag: resp.e_tag,
    })
}
