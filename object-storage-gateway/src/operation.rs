/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::future::Future;
use std::sync::Arc;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error;

/// Types for single object upload operation
pub mod upload;

/// Types for single object download operation
pub mod download;

/// Types for the object listing operation
pub mod list_objects;

/// Types for single object delete operation
pub mod delete_object;

/// Container for maintaining context required to carry out a single operation/transfer.
///
/// `State` is whatever additional operation specific state is required for the operation.
#[derive(Debug)]
pub(crate) struct TransferContext<State> {
    pub(crate) handle: Arc<crate::client::Handle>,
    pub(crate) state: Arc<State>,
}

impl<State> TransferContext<State> {
    pub(crate) fn new(handle: Arc<crate::client::Handle>, state: State) -> Self {
        Self {
            handle,
            state: Arc::new(state),
        }
    }

    /// The S3 client to use for SDK operations
    pub(crate) fn client(&self) -> &aws_sdk_s3::Client {
        self.handle.config.client()
    }

    /// The bucket this operation is bound to
    pub(crate) fn bucket(&self) -> &str {
        self.handle.config.bucket()
    }
}

impl<State> Clone for TransferContext<State> {
    fn clone(&self) -> Self {
        Self {
            handle: self.handle.clone(),
            state: self.state.clone(),
        }
    }
}

/// Drive `fut` to completion unless the deadline elapses or the caller
/// cancels first, in which case a distinct cancellation error is returned.
///
/// The future is dropped at its current await point on expiry; callers that
/// hold remote-side state (e.g. an in-progress multipart upload) are
/// responsible for best-effort cleanup afterwards.
pub(crate) async fn bounded<F, T>(
    deadline: Option<Instant>,
    cancel: CancellationToken,
    fut: F,
) -> Result<T, error::Error>
where
    F: Future<Output = Result<T, error::Error>>,
{
    let limited = async {
        match deadline {
            Some(deadline) => tokio::time::timeout_at(deadline, fut)
                .await
                .unwrap_or_else(|_| Err(error::operation_cancelled())),
            None => fut.await,
        }
    };

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(error::operation_cancelled()),
        result = limited => result,
    }
}
