/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use tracing::Instrument;

use crate::error::Error;

/// Request type for listing object keys
mod input;
pub use self::input::{ListObjectsInput, ListObjectsInputBuilder};

/// Operation builders
pub mod builders;

/// Response type for listing object keys
mod output;
pub use self::output::ListObjectsOutput;

/// Operation struct for listing object keys under a prefix
#[derive(Clone, Default, Debug)]
pub(crate) struct ListObjects;

impl ListObjects {
    /// Execute a `ListObjects` operation, materializing the full result
    /// before returning.
    pub(crate) async fn orchestrate(
        handle: Arc<crate::client::Handle>,
        input: ListObjectsInput,
    ) -> Result<ListObjectsOutput, Error> {
        let deadline = input.deadline;
        let cancel = input.cancellation_token.clone().unwrap_or_default();
        crate::operation::bounded(deadline, cancel, paginate_all(handle, input)).await
    }
}

/// Follow continuation tokens until the store reports the listing complete.
///
/// Any page failing classifies the whole listing as failed; a partial result
/// is never returned.
async fn paginate_all(
    handle: Arc<crate::client::Handle>,
    input: ListObjectsInput,
) -> Result<ListObjectsOutput, Error> {
    let client = handle.config.client();
    let bucket = handle.config.bucket();

    let mut keys = Vec::new();
    let mut continuation_token: Option<String> = None;

    loop {
        let resp = client
            .list_objects_v2()
            .bucket(bucket)
            .set_prefix(input.prefix.clone())
            .set_continuation_token(continuation_token.take())
            .send()
            .instrument(tracing::debug_span!("send-list-objects-v2"))
            .await?;

        keys.extend(
            resp.contents()
                .iter()
                .filter_map(|obj| obj.key().map(str::to_owned)),
        );

        match resp.next_continuation_token() {
            Some(token) => continuation_token = Some(token.to_owned()),
            None => break,
        }
    }

    tracing::trace!("listing materialized {} keys", keys.len());

    Ok(ListObjectsOutput { keys })
}
