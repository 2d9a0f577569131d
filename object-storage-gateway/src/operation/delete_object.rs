/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use tracing::Instrument;

use crate::error::{Error, ErrorKind};

/// Request type for deleting a single object
mod input;
pub use self::input::{DeleteObjectInput, DeleteObjectInputBuilder};

/// Operation builders
pub mod builders;

/// Output type for deleting a single object
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct DeleteObjectOutput {}

/// Operation struct for deleting a single object
#[derive(Clone, Default, Debug)]
pub(crate) struct DeleteObject;

impl DeleteObject {
    /// Execute a `DeleteObject` operation
    pub(crate) async fn orchestrate(
        handle: Arc<crate::client::Handle>,
        input: DeleteObjectInput,
    ) -> Result<DeleteObjectOutput, Error> {
        let deadline = input.deadline;
        let cancel = input.cancellation_token.clone().unwrap_or_default();
        crate::operation::bounded(deadline, cancel, try_delete(handle, input)).await
    }
}

/// The store deletes missing keys without complaint, so existence is checked
/// first to let callers tell "removed" apart from "was never there".
async fn try_delete(
    handle: Arc<crate::client::Handle>,
    input: DeleteObjectInput,
) -> Result<DeleteObjectOutput, Error> {
    let client = handle.config.client();
    let bucket = handle.config.bucket();

    client
        .head_object()
        .bucket(bucket)
        .key(input.key())
        .send()
        .instrument(tracing::debug_span!("send-head-object"))
        .await
        .map_err(|err| {
            if matches!(err.as_service_error(), Some(e) if e.is_not_found()) {
                return Error::new(ErrorKind::NotFound, err);
            }
            Error::from(err)
        })?;

    client
        .delete_object()
        .bucket(bucket)
        .key(input.key())
        .send()
        .instrument(tracing::debug_span!("send-delete-object"))
        .await?;

    tracing::trace!("deleted object {}", input.key());

    Ok(DeleteObjectOutput {})
}

#[cfg(test)]
mod tests {
    use aws_sdk_s3::operation::delete_object::DeleteObjectOutput;
    use aws_sdk_s3::operation::head_object::{HeadObjectError, HeadObjectOutput};
    use aws_smithy_mocks::{mock, mock_client, RuleMode};
    use aws_smithy_types::error::ErrorMetadata;

    use crate::error::ErrorKind;

    fn test_session(client: aws_sdk_s3::Client) -> crate::Session {
        let config = crate::Config::builder()
            .client(client)
            .bucket("test-bucket")
            .build()
            .unwrap();
        crate::Session::new(config)
    }

    #[tokio::test]
    async fn test_delete_existing_object() {
        let head_object = mock!(aws_sdk_s3::Client::head_object)
            .match_requests(|r| r.key() == Some("api-test/123/buf.txt"))
            .then_output(|| HeadObjectOutput::builder().build());
        let delete_object = mock!(aws_sdk_s3::Client::delete_object)
            .match_requests(|r| r.key() == Some("api-test/123/buf.txt"))
            .then_output(|| DeleteObjectOutput::builder().build());

        let client = mock_client!(aws_sdk_s3, RuleMode::Sequential, &[&head_object, &delete_object]);
        let session = test_session(client);

        session
            .delete_object()
            .key("api-test/123/buf.txt")
            .send()
            .await
            .unwrap();
        assert_eq!(1, delete_object.num_calls());
    }

    #[tokio::test]
    async fn test_delete_missing_object_is_not_found() {
        let head_object = mock!(aws_sdk_s3::Client::head_object).then_error(|| {
            HeadObjectError::NotFound(aws_sdk_s3::types::error::NotFound::builder().build())
        });
        let delete_object = mock!(aws_sdk_s3::Client::delete_object)
            .then_output(|| DeleteObjectOutput::builder().build());

        let client = mock_client!(aws_sdk_s3, RuleMode::MatchAny, &[&head_object, &delete_object]);
        let session = test_session(client);

        let err = session
            .delete_object()
            .key("missing-key")
            .send()
            .await
            .unwrap_err();

        assert_eq!(&ErrorKind::NotFound, err.kind());
        // the delete itself is never attempted for a missing key
        assert_eq!(0, delete_object.num_calls());
    }

    #[tokio::test]
    async fn test_delete_access_denied_is_fatal() {
        let head_object = mock!(aws_sdk_s3::Client::head_object)
            .then_output(|| HeadObjectOutput::builder().build());
        let delete_object = mock!(aws_sdk_s3::Client::delete_object).then_error(|| {
            aws_sdk_s3::operation::delete_object::DeleteObjectError::generic(
                ErrorMetadata::builder().code("AccessDenied").build(),
            )
        });

        let client = mock_client!(aws_sdk_s3, RuleMode::Sequential, &[&head_object, &delete_object]);
        let session = test_session(client);

        let err = session
            .delete_object()
            .key("test-key")
            .send()
            .await
            .unwrap_err();

        assert_eq!(&ErrorKind::Fatal, err.kind());
    }
}
