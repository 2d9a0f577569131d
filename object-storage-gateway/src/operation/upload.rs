/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::{Arc, Mutex};

use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{CompletedMultipartUpload, CompletedPart};
use aws_smithy_types::error::display::DisplayErrorContext;
use bytes::Bytes;
use tracing::Instrument;

use crate::error::{self, Error, ErrorKind};
use crate::io::part_reader::{PartData, PartReader};
use crate::io::InputStream;

/// Request type for uploading a single object
mod input;
pub use self::input::{UploadInput, UploadInputBuilder};

/// Operation builders
pub mod builders;

mod context;
pub(crate) use self::context::UploadContext;
use self::context::UploadState;

/// Response type for uploading a single object
mod output;
pub use self::output::UploadOutput;

/// Maximum number of parts a single multipart upload may consist of
const MAX_PARTS: u64 = 10_000;

/// Operation struct for single object upload
#[derive(Clone, Default, Debug)]
pub(crate) struct Upload;

impl Upload {
    /// Execute a single `Upload` transfer operation
    pub(crate) async fn orchestrate(
        handle: Arc<crate::client::Handle>,
        mut input: crate::operation::upload::UploadInput,
    ) -> Result<UploadOutput, Error> {
        let body = input.take_body();
        let deadline = input.deadline;
        let cancel = input.cancellation_token.clone().unwrap_or_default();
        let ctx = UploadContext::new(
            handle,
            UploadState {
                input,
                upload_id: Mutex::new(None),
            },
        );

        let result = crate::operation::bounded(deadline, cancel, try_upload(&ctx, body)).await;

        // an expired deadline or cancellation drops the transfer at an await
        // point; any multipart upload already started is cleaned up here
        if let Err(err) = &result {
            if err.kind() == &ErrorKind::OperationCancelled {
                abort_upload(&ctx).await;
            }
        }

        result
    }
}

async fn try_upload(ctx: &UploadContext, body: InputStream) -> Result<UploadOutput, Error> {
    let part_size = ctx.part_size_bytes();
    match body.size_hint().upper() {
        Some(size) if size <= part_size && !body.is_mpu_only() => {
            put_object(ctx, body, size).await
        }
        _ => multipart_upload(ctx, body, part_size).await,
    }
}

/// Upload the whole body as a single request.
async fn put_object(
    ctx: &UploadContext,
    body: InputStream,
    content_length: u64,
) -> Result<UploadOutput, Error> {
    let content_length = i64::try_from(content_length).map_err(|_| {
        error::invalid_input(format!("content length ({content_length}) is too large"))
    })?;
    let body = body.into_byte_stream().await?;

    let resp = ctx
        .client()
        .put_object()
        .bucket(ctx.bucket())
        .key(ctx.key())
        .content_length(content_length)
        .body(body)
        .send()
        .instrument(tracing::debug_span!("send-put-object"))
        .await
        .map_err(error::copy_failed)?;

    let bytes_written = content_length as u64;
    ctx.notify_progress(bytes_written);
    tracing::trace!("upload of {bytes_written} bytes completed in a single request");

    Ok(UploadOutput {
        bytes_written,
        e_tag: resp.e_tag,
        upload_id: None,
    })
}

/// Stream the body as a sequential multipart upload.
///
/// Parts are read and flushed one at a time so memory stays bounded to a
/// single part regardless of source size. A failure before the commit aborts
/// the in-progress upload best-effort and surfaces as a copy failure; a
/// failure of the commit itself surfaces as a commit failure and is NOT
/// aborted, since the remote outcome is indeterminate.
async fn multipart_upload(
    ctx: &UploadContext,
    body: InputStream,
    part_size: u64,
) -> Result<UploadOutput, Error> {
    let resp = ctx
        .client()
        .create_multipart_upload()
        .bucket(ctx.bucket())
        .key(ctx.key())
        .send()
        .instrument(tracing::debug_span!("send-create-multipart-upload"))
        .await
        .map_err(error::copy_failed)?;

    let upload_id = resp
        .upload_id
        .ok_or_else(|| error::copy_failed("create multipart upload response missing upload id"))?;
    ctx.set_upload_id(upload_id.clone());
    tracing::trace!("multipart upload started with upload id: {upload_id}; part size: {part_size}");

    let mut part_reader = PartReader::new(body, part_size);
    let mut completed_parts = Vec::new();
    let mut bytes_written: u64 = 0;

    loop {
        let part = match part_reader.next_part().await {
            Ok(Some(part)) => part,
            Ok(None) => break,
            Err(err) => return Err(abort_on_failure(ctx, err).await),
        };

        if part.part_number > MAX_PARTS {
            let err = error::invalid_input(format!(
                "source requires more than {MAX_PARTS} parts; use a larger part size"
            ));
            return Err(abort_on_failure(ctx, err).await);
        }

        let part_length = part.data.len() as u64;
        match upload_part(ctx, &upload_id, part).await {
            Ok(completed) => completed_parts.push(completed),
            Err(err) => return Err(abort_on_failure(ctx, err).await),
        }

        bytes_written += part_length;
        ctx.notify_progress(bytes_written);
    }

    // a zero byte source with an unknown length produces no parts; the store
    // still requires at least one part to complete the upload
    if completed_parts.is_empty() {
        let empty = PartData {
            part_number: 1,
            data: Bytes::new(),
        };
        match upload_part(ctx, &upload_id, empty).await {
            Ok(completed) => completed_parts.push(completed),
            Err(err) => return Err(abort_on_failure(ctx, err).await),
        }
    }

    let resp = ctx
        .client()
        .complete_multipart_upload()
        .bucket(ctx.bucket())
        .key(ctx.key())
        .upload_id(&upload_id)
        .multipart_upload(
            CompletedMultipartUpload::builder()
                .set_parts(Some(completed_parts))
                .build(),
        )
        .send()
        .instrument(tracing::debug_span!("send-complete-multipart-upload"))
        .await
        .map_err(error::commit_failed)?;

    tracing::trace!("multipart upload of {bytes_written} bytes completed");

    Ok(UploadOutput {
        bytes_written,
        e_tag: resp.e_tag,
        upload_id: Some(upload_id),
    })
}

async fn upload_part(
    ctx: &UploadContext,
    upload_id: &str,
    part: PartData,
) -> Result<CompletedPart, Error> {
    let part_number = part.part_number as i32;
    let content_length = part.data.len() as i64;

    let resp = ctx
        .client()
        .upload_part()
        .bucket(ctx.bucket())
        .key(ctx.key())
        .upload_id(upload_id)
        .part_number(part_number)
        .content_length(content_length)
        .body(ByteStream::from(part.data))
        .send()
        .instrument(tracing::debug_span!("send-upload-part", part_number))
        .await
        .map_err(error::copy_failed)?;

    Ok(CompletedPart::builder()
        .part_number(part_number)
        .set_e_tag(resp.e_tag)
        .build())
}

/// Abort the in-progress multipart upload (if any) and hand back the
/// original error unchanged.
async fn abort_on_failure(ctx: &UploadContext, err: Error) -> Error {
    abort_upload(ctx).await;
    err
}

/// Best-effort abort; failures are logged, never surfaced, and the wait is
/// bounded so cleanup cannot stall a caller that already gave up.
async fn abort_upload(ctx: &UploadContext) {
    let Some(upload_id) = ctx.upload_id() else {
        return;
    };

    let abort = ctx
        .client()
        .abort_multipart_upload()
        .bucket(ctx.bucket())
        .key(ctx.key())
        .upload_id(&upload_id)
        .send()
        .instrument(tracing::debug_span!("send-abort-multipart-upload"));

    match tokio::time::timeout(crate::ABORT_GRACE, abort).await {
        Ok(Ok(_)) => tracing::trace!("aborted multipart upload {upload_id}"),
        Ok(Err(err)) => tracing::warn!(
            "failed to abort multipart upload {upload_id}: {}",
            DisplayErrorContext(&err)
        ),
        Err(_) => tracing::warn!("timed out while aborting multipart upload {upload_id}"),
    }
}

#[cfg(test)]
mod tests {
    use std::ops::Deref;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use aws_sdk_s3::operation::abort_multipart_upload::AbortMultipartUploadOutput;
    use aws_sdk_s3::operation::complete_multipart_upload::{
        CompleteMultipartUploadError, CompleteMultipartUploadOutput,
    };
    use aws_sdk_s3::operation::create_multipart_upload::CreateMultipartUploadOutput;
    use aws_sdk_s3::operation::put_object::PutObjectOutput;
    use aws_sdk_s3::operation::upload_part::{UploadPartError, UploadPartOutput};
    use aws_smithy_mocks::{mock, mock_client, RuleMode};
    use aws_smithy_types::error::ErrorMetadata;
    use bytes::Bytes;
    use tokio_util::sync::CancellationToken;

    use crate::error::ErrorKind;
    use crate::io::InputStream;
    use crate::types::PartSize;

    fn test_session(client: aws_sdk_s3::Client, part_size: u64) -> crate::Session {
        let config = crate::Config::builder()
            .client(client)
            .bucket("test-bucket")
            .set_target_part_size(PartSize::Target(part_size))
            .build()
            .unwrap();
        crate::Session::new(config)
    }

    #[tokio::test]
    async fn test_single_request_upload() {
        let body = Bytes::from_static(b"hello buffer");
        let expected_e_tag = Arc::new("test-e-tag".to_owned());

        let e_tag = expected_e_tag.clone();
        let put_object = mock!(aws_sdk_s3::Client::put_object)
            .match_requests(|r| {
                r.key() == Some("api-test/123/buf.txt") && r.content_length == Some(12)
            })
            .then_output(move || {
                PutObjectOutput::builder()
                    .e_tag(e_tag.as_ref().to_owned())
                    .build()
            });

        let client = mock_client!(aws_sdk_s3, RuleMode::Sequential, &[&put_object]);
        let session = test_session(client, 30);

        let observed = Arc::new(Mutex::new(Vec::new()));
        let progress = observed.clone();
        let resp = session
            .upload()
            .key("api-test/123/buf.txt")
            .body(InputStream::from(body))
            .progress(move |total| progress.lock().unwrap().push(total))
            .send()
            .await
            .unwrap();

        assert_eq!(12, resp.bytes_written());
        assert_eq!(Some(expected_e_tag.deref().as_str()), resp.e_tag());
        assert_eq!(None, resp.upload_id());
        assert_eq!(vec![12], observed.lock().unwrap().clone());
    }

    #[tokio::test]
    async fn test_sequential_mpu() {
        let expected_upload_id = Arc::new("test-upload".to_owned());
        let body = Bytes::from_static(b"every adolescent dog goes bonkers early");

        let upload_id = expected_upload_id.clone();
        let create_mpu =
            mock!(aws_sdk_s3::Client::create_multipart_upload).then_output(move || {
                CreateMultipartUploadOutput::builder()
                    .upload_id(upload_id.as_ref().to_owned())
                    .build()
            });

        let upload_id = expected_upload_id.clone();
        let upload_1 = mock!(aws_sdk_s3::Client::upload_part)
            .match_requests(move |r| {
                r.upload_id.as_ref() == Some(&upload_id)
                    && r.part_number == Some(1)
                    && r.content_length == Some(30)
            })
            .then_output(|| UploadPartOutput::builder().e_tag("part-1").build());

        let upload_id = expected_upload_id.clone();
        let upload_2 = mock!(aws_sdk_s3::Client::upload_part)
            .match_requests(move |r| {
                r.upload_id.as_ref() == Some(&upload_id)
                    && r.part_number == Some(2)
                    && r.content_length == Some(9)
            })
            .then_output(|| UploadPartOutput::builder().e_tag("part-2").build());

        let expected_e_tag = Arc::new("test-e-tag".to_owned());
        let upload_id = expected_upload_id.clone();
        let e_tag = expected_e_tag.clone();
        let complete_mpu = mock!(aws_sdk_s3::Client::complete_multipart_upload)
            .match_requests(move |r| {
                r.upload_id.as_ref() == Some(&upload_id)
                    && r.multipart_upload.clone().unwrap().parts.unwrap().len() == 2
            })
            .then_output(move || {
                CompleteMultipartUploadOutput::builder()
                    .e_tag(e_tag.as_ref().to_owned())
                    .build()
            });

        let client = mock_client!(
            aws_sdk_s3,
            RuleMode::Sequential,
            &[&create_mpu, &upload_1, &upload_2, &complete_mpu]
        );
        let session = test_session(client, 30);

        let observed = Arc::new(Mutex::new(Vec::new()));
        let progress = observed.clone();
        let resp = session
            .upload()
            .key("test-key")
            .body(InputStream::from(body))
            .progress(move |total| progress.lock().unwrap().push(total))
            .send()
            .await
            .unwrap();

        assert_eq!(39, resp.bytes_written());
        assert_eq!(expected_upload_id.deref(), resp.upload_id().unwrap());
        assert_eq!(expected_e_tag.deref(), resp.e_tag().unwrap());
        assert_eq!(vec![30, 39], observed.lock().unwrap().clone());
    }

    #[tokio::test]
    async fn test_part_failure_aborts_as_copy_failed() {
        let body = Bytes::from_static(b"every adolescent dog goes bonkers early");

        let create_mpu = mock!(aws_sdk_s3::Client::create_multipart_upload).then_output(|| {
            CreateMultipartUploadOutput::builder()
                .upload_id("test-upload")
                .build()
        });
        let upload_part = mock!(aws_sdk_s3::Client::upload_part).then_error(|| {
            UploadPartError::generic(ErrorMetadata::builder().code("InvalidPart").build())
        });
        let abort_mpu = mock!(aws_sdk_s3::Client::abort_multipart_upload)
            .match_requests(|r| r.upload_id() == Some("test-upload"))
            .then_output(|| AbortMultipartUploadOutput::builder().build());

        let client = mock_client!(
            aws_sdk_s3,
            RuleMode::Sequential,
            &[&create_mpu, &upload_part, &abort_mpu]
        );
        let session = test_session(client, 30);

        let err = session
            .upload()
            .key("test-key")
            .body(InputStream::from(body))
            .send()
            .await
            .unwrap_err();

        assert_eq!(&ErrorKind::CopyFailed, err.kind());
        assert_eq!(1, abort_mpu.num_calls());
    }

    #[tokio::test]
    async fn test_complete_failure_is_commit_failed_without_abort() {
        let body = Bytes::from_static(b"every adolescent dog goes bonkers early");

        let create_mpu = mock!(aws_sdk_s3::Client::create_multipart_upload).then_output(|| {
            CreateMultipartUploadOutput::builder()
                .upload_id("test-upload")
                .build()
        });
        let upload_part = mock!(aws_sdk_s3::Client::upload_part)
            .then_output(|| UploadPartOutput::builder().build());
        let complete_mpu = mock!(aws_sdk_s3::Client::complete_multipart_upload).then_error(|| {
            CompleteMultipartUploadError::generic(
                ErrorMetadata::builder().code("InvalidPart").build(),
            )
        });
        let abort_mpu = mock!(aws_sdk_s3::Client::abort_multipart_upload)
            .then_output(|| AbortMultipartUploadOutput::builder().build());

        let client = mock_client!(
            aws_sdk_s3,
            RuleMode::MatchAny,
            &[&create_mpu, &upload_part, &complete_mpu, &abort_mpu]
        );
        let session = test_session(client, 30);

        let err = session
            .upload()
            .key("test-key")
            .body(InputStream::from(body))
            .send()
            .await
            .unwrap_err();

        assert_eq!(&ErrorKind::CommitFailed, err.kind());
        assert_eq!(0, abort_mpu.num_calls());
    }

    #[tokio::test]
    async fn test_empty_unknown_length_source_commits_one_empty_part() {
        let create_mpu = mock!(aws_sdk_s3::Client::create_multipart_upload).then_output(|| {
            CreateMultipartUploadOutput::builder()
                .upload_id("test-upload")
                .build()
        });
        let upload_part = mock!(aws_sdk_s3::Client::upload_part)
            .match_requests(|r| r.part_number == Some(1) && r.content_length == Some(0))
            .then_output(|| UploadPartOutput::builder().build());
        let complete_mpu = mock!(aws_sdk_s3::Client::complete_multipart_upload)
            .match_requests(|r| r.multipart_upload.clone().unwrap().parts.unwrap().len() == 1)
            .then_output(|| CompleteMultipartUploadOutput::builder().build());

        let client = mock_client!(
            aws_sdk_s3,
            RuleMode::Sequential,
            &[&create_mpu, &upload_part, &complete_mpu]
        );
        let session = test_session(client, 30);

        let empty = tokio::io::empty();
        let resp = session
            .upload()
            .key("test-key")
            .body(InputStream::from_reader(empty))
            .send()
            .await
            .unwrap();

        assert_eq!(0, resp.bytes_written());
        assert_eq!(Some("test-upload"), resp.upload_id());
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let client = mock_client!(aws_sdk_s3, &[]);
        let session = test_session(client, 30);

        let token = CancellationToken::new();
        token.cancel();

        let err = session
            .upload()
            .key("test-key")
            .body(InputStream::from_static(b"hello buffer"))
            .cancellation_token(token)
            .send()
            .await
            .unwrap_err();

        assert_eq!(&ErrorKind::OperationCancelled, err.kind());
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_elapses_mid_copy() {
        let create_mpu = mock!(aws_sdk_s3::Client::create_multipart_upload).then_output(|| {
            CreateMultipartUploadOutput::builder()
                .upload_id("test-upload")
                .build()
        });
        let abort_mpu = mock!(aws_sdk_s3::Client::abort_multipart_upload)
            .match_requests(|r| r.upload_id() == Some("test-upload"))
            .then_output(|| AbortMultipartUploadOutput::builder().build());

        let client = mock_client!(aws_sdk_s3, RuleMode::Sequential, &[&create_mpu, &abort_mpu]);
        let session = test_session(client, 30);

        // the reader never produces data and never reaches EOF, so only the
        // deadline can end the transfer
        let (pending, _write_half) = tokio::io::duplex(64);

        let err = session
            .upload()
            .key("test-key")
            .body(InputStream::from_reader(pending))
            .deadline(tokio::time::Instant::now() + Duration::from_secs(30))
            .send()
            .await
            .unwrap_err();

        assert_eq!(&ErrorKind::OperationCancelled, err.kind());
        assert_eq!(1, abort_mpu.num_calls());
    }
}
