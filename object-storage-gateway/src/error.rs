/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;

use aws_sdk_s3::error::ProvideErrorMetadata;

/// A boxed error that is `Send` and `Sync`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by this library
///
/// NOTE: Use [`aws_smithy_types::error::display::DisplayErrorContext`] or similar to display
/// the entire error cause/source chain.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: BoxError,
}

/// General categories of transfer errors.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Operation input validation issues (bad object key, missing parameters)
    InputInvalid,

    /// Object/key does not exist
    NotFound,

    /// I/O failure mid-transfer; the number of bytes persisted is indeterminate
    CopyFailed,

    /// Remote finalize failed after a successful copy; the object state is
    /// indeterminate and callers must not assume the object exists
    CommitFailed,

    /// Network or 5xx-class failure; the caller may retry
    Transient,

    /// Authentication/permission failure; the caller should not retry
    Fatal,

    /// The operation was cancelled or its deadline elapsed; safe to retry
    OperationCancelled,

    /// Some kind of internal runtime issue (e.g. task failure)
    RuntimeError,
}

impl Error {
    /// Creates a new transfer [`Error`] from a known kind of error as well as an arbitrary error
    /// source.
    pub fn new<E>(kind: ErrorKind, err: E) -> Error
    where
        E: Into<BoxError>,
    {
        Error {
            kind,
            source: err.into(),
        }
    }

    /// Returns the corresponding [`ErrorKind`] for this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::InputInvalid => write!(f, "invalid input"),
            ErrorKind::NotFound => write!(f, "object not found"),
            ErrorKind::CopyFailed => write!(f, "transfer failed mid-copy"),
            ErrorKind::CommitFailed => write!(f, "remote commit failed after copy"),
            ErrorKind::Transient => write!(f, "transient remote failure"),
            ErrorKind::Fatal => write!(f, "fatal remote failure"),
            ErrorKind::OperationCancelled => write!(f, "operation cancelled"),
            ErrorKind::RuntimeError => write!(f, "runtime error"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::new(ErrorKind::CopyFailed, value)
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::new(ErrorKind::RuntimeError, value)
    }
}

pub(crate) fn invalid_input<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::InputInvalid, err)
}

pub(crate) fn copy_failed<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::CopyFailed, err)
}

pub(crate) fn commit_failed<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::CommitFailed, err)
}

/// Classify a raw SDK failure by its error code.
///
/// Operations override the kind where the transfer phase demands a more
/// specific classification (`CopyFailed`/`CommitFailed`).
impl<E, R> From<aws_sdk_s3::error::SdkError<E, R>> for Error
where
    E: std::error::Error + ProvideErrorMetadata + Send + Sync + 'static,
    R: Send + Sync + fmt::Debug + 'static,
{
    fn from(value: aws_sdk_s3::error::SdkError<E, R>) -> Self {
        let kind = match value.code() {
            Some("NotFound" | "NoSuchKey" | "NoSuchUpload" | "NoSuchBucket") => ErrorKind::NotFound,
            Some(
                "AccessDenied" | "InvalidAccessKeyId" | "SignatureDoesNotMatch" | "ExpiredToken",
            ) => ErrorKind::Fatal,
            _ => ErrorKind::Transient,
        };

        Error::new(kind, value)
    }
}

static CANCELLATION_ERROR: &str = "deadline elapsed or caller cancelled, stopping the transfer";

pub(crate) fn operation_cancelled() -> Error {
    Error::new(ErrorKind::OperationCancelled, CANCELLATION_ERROR)
}
