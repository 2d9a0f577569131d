/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;

use crate::error::{invalid_input, Error};

/// A validated object key within the session's bucket.
///
/// A key is a `/`-separated path with no leading or trailing separator, no
/// empty components, and no `.`/`..` traversal segments. Two requests
/// referencing the same key in the same bucket refer to the same remote
/// object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Validate a caller-supplied object name.
    ///
    /// Surrounding whitespace is trimmed; everything else must already be in
    /// canonical form.
    pub fn parse(raw: &str) -> Result<ObjectKey, Error> {
        let key = raw.trim();
        if key.is_empty() {
            return Err(invalid_input("object key must not be empty"));
        }
        if key.starts_with('/') {
            return Err(invalid_input(format!(
                "object key must not start with '/': {key:?}"
            )));
        }
        if key.ends_with('/') {
            return Err(invalid_input(format!(
                "object key must not end with '/': {key:?}"
            )));
        }
        for segment in key.split('/') {
            match segment {
                "" => {
                    return Err(invalid_input(format!(
                        "object key contains an empty component: {key:?}"
                    )))
                }
                "." | ".." => {
                    return Err(invalid_input(format!(
                        "object key contains a traversal segment: {key:?}"
                    )))
                }
                _ => {}
            }
        }
        Ok(ObjectKey(key.to_owned()))
    }

    /// Join a folder prefix with the basename of `file_name` into a canonical key.
    ///
    /// Only the last path component of `file_name` is used, so a local path
    /// like `/var/tmp/report.csv` uploads under `<folder>/report.csv`.
    pub fn join(folder: &str, file_name: &str) -> Result<ObjectKey, Error> {
        let base = file_name
            .trim()
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default();
        let folder = folder.trim().trim_matches('/');
        if folder.is_empty() {
            ObjectKey::parse(base)
        } else {
            ObjectKey::parse(&format!("{folder}/{base}"))
        }
    }

    /// The canonical key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the key, returning the canonical string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for ObjectKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
