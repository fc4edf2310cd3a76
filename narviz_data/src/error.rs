// Copyright 2025 the Narviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loading errors.
//!
//! Both enums are `Clone`: one failed fetch is handed to every caller waiting on it.

/// A data source could not produce rows for a path.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum FetchError {
    /// Nothing exists at the path.
    #[error("no table at `{0}`")]
    NotFound(String),
    /// The table exists but could not be read or parsed.
    #[error("failed to read `{path}`: {message}")]
    Read {
        /// Path as requested.
        path: String,
        /// Underlying error, rendered.
        message: String,
    },
}

impl FetchError {
    /// Convenience constructor for [`FetchError::Read`].
    pub fn read(path: impl Into<String>, message: impl ToString) -> Self {
        Self::Read {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

/// A named dataset could not be loaded.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum SourceError {
    /// The data source failed.
    #[error("failed to fetch dataset `{dataset}`")]
    Fetch {
        /// Dataset name.
        dataset: String,
        /// What the source reported.
        #[source]
        source: FetchError,
    },
    /// Rows came back without a column the dataset schema needs.
    #[error("dataset `{dataset}` has no column `{column}`")]
    Schema {
        /// Dataset name.
        dataset: String,
        /// Missing column.
        column: String,
    },
    /// No dataset of this name is registered with the cache.
    #[error("unknown dataset `{0}`")]
    UnknownDataset(String),
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn fetch_failures_keep_their_cause() {
        let err = SourceError::Fetch {
            dataset: "pitch_velocity".into(),
            source: FetchError::NotFound("data/pitch_velocity.csv".into()),
        };
        assert_eq!(err.to_string(), "failed to fetch dataset `pitch_velocity`");
        assert_eq!(
            err.source().map(ToString::to_string).as_deref(),
            Some("no table at `data/pitch_velocity.csv`")
        );
    }

    #[test]
    fn read_errors_render_the_message() {
        let err = FetchError::read("a.csv", "unexpected end of file");
        assert_eq!(err.to_string(), "failed to read `a.csv`: unexpected end of file");
    }
}
