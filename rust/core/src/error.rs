// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for core engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the schedule engine
#[derive(Error, Debug)]
pub enum Error {
    #[error("Empty file: no header row found")]
    EmptyFile,

    #[error("Column not found: {0}")]
    MissingColumn(String),

    #[error("No search criteria given")]
    EmptyQuery,
}
