//! Result and Error types for cubetools-cube

/// Type alias for `Result<T, cube::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `cubetools-cube` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Underlying stream I/O error
    #[error("failure in stream I/O")]
    IOError(#[from] std::io::Error),

    /// Header text is present but can not drive the conversion
    #[error("malformed cube header: {0}")]
    MalformedHeader(String),

    /// Input ended before the `BINARYVOXEL` marker line was found
    #[error("reached the end of the input before the BINARYVOXEL marker")]
    StreamExhausted,

    /// A row of binary voxel data does not have the expected byte length
    #[error("unexpected voxel row length (expected {expected:?} bytes, found {found:?})")]
    TruncatedPayload { expected: usize, found: usize },

    /// Failed to set up the progress indicator
    #[error("failed to initialise progress bar: {0}")]
    ProgressBar(String),
}
