//! Conversion of CP2K binary-voxel cube files
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod convert;
mod decoder;
mod error;
mod format;
mod header;
mod parsers;
mod wrap;

// Inline anything important for a nice public API
#[doc(inline)]
pub use convert::{convert_cube, convert_cube_file, CubeConverter};

#[doc(inline)]
pub use header::{parse_header, CubeHeader, ZVOXEL_LINE_INDEX};

#[doc(inline)]
pub use format::{format_value, is_known_width, significant_digits, FormattingMode};

#[doc(inline)]
pub use decoder::VoxelDecoder;

#[doc(inline)]
pub use wrap::{next_line_length, LineWrapper};

#[doc(inline)]
pub use error::{Error, Result};
