//! Row-by-row decoding of the binary voxel data
//!
//! The binary section is a sequence of rows, each followed by a single
//! separator byte (a newline in files written by CP2K). A row holds up to
//! `count` elements but is cut short at the end of every loop over the third
//! axis, so that no row ever spans two z-columns of the grid.
//!
//! ```text
//! zvoxel = 8, count = 6
//!
//! <6 elements><sep><2 elements><sep><6 elements><sep><2 elements><sep>...
//! ```
//!
//! Every element is decoded as native-endian 32-bit floats, `width / 4` of
//! them per element, whatever the element width. Wider elements are therefore
//! not reinterpreted as double or quad precision values.

// standard library
use std::io::{self, Read};

// crate modules
use crate::error::{Error, Result};
use crate::header::CubeHeader;

// cubetools modules
use cubetools_utils::f;

/// Decoder for the rows of binary voxel data
///
/// Keeps a running total of the elements read so far, which decides the
/// length of the next row and is needed by the line wrapping cadence.
#[derive(Debug)]
pub struct VoxelDecoder<R> {
    /// Stream positioned at the start of the next row
    reader: R,
    /// Bytes per element
    width: usize,
    /// Maximum elements in a row
    count: usize,
    /// Voxels along the third axis
    zvoxel: usize,
    /// Running total of elements read
    read_values: usize,
}

impl<R: Read> VoxelDecoder<R> {
    /// New decoder for data described by `header`
    ///
    /// The `reader` must already be positioned at the start of the binary
    /// data, as is the case after [parse_header()](crate::parse_header).
    pub fn new(reader: R, header: &CubeHeader) -> Self {
        Self {
            reader,
            width: header.width,
            count: header.count,
            zvoxel: header.zvoxel,
            read_values: 0,
        }
    }

    /// Total number of elements read so far
    pub fn read_values(&self) -> usize {
        self.read_values
    }

    /// Number of elements expected in the next row
    pub fn row_size(&self) -> usize {
        self.count.min(self.zvoxel - (self.read_values % self.zvoxel))
    }

    /// Read and decode the next row
    ///
    /// Returns `None` once the data is exhausted. A row that ends early is an
    /// [Error::TruncatedPayload] and nothing from it is returned.
    pub fn next_row(&mut self) -> Result<Option<Vec<f32>>> {
        let row_size = self.row_size();
        let row_bytes = self.width.checked_mul(row_size).ok_or_else(|| {
            Error::MalformedHeader(f!(
                "row of {row_size} values {} bytes wide is too large to read",
                self.width
            ))
        })?;
        // cannot overflow as (width / 4) * 4 <= width
        let expected = 4 * (self.width / 4) * row_size;

        // grows with the data actually available, never sized from the header
        let mut chunk = Vec::new();
        self.reader
            .by_ref()
            .take(row_bytes as u64)
            .read_to_end(&mut chunk)?;

        if chunk.is_empty() {
            return Ok(None);
        }

        if chunk.len() != expected {
            return Err(Error::TruncatedPayload {
                expected,
                found: chunk.len(),
            });
        }

        // skip the separator, which may legitimately be missing after the last row
        io::copy(&mut self.reader.by_ref().take(1), &mut io::sink())?;
        self.read_values += row_size;

        Ok(Some(
            chunk
                .chunks_exact(4)
                .map(|b| f32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
                .collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(width: usize, count: usize, zvoxel: usize) -> CubeHeader {
        CubeHeader {
            lines: Vec::new(),
            width,
            count,
            zvoxel,
            data_offset: 0,
        }
    }

    fn row(values: &[f32]) -> Vec<u8> {
        let mut bytes: Vec<u8> = values.iter().flat_map(|v| v.to_ne_bytes()).collect();
        bytes.push(b'\n');
        bytes
    }

    #[test]
    fn rows_close_each_z_column() {
        let values: Vec<f32> = (0..16).map(|v| v as f32).collect();
        let mut bytes = row(&values[0..6]);
        bytes.extend(row(&values[6..8]));
        bytes.extend(row(&values[8..14]));
        bytes.extend(row(&values[14..16]));

        let mut decoder = VoxelDecoder::new(bytes.as_slice(), &header(4, 6, 8));
        let mut sizes = Vec::new();
        let mut decoded = Vec::new();
        while let Some(r) = decoder.next_row().unwrap() {
            sizes.push(r.len());
            decoded.extend(r);
            assert_eq!(decoder.read_values(), decoded.len());
        }

        assert_eq!(sizes, vec![6, 2, 6, 2]);
        assert_eq!(decoded, values);
    }

    #[test]
    fn divisible_columns_never_shorten() {
        let mut decoder = VoxelDecoder::new(io::empty(), &header(4, 3, 6));
        for read in [0, 3, 6, 9, 12] {
            decoder.read_values = read;
            assert_eq!(decoder.row_size(), 3);
        }
    }

    #[test]
    fn row_size_after_partial_column() {
        let mut decoder = VoxelDecoder::new(io::empty(), &header(4, 6, 45));
        let sizes: Vec<usize> = (0..9)
            .map(|_| {
                let size = decoder.row_size();
                decoder.read_values += size;
                size
            })
            .collect();
        assert_eq!(sizes, vec![6, 6, 6, 6, 6, 6, 6, 3, 6]);
    }

    #[test]
    fn missing_final_separator() {
        let mut bytes = row(&[1.0, 2.0]);
        bytes.pop();
        let mut decoder = VoxelDecoder::new(bytes.as_slice(), &header(4, 6, 2));
        assert_eq!(decoder.next_row().unwrap(), Some(vec![1.0, 2.0]));
        assert_eq!(decoder.next_row().unwrap(), None);
    }

    #[test]
    fn truncated_row() {
        let bytes = row(&[1.0, 2.0]);
        let mut decoder = VoxelDecoder::new(&bytes[..8], &header(4, 3, 3));
        match decoder.next_row() {
            Err(Error::TruncatedPayload { expected, found }) => {
                assert_eq!(expected, 12);
                assert_eq!(found, 8);
            }
            other => panic!("expected truncated payload, got {other:?}"),
        }
        assert_eq!(decoder.read_values(), 0);
    }

    #[test]
    fn wide_elements_decode_as_single_precision() {
        let bytes = row(&[1.0, 2.0, 3.0, 4.0]);
        let mut decoder = VoxelDecoder::new(bytes.as_slice(), &header(8, 2, 2));
        assert_eq!(decoder.next_row().unwrap(), Some(vec![1.0, 2.0, 3.0, 4.0]));
        assert_eq!(decoder.read_values(), 2);
    }

    #[test]
    fn unaligned_width_is_rejected() {
        let bytes = vec![0u8; 13];
        let mut decoder = VoxelDecoder::new(bytes.as_slice(), &header(6, 2, 2));
        assert!(matches!(
            decoder.next_row(),
            Err(Error::TruncatedPayload {
                expected: 8,
                found: 12
            })
        ));
    }

    #[test]
    fn row_length_message() {
        let bytes = vec![0u8; 13];
        let mut decoder = VoxelDecoder::new(bytes.as_slice(), &header(6, 2, 2));
        let message = decoder.next_row().unwrap_err().to_string();
        assert_eq!(
            message,
            "unexpected voxel row length (expected 8 bytes, found 12)"
        );
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn oversized_row_is_not_preallocated() {
        let bytes = row(&[1.0]);
        let mut decoder =
            VoxelDecoder::new(bytes.as_slice(), &header(4_000_000_000_000_000, 6, 3));
        match decoder.next_row() {
            Err(Error::TruncatedPayload { expected, found }) => {
                assert_eq!(expected, 12_000_000_000_000_000);
                assert_eq!(found, 5);
            }
            other => panic!("expected truncated payload, got {other:?}"),
        }
    }

    #[test]
    fn overflowing_row_size() {
        let bytes = row(&[1.0]);
        let mut decoder = VoxelDecoder::new(bytes.as_slice(), &header(usize::MAX, 6, 3));
        assert!(matches!(
            decoder.next_row(),
            Err(Error::MalformedHeader(_))
        ));
        assert_eq!(decoder.read_values(), 0);
    }
}
