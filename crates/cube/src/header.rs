//! Text header of a binary-voxel cube file

// standard library
use std::io::{BufRead, Write};

// crate modules
use crate::error::{Error, Result};
use crate::format::significant_digits;
use crate::parsers;

// cubetools modules
use cubetools_utils::f;

// external crates
use log::{debug, trace};

/// Index of the header line holding the voxel count along the third axis
///
/// Cube files have a fixed layout of two comment lines, the atom count and
/// origin, then one line per grid axis. The sixth line is the third axis and
/// its first token is the number of voxels along it.
pub const ZVOXEL_LINE_INDEX: usize = 5;

/// Everything needed from the text prefix of a binary-voxel cube file
///
/// The text header of the file is kept verbatim so that it can be written
/// unchanged to the converted file. Only a handful of values are actually
/// interpreted.
///
/// ```text
/// <comment>
/// <comment>
/// <natoms> <origin x> <origin y> <origin z>
/// <nx> <vector>
/// <ny> <vector>
/// <nz> <vector>                          <- zvoxel
/// <atoms...>
/// BINARYVOXEL ... <width> <count>        <- marker, not kept
/// <binary voxel rows>
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CubeHeader {
    /// Header lines preceding the marker, line endings included
    pub lines: Vec<String>,
    /// Number of bytes per value in the binary data
    pub width: usize,
    /// Number of values per line of output
    pub count: usize,
    /// Number of voxels along the third (fastest varying) axis
    pub zvoxel: usize,
    /// Byte offset from the start of the file to the binary data
    pub data_offset: usize,
}

impl CubeHeader {
    /// Significant digits that the element width can represent
    pub fn significant_digits(&self) -> usize {
        significant_digits(self.width)
    }

    /// Number of 32-bit floats decoded for every element
    pub fn floats_per_element(&self) -> usize {
        self.width / 4
    }

    /// Write the original header lines unchanged
    pub fn write_lines<W: Write>(&self, writer: &mut W) -> Result<()> {
        for line in &self.lines {
            writer.write_all(line.as_bytes())?;
        }
        Ok(())
    }
}

impl std::fmt::Display for CubeHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s = "CubeHeader {\n".to_string();
        s += &f!("    header lines: {}\n", self.lines.len());
        s += &f!("    element width: {} bytes\n", self.width);
        s += &f!("    values per line: {}\n", self.count);
        s += &f!("    third axis voxels: {}\n", self.zvoxel);
        s += &f!("    data offset: {} bytes\n}}", self.data_offset);
        write!(f, "{}", s)
    }
}

/// Read the text header up to and including the `BINARYVOXEL` marker
///
/// The reader is left positioned at the first byte of the binary data, which
/// is also recorded as [CubeHeader::data_offset].
///
/// ```rust
/// # use cubetools_cube::parse_header;
/// let text = "a\nb\n1 0 0 0\n2 1 0 0\n2 0 1 0\n3 0 0 1\n1 0 0 0 0\nBINARYVOXEL 4 6\n";
/// let header = parse_header(&mut text.as_bytes()).unwrap();
///
/// assert_eq!(header.lines.len(), 7);
/// assert_eq!((header.width, header.count, header.zvoxel), (4, 6, 3));
/// assert_eq!(header.data_offset, text.len());
/// ```
pub fn parse_header<R: BufRead>(reader: &mut R) -> Result<CubeHeader> {
    let mut lines = Vec::new();
    let mut skip = 0;
    let mut buffer = Vec::new();

    let (width, count) = loop {
        buffer.clear();
        let n = reader.read_until(b'\n', &mut buffer)?;
        if n == 0 {
            return Err(Error::StreamExhausted);
        }
        skip += n;

        let line = String::from_utf8(std::mem::take(&mut buffer)).map_err(|_| {
            Error::MalformedHeader(f!("header line {} is not valid UTF-8", lines.len() + 1))
        })?;

        if parsers::is_binary_marker(&line) {
            break parsers::marker_dimensions(&line).ok_or_else(|| {
                Error::MalformedHeader(f!(
                    "expected <width> <count> to end \"{}\"",
                    line.trim_end()
                ))
            })?;
        }

        trace!("header line {}: {}", lines.len() + 1, line.trim_end());
        lines.push(line);
    };

    if width == 0 || count == 0 {
        return Err(Error::MalformedHeader(f!(
            "element width and values per line must be positive, found {width} and {count}"
        )));
    }

    let zvoxel = zvoxel(&lines)?;
    debug!("binary voxel data starts at byte {skip}");

    Ok(CubeHeader {
        lines,
        width,
        count,
        zvoxel,
        data_offset: skip,
    })
}

/// Voxel count along the third axis from the fixed header position
fn zvoxel(lines: &[String]) -> Result<usize> {
    let line = lines.get(ZVOXEL_LINE_INDEX).ok_or_else(|| {
        Error::MalformedHeader(f!(
            "expected at least {} header lines, found {}",
            ZVOXEL_LINE_INDEX + 1,
            lines.len()
        ))
    })?;

    match parsers::leading_integer(line) {
        Some(n) if n > 0 => Ok(n as usize),
        Some(n) => Err(Error::MalformedHeader(f!(
            "voxel count along the third axis must be positive, found {n}"
        ))),
        None => Err(Error::MalformedHeader(f!(
            "no voxel count for the third axis in \"{}\"",
            line.trim_end()
        ))),
    }
}
