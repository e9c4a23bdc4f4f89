//! Line wrapping of formatted voxel values
//!
//! Values are written `count` to a line. In legacy mode CP2K also breaks the
//! line at the end of every loop over the third axis, so each z-column ends
//! with a short line whenever `zvoxel` is not a multiple of `count`.
//!
//! ```text
//! zvoxel = 8, count = 6
//!
//! standard         legacy
//! x x x x x x       x x x x x x
//! x x x x x x       x x
//! x x x x           x x x x x x
//!                   x x
//! ```

// standard library
use std::io::Write;

// crate modules
use crate::error::Result;
use crate::format::FormattingMode;
use crate::header::CubeHeader;

// external crates
use log::trace;

/// Number of values that make up the next complete output line
///
/// - `read_values` - running total of elements decoded
/// - `buffer_len` - number of formatted values not yet written
/// - `count` - values per line
/// - `zvoxel` - voxels along the third axis
/// - `legacy` - break lines at the end of every third axis loop
///
/// ```rust
/// # use cubetools_cube::next_line_length;
/// // short closing line of a z-column in legacy mode
/// assert_eq!(next_line_length(8, 2, 6, 8, true), 2);
/// // otherwise always a full line
/// assert_eq!(next_line_length(8, 2, 6, 8, false), 6);
/// ```
pub fn next_line_length(
    read_values: usize,
    buffer_len: usize,
    count: usize,
    zvoxel: usize,
    legacy: bool,
) -> usize {
    let cycle_len = if legacy { zvoxel } else { count };

    // more buffered values than elements is possible for wide elements
    let pos = (read_values as i64 - buffer_len as i64).rem_euclid(cycle_len as i64) as usize;

    if legacy {
        let last_line_len = cycle_len % count;
        if pos >= cycle_len - last_line_len {
            return last_line_len;
        }
    }

    count
}

/// Buffer of formatted values waiting to be written as complete lines
#[derive(Debug)]
pub struct LineWrapper {
    /// Values per line
    count: usize,
    /// Voxels along the third axis
    zvoxel: usize,
    /// CP2K line cadence and leading space
    legacy: bool,
    /// Formatted values not yet written
    pending: Vec<String>,
}

impl LineWrapper {
    /// New empty buffer for the grid described by `header`
    pub fn new(header: &CubeHeader, mode: FormattingMode) -> Self {
        Self {
            count: header.count,
            zvoxel: header.zvoxel,
            legacy: mode.is_legacy(),
            pending: Vec::new(),
        }
    }

    /// Add a formatted value to the end of the buffer
    pub fn push(&mut self, value: String) {
        self.pending.push(value);
    }

    /// Number of values waiting to be written
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Length of the line that would be written next
    pub fn next_line_length(&self, read_values: usize) -> usize {
        next_line_length(
            read_values,
            self.pending.len(),
            self.count,
            self.zvoxel,
            self.legacy,
        )
    }

    /// Write every complete line in the buffer
    ///
    /// Anything left over stays in the buffer until more values arrive.
    /// Returns the number of lines written.
    pub fn write_complete_lines<W: Write>(
        &mut self,
        read_values: usize,
        writer: &mut W,
    ) -> Result<usize> {
        let mut lines = 0;
        loop {
            let n = self.next_line_length(read_values);
            if n > self.pending.len() {
                break;
            }

            if self.legacy {
                write!(writer, " ")?;
            }
            let line = self.pending[..n].join(" ");
            trace!("line of {n} values: {line}");
            writeln!(writer, "{line}")?;

            self.pending.drain(..n);
            lines += 1;
        }
        Ok(lines)
    }

    /// Write whatever is left as a final line
    ///
    /// This line never has the legacy leading space.
    pub fn finish<W: Write>(self, writer: &mut W) -> Result<()> {
        if !self.pending.is_empty() {
            writeln!(writer, "{}", self.pending.join(" "))?;
        }
        Ok(())
    }
}

impl Extend<String> for LineWrapper {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        self.pending.extend(iter);
    }
}
