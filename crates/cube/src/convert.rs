//! Conversion of binary-voxel cube files to text cube files

// standard library
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

// crate modules
use crate::decoder::VoxelDecoder;
use crate::error::{Error, Result};
use crate::format::{format_value, is_known_width, FormattingMode};
use crate::header::{parse_header, CubeHeader};
use crate::wrap::LineWrapper;

// external crates
use kdam::{Bar, BarBuilder, BarExt};
use log::{debug, info, warn};

/// Converter for CP2K cube files with binary voxel data
///
/// The conversion is a single pass over the input:
///
/// - Parse the text header up to the `BINARYVOXEL` marker
/// - Write the header lines unchanged
/// - Decode, format, and write the voxel data row by row
///
/// At most one row of values plus a partial output line is held in memory at
/// any time.
///
/// Minimal Example:
/// ```rust, no_run
/// # use cubetools_cube::{CubeConverter, FormattingMode};
/// let mut converter = CubeConverter::new();
/// converter.set_mode(FormattingMode::Legacy);
/// converter.disable_progress();
/// let header = converter
///     .convert_file("path/to/binary.cube", "path/to/text.cube")
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct CubeConverter {
    /// Number formatting and line cadence
    mode: FormattingMode,
    /// Disable progress bar?
    disable_progress: bool,
}

impl CubeConverter {
    /// Just calls Default::default(), nothing special to be initialised
    pub fn new() -> Self {
        Default::default()
    }

    /// Setter for the formatting of the output values
    pub fn set_mode(&mut self, mode: FormattingMode) {
        self.mode = mode;
    }

    /// Do not print the tqdm progress indicators
    pub fn disable_progress(&mut self) {
        self.disable_progress = true;
    }

    /// Convert the file at `infile` and write the result to `outfile`
    ///
    /// The output file is created, or truncated if it already exists. Nothing
    /// is cleaned up if the conversion fails part way through.
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        infile: P,
        outfile: Q,
    ) -> Result<CubeHeader> {
        let reader = BufReader::new(File::open(infile)?);
        let writer = BufWriter::new(File::create(outfile)?);
        self.convert(reader, writer)
    }

    /// Convert a binary-voxel cube stream into a text cube stream
    ///
    /// Returns the parsed header on success.
    pub fn convert<R: BufRead, W: Write>(
        &self,
        mut reader: R,
        mut writer: W,
    ) -> Result<CubeHeader> {
        let header = parse_header(&mut reader)?;
        info!("{header}");
        Self::check_width(&header);

        header.write_lines(&mut writer)?;

        let digits = header.significant_digits();
        debug!("formatting as {} with {digits} significant digits", self.mode);

        let mut decoder = VoxelDecoder::new(&mut reader, &header);
        let mut wrapper = LineWrapper::new(&header, self.mode);
        let mut progress_bar = self.init_progress_bar()?;

        if !self.disable_progress {
            progress_bar.refresh()?;
        };

        while let Some(row) = decoder.next_row()? {
            progress_bar.update(1)?;
            wrapper.extend(
                row.into_iter()
                    .map(|value| format_value(f64::from(value), self.mode, digits)),
            );
            wrapper.write_complete_lines(decoder.read_values(), &mut writer)?;
        }

        wrapper.finish(&mut writer)?;
        writer.flush()?;

        // need an extra line for clean spacing if the progress bar is printed
        if !self.disable_progress {
            eprintln!()
        };

        debug!("converted {} voxel elements", decoder.read_values());
        Ok(header)
    }

    /// Diagnostics for element widths the decoder does not really support
    ///
    /// These are only warnings, the conversion carries on regardless.
    fn check_width(header: &CubeHeader) {
        if header.width % 4 != 0 {
            warn!(
                "Value memory size has to be an integer multiple of 32 bit, got {} bytes",
                header.width
            );
        }

        if !is_known_width(header.width) {
            warn!(
                "No precision known for {} byte values, assuming {} significant digits",
                header.width,
                header.significant_digits()
            );
        }
    }

    /// Initialise the progress bar, if wanted
    fn init_progress_bar(&self) -> Result<Bar> {
        BarBuilder::default()
            .unit(" rows")
            .unit_scale(true)
            .disable(self.disable_progress)
            .bar_format("{count} rows [{rate} rows/s]   ")
            .build()
            .map_err(Error::ProgressBar)
    }
}

/// Convert a binary-voxel cube stream into a text cube stream
///
/// Returns a result containing the parsed [CubeHeader] once everything has
/// been written to `writer`.
///
/// - `reader` - binary-voxel cube data from the very first byte
/// - `writer` - destination for the text cube data
/// - `mode` - style of the numbers written
///
/// Example
/// ```rust
/// # use cubetools_cube::{convert_cube, FormattingMode};
/// let mut input = b"a\nb\n1 0 0 0\n1 1 0 0\n1 0 1 0\n2 0 0 1\n1 0 0 0 0\nBINARYVOXEL 4 6\n".to_vec();
/// for value in [1.0_f32, -2.5] {
///     input.extend_from_slice(&value.to_ne_bytes());
/// }
/// input.push(b'\n');
///
/// let mut output = Vec::new();
/// convert_cube(input.as_slice(), &mut output, FormattingMode::Standard).unwrap();
///
/// let text = String::from_utf8(output).unwrap();
/// assert!(text.ends_with("1 0 0 0 0\n 1.0000E+00 -2.5000E+00\n"));
/// ```
pub fn convert_cube<R: Read, W: Write>(
    reader: R,
    writer: W,
    mode: FormattingMode,
) -> Result<CubeHeader> {
    let mut converter = CubeConverter::new();
    converter.set_mode(mode);
    converter.disable_progress();
    converter.convert(BufReader::new(reader), writer)
}

/// Convert a binary-voxel cube file into a text cube file
///
/// - `infile` - Path to the binary-voxel cube file
/// - `outfile` - Path to write the text cube file, can be [&str], [String], [Path], etc...
/// - `mode` - style of the numbers written
///
/// Example
/// ```rust, no_run
/// # use cubetools_cube::{convert_cube_file, FormattingMode};
/// // Reproduce the CP2K text output exactly
/// convert_cube_file("density.bin.cube", "density.cube", FormattingMode::Legacy).unwrap();
/// ```
pub fn convert_cube_file<P: AsRef<Path>, Q: AsRef<Path>>(
    infile: P,
    outfile: Q,
    mode: FormattingMode,
) -> Result<CubeHeader> {
    let mut converter = CubeConverter::new();
    converter.set_mode(mode);
    converter.disable_progress();
    converter.convert_file(infile, outfile)
}
