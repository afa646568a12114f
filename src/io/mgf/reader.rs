use std::{
    io,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use log::{debug, warn};
use regex::Regex;
use thiserror::Error;

#[cfg(feature = "parallelism")]
use rayon::prelude::*;

use super::is_mgf;
use crate::io::compression::read_text;
use crate::spectrum::{Peak, PrecursorInfo, Spectrum};

/// The line that closes a spectrum block
pub const END_IONS: &str = "END IONS";

#[derive(Debug, Error)]
pub enum MGFError {
    #[error("Failed to read MGF file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl MGFError {
    /// The file that could not be read
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } => path,
        }
    }
}

/// One spectrum block from an MGF file: the trimmed lines between two
/// `END IONS` terminators, not including the terminator itself.
pub type MGFRecord = Vec<String>;

static PRECURSOR_MZ_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(PEPMASS|PRECURSORMZ)").unwrap());

static RETENTION_TIME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(RTINSECONDS|RETENTIONTIME|RTINMINUTES)").unwrap());

/// The header fields [`read_mgf`] knows how to pull out of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    PrecursorMz,
    RetentionTime,
}

impl FieldKind {
    /// The labels that identify this field, checked at the start of a line
    pub const fn labels(&self) -> &'static [&'static str] {
        match self {
            Self::PrecursorMz => &["PEPMASS", "PRECURSORMZ"],
            Self::RetentionTime => &["RTINSECONDS", "RETENTIONTIME", "RTINMINUTES"],
        }
    }

    pub fn pattern(&self) -> &'static Regex {
        match self {
            Self::PrecursorMz => &PRECURSOR_MZ_PATTERN,
            Self::RetentionTime => &RETENTION_TIME_PATTERN,
        }
    }

    /// Look this field up in `lines`, see [`extract_field`]
    pub fn find<S: AsRef<str>>(&self, lines: &[S]) -> Option<f64> {
        extract_field(lines, self.pattern())
    }
}

#[inline]
fn is_peak_line(line: &str) -> bool {
    line.as_bytes().first().is_some_and(u8::is_ascii_digit)
}

/// Split the text of an MGF file into records.
///
/// Lines may end in `\n`, `\r\n` or a lone `\r`. Every line is trimmed and
/// accumulated until a line reading exactly `END IONS`, which closes the
/// record. `BEGIN IONS` is not checked for, so
/// it stays in the record as an ordinary line. Lines after the last
/// terminator never form a record and are dropped.
pub fn list_mgf(text: &str) -> Vec<MGFRecord> {
    let mut records = Vec::new();
    let mut entry = MGFRecord::new();
    let lines = text
        .split("\r\n")
        .flat_map(|chunk| chunk.split(['\r', '\n']));
    for line in lines {
        let line = line.trim();
        if line == END_IONS {
            records.push(std::mem::take(&mut entry));
        } else {
            entry.push(line.to_string());
        }
    }
    let dropped = entry.iter().filter(|line| !line.is_empty()).count();
    if dropped > 0 {
        warn!("Dropping {dropped} non-empty trailing line(s) not closed by {END_IONS}");
    }
    records
}

/// Read `path` into memory and split it with [`list_mgf`]. Gzip compressed
/// files are decompressed transparently.
pub fn list_mgf_file<P: AsRef<Path>>(path: P) -> Result<Vec<MGFRecord>, MGFError> {
    let path = path.as_ref();
    let text = read_text(path).map_err(|source| MGFError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if !is_mgf(text.as_bytes()) {
        debug!("{} has no BEGIN IONS marker", path.display());
    }
    Ok(list_mgf(&text))
}

/// Find the first line matching `pattern` whose value parses as a number.
///
/// The value is whatever follows the last `=` on the line, with every
/// character other than ASCII digits and `.` removed. Matching lines whose
/// value still does not parse are skipped.
pub fn extract_field<S: AsRef<str>>(lines: &[S], pattern: &Regex) -> Option<f64> {
    lines
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|line| pattern.is_match(line))
        .find_map(|line| {
            let segment = line.rsplit('=').next().unwrap_or(line);
            let value: String = segment
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            match value.parse::<f64>() {
                Ok(v) => Some(v),
                Err(e) => {
                    debug!("Skipping unparsable field line {line:?}: {e}");
                    None
                }
            }
        })
}

/// Like [`extract_field`], but `0.0` stands in for a missing value.
pub fn extract_value<S: AsRef<str>>(lines: &[S], pattern: &Regex) -> f64 {
    extract_field(lines, pattern).unwrap_or(0.0)
}

fn parse_peak_line(line: &str) -> Option<Peak> {
    let mut it = line.split_whitespace();
    let mz = it.next()?.parse().ok()?;
    let intensity = it.next()?.parse().ok()?;
    Some(Peak { mz, intensity })
}

/// Parse every digit-leading line of `lines` into a [`Peak`], in order.
/// Lines without two leading numeric columns are left out.
pub fn build_peak_table<S: AsRef<str>>(lines: &[S]) -> Vec<Peak> {
    lines
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|line| is_peak_line(line))
        .filter_map(|line| {
            let peak = parse_peak_line(line);
            if peak.is_none() {
                debug!("Skipping malformed peak line {line:?}");
            }
            peak
        })
        .collect()
}

/// Whether a record has any peak data at all
pub fn has_peak_lines<S: AsRef<str>>(lines: &[S]) -> bool {
    lines.iter().any(|line| is_peak_line(line.as_ref()))
}

/// Build a [`Spectrum`] from one record.
pub fn parse_record<S: AsRef<str>>(lines: &[S]) -> Spectrum {
    let mz = extract_value(lines, FieldKind::PrecursorMz.pattern());
    let rt = extract_value(lines, FieldKind::RetentionTime.pattern());
    Spectrum::new(PrecursorInfo::new(mz, rt), build_peak_table(lines))
}

fn parse_records(records: Vec<MGFRecord>) -> Vec<Spectrum> {
    let n = records.len();
    let spectra: Vec<Spectrum> = records
        .iter()
        .filter(|entry| has_peak_lines(entry.as_slice()))
        .map(|entry| parse_record(entry.as_slice()))
        .collect();
    if spectra.len() < n {
        debug!("Dropped {} record(s) without peak lines", n - spectra.len());
    }
    spectra
}

fn drop_empty(mut spectra: Vec<Spectrum>) -> Vec<Spectrum> {
    let n = spectra.len();
    spectra.retain(|spec| !spec.is_empty());
    if spectra.len() < n {
        debug!("Dropped {} spectra with an empty peak table", n - spectra.len());
    }
    spectra
}

/// Parse the text of a single MGF file into spectra, dropping any spectrum
/// that ends up without peaks.
pub fn parse_mgf_str(text: &str) -> Vec<Spectrum> {
    drop_empty(parse_records(list_mgf(text)))
}

fn read_one<P: AsRef<Path>>(path: P) -> Result<Vec<Spectrum>, MGFError> {
    let records = list_mgf_file(&path)?;
    let spectra = parse_records(records);
    debug!(
        "Read {} spectra from {}",
        spectra.len(),
        path.as_ref().display()
    );
    Ok(spectra)
}

/// Read every file in `paths` and return their spectra, in file order and
/// then record order. Records without peak lines and spectra whose peak
/// table comes out empty are dropped.
///
/// The first file that cannot be read aborts the whole call.
#[cfg(not(feature = "parallelism"))]
pub fn read_mgf<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Spectrum>, MGFError> {
    let mut ms2_data = Vec::new();
    for path in paths {
        ms2_data.extend(read_one(path)?);
    }
    Ok(drop_empty(ms2_data))
}

/// Read every file in `paths` and return their spectra, in file order and
/// then record order. Records without peak lines and spectra whose peak
/// table comes out empty are dropped.
///
/// Files are parsed in parallel, one task per file. If any file cannot be
/// read the call fails with the error of the earliest such file in `paths`.
#[cfg(feature = "parallelism")]
pub fn read_mgf<P: AsRef<Path> + Sync>(paths: &[P]) -> Result<Vec<Spectrum>, MGFError> {
    let results: Vec<Result<Vec<Spectrum>, MGFError>> = paths.par_iter().map(read_one).collect();
    let per_file = results.into_iter().collect::<Result<Vec<_>, _>>()?;
    Ok(drop_empty(per_file.into_iter().flatten().collect()))
}
