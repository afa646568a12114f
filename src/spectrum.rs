//! The parsed representation of an MS2 spectrum read from an MGF file.
//!
//! A [`Spectrum`] is deliberately flat: the precursor summary lives in
//! [`PrecursorInfo`] and the fragment ions in an ordered list of [`Peak`]s.
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single fragment ion, as written on one peak line.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Peak {
    pub mz: f64,
    pub intensity: f64,
}

impl Peak {
    pub fn new(mz: f64, intensity: f64) -> Self {
        Self { mz, intensity }
    }
}

impl fmt::Display for Peak {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Peak({}, {})", self.mz, self.intensity)
    }
}

impl From<(f64, f64)> for Peak {
    fn from((mz, intensity): (f64, f64)) -> Self {
        Self::new(mz, intensity)
    }
}

impl From<Peak> for (f64, f64) {
    fn from(peak: Peak) -> Self {
        (peak.mz, peak.intensity)
    }
}

/// Precursor ion summary. Both values are `0.0` when the source record
/// did not carry a readable value.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrecursorInfo {
    /// Precursor mass-to-charge ratio
    pub mz: f64,
    /// Retention time, in whatever unit the source file used
    pub rt: f64,
}

impl PrecursorInfo {
    pub fn new(mz: f64, rt: f64) -> Self {
        Self { mz, rt }
    }
}

#[derive(Default, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Spectrum {
    pub info: PrecursorInfo,
    pub peaks: Vec<Peak>,
}

impl Spectrum {
    pub fn new(info: PrecursorInfo, peaks: Vec<Peak>) -> Self {
        Self { info, peaks }
    }

    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }

    /// The most intense peak. Ties resolve to the first one seen.
    pub fn base_peak(&self) -> Option<&Peak> {
        self.peaks.iter().fold(None, |best: Option<&Peak>, p| match best {
            Some(b) if b.intensity >= p.intensity => Some(b),
            _ => Some(p),
        })
    }

    pub fn total_ion_current(&self) -> f64 {
        self.peaks.iter().map(|p| p.intensity).sum()
    }

    /// The smallest and largest m/z in the peak table, in that order.
    pub fn mz_range(&self) -> Option<(f64, f64)> {
        self.peaks.iter().fold(None, |acc, p| match acc {
            None => Some((p.mz, p.mz)),
            Some((lo, hi)) => Some((lo.min(p.mz), hi.max(p.mz))),
        })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Peak> {
        self.peaks.iter()
    }
}

impl<'a> IntoIterator for &'a Spectrum {
    type Item = &'a Peak;
    type IntoIter = std::slice::Iter<'a, Peak>;

    fn into_iter(self) -> Self::IntoIter {
        self.peaks.iter()
    }
}

impl fmt::Display for Spectrum {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Spectrum(mz={}, rt={}, peaks={})",
            self.info.mz,
            self.info.rt,
            self.peaks.len()
        )
    }
}
