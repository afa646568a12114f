//! Prepare two MS2 spectra for a mirror ("head-to-tail") comparison plot.
//!
//! Nothing here draws anything. [`MirrorPlot`] normalizes each spectrum to its
//! own base peak, flips the second one below the axis and settles the m/z
//! window, leaving a set of [`StickTrace`]s that any charting front-end can
//! render as vertical sticks.
use crate::spectrum::{Peak, Spectrum};

pub const DEFAULT_XLAB: &str = "Mass to charge ratio (m/z)";
pub const DEFAULT_YLAB: &str = "Relative intensity";

/// One normalized spectrum, ready to be drawn as sticks from zero.
#[derive(Debug, Clone, PartialEq)]
pub struct StickTrace {
    pub name: String,
    /// Peaks with intensities in `[0, 1]`, or `[-1, 0]` for the mirrored trace
    pub peaks: Vec<Peak>,
    pub mirrored: bool,
}

#[derive(Debug, Clone)]
pub struct MirrorPlot<'a> {
    spectrum1: &'a Spectrum,
    spectrum2: Option<&'a Spectrum>,
    pub spectrum1_name: String,
    pub spectrum2_name: String,
    pub range_mz: Option<(f64, f64)>,
    pub ppm_tol: f64,
    pub mz_ppm_thr: f64,
    pub xlab: String,
    pub ylab: String,
}

impl<'a> MirrorPlot<'a> {
    pub fn new(spectrum1: &'a Spectrum, spectrum2: Option<&'a Spectrum>) -> Self {
        Self {
            spectrum1,
            spectrum2,
            spectrum1_name: "spectrum1".to_string(),
            spectrum2_name: "spectrum2".to_string(),
            range_mz: None,
            ppm_tol: 30.0,
            mz_ppm_thr: 400.0,
            xlab: DEFAULT_XLAB.to_string(),
            ylab: DEFAULT_YLAB.to_string(),
        }
    }

    pub fn names(mut self, spectrum1_name: &str, spectrum2_name: &str) -> Self {
        self.spectrum1_name = spectrum1_name.to_string();
        self.spectrum2_name = spectrum2_name.to_string();
        self
    }

    /// Fix the m/z window instead of fitting it to the data
    pub fn range_mz(mut self, low: f64, high: f64) -> Self {
        self.range_mz = Some((low.min(high), low.max(high)));
        self
    }

    pub fn ppm_tol(mut self, ppm_tol: f64, mz_ppm_thr: f64) -> Self {
        self.ppm_tol = ppm_tol;
        self.mz_ppm_thr = mz_ppm_thr;
        self
    }

    pub fn labels(mut self, xlab: &str, ylab: &str) -> Self {
        self.xlab = xlab.to_string();
        self.ylab = ylab.to_string();
        self
    }

    /// The m/z window: the explicit one if set, otherwise the extent of both
    /// spectra. `None` when there is nothing to plot.
    pub fn range(&self) -> Option<(f64, f64)> {
        if self.range_mz.is_some() {
            return self.range_mz;
        }
        let first = self.spectrum1.mz_range();
        let second = self.spectrum2.and_then(|s| s.mz_range());
        match (first, second) {
            (Some((a, b)), Some((c, d))) => Some((a.min(c), b.max(d))),
            (Some(r), None) | (None, Some(r)) => Some(r),
            (None, None) => None,
        }
    }

    /// Absolute m/z tolerance around `mz`. Below `mz_ppm_thr` the tolerance
    /// stays at the value it has at the threshold.
    pub fn mz_tolerance(&self, mz: f64) -> f64 {
        mz.max(self.mz_ppm_thr) * self.ppm_tol * 1e-6
    }

    fn trace(&self, spectrum: &Spectrum, name: &str, mirrored: bool) -> StickTrace {
        let (low, high) = self.range().unwrap_or((f64::NEG_INFINITY, f64::INFINITY));
        let max = spectrum
            .peaks
            .iter()
            .map(|p| p.intensity)
            .fold(0.0f64, f64::max);
        let scale = if max > 0.0 { max } else { 1.0 };
        let sign = if mirrored { -1.0 } else { 1.0 };
        let peaks = spectrum
            .peaks
            .iter()
            .filter(|p| p.mz >= low && p.mz <= high)
            .map(|p| Peak::new(p.mz, sign * p.intensity / scale))
            .collect();
        StickTrace {
            name: name.to_string(),
            peaks,
            mirrored,
        }
    }

    /// The first spectrum above the axis, followed by the mirrored second
    /// spectrum if there is one.
    pub fn traces(&self) -> Vec<StickTrace> {
        let mut traces = vec![self.trace(self.spectrum1, &self.spectrum1_name, false)];
        if let Some(spectrum2) = self.spectrum2 {
            traces.push(self.trace(spectrum2, &self.spectrum2_name, true));
        }
        traces
    }

    /// Pair up peaks of the two traces that fall within [`Self::mz_tolerance`]
    /// of each other, as `(index in spectrum1, index in spectrum2)`.
    pub fn matched_peaks(&self) -> Vec<(usize, usize)> {
        let Some(spectrum2) = self.spectrum2 else {
            return Vec::new();
        };
        let mut pairs = Vec::new();
        for (i, p) in self.spectrum1.peaks.iter().enumerate() {
            let tol = self.mz_tolerance(p.mz);
            let best = spectrum2
                .peaks
                .iter()
                .enumerate()
                .map(|(j, q)| (j, (q.mz - p.mz).abs()))
                .filter(|(_, err)| *err <= tol)
                .min_by(|a, b| a.1.total_cmp(&b.1));
            if let Some((j, _)) = best {
                pairs.push((i, j));
            }
        }
        pairs
    }
}

/// Build the traces for a mirror plot with default settings.
pub fn ms2_plot(spectrum1: &Spectrum, spectrum2: Option<&Spectrum>) -> Vec<StickTrace> {
    MirrorPlot::new(spectrum1, spectrum2).traces()
}
