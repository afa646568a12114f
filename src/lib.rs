//! `masstools` is a small collection of mass spectrometry helpers.
//!
//! The centerpiece is the MGF reader in [`io::mgf`], which turns one or more
//! Mascot Generic Format files into a flat list of [`Spectrum`]s:
//!
//! ```no_run
//! use masstools::read_mgf;
//!
//! let spectra = read_mgf(&["./test/data/small.mgf"]).unwrap();
//! for spec in spectra.iter() {
//!     println!("{} {} {}", spec.info.mz, spec.info.rt, spec.len());
//! }
//! ```
//!
//! Alongside it live [`names::name_duplicated`] for making labels unique,
//! [`plot::MirrorPlot`] for preparing a head-to-tail spectrum comparison and
//! [`banner::masstools_logo`].
pub mod banner;
pub mod io;
pub mod names;
pub mod plot;
pub mod spectrum;

pub use crate::io::mgf::{extract_value, list_mgf, read_mgf, MGFError};
pub use crate::names::name_duplicated;
pub use crate::plot::{ms2_plot, MirrorPlot};
pub use crate::spectrum::{Peak, PrecursorInfo, Spectrum};
pub use crate::banner::masstools_logo;
