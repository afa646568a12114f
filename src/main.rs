use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use log::info;

use masstools::banner::masstools_logo;
use masstools::io::mgf::{read_mgf, MGFError};
use masstools::names::name_duplicated;
use masstools::plot::MirrorPlot;
use masstools::Spectrum;

/// Summarize the MS2 spectra in one or more MGF files
#[derive(Parser, Debug)]
#[command(version, about)]
struct App {
    /// Do not print the banner
    #[arg(short, long)]
    quiet: bool,

    /// Compare two spectra by label as a mirror plot and list matched peaks
    #[arg(short, long, num_args = 2, value_names = ["LABEL1", "LABEL2"])]
    compare: Option<Vec<String>>,

    /// MGF files, optionally gzip compressed
    #[arg(required = true)]
    paths: Vec<PathBuf>,
}

fn file_label(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = name.strip_suffix(".gz").unwrap_or(&name);
    name.strip_suffix(".mgf").unwrap_or(name).to_string()
}

fn load(paths: &[PathBuf]) -> Result<(Vec<String>, Vec<Spectrum>), MGFError> {
    let mut labels = Vec::new();
    let mut spectra = Vec::new();
    for path in paths {
        let batch = read_mgf(std::slice::from_ref(path))?;
        info!("{} spectra in {}", batch.len(), path.display());
        labels.extend(std::iter::repeat(file_label(path)).take(batch.len()));
        spectra.extend(batch);
    }
    Ok((name_duplicated(&labels), spectra))
}

fn compare(labels: &[String], spectra: &[Spectrum], first: &str, second: &str) -> Result<(), String> {
    let find = |label: &str| {
        labels
            .iter()
            .position(|l| l == label)
            .map(|i| &spectra[i])
            .ok_or_else(|| format!("No spectrum labeled {label}"))
    };
    let spectrum1 = find(first)?;
    let spectrum2 = find(second)?;
    let plot = MirrorPlot::new(spectrum1, Some(spectrum2)).names(first, second);
    if let Some((low, high)) = plot.range() {
        println!("m/z range {low:.4}-{high:.4}");
    }
    for trace in plot.traces() {
        println!("{}: {} sticks", trace.name, trace.peaks.len());
    }
    for (i, j) in plot.matched_peaks() {
        let (p, q) = (&spectrum1.peaks[i], &spectrum2.peaks[j]);
        println!("{:.4}\t{:.4}\t{:.4}", p.mz, q.mz, q.mz - p.mz);
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let args = App::parse();

    if !args.quiet {
        if let Err(e) = masstools_logo() {
            eprintln!("{e}");
        }
    }

    let (labels, spectra) = match load(&args.paths) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    match args.compare.as_deref() {
        Some([first, second]) => {
            if let Err(e) = compare(&labels, &spectra, first, second) {
                eprintln!("{e}");
                process::exit(1);
            }
        }
        _ => {
            println!("label\tprecursor_mz\trt\tpeaks\tbase_peak_mz");
            for (label, spec) in labels.iter().zip(spectra.iter()) {
                let base_peak = spec.base_peak().map(|p| p.mz).unwrap_or_default();
                println!(
                    "{label}\t{:.4}\t{:.3}\t{}\t{:.4}",
                    spec.info.mz,
                    spec.info.rt,
                    spec.len(),
                    base_peak
                );
            }
        }
    }
}
