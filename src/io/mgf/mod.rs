//! Read [MGF](https://www.matrixscience.com/help/data_file_help.html#GEN) files into
//! [`Spectrum`](crate::spectrum::Spectrum) lists.
//!
//! The reader works on whole files held in memory. Each file is split into
//! records on `END IONS` lines ([`list_mgf`]), records without peak lines are
//! discarded, and the remaining ones are turned into spectra by pulling the
//! precursor m/z and retention time out with [`extract_value`] and parsing
//! the peak lines with [`build_peak_table`]. [`read_mgf`] does all of this
//! for a batch of files.
mod reader;

pub use reader::{
    build_peak_table, extract_field, extract_value, has_peak_lines, list_mgf, list_mgf_file,
    parse_mgf_str, parse_record, read_mgf, FieldKind, MGFError, MGFRecord, END_IONS,
};

pub fn is_mgf(buf: &[u8]) -> bool {
    let needle = b"BEGIN IONS";
    buf.windows(needle.len()).any(|window| window == needle)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::spectrum::{Peak, PrecursorInfo};

    use flate2::{write::GzEncoder, Compression};
    use std::{fs, io, io::prelude::*, path};

    #[test]
    fn test_reader() -> Result<(), MGFError> {
        let spectra = read_mgf(&["./test/data/small.mgf"])?;
        assert_eq!(spectra.len(), 3);
        assert!(spectra.iter().all(|s| !s.is_empty()));

        assert_eq!(
            spectra[0].info,
            PrecursorInfo::new(445.120025634766, 12.305)
        );
        assert_eq!(spectra[0].len(), 5);
        assert_eq!(spectra[0].peaks[2], Peak::new(97.1, 9456.2));

        assert_eq!(spectra[1].info, PrecursorInfo::new(302.7, 40.12));
        assert_eq!(spectra[1].peaks[1], Peak::new(129.1, 840.5));

        // RTINMINUTES is taken as written
        assert_eq!(spectra[2].info, PrecursorInfo::new(501.25, 1.5));
        assert_eq!(
            spectra[2].peaks,
            vec![Peak::new(175.12, 400.0), Peak::new(262.14, 960.25)]
        );
        Ok(())
    }

    #[test_log::test]
    fn test_reader_degraded() {
        let spectra = read_mgf(&["./test/data/extra.mgf"]).unwrap();
        assert_eq!(spectra.len(), 2);
        assert_eq!(spectra[0].info, PrecursorInfo::new(780.4, 301.7));
        assert_eq!(spectra[1].info, PrecursorInfo::new(0.0, 0.0));
        assert_eq!(spectra[1].peaks, vec![Peak::new(244.17, 10.0)]);
    }

    #[test]
    fn test_file_order() -> Result<(), MGFError> {
        let small = read_mgf(&["./test/data/small.mgf"])?;
        let extra = read_mgf(&["./test/data/extra.mgf"])?;

        let both = read_mgf(&["./test/data/small.mgf", "./test/data/extra.mgf"])?;
        let expected: Vec<_> = small.iter().chain(extra.iter()).cloned().collect();
        assert_eq!(both, expected);

        let swapped = read_mgf(&["./test/data/extra.mgf", "./test/data/small.mgf"])?;
        let expected: Vec<_> = extra.into_iter().chain(small).collect();
        assert_eq!(swapped, expected);
        Ok(())
    }

    #[test]
    fn test_list_mgf_file() -> Result<(), MGFError> {
        let records = list_mgf_file("./test/data/small.mgf")?;
        assert_eq!(records.len(), 4);
        assert_eq!(records[0][0], "MASS=Monoisotopic");
        assert!(!has_peak_lines(&records[2]));
        Ok(())
    }

    #[test]
    fn test_missing_file_aborts_batch() {
        let err = read_mgf(&["./test/data/small.mgf", "./test/data/missing.mgf"]).unwrap_err();
        assert_eq!(err.path(), path::Path::new("./test/data/missing.mgf"));
    }

    #[test]
    fn test_earliest_missing_file_reported() {
        let paths: Vec<String> = (0..16)
            .map(|i| format!("./test/data/missing_{i}.mgf"))
            .collect();
        for _ in 0..4 {
            let err = read_mgf(&paths).unwrap_err();
            assert_eq!(err.path(), path::Path::new("./test/data/missing_0.mgf"));
        }
    }

    #[test]
    fn test_read_gzipped() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        let packed = dir.path().join("small.mgf.gz");
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(&fs::read("./test/data/small.mgf")?)?;
        fs::write(&packed, enc.finish()?)?;

        let from_gz = read_mgf(&[&packed]).map_err(io::Error::other)?;
        let from_text = read_mgf(&["./test/data/small.mgf"]).map_err(io::Error::other)?;
        assert_eq!(from_gz, from_text);
        Ok(())
    }

    #[test]
    fn test_well_formed_count() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("generated.mgf");
        let mut text = String::new();
        for i in 0..25 {
            text.push_str(&format!(
                "BEGIN IONS\nTITLE=scan={i}\nPEPMASS={}.5\nRTINSECONDS={i}\n",
                400 + i
            ));
            for j in 0..(i % 4 + 1) {
                text.push_str(&format!("{}.25 {}\n", 100 + j * 10, 1000 + j));
            }
            text.push_str("END IONS\n\n");
        }
        fs::write(&path, text)?;

        let spectra = read_mgf(&[&path]).map_err(io::Error::other)?;
        assert_eq!(spectra.len(), 25);
        for (i, spec) in spectra.iter().enumerate() {
            assert_eq!(spec.info.mz, 400.5 + i as f64);
            assert_eq!(spec.info.rt, i as f64);
            assert_eq!(spec.len(), i % 4 + 1);
        }
        Ok(())
    }

    #[test]
    fn test_is_mgf() -> io::Result<()> {
        let buf = fs::read("./test/data/small.mgf")?;
        assert!(is_mgf(&buf));
        assert!(!is_mgf(b"<mzML>"));
        Ok(())
    }
}
