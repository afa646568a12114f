pub mod mgf;

pub(crate) mod compression;

pub use crate::io::compression::{is_gzipped, is_gzipped_extension};
pub use crate::io::mgf::{read_mgf, MGFError, MGFRecord};
