use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;
use log::info;
use sprs::CsMat;

use crate::errors::Result;

///
/// Write a sparse LD matrix to Matrix Market coordinate format.
///
/// Triplets are written 1-indexed and sorted by (row, col). The output is
/// gzip-compressed when `path` ends in `.gz`.
///
/// # Arguments
/// * `matrix` - sparse correlation matrix, CSR or CSC
/// * `path` - destination file
///
pub fn write_mtx(matrix: &CsMat<f64>, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let is_gz = path.extension().is_some_and(|ext| ext == "gz");

    if is_gz {
        let mut writer = BufWriter::new(GzEncoder::new(file, Compression::default()));
        write_triplets(matrix, &mut writer)?;
        writer.into_inner().map_err(|e| e.into_error())?.finish()?;
    } else {
        let mut writer = BufWriter::new(file);
        write_triplets(matrix, &mut writer)?;
        writer.flush()?;
    }

    info!(
        "Wrote {} x {} LD matrix ({} nonzeros) to {}",
        matrix.rows(),
        matrix.cols(),
        matrix.nnz(),
        path.display()
    );
    Ok(())
}

fn write_triplets<W: Write>(matrix: &CsMat<f64>, writer: &mut W) -> Result<()> {
    let csr = matrix.to_csr();

    writeln!(writer, "%%MatrixMarket matrix coordinate real general")?;
    writeln!(writer, "{} {} {}", csr.rows(), csr.cols(), csr.nnz())?;
    for (row_idx, row) in csr.outer_iterator().enumerate() {
        for (col_idx, value) in row.iter() {
            writeln!(writer, "{} {} {}", row_idx + 1, col_idx + 1, value)?;
        }
    }
    Ok(())
}
