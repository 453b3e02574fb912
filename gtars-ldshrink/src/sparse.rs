use ndarray::ArrayView2;
use sprs::CsMat;

///
/// Compressed sparse row copy of `r` keeping only entries that are not exactly zero.
///
pub fn to_sparse(r: &ArrayView2<f64>) -> CsMat<f64> {
    let (n_rows, n_cols) = r.dim();
    let mut indptr = Vec::with_capacity(n_rows + 1);
    let mut indices = Vec::new();
    let mut data = Vec::new();

    indptr.push(0);
    for row in r.rows() {
        for (j, &v) in row.iter().enumerate() {
            if v != 0.0 {
                indices.push(j);
                data.push(v);
            }
        }
        indptr.push(indices.len());
    }
    CsMat::new((n_rows, n_cols), indptr, indices, data)
}
