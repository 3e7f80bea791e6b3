use numpy::{IntoPyArray, PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::{pyfunction, Py, PyResult, Python};

use crate::genocoord_structs::GenomicSlices;
use crate::overlaps::overlap_pairs;
use crate::sorts::is_sorted_columns;

macro_rules! define_overlaps_numpy {
    ($fname:ident, $chr_ty:ty, $pos_ty:ty) => {
        #[pyfunction]
        #[pyo3(signature = (chrs, starts, ends, strands, chrs2, starts2, ends2, strands2, use_strand = false))]
        #[allow(non_snake_case, clippy::too_many_arguments)]
        pub fn $fname(
            py: Python,
            chrs: PyReadonlyArray1<$chr_ty>,
            starts: PyReadonlyArray1<$pos_ty>,
            ends: PyReadonlyArray1<$pos_ty>,
            strands: PyReadonlyArray1<i8>,
            chrs2: PyReadonlyArray1<$chr_ty>,
            starts2: PyReadonlyArray1<$pos_ty>,
            ends2: PyReadonlyArray1<$pos_ty>,
            strands2: PyReadonlyArray1<i8>,
            use_strand: bool,
        ) -> PyResult<(Py<PyArray1<u32>>, Py<PyArray1<u32>>)> {
            let data1 = GenomicSlices::new(
                chrs.as_slice()?,
                starts.as_slice()?,
                ends.as_slice()?,
                strands.as_slice()?,
            )?;
            let data2 = GenomicSlices::new(
                chrs2.as_slice()?,
                starts2.as_slice()?,
                ends2.as_slice()?,
                strands2.as_slice()?,
            )?;

            if !is_sorted_columns(&data1, use_strand) || !is_sorted_columns(&data2, use_strand) {
                return Err(PyValueError::new_err(
                    "coordinates must be sorted by (chromosome_id[, strand], start)",
                ));
            }

            let (idx1, idx2) = overlap_pairs(&data1, &data2, use_strand);
            Ok((
                idx1.into_pyarray(py).to_owned().into(),
                idx2.into_pyarray(py).to_owned().into(),
            ))
        }
    };
}

define_overlaps_numpy!(overlaps_numpy_i16_i32, i16, i32);
define_overlaps_numpy!(overlaps_numpy_i16_i64, i16, i64);
define_overlaps_numpy!(overlaps_numpy_i32_i32, i32, i32);
define_overlaps_numpy!(overlaps_numpy_i32_i64, i32, i64);
define_overlaps_numpy!(overlaps_numpy_u32_i64, u32, i64);
