use numpy::{IntoPyArray, PyArray1, PyReadonlyArray1};
use pyo3::{pyfunction, Py, PyResult, Python};

use crate::genocoord_structs::GenomicSlices;
use crate::sorts::sort_order_idx;

macro_rules! define_sort_order_numpy {
    ($fname:ident, $chr_ty:ty, $pos_ty:ty) => {
        #[pyfunction]
        #[pyo3(signature = (chrs, starts, ends, strands, use_strand = false))]
        #[allow(non_snake_case)]
        pub fn $fname(
            py: Python,
            chrs: PyReadonlyArray1<$chr_ty>,
            starts: PyReadonlyArray1<$pos_ty>,
            ends: PyReadonlyArray1<$pos_ty>,
            strands: PyReadonlyArray1<i8>,
            use_strand: bool,
        ) -> PyResult<Py<PyArray1<u32>>> {
            let data = GenomicSlices::new(
                chrs.as_slice()?,
                starts.as_slice()?,
                ends.as_slice()?,
                strands.as_slice()?,
            )?;
            let order = sort_order_idx(&data, use_strand);
            Ok(order.into_pyarray(py).to_owned().into())
        }
    };
}

define_sort_order_numpy!(sort_order_numpy_i16_i32, i16, i32);
define_sort_order_numpy!(sort_order_numpy_i16_i64, i16, i64);
define_sort_order_numpy!(sort_order_numpy_i32_i32, i32, i32);
define_sort_order_numpy!(sort_order_numpy_i32_i64, i32, i64);
define_sort_order_numpy!(sort_order_numpy_u32_i64, u32, i64);
