use numpy::{IntoPyArray, PyArray1, PyReadonlyArray1};
use pyo3::{pyfunction, Py, PyResult, Python};

use crate::segments::find_segments;

macro_rules! define_find_segments_numpy {
    ($fname:ident, $score_ty:ty) => {
        #[pyfunction]
        #[allow(non_snake_case)]
        pub fn $fname(
            py: Python,
            scores: PyReadonlyArray1<$score_ty>,
            threshold: $score_ty,
            max_dropoff: $score_ty,
        ) -> PyResult<(Py<PyArray1<usize>>, Py<PyArray1<usize>>)> {
            let (starts, ends): (Vec<usize>, Vec<usize>) =
                find_segments(scores.as_slice()?, threshold, max_dropoff)
                    .into_iter()
                    .unzip();
            Ok((
                starts.into_pyarray(py).to_owned().into(),
                ends.into_pyarray(py).to_owned().into(),
            ))
        }
    };
}

define_find_segments_numpy!(find_segments_numpy_f64, f64);
define_find_segments_numpy!(find_segments_numpy_f32, f32);
define_find_segments_numpy!(find_segments_numpy_i64, i64);
define_find_segments_numpy!(find_segments_numpy_i32, i32);
