use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use crate::bindings::numpy_bindings::overlaps_numpy::*;
use crate::bindings::numpy_bindings::segments_numpy::*;
use crate::bindings::numpy_bindings::sorts_numpy::*;
use crate::errors::CoordError;

impl From<CoordError> for PyErr {
    fn from(err: CoordError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[pymodule]
#[pyo3(name = "genocoord")]
fn genocoord(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(overlaps_numpy_i16_i32, m)?)?;
    m.add_function(wrap_pyfunction!(overlaps_numpy_i16_i64, m)?)?;
    m.add_function(wrap_pyfunction!(overlaps_numpy_i32_i32, m)?)?;
    m.add_function(wrap_pyfunction!(overlaps_numpy_i32_i64, m)?)?;
    m.add_function(wrap_pyfunction!(overlaps_numpy_u32_i64, m)?)?;

    m.add_function(wrap_pyfunction!(sort_order_numpy_i16_i32, m)?)?;
    m.add_function(wrap_pyfunction!(sort_order_numpy_i16_i64, m)?)?;
    m.add_function(wrap_pyfunction!(sort_order_numpy_i32_i32, m)?)?;
    m.add_function(wrap_pyfunction!(sort_order_numpy_i32_i64, m)?)?;
    m.add_function(wrap_pyfunction!(sort_order_numpy_u32_i64, m)?)?;

    m.add_function(wrap_pyfunction!(find_segments_numpy_f64, m)?)?;
    m.add_function(wrap_pyfunction!(find_segments_numpy_f32, m)?)?;
    m.add_function(wrap_pyfunction!(find_segments_numpy_i64, m)?)?;
    m.add_function(wrap_pyfunction!(find_segments_numpy_i32, m)?)?;

    Ok(())
}
