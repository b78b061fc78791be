use pyo3::prelude::*;

mod transform;

/// Register all Python-visible functions and types.
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(transform::convert_datum, m)?)?;
    m.add_function(wrap_pyfunction!(transform::to_utm, m)?)?;
    m.add_function(wrap_pyfunction!(transform::from_utm, m)?)?;
    m.add_function(wrap_pyfunction!(transform::parse_dms, m)?)?;
    m.add_function(wrap_pyfunction!(datums, m)?)?;
    Ok(())
}

/// Names of the supported datums, reference datum first.
#[pyfunction]
fn datums() -> Vec<&'static str> {
    crate::Datum::all().map(|d| d.name).collect()
}
