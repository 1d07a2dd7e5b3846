//! Python bindings for the moon phase sensor.
//!
//! Built with the `python` feature. The extension module is importable as
//! `moon_phase` and exposes a single `MoonPhaseSensor` class:
//!
//! ```python
//! from moon_phase import MoonPhaseSensor
//!
//! sensor = MoonPhaseSensor(52.52, 13.405, timezone="utc")
//! sensor.update()
//! print(sensor.state, sensor.icon, sensor.state_attributes())
//! ```

use chrono::{DateTime, Utc};
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;
use qtty::angular::Degrees;
use serde_json::Value;

use crate::ephemeris::Ephemeris;
use crate::services::MoonPhaseSensor;
use crate::time::OutputZone;

/// Python-facing sensor for one location.
#[pyclass(name = "MoonPhaseSensor", module = "moon_phase")]
#[derive(Debug, Clone)]
pub struct PyMoonPhaseSensor {
    inner: MoonPhaseSensor,
}

#[pymethods]
impl PyMoonPhaseSensor {
    #[new]
    #[pyo3(signature = (latitude, longitude, timezone=None))]
    pub fn new(latitude: f64, longitude: f64, timezone: Option<&str>) -> PyResult<Self> {
        let zone = timezone
            .unwrap_or("local")
            .parse::<OutputZone>()
            .map_err(PyValueError::new_err)?;

        // Reject bad coordinates at construction rather than on first update.
        crate::ephemeris::SiderustEphemeris::default()
            .observer(Degrees::new(latitude), Degrees::new(longitude), Utc::now())
            .map_err(|e| PyValueError::new_err(e.to_string()))?;

        Ok(Self {
            inner: MoonPhaseSensor::with_default_ephemeris(
                Degrees::new(latitude),
                Degrees::new(longitude),
                zone,
            ),
        })
    }

    /// Recompute the snapshot. `timestamp` is Unix seconds, default now.
    ///
    /// Returns the new state; on failure the previous state is kept and a
    /// `RuntimeError` is raised.
    #[pyo3(signature = (timestamp=None))]
    pub fn update(&mut self, timestamp: Option<f64>) -> PyResult<String> {
        let now = match timestamp {
            Some(ts) => unix_to_utc(ts)?,
            None => Utc::now(),
        };
        self.inner
            .update(now)
            .map(|snapshot| snapshot.state().to_string())
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))
    }

    #[getter]
    pub fn name(&self) -> &'static str {
        self.inner.name()
    }

    #[getter]
    pub fn state(&self) -> Option<&'static str> {
        self.inner.state()
    }

    #[getter]
    pub fn icon(&self) -> &'static str {
        self.inner.icon()
    }

    pub fn state_attributes<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new(py);
        for (key, value) in self.inner.attributes() {
            set_json_item(&dict, &key, &value)?;
        }
        Ok(dict)
    }

    fn __repr__(&self) -> String {
        format!(
            "MoonPhaseSensor(state={})",
            self.inner.state().unwrap_or("unknown")
        )
    }
}

fn unix_to_utc(timestamp: f64) -> PyResult<DateTime<Utc>> {
    if !timestamp.is_finite() {
        return Err(PyValueError::new_err("timestamp must be finite"));
    }
    let secs = timestamp.floor();
    let nanos = ((timestamp - secs) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(secs as i64, nanos)
        .ok_or_else(|| PyValueError::new_err(format!("timestamp {} out of range", timestamp)))
}

fn set_json_item(dict: &Bound<'_, PyDict>, key: &str, value: &Value) -> PyResult<()> {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => dict.set_item(key, i),
            None => dict.set_item(key, n.as_f64()),
        },
        Value::String(s) => dict.set_item(key, s),
        Value::Bool(b) => dict.set_item(key, *b),
        Value::Null => dict.set_item(key, dict.py().None()),
        other => dict.set_item(key, other.to_string()),
    }
}

/// Moon phase sensor extension module.
#[pymodule]
fn moon_phase(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyMoonPhaseSensor>()?;
    Ok(())
}
