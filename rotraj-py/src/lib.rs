//! Python bindings for rotraj.
//!
//! `RotationTrajectory` is a callable transform: given an `(H, W)` or
//! `(H, W, C)` uint8 array it returns the stacked trajectory as a uint8
//! array shaped `(N, C, H, W)` (or `(N, H, W, C)` with `layout="nhwc"`).

use numpy::{PyArray1, PyArray4, PyArrayMethods, PyReadonlyArrayDyn, PyUntypedArrayMethods};
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use rotraj::{
    AngleSchedule, ErrorKind, Fill, ImageView, Interpolation, NamedFill, PaddingMode, RotrajError,
    TensorLayout, Trajectory, TrajectoryConfig, TrajectoryGenerator,
};

/// Convert a RotrajError to a Python exception.
fn to_py_err(err: RotrajError) -> PyErr {
    match err.kind() {
        ErrorKind::Configuration | ErrorKind::Image => PyValueError::new_err(err.to_string()),
        ErrorKind::Io => PyRuntimeError::new_err(err.to_string()),
    }
}

fn parse_fill(fill: Option<&Bound<'_, PyAny>>) -> PyResult<Fill> {
    let Some(fill) = fill else {
        return Ok(Fill::default());
    };
    if let Ok(value) = fill.extract::<u8>() {
        return Ok(Fill::Scalar(value));
    }
    if let Ok(name) = fill.extract::<String>() {
        return name.parse::<NamedFill>().map(Fill::Named).map_err(to_py_err);
    }
    if let Ok(values) = fill.extract::<Vec<u8>>() {
        return Ok(Fill::PerChannel(values));
    }
    Err(PyValueError::new_err(
        "fill must be an int in [0, 255], a tuple of ints, or a color name",
    ))
}

fn parse_interpolation(name: &str) -> PyResult<Interpolation> {
    match name.to_lowercase().as_str() {
        "nearest" => Ok(Interpolation::Nearest),
        "bilinear" => Ok(Interpolation::Bilinear),
        "bicubic" => Ok(Interpolation::Bicubic),
        _ => Err(PyValueError::new_err(
            "interpolation must be 'nearest', 'bilinear' or 'bicubic'",
        )),
    }
}

fn parse_padding(name: &str) -> PyResult<PaddingMode> {
    match name.to_lowercase().as_str() {
        "uniform" => Ok(PaddingMode::Uniform),
        "per_axis" => Ok(PaddingMode::PerAxis),
        _ => Err(PyValueError::new_err("padding must be 'uniform' or 'per_axis'")),
    }
}

fn parse_layout(name: &str) -> PyResult<TensorLayout> {
    match name.to_lowercase().as_str() {
        "nchw" => Ok(TensorLayout::Nchw),
        "nhwc" => Ok(TensorLayout::Nhwc),
        _ => Err(PyValueError::new_err("layout must be 'nchw' or 'nhwc'")),
    }
}

fn build_config(
    angle_range: (f64, f64),
    sample_count: usize,
    fill: Option<&Bound<'_, PyAny>>,
    interpolation: &str,
    padding: &str,
    layout: &str,
    parallel: bool,
) -> PyResult<TrajectoryConfig> {
    Ok(TrajectoryConfig {
        angle_range,
        sample_count,
        fill: parse_fill(fill)?,
        interpolation: parse_interpolation(interpolation)?,
        padding: parse_padding(padding)?,
        layout: parse_layout(layout)?,
        parallel,
    })
}

fn run<'py>(
    py: Python<'py>,
    generator: &TrajectoryGenerator,
    image: PyReadonlyArrayDyn<'py, u8>,
) -> PyResult<Bound<'py, PyArray4<u8>>> {
    let shape = image.shape().to_vec();
    let (height, width, channels) = match shape.as_slice() {
        [h, w] => (*h, *w, 1),
        [h, w, c] => (*h, *w, *c),
        _ => {
            return Err(PyValueError::new_err(
                "image must be a 2D (H, W) or 3D (H, W, C) uint8 array",
            ))
        }
    };
    let data = image.as_slice()?;
    let view = ImageView::from_slice(data, width, height, channels).map_err(to_py_err)?;
    let trajectory = generator.generate(view).map_err(to_py_err)?;
    into_array(py, trajectory)
}

fn into_array(py: Python<'_>, trajectory: Trajectory) -> PyResult<Bound<'_, PyArray4<u8>>> {
    let shape = trajectory.shape();
    PyArray1::from_vec(py, trajectory.into_vec()).reshape(shape)
}

/// Callable transform producing rotation trajectories.
#[pyclass]
pub struct RotationTrajectory {
    inner: TrajectoryGenerator,
}

#[pymethods]
impl RotationTrajectory {
    /// Create a new transform.
    ///
    /// Args:
    ///     angle_range: (min, max) in degrees; max is excluded (default: (-180, 180))
    ///     sample_count: Number of frames (default: 100)
    ///     fill: int, tuple of ints, or "black"/"white"/"gray"/"transparent" (default: "black")
    ///     interpolation: "nearest", "bilinear" or "bicubic" (default: "bicubic")
    ///     padding: "uniform" or "per_axis" (default: "uniform")
    ///     layout: "nchw" or "nhwc" (default: "nchw")
    ///     parallel: Render frames on multiple threads (default: False)
    #[new]
    #[pyo3(signature = (
        angle_range = (-180.0, 180.0),
        sample_count = 100,
        fill = None,
        interpolation = "bicubic",
        padding = "uniform",
        layout = "nchw",
        parallel = false
    ))]
    fn new(
        angle_range: (f64, f64),
        sample_count: usize,
        fill: Option<&Bound<'_, PyAny>>,
        interpolation: &str,
        padding: &str,
        layout: &str,
        parallel: bool,
    ) -> PyResult<Self> {
        let cfg = build_config(
            angle_range,
            sample_count,
            fill,
            interpolation,
            padding,
            layout,
            parallel,
        )?;
        let inner = TrajectoryGenerator::new(cfg).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Generate the trajectory for one image.
    fn __call__<'py>(
        &self,
        py: Python<'py>,
        image: PyReadonlyArrayDyn<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray4<u8>>> {
        run(py, &self.inner, image)
    }

    /// Sampled angles in degrees, in frame order.
    #[getter]
    fn angles(&self) -> Vec<f64> {
        self.inner.schedule().to_vec()
    }

    /// Number of frames per trajectory.
    #[getter]
    fn sample_count(&self) -> usize {
        self.inner.schedule().len()
    }

    fn __repr__(&self) -> String {
        let cfg = self.inner.config();
        format!(
            "RotationTrajectory(angle_range=({}, {}), sample_count={}, parallel={})",
            cfg.angle_range.0, cfg.angle_range.1, cfg.sample_count, cfg.parallel
        )
    }
}

/// Generate a rotation trajectory in a single call.
///
/// Args:
///     image: (H, W) or (H, W, C) uint8 numpy array
///     Remaining arguments as for `RotationTrajectory`.
///
/// Returns:
///     uint8 numpy array shaped (N, C, H, W), or (N, H, W, C) with layout="nhwc"
#[pyfunction]
#[pyo3(signature = (
    image,
    angle_range = (-180.0, 180.0),
    sample_count = 100,
    fill = None,
    interpolation = "bicubic",
    padding = "uniform",
    layout = "nchw",
    parallel = false
))]
#[allow(clippy::too_many_arguments)]
fn generate<'py>(
    py: Python<'py>,
    image: PyReadonlyArrayDyn<'py, u8>,
    angle_range: (f64, f64),
    sample_count: usize,
    fill: Option<&Bound<'py, PyAny>>,
    interpolation: &str,
    padding: &str,
    layout: &str,
    parallel: bool,
) -> PyResult<Bound<'py, PyArray4<u8>>> {
    let cfg = build_config(
        angle_range,
        sample_count,
        fill,
        interpolation,
        padding,
        layout,
        parallel,
    )?;
    let generator = TrajectoryGenerator::new(cfg).map_err(to_py_err)?;
    run(py, &generator, image)
}

/// Angles (degrees) sampled for a range and count; the upper bound is excluded.
#[pyfunction]
#[pyo3(signature = (angle_range = (-180.0, 180.0), sample_count = 100))]
fn angles(angle_range: (f64, f64), sample_count: usize) -> PyResult<Vec<f64>> {
    let schedule =
        AngleSchedule::new(angle_range.0, angle_range.1, sample_count).map_err(to_py_err)?;
    Ok(schedule.to_vec())
}

/// Load an image file as a uint8 numpy array shaped (H, W, C).
#[pyfunction]
fn load_image<'py>(py: Python<'py>, path: &str) -> PyResult<Bound<'py, numpy::PyArray3<u8>>> {
    let img = rotraj::io::load_image(path).map_err(to_py_err)?;
    let shape = [img.height(), img.width(), img.channels()];
    PyArray1::from_vec(py, img.into_vec()).reshape(shape)
}

/// Python module for rotraj.
#[pymodule]
fn _rotraj(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<RotationTrajectory>()?;
    m.add_function(wrap_pyfunction!(generate, m)?)?;
    m.add_function(wrap_pyfunction!(angles, m)?)?;
    m.add_function(wrap_pyfunction!(load_image, m)?)?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
