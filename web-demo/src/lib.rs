//! WebAssembly bindings for gradient paths.
//!
//! JavaScript hands over an SVG path string and gets back segments tagged
//! with their progress along the path. Turning progress into a color is left
//! to the caller.

use gradient_path::{
    BezPathCurve, Curve, GradientPath, GradientPathConfig, MarkerSample, Segment,
    flatten_segments, segment_to_d,
};
use wasm_bindgen::prelude::*;

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => (log(&format_args!($($t)*).to_string()))
}

fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn to_js_error(message: String) -> JsValue {
    console_log!("Error: {}", message);
    JsValue::from_str(&message)
}

#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// One segment ready to be colored and drawn.
#[wasm_bindgen]
#[derive(Clone, Debug)]
pub struct WebSegment {
    segment: Segment,
    closed: bool,
}

#[wasm_bindgen]
impl WebSegment {
    #[wasm_bindgen(getter)]
    pub fn progress(&self) -> f64 {
        self.segment.progress
    }

    /// `true` for filled polygons, `false` for stroked sub-paths.
    #[wasm_bindgen(getter)]
    pub fn closed(&self) -> bool {
        self.closed
    }

    pub fn len(&self) -> usize {
        self.segment.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segment.is_empty()
    }

    /// Flat `[x0, y0, x1, y1, ...]` coordinates.
    pub fn coords(&self) -> Vec<f64> {
        self.segment
            .samples
            .iter()
            .flat_map(|s| [s.x, s.y])
            .collect()
    }

    pub fn to_svg_path(&self) -> String {
        segment_to_d(&self.segment.samples, self.closed)
    }
}

/// One sample drawn as a dot.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug)]
pub struct WebMarker {
    x: f64,
    y: f64,
    progress: f64,
    segment: usize,
}

#[wasm_bindgen]
impl WebMarker {
    #[wasm_bindgen(getter)]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[wasm_bindgen(getter)]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Index of the segment the sample belongs to.
    #[wasm_bindgen(getter)]
    pub fn segment(&self) -> usize {
        self.segment
    }
}

impl From<MarkerSample> for WebMarker {
    fn from(marker: MarkerSample) -> Self {
        WebMarker {
            x: marker.sample.x,
            y: marker.sample.y,
            progress: marker.sample.progress,
            segment: marker.segment,
        }
    }
}

fn build_path(
    path_d: &str,
    segments: usize,
    samples: usize,
    precision: Option<u32>,
) -> Result<GradientPath<BezPathCurve>, String> {
    let curve = BezPathCurve::from_svg(path_d).map_err(|e| e.to_string())?;
    let config = GradientPathConfig::new(segments, samples).with_precision(precision);
    GradientPath::new(curve, config).map_err(|e| e.to_string())
}

fn web_segments(segments: Vec<Segment>, closed: bool) -> Vec<WebSegment> {
    segments
        .into_iter()
        .map(|segment| WebSegment { segment, closed })
        .collect()
}

/// A path cut into gradient segments.
#[wasm_bindgen]
pub struct WebGradientPath {
    inner: GradientPath<BezPathCurve>,
}

#[wasm_bindgen]
impl WebGradientPath {
    /// `precision` of `undefined` keeps full coordinates.
    #[wasm_bindgen(constructor)]
    pub fn new(
        path_d: &str,
        segments: usize,
        samples: usize,
        precision: Option<u32>,
    ) -> Result<WebGradientPath, JsValue> {
        set_panic_hook();
        let inner = build_path(path_d, segments, samples, precision).map_err(to_js_error)?;
        console_log!(
            "Gradient path: {} segments over length {:.2}",
            inner.data().len(),
            inner.curve().total_length()
        );
        Ok(WebGradientPath { inner })
    }

    #[wasm_bindgen(getter)]
    pub fn total_length(&self) -> f64 {
        self.inner.curve().total_length()
    }

    #[wasm_bindgen(getter)]
    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }

    pub fn segment_count(&self) -> usize {
        self.inner.data().len()
    }

    /// The raw segments, to be stroked.
    pub fn stroke_segments(&self) -> Vec<WebSegment> {
        web_segments(self.inner.data().to_vec(), false)
    }

    /// Seamless filled polygons of the given width.
    pub fn fill_segments(&self, width: f64) -> Result<Vec<WebSegment>, JsValue> {
        let filled = self
            .inner
            .fill_data(width)
            .map_err(|e| to_js_error(e.to_string()))?;
        Ok(web_segments(filled, true))
    }

    /// Every sample of every segment.
    pub fn markers(&self) -> Vec<WebMarker> {
        flatten_segments(self.inner.data())
            .into_iter()
            .map(WebMarker::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = "M0,0 L100,0 L100,100 L0,100 Z";

    #[test]
    fn test_build_path() {
        let path = build_path(SQUARE, 4, 3, Some(2)).unwrap();
        assert!(path.is_closed());
        assert_eq!(path.data().len(), 4);
    }

    #[test]
    fn test_build_path_errors_are_messages() {
        let err = build_path("M0,0 Lx", 4, 3, Some(2)).unwrap_err();
        assert!(err.starts_with("Failed to parse SVG path"), "{err}");

        let err = build_path(SQUARE, 0, 3, Some(2)).unwrap_err();
        assert!(err.starts_with("Invalid argument"), "{err}");
    }

    #[test]
    fn test_stroke_segments() {
        let path = build_path(SQUARE, 4, 2, Some(2)).unwrap();
        let segments = web_segments(path.data().to_vec(), false);
        assert_eq!(segments[0].coords(), vec![0.0, 0.0, 100.0, 0.0]);
        assert_eq!(segments[0].to_svg_path(), "M0,0H100");
        assert_eq!(segments[0].progress(), 0.25);
        assert!(!segments[0].closed());
    }

    #[test]
    fn test_fill_segments() {
        let path = build_path(SQUARE, 4, 2, Some(2)).unwrap();
        let filled = web_segments(path.fill_data(10.0).unwrap(), true);
        assert_eq!(filled.len(), 4);
        assert_eq!(filled[0].len(), 4);
        assert_eq!(filled[0].to_svg_path(), "M-2.5,-2.5H102.5L97.5,2.5H2.5Z");
    }

    #[test]
    fn test_markers() {
        let path = build_path("M0,0 L90,0", 3, 3, Some(2)).unwrap();
        let markers: Vec<WebMarker> = flatten_segments(path.data())
            .into_iter()
            .map(WebMarker::from)
            .collect();
        assert_eq!(markers.len(), 9);
        assert_eq!(markers[8].segment(), 2);
        assert_eq!(markers[8].x(), 90.0);
        assert_eq!(markers[8].progress(), 1.0);
    }
}
