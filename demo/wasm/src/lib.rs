use wasm_bindgen::prelude::*;

use dither_gamma::{Curve, Layout, PatternError};

mod render;

use render::{parse_layout, Session};

fn js_error(e: PatternError) -> JsError {
    JsError::new(&e.to_string())
}

/// Render a curve into an RGBA pixel buffer.
///
/// Returns a `Vec<u8>` of RGBA pixel data (width * height * 4 bytes).
/// The frontend copies this into an ImageData for canvas display. A zero
/// width or height selects the layout's own canvas size.
#[wasm_bindgen]
pub fn render_pattern(
    layout: &str,
    width: u32,
    height: u32,
    values: &[f64],
) -> Result<Vec<u8>, JsError> {
    let layout = parse_layout(layout).map_err(js_error)?;
    render::render_values(layout, width, height, values).map_err(js_error)
}

/// Get the library version string.
#[wasm_bindgen]
pub fn version() -> String {
    format!("dither-gamma {}", env!("CARGO_PKG_VERSION"))
}

/// Get list of available layout names.
#[wasm_bindgen]
pub fn layout_names() -> String {
    Layout::ALL.map(|l| l.name()).join(",")
}

/// Get list of preset names for a layout, `custom` last.
#[wasm_bindgen]
pub fn preset_names(layout: &str) -> Result<String, JsError> {
    let layout = parse_layout(layout).map_err(js_error)?;
    Ok(render::preset_names(layout))
}

/// Point values of a named preset.
#[wasm_bindgen]
pub fn preset_values(layout: &str, name: &str) -> Result<Vec<u8>, JsError> {
    let layout = parse_layout(layout).map_err(js_error)?;
    render::preset_values(layout, name).map_err(js_error)
}

/// Point values an ideal display with `gamma` (`srgb`, `linear`, or an
/// exponent such as `2.2`) would calibrate to.
#[wasm_bindgen]
pub fn reference_values(layout: &str, gamma: &str) -> Result<Vec<u8>, JsError> {
    let layout = parse_layout(layout).map_err(js_error)?;
    render::reference_values(layout, gamma).map_err(js_error)
}

/// Slider-backed calibration session.
///
/// The page binds one slider per point to `set_value`, a picker to
/// `select_preset`, and redraws from `pixels()` inside its `on_change`
/// callback.
#[wasm_bindgen]
pub struct Calibrator {
    session: Session,
}

#[wasm_bindgen]
impl Calibrator {
    #[wasm_bindgen(constructor)]
    pub fn new(layout: &str, width: u32, height: u32) -> Result<Calibrator, JsError> {
        let layout = parse_layout(layout).map_err(js_error)?;
        Ok(Calibrator {
            session: Session::new(layout, width, height),
        })
    }

    pub fn width(&self) -> u32 {
        self.session.width()
    }

    pub fn height(&self) -> u32 {
        self.session.height()
    }

    pub fn layout(&self) -> String {
        self.curve().layout().name().to_string()
    }

    /// Current point values.
    pub fn values(&self) -> Vec<u8> {
        self.curve().points().to_vec()
    }

    /// Labels for the sliders, comma separated.
    pub fn labels(&self) -> String {
        self.curve().layout().point_labels().join(",")
    }

    pub fn preset_name(&self) -> String {
        self.session.controls().store().active_name().to_string()
    }

    /// Slider input. Returns the clamped value that was stored.
    pub fn set_value(&mut self, index: usize, value: i32) -> Result<u8, JsError> {
        self.session
            .controls_mut()
            .set_value(index, value)
            .map_err(js_error)
    }

    pub fn select_preset(&mut self, name: &str) -> Result<(), JsError> {
        self.session
            .controls_mut()
            .select_preset(name)
            .map_err(js_error)
    }

    /// Register a JS callback invoked with the new values after each change.
    /// Exceptions it throws are logged and swallowed.
    pub fn on_change(&mut self, callback: js_sys::Function) {
        self.session.on_change(move |points: &[u8]| {
            let values = js_sys::Uint8Array::from(points);
            callback.call1(&JsValue::NULL, &values).map(drop)
        });
    }

    /// True if the curve changed since the last `pixels()` call.
    pub fn is_dirty(&self) -> bool {
        self.session.is_dirty()
    }

    /// Render the current curve.
    pub fn pixels(&self) -> Vec<u8> {
        self.session.frame()
    }
}

impl Calibrator {
    fn curve(&self) -> &Curve {
        self.session.controls().curve()
    }
}
