//! Plain-Rust helpers behind the wasm exports.
//!
//! Kept free of `wasm_bindgen` types so they can be unit tested natively.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use log::warn;

use dither_gamma::gamma::Gamma;
use dither_gamma::{
    render, Curve, CurveControls, CurvePresetStore, Layout, PatternError, PatternRenderer,
};

/// Parse a layout name. An empty name selects the default layout.
pub fn parse_layout(name: &str) -> Result<Layout, PatternError> {
    if name.trim().is_empty() {
        return Ok(Layout::default());
    }
    name.parse()
}

/// Render `values` for `layout` into RGBA bytes.
///
/// Zero dimensions select the layout's canvas size. Values are clamped to
/// 0..=255 like the slider widgets do.
pub fn render_values(
    layout: Layout,
    width: u32,
    height: u32,
    values: &[f64],
) -> Result<Vec<u8>, PatternError> {
    let points: Vec<u8> = values
        .iter()
        .map(|v| v.round().clamp(0.0, 255.0) as u8)
        .collect();
    let curve = Curve::new(layout, &points)?;
    let (w, h) = sized(layout, width, height);
    Ok(render(&curve, w, h).into_vec())
}

/// Use the layout's canvas size for any zero dimension.
pub fn sized(layout: Layout, width: u32, height: u32) -> (u32, u32) {
    let (dw, dh) = layout.canvas_size();
    (
        if width == 0 { dw } else { width },
        if height == 0 { dh } else { height },
    )
}

/// Comma-separated preset names for `layout`.
pub fn preset_names(layout: Layout) -> String {
    CurvePresetStore::new(layout).names().join(",")
}

/// Point values of a named preset.
pub fn preset_values(layout: Layout, name: &str) -> Result<Vec<u8>, PatternError> {
    Ok(CurvePresetStore::new(layout).get(name)?.points().to_vec())
}

/// Reference curve of an ideal display, e.g. `srgb` or `2.2`.
pub fn reference_values(layout: Layout, gamma: &str) -> Result<Vec<u8>, PatternError> {
    let gamma: Gamma = gamma.parse()?;
    Ok(Curve::from_gamma(layout, &gamma).points().to_vec())
}

/// Calibration state behind the JS `Calibrator` class.
///
/// Tracks whether the curve changed since the last frame so the page only
/// re-renders when a slider or preset actually moved.
pub struct Session {
    controls: CurveControls,
    width: u32,
    height: u32,
    dirty: Rc<Cell<bool>>,
}

impl Session {
    pub fn new(layout: Layout, width: u32, height: u32) -> Self {
        let (width, height) = sized(layout, width, height);
        let mut controls = CurveControls::for_layout(layout);
        let dirty = Rc::new(Cell::new(true));
        let flag = Rc::clone(&dirty);
        controls.subscribe(move |_: &Curve| flag.set(true));
        Self {
            controls,
            width,
            height,
            dirty,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn controls(&self) -> &CurveControls {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut CurveControls {
        &mut self.controls
    }

    /// Register a change callback that receives the new point values.
    ///
    /// A failing callback is logged and does not stop later listeners.
    pub fn on_change<F, E>(&mut self, mut callback: F)
    where
        F: FnMut(&[u8]) -> Result<(), E> + 'static,
        E: fmt::Debug,
    {
        self.controls.subscribe(move |curve: &Curve| {
            if let Err(e) = callback(curve.points()) {
                warn!("on_change callback failed: {:?}", e);
            }
        });
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    /// Render the current curve and mark the frame clean.
    pub fn frame(&self) -> Vec<u8> {
        self.dirty.set(false);
        PatternRenderer::new(self.controls.curve())
            .render(self.width, self.height)
            .into_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_values_default_size() {
        let rgba = render_values(
            Layout::Halving,
            0,
            0,
            &[171.0, 127.0, 97.0, 74.0, 56.0, 41.0, 30.0],
        )
        .unwrap();
        assert_eq!(rgba.len(), 134 * 240 * 4);
        assert_eq!(&rgba[..8], &[255, 255, 255, 255, 0, 0, 0, 255]);
    }

    #[test]
    fn test_render_values_clamps() {
        let rgba = render_values(Layout::Halving, 3, 1, &[999.0, 0.0, 0.0, 0.0, 0.0, 0.0, -4.0])
            .unwrap();
        // Middle column is band 0 solid, clamped to 255.
        assert_eq!(&rgba[4..8], &[255, 255, 255, 255]);
    }

    #[test]
    fn test_render_values_wrong_length() {
        assert!(render_values(Layout::NamedGrays, 10, 10, &[1.0, 2.0]).is_err());
    }

    #[test]
    fn test_presets() {
        assert_eq!(
            preset_names(Layout::Halving),
            "sRGB-ish,2010s-LED,2020s-P3,custom"
        );
        assert_eq!(preset_values(Layout::Halving, "sRGB-ish").unwrap()[0], 171);
        assert_eq!(
            preset_values(Layout::Halving, "nope"),
            Err(PatternError::UnknownPreset("nope".to_string()))
        );
    }

    #[test]
    fn test_reference_values() {
        assert_eq!(
            reference_values(Layout::Halving, "2.2").unwrap(),
            vec![186, 136, 99, 72, 53, 39, 28]
        );
        assert!(reference_values(Layout::Halving, "warm").is_err());
    }

    #[test]
    fn test_parse_layout() {
        assert_eq!(parse_layout("named-grays").unwrap(), Layout::NamedGrays);
        assert_eq!(parse_layout("").unwrap(), Layout::Halving);
        assert_eq!(
            parse_layout("???"),
            Err(PatternError::UnknownLayout("???".to_string()))
        );
    }

    #[test]
    fn test_session_dirty_tracking() {
        let mut s = Session::new(Layout::Halving, 0, 0);
        assert_eq!((s.width(), s.height()), (134, 240));
        assert!(s.is_dirty());

        let frame = s.frame();
        assert_eq!(frame.len(), 134 * 240 * 4);
        assert!(!s.is_dirty());
        // Rendering again does not dirty the session.
        let _ = s.frame();
        assert!(!s.is_dirty());

        assert_eq!(s.controls_mut().set_value(0, 300).unwrap(), 255);
        assert!(s.is_dirty());
        let frame = s.frame();
        // Pixel (60, 0) is in the solid middle third of band 0.
        assert_eq!(&frame[60 * 4..61 * 4], &[255, 255, 255, 255]);

        s.controls_mut().select_preset("2020s-P3").unwrap();
        assert!(s.is_dirty());
        assert_eq!(s.controls().curve().get(0), Some(186));
    }

    #[test]
    fn test_session_failed_edit_stays_clean() {
        let mut s = Session::new(Layout::NamedGrays, 20, 30);
        let _ = s.frame();
        assert!(s.controls_mut().set_value(9, 10).is_err());
        assert!(s.controls_mut().select_preset("nope").is_err());
        assert!(!s.is_dirty());
        assert_eq!(s.frame().len(), 20 * 30 * 4);
    }

    #[test]
    fn test_failing_callback_does_not_stop_others() {
        use std::cell::RefCell;

        let mut s = Session::new(Layout::Halving, 10, 10);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        s.on_change(|_: &[u8]| Err("boom"));
        s.on_change(move |points: &[u8]| {
            sink.borrow_mut().push(points[0]);
            Ok::<(), ()>(())
        });

        s.controls_mut().set_value(0, 200).unwrap();
        s.controls_mut().set_value(0, 190).unwrap();
        assert_eq!(*seen.borrow(), vec![200, 190]);
        assert!(s.is_dirty());
    }
}
