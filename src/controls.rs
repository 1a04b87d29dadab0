//! Slider-style curve controls with change listeners.
//!
//! `CurveControls` is the seam between an input surface (sliders, a preset
//! picker, a CLI) and whatever redraws the pattern. Every change runs each
//! listener to completion, in registration order, before returning.

use log::trace;

use crate::curve::Curve;
use crate::error::{PatternError, Result};
use crate::layout::Layout;
use crate::preset::CurvePresetStore;

/// Handle returned by [`CurveControls::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub type CurveListener = Box<dyn FnMut(&Curve)>;

pub struct CurveControls {
    store: CurvePresetStore,
    curve: Curve,
    listeners: Vec<(ListenerId, CurveListener)>,
    next_id: u64,
}

impl CurveControls {
    pub fn new(store: CurvePresetStore) -> Self {
        let curve = store.active().clone();
        Self {
            store,
            curve,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Controls over the builtin presets of `layout`.
    pub fn for_layout(layout: Layout) -> Self {
        Self::new(CurvePresetStore::new(layout))
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    pub fn store(&self) -> &CurvePresetStore {
        &self.store
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&Curve) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(i, _)| *i != id);
        self.listeners.len() != before
    }

    /// Set one point from raw widget input, clamped to `0..=255`.
    ///
    /// The edited curve becomes the `custom` snapshot. Returns the stored
    /// value.
    pub fn set_value(&mut self, index: usize, raw: i32) -> Result<u8> {
        let len = self.curve.len();
        if index >= len {
            return Err(PatternError::PointIndex { index, len });
        }
        let value = raw.clamp(0, 255) as u8;
        self.curve.set(index, value)?;
        self.store.save_custom(self.curve.clone())?;
        self.notify();
        Ok(value)
    }

    /// Replace every point at once (e.g. a pasted list), as a manual edit.
    pub fn set_values(&mut self, values: &[u8]) -> Result<()> {
        let curve = Curve::new(self.curve.layout(), values)?;
        self.store.save_custom(curve.clone())?;
        self.curve = curve;
        self.notify();
        Ok(())
    }

    pub fn select_preset(&mut self, name: &str) -> Result<()> {
        self.curve = self.store.load(name)?;
        self.notify();
        Ok(())
    }

    fn notify(&mut self) {
        trace!(
            "notifying {} listener(s) of {}",
            self.listeners.len(),
            self.curve
        );
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.curve);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
