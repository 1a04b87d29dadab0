//! Named curve presets plus the mutable `custom` slot.
//!
//! Each layout ships a small fixed table of measured curves. On top of that
//! the store keeps:
//!
//! - the *active* curve (whatever was last loaded or edited), and
//! - a `custom` slot holding the last manually edited curve. Until something
//!   is saved into it, the slot is filled lazily from the active curve the
//!   first time `custom` is requested.
//!
//! Callers may also register extra named presets with [`CurvePresetStore::insert`]
//! (the CLI does this from its configuration file).

use log::info;

use crate::curve::Curve;
use crate::error::{PatternError, Result};
use crate::layout::Layout;

/// Name of the user-editable slot.
pub const CUSTOM: &str = "custom";

/// A builtin preset: name and literal point values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub values: &'static [u8],
}

const HALVING_PRESETS: [Preset; 3] = [
    Preset {
        name: "sRGB-ish",
        values: &[171, 127, 97, 74, 56, 41, 30],
    },
    Preset {
        name: "2010s-LED",
        values: &[180, 131, 96, 71, 53, 40, 30],
    },
    Preset {
        name: "2020s-P3",
        values: &[186, 136, 99, 72, 53, 39, 28],
    },
];

const NAMED_PRESETS: [Preset; 3] = [
    Preset {
        name: "sRGB-ish",
        values: &[49, 71, 99, 137, 165, 188, 207, 225, 240],
    },
    Preset {
        name: "2010s-LED",
        values: &[45, 66, 94, 131, 160, 182, 203, 222, 239],
    },
    Preset {
        name: "2020s-P3",
        values: &[53, 72, 99, 136, 163, 186, 206, 224, 240],
    },
];

/// Builtin presets for `layout`, in display order.
pub fn builtin_presets(layout: Layout) -> &'static [Preset] {
    match layout {
        Layout::Halving => &HALVING_PRESETS,
        Layout::NamedGrays => &NAMED_PRESETS,
    }
}

#[derive(Debug, Clone)]
pub struct CurvePresetStore {
    layout: Layout,
    extra: Vec<(String, Curve)>,
    active: Curve,
    active_name: String,
    custom: Option<Curve>,
}

impl CurvePresetStore {
    /// Store for `layout`, with the first builtin preset active.
    pub fn new(layout: Layout) -> Self {
        let first = builtin_presets(layout)[0];
        Self {
            layout,
            extra: Vec::new(),
            active: builtin_curve(layout, &first),
            active_name: first.name.to_string(),
            custom: None,
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// The curve currently in effect.
    pub fn active(&self) -> &Curve {
        &self.active
    }

    /// Name of the preset the active curve came from (`custom` after edits).
    pub fn active_name(&self) -> &str {
        &self.active_name
    }

    /// All selectable names: builtins, user presets, then `custom`.
    pub fn names(&self) -> Vec<&str> {
        builtin_presets(self.layout)
            .iter()
            .map(|p| p.name)
            .chain(self.extra.iter().map(|(n, _)| n.as_str()))
            .chain(std::iter::once(CUSTOM))
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        name == CUSTOM || self.lookup(name).is_some()
    }

    /// Look up a curve by name without changing the active curve.
    ///
    /// `custom` returns the snapshot, or the active curve while the slot is
    /// still empty.
    pub fn get(&self, name: &str) -> Result<Curve> {
        if name == CUSTOM {
            return Ok(self.custom.as_ref().unwrap_or(&self.active).clone());
        }
        self.lookup(name)
            .ok_or_else(|| PatternError::UnknownPreset(name.to_string()))
    }

    /// Snapshot a manually edited curve into the `custom` slot and make it
    /// active.
    pub fn save_custom(&mut self, curve: Curve) -> Result<()> {
        self.check_layout(&curve)?;
        info!("saved custom curve {}", curve);
        self.custom = Some(curve.clone());
        self.active = curve;
        self.active_name = CUSTOM.to_string();
        Ok(())
    }

    /// Make the named curve active and return it.
    pub fn load(&mut self, name: &str) -> Result<Curve> {
        let curve = if name == CUSTOM {
            self.custom.get_or_insert_with(|| self.active.clone()).clone()
        } else {
            self.get(name)?
        };
        info!("loaded preset {:?}: {}", name, curve);
        self.active = curve.clone();
        self.active_name = name.to_string();
        Ok(curve)
    }

    /// Register an extra named preset, replacing an earlier one of the same
    /// name. Builtin names and `custom` are reserved.
    pub fn insert(&mut self, name: &str, curve: Curve) -> Result<()> {
        self.check_layout(&curve)?;
        if name == CUSTOM || builtin_presets(self.layout).iter().any(|p| p.name == name) {
            return Err(PatternError::ReservedPreset(name.to_string()));
        }
        match self.extra.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = curve,
            None => self.extra.push((name.to_string(), curve)),
        }
        Ok(())
    }

    fn lookup(&self, name: &str) -> Option<Curve> {
        if let Some(p) = builtin_presets(self.layout).iter().find(|p| p.name == name) {
            return Some(builtin_curve(self.layout, p));
        }
        self.extra
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c.clone())
    }

    fn check_layout(&self, curve: &Curve) -> Result<()> {
        if curve.layout() != self.layout {
            return Err(PatternError::LayoutMismatch {
                expected: self.layout,
                found: curve.layout(),
            });
        }
        Ok(())
    }
}

fn builtin_curve(layout: Layout, preset: &Preset) -> Curve {
    match Curve::new(layout, preset.values) {
        Ok(c) => c,
        Err(e) => unreachable!("builtin preset {} is malformed: {}", preset.name, e),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_are_valid() {
        for layout in Layout::ALL {
            for p in builtin_presets(layout) {
                let c = Curve::new(layout, p.values).unwrap();
                assert!(c.follows_convention(), "{} {}", layout, p.name);
            }
        }
    }

    #[test]
    fn test_get_srgb_ish() {
        let store = CurvePresetStore::new(Layout::Halving);
        let c = store.get("sRGB-ish").unwrap();
        assert_eq!(c.points(), &[171, 127, 97, 74, 56, 41, 30]);
        assert_eq!(
            store.get("nope"),
            Err(PatternError::UnknownPreset("nope".to_string()))
        );
    }

    #[test]
    fn test_names() {
        let store = CurvePresetStore::new(Layout::Halving);
        assert_eq!(
            store.names(),
            vec!["sRGB-ish", "2010s-LED", "2020s-P3", "custom"]
        );
    }

    #[test]
    fn test_custom_lazily_snapshots_active() {
        let mut store = CurvePresetStore::new(Layout::Halving);
        store.load("2020s-P3").unwrap();
        store.load("sRGB-ish").unwrap();
        let custom = store.load(CUSTOM).unwrap();
        assert_eq!(custom.points(), &[171, 127, 97, 74, 56, 41, 30]);
        assert_eq!(store.active_name(), CUSTOM);

        // The slot is now filled; loading another preset does not move it.
        store.load("2020s-P3").unwrap();
        assert_eq!(store.get(CUSTOM).unwrap(), custom);
        assert_eq!(store.load(CUSTOM).unwrap(), custom);
    }

    #[test]
    fn test_get_custom_before_init_follows_active() {
        let mut store = CurvePresetStore::new(Layout::Halving);
        store.load("2010s-LED").unwrap();
        assert_eq!(store.get(CUSTOM).unwrap().get(0), Some(180));
    }

    #[test]
    fn test_save_custom() {
        let mut store = CurvePresetStore::new(Layout::Halving);
        let mut edited = store.get("sRGB-ish").unwrap();
        edited.set(0, 175).unwrap();
        store.save_custom(edited.clone()).unwrap();
        assert_eq!(store.active(), &edited);
        store.load("2010s-LED").unwrap();
        assert_eq!(store.load(CUSTOM).unwrap(), edited);
    }

    #[test]
    fn test_layout_mismatch() {
        let mut store = CurvePresetStore::new(Layout::NamedGrays);
        let wrong = Curve::new(Layout::Halving, &[1, 2, 3, 4, 5, 6, 7]).unwrap();
        assert_eq!(
            store.save_custom(wrong),
            Err(PatternError::LayoutMismatch {
                expected: Layout::NamedGrays,
                found: Layout::Halving
            })
        );
    }

    #[test]
    fn test_insert_user_preset() {
        let mut store = CurvePresetStore::new(Layout::Halving);
        let mine = Curve::new(Layout::Halving, &[170, 125, 95, 72, 54, 40, 29]).unwrap();
        store.insert("office", mine.clone()).unwrap();
        assert!(store.contains("office"));
        assert_eq!(store.load("office").unwrap(), mine);
        assert_eq!(
            store.names(),
            vec!["sRGB-ish", "2010s-LED", "2020s-P3", "office", "custom"]
        );
        assert_eq!(
            store.insert("sRGB-ish", mine.clone()),
            Err(PatternError::ReservedPreset("sRGB-ish".to_string()))
        );
        assert!(store.insert(CUSTOM, mine).is_err());
    }
}
