//! Layout mode classification.
//!
//! A [`LayoutMode`] is a total function of the viewport: no hysteresis, and
//! exactly one mode for any input.

use crate::model::viewport::{Orientation, ViewportState};
use std::fmt;

/// Discrete viewport classification driving structural rendering choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutMode {
    /// Narrower than the tablet breakpoint.
    Mobile,
    /// Tablet width, portrait orientation.
    TabletPortrait,
    /// Tablet width, landscape orientation.
    TabletLandscape,
    /// At or beyond the desktop breakpoint.
    Desktop,
}

impl LayoutMode {
    /// All modes, narrowest first.
    pub const ALL: [LayoutMode; 4] = [
        LayoutMode::Mobile,
        LayoutMode::TabletPortrait,
        LayoutMode::TabletLandscape,
        LayoutMode::Desktop,
    ];

    /// Kebab-case name (`mobile`, `tablet-portrait`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::TabletPortrait => "tablet-portrait",
            Self::TabletLandscape => "tablet-landscape",
            Self::Desktop => "desktop",
        }
    }

    /// Tablet-class or wider. Gates the sidebar.
    pub fn is_tablet(&self) -> bool {
        !matches!(self, Self::Mobile)
    }

    /// Touch-class device (mobile or tablet). Gates pull-to-refresh.
    pub fn accepts_gestures(&self) -> bool {
        !matches!(self, Self::Desktop)
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when breakpoints are not strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("tablet breakpoint ({tablet}px) must be below desktop breakpoint ({desktop}px)")]
pub struct InvalidBreakpoints {
    /// Requested tablet breakpoint.
    pub tablet: u32,
    /// Requested desktop breakpoint.
    pub desktop: u32,
}

/// Width thresholds separating mobile, tablet and desktop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoints {
    tablet: u32,
    desktop: u32,
}

impl Breakpoints {
    /// 768px / 1024px.
    pub const DEFAULT: Self = Self {
        tablet: 768,
        desktop: 1024,
    };

    /// Smart constructor; requires `tablet < desktop`.
    pub fn new(tablet: u32, desktop: u32) -> Result<Self, InvalidBreakpoints> {
        if tablet >= desktop {
            return Err(InvalidBreakpoints { tablet, desktop });
        }
        Ok(Self { tablet, desktop })
    }

    /// Smallest tablet width.
    pub fn tablet(&self) -> u32 {
        self.tablet
    }

    /// Smallest desktop width.
    pub fn desktop(&self) -> u32 {
        self.desktop
    }

    /// Classify a viewport.
    pub fn classify(&self, viewport: &ViewportState) -> LayoutMode {
        if viewport.width < self.tablet {
            LayoutMode::Mobile
        } else if viewport.width < self.desktop {
            match viewport.orientation {
                Orientation::Portrait => LayoutMode::TabletPortrait,
                Orientation::Landscape => LayoutMode::TabletLandscape,
            }
        } else {
            LayoutMode::Desktop
        }
    }
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Mode plus the boolean facets consumers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceFacets {
    /// Resolved layout mode.
    pub mode: LayoutMode,
    /// Tablet-class or wider.
    pub is_tablet: bool,
    /// Orientation is portrait.
    pub is_portrait: bool,
    /// Orientation is landscape.
    pub is_landscape: bool,
    /// Orientation used for the classification.
    pub orientation: Orientation,
}

impl DeviceFacets {
    /// Facets used when no viewport is available (headless rendering).
    pub const HEADLESS: Self = Self {
        mode: LayoutMode::Desktop,
        is_tablet: true,
        is_portrait: false,
        is_landscape: true,
        orientation: Orientation::Landscape,
    };
}

/// Resolve facets for an optional viewport. Never fails.
pub fn resolve(breakpoints: &Breakpoints, viewport: Option<&ViewportState>) -> DeviceFacets {
    let Some(viewport) = viewport else {
        return DeviceFacets::HEADLESS;
    };

    let mode = breakpoints.classify(viewport);
    DeviceFacets {
        mode,
        is_tablet: mode.is_tablet(),
        is_portrait: viewport.orientation == Orientation::Portrait,
        is_landscape: viewport.orientation == Orientation::Landscape,
        orientation: viewport.orientation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(width: u32, orientation: Orientation) -> LayoutMode {
        let viewport = ViewportState::new(width, 600).with_orientation(orientation);
        Breakpoints::DEFAULT.classify(&viewport)
    }

    #[test]
    fn narrow_width_is_mobile_in_any_orientation() {
        assert_eq!(classify(500, Orientation::Portrait), LayoutMode::Mobile);
        assert_eq!(classify(500, Orientation::Landscape), LayoutMode::Mobile);
    }

    #[test]
    fn tablet_breakpoint_is_inclusive() {
        assert_eq!(classify(767, Orientation::Portrait), LayoutMode::Mobile);
        assert_eq!(classify(768, Orientation::Portrait), LayoutMode::TabletPortrait);
    }

    #[test]
    fn tablet_splits_on_orientation() {
        assert_eq!(
            classify(1000, Orientation::Landscape),
            LayoutMode::TabletLandscape
        );
        assert_eq!(classify(1000, Orientation::Portrait), LayoutMode::TabletPortrait);
    }

    #[test]
    fn desktop_breakpoint_is_inclusive() {
        assert_eq!(classify(1023, Orientation::Landscape), LayoutMode::TabletLandscape);
        assert_eq!(classify(1024, Orientation::Landscape), LayoutMode::Desktop);
        assert_eq!(classify(1280, Orientation::Portrait), LayoutMode::Desktop);
    }

    #[test]
    fn breakpoints_reject_inverted_order() {
        assert_eq!(
            Breakpoints::new(1024, 768),
            Err(InvalidBreakpoints {
                tablet: 1024,
                desktop: 768
            })
        );
        assert!(Breakpoints::new(600, 600).is_err());
        assert!(Breakpoints::new(600, 900).is_ok());
    }

    #[test]
    fn resolve_without_viewport_is_headless_desktop() {
        let facets = resolve(&Breakpoints::DEFAULT, None);
        assert_eq!(facets, DeviceFacets::HEADLESS);
        assert_eq!(facets.mode, LayoutMode::Desktop);
    }

    #[test]
    fn resolve_sets_facets_consistently() {
        let viewport = ViewportState::new(900, 1200);
        let facets = resolve(&Breakpoints::DEFAULT, Some(&viewport));

        assert_eq!(facets.mode, LayoutMode::TabletPortrait);
        assert!(facets.is_tablet);
        assert!(facets.is_portrait);
        assert!(!facets.is_landscape);
    }

    #[test]
    fn mobile_is_not_tablet() {
        let viewport = ViewportState::new(400, 800);
        let facets = resolve(&Breakpoints::DEFAULT, Some(&viewport));
        assert!(!facets.is_tablet);
    }

    #[test]
    fn only_desktop_rejects_gestures() {
        for mode in LayoutMode::ALL {
            assert_eq!(mode.accepts_gestures(), mode != LayoutMode::Desktop);
        }
    }

    #[test]
    fn display_uses_kebab_case() {
        assert_eq!(LayoutMode::TabletLandscape.to_string(), "tablet-landscape");
    }
}
