//! Active section tracking.
//!
//! The host reports region geometry on every scroll or resize. The tracker
//! turns consecutive snapshots into enter/leave transitions and promotes a
//! region that entered the viewport band to the active section. When nothing
//! enters, the previous active section is kept.

use tracing::debug;

/// Vertical window of the viewport in which a region counts as in view.
///
/// For a viewport of height `h` the band spans `[top_inset, h * (1 - bottom_ratio))`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportBand {
    /// Excluded strip at the top of the viewport.
    pub top_inset: f64,
    /// Excluded share of the viewport at the bottom, in `[0, 1)`.
    pub bottom_ratio: f64,
}

impl Default for ViewportBand {
    fn default() -> Self {
        Self {
            top_inset: 80.0,
            bottom_ratio: 0.70,
        }
    }
}

impl ViewportBand {
    /// Band bounds `(top, bottom)` for a viewport height, or `None` when empty.
    #[must_use]
    pub fn bounds(&self, viewport_height: f64) -> Option<(f64, f64)> {
        let top = self.top_inset;
        let bottom = viewport_height * (1.0 - self.bottom_ratio);
        (bottom > top).then_some((top, bottom))
    }

    /// Whether a region intersects the band.
    #[must_use]
    pub fn contains(&self, rect: &RegionRect, viewport_height: f64) -> bool {
        self.bounds(viewport_height)
            .is_some_and(|(top, bottom)| rect.top < bottom && rect.bottom > top)
    }
}

/// Region geometry in viewport coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionRect {
    /// Section id of the region.
    pub id: String,
    /// Top edge.
    pub top: f64,
    /// Bottom edge.
    pub bottom: f64,
}

impl RegionRect {
    /// Create a region rectangle.
    pub fn new(id: impl Into<String>, top: f64, bottom: f64) -> Self {
        Self {
            id: id.into(),
            top,
            bottom,
        }
    }
}

/// Which region wins when several enter the band in one batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TieBreak {
    /// The region latest in source order.
    #[default]
    Latest,
    /// The region earliest in source order.
    Earliest,
}

/// A change of a region's in-band state between two observations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    /// Section id.
    pub id: String,
    /// `true` when the region entered the band, `false` when it left.
    pub in_band: bool,
}

#[derive(Debug)]
struct Region {
    id: String,
    in_band: bool,
}

/// Tracks the active section of a mounted page.
///
/// The active id is always a registered id. It starts at the first one and
/// is cleared only by [`teardown`](Self::teardown).
#[derive(Debug)]
pub struct SectionTracker {
    regions: Vec<Region>,
    active: Option<usize>,
    band: ViewportBand,
    tie_break: TieBreak,
    observed: bool,
}

impl SectionTracker {
    /// Register regions in source order.
    ///
    /// Ids given more than once are registered once, at their first position.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut regions: Vec<Region> = Vec::new();
        for id in ids {
            let id = id.into();
            if regions.iter().all(|r| r.id != id) {
                regions.push(Region { id, in_band: false });
            }
        }
        let active = (!regions.is_empty()).then_some(0);

        Self {
            regions,
            active,
            band: ViewportBand::default(),
            tie_break: TieBreak::default(),
            observed: false,
        }
    }

    /// Use a custom viewport band.
    #[must_use]
    pub fn with_band(mut self, band: ViewportBand) -> Self {
        self.band = band;
        self
    }

    /// Use a custom tie-break policy.
    #[must_use]
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Currently active section id.
    #[must_use]
    pub fn active_id(&self) -> Option<&str> {
        self.active
            .and_then(|idx| self.regions.get(idx))
            .map(|r| r.id.as_str())
    }

    /// Registered ids in source order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(|r| r.id.as_str())
    }

    /// Whether any region is registered.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.regions.is_empty()
    }

    /// Process a geometry snapshot and return the batch of transitions.
    ///
    /// The first call reports every region. Regions missing from `rects`
    /// count as out of band; rectangles for unregistered ids are ignored.
    pub fn observe(&mut self, rects: &[RegionRect], viewport_height: f64) -> Vec<Transition> {
        let mut batch = Vec::new();
        let mut candidate = None;

        for (idx, region) in self.regions.iter_mut().enumerate() {
            let in_band = rects
                .iter()
                .find(|rect| rect.id == region.id)
                .is_some_and(|rect| self.band.contains(rect, viewport_height));

            if self.observed && in_band == region.in_band {
                continue;
            }
            region.in_band = in_band;
            batch.push(Transition {
                id: region.id.clone(),
                in_band,
            });

            if in_band {
                candidate = match (self.tie_break, candidate) {
                    (TieBreak::Earliest, Some(first)) => Some(first),
                    _ => Some(idx),
                };
            }
        }
        self.observed = true;

        if let Some(idx) = candidate
            && self.active != Some(idx)
        {
            self.active = Some(idx);
            debug!(id = %self.regions[idx].id, "Active section changed");
        }

        batch
    }

    /// Unregister all regions.
    ///
    /// Later observations are no-ops and there is no active section.
    pub fn teardown(&mut self) {
        if !self.regions.is_empty() {
            debug!(regions = self.regions.len(), "Section tracker torn down");
        }
        self.regions.clear();
        self.active = None;
    }
}
