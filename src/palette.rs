//! User-supplied output palette and nearest-color lookup.

use crate::color::{DistanceMetric, Oklab, Rgb};
use crate::error::Result;

/// Ordered list of permitted output colors.
///
/// May be empty and may contain duplicates. Order only matters when two
/// entries are exactly equidistant from a color: the earlier one wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_colors(colors: Vec<Rgb>) -> Self {
        Self { colors }
    }

    /// Parse hex entries such as `"#ff0000"` or `"0f0"`.
    ///
    /// Parsing is all-or-nothing: the first malformed entry fails the whole
    /// palette with `InvalidPalette`.
    pub fn parse<S: AsRef<str>>(entries: &[S]) -> Result<Self> {
        let colors = entries
            .iter()
            .map(|s| s.as_ref().parse::<Rgb>())
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { colors })
    }

    pub fn len(&self) -> usize { self.colors.len() }
    pub fn is_empty(&self) -> bool { self.colors.is_empty() }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn push(&mut self, color: Rgb) {
        self.colors.push(color);
    }

    /// Remove the entry at `index`, keeping the order of the rest.
    pub fn remove(&mut self, index: usize) -> Option<Rgb> {
        (index < self.colors.len()).then(|| self.colors.remove(index))
    }

    pub fn clear(&mut self) {
        self.colors.clear();
    }

    pub fn to_hex_strings(&self) -> Vec<String> {
        self.colors.iter().map(|c| c.to_hex()).collect()
    }

    /// Euclidean RGB distance between two colors.
    pub fn distance(a: Rgb, b: Rgb) -> f64 {
        a.distance(b)
    }

    /// Index of the entry closest to `color` in RGB space, `None` if empty.
    pub fn nearest(&self, color: Rgb) -> Option<usize> {
        first_min_by_key(self.colors.iter().map(|&c| color.distance_squared(c)))
    }

    pub fn nearest_with_metric(&self, color: Rgb, metric: DistanceMetric) -> Option<usize> {
        match metric {
            DistanceMetric::Rgb => self.nearest(color),
            DistanceMetric::Oklab => self.matcher(metric).nearest(color),
        }
    }

    /// Precompute per-entry data for repeated lookups.
    pub(crate) fn matcher(&self, metric: DistanceMetric) -> Matcher<'_> {
        match metric {
            DistanceMetric::Rgb => Matcher::Rgb(&self.colors),
            DistanceMetric::Oklab => {
                Matcher::Oklab(self.colors.iter().map(|&c| c.to_oklab()).collect())
            }
        }
    }
}

impl From<Vec<Rgb>> for Palette {
    fn from(colors: Vec<Rgb>) -> Self {
        Palette::from_colors(colors)
    }
}

impl FromIterator<Rgb> for Palette {
    fn from_iter<I: IntoIterator<Item = Rgb>>(iter: I) -> Self {
        Palette::from_colors(iter.into_iter().collect())
    }
}

pub(crate) enum Matcher<'a> {
    Rgb(&'a [Rgb]),
    Oklab(Vec<Oklab>),
}

impl Matcher<'_> {
    #[inline]
    pub(crate) fn nearest(&self, color: Rgb) -> Option<usize> {
        match self {
            Matcher::Rgb(colors) => {
                first_min_by_key(colors.iter().map(|&c| color.distance_squared(c)))
            }
            Matcher::Oklab(labs) => {
                let target = color.to_oklab();
                first_min_by_key(labs.iter().map(|&lab| target.distance_squared(lab)))
            }
        }
    }
}

/// Position of the smallest distance; the first one wins ties.
#[inline(always)]
fn first_min_by_key<D: PartialOrd>(distances: impl Iterator<Item = D>) -> Option<usize> {
    let mut best_idx = None;
    let mut best_dist: Option<D> = None;
    for (i, d) in distances.enumerate() {
        let closer = match &best_dist {
            Some(b) => d < *b,
            None => true,
        };
        if closer {
            best_dist = Some(d);
            best_idx = Some(i);
        }
    }
    best_idx
}
