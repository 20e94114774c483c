use serde::{Deserialize, Serialize};

use crate::TemplatePoint;

/// The target shape of a round: an ordered sequence of template points.
///
/// Each point is one template unit; [`Template::size`] is the unit count that
/// scorers turn into a pixel budget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Template {
    points: Vec<TemplatePoint>,
}

impl Template {
    #[must_use]
    pub const fn new(points: Vec<TemplatePoint>) -> Self {
        Self { points }
    }

    #[must_use]
    pub fn points(&self) -> &[TemplatePoint] {
        &self.points
    }

    /// Number of template units.
    #[must_use]
    pub fn size(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl From<Vec<TemplatePoint>> for Template {
    fn from(points: Vec<TemplatePoint>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<TemplatePoint> for Template {
    fn from_iter<I: IntoIterator<Item = TemplatePoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Layout parameters of the table the player has to draw.
///
/// The table is a rectangular top of `width`×`height` units centred on
/// `(center_x, center_y)`, with two legs of `leg_height` units hanging from
/// its outer bottom corners. Template points sit at unit centres.
///
/// # Example
///
/// ```
/// use tablecraft_core::TableTemplate;
///
/// let template = TableTemplate::default().build();
/// assert_eq!(template.size(), 70);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableTemplate {
    pub center_x: i32,
    pub center_y: i32,
    /// Table top width in units.
    pub width: i32,
    /// Table top height in units.
    pub height: i32,
    /// Leg length in units.
    pub leg_height: i32,
    /// Unit edge length in pixels.
    pub unit: i32,
}

impl Default for TableTemplate {
    fn default() -> Self {
        Self {
            center_x: 400,
            center_y: 300,
            width: 10,
            height: 6,
            leg_height: 5,
            unit: 20,
        }
    }
}

impl TableTemplate {
    /// Generates the template points: the top in column-major order, then the
    /// left leg and the right leg from top to bottom.
    #[must_use]
    pub fn build(&self) -> Template {
        let Self {
            center_x,
            center_y,
            width,
            height,
            leg_height,
            unit,
        } = *self;
        let half_unit = unit / 2;
        let left = center_x - width * unit / 2;
        let right = center_x + width * unit / 2;
        let top = center_y - height * unit / 2;
        let bottom = center_y + height * unit / 2;

        let table_top = (0..width).flat_map(|col| {
            (0..height).map(move |row| {
                TemplatePoint::new(
                    left + col * unit + half_unit,
                    top + row * unit + half_unit,
                )
            })
        });
        let legs = [left + half_unit, right - half_unit]
            .into_iter()
            .flat_map(|x| (0..leg_height).map(move |i| TemplatePoint::new(x, bottom + i * unit)));

        table_top.chain(legs).collect()
    }
}
