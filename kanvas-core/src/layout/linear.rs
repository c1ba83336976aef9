//! Linear layout: members side by side along one axis, optionally wrapping.

use crate::{
    foundation::core::{Point, Rect},
    foundation::error::{KanvasError, KanvasResult},
    layout::group::{GroupLayout, MemberExtent},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Named cross-axis alignments.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

impl Alignment {
    pub fn factor(self) -> f64 {
        match self {
            Self::Left => 0.0,
            Self::Center => 0.5,
            Self::Right => 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearLayout {
    orientation: Orientation,
    spacing: f64,
    alignment: f64,
    break_point: f64,
}

impl LinearLayout {
    /// `break_point <= 0` disables wrapping.
    pub fn new(
        orientation: Orientation,
        spacing: f64,
        alignment: f64,
        break_point: f64,
    ) -> KanvasResult<Self> {
        let mut layout = Self {
            orientation,
            spacing: 0.0,
            alignment: Alignment::Center.factor(),
            break_point: 0.0,
        };
        layout.set_spacing(spacing)?;
        layout.set_alignment_factor(alignment)?;
        layout.set_break_point(break_point)?;
        Ok(layout)
    }

    pub fn horizontal(spacing: f64) -> KanvasResult<Self> {
        Self::new(
            Orientation::Horizontal,
            spacing,
            Alignment::Center.factor(),
            0.0,
        )
    }

    pub fn vertical(spacing: f64) -> KanvasResult<Self> {
        Self::new(Orientation::Vertical, spacing, Alignment::Center.factor(), 0.0)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn is_horizontal(&self) -> bool {
        self.orientation == Orientation::Horizontal
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn alignment_factor(&self) -> f64 {
        self.alignment
    }

    pub fn break_point(&self) -> f64 {
        self.break_point
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    pub fn set_spacing(&mut self, spacing: f64) -> KanvasResult<()> {
        if !spacing.is_finite() {
            return Err(KanvasError::validation(format!(
                "spacing must be finite, got {spacing}"
            )));
        }
        self.spacing = spacing;
        Ok(())
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment.factor();
    }

    /// 0 aligns members at the start of the cross axis, 1 at the end.
    pub fn set_alignment_factor(&mut self, factor: f64) -> KanvasResult<()> {
        if !(0.0..=1.0).contains(&factor) {
            return Err(KanvasError::validation(format!(
                "alignment factor must lie in [0, 1], got {factor}"
            )));
        }
        self.alignment = factor;
        Ok(())
    }

    pub fn set_break_point(&mut self, break_point: f64) -> KanvasResult<()> {
        if break_point.is_nan() {
            return Err(KanvasError::validation("break point must not be NaN"));
        }
        self.break_point = break_point;
        Ok(())
    }

    /// (primary, cross) extents of `bbox`.
    fn extents(&self, bbox: Rect) -> (f64, f64) {
        match self.orientation {
            Orientation::Horizontal => (bbox.width(), bbox.height()),
            Orientation::Vertical => (bbox.height(), bbox.width()),
        }
    }

    fn point(&self, primary: f64, cross: f64) -> Point {
        match self.orientation {
            Orientation::Horizontal => Point::new(primary, cross),
            Orientation::Vertical => Point::new(cross, primary),
        }
    }
}

impl GroupLayout for LinearLayout {
    fn arrange(&self, members: &[MemberExtent]) -> KanvasResult<Vec<Option<Point>>> {
        let mut boxes = Vec::with_capacity(members.len());
        let mut max: f64 = 0.0;
        for (i, m) in members.iter().enumerate() {
            let bbox = m.bbox.ok_or_else(|| {
                KanvasError::configuration(format!(
                    "group member {i} has no bounding box"
                ))
            })?;
            boxes.push(bbox);
            if m.visible {
                max = max.max(self.extents(bbox).1);
            }
        }

        let wraps = self.break_point > 0.0;
        let mut pos = 0.0;
        let mut ortho = 0.0;
        let mut out = Vec::with_capacity(members.len());
        for (m, bbox) in members.iter().zip(boxes) {
            if !m.visible {
                out.push(None);
                continue;
            }
            let (primary, cross) = self.extents(bbox);
            let dest = self.point(pos, ortho + (max - cross) * self.alignment);
            tracing::trace!(x = dest.x, y = dest.y, "linear placement");
            out.push(Some(dest));
            pos += primary + self.spacing;
            if wraps && pos >= self.break_point {
                pos = 0.0;
                ortho += cross + self.spacing;
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/linear.rs"]
mod tests;
