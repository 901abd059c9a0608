// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement geometry: fit regions, cropping, and candidate selection.
//!
//! These helpers are pure; [`Fit`](crate::Fit) feeds them measurements taken
//! from a [`FitHost`] and applies the winning placement.

use kurbo::{Point, Rect, Size, Vec2};
use smallvec::SmallVec;

use crate::host::FitHost;
use crate::options::{FitInto, HorizontalAlign, VerticalAlign};

/// Upper bound on candidates: 4 corners, 4 non-overlapping corners, 2 centered,
/// 2 middled, and the exact center.
pub const MAX_CANDIDATES: usize = 13;

/// Rect of the region a fitted element is constrained to.
///
/// The viewport is `(0, 0, innerWidth, innerHeight)`; an element region is its
/// bounding rect.
pub fn normalized_rect<K: Copy + Eq, H: FitHost<K> + ?Sized>(host: &H, fit_into: FitInto<K>) -> Rect {
    match fit_into {
        FitInto::Viewport => Rect::from_origin_size(Point::ZERO, host.viewport()),
        FitInto::Element(key) => host.bounding_rect(key),
    }
}

/// Area of a box of `size` at `origin` that falls outside `fit_rect`.
///
/// Cropping along each axis is weighted by the box's extent on the other axis,
/// so a box hanging off a corner counts both strips.
pub fn offscreen_area(origin: Point, size: Size, fit_rect: Rect) -> f64 {
    let vertical_crop =
        (origin.y - fit_rect.y0).min(0.0) + (fit_rect.y1 - (origin.y + size.height)).min(0.0);
    let horizontal_crop =
        (origin.x - fit_rect.x0).min(0.0) + (fit_rect.x1 - (origin.x + size.width)).min(0.0);
    vertical_crop.abs() * size.width + horizontal_crop.abs() * size.height
}

/// One candidate placement of the fitted box (margin box, top-left origin).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Candidate {
    /// Horizontal alignment this candidate realizes. Never [`HorizontalAlign::Auto`].
    pub horizontal: HorizontalAlign,
    /// Vertical alignment this candidate realizes. Never [`VerticalAlign::Auto`].
    pub vertical: VerticalAlign,
    /// Top-left corner of the margin box.
    pub origin: Point,
    /// Cropped area, filled in during selection.
    pub offscreen_area: f64,
}

impl Candidate {
    fn new(vertical: VerticalAlign, horizontal: HorizontalAlign, x: f64, y: f64) -> Self {
        Self {
            horizontal,
            vertical,
            origin: Point::new(x, y),
            offscreen_area: 0.0,
        }
    }
}

/// Inputs for choosing where to place a box against a position target.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlacementRequest {
    /// Horizontal preference, already resolved for text direction.
    pub horizontal: Option<HorizontalAlign>,
    /// Vertical preference.
    pub vertical: Option<VerticalAlign>,
    /// Horizontal and vertical nudges.
    pub offset: Vec2,
    /// Size of the margin box.
    pub size: Size,
    /// Size of the border box.
    pub size_no_margins: Size,
    /// Bounding rect of the position target.
    pub target: Rect,
    /// Normalized rect of the fit region.
    pub fit_rect: Rect,
    /// Alignment is only a preference.
    pub dynamic_align: bool,
    /// Candidates avoid overlapping the target.
    pub no_overlap: bool,
}

impl PlacementRequest {
    fn horizontal_pref(&self) -> Option<HorizontalAlign> {
        self.horizontal.filter(|a| *a != HorizontalAlign::Auto)
    }

    fn vertical_pref(&self) -> Option<VerticalAlign> {
        self.vertical.filter(|a| *a != VerticalAlign::Auto)
    }

    /// Generate every candidate placement, in preference order.
    pub fn candidates(&self) -> SmallVec<[Candidate; MAX_CANDIDATES]> {
        use HorizontalAlign::{Center, Left, Right};
        use VerticalAlign::{Bottom, Middle, Top};

        let t = self.target;
        let Vec2 { x: ho, y: vo } = self.offset;
        let top = t.y0 + vo;
        let bottom = t.y1 - self.size.height - vo;
        let left = t.x0 + ho;
        let right = t.x1 - self.size.width - ho;

        let mut out: SmallVec<[Candidate; MAX_CANDIDATES]> = SmallVec::new();
        out.push(Candidate::new(Top, Left, left, top));
        out.push(Candidate::new(Top, Right, right, top));
        out.push(Candidate::new(Bottom, Left, left, bottom));
        out.push(Candidate::new(Bottom, Right, right, bottom));

        if self.no_overlap {
            for i in 0..4 {
                let copy = out[i];
                out.push(copy);
            }
            // Overlapping horizontally only: move above/below the target.
            out[0].origin.y += t.height();
            out[1].origin.y += t.height();
            out[2].origin.y -= t.height();
            out[3].origin.y -= t.height();
            // Overlapping vertically only: move beside the target.
            out[4].origin.x += t.width();
            out[6].origin.x += t.width();
            out[5].origin.x -= t.width();
            out[7].origin.x -= t.width();
        }

        let h = self.horizontal_pref();
        let v = self.vertical_pref();
        let center_x = t.x0 - self.size_no_margins.width / 2.0 + t.width() / 2.0 + ho;
        let middle_y = t.y0 - self.size_no_margins.height / 2.0 + t.height() / 2.0 + vo;
        let (skip_y, skip_x) = if self.no_overlap {
            (t.height(), t.width())
        } else {
            (0.0, 0.0)
        };

        if matches!(h, None | Some(Center)) {
            out.push(Candidate::new(Top, Center, center_x, top + skip_y));
            out.push(Candidate::new(Bottom, Center, center_x, bottom - skip_y));
        }
        if matches!(v, None | Some(Middle)) {
            out.push(Candidate::new(Middle, Left, left + skip_x, middle_y));
            out.push(Candidate::new(Middle, Right, right - skip_x, middle_y));
        }
        if v == Some(Middle) && h == Some(Center) {
            out.push(Candidate::new(Middle, Center, center_x, middle_y));
        }
        out
    }

    /// Pick the best candidate.
    ///
    /// Without `dynamic_align`/`no_overlap` an exact alignment match wins outright.
    /// Otherwise the first uncropped candidate honoring the preferences wins;
    /// failing that, the least cropped one, with ties going to a candidate that
    /// satisfies at least one axis preference.
    pub fn best(&self) -> Option<Candidate> {
        let h = self.horizontal_pref();
        let v = self.vertical_pref();
        let mut best: Option<Candidate> = None;

        for mut candidate in self.candidates() {
            let v_ok = v == Some(candidate.vertical);
            let h_ok = h == Some(candidate.horizontal);

            if !self.dynamic_align && !self.no_overlap && v_ok && h_ok {
                return Some(candidate);
            }

            let align_ok = (v.is_none() || v_ok) && (h.is_none() || h_ok);
            if !self.dynamic_align && !align_ok {
                continue;
            }

            candidate.offscreen_area = offscreen_area(candidate.origin, self.size, self.fit_rect);
            if candidate.offscreen_area == 0.0 && align_ok {
                return Some(candidate);
            }

            let current = best.get_or_insert(candidate);
            let diff = candidate.offscreen_area - current.offscreen_area;
            if diff < 0.0 || (diff == 0.0 && (v_ok || h_ok)) {
                *current = candidate;
            }
        }
        best
    }
}
