//! Geometric primitives for placing a rendered image on a page.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in page space
//! - [`Size`] - Width and height dimensions
//! - [`Placement`] - Where and how large an image is drawn on a page
//!
//! All values are in PDF points. Centering is symmetric, so the placement is
//! valid whether the page origin is the top-left or the bottom-left corner.

/// A 2D point representing a position in page coordinate space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Multiplies both dimension by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }

    /// Returns true if either dimension is zero or negative
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// The result of fitting an image onto a page.
///
/// `origin` is the corner of the drawn image closest to the page origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    origin: Point,
    size: Size,
    scale: f32,
}

impl Placement {
    /// Uniformly scales `content` to fit inside `page` and centers it.
    ///
    /// The scale is chosen so the limiting dimension fills `1.0 - margin` of
    /// the page; the other dimension keeps the aspect ratio. Returns `None`
    /// when either size is empty or the margin leaves no drawable area.
    ///
    /// # Examples
    ///
    /// ```
    /// # use umlgen_core::geometry::{Placement, Size};
    /// let page = Size::new(600.0, 800.0);
    /// let image = Size::new(1200.0, 400.0);
    ///
    /// let placement = Placement::fit_centered(image, page, 0.5).unwrap();
    /// assert_eq!(placement.size().width(), 300.0);
    /// assert_eq!(placement.origin().x(), 150.0);
    /// ```
    pub fn fit_centered(content: Size, page: Size, margin: f32) -> Option<Self> {
        if content.is_empty() || page.is_empty() || !(0.0..1.0).contains(&margin) {
            return None;
        }

        let fit = (page.width / content.width).min(page.height / content.height);
        let scale = fit * (1.0 - margin);
        let size = content.scale(scale);
        let origin = Point::new(
            (page.width - size.width) / 2.0,
            (page.height - size.height) / 2.0,
        );

        Some(Self {
            origin,
            size,
            scale,
        })
    }

    /// Returns the corner of the image closest to the page origin
    pub fn origin(self) -> Point {
        self.origin
    }

    /// Returns the drawn size of the image
    pub fn size(self) -> Size {
        self.size
    }

    /// Returns the uniform scale factor applied to the image
    pub fn scale(self) -> f32 {
        self.scale
    }
}
