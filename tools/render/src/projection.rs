//! Plate carrée map axes: longitude and latitude map linearly to pixels.

use gridmap_core::coords::Extent;

use crate::figure::{Figure, PixelRect};

/// Fraction of the figure left blank on every side.
const MARGIN: f64 = 0.05;

/// Map axes placed inside a figure.
/// The axes rectangle keeps the extent's lon:lat aspect ratio (1° = 1° on
/// screen) and is centred in the figure.
#[derive(Debug, Clone, Copy)]
pub struct GeoAxes {
    extent: Extent,
    fig_w: u32,
    fig_h: u32,
    rect: PixelRect,
}

impl GeoAxes {
    /// Axes showing the whole globe.
    pub fn new(fig: &Figure) -> Self {
        let mut ax = Self {
            extent: Extent::GLOBAL,
            fig_w: fig.width(),
            fig_h: fig.height(),
            rect: PixelRect { x: 0, y: 0, w: 0, h: 0 },
        };
        ax.layout();
        ax
    }

    pub fn set_global(&mut self) {
        self.set_extent(Extent::GLOBAL);
    }

    pub fn set_extent(&mut self, extent: Extent) {
        self.extent = extent;
        self.layout();
    }

    pub fn rect(&self) -> PixelRect {
        self.rect
    }

    fn layout(&mut self) {
        let avail_w = self.fig_w as f64 * (1.0 - 2.0 * MARGIN);
        let avail_h = self.fig_h as f64 * (1.0 - 2.0 * MARGIN);
        let aspect = self.extent.lon_span() / self.extent.lat_span();

        let (w, h) = if avail_w / avail_h > aspect {
            (avail_h * aspect, avail_h)
        } else {
            (avail_w, avail_w / aspect)
        };
        let w = w.round().max(1.0) as u32;
        let h = h.round().max(1.0) as u32;
        self.rect = PixelRect {
            x: self.fig_w.saturating_sub(w) / 2,
            y: self.fig_h.saturating_sub(h) / 2,
            w: w.min(self.fig_w),
            h: h.min(self.fig_h),
        };
    }

    /// Continuous pixel coordinates of (lon, lat); north is up.
    pub fn to_pixel(&self, lon: f64, lat: f64) -> (f64, f64) {
        let e = &self.extent;
        let x = self.rect.x as f64 + (lon - e.min_lon) / e.lon_span() * self.rect.w as f64;
        let y = self.rect.y as f64 + (e.max_lat - lat) / e.lat_span() * self.rect.h as f64;
        (x, y)
    }

    /// (lon, lat) at the centre of pixel `(px, py)`.
    pub fn to_lonlat(&self, px: u32, py: u32) -> (f64, f64) {
        let e = &self.extent;
        let fx = (px as f64 + 0.5 - self.rect.x as f64) / self.rect.w as f64;
        let fy = (py as f64 + 0.5 - self.rect.y as f64) / self.rect.h as f64;
        (e.min_lon + fx * e.lon_span(), e.max_lat - fy * e.lat_span())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::FigureSize;
    use approx::assert_relative_eq;

    fn axes() -> GeoAxes {
        let fig = Figure::new(FigureSize::default()).unwrap();
        let mut ax = GeoAxes::new(&fig);
        ax.set_global();
        ax
    }

    #[test]
    fn global_axes_are_two_to_one_and_centred() {
        let r = axes().rect();
        assert_eq!((r.w, r.h), (540, 270));
        assert_eq!((r.x, r.y), (30, 15));
    }

    #[test]
    fn corners_and_origin_project_to_rect() {
        let ax = axes();
        let r = ax.rect();
        let (x, y) = ax.to_pixel(-180.0, 90.0);
        assert_relative_eq!(x, r.x as f64);
        assert_relative_eq!(y, r.y as f64);
        let (x, y) = ax.to_pixel(180.0, -90.0);
        assert_relative_eq!(x, (r.x + r.w) as f64);
        assert_relative_eq!(y, (r.y + r.h) as f64);
        let (x, y) = ax.to_pixel(0.0, 0.0);
        assert_relative_eq!(x, 300.0);
        assert_relative_eq!(y, 150.0);
    }

    #[test]
    fn to_lonlat_inverts_to_pixel() {
        let ax = axes();
        let (lon, lat) = ax.to_lonlat(300, 100);
        let (x, y) = ax.to_pixel(lon, lat);
        assert_relative_eq!(x, 300.5, epsilon = 1e-9);
        assert_relative_eq!(y, 100.5, epsilon = 1e-9);
    }

    #[test]
    fn regional_extent_changes_layout() {
        let mut ax = axes();
        ax.set_extent(Extent::new(-80.0, 80.0, 30.0, 70.0));
        let r = ax.rect();
        // 4:1 extent is width-limited in a 2:1 figure.
        assert_eq!(r.w, 540);
        assert_eq!(r.h, 135);
    }
}
