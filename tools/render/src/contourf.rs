//! Filled contours and band edge lines on plate carrée axes.

use gridmap_core::contour::{isolines, Point};
use gridmap_core::levels::band_index;
use gridmap_core::ScalarField;
use image::Rgb;

use crate::figure::Figure;
use crate::projection::GeoAxes;

/// Paint every axes pixel whose centre falls inside the field's extent with
/// the colour of its band. Pixels outside the extent or the levels are left
/// untouched. Returns the number of painted pixels.
pub fn fill(
    fig: &mut Figure,
    ax: &GeoAxes,
    field: &ScalarField,
    levels: &[f64],
    palette: &[Rgb<u8>],
) -> usize {
    if palette.is_empty() {
        return 0;
    }
    let rect = ax.rect();
    let mut painted = 0;
    for py in rect.y..rect.y + rect.h {
        for px in rect.x..rect.x + rect.w {
            let (lon, lat) = ax.to_lonlat(px, py);
            let Some(value) = field.sample(lon, lat) else { continue };
            let Some(band) = band_index(value, levels) else { continue };
            fig.img.put_pixel(px, py, palette[band.min(palette.len() - 1)]);
            painted += 1;
        }
    }
    painted
}

/// Draw the isoline of every interior level (the band edges).
/// Returns the number of segments drawn.
pub fn draw_band_edges(
    fig: &mut Figure,
    ax: &GeoAxes,
    field: &ScalarField,
    levels: &[f64],
    color: Rgb<u8>,
) -> usize {
    if field.width() < 2 || field.height() < 2 || levels.len() < 3 {
        return 0;
    }
    let clip = ax.rect();
    let mut drawn = 0;
    for &level in &levels[1..levels.len() - 1] {
        for seg in isolines(&field.values, level) {
            let (a_lon, a_lat) = index_to_lonlat(field, seg.start);
            let (b_lon, b_lat) = index_to_lonlat(field, seg.end);
            fig.draw_line(ax.to_pixel(a_lon, a_lat), ax.to_pixel(b_lon, b_lat), color, clip);
            drawn += 1;
        }
    }
    drawn
}

/// Fractional (col, row) index → (lon, lat).
fn index_to_lonlat(field: &ScalarField, p: Point) -> (f64, f64) {
    let e = field.extent();
    let lon = e.min_lon + p.x / (field.width() - 1) as f64 * e.lon_span();
    let lat = e.min_lat + p.y / (field.height() - 1) as f64 * e.lat_span();
    (lon, lat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormap::viridis_palette;
    use crate::figure::{FigureSize, BLACK, WHITE};
    use gridmap_core::grid::Grid;
    use gridmap_core::GridFieldGenerator;

    fn setup() -> (Figure, GeoAxes) {
        let fig = Figure::new(FigureSize::default()).unwrap();
        let ax = GeoAxes::new(&fig);
        (fig, ax)
    }

    #[test]
    fn fill_paints_only_inside_field_extent() {
        let (mut fig, ax) = setup();
        let field = GridFieldGenerator::new().generate();
        let levels = vec![-2.0, -1.0, 0.0, 1.0, 2.0];
        let palette = viridis_palette(4);
        let painted = fill(&mut fig, &ax, &field, &levels, &palette);
        assert!(painted > 0);

        // Inside: lon 0, lat 50.
        let (x, y) = ax.to_pixel(0.0, 50.0);
        assert!(palette.contains(fig.img.get_pixel(x as u32, y as u32)));
        // Outside: equator and far east.
        let (x, y) = ax.to_pixel(0.0, 0.0);
        assert_eq!(*fig.img.get_pixel(x as u32, y as u32), WHITE);
        let (x, y) = ax.to_pixel(120.0, 50.0);
        assert_eq!(*fig.img.get_pixel(x as u32, y as u32), WHITE);
    }

    #[test]
    fn fill_area_matches_extent_share() {
        let (mut fig, ax) = setup();
        let field = GridFieldGenerator::new().generate();
        let painted = fill(&mut fig, &ax, &field, &[-10.0, 10.0], &viridis_palette(1));
        // 160° × 40° of a 360° × 180° map.
        let expected = (ax.rect().w * ax.rect().h) as f64 * (160.0 * 40.0) / (360.0 * 180.0);
        assert!((painted as f64 - expected).abs() / expected < 0.05, "{painted} vs {expected}");
    }

    #[test]
    fn band_colour_follows_value() {
        let (mut fig, ax) = setup();
        // Field rising west to east: 0 at -80°, 1 at 80°.
        let values = Grid::from_fn(2, 2, |_, c| c as f64);
        let field = ScalarField::new(vec![-80.0, 80.0], vec![30.0, 70.0], values);
        let palette = vec![Rgb([255, 0, 0]), Rgb([0, 0, 255])];
        fill(&mut fig, &ax, &field, &[0.0, 0.5, 1.0], &palette);

        let (x, y) = ax.to_pixel(-60.0, 50.0);
        assert_eq!(*fig.img.get_pixel(x as u32, y as u32), palette[0]);
        let (x, y) = ax.to_pixel(60.0, 50.0);
        assert_eq!(*fig.img.get_pixel(x as u32, y as u32), palette[1]);
    }

    #[test]
    fn band_edges_follow_the_isoline() {
        let (mut fig, ax) = setup();
        let values = Grid::from_fn(2, 2, |_, c| c as f64);
        let field = ScalarField::new(vec![-80.0, 80.0], vec![30.0, 70.0], values);
        let drawn = draw_band_edges(&mut fig, &ax, &field, &[0.0, 0.5, 1.0], BLACK);
        assert_eq!(drawn, 1);
        // The 0.5 isoline sits at lon 0.
        let (x, y) = ax.to_pixel(0.0, 50.0);
        assert_eq!(*fig.img.get_pixel(x as u32, y as u32), BLACK);
    }

    #[test]
    fn no_interior_levels_draws_nothing() {
        let (mut fig, ax) = setup();
        let field = GridFieldGenerator::new().generate();
        assert_eq!(draw_band_edges(&mut fig, &ax, &field, &[-2.0, 2.0], BLACK), 0);
    }
}
