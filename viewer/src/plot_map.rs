//! Mirrored contour map: gridded polarity or age on both ridge flanks.
use egui::{Color32, Pos2, Rect, Stroke, Ui, Vec2};

use engine::griddata::{GridField, MapField};

use crate::colormap::{palette_for, sample_linear_srgb};

/// Per-node colors, row-major with the first row at the top of the map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapRaster {
    pub width: usize,
    pub height: usize,
    pub rgb: Vec<[u8; 3]>,
}

/// Color every grid node. Along-ridge increases upward, so rows are flipped.
pub fn rasterize(grid: &GridField, field: MapField) -> MapRaster {
    let pal = palette_for(field);
    let (nx, ny) = (grid.spec.nx, grid.spec.ny);
    let mut rgb = Vec::with_capacity(nx * ny);
    for row in 0..ny {
        let iy = ny - 1 - row;
        for ix in 0..nx {
            rgb.push(sample_linear_srgb(pal, grid.value(ix, iy) as f32));
        }
    }
    MapRaster { width: nx, height: ny, rgb }
}

/// Screen x of the ridge axis inside `rect`, if the map spans it.
pub fn ridge_x(grid: &GridField, rect: Rect) -> Option<f32> {
    let (x0, x1) = grid.spec.x_range;
    if !(x0 < 0.0 && x1 > 0.0) {
        return None;
    }
    let t = (-x0 / (x1 - x0)) as f32;
    Some(rect.left() + t * rect.width())
}

/// Paint the map into the remaining space of `ui`.
pub fn ui(ui: &mut Ui, grid: &GridField, field: MapField) {
    let raster = rasterize(grid, field);
    let rect = ui.available_rect_before_wrap();
    let painter = ui.painter_at(rect);
    if raster.width == 0 || raster.height == 0 {
        return;
    }
    let cell = Vec2::new(rect.width() / raster.width as f32, rect.height() / raster.height as f32);
    for row in 0..raster.height {
        for col in 0..raster.width {
            let [r, g, b] = raster.rgb[row * raster.width + col];
            let min = Pos2::new(rect.left() + col as f32 * cell.x, rect.top() + row as f32 * cell.y);
            // Overlap by a pixel to hide seams between adjacent cells
            let cell_rect = Rect::from_min_size(min, cell + Vec2::splat(1.0));
            painter.rect_filled(cell_rect, 0.0, Color32::from_rgb(r, g, b));
        }
    }
    if let Some(x) = ridge_x(grid, rect) {
        painter.line_segment(
            [Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())],
            Stroke::new(1.5, Color32::from_rgb(220, 40, 40)),
        );
    }
    ui.allocate_rect(rect, egui::Sense::hover());
}
