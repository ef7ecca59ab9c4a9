use eframe::egui::{self, pos2, vec2, Align2, Color32, FontId, Rect, Sense, Ui};

use crate::color::DivergingScale;
use crate::data::charts::ChartData;
use crate::ui::plot::format_amount;

const HEADER_HEIGHT: f32 = 18.0;
const LEGEND_HEIGHT: f32 = 14.0;

// ---------------------------------------------------------------------------
// Squarified layout
// ---------------------------------------------------------------------------

/// Working rectangle in f64 so long rows do not accumulate f32 error.
#[derive(Debug, Clone, Copy)]
struct Free {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

/// Lay out `values` inside `bounds` with the squarified treemap algorithm.
///
/// The result is index-aligned with `values`. Each rectangle's area is
/// proportional to its value; non-positive or non-finite values get an empty
/// rectangle at `bounds.min`.
pub fn squarify(values: &[f64], bounds: Rect) -> Vec<Rect> {
    let mut out = vec![Rect::from_min_size(bounds.min, egui::Vec2::ZERO); values.len()];

    let mut order: Vec<usize> = (0..values.len())
        .filter(|&i| values[i].is_finite() && values[i] > 0.0)
        .collect();
    let total: f64 = order.iter().map(|&i| values[i]).sum();
    if order.is_empty() || !bounds.is_positive() {
        return out;
    }
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));

    let scale = (bounds.width() as f64 * bounds.height() as f64) / total;
    let mut free = Free {
        x: bounds.min.x as f64,
        y: bounds.min.y as f64,
        w: bounds.width() as f64,
        h: bounds.height() as f64,
    };

    let mut row: Vec<usize> = Vec::new();
    let mut row_areas: Vec<f64> = Vec::new();
    for i in order {
        let area = values[i] * scale;
        let side = free.w.min(free.h);
        let keep_growing = row.is_empty() || {
            let mut trial = row_areas.clone();
            trial.push(area);
            worst(&trial, side) <= worst(&row_areas, side)
        };
        if !keep_growing {
            free = place_row(&row, &row_areas, free, &mut out);
            row.clear();
            row_areas.clear();
        }
        row.push(i);
        row_areas.push(area);
    }
    if !row.is_empty() {
        place_row(&row, &row_areas, free, &mut out);
    }
    out
}

/// Worst aspect ratio of a row laid along a side of length `side`.
fn worst(areas: &[f64], side: f64) -> f64 {
    let sum: f64 = areas.iter().sum();
    let hi = areas.iter().copied().fold(f64::MIN, f64::max);
    let lo = areas.iter().copied().fold(f64::MAX, f64::min);
    let (s2, w2) = (sum * sum, side * side);
    (w2 * hi / s2).max(s2 / (w2 * lo))
}

/// Place a finished row along the shorter side and return the space left.
fn place_row(row: &[usize], areas: &[f64], free: Free, out: &mut [Rect]) -> Free {
    let sum: f64 = areas.iter().sum();
    let rect = |x: f64, y: f64, w: f64, h: f64| {
        Rect::from_min_size(pos2(x as f32, y as f32), vec2(w as f32, h as f32))
    };

    if free.w >= free.h {
        let strip = if free.h > 0.0 { sum / free.h } else { 0.0 };
        let mut y = free.y;
        for (&i, &a) in row.iter().zip(areas) {
            let h = if strip > 0.0 { a / strip } else { 0.0 };
            out[i] = rect(free.x, y, strip, h);
            y += h;
        }
        Free {
            x: free.x + strip,
            w: (free.w - strip).max(0.0),
            ..free
        }
    } else {
        let strip = if free.w > 0.0 { sum / free.w } else { 0.0 };
        let mut x = free.x;
        for (&i, &a) in row.iter().zip(areas) {
            let w = if strip > 0.0 { a / strip } else { 0.0 };
            out[i] = rect(x, free.y, w, strip);
            x += w;
        }
        Free {
            y: free.y + strip,
            h: (free.h - strip).max(0.0),
            ..free
        }
    }
}

// ---------------------------------------------------------------------------
// Painting
// ---------------------------------------------------------------------------

/// Render the sector → entity treemap with a colour legend underneath.
pub fn treemap(ui: &mut Ui, charts: &ChartData, height: f32) {
    let Some((lo, hi)) = charts.leaf_range() else {
        return;
    };
    let scale = DivergingScale::new(lo, hi);

    let size = vec2(ui.available_width(), height - LEGEND_HEIGHT - 4.0);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let hover = response.hover_pos();
    let mut tooltip: Option<String> = None;

    let sector_totals: Vec<f64> = charts.hierarchy.iter().map(|s| s.total).collect();
    let sector_rects = squarify(&sector_totals, response.rect);

    for (sector, srect) in charts.hierarchy.iter().zip(sector_rects) {
        if !srect.is_positive() {
            continue;
        }
        painter.rect_filled(srect, 0.0, Color32::from_gray(70));

        let header = Rect::from_min_max(
            srect.min,
            pos2(srect.max.x, (srect.min.y + HEADER_HEIGHT).min(srect.max.y)),
        );
        painter.with_clip_rect(header).text(
            header.left_center() + vec2(4.0, 0.0),
            Align2::LEFT_CENTER,
            &sector.sector,
            FontId::proportional(12.0),
            Color32::WHITE,
        );

        let body = Rect::from_min_max(pos2(srect.min.x, header.max.y), srect.max).shrink(1.0);
        let leaf_totals: Vec<f64> = sector.entities.iter().map(|e| e.total).collect();
        let leaf_rects = squarify(&leaf_totals, body);

        for (leaf, lrect) in sector.entities.iter().zip(leaf_rects) {
            let cell = lrect.shrink(1.0);
            if !cell.is_positive() {
                continue;
            }
            painter.rect_filled(cell, 2.0, scale.color_for(leaf.total));
            painter.with_clip_rect(cell).text(
                cell.left_top() + vec2(4.0, 3.0),
                Align2::LEFT_TOP,
                format!("{}\n{}", leaf.entity, format_amount(leaf.total)),
                FontId::proportional(11.0),
                scale.text_color_for(leaf.total),
            );
            if hover.is_some_and(|p| cell.contains(p)) {
                tooltip = Some(format!(
                    "Sector: {}\nEntidad: {}\nMonto (SOLES): {}",
                    sector.sector,
                    leaf.entity,
                    format_amount(leaf.total)
                ));
            }
        }
    }

    if let Some(text) = tooltip {
        response.on_hover_text_at_pointer(text);
    }

    color_legend(ui, &scale, lo, hi);
}

fn color_legend(ui: &mut Ui, scale: &DivergingScale, lo: f64, hi: f64) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format_amount(lo));
        let (rect, _) = ui.allocate_exact_size(vec2(200.0, LEGEND_HEIGHT), Sense::hover());
        let steps = 40;
        let step_w = rect.width() / steps as f32;
        for i in 0..steps {
            let t = i as f64 / (steps - 1) as f64;
            let seg = Rect::from_min_size(
                pos2(rect.min.x + i as f32 * step_w, rect.min.y),
                vec2(step_w + 0.5, rect.height()),
            );
            ui.painter()
                .rect_filled(seg, 0.0, scale.color_for(lo + t * (hi - lo)));
        }
        ui.label(format_amount(hi));
    });
}
