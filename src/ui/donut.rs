use std::f64::consts::TAU;

use eframe::egui::{self, Color32, RichText, Stroke, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Legend, Plot, PlotPoints, Polygon};

use crate::color::{highlight, slice_color};
use crate::data::model::AggregateEntry;

/// Ring radii, relative to the plot radius.
const INNER_RADIUS: f64 = 0.5;
const OUTER_RADIUS: f64 = 0.9;

/// Quads per full turn; each slice gets at least one.
const RESOLUTION: usize = 180;

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Angular extent of one slice, in radians clockwise from 12 o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slice {
    pub start: f64,
    pub end: f64,
}

/// Lay slices out in entry order, proportional to their counts.
pub fn slices(entries: &[AggregateEntry]) -> Vec<Slice> {
    let total: usize = entries.iter().map(|e| e.count).sum();
    if total == 0 {
        return Vec::new();
    }
    let mut start = 0.0;
    entries
        .iter()
        .map(|e| {
            let end = start + e.count as f64 / total as f64 * TAU;
            let slice = Slice { start, end };
            start = end;
            slice
        })
        .collect()
}

fn point(angle: f64, radius: f64) -> [f64; 2] {
    [radius * angle.sin(), radius * angle.cos()]
}

/// Split a ring segment into convex quads, which is what the plot fill
/// can draw.
fn quads(slice: Slice) -> Vec<Vec<[f64; 2]>> {
    let steps = (((slice.end - slice.start) / TAU * RESOLUTION as f64).ceil() as usize).max(1);
    let step = (slice.end - slice.start) / steps as f64;
    (0..steps)
        .map(|i| {
            let a0 = slice.start + step * i as f64;
            let a1 = a0 + step;
            vec![
                point(a0, INNER_RADIUS),
                point(a0, OUTER_RADIUS),
                point(a1, OUTER_RADIUS),
                point(a1, INNER_RADIUS),
            ]
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Donut chart with a legend, followed by a count table.
pub fn donut_chart(ui: &mut Ui, id: &str, entries: &[AggregateEntry]) {
    if entries.is_empty() {
        ui.label(RichText::new("No matching records.").italics());
        return;
    }

    let size = ui.available_width().min(360.0);
    Plot::new(id)
        .width(size)
        .height(size)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .allow_double_click_reset(false)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            let hovered = plot_ui.pointer_coordinate().and_then(|p| {
                let r = p.x.hypot(p.y);
                if !(INNER_RADIUS..=OUTER_RADIUS).contains(&r) {
                    return None;
                }
                let angle = p.x.atan2(p.y).rem_euclid(TAU);
                slices(entries)
                    .iter()
                    .position(|s| angle >= s.start && angle < s.end)
            });

            for (i, (entry, slice)) in entries.iter().zip(slices(entries)).enumerate() {
                let base = slice_color(i);
                let color = if hovered == Some(i) { highlight(base) } else { base };
                let name = entry.legend_label();
                for quad in quads(slice) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::new(quad))
                            .name(&name)
                            .fill_color(color)
                            .stroke(Stroke::new(0.5, color)),
                    );
                }
            }
        });

    entry_table(ui, id, entries);
}

fn entry_table(ui: &mut Ui, id: &str, entries: &[AggregateEntry]) {
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::exact(14.0))
            .column(Column::remainder())
            .column(Column::auto())
            .column(Column::auto())
            .header(18.0, |mut header| {
                header.col(|_| {});
                header.col(|ui| {
                    ui.strong("Group");
                });
                header.col(|ui| {
                    ui.strong("Count");
                });
                header.col(|ui| {
                    ui.strong("%");
                });
            })
            .body(|mut body| {
                for (i, entry) in entries.iter().enumerate() {
                    body.row(18.0, |mut row| {
                        row.col(|ui| {
                            let (rect, _) = ui
                                .allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                            ui.painter().rect_filled(rect, 2.0, slice_color(i));
                        });
                        row.col(|ui| {
                            let label = if entry.label.is_empty() {
                                "Unknown"
                            } else {
                                entry.label.as_str()
                            };
                            ui.label(label);
                        });
                        row.col(|ui| {
                            ui.label(entry.count.to_string());
                        });
                        row.col(|ui| {
                            ui.label(RichText::new(&entry.percentage).color(Color32::GRAY));
                        });
                    });
                }
            });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(count: usize) -> AggregateEntry {
        AggregateEntry {
            label: format!("{count}"),
            count,
            percentage: String::new(),
        }
    }

    #[test]
    fn test_slices_cover_full_turn_in_order() {
        let out = slices(&[entry(1), entry(1), entry(2)]);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].start, 0.0);
        assert!((out[0].end - TAU / 4.0).abs() < 1e-12);
        assert!((out[1].end - TAU / 2.0).abs() < 1e-12);
        assert!((out[2].end - TAU).abs() < 1e-12);
        assert_eq!(out[1].start, out[0].end);
    }

    #[test]
    fn test_slices_empty_when_no_counts() {
        assert!(slices(&[]).is_empty());
        assert!(slices(&[entry(0)]).is_empty());
    }

    #[test]
    fn test_quads_stay_on_ring() {
        let slice = Slice { start: 0.0, end: TAU / 3.0 };
        let qs = quads(slice);
        assert!((RESOLUTION / 3..=RESOLUTION / 3 + 1).contains(&qs.len()));
        for quad in &qs {
            for [x, y] in quad {
                let r = x.hypot(*y);
                assert!(
                    (r - INNER_RADIUS).abs() < 1e-9 || (r - OUTER_RADIUS).abs() < 1e-9,
                    "r = {r}"
                );
            }
        }
        let tiny = quads(Slice { start: 0.0, end: 1e-6 });
        assert_eq!(tiny.len(), 1);
    }
}
