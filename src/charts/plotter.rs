//! Chart Plotter Module
//! Draws chart specs as interactive plots using egui_plot.

use crate::charts::{AxisValues, ChartKind, ChartSeries, ChartSpec, PieSlice};
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};
use std::collections::HashMap;
use std::f64::consts::TAU;

/// Series colour for single-series charts
pub const SERIES_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(231, 76, 60),  // Red
    Color32::from_rgb(46, 204, 113), // Green
    Color32::from_rgb(155, 89, 182), // Purple
    Color32::from_rgb(243, 156, 18), // Orange
    Color32::from_rgb(26, 188, 156), // Teal
    Color32::from_rgb(233, 30, 99),  // Pink
    Color32::from_rgb(0, 188, 212),  // Cyan
    Color32::from_rgb(255, 87, 34),  // Deep Orange
    Color32::from_rgb(121, 85, 72),  // Brown
    Color32::from_rgb(96, 125, 139), // Blue Grey
];

/// Points per full turn when approximating pie arcs.
const ARC_SEGMENTS: f64 = 120.0;

/// Plot positions for x values plus tick labels for categorical axes.
#[derive(Debug, Clone, PartialEq)]
pub struct XLayout {
    pub positions: Vec<f64>,
    pub labels: Vec<String>,
}

/// Renders chart specs with egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Map x values to plot positions.
    ///
    /// Numbers are used as-is; each distinct category gets the next integer
    /// slot in order of first appearance.
    pub fn x_layout(x: &AxisValues) -> XLayout {
        match x {
            AxisValues::Numeric(values) => XLayout {
                positions: values.clone(),
                labels: Vec::new(),
            },
            AxisValues::Categorical(values) => {
                let mut slots: HashMap<&str, usize> = HashMap::new();
                let mut labels = Vec::new();
                let positions = values
                    .iter()
                    .map(|v| {
                        let slot = *slots.entry(v.as_str()).or_insert_with(|| {
                            labels.push(v.clone());
                            labels.len() - 1
                        });
                        slot as f64
                    })
                    .collect();
                XLayout { positions, labels }
            }
        }
    }

    /// Bar width: 80% of the smallest gap between distinct positions.
    pub fn bar_width(positions: &[f64]) -> f64 {
        let mut sorted = positions.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        sorted.dedup();

        let gap = sorted
            .windows(2)
            .map(|w| w[1] - w[0])
            .fold(f64::INFINITY, f64::min);
        if gap.is_finite() {
            gap * 0.8
        } else {
            0.8
        }
    }

    /// Outline of each pie slice on the unit circle, starting at 12 o'clock
    /// and running clockwise.
    pub fn pie_wedges(slices: &[PieSlice]) -> Vec<Vec<[f64; 2]>> {
        let total: f64 = slices.iter().map(|s| s.value).sum();
        if total <= 0.0 {
            return Vec::new();
        }

        let mut start = 0.0;
        slices
            .iter()
            .map(|slice| {
                let sweep = slice.value / total * TAU;
                let steps = ((sweep / TAU) * ARC_SEGMENTS).ceil().max(1.0) as usize;
                let mut outline = vec![[0.0, 0.0]];
                outline.extend((0..=steps).map(|i| {
                    let angle = start + sweep * i as f64 / steps as f64;
                    [angle.sin(), angle.cos()]
                }));
                start += sweep;
                outline
            })
            .collect()
    }

    pub fn get_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Draw a chart spec
    pub fn draw(ui: &mut egui::Ui, spec: &ChartSpec, height: f32) {
        ui.label(RichText::new(&spec.title).size(16.0).strong());
        ui.add_space(5.0);

        match &spec.series {
            ChartSeries::Cartesian { x, y } => Self::draw_cartesian(ui, spec, x, y, height),
            ChartSeries::Pie(slices) => Self::draw_pie(ui, spec, slices, height),
        }
    }

    fn draw_cartesian(ui: &mut egui::Ui, spec: &ChartSpec, x: &AxisValues, y: &[f64], height: f32) {
        if y.is_empty() {
            ui.label(RichText::new("No rows to plot").color(Color32::GRAY));
            return;
        }

        let layout = Self::x_layout(x);
        let x_labels = layout.labels.clone();
        let categorical = !x_labels.is_empty();

        let mut plot = Plot::new(format!("chart_{}_{}_{}", spec.title, spec.x_col, spec.y_col))
            .height(height)
            .legend(Legend::default())
            .x_axis_label(spec.x_col.clone())
            .y_axis_label(spec.y_col.clone());
        if categorical {
            plot = plot.x_axis_formatter(move |mark, _range| {
                let value = mark.value;
                let idx = value.round();
                if (value - idx).abs() > 1e-6 || idx < 0.0 {
                    return String::new();
                }
                x_labels.get(idx as usize).cloned().unwrap_or_default()
            });
        }

        let points: Vec<[f64; 2]> = layout
            .positions
            .iter()
            .zip(y)
            .map(|(&x, &y)| [x, y])
            .collect();
        let name = spec.y_col.clone();

        plot.show(ui, |plot_ui| match spec.kind {
            ChartKind::Bar => {
                let width = Self::bar_width(&layout.positions);
                let bars: Vec<Bar> = points
                    .iter()
                    .map(|&[x, y]| Bar::new(x, y).width(width).fill(SERIES_COLOR))
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).color(SERIES_COLOR).name(&name));
            }
            ChartKind::Scatter => {
                plot_ui.points(
                    Points::new(PlotPoints::from(points.clone()))
                        .radius(4.0)
                        .color(SERIES_COLOR)
                        .name(&name),
                );
            }
            ChartKind::Line => {
                plot_ui.line(
                    Line::new(PlotPoints::from(points.clone()))
                        .color(SERIES_COLOR)
                        .width(2.0)
                        .name(&name),
                );
            }
            // Pie specs always carry `ChartSeries::Pie`.
            ChartKind::Pie => {}
        });
    }

    fn draw_pie(ui: &mut egui::Ui, spec: &ChartSpec, slices: &[PieSlice], height: f32) {
        let total: f64 = slices.iter().map(|s| s.value).sum();
        if total <= 0.0 {
            ui.label(RichText::new("No positive values to plot").color(Color32::GRAY));
            return;
        }

        let wedges = Self::pie_wedges(slices);

        Plot::new(format!("pie_{}_{}", spec.x_col, spec.y_col))
            .height(height)
            .data_aspect(1.0)
            .legend(Legend::default())
            .show_axes(false)
            .show_grid(false)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .show_x(false)
            .show_y(false)
            .show(ui, |plot_ui| {
                for (i, (slice, outline)) in slices.iter().zip(wedges).enumerate() {
                    let color = Self::get_color(i);
                    let mid = outline[outline.len() / 2];

                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(outline))
                            .fill_color(color.gamma_multiply(0.85))
                            .stroke(egui::Stroke::new(1.0, Color32::WHITE))
                            .name(&slice.name),
                    );

                    let share = slice.value / total * 100.0;
                    if share >= 3.0 {
                        plot_ui.text(Text::new(
                            PlotPoint::new(mid[0] * 0.65, mid[1] * 0.65),
                            RichText::new(format!("{:.1}%", share)).color(Color32::WHITE).strong(),
                        ));
                    }
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slice(name: &str, value: f64) -> PieSlice {
        PieSlice {
            name: name.to_string(),
            value,
        }
    }

    #[test]
    fn categories_share_slots() {
        let layout = ChartPlotter::x_layout(&AxisValues::Categorical(vec![
            "b".into(),
            "a".into(),
            "b".into(),
        ]));
        assert_eq!(layout.positions, vec![0.0, 1.0, 0.0]);
        assert_eq!(layout.labels, vec!["b", "a"]);
    }

    #[test]
    fn numeric_x_is_used_directly() {
        let layout = ChartPlotter::x_layout(&AxisValues::Numeric(vec![2.5, -1.0]));
        assert_eq!(layout.positions, vec![2.5, -1.0]);
        assert!(layout.labels.is_empty());
    }

    #[test]
    fn bar_width_follows_smallest_gap() {
        assert!((ChartPlotter::bar_width(&[0.0, 0.5, 2.0]) - 0.4).abs() < 1e-12);
        assert!((ChartPlotter::bar_width(&[0.0, 10.0, 10.0]) - 8.0).abs() < 1e-12);
        assert!((ChartPlotter::bar_width(&[3.0]) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn wedges_cover_full_circle() {
        let wedges = ChartPlotter::pie_wedges(&[slice("a", 1.0), slice("b", 3.0)]);
        assert_eq!(wedges.len(), 2);

        // first wedge starts at 12 o'clock, second ends there
        let first_edge = wedges[0][1];
        assert!((first_edge[0]).abs() < 1e-12 && (first_edge[1] - 1.0).abs() < 1e-12);
        let last = *wedges[1].last().unwrap();
        assert!(last[0].abs() < 1e-9 && (last[1] - 1.0).abs() < 1e-9);

        // a quarter of the circle ends at 3 o'clock
        let quarter_end = *wedges[0].last().unwrap();
        assert!((quarter_end[0] - 1.0).abs() < 1e-9 && quarter_end[1].abs() < 1e-9);
    }

    #[test]
    fn zero_total_has_no_wedges() {
        assert!(ChartPlotter::pie_wedges(&[slice("a", 0.0)]).is_empty());
    }
}
