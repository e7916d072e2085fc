use std::f32::consts::{FRAC_PI_2, PI, TAU};

use egui::{pos2, Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Vec2, Widget};

use crate::gpa::Contribution;

const PALETTE: [Color32; 8] = [
    Color32::from_rgb(31, 119, 180),
    Color32::from_rgb(255, 127, 14),
    Color32::from_rgb(44, 160, 44),
    Color32::from_rgb(214, 39, 40),
    Color32::from_rgb(148, 103, 189),
    Color32::from_rgb(140, 86, 75),
    Color32::from_rgb(227, 119, 194),
    Color32::from_rgb(127, 127, 127),
];

// Longest arc drawn as a single polygon; keeps every piece convex.
const MAX_PIECE: f32 = FRAC_PI_2;
const ARC_STEP: f32 = PI / 48.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub start: f32,
    pub sweep: f32,
    pub percent: f32,
}

/// Splits the circle between the contributions, starting at 12 o'clock and
/// going counter-clockwise. Returns nothing when there is nothing to share.
pub fn slices(contributions: &[Contribution]) -> Vec<Slice> {
    let total: f64 = contributions.iter().map(|c| c.points.max(0.0)).sum();
    if total <= 0.0 {
        return vec![];
    }

    let mut start = FRAC_PI_2;
    contributions
        .iter()
        .filter(|c| c.points > 0.0)
        .map(|c| {
            let share = (c.points / total) as f32;
            let slice = Slice {
                label: c.subject.clone(),
                start,
                sweep: share * TAU,
                percent: share * 100.0,
            };
            start += slice.sweep;
            slice
        })
        .collect()
}

pub struct PieChart {
    slices: Vec<Slice>,
}

impl PieChart {
    pub fn new(contributions: &[Contribution]) -> Self {
        PieChart {
            slices: slices(contributions),
        }
    }
}

// Angles grow counter-clockwise while screen y grows downwards.
fn on_circle(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    pos2(center.x + radius * angle.cos(), center.y - radius * angle.sin())
}

fn paint_slice(painter: &egui::Painter, center: Pos2, radius: f32, slice: &Slice, color: Color32) {
    let mut from = slice.start;
    let end = slice.start + slice.sweep;

    while from < end {
        let to = (from + MAX_PIECE).min(end);
        let steps = ((to - from) / ARC_STEP).ceil().max(1.0) as usize;

        let mut points = Vec::with_capacity(steps + 2);
        points.push(center);
        for i in 0..=steps {
            let angle = from + (to - from) * i as f32 / steps as f32;
            points.push(on_circle(center, radius, angle));
        }
        painter.add(Shape::convex_polygon(points, color, Stroke::new(0.0, color)));

        from = to;
    }
}

impl Widget for PieChart {
    fn ui(self, ui: &mut egui::Ui) -> egui::Response {
        let desired_size = Vec2::new(320.0, 320.0);

        let (rect, response) = ui.allocate_exact_size(desired_size, Sense::hover());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            let center = rect.center();
            let radius = 0.4 * rect.height();

            if self.slices.is_empty() {
                painter.text(
                    center,
                    Align2::CENTER_CENTER,
                    "No Data Yet",
                    FontId::proportional(16.0),
                    Color32::GRAY,
                );
                return response;
            }

            painter.text(
                pos2(center.x, rect.top()),
                Align2::CENTER_TOP,
                "Subject Contribution to GPA",
                FontId::proportional(14.0),
                ui.visuals().text_color(),
            );

            for (i, slice) in self.slices.iter().enumerate() {
                paint_slice(painter, center, radius, slice, PALETTE[i % PALETTE.len()]);
            }

            for slice in self.slices.iter() {
                let mid = slice.start + slice.sweep / 2.0;
                painter.text(
                    on_circle(center, radius * 0.6, mid),
                    Align2::CENTER_CENTER,
                    format!("{:.1}%", slice.percent),
                    FontId::proportional(12.0),
                    Color32::WHITE,
                );
                let align = if mid.cos() >= 0.0 {
                    Align2::LEFT_CENTER
                } else {
                    Align2::RIGHT_CENTER
                };
                painter.text(
                    on_circle(center, radius * 1.08, mid),
                    align,
                    &slice.label,
                    FontId::proportional(12.0),
                    ui.visuals().text_color(),
                );
            }
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contribution(subject: &str, points: f64) -> Contribution {
        Contribution {
            subject: subject.into(),
            points,
        }
    }

    #[test]
    fn slices_share_the_circle() {
        let out = slices(&[contribution("Math", 12.0), contribution("History", 14.0)]);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].start, FRAC_PI_2);
        assert!((out[0].percent - 46.153_85).abs() < 1e-3);
        assert!((out[1].start - (out[0].start + out[0].sweep)).abs() < 1e-6);
        let swept: f32 = out.iter().map(|s| s.sweep).sum();
        assert!((swept - TAU).abs() < 1e-5);
    }

    #[test]
    fn nothing_to_draw() {
        assert!(slices(&[]).is_empty());
        assert!(slices(&[contribution("Math", 0.0)]).is_empty());
    }

    #[test]
    fn zero_contributions_get_no_slice() {
        let out = slices(&[contribution("Math", 0.0), contribution("Art", 6.0)]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].label, "Art");
        assert_eq!(out[0].percent, 100.0);
    }
}
