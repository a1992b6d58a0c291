use dioxus::prelude::*;

use crate::core::compare::Dataset;
use crate::core::format;

const WIDTH: f64 = 640.0;
const PAD_LEFT: f64 = 56.0;
const PAD_RIGHT: f64 = 12.0;
const PAD_TOP: f64 = 10.0;
const PAD_BOTTOM: f64 = 24.0;

/// How the y axis is labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisKind {
    Experience,
    Rate,
    Depth,
}

impl AxisKind {
    fn label(self, value: f64) -> String {
        match self {
            Self::Experience => format::format_xp(value.max(0.0) as u64),
            Self::Rate => format::format_rate(value),
            Self::Depth => format::format_number(value, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Bounds {
    t_min: i64,
    t_max: i64,
    y_min: f64,
    y_max: f64,
}

impl Bounds {
    fn of(datasets: &[Dataset]) -> Option<Self> {
        let mut points = datasets.iter().flat_map(|set| set.points.iter());
        let first = points.next()?;
        let mut bounds = Bounds {
            t_min: first.t,
            t_max: first.t,
            y_min: first.y,
            y_max: first.y,
        };
        for point in points {
            bounds.t_min = bounds.t_min.min(point.t);
            bounds.t_max = bounds.t_max.max(point.t);
            bounds.y_min = bounds.y_min.min(point.y);
            bounds.y_max = bounds.y_max.max(point.y);
        }
        Some(bounds)
    }

    fn project(&self, t: i64, y: f64, height: f64) -> (f64, f64) {
        let plot_w = WIDTH - PAD_LEFT - PAD_RIGHT;
        let plot_h = height - PAD_TOP - PAD_BOTTOM;
        let t_span = (self.t_max - self.t_min).max(1) as f64;
        let y_span = self.y_max - self.y_min;

        let x = PAD_LEFT + (t - self.t_min) as f64 / t_span * plot_w;
        let y = if y_span > 0.0 {
            PAD_TOP + (1.0 - (y - self.y_min) / y_span) * plot_h
        } else {
            PAD_TOP + plot_h / 2.0
        };
        (x, y)
    }
}

fn polyline_points(set: &Dataset, bounds: &Bounds, height: f64) -> String {
    set.points
        .iter()
        .map(|point| {
            let (x, y) = bounds.project(point.t, point.y, height);
            format!("{x:.1},{y:.1}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Multi-line SVG chart with an optional marker overlay. Every dataset keeps
/// its own timestamps; the x axis spans the union.
#[component]
pub fn LineChart(
    title: String,
    datasets: Vec<Dataset>,
    #[props(default)] markers: Vec<Dataset>,
    axis: AxisKind,
    #[props(default = 220.0)] height: f64,
) -> Element {
    let mut all = datasets.clone();
    all.extend(markers.iter().cloned());

    let Some(bounds) = Bounds::of(&all) else {
        return rsx! {
            figure { class: "ladder-chart ladder-chart--empty",
                figcaption { class: "ladder-chart__title", "{title}" }
                p { class: "ladder-card__placeholder", "Not enough data in this window." }
            }
        };
    };

    let baseline = height - PAD_BOTTOM;
    let y_top = axis.label(bounds.y_max);
    let y_bottom = axis.label(bounds.y_min);
    let t_start = format::format_axis_time(bounds.t_min);
    let t_end = format::format_axis_time(bounds.t_max);
    let view_box = format!("0 0 {WIDTH} {height}");
    let show_legend = datasets.len() > 1 || !markers.is_empty();

    rsx! {
        figure { class: "ladder-chart",
            figcaption { class: "ladder-chart__title", "{title}" }
            svg {
                class: "ladder-chart__plot",
                view_box: "{view_box}",
                preserve_aspect_ratio: "none",
                role: "img",
                "aria-label": "{title}",

                line { class: "ladder-chart__axis", x1: PAD_LEFT, y1: baseline, x2: WIDTH - PAD_RIGHT, y2: baseline }
                line { class: "ladder-chart__axis", x1: PAD_LEFT, y1: PAD_TOP, x2: PAD_LEFT, y2: baseline }
                text { class: "ladder-chart__tick", x: PAD_LEFT - 4.0, y: PAD_TOP + 8.0, text_anchor: "end", "{y_top}" }
                text { class: "ladder-chart__tick", x: PAD_LEFT - 4.0, y: baseline, text_anchor: "end", "{y_bottom}" }
                text { class: "ladder-chart__tick", x: PAD_LEFT, y: height - 6.0, "{t_start}" }
                text { class: "ladder-chart__tick", x: WIDTH - PAD_RIGHT, y: height - 6.0, text_anchor: "end", "{t_end}" }

                for set in datasets.iter() {
                    polyline {
                        key: "{set.label}",
                        class: "ladder-chart__line",
                        fill: "none",
                        stroke: set.color,
                        points: polyline_points(set, &bounds, height),
                    }
                }

                for set in markers.iter() {
                    for point in set.points.iter() {
                        {marker(set, point.t, point.y, &bounds, height)}
                    }
                }
            }

            if show_legend {
                ul { class: "ladder-chart__legend",
                    for set in datasets.iter() {
                        li { key: "{set.label}", class: "ladder-chart__legend-item",
                            span { class: "ladder-chart__legend-swatch", background: set.color }
                            "{set.label}"
                        }
                    }
                    if !markers.is_empty() {
                        li { class: "ladder-chart__legend-item",
                            span { class: "ladder-chart__legend-swatch ladder-chart__legend-swatch--death" }
                            "Deaths"
                        }
                    }
                }
            }
        }
    }
}

fn marker(set: &Dataset, t: i64, y: f64, bounds: &Bounds, height: f64) -> Element {
    let (cx, cy) = bounds.project(t, y, height);
    let tooltip = format!("{}: {}", set.label, format::format_timestamp(t));
    rsx! {
        circle {
            class: "ladder-chart__marker",
            cx: cx,
            cy: cy,
            r: 4.0,
            stroke: set.color,
            title { "{tooltip}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::series::ChartPoint;

    fn set(points: &[(i64, f64)]) -> Dataset {
        Dataset {
            label: "a".into(),
            color: "#000",
            points: points.iter().map(|&(t, y)| ChartPoint { t, y }).collect(),
        }
    }

    #[test]
    fn bounds_span_every_dataset() {
        let bounds = Bounds::of(&[set(&[(10, 5.0), (20, 1.0)]), set(&[(0, 9.0)])]).unwrap();
        assert_eq!((bounds.t_min, bounds.t_max), (0, 20));
        assert_eq!((bounds.y_min, bounds.y_max), (1.0, 9.0));
        assert!(Bounds::of(&[set(&[])]).is_none());
    }

    #[test]
    fn flat_series_sits_mid_plot() {
        let bounds = Bounds::of(&[set(&[(0, 3.0), (60, 3.0)])]).unwrap();
        let (x0, y0) = bounds.project(0, 3.0, 220.0);
        let (x1, y1) = bounds.project(60, 3.0, 220.0);
        assert_eq!(x0, PAD_LEFT);
        assert_eq!(x1, WIDTH - PAD_RIGHT);
        assert_eq!(y0, y1);
        assert_eq!(y0, PAD_TOP + (220.0 - PAD_TOP - PAD_BOTTOM) / 2.0);
    }
}
