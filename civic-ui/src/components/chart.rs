//! Chart Components
//!
//! Canvas rendering for the status doughnut and the weekly bar chart. The
//! geometry is computed by plain functions so it can be tested natively.

use leptos::*;
use std::f64::consts::PI;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use civic_reporter::render::{ChartDisplay, ChartSeries};

const BACKGROUND: &str = "#ffffff";
const GRID: &str = "#e2e8f0";
const LABEL: &str = "#64748b";

/// One doughnut segment, angles in radians
#[derive(Debug, Clone, PartialEq)]
pub struct ArcSegment {
    pub start: f64,
    pub end: f64,
    pub color: String,
}

/// Segments for a doughnut, clockwise from 12 o'clock
pub fn doughnut_segments(series: &ChartSeries) -> Vec<ArcSegment> {
    let total = series.total();
    if total == 0 {
        return Vec::new();
    }

    let mut start = -PI / 2.0;
    series
        .values
        .iter()
        .zip(&series.colors)
        .filter(|(&value, _)| value > 0)
        .map(|(&value, color)| {
            let end = start + value as f64 / total as f64 * 2.0 * PI;
            let segment = ArcSegment {
                start,
                end,
                color: color.clone(),
            };
            start = end;
            segment
        })
        .collect()
}

/// Plot area inside the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn for_canvas(width: f64, height: f64) -> Self {
        // Margins
        let margin_left = 40.0;
        let margin_right = 16.0;
        let margin_top = 16.0;
        let margin_bottom = 32.0;

        Self {
            left: margin_left,
            top: margin_top,
            width: width - margin_left - margin_right,
            height: height - margin_top - margin_bottom,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label: String,
    pub value: u32,
}

/// Y-axis maximum: the largest value, at least 1 so an empty week still has a scale
pub fn axis_max(series: &ChartSeries) -> u32 {
    series.max().max(1)
}

/// Bars of equal width with 20% gaps, scaled to [`axis_max`]
pub fn bar_layout(series: &ChartSeries, area: PlotArea) -> Vec<Bar> {
    let count = series.values.len();
    if count == 0 {
        return Vec::new();
    }

    let slot = area.width / count as f64;
    let width = slot * 0.8;
    let max = axis_max(series) as f64;

    series
        .values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let height = value as f64 / max * area.height;
            Bar {
                x: area.left + i as f64 * slot + (slot - width) / 2.0,
                y: area.bottom() - height,
                width,
                height,
                label: series.labels.get(i).cloned().unwrap_or_default(),
                value,
            }
        })
        .collect()
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

/// Draw the status doughnut on canvas
fn draw_doughnut(canvas: &HtmlCanvasElement, series: &ChartSeries) {
    let Some(ctx) = context_2d(canvas) else {
        return;
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    ctx.set_fill_style(&BACKGROUND.into());
    ctx.fill_rect(0.0, 0.0, width, height);

    let (cx, cy) = (width / 2.0, height / 2.0);
    let outer = width.min(height) / 2.0 - 8.0;
    let inner = outer * 0.6;

    for segment in doughnut_segments(series) {
        ctx.begin_path();
        let _ = ctx.arc(cx, cy, outer, segment.start, segment.end);
        let _ = ctx.arc_with_anticlockwise(cx, cy, inner, segment.end, segment.start, true);
        ctx.close_path();
        ctx.set_fill_style(&segment.color.as_str().into());
        ctx.fill();
    }

    // Total in the hole
    ctx.set_fill_style(&LABEL.into());
    ctx.set_font("bold 20px sans-serif");
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    let _ = ctx.fill_text(&series.total().to_string(), cx, cy);
}

/// Draw the weekly bar chart on canvas
fn draw_bars(canvas: &HtmlCanvasElement, series: &ChartSeries) {
    let Some(ctx) = context_2d(canvas) else {
        return;
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let area = PlotArea::for_canvas(width, height);
    let max = axis_max(series);

    ctx.set_fill_style(&BACKGROUND.into());
    ctx.fill_rect(0.0, 0.0, width, height);

    // Horizontal grid lines with integer labels
    ctx.set_stroke_style(&GRID.into());
    ctx.set_line_width(1.0);
    ctx.set_font("12px sans-serif");
    ctx.set_text_align("right");
    ctx.set_text_baseline("middle");
    let steps = max.min(5);
    for i in 0..=steps {
        let y = area.bottom() - i as f64 / steps as f64 * area.height;
        ctx.begin_path();
        ctx.move_to(area.left, y);
        ctx.line_to(area.left + area.width, y);
        ctx.stroke();

        let value = (max as f64 * i as f64 / steps as f64).round();
        ctx.set_fill_style(&LABEL.into());
        let _ = ctx.fill_text(&format!("{}", value), area.left - 8.0, y);
    }

    ctx.set_text_align("center");
    ctx.set_text_baseline("top");
    for (i, bar) in bar_layout(series, area).iter().enumerate() {
        let color = series.colors.get(i).map(String::as_str).unwrap_or(GRID);
        ctx.set_fill_style(&color.into());
        ctx.fill_rect(bar.x, bar.y, bar.width, bar.height);

        ctx.set_fill_style(&LABEL.into());
        let _ = ctx.fill_text(&bar.label, bar.x + bar.width / 2.0, area.bottom() + 8.0);
    }
}

/// Active vs. Resolved doughnut, or the empty placeholder
#[component]
pub fn StatusChart(display: RwSignal<ChartDisplay>) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    create_effect(move |_| {
        if let (ChartDisplay::Series(series), Some(canvas)) = (display.get(), canvas_ref.get()) {
            draw_doughnut(&canvas, &series);
        }
    });

    let has_data = move || matches!(display.get(), ChartDisplay::Series(_));

    view! {
        <div class="relative">
            <canvas
                node_ref=canvas_ref
                width="280"
                height="280"
                class="mx-auto"
                class:hidden=move || !has_data()
            />
            <Show when=move || !has_data()>
                <div id="chart-empty" class="flex flex-col items-center justify-center h-64 text-slate-400">
                    <span class="text-4xl mb-2">"📊"</span>
                    <span>"No reports yet"</span>
                </div>
            </Show>
            <ChartLegend display=display />
        </div>
    }
}

/// Legend with tooltip text for each segment
#[component]
fn ChartLegend(display: RwSignal<ChartDisplay>) -> impl IntoView {
    view! {
        <div class="flex justify-center flex-wrap gap-4 mt-4">
            {move || match display.get() {
                ChartDisplay::Series(series) => (0..series.values.len())
                    .filter_map(|i| {
                        let color = series.colors.get(i)?.clone();
                        let text = series.tooltip(i)?;
                        Some(view! {
                            <div class="flex items-center space-x-2">
                                <div
                                    class="w-3 h-3 rounded-full"
                                    style=format!("background-color: {}", color)
                                />
                                <span class="text-sm text-slate-600">{text}</span>
                            </div>
                        })
                    })
                    .collect::<Vec<_>>(),
                ChartDisplay::Placeholder => Vec::new(),
            }}
        </div>
    }
}

/// Reports per weekday
#[component]
pub fn WeeklyChart(display: RwSignal<ChartDisplay>) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    create_effect(move |_| {
        if let (ChartDisplay::Series(series), Some(canvas)) = (display.get(), canvas_ref.get()) {
            draw_bars(&canvas, &series);
        }
    });

    view! {
        <canvas
            node_ref=canvas_ref
            width="560"
            height="280"
            class="w-full h-64"
        />
    }
}
