//! A [`RenderSink`] that writes SVG markup.

use std::fmt::{Display, Write};

use crate::render::{ElementKind, MarkerSample, RenderSink};
use crate::sample::{Sample, Segment};

// JavaScript-style number text: no "-0".
fn num(v: f64) -> f64 {
    v + 0.0
}

/// Path data through `samples`.
///
/// Moves are written as `H`/`V` when only one coordinate changes, and
/// repeated points are skipped. `close` appends `Z`.
pub fn segment_to_d(samples: &[Sample], close: bool) -> String {
    let mut d = String::new();
    let mut prev: Option<&Sample> = None;

    for sample in samples {
        let (x, y) = (num(sample.x), num(sample.y));
        match prev {
            None => {
                let _ = write!(d, "M{x},{y}");
            }
            Some(p) if x != p.x && y != p.y => {
                let _ = write!(d, "L{x},{y}");
            }
            Some(p) if x != p.x => {
                let _ = write!(d, "H{x}");
            }
            Some(p) if y != p.y => {
                let _ = write!(d, "V{y}");
            }
            Some(_) => {}
        }
        prev = Some(sample);
    }

    if close && !samples.is_empty() {
        d.push('Z');
    }
    d
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}

/// Collects render calls as SVG groups.
#[derive(Debug, Default, Clone)]
pub struct SvgDocument {
    groups: Vec<String>,
    open: Option<String>,
}

impl SvgDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// All finished groups wrapped in `<g class="gradient-path">`.
    pub fn body(&self) -> String {
        let mut out = String::from("<g class=\"gradient-path\">\n");
        for group in &self.groups {
            out.push_str(group);
        }
        out.push_str("</g>\n");
        out
    }

    /// A standalone SVG document of the given size.
    pub fn finish(&self, width: f64, height: f64) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<svg width="{width}" height="{height}" viewBox="0 0 {width} {height}" xmlns="http://www.w3.org/2000/svg">
{}</svg>
"#,
            self.body()
        )
    }

    fn push_element(&mut self, element: String) {
        let group = self.open.get_or_insert_with(String::new);
        group.push_str("    ");
        group.push_str(&element);
        group.push('\n');
    }
}

impl<C: Display> RenderSink<C> for SvgDocument {
    fn begin_group(&mut self, kind: &ElementKind) {
        self.open = Some(format!("  <g class=\"element-{}\">\n", kind.class_name()));
    }

    fn draw_segment(&mut self, kind: &ElementKind, segment: &Segment, color: C) {
        let color = escape_attr(&color.to_string());
        let element = match *kind {
            ElementKind::Stroke { stroke_width } => format!(
                r#"<path class="path-segment" d="{}" fill="none" stroke="{color}" stroke-width="{stroke_width}"/>"#,
                segment_to_d(&segment.samples, false)
            ),
            _ => format!(
                r#"<path class="path-segment" d="{}" fill="{color}"/>"#,
                segment_to_d(&segment.samples, true)
            ),
        };
        self.push_element(element);
    }

    fn draw_marker(&mut self, marker: &MarkerSample, radius: f64, color: C) {
        let color = escape_attr(&color.to_string());
        self.push_element(format!(
            r#"<circle class="circle-sample" cx="{}" cy="{}" r="{radius}" fill="{color}"/>"#,
            num(marker.sample.x),
            num(marker.sample.y)
        ));
    }

    fn end_group(&mut self) {
        if let Some(mut group) = self.open.take() {
            group.push_str("  </g>\n");
            self.groups.push(group);
        }
    }
}
