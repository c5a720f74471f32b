use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke};

use super::RenderState;
use super::markers;
use super::viewport::MapView;
use crate::geometry::LatLon;
use crate::geometry::types::IndexedEdge;
use crate::model::Location;
use crate::normalize::{EndpointSelection, ViewModel};
use crate::theme::Theme;

/// Scroll-to-zoom sensitivity per scroll point.
const ZOOM_SENSITIVITY: f64 = 0.002;
/// Extra pointer slack when hovering a marker.
const HOVER_SLACK: f32 = 4.0;

/// Inputs for one frame of the map.
pub struct MapFrame<'a> {
    pub view: &'a ViewModel,
    pub state: &'a RenderState,
    pub selection: &'a EndpointSelection,
    pub theme: &'a Theme,
}

/// Draw the map into all available space and handle pan/zoom.
///
/// Returns the id of the hovered location, if any.
pub fn draw(ui: &mut egui::Ui, camera: &mut MapView, frame: MapFrame<'_>) -> Option<String> {
    let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());

    if response.dragged() {
        camera.pan(response.drag_delta());
    }
    if response.hovered() {
        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll != 0.0 {
            let anchor = response.hover_pos().unwrap_or(rect.center());
            camera.zoom(rect, anchor, (scroll as f64 * ZOOM_SENSITIVITY).exp());
        }
    }
    camera.prepare(rect);

    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, frame.theme.background);

    let project = |p: LatLon| camera.project(rect, p);
    let theme = frame.theme;

    // Graph connections underneath everything else.
    for (_, edge) in frame.state.edge_index.iter() {
        let points: Vec<Pos2> = edge.positions.iter().copied().map(&project).collect();
        painter.add(egui::Shape::line(points, connection_stroke(edge, theme)));
    }

    for segment in &frame.state.baseline {
        let points: Vec<Pos2> = segment.positions.iter().copied().map(&project).collect();
        draw_dashed_polyline(&painter, &points, theme.baseline_width, theme.baseline);
    }

    let route_stroke = Stroke::new(theme.route_width, theme.route);
    for segment in &frame.state.optimized {
        let points: Vec<Pos2> = segment.positions.iter().copied().map(&project).collect();
        painter.add(egui::Shape::line(points, route_stroke));
    }

    let style = markers::style();
    let pointer = response.hover_pos();
    let mut hovered: Option<(&Location, Pos2)> = None;

    for location in &frame.view.locations {
        let pos = project(LatLon::new(location.y, location.x));
        let is_start = frame.selection.from.as_deref() == Some(location.id.as_str());
        let is_end = frame.selection.to.as_deref() == Some(location.id.as_str());
        let radius = if is_start || is_end {
            style.endpoint_radius
        } else {
            style.radius
        };

        let fill = match (location.fuel_price, frame.state.price_range) {
            (Some(price), Some(range)) => range.color_for(price),
            _ => style.unpriced_color,
        };
        painter.circle_filled(pos, radius, fill);

        let outline = if is_start {
            Some(style.start_color)
        } else if is_end {
            Some(style.end_color)
        } else if frame.state.is_on_path(&location.id) {
            Some(theme.route)
        } else {
            None
        };
        if let Some(color) = outline {
            painter.circle_stroke(pos, radius, Stroke::new(style.outline_width, color));
        }

        painter.text(
            pos + egui::vec2(radius + 4.0, 0.0),
            Align2::LEFT_CENTER,
            &location.id,
            FontId::proportional(style.label_size),
            theme.foreground,
        );

        if let Some(p) = pointer {
            if p.distance(pos) <= radius + HOVER_SLACK {
                hovered = Some((location, pos));
            }
        }
    }

    if let Some((location, pos)) = hovered {
        draw_popup(&painter, rect, pos, &popup_text(location, frame.state), theme);
    }

    hovered.map(|(l, _)| l.id.clone())
}

/// Connections without road geometry are drawn faded.
fn connection_stroke(edge: &IndexedEdge, theme: &Theme) -> Stroke {
    let color = if edge.has_geometry {
        theme.connection
    } else {
        Theme::with_opacity(theme.connection, 0.5)
    };
    Stroke::new(theme.connection_width, color)
}

fn popup_text(location: &Location, state: &RenderState) -> String {
    let price = match location.fuel_price {
        Some(p) => format!("${p:.2}/gal"),
        None => "no price".to_string(),
    };
    let membership = if state.is_on_path(&location.id) {
        "\non optimized route"
    } else {
        ""
    };
    format!("{}\nFuel: {price}{membership}", location.id)
}

fn draw_popup(painter: &egui::Painter, clip: Rect, anchor: Pos2, text: &str, theme: &Theme) {
    let galley = painter.layout_no_wrap(
        text.to_string(),
        FontId::proportional(13.0),
        theme.foreground,
    );
    let padding = 8.0;
    let size = galley.rect.size() + egui::vec2(padding * 2.0, padding * 2.0);
    let mut min = anchor + egui::vec2(12.0, -size.y - 12.0);
    min.x = min.x.min(clip.right() - size.x);
    min.y = min.y.max(clip.top());
    let popup = Rect::from_min_size(min, size);

    painter.rect_filled(popup, 6.0, Theme::with_opacity(theme.panel_background, 0.95));
    painter.galley(min + egui::vec2(padding, padding), galley, theme.foreground);
}

fn polyline_length(points: &[Pos2]) -> f32 {
    points.windows(2).map(|w| (w[1] - w[0]).length()).sum()
}

/// Find the point at a given distance along a polyline.
fn polyline_point_at_distance(points: &[Pos2], distance: f32) -> Pos2 {
    let mut remaining = distance;
    for w in points.windows(2) {
        let seg_len = (w[1] - w[0]).length();
        if remaining <= seg_len {
            let t = remaining / seg_len.max(0.001);
            return w[0] + (w[1] - w[0]) * t;
        }
        remaining -= seg_len;
    }
    *points.last().unwrap_or(&Pos2::ZERO)
}

/// Draw a dashed polyline with dashes continuing across vertices.
fn draw_dashed_polyline(painter: &egui::Painter, points: &[Pos2], width: f32, color: Color32) {
    let dash_len = 10.0;
    let gap_len = 6.0;
    let total_len = polyline_length(points);
    let stroke = Stroke::new(width, color);

    let mut d = 0.0;
    let mut drawing = true;
    while d < total_len {
        if drawing {
            let end = (d + dash_len).min(total_len);
            painter.line_segment(
                [
                    polyline_point_at_distance(points, d),
                    polyline_point_at_distance(points, end),
                ],
                stroke,
            );
            d += dash_len;
        } else {
            d += gap_len;
        }
        drawing = !drawing;
    }
}
