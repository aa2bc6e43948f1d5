//! Timeline row rendering logic
//!
//! Draws one lane of task bars, and the dependency arrows between bars once
//! all lanes are laid out.

use std::collections::HashMap;

use eframe::egui;
use tdg::{Item, ItemId, TimeWindow, TimelineRow, Timestamp};

use crate::domain::viewport_operations;
use crate::presentation::color_mapping::{item_color, DEPENDENCY_COLOR};
use crate::utils::{format_duration, format_timestamp};

/// Height of one lane in pixels.
pub const ROW_HEIGHT: f32 = 24.0;

/// Width of the label column on the left of each lane.
pub const LABEL_WIDTH: f32 = 140.0;

/// Screen anchors of a drawn bar, used for dependency arrows.
#[derive(Debug, Clone, Copy)]
pub struct BarAnchors {
    pub left: egui::Pos2,
    pub right: egui::Pos2,
}

/// Renders a single lane: its label and the bars of its items.
///
/// Running items (no end) are drawn up to `now`; items that have not started
/// are not drawn. Anchors of drawn bars are recorded in `anchors`.
pub fn render_timeline_row(
    ui: &mut egui::Ui,
    row: &TimelineRow,
    items: &[Item],
    window: TimeWindow,
    now: Timestamp,
    is_dragging: bool,
    anchors: &mut HashMap<ItemId, BarAnchors>,
) {
    let (row_rect, _) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), ROW_HEIGHT),
        egui::Sense::hover(),
    );

    let label_rect = egui::Rect::from_min_size(row_rect.min, egui::vec2(LABEL_WIDTH, ROW_HEIGHT));
    let bars_rect = egui::Rect::from_min_max(
        egui::pos2(row_rect.left() + LABEL_WIDTH, row_rect.top()),
        row_rect.max,
    );

    ui.painter().text(
        egui::pos2(label_rect.left() + 4.0, label_rect.center().y),
        egui::Align2::LEFT_CENTER,
        &row.label,
        egui::FontId::proportional(12.0),
        ui.visuals().text_color(),
    );

    let painter = ui.painter().with_clip_rect(bars_rect);
    for &index in &row.item_indices {
        let Some(item) = items.get(index) else {
            continue;
        };
        let Some(start) = item.start else {
            continue;
        };
        let end = item.end.unwrap_or(now.max(start));
        if end < window.start || start > window.end {
            continue;
        }

        let x_start = viewport_operations::time_to_x(start, window, bars_rect);
        let x_end = viewport_operations::time_to_x(end, window, bars_rect);
        let bar_rect = egui::Rect::from_min_max(
            egui::pos2(x_start, bars_rect.top() + 3.0),
            egui::pos2(x_end.max(x_start + 2.0), bars_rect.bottom() - 3.0),
        );

        painter.rect_filled(bar_rect, 2.0, item_color(item));
        if bar_rect.width() > 30.0 {
            painter.text(
                egui::pos2(bar_rect.left().max(bars_rect.left()) + 4.0, bar_rect.center().y),
                egui::Align2::LEFT_CENTER,
                &item.content,
                egui::FontId::proportional(11.0),
                egui::Color32::WHITE,
            );
        }

        anchors.insert(item.id, BarAnchors {
            left: egui::pos2(bar_rect.left(), bar_rect.center().y),
            right: egui::pos2(bar_rect.right(), bar_rect.center().y),
        });

        // Hover sense lets drag gestures pass through to the canvas
        let bar_response = ui.interact(
            bar_rect.intersect(bars_rect),
            ui.id().with(("task_bar", item.id)),
            egui::Sense::hover(),
        );
        if bar_response.hovered() && !is_dragging {
            bar_response.on_hover_ui(|ui| {
                ui.label(item.content.as_str());
                if let Some(group) = &item.group {
                    ui.label(format!("Group: {}", group));
                }
                ui.label(format!("Start: {}", format_timestamp(start, true)));
                match item.end {
                    Some(end) => {
                        ui.label(format!("End: {}", format_timestamp(end, true)));
                        ui.label(format!("Duration: {}", format_duration(end - start)));
                    }
                    None => {
                        ui.label("Running");
                    }
                }
            });
        }
    }
}

/// Draws an arrow from each dependency's bar end to the dependent bar start.
pub fn render_dependencies(
    painter: &egui::Painter,
    items: &[Item],
    anchors: &HashMap<ItemId, BarAnchors>,
) {
    let stroke = egui::Stroke::new(1.0, DEPENDENCY_COLOR);
    for item in items {
        let Some(target) = anchors.get(&item.id) else {
            continue;
        };
        for dependency in &item.dependencies {
            let Some(source) = anchors.get(dependency) else {
                continue;
            };
            let from = source.right;
            let to = target.left;
            let elbow_x = from.x + ((to.x - from.x) / 2.0).max(6.0);

            painter.line_segment([from, egui::pos2(elbow_x, from.y)], stroke);
            painter.line_segment([egui::pos2(elbow_x, from.y), egui::pos2(elbow_x, to.y)], stroke);
            painter.line_segment([egui::pos2(elbow_x, to.y), to], stroke);
            painter.line_segment([to, egui::pos2(to.x - 4.0, to.y - 3.0)], stroke);
            painter.line_segment([to, egui::pos2(to.x - 4.0, to.y + 3.0)], stroke);
        }
    }
}
