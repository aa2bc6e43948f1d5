//! Color mapping for timeline bars.
//!
//! Colors are picked deterministically from the item's group (or its label
//! when ungrouped) so a task keeps its color across frames and reloads.

use egui::Color32;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tdg::Item;

const PALETTE: [Color32; 8] = [
    Color32::from_rgb(0x4e, 0x79, 0xa7),
    Color32::from_rgb(0xf2, 0x8e, 0x2b),
    Color32::from_rgb(0x59, 0xa1, 0x4f),
    Color32::from_rgb(0xb0, 0x7a, 0xa1),
    Color32::from_rgb(0x76, 0xb7, 0xb2),
    Color32::from_rgb(0xed, 0xc9, 0x48),
    Color32::from_rgb(0xe1, 0x57, 0x59),
    Color32::from_rgb(0x9c, 0x75, 0x5f),
];

/// Color of the current-time marker.
pub const CURRENT_TIME_COLOR: Color32 = Color32::from_rgb(0xff, 0x45, 0x45);

/// Color of the hover cursor line.
pub const CURSOR_COLOR: Color32 = Color32::from_rgb(0xed, 0xc9, 0x48);

/// Color of dependency arrows.
pub const DEPENDENCY_COLOR: Color32 = Color32::from_gray(150);

/// Returns the palette color for `key`.
pub fn color_for_key(key: &str) -> Color32 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    PALETTE[(hasher.finish() % PALETTE.len() as u64) as usize]
}

/// Returns the bar color for an item, dimmed while it is still running.
pub fn item_color(item: &Item) -> Color32 {
    let key = item.group.as_deref().unwrap_or(&item.content);
    let color = color_for_key(key);
    if item.end.is_none() {
        color.gamma_multiply(0.6)
    } else {
        color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_members_share_color() {
        let a = Item::new(1, "compile", Some(0.0), Some(1.0)).with_group("build");
        let b = Item::new(2, "link", Some(0.0), Some(1.0)).with_group("build");
        assert_eq!(item_color(&a), item_color(&b));
    }

    #[test]
    fn test_running_item_is_dimmed() {
        let done = Item::new(1, "x", Some(0.0), Some(1.0));
        let running = Item::new(1, "x", Some(0.0), None);
        assert_ne!(item_color(&done), item_color(&running));
    }
}
