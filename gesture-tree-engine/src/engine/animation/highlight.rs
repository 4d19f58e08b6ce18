use bevy::prelude::*;
use constants::colours;

use crate::engine::interaction::selection::SceneMode;
use crate::engine::scene::photos::PhotoPanel;
use crate::engine::scene::spawn::PanelFrame;

/// Tint the hovered panel's frame. Only runs when the mode changed.
pub fn highlight_hovered_panels(
    mode: Res<SceneMode>,
    panels: Query<(&PhotoPanel, &PanelFrame)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !mode.is_changed() {
        return;
    }

    for (panel, PanelFrame(handle)) in &panels {
        let Some(material) = materials.get_mut(handle) else {
            continue;
        };
        let (base, emissive) = if mode.is_hovered(&panel.id) {
            (colours::FRAME_HOVERED, colours::FRAME_HOVERED_EMISSIVE)
        } else {
            (colours::FRAME, Color::BLACK)
        };
        material.base_color = base;
        material.emissive = emissive.to_linear();
    }
}
