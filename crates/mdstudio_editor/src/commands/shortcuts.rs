//! Keyboard shortcut handling

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::ui::PendingAction;
use crate::EditorState;

/// Handle keyboard shortcuts
pub fn handle_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut editor_state: ResMut<EditorState>,
    mut contexts: EguiContexts,
) {
    // Don't steal keys from text fields
    if let Ok(ctx) = contexts.ctx_mut() {
        if ctx.wants_keyboard_input() {
            return;
        }
    }

    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    let shift = keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);

    if let Some(action) = shortcut_action(&keyboard, ctrl, shift) {
        editor_state.pending_action = Some(action);
    }

    // Non-Ctrl shortcuts
    if !ctrl {
        // G key - toggle grid
        if keyboard.just_pressed(KeyCode::KeyG) {
            editor_state.show_grid = !editor_state.show_grid;
        }

        // Home key - recentre the map at 1x
        if keyboard.just_pressed(KeyCode::Home) {
            editor_state.pending_reset_camera = true;
        }
    }
}

/// Ctrl shortcuts for file actions
fn shortcut_action(keyboard: &ButtonInput<KeyCode>, ctrl: bool, shift: bool) -> Option<PendingAction> {
    if !ctrl {
        return None;
    }

    if keyboard.just_pressed(KeyCode::KeyS) {
        // Ctrl+Shift+S - Save As
        if shift {
            Some(PendingAction::SaveAs)
        } else {
            Some(PendingAction::Save)
        }
    } else if keyboard.just_pressed(KeyCode::KeyO) {
        Some(PendingAction::Open)
    } else if keyboard.just_pressed(KeyCode::KeyN) {
        Some(PendingAction::New)
    } else if keyboard.just_pressed(KeyCode::KeyQ) {
        Some(PendingAction::Exit)
    } else {
        None
    }
}
