//! Platform abstraction layer
//!
//! Translates raw browser input into [`InputEvent`]s. Kept free of `web_sys`
//! types so the mapping is testable on native.

use crate::sim::{InputEvent, Viewport};

/// Map a `KeyboardEvent.key` / `.code` value to a game input
pub fn key_to_event(key: &str) -> Option<InputEvent> {
    match key {
        " " | "Space" | "Spacebar" => Some(InputEvent::PrimaryKey),
        "Escape" | "Esc" => Some(InputEvent::PauseKey),
        _ => None,
    }
}

/// Convert a pointer position in client (page) pixels to surface coordinates,
/// given the canvas bounding rect and the simulated viewport size
pub fn client_to_surface(
    client: (f32, f32),
    rect_origin: (f32, f32),
    rect_size: (f32, f32),
    viewport: Viewport,
) -> (f32, f32) {
    let scale_x = if rect_size.0 > 0.0 {
        viewport.width / rect_size.0
    } else {
        1.0
    };
    let scale_y = if rect_size.1 > 0.0 {
        viewport.height / rect_size.1
    } else {
        1.0
    };
    (
        (client.0 - rect_origin.0) * scale_x,
        (client.1 - rect_origin.1) * scale_y,
    )
}

/// Pointer event for a client position
pub fn pointer_event(
    client: (f32, f32),
    rect_origin: (f32, f32),
    rect_size: (f32, f32),
    viewport: Viewport,
) -> InputEvent {
    let (x, y) = client_to_surface(client, rect_origin, rect_size, viewport);
    InputEvent::Pointer { x, y }
}
