//! Platform abstraction layer
//!
//! Browser input is reduced here to plain data so the simulation never sees
//! DOM types.

pub mod input;

pub use input::{InputState, KeyBinding, client_to_canvas, joystick_knob_position, joystick_vector};

/// User-agent fragments that mark a touch-first device
const TOUCH_AGENTS: [&str; 8] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// Whether a user-agent string belongs to a touch-first device
pub fn is_touch_user_agent(user_agent: &str) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    TOUCH_AGENTS.iter().any(|agent| ua.contains(agent))
}

/// Parse a computed CSS length such as `"12px"`; anything else is 0
pub fn parse_css_px(value: &str) -> f32 {
    value
        .trim()
        .trim_end_matches("px")
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
