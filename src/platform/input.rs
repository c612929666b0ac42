//! Device input folded into per-frame simulation intents
//!
//! Event handlers write raw state here as events arrive; the frame loop
//! reads one `TickInput` per frame and then clears the one-shot edges.

use std::collections::HashSet;

use glam::Vec2;

use crate::sim::TickInput;

/// Virtual joystick travel radius (px)
pub const JOYSTICK_RADIUS: f32 = 32.5;

/// What a held key does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeldAction {
    Up,
    Down,
    Left,
    Right,
    Attack,
}

/// What a key press means, by `KeyboardEvent.code`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyBinding {
    Hold(HeldAction),
    ToggleMenu,
    /// 0-based form index
    QuickSelect(usize),
}

impl KeyBinding {
    pub fn from_code(code: &str) -> Option<Self> {
        use HeldAction::*;
        let binding = match code {
            "KeyW" | "ArrowUp" => KeyBinding::Hold(Up),
            "KeyS" | "ArrowDown" => KeyBinding::Hold(Down),
            "KeyA" | "ArrowLeft" => KeyBinding::Hold(Left),
            "KeyD" | "ArrowRight" => KeyBinding::Hold(Right),
            "Space" => KeyBinding::Hold(Attack),
            "KeyQ" => KeyBinding::ToggleMenu,
            _ => {
                let digit = code.strip_prefix("Digit")?.parse::<usize>().ok()?;
                if !(1..=5).contains(&digit) {
                    return None;
                }
                KeyBinding::QuickSelect(digit - 1)
            }
        };
        Some(binding)
    }
}

/// Raw input state accumulated between frames
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<HeldAction>,
    /// Last pointer position in canvas pixels
    pub pointer: Vec2,
    pub pointer_down: bool,
    pointer_pressed: bool,
    joystick: Option<Vec2>,
    attack_button: bool,
    toggle_menu: bool,
    quick_select: Option<usize>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key press; returns true when the key is bound and the browser
    /// default should be suppressed. Digit shortcuts only count while the
    /// form wheel is open.
    pub fn key_down(&mut self, code: &str, menu_open: bool) -> bool {
        match KeyBinding::from_code(code) {
            Some(KeyBinding::Hold(action)) => {
                self.held.insert(action);
                true
            }
            Some(KeyBinding::ToggleMenu) => {
                self.toggle_menu = true;
                true
            }
            Some(KeyBinding::QuickSelect(index)) if menu_open => {
                self.quick_select = Some(index);
                true
            }
            Some(KeyBinding::QuickSelect(_)) | None => false,
        }
    }

    pub fn key_up(&mut self, code: &str) {
        if let Some(KeyBinding::Hold(action)) = KeyBinding::from_code(code) {
            self.held.remove(&action);
        }
    }

    pub fn is_held(&self, action: HeldAction) -> bool {
        self.held.contains(&action)
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        self.pointer = pos;
    }

    /// Mouse button went down at `pos`
    pub fn pointer_press(&mut self, pos: Vec2) {
        self.pointer = pos;
        self.pointer_down = true;
        self.pointer_pressed = true;
    }

    pub fn pointer_release(&mut self) {
        self.pointer_down = false;
    }

    /// Canvas tap on a touch layout: aims the menu, never attacks
    pub fn tap(&mut self, pos: Vec2) {
        self.pointer = pos;
        self.pointer_pressed = true;
    }

    /// Joystick drag offset from its centre, or `None` when released
    pub fn set_joystick(&mut self, offset: Option<Vec2>) {
        self.joystick = offset.map(joystick_vector);
    }

    pub fn joystick(&self) -> Option<Vec2> {
        self.joystick
    }

    pub fn set_attack_button(&mut self, down: bool) {
        self.attack_button = down;
    }

    /// On-screen menu button
    pub fn request_menu_toggle(&mut self) {
        self.toggle_menu = true;
    }

    /// Snapshot of intents for this frame
    pub fn to_tick_input(&self, time_ms: f64) -> TickInput {
        TickInput {
            time_ms,
            up: self.is_held(HeldAction::Up),
            down: self.is_held(HeldAction::Down),
            left: self.is_held(HeldAction::Left),
            right: self.is_held(HeldAction::Right),
            joystick: self.joystick,
            pointer: self.pointer,
            pointer_down: self.pointer_down,
            pointer_pressed: self.pointer_pressed,
            attack: self.attack_button || self.is_held(HeldAction::Attack),
            toggle_menu: self.toggle_menu,
            quick_select: self.quick_select,
        }
    }

    /// Clear edge-triggered inputs once a frame has consumed them
    pub fn clear_one_shots(&mut self) {
        self.pointer_pressed = false;
        self.toggle_menu = false;
        self.quick_select = None;
    }

    /// Drop every held input (focus lost, layout switch)
    pub fn release_all(&mut self) {
        self.held.clear();
        self.pointer_down = false;
        self.joystick = None;
        self.attack_button = false;
    }
}

/// Movement vector for a joystick drag: direction of the drag, magnitude
/// `min(distance, radius) / radius`
pub fn joystick_vector(offset: Vec2) -> Vec2 {
    let distance = offset.length().min(JOYSTICK_RADIUS);
    offset.normalize_or_zero() * (distance / JOYSTICK_RADIUS)
}

/// Knob position inside the joystick base, relative to its top-left corner
pub fn joystick_knob_position(vector: Vec2) -> Vec2 {
    Vec2::splat(JOYSTICK_RADIUS) + vector * JOYSTICK_RADIUS
}

/// Map a client-space point onto canvas pixels, accounting for CSS scaling
pub fn client_to_canvas(client: Vec2, rect_origin: Vec2, rect_size: Vec2, canvas: Vec2) -> Vec2 {
    let scale = Vec2::new(
        if rect_size.x > 0.0 { canvas.x / rect_size.x } else { 1.0 },
        if rect_size.y > 0.0 { canvas.y / rect_size.y } else { 1.0 },
    );
    (client - rect_origin) * scale
}
