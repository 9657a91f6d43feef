use {
    super::{Cursor, WaylandState},
    log::debug,
    wayland_client::{
        protocol::{
            wl_keyboard::{self, KeyState, WlKeyboard},
            wl_pointer::{self, ButtonState, WlPointer},
            wl_seat::{self, Capability, WlSeat},
            wl_touch::{self, WlTouch},
        },
        Connection, Dispatch, QueueHandle, WEnum,
    },
};

/// Linux input event codes used by the window.
mod codes {
    pub const KEY_ESC: u32 = 1;
    pub const KEY_F11: u32 = 87;
    pub const BTN_LEFT: u32 = 0x110;
}

/// What the window does in response to an input event.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InputAction {
    Move,
    ToggleFullscreen,
    Quit,
}

/// Map a keyboard key to an action.
pub fn key_action(key: u32, pressed: bool) -> Option<InputAction> {
    if !pressed {
        return None;
    }
    match key {
        codes::KEY_F11 => Some(InputAction::ToggleFullscreen),
        codes::KEY_ESC => Some(InputAction::Quit),
        _ => None,
    }
}

/// Map a pointer button to an action.
pub fn button_action(button: u32, pressed: bool) -> Option<InputAction> {
    (pressed && button == codes::BTN_LEFT).then_some(InputAction::Move)
}

/// The input devices offered by the seat.
#[derive(Default)]
pub struct Input {
    pointer: Option<WlPointer>,
    keyboard: Option<WlKeyboard>,
    touch: Option<WlTouch>,
}

impl Input {
    fn update_capabilities(
        &mut self,
        seat: &WlSeat,
        capabilities: Capability,
        qh: &QueueHandle<WaylandState>,
    ) {
        sync_device(
            &mut self.pointer,
            capabilities.contains(Capability::Pointer),
            || seat.get_pointer(qh, ()),
        );
        sync_device(
            &mut self.keyboard,
            capabilities.contains(Capability::Keyboard),
            || seat.get_keyboard(qh, ()),
        );
        sync_device(
            &mut self.touch,
            capabilities.contains(Capability::Touch),
            || seat.get_touch(qh, ()),
        );
    }
}

/// Create the device when the capability appears and drop it when it goes.
fn sync_device<D>(
    device: &mut Option<D>,
    available: bool,
    create: impl FnOnce() -> D,
) {
    match (device.is_some(), available) {
        (false, true) => *device = Some(create()),
        (true, false) => *device = None,
        _ => {}
    }
}

impl WaylandState {
    fn apply_input_action(&mut self, action: InputAction, serial: u32) {
        debug!("Input action {:?}", action);
        match action {
            InputAction::Move => {
                if let Some(seat) = &self.globals.seat {
                    self.window.start_move(seat, serial);
                }
            }
            InputAction::ToggleFullscreen => self.window.toggle_fullscreen(),
            InputAction::Quit => self.stop(),
        }
    }
}

impl Dispatch<WlSeat, ()> for WaylandState {
    fn event(
        state: &mut Self,
        seat: &WlSeat,
        event: wl_seat::Event,
        _data: &(),
        _conn: &Connection,
        qh: &QueueHandle<Self>,
    ) {
        if let wl_seat::Event::Capabilities {
            capabilities: WEnum::Value(capabilities),
        } = event
        {
            state.input.update_capabilities(seat, capabilities, qh);
        }
    }
}

impl Dispatch<WlPointer, ()> for WaylandState {
    fn event(
        state: &mut Self,
        pointer: &WlPointer,
        event: wl_pointer::Event,
        _data: &(),
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
    ) {
        match event {
            wl_pointer::Event::Enter { serial, .. } => {
                if state.window.is_fullscreen() {
                    Cursor::hide(pointer, serial);
                } else if let Some(cursor) = &mut state.cursor {
                    cursor.show(pointer, serial);
                }
            }
            wl_pointer::Event::Button {
                serial,
                button,
                state: button_state,
                ..
            } => {
                let pressed = button_state == WEnum::Value(ButtonState::Pressed);
                if let Some(action) = button_action(button, pressed) {
                    state.apply_input_action(action, serial);
                }
            }
            _ => {}
        }
    }
}

impl Dispatch<WlKeyboard, ()> for WaylandState {
    fn event(
        state: &mut Self,
        _keyboard: &WlKeyboard,
        event: wl_keyboard::Event,
        _data: &(),
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
    ) {
        match event {
            // The keymap is not used, dropping the fd closes it.
            wl_keyboard::Event::Keymap { fd, .. } => drop(fd),
            wl_keyboard::Event::Key {
                serial,
                key,
                state: key_state,
                ..
            } => {
                let pressed = key_state == WEnum::Value(KeyState::Pressed);
                if let Some(action) = key_action(key, pressed) {
                    state.apply_input_action(action, serial);
                }
            }
            _ => {}
        }
    }
}

impl Dispatch<WlTouch, ()> for WaylandState {
    fn event(
        state: &mut Self,
        _touch: &WlTouch,
        event: wl_touch::Event,
        _data: &(),
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
    ) {
        if let wl_touch::Event::Down { serial, .. } = event {
            state.apply_input_action(InputAction::Move, serial);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn f11_toggles_fullscreen_and_escape_quits() {
        assert_eq!(
            key_action(codes::KEY_F11, true),
            Some(InputAction::ToggleFullscreen)
        );
        assert_eq!(key_action(codes::KEY_ESC, true), Some(InputAction::Quit));
    }

    #[test]
    fn releases_and_other_keys_do_nothing() {
        assert_eq!(key_action(codes::KEY_F11, false), None);
        assert_eq!(key_action(codes::KEY_ESC, false), None);
        assert_eq!(key_action(30, true), None);
    }

    #[test]
    fn left_button_press_starts_a_move() {
        assert_eq!(
            button_action(codes::BTN_LEFT, true),
            Some(InputAction::Move)
        );
        assert_eq!(button_action(codes::BTN_LEFT, false), None);
        assert_eq!(button_action(0x111, true), None);
    }

    #[test]
    fn devices_follow_capabilities() {
        let mut device = None;
        sync_device(&mut device, true, || 1);
        assert_eq!(device, Some(1));
        sync_device(&mut device, true, || 2);
        assert_eq!(device, Some(1));
        sync_device(&mut device, false, || 3);
        assert_eq!(device, None);
    }
}
