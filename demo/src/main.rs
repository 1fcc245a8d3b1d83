//! Walks the full device lifecycle against a scripted backend: register a
//! provider and build a device, then drive update cycles that consume key
//! transitions and text input and enumerate the pressed keys.
//!
//! Run with `RUST_LOG=debug` to see the crate's construction and transition
//! traces alongside the demo output.

use ::latchkey::{
    backend::{register_provider, BackendProvider, KeyboardBackend, TextInputSlot},
    delta::{DeltaListener, DeltaRecorder},
    device::KeyboardDevice,
    errors::BackendError,
    keys::Key,
    state::KeyStateBuffer,
    types::{DeviceButton, DeviceId, DeviceState, DeviceVariant},
};

use ::std::{collections::VecDeque, sync::Arc};
use ::tracing::info;
use ::tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// One scripted input event, standing in for a decoded OS event.
#[derive(Clone, Copy)]
enum Event {
    Key(Key, bool),
    Text(char),
}

/// A backend that plays back a fixed script, one batch of events per update
/// call.
struct ScriptedBackend {
    variant: DeviceVariant,
    frames: VecDeque<Vec<Event>>,
    text_input: TextInputSlot,
}

impl KeyboardBackend for ScriptedBackend {
    fn update(
        &mut self,
        device: DeviceId,
        state: &mut KeyStateBuffer,
        observer: &mut dyn DeltaListener,
    ) {
        for event in self.frames.pop_front().unwrap_or_default() {
            match event {
                Event::Key(key, down) => state.apply(device, key, down, observer),
                Event::Text(ch) => self.text_input.push(ch),
            }
        }
    }

    fn state(&self) -> DeviceState {
        DeviceState::Enabled
    }

    fn variant(&self) -> DeviceVariant {
        self.variant
    }

    fn is_text_input_enabled(&self) -> bool {
        self.text_input.is_enabled()
    }

    fn set_text_input_enabled(&mut self, enabled: bool) {
        self.text_input.set_enabled(enabled);
    }

    fn next_character(&mut self) -> Option<char> {
        self.text_input.take()
    }
}

struct ScriptedProvider;

impl BackendProvider for ScriptedProvider {
    fn create(
        &self,
        _device: DeviceId,
        variant: DeviceVariant,
    ) -> Result<Box<dyn KeyboardBackend>, BackendError> {
        Ok(Box::new(ScriptedBackend {
            variant,
            frames: script().into(),
            text_input: TextInputSlot::new(),
        }))
    }
}

/// Four frames of a user typing "hi", then holding the left shift key.
fn script() -> Vec<Vec<Event>> {
    vec![
        vec![Event::Key(Key::H, true), Event::Text('h')],
        vec![
            Event::Key(Key::H, false),
            Event::Key(Key::I, true),
            Event::Text('i'),
        ],
        vec![Event::Key(Key::I, false), Event::Key(Key::ShiftLeft, true)],
        vec![],
    ]
}

pub fn main() {
    ::tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    register_provider(Arc::new(ScriptedProvider));

    let mut keyboard = KeyboardDevice::builder()
        .with_device_id(DeviceId(0))
        .with_variant(DeviceVariant::Standard)
        .build();
    info!(
        variant = ?keyboard.variant(),
        available = keyboard.is_available(),
        "Keyboard ready"
    );

    let mut deltas = DeltaRecorder::new();
    let mut typed = String::new();

    for frame in 0..4 {
        keyboard.update(&mut deltas);

        for change in deltas.changes() {
            info!(
                frame,
                key = %change.key,
                from = change.old_value,
                to = change.new_value,
                "Key changed"
            );
        }

        if let Some(ch) = keyboard.next_character() {
            typed.push(ch);
        }

        let mut down = [DeviceButton::default(); 8];
        let count = keyboard.any_buttons_down(&mut down);
        let names: Vec<_> = down[..count].iter().map(|b| b.key.to_string()).collect();
        info!(frame, ?names, "Currently down");

        deltas.clear();
        keyboard.snapshot_state();
    }

    info!(%typed, "Collected text input");
}
