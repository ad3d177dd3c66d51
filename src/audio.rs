//! Fire-and-forget audio events.
//!
//! The simulation reports what the ship is doing; whatever listens decides
//! how it sounds.  The bundled sink only tracks on/off edges and logs them,
//! which keeps the game silent but observable.

use bevy::prelude::*;

#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum AudioEvent {
    /// Engine hum on or off.
    Thrust(bool),
    /// Scanner whine; `progress` in `[0, 1)` drives the pitch.
    Scan { active: bool, progress: f32 },
    /// One-shot chime when an object finishes scanning.
    ScanComplete,
}

/// Last known channel state, so repeated events only log on change.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct AudioChannels {
    pub thrust: bool,
    pub scan: bool,
    pub completions: u32,
}

impl AudioChannels {
    /// Fold one event in; returns whether an audible edge occurred.
    pub fn apply(&mut self, event: AudioEvent) -> bool {
        match event {
            AudioEvent::Thrust(on) => std::mem::replace(&mut self.thrust, on) != on,
            AudioEvent::Scan { active, .. } => std::mem::replace(&mut self.scan, active) != active,
            AudioEvent::ScanComplete => {
                self.completions += 1;
                true
            }
        }
    }

    /// Silence everything, e.g. when leaving flight.
    pub fn silence(&mut self) {
        self.thrust = false;
        self.scan = false;
    }
}

pub fn audio_sink_system(mut events: MessageReader<AudioEvent>, mut channels: ResMut<AudioChannels>) {
    for event in events.read() {
        if channels.apply(*event) {
            debug!("[audio] {event:?}");
        }
    }
}

pub fn silence_audio_system(mut channels: ResMut<AudioChannels>) {
    if channels.thrust || channels.scan {
        debug!("[audio] silenced");
    }
    channels.silence();
}
