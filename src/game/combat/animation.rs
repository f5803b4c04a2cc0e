// Timed animation clips that emit gameplay events
//
// Stands in for engine-side animation events: each clip carries markers at
// fixed times and the player reports the markers crossed by each update.

use std::collections::HashMap;

use crate::game::config::AttackTiming;

/// Name of the one-shot swing clip
pub const ATTACK_CLIP: &str = "attack";

/// Events raised while a clip plays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEvent {
    /// The swing has reached the part where the blade can connect
    AttackStarted,
    /// The blade has passed through; the hit window closes
    AttackCompleted,
    /// The clip reached its end
    AnimationCompleted,
}

/// A one-shot clip with timed event markers
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    /// Length in seconds
    pub duration: f32,
    /// `(time, event)` pairs, sorted by time
    markers: Vec<(f32, AnimationEvent)>,
}

impl AnimationClip {
    pub fn new(name: &str, duration: f32) -> Self {
        Self {
            name: name.to_string(),
            duration: duration.max(0.0),
            markers: Vec::new(),
        }
    }

    /// Add an event marker; times past the end are clamped to it
    pub fn with_marker(mut self, time: f32, event: AnimationEvent) -> Self {
        let time = time.clamp(0.0, self.duration);
        let index = self.markers.partition_point(|(t, _)| *t <= time);
        self.markers.insert(index, (time, event));
        self
    }

    /// The swing clip described by a weapon's timing
    pub fn attack(timing: &AttackTiming) -> Self {
        Self::new(ATTACK_CLIP, timing.duration)
            .with_marker(timing.started_at, AnimationEvent::AttackStarted)
            .with_marker(timing.completed_at, AnimationEvent::AttackCompleted)
    }

    pub fn markers(&self) -> &[(f32, AnimationEvent)] {
        &self.markers
    }
}

/// Plays one clip at a time and reports crossed markers
#[derive(Debug, Default)]
pub struct AnimationPlayer {
    clips: HashMap<String, AnimationClip>,
    current: Option<String>,
    time: f32,
}

impl AnimationPlayer {
    pub fn new() -> Self {
        Self {
            clips: HashMap::new(),
            current: None,
            time: 0.0,
        }
    }

    pub fn add_clip(&mut self, clip: AnimationClip) {
        self.clips.insert(clip.name.clone(), clip);
    }

    /// Play a clip from the beginning; returns false for an unknown name
    pub fn play_from_start(&mut self, name: &str) -> bool {
        if !self.clips.contains_key(name) {
            return false;
        }
        self.current = Some(name.to_string());
        self.time = 0.0;
        true
    }

    /// Advance playback and return the events crossed this frame, in order
    ///
    /// A marker at time `t` fires on the update whose window `[previous, now)`
    /// contains it; the final update also fires markers at the very end.
    /// `AnimationCompleted` is always last and ends playback.
    pub fn update(&mut self, dt: f32) -> Vec<AnimationEvent> {
        let mut events = Vec::new();
        let Some(clip) = self.current.as_ref().and_then(|name| self.clips.get(name)) else {
            return events;
        };

        let previous = self.time;
        let now = previous + dt;
        let finished = now >= clip.duration;

        events.extend(
            clip.markers
                .iter()
                .filter(|(t, _)| *t >= previous && (*t < now || finished))
                .map(|(_, event)| *event),
        );

        if finished {
            events.push(AnimationEvent::AnimationCompleted);
            self.current = None;
            self.time = 0.0;
        } else {
            self.time = now;
        }
        events
    }

    pub fn is_playing(&self) -> bool {
        self.current.is_some()
    }
}
