use core::fmt;
use serde::{Deserialize, Serialize};

/// Game event that has an audio or haptic cue attached.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cue {
    Flip,
    Match,
    Wrong,
    Win,
}

impl Cue {
    pub const ALL: [Cue; 4] = [Cue::Flip, Cue::Match, Cue::Wrong, Cue::Win];

    pub const fn tag(self) -> &'static str {
        use Cue::*;
        match self {
            Flip => "flip",
            Match => "match",
            Wrong => "wrong",
            Win => "win",
        }
    }

    /// Vibration pattern in alternating on/off milliseconds.
    ///
    /// A match has none of its own, the flip that completed it already buzzed.
    pub const fn vibration(self) -> &'static [u32] {
        use Cue::*;
        match self {
            Flip => &[20],
            Match => &[],
            Wrong => &[40, 30, 40],
            Win => &[100, 50, 100, 50, 150],
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundSetting {
    #[default]
    On,
    Off,
}

impl SoundSetting {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
        }
    }

    /// Anything other than an explicit `off` keeps sound on.
    pub fn parse_or_default(value: Option<&str>) -> Self {
        match value {
            Some("off") => Self::Off,
            _ => Self::On,
        }
    }

    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::On => Self::Off,
            Self::Off => Self::On,
        }
    }
}

/// Device side of the feedback channel. Calls are fire-and-forget; an
/// implementation without audio or vibration support does nothing.
pub trait FeedbackSink {
    fn play(&mut self, cue: Cue);
    fn vibrate(&mut self, pattern: &[u32]);
}

/// Sink for headless sessions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Silent;

impl FeedbackSink for Silent {
    fn play(&mut self, _cue: Cue) {}

    fn vibrate(&mut self, _pattern: &[u32]) {}
}

/// Routes cues to a sink, honouring the sound preference. Muting only
/// silences audio.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeedbackDispatcher<F> {
    sink: F,
    sound: SoundSetting,
}

impl<F: FeedbackSink> FeedbackDispatcher<F> {
    pub fn new(sink: F, sound: SoundSetting) -> Self {
        Self { sink, sound }
    }

    pub fn dispatch(&mut self, cue: Cue) {
        log::trace!("cue: {}", cue);
        if self.sound.is_on() {
            self.sink.play(cue);
        }
        let pattern = cue.vibration();
        if !pattern.is_empty() {
            self.sink.vibrate(pattern);
        }
    }

    pub fn sound(&self) -> SoundSetting {
        self.sound
    }

    pub fn set_sound(&mut self, sound: SoundSetting) {
        self.sound = sound;
    }

    pub fn sink(&self) -> &F {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut F {
        &mut self.sink
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use alloc::vec::Vec;

    /// Sink that remembers everything it was asked to do.
    #[derive(Clone, Debug, Default, PartialEq)]
    pub(crate) struct Recorder {
        pub played: Vec<Cue>,
        pub vibrations: Vec<Vec<u32>>,
    }

    impl FeedbackSink for Recorder {
        fn play(&mut self, cue: Cue) {
            self.played.push(cue);
        }

        fn vibrate(&mut self, pattern: &[u32]) {
            self.vibrations.push(pattern.to_vec());
        }
    }

    #[test]
    fn muted_dispatch_still_vibrates() {
        let mut feedback = FeedbackDispatcher::new(Recorder::default(), SoundSetting::Off);

        feedback.dispatch(Cue::Wrong);

        assert!(feedback.sink().played.is_empty());
        assert_eq!(feedback.sink().vibrations, [alloc::vec![40, 30, 40]]);
    }

    #[test]
    fn match_plays_without_vibration() {
        let mut feedback = FeedbackDispatcher::new(Recorder::default(), SoundSetting::On);

        feedback.dispatch(Cue::Match);

        assert_eq!(feedback.sink().played, [Cue::Match]);
        assert!(feedback.sink().vibrations.is_empty());
    }

    #[test]
    fn sound_setting_defaults_to_on() {
        assert_eq!(SoundSetting::parse_or_default(None), SoundSetting::On);
        assert_eq!(SoundSetting::parse_or_default(Some("on")), SoundSetting::On);
        assert_eq!(SoundSetting::parse_or_default(Some("garbage")), SoundSetting::On);
        assert_eq!(SoundSetting::parse_or_default(Some("off")), SoundSetting::Off);
        assert_eq!(SoundSetting::On.toggled().as_str(), "off");
    }
}
