use js_sys::{Array, Reflect};
use pairs_core::{Cue, FeedbackSink};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::HtmlAudioElement;

const fn sound_path(cue: Cue) -> &'static str {
    match cue {
        Cue::Flip => "assets/sounds/flip.mp3",
        Cue::Match => "assets/sounds/match.mp3",
        Cue::Wrong => "assets/sounds/wrong.mp3",
        Cue::Win => "assets/sounds/win.wav",
    }
}

/// Plays cues through `<audio>` elements and `navigator.vibrate`.
#[derive(Debug)]
pub(crate) struct BrowserFeedback {
    sounds: Vec<(Cue, HtmlAudioElement)>,
}

impl BrowserFeedback {
    pub(crate) fn new() -> Self {
        let sounds = Cue::ALL
            .into_iter()
            .filter_map(|cue| match HtmlAudioElement::new_with_src(sound_path(cue)) {
                Ok(audio) => Some((cue, audio)),
                Err(err) => {
                    log::warn!("no audio for {}: {:?}", cue, err);
                    None
                }
            })
            .collect();
        Self { sounds }
    }
}

impl FeedbackSink for BrowserFeedback {
    fn play(&mut self, cue: Cue) {
        let Some((_, audio)) = self.sounds.iter().find(|(c, _)| *c == cue) else {
            return;
        };

        audio.set_current_time(0.0);
        match audio.play() {
            // autoplay policies reject the promise until the first user gesture
            Ok(promise) => spawn_local(async move {
                if let Err(err) = JsFuture::from(promise).await {
                    log::debug!("{} sound rejected: {:?}", cue, err);
                }
            }),
            Err(err) => log::debug!("{} sound failed: {:?}", cue, err),
        }
    }

    fn vibrate(&mut self, pattern: &[u32]) {
        let navigator = gloo::utils::window().navigator();
        if !Reflect::has(&navigator, &JsValue::from_str("vibrate")).unwrap_or(false) {
            return;
        }

        let accepted = match pattern {
            [] => return,
            [duration] => navigator.vibrate_with_duration(*duration),
            _ => {
                let pattern: Array = pattern.iter().map(|&ms| JsValue::from(ms)).collect();
                navigator.vibrate_with_pattern(&pattern)
            }
        };
        if !accepted {
            log::trace!("vibration refused");
        }
    }
}
