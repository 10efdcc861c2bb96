use std::time::Duration;

use super::{
    config::{AnimationConfig, CrossingAction, PhaseTiming},
    easing::Easing,
    viewport::Crossing,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealState {
    #[default]
    Hidden,
    Revealing,
    Visible,
    Concealing,
}

/// Animated style values of one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleSnapshot {
    pub opacity: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    /// Degrees.
    pub rotation: f64,
    pub blur: f64,
    pub scale: f64,
}

impl StyleSnapshot {
    pub fn resting() -> Self {
        Self {
            opacity: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
            rotation: 0.0,
            blur: 0.0,
            scale: 1.0,
        }
    }

    pub fn hidden(config: &AnimationConfig) -> Self {
        let (translate_x, translate_y) = config.direction.offset(config.distance);
        Self {
            opacity: config.base_opacity,
            translate_x,
            translate_y,
            rotation: config.base_rotation,
            blur: config.blur_strength,
            scale: config.base_scale,
        }
    }

    pub fn lerp(&self, to: &Self, t: f64) -> Self {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Self {
            opacity: mix(self.opacity, to.opacity),
            translate_x: mix(self.translate_x, to.translate_x),
            translate_y: mix(self.translate_y, to.translate_y),
            rotation: mix(self.rotation, to.rotation),
            blur: mix(self.blur, to.blur),
            scale: mix(self.scale, to.scale),
        }
    }

    pub fn is_resting(&self) -> bool {
        *self == Self::resting()
    }

    /// Inline style declarations. A resting element gets no transform or
    /// filter at all so it renders exactly like unanimated content.
    pub fn to_css(&self) -> String {
        if self.is_resting() {
            return "opacity: 1; transform: none; filter: none;".to_string();
        }
        format!(
            "opacity: {:.3}; transform: translate3d({:.2}px, {:.2}px, 0) rotateX({:.2}deg) scale({:.3}); filter: blur({:.2}px);",
            self.opacity, self.translate_x, self.translate_y, self.rotation, self.scale, self.blur
        )
    }
}

#[derive(Debug, Clone)]
struct Transition {
    from: StyleSnapshot,
    to: StyleSnapshot,
    start: Duration,
    duration: Duration,
    easing: Easing,
}

impl Transition {
    fn end(&self) -> Duration {
        self.start + self.duration
    }
}

/// Hidden -> Revealing -> Visible lifecycle of one element, with the
/// Visible -> Concealing -> Hidden back edge in toggle mode.
///
/// Time is passed in explicitly as the offset since some fixed origin (for
/// the browser, `performance.now()`), so the machine never reads a clock.
#[derive(Debug, Clone)]
pub struct RevealMachine {
    config: AnimationConfig,
    state: RevealState,
    style: StyleSnapshot,
    transition: Option<Transition>,
    reduced_motion: bool,
}

impl RevealMachine {
    pub fn new(config: AnimationConfig) -> Self {
        let style = StyleSnapshot::hidden(&config);
        Self {
            config,
            state: RevealState::Hidden,
            style,
            transition: None,
            reduced_motion: false,
        }
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn style(&self) -> &StyleSnapshot {
        &self.style
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// True while a transition is pending or running.
    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// When the running transition lands, if any.
    #[cfg(test)]
    pub fn settles_at(&self) -> Option<Duration> {
        self.transition.as_ref().map(Transition::end)
    }

    /// With reduced motion nothing interpolates: the element is shown at rest
    /// straight away and stays there.
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
        if reduced {
            self.force_visible();
        }
    }

    /// Reacts to the visibility signal. Returns true if a transition started.
    pub fn set_in_view(&mut self, in_view: bool, now: Duration) -> bool {
        if in_view {
            self.cross(Crossing::Enter, now, self.config.delay)
        } else {
            self.cross(Crossing::Leave, now, Duration::ZERO)
        }
    }

    /// Applies the configured action for `crossing`, paced by that
    /// crossing's timing.
    pub fn cross(&mut self, crossing: Crossing, now: Duration, delay: Duration) -> bool {
        let timing = self.config.timing(crossing);
        match self.config.action(crossing) {
            CrossingAction::Play => self.play(now + delay, timing),
            CrossingAction::Reverse => self.reverse(now + delay, timing),
            CrossingAction::Ignore => false,
        }
    }

    pub fn reveal_after(&mut self, now: Duration, delay: Duration) -> bool {
        self.play(now + delay, self.config.timing(Crossing::Enter))
    }

    /// Fire-once machines ignore this.
    pub fn conceal_after(&mut self, now: Duration, delay: Duration) -> bool {
        self.reverse(now + delay, self.config.timing(Crossing::Leave))
    }

    fn play(&mut self, start: Duration, timing: PhaseTiming) -> bool {
        if self.reduced_motion {
            self.force_visible();
            return false;
        }
        match self.state {
            RevealState::Hidden | RevealState::Concealing => {
                self.begin(RevealState::Revealing, StyleSnapshot::resting(), start, timing);
                true
            }
            RevealState::Revealing | RevealState::Visible => false,
        }
    }

    fn reverse(&mut self, start: Duration, timing: PhaseTiming) -> bool {
        if self.config.trigger_once || self.reduced_motion {
            return false;
        }
        match self.state {
            RevealState::Visible | RevealState::Revealing => {
                let target = StyleSnapshot::hidden(&self.config);
                self.begin(RevealState::Concealing, target, start, timing);
                true
            }
            RevealState::Hidden | RevealState::Concealing => false,
        }
    }

    fn begin(&mut self, state: RevealState, to: StyleSnapshot, start: Duration, timing: PhaseTiming) {
        self.state = state;
        self.transition = Some(Transition {
            from: self.style,
            to,
            start,
            duration: timing.duration,
            easing: timing.easing,
        });
    }

    /// Advances to `now` and returns the style to render.
    pub fn tick(&mut self, now: Duration) -> &StyleSnapshot {
        let Some(tr) = &self.transition else {
            return &self.style;
        };
        if now < tr.start {
            self.style = tr.from;
            return &self.style;
        }
        let elapsed = now - tr.start;
        if tr.duration.is_zero() || elapsed >= tr.duration {
            self.style = tr.to;
            self.state = match self.state {
                RevealState::Concealing => RevealState::Hidden,
                _ => RevealState::Visible,
            };
            self.transition = None;
        } else {
            let t = elapsed.as_secs_f64() / tr.duration.as_secs_f64();
            self.style = tr.from.lerp(&tr.to, tr.easing.apply(t));
        }
        &self.style
    }

    /// Terminal visible state with no interpolation, used whenever the
    /// animation cannot run.
    pub fn force_visible(&mut self) {
        self.state = RevealState::Visible;
        self.style = StyleSnapshot::resting();
        self.transition = None;
    }

    /// Back to the initial hidden state, as on a fresh mount.
    pub fn reset(&mut self) {
        self.transition = None;
        if self.reduced_motion {
            self.force_visible();
        } else {
            self.state = RevealState::Hidden;
            self.style = StyleSnapshot::hidden(&self.config);
        }
    }
}
