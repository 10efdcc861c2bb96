use std::{str::FromStr, time::Duration};

use thiserror::Error;

use super::{
    easing::Easing,
    viewport::{Crossing, ElementBounds},
};

/// Side the element travels towards while it is revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Starting `(x, y)` offset in px for an element that slides in over `distance`.
    pub fn offset(self, distance: f64) -> (f64, f64) {
        match self {
            Self::Up => (0.0, distance),
            Self::Down => (0.0, -distance),
            Self::Left => (distance, 0.0),
            Self::Right => (-distance, 0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerMode {
    /// Signal goes false -> true once and stays true.
    #[default]
    Once,
    /// Signal follows every crossing of the trigger boundary.
    Toggle,
}

/// Where an element counts as "in view".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriggerMargin {
    /// `"top 80%"`: the element's top edge has crossed this fraction of the
    /// viewport height. The mirrored line (`1 - f`) is where its bottom edge
    /// leaves again.
    ViewportFraction(f64),
    /// `"-100px"`: the viewport grown (or shrunk, when negative) by this many
    /// px at both edges, like an intersection observer root margin.
    Inset(f64),
}

impl Default for TriggerMargin {
    fn default() -> Self {
        Self::Inset(0.0)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarginParseError {
    #[error("trigger margin is empty")]
    Empty,
    #[error("invalid number in trigger margin: {0}")]
    InvalidNumber(String),
    #[error("trigger margin needs a % or px unit: {0}")]
    UnknownUnit(String),
    #[error("viewport percentage out of range: {0}")]
    OutOfRange(f64),
}

impl FromStr for TriggerMargin {
    type Err = MarginParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix("top").map(str::trim_start).unwrap_or(s);
        if s.is_empty() {
            return Err(MarginParseError::Empty);
        }
        if let Some(num) = s.strip_suffix('%') {
            let pct = num
                .trim()
                .parse::<f64>()
                .map_err(|_| MarginParseError::InvalidNumber(s.to_string()))?;
            if !(0.0..=100.0).contains(&pct) {
                return Err(MarginParseError::OutOfRange(pct));
            }
            Ok(Self::ViewportFraction(pct / 100.0))
        } else if let Some(num) = s.strip_suffix("px") {
            let px = num
                .trim()
                .parse::<f64>()
                .map_err(|_| MarginParseError::InvalidNumber(s.to_string()))?;
            Ok(Self::Inset(px))
        } else {
            Err(MarginParseError::UnknownUnit(s.to_string()))
        }
    }
}

impl TriggerMargin {
    pub fn intersects(&self, bounds: ElementBounds, viewport_height: f64) -> bool {
        match *self {
            Self::ViewportFraction(f) => {
                bounds.top <= viewport_height * f && bounds.bottom >= viewport_height * (1.0 - f)
            }
            Self::Inset(px) => bounds.top < viewport_height + px && bounds.bottom > -px,
        }
    }

    /// The same boundary as an intersection observer `rootMargin`.
    pub fn root_margin(&self) -> String {
        match *self {
            Self::ViewportFraction(f) => {
                let pct = ((1.0 - f) * 10_000.0).round() / 100.0;
                format!("-{pct}% 0px -{pct}% 0px")
            }
            Self::Inset(px) => format!("{px}px 0px {px}px 0px"),
        }
    }
}

/// Length, per-child stagger and curve of one animated phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseTiming {
    pub duration: Duration,
    pub stagger: Duration,
    pub easing: Easing,
}

impl PhaseTiming {
    pub fn new(duration: Duration, stagger: Duration, easing: Easing) -> Self {
        Self {
            duration,
            stagger,
            easing,
        }
    }
}

/// What a crossing does to a running animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossingAction {
    Play,
    Reverse,
    Ignore,
}

impl FromStr for CrossingAction {
    type Err = ActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "play" | "restart" | "resume" => Ok(Self::Play),
            "reverse" | "reset" => Ok(Self::Reverse),
            "none" | "pause" | "complete" => Ok(Self::Ignore),
            other => Err(ActionParseError::UnknownAction(other.to_string())),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActionParseError {
    #[error("expected four toggle actions, got {0}")]
    WrongCount(usize),
    #[error("unknown toggle action: {0}")]
    UnknownAction(String),
    #[error("the first toggle action must play, got {0:?}")]
    EnterMustPlay(CrossingAction),
}

/// Actions for the crossings after an enter, written like
/// `"play none none reverse"` (enter, leave, enter-back, leave-back).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleActions {
    pub leave: CrossingAction,
    pub enter_back: CrossingAction,
    pub leave_back: CrossingAction,
}

impl ToggleActions {
    /// `"play reverse play reverse"`
    pub const MIRROR: Self = Self {
        leave: CrossingAction::Reverse,
        enter_back: CrossingAction::Play,
        leave_back: CrossingAction::Reverse,
    };

    /// `"play none none reverse"`: stays revealed until scrolled back above the start line.
    pub const PLAY_UNTIL_BACK: Self = Self {
        leave: CrossingAction::Ignore,
        enter_back: CrossingAction::Ignore,
        leave_back: CrossingAction::Reverse,
    };
}

impl Default for ToggleActions {
    fn default() -> Self {
        Self::MIRROR
    }
}

impl FromStr for ToggleActions {
    type Err = ActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let actions = s
            .split_whitespace()
            .map(str::parse::<CrossingAction>)
            .collect::<Result<Vec<_>, _>>()?;
        match actions.as_slice() {
            [CrossingAction::Play, leave, enter_back, leave_back] => Ok(Self {
                leave: *leave,
                enter_back: *enter_back,
                leave_back: *leave_back,
            }),
            [enter, _, _, _] => Err(ActionParseError::EnterMustPlay(*enter)),
            _ => Err(ActionParseError::WrongCount(actions.len())),
        }
    }
}

/// Timings that differ from the enter phase. `None` reuses the enter timing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CrossingTimings {
    pub leave: Option<PhaseTiming>,
    pub enter_back: Option<PhaseTiming>,
    pub leave_back: Option<PhaseTiming>,
}

/// Per element (or per group) animation settings. Built once and not
/// mutated while the animation runs.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationConfig {
    pub direction: Direction,
    /// Travel in px along `direction`.
    pub distance: f64,
    pub base_opacity: f64,
    /// Starting rotation in degrees.
    pub base_rotation: f64,
    pub base_scale: f64,
    /// Starting blur radius in px, 0 disables the blur.
    pub blur_strength: f64,
    pub duration: Duration,
    pub delay: Duration,
    pub stagger_delay: Duration,
    pub trigger_once: bool,
    pub trigger_margin: TriggerMargin,
    pub easing: Easing,
    /// Only read in toggle mode.
    pub toggle_actions: ToggleActions,
    pub crossing_timings: CrossingTimings,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            direction: Direction::Up,
            distance: 50.0,
            base_opacity: 0.0,
            base_rotation: 0.0,
            base_scale: 1.0,
            blur_strength: 0.0,
            duration: Duration::from_millis(600),
            delay: Duration::ZERO,
            stagger_delay: Duration::from_millis(100),
            trigger_once: true,
            trigger_margin: TriggerMargin::default(),
            easing: Easing::default(),
            toggle_actions: ToggleActions::default(),
            crossing_timings: CrossingTimings::default(),
        }
    }
}

impl AnimationConfig {
    /// Whole page sections sliding in once.
    pub fn section() -> Self {
        Self::default().with_margin(TriggerMargin::Inset(-100.0))
    }

    /// Headings: short rise out of a blur.
    pub fn title() -> Self {
        Self::default()
            .with_distance(30.0)
            .with_blur(10.0)
            .with_duration(Duration::from_millis(800))
            .with_margin(TriggerMargin::Inset(-50.0))
            .with_easing(Easing::SMOOTH)
    }

    pub fn card() -> Self {
        Self::default()
            .with_distance(20.0)
            .with_duration(Duration::from_millis(500))
            .with_margin(TriggerMargin::Inset(-50.0))
            .with_easing(Easing::EASE_OUT)
    }

    /// Reversible reveal that plays again on scroll back. Every crossing has
    /// its own pace.
    pub fn scroll_reveal() -> Self {
        let ms = Duration::from_millis;
        Self::default()
            .with_distance(0.0)
            .with_blur(10.0)
            .with_duration(ms(1200))
            .with_stagger(ms(30))
            .with_margin(TriggerMargin::ViewportFraction(0.8))
            .with_easing(Easing::POWER3_OUT)
            .toggle()
            .with_crossing_timing(
                Crossing::Leave,
                PhaseTiming::new(ms(800), ms(20), Easing::POWER2_OUT),
            )
            .with_crossing_timing(
                Crossing::EnterBack,
                PhaseTiming::new(ms(1000), ms(20), Easing::POWER3_OUT),
            )
            .with_crossing_timing(
                Crossing::LeaveBack,
                PhaseTiming::new(ms(600), ms(10), Easing::POWER2_OUT),
            )
    }

    /// Stat numbers: rise once past the 80% line, drop back only when the
    /// page is scrolled back above it.
    pub fn stat() -> Self {
        Self::default()
            .with_distance(20.0)
            .with_duration(Duration::from_secs(1))
            .with_margin(TriggerMargin::ViewportFraction(0.8))
            .with_easing(Easing::POWER2_OUT)
            .with_toggle_actions(ToggleActions::PLAY_UNTIL_BACK)
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance = distance;
        self
    }

    pub fn with_base_opacity(mut self, opacity: f64) -> Self {
        self.base_opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.base_rotation = degrees;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.base_scale = scale;
        self
    }

    pub fn with_blur(mut self, px: f64) -> Self {
        self.blur_strength = px.max(0.0);
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_stagger(mut self, stagger: Duration) -> Self {
        self.stagger_delay = stagger;
        self
    }

    pub fn with_margin(mut self, margin: TriggerMargin) -> Self {
        self.trigger_margin = margin;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn toggle(mut self) -> Self {
        self.trigger_once = false;
        self
    }

    /// Switches to toggle mode with these actions.
    pub fn with_toggle_actions(mut self, actions: ToggleActions) -> Self {
        self.toggle_actions = actions;
        self.toggle()
    }

    /// Overrides the timing of one crossing. `Crossing::Enter` sets the base
    /// duration, stagger and easing.
    pub fn with_crossing_timing(mut self, crossing: Crossing, timing: PhaseTiming) -> Self {
        match crossing {
            Crossing::Enter => {
                self.duration = timing.duration;
                self.stagger_delay = timing.stagger;
                self.easing = timing.easing;
            }
            Crossing::Leave => self.crossing_timings.leave = Some(timing),
            Crossing::EnterBack => self.crossing_timings.enter_back = Some(timing),
            Crossing::LeaveBack => self.crossing_timings.leave_back = Some(timing),
        }
        self
    }

    pub fn timing(&self, crossing: Crossing) -> PhaseTiming {
        let own = match crossing {
            Crossing::Enter => None,
            Crossing::Leave => self.crossing_timings.leave,
            Crossing::EnterBack => self.crossing_timings.enter_back,
            Crossing::LeaveBack => self.crossing_timings.leave_back,
        };
        own.unwrap_or(PhaseTiming::new(self.duration, self.stagger_delay, self.easing))
    }

    pub fn action(&self, crossing: Crossing) -> CrossingAction {
        match crossing {
            Crossing::Enter => CrossingAction::Play,
            _ if self.trigger_once => CrossingAction::Ignore,
            Crossing::Leave => self.toggle_actions.leave,
            Crossing::EnterBack => self.toggle_actions.enter_back,
            Crossing::LeaveBack => self.toggle_actions.leave_back,
        }
    }

    pub fn trigger_mode(&self) -> TriggerMode {
        if self.trigger_once {
            TriggerMode::Once
        } else {
            TriggerMode::Toggle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(top: f64, bottom: f64) -> ElementBounds {
        ElementBounds { top, bottom }
    }

    #[test]
    fn test_parse_margins() {
        assert_eq!(
            "top 80%".parse::<TriggerMargin>(),
            Ok(TriggerMargin::ViewportFraction(0.8))
        );
        assert_eq!(
            "85%".parse::<TriggerMargin>(),
            Ok(TriggerMargin::ViewportFraction(0.85))
        );
        assert_eq!(
            "-100px".parse::<TriggerMargin>(),
            Ok(TriggerMargin::Inset(-100.0))
        );
        assert_eq!(" 0px ".parse::<TriggerMargin>(), Ok(TriggerMargin::Inset(0.0)));
    }

    #[test]
    fn test_parse_margin_errors() {
        assert_eq!("".parse::<TriggerMargin>(), Err(MarginParseError::Empty));
        assert_eq!("top".parse::<TriggerMargin>(), Err(MarginParseError::Empty));
        assert!(matches!(
            "abc%".parse::<TriggerMargin>(),
            Err(MarginParseError::InvalidNumber(_))
        ));
        assert!(matches!(
            "50em".parse::<TriggerMargin>(),
            Err(MarginParseError::UnknownUnit(_))
        ));
        assert_eq!(
            "150%".parse::<TriggerMargin>(),
            Err(MarginParseError::OutOfRange(150.0))
        );
    }

    #[test]
    fn test_fraction_margin_crossing() {
        let margin = TriggerMargin::ViewportFraction(0.8);
        let h = 1000.0;
        // below the 80% line
        assert!(!margin.intersects(bounds(900.0, 1200.0), h));
        // top edge crossed the line
        assert!(margin.intersects(bounds(790.0, 1090.0), h));
        // bottom edge went above the 20% line
        assert!(!margin.intersects(bounds(-200.0, 150.0), h));
    }

    #[test]
    fn test_inset_margin_shrinks_viewport() {
        let margin = TriggerMargin::Inset(-100.0);
        let h = 800.0;
        assert!(!margin.intersects(bounds(750.0, 900.0), h));
        assert!(margin.intersects(bounds(650.0, 900.0), h));
        assert!(!margin.intersects(bounds(-300.0, 50.0), h));
        assert!(TriggerMargin::Inset(0.0).intersects(bounds(-300.0, 50.0), h));
    }

    #[test]
    fn test_direction_offsets() {
        assert_eq!(Direction::Up.offset(50.0), (0.0, 50.0));
        assert_eq!(Direction::Down.offset(50.0), (0.0, -50.0));
        assert_eq!(Direction::Left.offset(50.0), (50.0, 0.0));
        assert_eq!(Direction::Right.offset(50.0), (-50.0, 0.0));
    }

    #[test]
    fn test_presets() {
        let section = AnimationConfig::section();
        assert_eq!(section.trigger_mode(), TriggerMode::Once);
        assert_eq!(section.duration, Duration::from_millis(600));

        let reveal = AnimationConfig::scroll_reveal();
        assert_eq!(reveal.trigger_mode(), TriggerMode::Toggle);
        assert_eq!(reveal.trigger_margin, TriggerMargin::ViewportFraction(0.8));

        let clamped = AnimationConfig::default().with_base_opacity(3.0).with_blur(-2.0);
        assert_eq!(clamped.base_opacity, 1.0);
        assert_eq!(clamped.blur_strength, 0.0);
    }

    #[test]
    fn test_root_margins() {
        assert_eq!(
            TriggerMargin::ViewportFraction(0.8).root_margin(),
            "-20% 0px -20% 0px"
        );
        assert_eq!(
            TriggerMargin::ViewportFraction(0.85).root_margin(),
            "-15% 0px -15% 0px"
        );
        assert_eq!(TriggerMargin::Inset(-100.0).root_margin(), "-100px 0px -100px 0px");
        assert_eq!(TriggerMargin::Inset(0.0).root_margin(), "0px 0px 0px 0px");
    }

    #[test]
    fn test_scroll_reveal_crossing_timings() {
        let config = AnimationConfig::scroll_reveal();
        let ms = Duration::from_millis;
        assert_eq!(
            config.timing(Crossing::Enter),
            PhaseTiming::new(ms(1200), ms(30), Easing::POWER3_OUT)
        );
        assert_eq!(
            config.timing(Crossing::Leave),
            PhaseTiming::new(ms(800), ms(20), Easing::POWER2_OUT)
        );
        assert_eq!(
            config.timing(Crossing::EnterBack),
            PhaseTiming::new(ms(1000), ms(20), Easing::POWER3_OUT)
        );
        assert_eq!(
            config.timing(Crossing::LeaveBack),
            PhaseTiming::new(ms(600), ms(10), Easing::POWER2_OUT)
        );
        assert_eq!(config.action(Crossing::Leave), CrossingAction::Reverse);
        assert_eq!(config.action(Crossing::EnterBack), CrossingAction::Play);
    }

    #[test]
    fn test_stat_plays_until_scrolled_back() {
        let config = AnimationConfig::stat();
        assert_eq!(config.trigger_mode(), TriggerMode::Toggle);
        assert_eq!(config.trigger_margin, TriggerMargin::ViewportFraction(0.8));
        assert_eq!(config.duration, Duration::from_secs(1));
        assert_eq!(config.distance, 20.0);
        assert_eq!(config.action(Crossing::Enter), CrossingAction::Play);
        assert_eq!(config.action(Crossing::Leave), CrossingAction::Ignore);
        assert_eq!(config.action(Crossing::EnterBack), CrossingAction::Ignore);
        assert_eq!(config.action(Crossing::LeaveBack), CrossingAction::Reverse);
        // no per-crossing override, reversing reuses the enter pace
        assert_eq!(config.timing(Crossing::LeaveBack), config.timing(Crossing::Enter));
    }

    #[test]
    fn test_once_ignores_later_crossings() {
        let config = AnimationConfig::card();
        assert_eq!(config.action(Crossing::Enter), CrossingAction::Play);
        assert_eq!(config.action(Crossing::Leave), CrossingAction::Ignore);
        assert_eq!(config.action(Crossing::LeaveBack), CrossingAction::Ignore);
    }

    #[test]
    fn test_parse_toggle_actions() {
        assert_eq!(
            "play none none reverse".parse::<ToggleActions>(),
            Ok(ToggleActions::PLAY_UNTIL_BACK)
        );
        assert_eq!(
            "play reverse play reverse".parse::<ToggleActions>(),
            Ok(ToggleActions::MIRROR)
        );
        assert_eq!(
            "play none".parse::<ToggleActions>(),
            Err(ActionParseError::WrongCount(2))
        );
        assert_eq!(
            "none none none reverse".parse::<ToggleActions>(),
            Err(ActionParseError::EnterMustPlay(CrossingAction::Ignore))
        );
        assert!(matches!(
            "play jump none reverse".parse::<ToggleActions>(),
            Err(ActionParseError::UnknownAction(_))
        ));
    }
}
