use std::time::Duration;

use super::{
    config::{AnimationConfig, CrossingAction},
    reveal::{RevealMachine, RevealState},
    viewport::Crossing,
};

#[cfg(test)]
use super::reveal::StyleSnapshot;

/// Start offsets `base + i * step` for `n` children, in order.
pub fn stagger_offsets(n: usize, base: Duration, step: Duration) -> impl Iterator<Item = Duration> {
    (0..n).map(move |i| base + step * i as u32)
}

/// Ordered children sharing one config, revealed one after another.
///
/// Children are staggered in the order they were supplied, so callers pass
/// them already sorted the way they should appear.
#[derive(Debug, Clone)]
pub struct StaggerGroup {
    config: AnimationConfig,
    children: Vec<RevealMachine>,
    triggered_at: Option<Duration>,
}

impl StaggerGroup {
    pub fn new(config: AnimationConfig, len: usize) -> Self {
        let children = (0..len).map(|_| RevealMachine::new(config.clone())).collect();
        Self {
            config,
            children,
            triggered_at: None,
        }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn children(&self) -> &[RevealMachine] {
        &self.children
    }

    #[cfg(test)]
    pub fn child_style(&self, index: usize) -> Option<&StyleSnapshot> {
        self.children.get(index).map(RevealMachine::style)
    }

    #[cfg(test)]
    pub fn triggered_at(&self) -> Option<Duration> {
        self.triggered_at
    }

    /// Delay of child `index` relative to the moment the group fires.
    pub fn start_offset(&self, index: usize) -> Duration {
        self.config.delay + self.config.stagger_delay * index as u32
    }

    /// Time from the trigger until the last child is at rest.
    pub fn completion_time(&self) -> Duration {
        match self.children.len() {
            0 => Duration::ZERO,
            n => self.start_offset(n - 1) + self.config.duration,
        }
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        for child in &mut self.children {
            child.set_reduced_motion(reduced);
        }
    }

    pub fn force_visible(&mut self) {
        for child in &mut self.children {
            child.force_visible();
        }
    }

    /// Schedules every child. Firing again while already triggered is a no-op.
    pub fn trigger(&mut self, now: Duration) {
        if self.triggered_at.is_some() {
            return;
        }
        self.cross(Crossing::Enter, now);
    }

    pub fn set_in_view(&mut self, in_view: bool, now: Duration) {
        if in_view {
            self.trigger(now);
        } else if self.triggered_at.is_some() {
            self.cross(Crossing::Leave, now);
        }
    }

    /// Runs the crossing's action on every child, staggered by that
    /// crossing's step. Only a first enter waits for the configured delay.
    pub fn cross(&mut self, crossing: Crossing, now: Duration) {
        let action = self.config.action(crossing);
        if action == CrossingAction::Ignore {
            return;
        }
        let timing = self.config.timing(crossing);
        let base = match crossing {
            Crossing::Enter => self.config.delay,
            _ => Duration::ZERO,
        };
        let offsets = stagger_offsets(self.children.len(), base, timing.stagger);
        for (child, offset) in self.children.iter_mut().zip(offsets) {
            child.cross(crossing, now, offset);
        }
        self.triggered_at = match action {
            CrossingAction::Play => Some(now),
            _ => None,
        };
    }

    /// Advances every child. Returns true once all of them are visible.
    pub fn tick(&mut self, now: Duration) -> bool {
        for child in &mut self.children {
            child.tick(now);
        }
        self.all_visible()
    }

    pub fn all_visible(&self) -> bool {
        self.children
            .iter()
            .all(|c| c.state() == RevealState::Visible)
    }

    pub fn is_animating(&self) -> bool {
        self.children.iter().any(RevealMachine::is_animating)
    }

    /// Back to the unfired state; the next trigger replays the whole schedule.
    pub fn restart(&mut self) {
        for child in &mut self.children {
            child.reset();
        }
        self.triggered_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn group(len: usize) -> StaggerGroup {
        let config = AnimationConfig::default()
            .with_stagger(ms(100))
            .with_duration(ms(500))
            .with_delay(ms(0));
        StaggerGroup::new(config, len)
    }

    fn states(group: &StaggerGroup) -> Vec<RevealState> {
        group.children().iter().map(|c| c.state()).collect()
    }

    #[test]
    fn test_three_children_land_in_order() {
        let mut g = group(3);
        g.trigger(ms(0));

        g.tick(ms(499));
        assert!(states(&g).iter().all(|s| *s == RevealState::Revealing));

        g.tick(ms(500));
        assert_eq!(
            states(&g),
            vec![RevealState::Visible, RevealState::Revealing, RevealState::Revealing]
        );

        g.tick(ms(600));
        assert_eq!(
            states(&g),
            vec![RevealState::Visible, RevealState::Visible, RevealState::Revealing]
        );

        assert!(!g.tick(ms(699)));
        assert!(g.tick(ms(700)));
        assert_eq!(g.completion_time(), ms(700));
    }

    #[test]
    fn test_last_offset_scales_linearly() {
        for n in [1usize, 2, 10, 250, 5000] {
            let config = AnimationConfig::default()
                .with_delay(ms(300))
                .with_stagger(ms(40))
                .with_duration(ms(500));
            let g = StaggerGroup::new(config, n);
            let expected = ms(300 + 40 * (n as u64 - 1));
            assert_eq!(g.start_offset(n - 1), expected);
            assert_eq!(g.completion_time(), expected + ms(500));
            let offsets: Vec<_> = stagger_offsets(n, ms(300), ms(40)).collect();
            assert_eq!(offsets.last(), Some(&expected));
            assert!(offsets.windows(2).all(|w| w[0] <= w[1]));
        }
        assert_eq!(group(0).completion_time(), Duration::ZERO);
    }

    #[test]
    fn test_offsets_relative_to_trigger_time() {
        let mut g = group(2);
        g.tick(ms(10_000));
        assert!(states(&g).iter().all(|s| *s == RevealState::Hidden));

        g.trigger(ms(10_000));
        assert_eq!(g.triggered_at(), Some(ms(10_000)));
        g.tick(ms(10_500));
        assert_eq!(states(&g), vec![RevealState::Visible, RevealState::Revealing]);
    }

    #[test]
    fn test_retrigger_does_not_reschedule() {
        let mut g = group(2);
        g.trigger(ms(0));
        g.trigger(ms(400));
        assert!(g.tick(ms(600)));
    }

    #[test]
    fn test_restart_replays_from_the_beginning() {
        let mut g = group(3);
        g.trigger(ms(0));
        g.tick(ms(550));
        assert_eq!(states(&g)[0], RevealState::Visible);

        g.restart();
        assert!(states(&g).iter().all(|s| *s == RevealState::Hidden));
        assert_eq!(g.triggered_at(), None);
        assert!(!g.is_animating());

        g.trigger(ms(1000));
        assert!(!g.tick(ms(1650)));
        assert!(g.tick(ms(1700)));
    }

    #[test]
    fn test_toggle_group_conceals() {
        let config = AnimationConfig::default()
            .with_stagger(ms(100))
            .with_duration(ms(500))
            .toggle();
        let mut g = StaggerGroup::new(config, 2);
        g.set_in_view(true, ms(0));
        assert!(g.tick(ms(600)));

        g.set_in_view(false, ms(1000));
        g.tick(ms(1600));
        assert!(states(&g).iter().all(|s| *s == RevealState::Hidden));

        g.set_in_view(true, ms(2000));
        assert!(g.tick(ms(2600)));
    }

    #[test]
    fn test_fire_once_group_ignores_exit() {
        let mut g = group(2);
        g.set_in_view(true, ms(0));
        g.tick(ms(600));
        g.set_in_view(false, ms(700));
        assert!(g.tick(ms(5000)));
    }

    #[test]
    fn test_force_visible_skips_schedule() {
        let mut g = group(3);
        g.trigger(ms(0));
        g.force_visible();
        assert!(g.all_visible());
        assert!(!g.is_animating());
    }

    #[test]
    fn test_crossings_restagger_with_their_own_step() {
        let mut g = StaggerGroup::new(AnimationConfig::scroll_reveal(), 3);
        g.cross(Crossing::Enter, ms(0));
        // 30ms apart, 1200ms each
        assert!(!g.tick(ms(1259)));
        assert!(g.tick(ms(1260)));

        g.cross(Crossing::Leave, ms(2000));
        assert_eq!(g.triggered_at(), None);
        g.tick(ms(2820));
        assert_eq!(
            states(&g),
            vec![RevealState::Hidden, RevealState::Hidden, RevealState::Concealing]
        );
        g.tick(ms(2840));
        assert!(states(&g).iter().all(|s| *s == RevealState::Hidden));

        g.cross(Crossing::EnterBack, ms(3000));
        assert!(!g.tick(ms(4039)));
        assert!(g.tick(ms(4040)));

        g.cross(Crossing::LeaveBack, ms(5000));
        g.tick(ms(5620));
        assert!(states(&g).iter().all(|s| *s == RevealState::Hidden));
    }

    #[test]
    fn test_ignored_crossing_keeps_group_revealed() {
        let mut g = StaggerGroup::new(AnimationConfig::stat(), 2);
        g.cross(Crossing::Enter, ms(0));
        assert!(g.tick(ms(1100)));
        g.cross(Crossing::Leave, ms(1500));
        assert_eq!(g.triggered_at(), Some(ms(0)));
        assert!(g.tick(ms(3000)));
    }

    #[test]
    fn test_reduced_motion_shows_every_child() {
        let mut g = group(4);
        g.set_reduced_motion(true);
        assert!(g.all_visible());
        assert!(g.child_style(3).is_some_and(StyleSnapshot::is_resting));
    }
}
