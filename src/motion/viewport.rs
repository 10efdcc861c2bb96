use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use dashmap::DashMap;

use super::config::{TriggerMargin, TriggerMode};

/// Vertical extent of an element relative to the top of the viewport, in px.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElementBounds {
    pub top: f64,
    pub bottom: f64,
}

impl ElementBounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self {
            top,
            bottom: top + height,
        }
    }

    /// Same element after the page scrolled down by `dy` px.
    #[cfg(test)]
    pub fn scrolled(self, dy: f64) -> Self {
        Self {
            top: self.top - dy,
            bottom: self.bottom - dy,
        }
    }
}

/// One change of the "in view" signal, named after the scroll direction that
/// caused it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    /// Came into view from below, or for the first time.
    Enter,
    /// Scrolled out past the top.
    Leave,
    /// Came back into view from above.
    EnterBack,
    /// Scrolled out past the bottom.
    LeaveBack,
}

impl Crossing {
    pub fn in_view(self) -> bool {
        matches!(self, Self::Enter | Self::EnterBack)
    }

    /// Names a change by which half of the viewport the element's centre is in.
    pub fn from_change(in_view: bool, bounds: ElementBounds, viewport_height: f64) -> Self {
        let above = bounds.top + bounds.bottom < viewport_height;
        match (in_view, above) {
            (true, false) => Self::Enter,
            (true, true) => Self::EnterBack,
            (false, true) => Self::Leave,
            (false, false) => Self::LeaveBack,
        }
    }
}

/// Turns successive element positions into an "in view" signal.
#[derive(Debug, Clone)]
pub struct VisibilityDetector {
    mode: TriggerMode,
    margin: TriggerMargin,
    in_view: bool,
    entered: bool,
}

impl VisibilityDetector {
    pub fn new(mode: TriggerMode, margin: TriggerMargin) -> Self {
        Self {
            mode,
            margin,
            in_view: false,
            entered: false,
        }
    }

    pub fn in_view(&self) -> bool {
        self.in_view
    }

    /// Feeds a new position. Returns a crossing only if the signal changed.
    pub fn observe(&mut self, bounds: ElementBounds, viewport_height: f64) -> Option<Crossing> {
        let hit = self.margin.intersects(bounds, viewport_height);
        self.record(hit, bounds, viewport_height)
    }

    /// Like [`observe`](Self::observe) for a hit test already done elsewhere,
    /// such as by an intersection observer using [`TriggerMargin::root_margin`].
    pub fn record(
        &mut self,
        hit: bool,
        bounds: ElementBounds,
        viewport_height: f64,
    ) -> Option<Crossing> {
        let next = match self.mode {
            TriggerMode::Once => self.in_view || hit,
            TriggerMode::Toggle => hit,
        };
        if next == self.in_view {
            return None;
        }
        self.in_view = next;
        if next && !self.entered {
            self.entered = true;
            return Some(Crossing::Enter);
        }
        Some(Crossing::from_change(next, bounds, viewport_height))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Debug, Default)]
struct RegistryInner {
    next_id: AtomicU64,
    entries: DashMap<SubscriptionId, VisibilityDetector>,
}

/// Page wide set of live visibility subscriptions.
///
/// Entries can only be reached through the [`Subscription`] that created
/// them, and they disappear when that guard is dropped.
#[derive(Debug, Clone, Default)]
pub struct ObserverRegistry {
    inner: Arc<RegistryInner>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, mode: TriggerMode, margin: TriggerMargin) -> Subscription {
        let id = SubscriptionId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        self.inner
            .entries
            .insert(id, VisibilityDetector::new(mode, margin));
        log::trace!("visibility subscription {id:?} registered");
        Subscription {
            id,
            registry: Arc::clone(&self.inner),
        }
    }

    pub fn active_count(&self) -> usize {
        self.inner.entries.len()
    }

    #[cfg(test)]
    pub fn is_registered(&self, id: SubscriptionId) -> bool {
        self.inner.entries.contains_key(&id)
    }

    /// Drops every entry. Guards still held afterwards become inert.
    pub fn clear(&self) {
        let leaked = self.inner.entries.len();
        if leaked > 0 {
            log::debug!("clearing {leaked} visibility subscriptions on teardown");
        }
        self.inner.entries.clear();
    }
}

/// Scoped handle to one registry entry. Dropping it deregisters.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    registry: Arc<RegistryInner>,
}

impl Subscription {
    #[cfg(test)]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// See [`VisibilityDetector::observe`]. A no-op once the registry was cleared.
    #[cfg(test)]
    pub fn observe(&self, bounds: ElementBounds, viewport_height: f64) -> Option<Crossing> {
        self.registry
            .entries
            .get_mut(&self.id)
            .and_then(|mut detector| detector.observe(bounds, viewport_height))
    }

    /// See [`VisibilityDetector::record`]. A no-op once the registry was cleared.
    pub fn record(
        &self,
        hit: bool,
        bounds: ElementBounds,
        viewport_height: f64,
    ) -> Option<Crossing> {
        self.registry
            .entries
            .get_mut(&self.id)
            .and_then(|mut detector| detector.record(hit, bounds, viewport_height))
    }

    pub fn in_view(&self) -> bool {
        self.registry
            .entries
            .get(&self.id)
            .map(|d| d.in_view())
            .unwrap_or(false)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.registry.entries.remove(&self.id);
        log::trace!("visibility subscription {:?} released", self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::AssertUnwindSafe;

    const VIEWPORT: f64 = 1000.0;

    // element starts one and a half viewports down the page
    fn element() -> ElementBounds {
        ElementBounds::new(1500.0, 300.0)
    }

    // scroll positions that bring the element in, out past the top, then back in
    fn signals(detector: &mut VisibilityDetector, scrolls: &[f64]) -> Vec<bool> {
        let mut seen = vec![detector.in_view()];
        for dy in scrolls {
            if let Some(c) = detector.observe(element().scrolled(*dy), VIEWPORT) {
                seen.push(c.in_view());
            }
        }
        seen
    }

    #[test]
    fn test_fire_once_never_resets() {
        let mut detector = VisibilityDetector::new(TriggerMode::Once, TriggerMargin::Inset(0.0));
        let seen = signals(&mut detector, &[0.0, 800.0, 1200.0, 3000.0, 0.0, 800.0]);
        assert_eq!(seen, vec![false, true]);
        assert!(detector.in_view());
    }

    #[test]
    fn test_toggle_follows_crossings() {
        let mut detector =
            VisibilityDetector::new(TriggerMode::Toggle, TriggerMargin::Inset(0.0));
        let seen = signals(&mut detector, &[0.0, 800.0, 900.0, 3000.0, 1000.0]);
        assert_eq!(seen, vec![false, true, false, true]);
    }

    #[test]
    fn test_toggle_with_viewport_fraction() {
        let mut detector = VisibilityDetector::new(
            TriggerMode::Toggle,
            TriggerMargin::ViewportFraction(0.8),
        );
        // top at 750 crosses the 80% line
        assert_eq!(
            detector.observe(element().scrolled(750.0), VIEWPORT),
            Some(Crossing::Enter)
        );
        // bottom above the 20% line
        assert_eq!(
            detector.observe(element().scrolled(1700.0), VIEWPORT),
            Some(Crossing::Leave)
        );
        assert_eq!(
            detector.observe(element().scrolled(1400.0), VIEWPORT),
            Some(Crossing::EnterBack)
        );
        assert_eq!(detector.observe(element().scrolled(1300.0), VIEWPORT), None);
        // top back below the 80% line
        assert_eq!(
            detector.observe(element().scrolled(600.0), VIEWPORT),
            Some(Crossing::LeaveBack)
        );
        assert_eq!(
            detector.observe(element().scrolled(800.0), VIEWPORT),
            Some(Crossing::Enter)
        );
    }

    #[test]
    fn test_subscription_released_on_drop() {
        let registry = ObserverRegistry::new();
        let first = registry.subscribe(TriggerMode::Once, TriggerMargin::default());
        let second = registry.subscribe(TriggerMode::Toggle, TriggerMargin::default());
        assert_ne!(first.id(), second.id());
        assert_eq!(registry.active_count(), 2);

        let first_id = first.id();
        drop(first);
        assert_eq!(registry.active_count(), 1);
        assert!(!registry.is_registered(first_id));
        assert!(registry.is_registered(second.id()));

        drop(second);
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn test_subscriptions_are_independent() {
        let registry = ObserverRegistry::new();
        let a = registry.subscribe(TriggerMode::Toggle, TriggerMargin::default());
        let b = registry.subscribe(TriggerMode::Toggle, TriggerMargin::default());
        assert_eq!(
            a.observe(element().scrolled(1000.0), VIEWPORT),
            Some(Crossing::Enter)
        );
        assert!(a.in_view());
        assert!(!b.in_view());
    }

    #[test]
    fn test_released_on_panic_during_setup() {
        let registry = ObserverRegistry::new();
        let r = registry.clone();
        let result = std::panic::catch_unwind(AssertUnwindSafe(move || {
            let _sub = r.subscribe(TriggerMode::Once, TriggerMargin::default());
            panic!("setup failed");
        }));
        assert!(result.is_err());
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn test_cleared_registry_makes_guards_inert() {
        let registry = ObserverRegistry::new();
        let sub = registry.subscribe(TriggerMode::Once, TriggerMargin::default());
        registry.clear();
        assert_eq!(registry.active_count(), 0);
        assert_eq!(sub.observe(element().scrolled(1000.0), VIEWPORT), None);
        assert_eq!(sub.record(true, element(), VIEWPORT), None);
        assert!(!sub.in_view());
    }

    #[test]
    fn test_first_entry_from_above_is_an_enter() {
        // page restored scrolled past the element
        let mut detector =
            VisibilityDetector::new(TriggerMode::Toggle, TriggerMargin::Inset(0.0));
        let above = ElementBounds::new(-200.0, 300.0);
        assert_eq!(detector.record(true, above, VIEWPORT), Some(Crossing::Enter));
        assert_eq!(
            detector.record(false, ElementBounds::new(-400.0, 300.0), VIEWPORT),
            Some(Crossing::Leave)
        );
        assert_eq!(detector.record(true, above, VIEWPORT), Some(Crossing::EnterBack));
    }

    #[test]
    fn test_recorded_hits_follow_mode() {
        let mut once = VisibilityDetector::new(TriggerMode::Once, TriggerMargin::Inset(-50.0));
        assert_eq!(once.record(true, element(), VIEWPORT), Some(Crossing::Enter));
        assert_eq!(once.record(false, element(), VIEWPORT), None);
        assert!(once.in_view());

        let registry = ObserverRegistry::new();
        let sub = registry.subscribe(TriggerMode::Toggle, TriggerMargin::Inset(-50.0));
        assert_eq!(sub.record(true, element(), VIEWPORT), Some(Crossing::Enter));
        assert_eq!(sub.record(false, element(), VIEWPORT), Some(Crossing::LeaveBack));
    }

    #[test]
    fn test_crossing_names() {
        let h = VIEWPORT;
        let below = ElementBounds::new(700.0, 200.0);
        let above = ElementBounds::new(50.0, 200.0);
        assert_eq!(Crossing::from_change(true, below, h), Crossing::Enter);
        assert_eq!(Crossing::from_change(true, above, h), Crossing::EnterBack);
        assert_eq!(Crossing::from_change(false, above, h), Crossing::Leave);
        assert_eq!(Crossing::from_change(false, below, h), Crossing::LeaveBack);
        assert!(Crossing::EnterBack.in_view());
        assert!(!Crossing::LeaveBack.in_view());
    }
}
