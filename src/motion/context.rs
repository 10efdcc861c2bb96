use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use super::{
    config::AnimationConfig,
    reveal::RevealMachine,
    stagger::StaggerGroup,
    viewport::{ObserverRegistry, Subscription},
};

/// Shared animation state for one page, created by the app shell and handed
/// to components through context.
///
/// Lifecycle is explicit: [`AnimationContext::init`] when the shell mounts,
/// [`AnimationContext::teardown`] when it unmounts. After teardown no new
/// subscriptions are handed out.
#[derive(Debug, Clone)]
pub struct AnimationContext {
    registry: ObserverRegistry,
    reduced_motion: Arc<AtomicBool>,
    active: Arc<AtomicBool>,
}

impl AnimationContext {
    pub fn init(reduced_motion: bool) -> Self {
        log::debug!("animation context up, reduced motion: {reduced_motion}");
        Self {
            registry: ObserverRegistry::new(),
            reduced_motion: Arc::new(AtomicBool::new(reduced_motion)),
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion.load(Ordering::Relaxed)
    }

    pub fn set_reduced_motion(&self, reduced: bool) {
        self.reduced_motion.store(reduced, Ordering::Relaxed);
    }

    pub fn registry(&self) -> &ObserverRegistry {
        &self.registry
    }

    pub fn subscribe(&self, config: &AnimationConfig) -> Option<Subscription> {
        if !self.is_active() {
            log::warn!("visibility subscription requested after teardown");
            return None;
        }
        Some(
            self.registry
                .subscribe(config.trigger_mode(), config.trigger_margin),
        )
    }

    pub fn reveal_machine(&self, config: AnimationConfig) -> RevealMachine {
        let mut machine = RevealMachine::new(config);
        if self.reduced_motion() {
            machine.set_reduced_motion(true);
        }
        machine
    }

    pub fn stagger_group(&self, config: AnimationConfig, len: usize) -> StaggerGroup {
        let mut group = StaggerGroup::new(config, len);
        if self.reduced_motion() {
            group.set_reduced_motion(true);
        }
        group
    }

    pub fn teardown(&self) {
        if self.active.swap(false, Ordering::AcqRel) {
            let live = self.registry.active_count();
            self.registry.clear();
            log::debug!("animation context torn down, {live} subscriptions released");
        }
    }
}
