use std::{rc::Rc, time::Duration};

use leptos::{
    html::{self, ElementType},
    prelude::*,
};
use leptos_use::{
    use_intersection_observer_with_options, use_raf_fn_with_options, UseIntersectionObserverOptions,
    UseRafFnCallbackArgs, UseRafFnOptions,
};
use wasm_bindgen::JsCast;

use crate::motion::{
    AnimationConfig, AnimationContext, Crossing, ElementBounds, RevealMachine, StaggerGroup,
    StyleSnapshot,
};

/// `prefers-reduced-motion`, provided by the app shell.
#[derive(Debug, Clone, Copy)]
pub struct ReducedMotion(pub Signal<bool>);

/// Timestamp shared by every animation on the page.
pub fn page_clock() -> Duration {
    let millis = chrono::Utc::now().timestamp_millis().max(0) as u64;
    Duration::from_millis(millis)
}

fn viewport_height() -> f64 {
    window()
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or_default()
}

pub fn reduced_motion_signal() -> Signal<bool> {
    use_context::<ReducedMotion>()
        .map(|r| r.0)
        .unwrap_or_else(|| Signal::stored(false))
}

/// Calls `on_change` whenever `target` crosses its trigger boundary.
///
/// An intersection observer does the hit test, so layout shifts count as
/// well as scrolling. The registry subscription lives as long as the calling
/// component. Without an [`AnimationContext`] it reports an enter straight
/// away so content is never left hidden.
pub fn use_visibility<E, F>(target: NodeRef<E>, config: &AnimationConfig, on_change: F)
where
    E: ElementType + Clone + 'static,
    E::Output: JsCast + Into<web_sys::Element> + Clone + 'static,
    F: Fn(Crossing) + 'static,
{
    let Some(subscription) = use_context::<AnimationContext>().and_then(|ctx| ctx.subscribe(config))
    else {
        log::warn!("no animation context, showing content without animation");
        on_change(Crossing::Enter);
        return;
    };
    let subscription = StoredValue::new(Some(subscription));

    let _ = use_intersection_observer_with_options(
        target,
        move |entries: Vec<web_sys::IntersectionObserverEntry>, _| {
            let height = viewport_height();
            for entry in entries {
                let rect = entry.bounding_client_rect();
                let bounds = ElementBounds::new(rect.top(), rect.height());
                let hit = entry.is_intersecting();
                let crossing = subscription
                    .try_with_value(|s| s.as_ref().and_then(|s| s.record(hit, bounds, height)))
                    .flatten();
                if let Some(crossing) = crossing {
                    on_change(crossing);
                }
            }
        },
        UseIntersectionObserverOptions::default().root_margin(config.trigger_margin.root_margin()),
    );

    on_cleanup(move || {
        let _ = subscription.try_update_value(|s| s.take());
    });
}

/// Anything the reveal hooks can drive frame by frame.
pub trait Animated: Send + Sync + 'static {
    /// Returns true if there is something to animate now.
    fn cross(&mut self, crossing: Crossing, now: Duration) -> bool;
    /// Returns true while still animating.
    fn advance(&mut self, now: Duration) -> bool;
    fn snapshots(&self) -> Vec<StyleSnapshot>;
    fn set_reduced_motion(&mut self, reduced: bool);
    fn force_visible(&mut self);
}

impl Animated for RevealMachine {
    fn cross(&mut self, crossing: Crossing, now: Duration) -> bool {
        let delay = match crossing {
            Crossing::Enter => self.config().delay,
            _ => Duration::ZERO,
        };
        RevealMachine::cross(self, crossing, now, delay)
    }

    fn advance(&mut self, now: Duration) -> bool {
        self.tick(now);
        self.is_animating()
    }

    fn snapshots(&self) -> Vec<StyleSnapshot> {
        vec![*self.style()]
    }

    fn set_reduced_motion(&mut self, reduced: bool) {
        RevealMachine::set_reduced_motion(self, reduced);
    }

    fn force_visible(&mut self) {
        RevealMachine::force_visible(self);
    }
}

impl Animated for StaggerGroup {
    fn cross(&mut self, crossing: Crossing, now: Duration) -> bool {
        StaggerGroup::cross(self, crossing, now);
        self.is_animating()
    }

    fn advance(&mut self, now: Duration) -> bool {
        self.tick(now);
        self.is_animating()
    }

    fn snapshots(&self) -> Vec<StyleSnapshot> {
        self.children().iter().map(|c| *c.style()).collect()
    }

    fn set_reduced_motion(&mut self, reduced: bool) {
        StaggerGroup::set_reduced_motion(self, reduced);
    }

    fn force_visible(&mut self) {
        StaggerGroup::force_visible(self);
    }
}

/// Runs `animated` whenever `target` enters (or, in toggle mode, leaves)
/// view. The animation frame loop only runs while something moves.
pub fn use_animated<E, A>(
    target: NodeRef<E>,
    config: &AnimationConfig,
    animated: A,
) -> Signal<Vec<StyleSnapshot>>
where
    E: ElementType + Clone + 'static,
    E::Output: JsCast + Into<web_sys::Element> + Clone + 'static,
    A: Animated,
{
    let state = StoredValue::new(animated);
    let (styles, set_styles) = signal(state.with_value(|a| a.snapshots()));
    let publish = move || {
        if let Some(s) = state.try_with_value(|a| a.snapshots()) {
            set_styles.set(s);
        }
    };

    let stop_slot: StoredValue<Option<Rc<dyn Fn()>>, LocalStorage> = StoredValue::new_local(None);
    let raf = use_raf_fn_with_options(
        move |_: UseRafFnCallbackArgs| {
            let now = page_clock();
            let animating = state.try_update_value(|a| a.advance(now)).unwrap_or(false);
            publish();
            if !animating {
                stop_slot.with_value(|stop| {
                    if let Some(stop) = stop {
                        stop();
                    }
                });
            }
        },
        UseRafFnOptions::default().immediate(false),
    );
    let pause = raf.pause.clone();
    stop_slot.set_value(Some(Rc::new(move || pause())));

    let resume = raf.resume.clone();
    use_visibility(target, config, move |crossing| {
        let now = page_clock();
        if state
            .try_update_value(|a| a.cross(crossing, now))
            .unwrap_or(false)
        {
            resume();
        } else {
            publish();
        }
    });

    let reduced = reduced_motion_signal();
    Effect::new(move |_| {
        if reduced.get() {
            state.update_value(|a| a.set_reduced_motion(true));
            publish();
        }
    });

    // use_raf_fn cancels the pending frame itself when this owner is cleaned up
    styles.into()
}

pub fn use_reveal(target: NodeRef<html::Div>, config: AnimationConfig) -> Signal<StyleSnapshot> {
    let machine = match use_context::<AnimationContext>() {
        Some(ctx) => ctx.reveal_machine(config.clone()),
        None => {
            let mut machine = RevealMachine::new(config.clone());
            machine.force_visible();
            machine
        }
    };
    let styles = use_animated(target, &config, machine);
    Signal::derive(move || {
        styles
            .get()
            .first()
            .copied()
            .unwrap_or_else(StyleSnapshot::resting)
    })
}

pub fn use_stagger<E>(
    target: NodeRef<E>,
    config: AnimationConfig,
    len: usize,
) -> Signal<Vec<StyleSnapshot>>
where
    E: ElementType + Clone + 'static,
    E::Output: JsCast + Into<web_sys::Element> + Clone + 'static,
{
    let group = match use_context::<AnimationContext>() {
        Some(ctx) => ctx.stagger_group(config.clone(), len),
        None => {
            let mut group = StaggerGroup::new(config.clone(), len);
            group.force_visible();
            group
        }
    };
    use_animated(target, &config, group)
}

/// Plain "has been / is in view" flag for effects that only need a switch.
pub fn use_in_view(target: NodeRef<html::Div>, config: AnimationConfig) -> Signal<bool> {
    let (in_view, set_in_view) = signal(false);
    use_visibility(target, &config, move |c| set_in_view.set(c.in_view()));
    let reduced = reduced_motion_signal();
    Signal::derive(move || in_view.get() || reduced.get())
}
