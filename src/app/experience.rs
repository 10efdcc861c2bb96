use leptos::prelude::*;

use crate::{
    content::{Experience, ExperienceItem, ExperienceTab},
    motion::AnimationConfig,
};

use super::animated::{Reveal, StaggeredList};

#[component]
fn TimelineEntry(item: ExperienceItem) -> impl IntoView {
    view! {
        <div class="relative border-l-2 border-cyan/40 pl-6" data-icon=item.icon>
            <span class="absolute -left-[9px] top-1 h-4 w-4 rounded-full bg-cyan"></span>
            <h3 class="text-lg font-semibold">{item.title}</h3>
            <div class="text-sm text-muted">{item.company} " · " {item.period}</div>
            <ul class="mt-3 list-disc space-y-1 pl-4">
                {item.description.into_iter().map(|d| view! { <li>{d}</li> }).collect_view()}
            </ul>
        </div>
    }
}

/// Work, education and organisation timelines behind a tab bar.
#[component]
pub fn ExperienceSection(experience: Experience) -> impl IntoView {
    let (active, set_active) = signal(ExperienceTab::default());

    let tabs = ExperienceTab::ALL
        .into_iter()
        .map(|tab| {
            view! {
                <button
                    class="tab"
                    class:tab-active=move || active.get() == tab
                    on:click=move |_| set_active.set(tab)
                >
                    {tab.label()}
                </button>
            }
        })
        .collect_view();

    // each tab mounts a fresh list so its entries stagger in again
    let timeline = move || {
        let entries = experience.entries(active.get()).to_vec();
        if entries.is_empty() {
            return view! { <p class="text-center text-muted">"Nothing here yet."</p> }.into_any();
        }
        view! {
            <StaggeredList
                items=entries
                config=AnimationConfig::card()
                class="space-y-8"
                render=|_, item: ExperienceItem| view! { <TimelineEntry item /> }.into_any()
            />
        }
        .into_any()
    };

    view! {
        <section id="experience" class="py-20">
            <Reveal config=AnimationConfig::title() class="mb-12 text-center">
                <h2 class="text-3xl font-bold md:text-4xl">"Experience"</h2>
            </Reveal>
            <div class="mb-10 flex justify-center gap-2" role="tablist">
                {tabs}
            </div>
            <div class="mx-auto max-w-3xl">{timeline}</div>
        </section>
    }
}
