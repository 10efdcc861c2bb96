use std::time::Duration;

use leptos::{either::Either, html, prelude::*};

use crate::{
    content::{Project, Service, Skill, Stat, Testimonial},
    motion::{
        counter::{stat_delay, LABEL_LAG},
        AnimationConfig, CountUp, Direction,
    },
    navigation::open_external,
};

use super::{
    animated::{Reveal, StaggeredList},
    hooks::{use_in_view, use_reveal},
};

#[component]
fn SectionTitle(#[prop(into)] title: String, #[prop(into)] subtitle: String) -> impl IntoView {
    view! {
        <Reveal config=AnimationConfig::title() class="mb-12 text-center">
            <h2 class="text-3xl font-bold md:text-4xl">{title}</h2>
            <p class="mt-4 text-muted">{subtitle}</p>
        </Reveal>
    }
}

fn stat_number_config(index: usize) -> AnimationConfig {
    AnimationConfig::stat().with_delay(stat_delay(index))
}

fn stat_label_config(index: usize) -> AnimationConfig {
    AnimationConfig::stat()
        .with_distance(10.0)
        .with_duration(Duration::from_millis(800))
        .with_delay(stat_delay(index) + LABEL_LAG)
}

/// One stat whose number counts up as it fades in.
#[component]
pub fn StatCounter(stat: Stat, index: usize) -> impl IntoView {
    let number_ref = NodeRef::<html::Div>::new();
    let label_ref = NodeRef::<html::Div>::new();
    let number_style = use_reveal(number_ref, stat_number_config(index));
    let label_style = use_reveal(label_ref, stat_label_config(index));

    let counter = match stat.value.parse::<CountUp>() {
        Ok(counter) => Some(counter),
        Err(e) => {
            log::debug!("{e}, showing it as is");
            None
        }
    };
    let raw = stat.value.clone();
    let text = move || match &counter {
        Some(counter) => counter.frame(number_style.get().opacity),
        None => raw.clone(),
    };

    view! {
        <div class="stat text-center">
            <div
                node_ref=number_ref
                class="reveal text-4xl font-bold text-cyan"
                style=move || number_style.get().to_css()
            >
                {text}
            </div>
            <div
                node_ref=label_ref
                class="reveal mt-2 text-sm text-muted"
                style=move || label_style.get().to_css()
            >
                {stat.label}
            </div>
        </div>
    }
}

#[component]
pub fn Stats(stats: Vec<Stat>) -> impl IntoView {
    view! {
        <section id="stats" class="py-12">
            <div class="mx-auto grid max-w-5xl grid-cols-2 gap-8 md:grid-cols-4">
                {stats
                    .into_iter()
                    .enumerate()
                    .map(|(index, stat)| view! { <StatCounter stat index /> })
                    .collect_view()}
            </div>
        </section>
    }
}

#[component]
pub fn Services(services: Vec<Service>) -> impl IntoView {
    view! {
        <section id="services" class="py-20">
            <SectionTitle title="Services" subtitle="What I can build for you" />
            <StaggeredList
                items=services
                class="grid gap-6 md:grid-cols-2 lg:grid-cols-3"
                item_class="card"
                render=|_, service: Service| {
                    view! {
                        <div class="p-6" data-icon=service.icon>
                            <h3 class="text-xl font-semibold">{service.title}</h3>
                            <p class="mt-3 text-muted">{service.description}</p>
                        </div>
                    }
                        .into_any()
                }
            />
        </section>
    }
}

fn project_link(label: &'static str, url: String) -> impl IntoView {
    if url.trim().is_empty() || url == "#" {
        Either::Left(())
    } else {
        Either::Right(view! {
            <button class="project-link" on:click=move |_| open_external(&url)>
                {label}
            </button>
        })
    }
}

#[component]
pub fn Projects(projects: Vec<Project>) -> impl IntoView {
    view! {
        <section id="projects" class="py-20">
            <SectionTitle title="Projects" subtitle="A few things I have shipped" />
            <StaggeredList
                items=projects
                config=AnimationConfig::card().with_scale(0.95)
                class="grid gap-8 md:grid-cols-2"
                item_class="card overflow-hidden"
                render=|_, project: Project| {
                    view! {
                        <img src=project.image alt=project.title.clone() class="h-48 w-full object-cover" />
                        <div class="p-6">
                            <h3 class="text-xl font-semibold">{project.title}</h3>
                            <p class="mt-3 text-muted">{project.description}</p>
                            <ul class="mt-4 flex flex-wrap gap-2">
                                {project
                                    .tags
                                    .into_iter()
                                    .map(|tag| view! { <li class="tag">{tag}</li> })
                                    .collect_view()}
                            </ul>
                            <div class="mt-4 flex gap-4">
                                {project_link("Live Demo", project.demo_link)}
                                {project_link("Source", project.github_link)}
                            </div>
                        </div>
                    }
                        .into_any()
                }
            />
        </section>
    }
}

/// Horizontal bar that fills to the skill level once in view.
#[component]
pub fn SkillBar(skill: Skill, index: usize) -> impl IntoView {
    let target = NodeRef::<html::Div>::new();
    let config = AnimationConfig::card().with_delay(stat_delay(index) / 2);
    let in_view = use_in_view(target, config);
    let width = skill.width_percent();
    view! {
        <div node_ref=target class="skill">
            <div class="flex justify-between text-sm">
                <span>{skill.name}</span>
                <span>{format!("{width}%")}</span>
            </div>
            <div class="mt-2 h-2 w-full rounded-full bg-brightBlack/30">
                <div
                    class="skill-fill h-2 rounded-full bg-cyan"
                    style=move || {
                        let w = if in_view.get() { width } else { 0 };
                        format!("width: {w}%;")
                    }
                ></div>
            </div>
        </div>
    }
}

#[component]
pub fn Skills(skills: Vec<Skill>) -> impl IntoView {
    view! {
        <section id="skills" class="py-20">
            <SectionTitle title="Skills" subtitle="Tools I reach for" />
            <Reveal config=AnimationConfig::section().with_direction(Direction::Left)>
                <div class="mx-auto grid max-w-4xl gap-6 md:grid-cols-2">
                    {skills
                        .into_iter()
                        .enumerate()
                        .map(|(index, skill)| view! { <SkillBar skill index /> })
                        .collect_view()}
                </div>
            </Reveal>
        </section>
    }
}

#[component]
pub fn Testimonials(testimonials: Vec<Testimonial>) -> impl IntoView {
    view! {
        <section id="testimonials" class="py-20">
            <SectionTitle title="Testimonials" subtitle="What clients say" />
            <StaggeredList
                items=testimonials
                config=AnimationConfig::card()
                class="grid gap-6 md:grid-cols-3"
                item_class="card p-6"
                render=|_, t: Testimonial| {
                    view! {
                        <blockquote class="italic">{format!("\u{201c}{}\u{201d}", t.content)}</blockquote>
                        <div class="mt-4 flex items-center gap-3">
                            <img src=t.image alt=t.author.clone() class="h-10 w-10 rounded-full" />
                            <div>
                                <div class="font-semibold">{t.author}</div>
                                <div class="text-sm text-muted">{t.position}</div>
                            </div>
                        </div>
                    }
                        .into_any()
                }
            />
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::{Crossing, CrossingAction, TriggerMargin};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_stat_number_and_label_timings() {
        let number = stat_number_config(2);
        assert_eq!(number.delay, ms(400));
        assert_eq!(number.duration, ms(1000));
        assert_eq!(number.distance, 20.0);

        let label = stat_label_config(2);
        assert_eq!(label.delay, ms(700));
        assert_eq!(label.duration, ms(800));
        assert_eq!(label.distance, 10.0);
    }

    #[test]
    fn test_stats_reverse_only_on_scroll_back() {
        for config in [stat_number_config(0), stat_label_config(3)] {
            assert_eq!(config.trigger_margin, TriggerMargin::ViewportFraction(0.8));
            assert_eq!(config.action(Crossing::Leave), CrossingAction::Ignore);
            assert_eq!(config.action(Crossing::EnterBack), CrossingAction::Ignore);
            assert_eq!(config.action(Crossing::LeaveBack), CrossingAction::Reverse);
        }
    }
}
