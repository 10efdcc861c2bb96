use std::{sync::Arc, time::Duration};

use leptos::{either::Either, prelude::*};
use leptos_meta::Title;

use crate::{
    content::{PersonalInfo, SiteContent},
    motion::{AnimationConfig, DecryptOptions, Direction, RevealDirection, SplitMode},
    navigation::{open_external, scroll_to_section, whatsapp_link},
};

use super::{
    animated::{DecryptedText, Reveal, ScrollRevealText},
    contact::ContactSection,
    experience::ExperienceSection,
    hooks::reduced_motion_signal,
    navbar::Navbar,
    sections::{Projects, Services, Skills, Stats, Testimonials},
};

const PITCH: &str = "I help companies transform their digital presence by building scalable, \
accessible, and high-performance web applications that deliver exceptional user experiences \
and robust business value.";

const EXPERTISE: &str = "With over 2+ years of experience in web development, I've successfully \
delivered 15+ projects across various industries, specializing in modern React ecosystem, cloud \
architecture, and scalable full-stack solutions that drive business growth.";

/// Tilted, blurred start for the scroll revealed text bands.
fn band(rotation: f64, blur: f64) -> AnimationConfig {
    AnimationConfig::scroll_reveal().with_rotation(rotation).with_blur(blur)
}

/// Words or letters that also slide and grow in.
fn sliding_band(rotation: f64, blur: f64, direction: Direction, stagger_ms: u64) -> AnimationConfig {
    let distance = match direction {
        Direction::Up | Direction::Down => 30.0,
        Direction::Left | Direction::Right => 50.0,
    };
    band(rotation, blur)
        .with_direction(direction)
        .with_distance(distance)
        .with_scale(0.8)
        .with_stagger(Duration::from_millis(stagger_ms))
}

/// Decorative gradient layer behind the page. Purely visual.
#[component]
pub fn Backdrop() -> impl IntoView {
    let reduced = reduced_motion_signal();
    view! {
        <div
            aria-hidden="true"
            class="backdrop pointer-events-none fixed inset-0 -z-10"
            class:backdrop-still=move || reduced.get()
        ></div>
    }
}

#[component]
fn Hero(info: PersonalInfo) -> impl IntoView {
    let reduced = reduced_motion_signal();
    let chat = whatsapp_link(&info.contact.whatsapp, &info.contact.whatsapp_message);
    let cv = info.cv.path.clone();
    let title_options = DecryptOptions::default()
        .with_speed(Duration::from_millis(40))
        .with_direction(RevealDirection::Center);

    view! {
        <section id="hero" class="flex min-h-screen flex-col items-center justify-center text-center">
            <Reveal config=AnimationConfig::title()>
                <p class="text-muted">"Hi, I'm"</p>
                <h1 class="mt-2 text-5xl font-bold md:text-7xl">
                    <DecryptedText text=info.name.clone() encrypted_class="text-muted" />
                </h1>
            </Reveal>
            <Reveal config=AnimationConfig::title().with_delay(Duration::from_millis(300))>
                <h2 class="mt-4 text-2xl text-cyan md:text-3xl">
                    <DecryptedText
                        text=info.title.clone()
                        options=title_options
                        encrypted_class="text-muted"
                    />
                </h2>
                <p class="mx-auto mt-6 max-w-2xl text-muted">{info.bio}</p>
            </Reveal>
            <Reveal
                config=AnimationConfig::section().with_delay(Duration::from_millis(600))
                class="mt-10 flex flex-wrap justify-center gap-4"
            >
                <a href=cv download="" class="btn-primary">
                    "Download CV"
                </a>
                <button class="btn-secondary" on:click=move |_| open_external(&chat)>
                    "Contact Me"
                </button>
            </Reveal>
            <button
                class="mt-16 animate-bounce"
                aria-label="Scroll down"
                on:click=move |_| {
                    scroll_to_section("stats", reduced.get_untracked());
                }
            >
                "↓"
            </button>
        </section>
    }
}

#[component]
fn Footer(info: Option<PersonalInfo>) -> impl IntoView {
    let name = info.as_ref().map(|i| i.name.clone()).unwrap_or_default();
    let social = info.map(|i| i.social);
    view! {
        <footer class="border-t border-muted/30 py-8 text-center text-sm text-muted">
            {social
                .map(|s| {
                    let links = [
                        ("GitHub", s.github),
                        ("LinkedIn", s.linkedin),
                        ("Twitter", s.twitter),
                        ("Instagram", s.instagram),
                    ];
                    view! {
                        <div class="mb-4 flex justify-center gap-4">
                            {links
                                .into_iter()
                                .filter(|(_, url)| !url.is_empty())
                                .map(|(label, url)| {
                                    view! {
                                        <a href=url target="_blank" rel="noopener noreferrer">
                                            {label}
                                        </a>
                                    }
                                })
                                .collect_view()}
                        </div>
                    }
                })}
            <p>{format!("© {name}")}</p>
            <p class="mt-1">"Built at " {env!("BUILD_TIME")}</p>
        </footer>
    }
}

/// The whole single page. Renders without content if it failed to load.
#[component]
pub fn HomePage(content: Option<Arc<SiteContent>>) -> impl IntoView {
    let Some(content) = content else {
        return Either::Left(view! {
            <Title text="Portfolio" />
            <Backdrop />
            <main class="flex min-h-screen items-center justify-center">
                <p class="text-muted">"Content is unavailable right now."</p>
            </main>
            <Footer info=None />
        });
    };
    let SiteContent {
        personal_info,
        services,
        skills,
        projects,
        stats,
        experience,
        navigation,
        testimonials,
    } = (*content).clone();

    Either::Right(view! {
        <Title text=personal_info.title.clone() />
        <Backdrop />
        <Navbar links=navigation info=Some(personal_info.clone()) />
        <main class="mx-auto w-full max-w-7xl px-4">
            <Hero info=personal_info.clone() />
            <section class="py-16">
                <ScrollRevealText
                    text=PITCH
                    config=band(5.0, 10.0)
                    class="mx-auto max-w-4xl text-center text-xl text-muted md:text-2xl"
                />
            </section>
            <Stats stats />
            <section class="py-16">
                <ScrollRevealText
                    text=EXPERTISE
                    config=band(-2.0, 8.0)
                    class="mx-auto max-w-5xl text-center text-lg leading-relaxed text-muted md:text-xl"
                />
            </section>
            <h2 class="mx-auto max-w-3xl pt-20 text-center text-2xl font-bold md:text-3xl">
                <ScrollRevealText
                    text="What I Do Best"
                    mode=SplitMode::Words
                    config=sliding_band(3.0, 8.0, Direction::Up, 80)
                />
            </h2>
            <Services services />
            <h2 class="mx-auto max-w-4xl pt-20 text-center text-2xl font-bold md:text-3xl">
                <ScrollRevealText text="Featured Projects & Portfolio" config=band(4.0, 12.0) />
            </h2>
            <Projects projects />
            <h2 class="mx-auto max-w-3xl pt-20 text-center text-2xl font-bold text-cyan md:text-3xl">
                <ScrollRevealText
                    text="Technical Expertise & Skills"
                    config=sliding_band(-3.0, 10.0, Direction::Right, 30)
                />
            </h2>
            <Skills skills />
            <h2 class="mx-auto max-w-4xl pt-20 text-center text-2xl font-bold md:text-3xl">
                <ScrollRevealText text="Professional Journey & Background" config=band(5.0, 15.0) />
            </h2>
            <ExperienceSection experience />
            <Testimonials testimonials />
            <ContactSection contact=Some(personal_info.contact.clone()) />
        </main>
        <Footer info=Some(personal_info) />
    })
}
