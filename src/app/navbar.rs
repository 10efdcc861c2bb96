use leptos::{ev, prelude::*};
use leptos_use::{use_event_listener, use_window};

use crate::{
    content::{NavLink, PersonalInfo},
    navigation::{is_scrolled, open_external, scroll_to_section, section_id, whatsapp_link},
};

use super::hooks::reduced_motion_signal;

fn scroll_y() -> f64 {
    window().scroll_y().unwrap_or_default()
}

#[component]
pub fn Navbar(links: Vec<NavLink>, info: Option<PersonalInfo>) -> impl IntoView {
    let (scrolled, set_scrolled) = signal(false);
    let (menu_open, set_menu_open) = signal(false);
    let reduced = reduced_motion_signal();

    let _ = use_event_listener(use_window(), ev::scroll, move |_| {
        let now = is_scrolled(scroll_y());
        if now != scrolled.get_untracked() {
            set_scrolled.set(now);
        }
    });

    let go_to = move |href: String| {
        set_menu_open.set(false);
        scroll_to_section(section_id(&href), reduced.get_untracked());
    };

    let (brand, chat) = match &info {
        Some(info) => (
            info.name.clone(),
            Some(whatsapp_link(
                &info.contact.whatsapp,
                &info.contact.whatsapp_message,
            )),
        ),
        None => ("Portfolio".to_string(), None),
    };

    let link_list = move |class: &'static str| {
        links
            .iter()
            .cloned()
            .map(|link| {
                let href = link.href.clone();
                view! {
                    <a
                        href=link.href
                        class=class
                        on:click=move |ev| {
                            ev.prevent_default();
                            go_to(href.clone());
                        }
                    >
                        {link.label}
                    </a>
                }
            })
            .collect_view()
    };
    let desktop_links = link_list("nav-link");
    let mobile_links = link_list("nav-link block py-2");

    let contact_button = chat.map(|url| {
        view! {
            <button
                class="nav-cta"
                on:click=move |_| {
                    set_menu_open.set(false);
                    open_external(&url);
                }
            >
                "Let's Talk"
            </button>
        }
    });

    view! {
        <header class=move || {
            if scrolled.get() { "navbar navbar-scrolled" } else { "navbar" }
        }>
            <nav class="mx-auto flex max-w-7xl items-center justify-between px-4 py-4">
                <a
                    href="#hero"
                    class="text-xl font-bold"
                    on:click=move |ev| {
                        ev.prevent_default();
                        go_to("#hero".to_string());
                    }
                >
                    {brand}
                </a>
                <div class="hidden md:flex items-center gap-6">{desktop_links}</div>
                <div class="flex items-center gap-4">
                    {contact_button}
                    <button
                        class="md:hidden"
                        aria-label="Toggle menu"
                        aria-expanded=move || menu_open.get().to_string()
                        on:click=move |_| set_menu_open.update(|open| *open = !*open)
                    >
                        {move || if menu_open.get() { "✕" } else { "☰" }}
                    </button>
                </div>
            </nav>
            <div class="md:hidden px-4 pb-4" class:hidden=move || !menu_open.get()>
                {mobile_links}
            </div>
        </header>
    }
}
