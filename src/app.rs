mod animated;
mod contact;
mod experience;
mod homepage;
mod hooks;
mod navbar;
mod sections;

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{components::*, path};
use leptos_use::use_media_query;

use crate::{content::site_content, motion::AnimationContext};

use homepage::{Backdrop, HomePage};
pub use hooks::ReducedMotion;

/// Animated nodes are server rendered in their hidden pose. Without
/// scripts nothing would ever reveal them.
const NOSCRIPT_CSS: &str =
    ".reveal { opacity: 1 !important; transform: none !important; filter: none !important; }";

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <meta name="color-scheme" content="dark" />
                <link rel="shortcut icon" type="image/ico" href="/favicon.ico" />
                <link rel="stylesheet" id="leptos" href="/pkg/portfolio-site.css" />
                <MetaTags />
                <noscript>
                    <style>{NOSCRIPT_CSS}</style>
                </noscript>
            </head>
            <body class="font-sans">
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let reduced = use_media_query("(prefers-reduced-motion: reduce)");
    let animations = AnimationContext::init(reduced.get_untracked());
    provide_context(animations.clone());
    provide_context(ReducedMotion(reduced));

    let ctx = animations.clone();
    Effect::new(move |_| ctx.set_reduced_motion(reduced.get()));
    on_cleanup(move || animations.teardown());

    let content = match site_content() {
        Ok(content) => Some(content),
        Err(e) => {
            log::error!("site content unavailable: {e}");
            None
        }
    };
    let author = content
        .as_ref()
        .map(|c| c.personal_info.name.clone())
        .unwrap_or_else(|| "Portfolio".to_string());

    view! {
        <Title formatter=move |title| format!("{author} - {title}") />
        <Router>
            <Routes fallback=NotFound>
                <Route path=path!("/") view=move || view! { <HomePage content=content.clone() /> } />
            </Routes>
        </Router>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <Title text="Not Found" />
        <Backdrop />
        <main class="flex min-h-screen flex-col items-center justify-center gap-4">
            <h1 class="text-4xl font-bold">"404"</h1>
            <p class="text-muted">"This page doesn't exist."</p>
            <a href="/" class="btn-primary">
                "Back home"
            </a>
        </main>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::{AnimationConfig, StyleSnapshot};

    #[test]
    fn test_noscript_css_resets_every_animated_property() {
        let snapshot = StyleSnapshot::hidden(&AnimationConfig::scroll_reveal());
        assert!(snapshot.to_css().starts_with("opacity: 0.000;"));
        assert!(NOSCRIPT_CSS.starts_with(".reveal {"));
        for rule in [
            "opacity: 1 !important",
            "transform: none !important",
            "filter: none !important",
        ] {
            assert!(NOSCRIPT_CSS.contains(rule), "missing {rule}");
        }
    }
}
