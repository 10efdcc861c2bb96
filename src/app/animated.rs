use std::rc::Rc;

use leptos::{either::Either, html, prelude::*};
use leptos_use::{use_interval_fn_with_options, UseIntervalFnOptions};

use crate::motion::{
    AnimationConfig, DecryptOptions, DecryptionSession, SplitMode, SplitText, StyleSnapshot,
};

use super::hooks::{reduced_motion_signal, use_reveal, use_stagger, use_visibility};

/// Wraps `children` in a block that animates in when scrolled into view.
#[component]
pub fn Reveal(
    #[prop(optional)] config: Option<AnimationConfig>,
    #[prop(optional, into)] id: Option<String>,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let target = NodeRef::<html::Div>::new();
    let style = use_reveal(target, config.unwrap_or_else(AnimationConfig::section));
    view! {
        <div node_ref=target id=id class=format!("reveal {class}") style=move || style.get().to_css()>
            {children()}
        </div>
    }
}

/// Renders `items` in order and reveals them one after another.
#[component]
pub fn StaggeredList<T, F>(
    items: Vec<T>,
    render: F,
    #[prop(optional)] config: Option<AnimationConfig>,
    #[prop(optional, into)] class: String,
    #[prop(optional, into)] item_class: String,
) -> impl IntoView
where
    T: 'static,
    F: Fn(usize, T) -> AnyView + 'static,
{
    let target = NodeRef::<html::Div>::new();
    let config = config.unwrap_or_else(AnimationConfig::card);
    let styles = use_stagger(target, config, items.len());
    let child_style = move |i: usize| {
        styles.with(|s| {
            s.get(i)
                .copied()
                .unwrap_or_else(StyleSnapshot::resting)
                .to_css()
        })
    };
    view! {
        <div node_ref=target class=class>
            {items
                .into_iter()
                .enumerate()
                .map(|(i, item)| {
                    view! {
                        <div class=format!("reveal {item_class}") style=move || child_style(i)>
                            {render(i, item)}
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

fn frame_chars(session: &DecryptionSession, frame: &str) -> Vec<(char, bool)> {
    frame
        .chars()
        .enumerate()
        .map(|(i, c)| (c, session.is_revealed(i)))
        .collect()
}

/// Text that unscrambles itself once it comes into view.
///
/// Server render and reduced motion both show the plain text.
#[component]
pub fn DecryptedText(
    #[prop(into)] text: String,
    #[prop(optional)] options: Option<DecryptOptions>,
    /// Replay every time the text re-enters view.
    #[prop(optional)]
    replay: bool,
    #[prop(optional, into)] class: String,
    #[prop(optional, into)] encrypted_class: String,
) -> impl IntoView {
    let target = NodeRef::<html::Span>::new();
    let session = DecryptionSession::new(&text, options.unwrap_or_default());
    let interval_ms = session.tick_interval().as_millis() as u64;
    let session = StoredValue::new(session);
    let plain: Vec<(char, bool)> = text.chars().map(|c| (c, true)).collect();
    let (frame, set_frame) = signal(plain.clone());

    let stop_slot: StoredValue<Option<Rc<dyn Fn()>>, LocalStorage> = StoredValue::new_local(None);
    let ticker = use_interval_fn_with_options(
        move || {
            let next = session
                .try_update_value(|s| s.next().map(|f| frame_chars(s, &f)))
                .flatten();
            match next {
                Some(f) => set_frame.set(f),
                None => stop_slot.with_value(|stop| {
                    if let Some(stop) = stop {
                        stop();
                    }
                }),
            }
        },
        interval_ms,
        UseIntervalFnOptions::default().immediate(false),
    );
    let pause = ticker.pause.clone();
    stop_slot.set_value(Some(Rc::new(move || pause())));

    let config = if replay {
        AnimationConfig::default().toggle()
    } else {
        AnimationConfig::default()
    };
    let reduced = reduced_motion_signal();
    let resume = ticker.resume.clone();
    let pause = ticker.pause.clone();
    let plain_frame = plain.clone();
    use_visibility(target, &config, move |crossing| {
        if reduced.get_untracked() {
            return;
        }
        if crossing.in_view() {
            let scrambled = session.try_update_value(|s| {
                s.restart();
                let f = s.initial_frame();
                frame_chars(s, &f)
            });
            if let Some(f) = scrambled {
                set_frame.set(f);
                resume();
            }
        } else {
            pause();
            set_frame.set(plain_frame.clone());
        }
    });

    let encrypted_class = StoredValue::new(encrypted_class);
    view! {
        <span node_ref=target class=format!("inline-block {class}")>
            <span class="sr-only">{text}</span>
            <span aria-hidden="true">
                {move || {
                    frame
                        .get()
                        .into_iter()
                        .map(|(c, revealed)| {
                            let class = if revealed {
                                String::new()
                            } else {
                                encrypted_class.get_value()
                            };
                            view! { <span class=class>{c.to_string()}</span> }
                        })
                        .collect_view()
                }}
            </span>
        </span>
    }
}

/// Text split into words or characters that rise out of a blur one after
/// another as it scrolls into view, and sink back when scrolled past.
///
/// Blank text renders as is, without animation.
#[component]
pub fn ScrollRevealText(
    #[prop(into)] text: String,
    #[prop(optional)] config: Option<AnimationConfig>,
    #[prop(optional)] mode: SplitMode,
    #[prop(optional, into)] class: String,
) -> impl IntoView {
    let split = match SplitText::new(&text, mode) {
        Ok(split) => split,
        Err(e) => {
            log::debug!("{e}, showing it without animation");
            return Either::Left(view! { <span class=format!("block {class}")>{text}</span> });
        }
    };
    let target = NodeRef::<html::Span>::new();
    let config = config.unwrap_or_else(AnimationConfig::scroll_reveal);
    let styles = use_stagger(target, config, split.len());
    let piece_style = move |i: usize| {
        styles.with(|s| {
            s.get(i)
                .copied()
                .unwrap_or_else(StyleSnapshot::resting)
                .to_css()
        })
    };

    Either::Right(view! {
        <span node_ref=target class=format!("block {class}")>
            <span class="sr-only">{text}</span>
            <span aria-hidden="true">
                {split
                    .words()
                    .iter()
                    .cloned()
                    .enumerate()
                    .map(|(w, word)| {
                        let pieces = word
                            .pieces
                            .into_iter()
                            .map(|(piece, i)| {
                                view! {
                                    <span
                                        class="reveal inline-block origin-bottom"
                                        style=move || piece_style(i)
                                    >
                                        {piece}
                                    </span>
                                }
                            })
                            .collect_view();
                        view! {
                            {(w > 0).then_some(" ")}
                            <span class="inline-block whitespace-nowrap">{pieces}</span>
                        }
                    })
                    .collect_view()}
            </span>
        </span>
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_frame_chars_mark_revealed_positions() {
        let options = DecryptOptions::default()
            .with_seed(3)
            .with_alphabet("#%&")
            .with_speed(Duration::from_millis(40));
        let mut session = DecryptionSession::new("ok", options);
        assert_eq!(session.tick_interval(), Duration::from_millis(40));

        let first = session.next().unwrap();
        let chars = frame_chars(&session, &first);
        assert_eq!(chars[0], ('o', true));
        assert!(!chars[1].1);
        assert!("#%&".contains(chars[1].0));

        let last = session.next().unwrap();
        assert_eq!(frame_chars(&session, &last), vec![('o', true), ('k', true)]);
    }
}
