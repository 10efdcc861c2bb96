use std::rc::Rc;

use leptos::{ev::SubmitEvent, prelude::*};
use leptos_use::{use_interval_fn_with_options, UseIntervalFnOptions};

use crate::{
    contact::{ContactFields, ContactForm, FormPhase, FormTimings, Messenger, SimulatedMessenger},
    content::Contact,
    motion::{AnimationConfig, Direction},
    navigation::{open_external, whatsapp_link},
};

use super::{animated::Reveal, hooks::page_clock};

const PHASE_POLL_MS: u64 = 100;

fn button_label(phase: &FormPhase) -> String {
    match phase {
        FormPhase::Idle => "Send Message".to_string(),
        FormPhase::Submitting => "Sending...".to_string(),
        FormPhase::Submitted => "Message Sent!".to_string(),
        FormPhase::Failed(reason) => format!("Not sent: {reason}"),
    }
}

#[component]
fn ContactDetails(contact: Contact) -> impl IntoView {
    let chat = whatsapp_link(&contact.whatsapp, &contact.whatsapp_message);
    view! {
        <div class="space-y-4">
            <div>
                <div class="text-sm text-muted">"Email"</div>
                <a href=format!("mailto:{}", contact.email)>{contact.email.clone()}</a>
            </div>
            <div>
                <div class="text-sm text-muted">"Phone"</div>
                <div>{contact.phone}</div>
            </div>
            <div>
                <div class="text-sm text-muted">"Location"</div>
                <div>{contact.location}</div>
            </div>
            <button class="btn-secondary" on:click=move |_| open_external(&chat)>
                "Chat on WhatsApp"
            </button>
        </div>
    }
}

/// Contact form. Messages go through a simulated messenger, nothing is sent.
#[component]
pub fn ContactSection(contact: Option<Contact>) -> impl IntoView {
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let subject = RwSignal::new(String::new());
    let message = RwSignal::new(String::new());
    let (phase, set_phase) = signal(FormPhase::Idle);
    let (field_error, set_field_error) = signal(None::<String>);

    let form = StoredValue::new(ContactForm::new(FormTimings::default()));
    let messenger = StoredValue::new(SimulatedMessenger::default());

    let stop_slot: StoredValue<Option<Rc<dyn Fn()>>, LocalStorage> = StoredValue::new_local(None);
    let poll = use_interval_fn_with_options(
        move || {
            let now = page_clock();
            let changed = form.try_update_value(|f| f.tick(now)).unwrap_or(false);
            if !changed {
                return;
            }
            let current = form.with_value(|f| f.phase().clone());
            if current == FormPhase::Submitted {
                for field in [name, email, subject, message] {
                    field.set(String::new());
                }
            }
            if current == FormPhase::Idle {
                stop_slot.with_value(|stop| {
                    if let Some(stop) = stop {
                        stop();
                    }
                });
            }
            set_phase.set(current);
        },
        PHASE_POLL_MS,
        UseIntervalFnOptions::default().immediate(false),
    );
    let pause = poll.pause.clone();
    stop_slot.set_value(Some(Rc::new(move || pause())));
    let resume = poll.resume.clone();

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let fields = ContactFields {
            name: name.get_untracked(),
            email: email.get_untracked(),
            subject: subject.get_untracked(),
            message: message.get_untracked(),
        };
        let now = page_clock();
        let result = messenger.with_value(|m| {
            form.try_update_value(|f| f.submit(now, &fields, m as &dyn Messenger))
        });
        match result {
            Some(Ok(())) => {
                set_field_error.set(None);
                set_phase.set(form.with_value(|f| f.phase().clone()));
                resume();
            }
            Some(Err(e)) => set_field_error.set(Some(e.to_string())),
            None => log::warn!("contact form submitted after unmount"),
        }
    };

    let busy = move || phase.get() != FormPhase::Idle;
    let input_class = "w-full rounded-md border bg-background px-4 py-2";

    view! {
        <section id="contact" class="py-20">
            <Reveal config=AnimationConfig::title() class="mb-12 text-center">
                <h2 class="text-3xl font-bold md:text-4xl">"Get In Touch"</h2>
                <p class="mt-4 text-muted">"Have a project in mind? Let's talk."</p>
            </Reveal>
            <div class="mx-auto grid max-w-5xl gap-10 md:grid-cols-3">
                <Reveal config=AnimationConfig::section().with_direction(Direction::Left)>
                    {contact.map(|contact| view! { <ContactDetails contact /> })}
                </Reveal>
                <Reveal
                    config=AnimationConfig::section().with_direction(Direction::Right)
                    class="md:col-span-2"
                >
                    <form class="space-y-4" on:submit=on_submit>
                        <div class="grid gap-4 md:grid-cols-2">
                            <input type="text" placeholder="Your Name" class=input_class bind:value=name />
                            <input type="email" placeholder="Your Email" class=input_class bind:value=email />
                        </div>
                        <input type="text" placeholder="Subject" class=input_class bind:value=subject />
                        <textarea rows="6" placeholder="Your Message" class=input_class bind:value=message></textarea>
                        {move || field_error.get().map(|e| view! { <p class="text-sm text-red">{e}</p> })}
                        <button type="submit" class="btn-primary w-full" disabled=busy>
                            {move || button_label(&phase.get())}
                        </button>
                    </form>
                </Reveal>
            </div>
        </section>
    }
}
