/// Scroll offset after which the navbar gets its solid background.
pub const SCROLLED_THRESHOLD: f64 = 50.0;

/// Element id targeted by an in-page link such as `#services`.
pub fn section_id(href: &str) -> &str {
    href.trim().trim_start_matches('#')
}

pub fn is_scrolled(scroll_y: f64) -> bool {
    scroll_y > SCROLLED_THRESHOLD
}

/// Chat link that opens WhatsApp with `message` prefilled.
pub fn whatsapp_link(number: &str, message: &str) -> String {
    let number: String = number.chars().filter(char::is_ascii_digit).collect();
    format!(
        "https://wa.me/{number}?text={}",
        urlencoding::encode(message)
    )
}

/// Smooth scrolls the element with `id` into view. Returns false, and does
/// nothing else, when there is no such element.
#[cfg(feature = "hydrate")]
pub fn scroll_to_section(id: &str, reduced_motion: bool) -> bool {
    use leptos::prelude::document;
    use web_sys::{ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

    let Some(el) = document().get_element_by_id(id) else {
        log::debug!("scroll target #{id} not on the page");
        return false;
    };
    let opts = ScrollIntoViewOptions::new();
    opts.set_behavior(if reduced_motion {
        ScrollBehavior::Auto
    } else {
        ScrollBehavior::Smooth
    });
    opts.set_block(ScrollLogicalPosition::Start);
    opts.set_inline(ScrollLogicalPosition::Nearest);
    el.scroll_into_view_with_scroll_into_view_options(&opts);
    true
}

#[cfg(not(feature = "hydrate"))]
pub fn scroll_to_section(id: &str, _reduced_motion: bool) -> bool {
    log::debug!("no document to scroll to #{id}");
    false
}

/// Opens `url` in a new browsing context. Failures are only logged.
#[cfg(feature = "hydrate")]
pub fn open_external(url: &str) {
    use leptos::prelude::window;

    if let Err(e) = window().open_with_url_and_target(url, "_blank") {
        log::error!("couldn't open {url}: {e:?}");
    }
}

#[cfg(not(feature = "hydrate"))]
pub fn open_external(url: &str) {
    log::debug!("no window to open {url}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_id() {
        assert_eq!(section_id("#services"), "services");
        assert_eq!(section_id("contact"), "contact");
        assert_eq!(section_id(" #hero "), "hero");
        assert_eq!(section_id("#"), "");
    }

    #[test]
    fn test_scrolled_threshold() {
        assert!(!is_scrolled(0.0));
        assert!(!is_scrolled(50.0));
        assert!(is_scrolled(50.5));
    }

    #[test]
    fn test_whatsapp_link_encodes_message() {
        let link = whatsapp_link("+62 822-7803", "Hi Wayan, let's talk & plan?");
        assert_eq!(
            link,
            "https://wa.me/628227803?text=Hi%20Wayan%2C%20let%27s%20talk%20%26%20plan%3F"
        );
    }

    #[test]
    fn test_missing_target_is_a_no_op() {
        assert!(!scroll_to_section("nowhere", false));
        open_external("https://example.com");
    }
}
