use crate::store::ProgressState;
use dioxus::prelude::*;

#[component]
pub fn ProgressOverlay(progress: ProgressState) -> Element {
    if !progress.visible {
        return rsx! {};
    }
    rsx! {
        div { class: "progress-overlay", aria_live: "polite",
            div { class: format_args!("progress-card {}", progress.variant.css_class()),
                p { class: "progress-message", "{progress.message}" }
                div { class: "progress-track",
                    div { class: "progress-fill", style: "width: {progress.percent}%;" }
                }
                span { class: "progress-percent", "{progress.percent}%" }
            }
        }
    }
}
