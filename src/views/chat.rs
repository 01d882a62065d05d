use crate::orchestrator::Orchestrator;
use crate::store::TabKind;
use crate::types::{ChatMessage, Role};
use dioxus::events::Key;
use dioxus::prelude::*;
use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};

const MESSAGE_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour padding:zero]:[minute padding:zero]");

fn format_message_timestamp(timestamp: OffsetDateTime) -> Option<String> {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    timestamp.to_offset(offset).format(MESSAGE_TIME_FORMAT).ok()
}

fn role_class(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Ai => "assistant",
    }
}

#[component]
pub fn ChatPanel(
    tab: TabKind,
    messages: Vec<ChatMessage>,
    busy: bool,
    placeholder: &'static str,
) -> Element {
    let orchestrator = use_context::<Orchestrator>();
    let mut input = use_signal(String::new);

    let on_reset = {
        let orchestrator = orchestrator.clone();
        move |_: MouseEvent| orchestrator.reset_tab(tab)
    };
    let send = use_callback(move |text: String| {
        let trimmed = text.trim().to_string();
        let busy_now = orchestrator
            .store()
            .read(|state| state.session(tab).is_generating);
        if trimmed.is_empty() || busy_now {
            return;
        }
        input.set(String::new());
        let orchestrator = orchestrator.clone();
        spawn(async move {
            let turn = orchestrator.send_message(tab, &trimmed).await;
            tracing::debug!(%tab, outcome = ?turn.outcome, "chat turn finished");
        });
    });

    rsx! {
        div { class: "chat-panel",
            div { class: "chat-header",
                h3 { class: "section-title", "💬 对话" }
                button {
                    class: "btn-link",
                    r#type: "button",
                    title: "清空本页的对话、菜谱和食材",
                    disabled: busy,
                    onclick: on_reset,
                    "重新开始"
                }
            }
            div { class: "chat-list",
                if messages.is_empty() {
                    p { class: "text-muted", "还没有消息。告诉我您想吃什么，或者让我调整菜谱。" }
                }
                for msg in messages.iter() {
                    div { key: "{msg.id}", class: format_args!("message-row {}", role_class(msg.role)),
                        div { class: format_args!("bubble {}", role_class(msg.role)), "{msg.content}" }
                        if let Some(ts) = format_message_timestamp(msg.timestamp) {
                            span { class: "message-timestamp", "{ts}" }
                        }
                    }
                }
                if busy {
                    div { class: "shimmer-line",
                        span { class: "shimmer-text", "思考中…" }
                    }
                }
            }
            div { class: "composer",
                textarea {
                    rows: "2",
                    placeholder: placeholder,
                    value: "{input}",
                    disabled: busy,
                    oninput: move |ev| input.set(ev.value()),
                    onkeydown: move |ev| {
                        if ev.key() == Key::Enter && !ev.modifiers().shift() {
                            ev.prevent_default();
                            send.call(input());
                        }
                    },
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: busy || input().trim().is_empty(),
                    onclick: move |_| send.call(input()),
                    "发送"
                }
            }
        }
    }
}
