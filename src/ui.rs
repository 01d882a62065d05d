use crate::api::HttpBackend;
use crate::config::AppConfig;
use crate::orchestrator::Orchestrator;
use crate::store::{AppState, Store, TabKind};
use crate::theme::{ThemeMode, ThemePreference, default_theme, theme_definition};
use crate::views::{ImageTabView, ProgressOverlay, TextTabView};
use dioxus::prelude::*;
use std::sync::Arc;

const DISHCRAFT_CSS: Asset = asset!("/assets/dishcraft.css");

fn build_orchestrator() -> Orchestrator {
    let config = AppConfig::from_env();
    match Orchestrator::from_config(config.clone()) {
        Ok(orchestrator) => orchestrator,
        Err(err) => {
            tracing::warn!(%err, "falling back to default HTTP client");
            let backend = HttpBackend::new(config.api_base_url.clone());
            Orchestrator::new(Store::new(), Arc::new(backend), config)
        }
    }
}

#[component]
pub fn App() -> Element {
    let orchestrator = use_context_provider(build_orchestrator);
    let state = use_signal(|| orchestrator.snapshot());
    let preference = use_hook(ThemePreference::default_location);
    let theme = use_signal(|| preference.load_or(default_theme()));

    use_state_sync(orchestrator.store().clone(), state);

    let snapshot = state();
    let definition = theme_definition(theme());
    rsx! {
        ThemeStyles { theme: theme() }
        div { class: "app-shell {definition.body_class}",
            AppHeader { active_tab: snapshot.active_tab, theme, preference }
            main { class: "tab-panels",
                TabPanel { active: snapshot.active_tab == TabKind::Text,
                    TextTabView {
                        tab: snapshot.text.clone(),
                        generating_image: snapshot.ui.is_generating_image,
                        image_error: snapshot.ui.image_error.clone(),
                    }
                }
                TabPanel { active: snapshot.active_tab == TabKind::Image,
                    ImageTabView {
                        tab: snapshot.image.clone(),
                        generating_image: snapshot.ui.is_generating_image,
                        image_error: snapshot.ui.image_error.clone(),
                    }
                }
            }
            ProgressOverlay { progress: snapshot.ui.progress.clone() }
        }
    }
}

/// Mirrors every store transition into `state` so components re-render.
fn use_state_sync(store: Store, mut state: Signal<AppState>) {
    use_future(move || {
        let mut rx = store.subscribe();
        async move {
            loop {
                let next = rx.borrow_and_update().clone();
                state.set(next);
                if rx.changed().await.is_err() {
                    break;
                }
            }
        }
    });
}

#[component]
fn ThemeStyles(theme: ThemeMode) -> Element {
    let definition = theme_definition(theme);
    rsx! {
        document::Link { rel: "stylesheet", href: DISHCRAFT_CSS }
        style { dangerous_inner_html: "{definition.css}" }
    }
}

#[component]
fn AppHeader(active_tab: TabKind, theme: Signal<ThemeMode>, preference: ThemePreference) -> Element {
    let mut theme = theme;
    let toggle_label = match theme() {
        ThemeMode::Light => "🌙",
        ThemeMode::Dark => "☀️",
    };
    rsx! {
        header { class: "header",
            div { class: "header-content",
                h1 { class: "brand", "🍳 智能菜谱" }
                TabNavigation { active_tab }
                button {
                    class: "theme-toggle",
                    r#type: "button",
                    title: "切换主题",
                    onclick: move |_| {
                        let next = theme().toggled();
                        theme.set(next);
                        if let Err(err) = preference.save(next) {
                            tracing::warn!(%err, path = %preference.path().display(), "could not save theme");
                        }
                    },
                    "{toggle_label}"
                }
            }
        }
    }
}

#[component]
fn TabPanel(active: bool, children: Element) -> Element {
    let class_suffix = if active { "active" } else { "" };
    rsx! {
        div {
            class: format_args!("tab-panel {}", class_suffix),
            aria_hidden: (!active).to_string(),
            {children}
        }
    }
}

#[component]
fn TabNavigation(active_tab: TabKind) -> Element {
    rsx! {
        nav { class: "tabs",
            for tab in TabKind::ALL {
                TabButton { key: "{tab}", active_tab, tab }
            }
        }
    }
}

#[component]
fn TabButton(active_tab: TabKind, tab: TabKind) -> Element {
    let orchestrator = use_context::<Orchestrator>();
    let class = if active_tab == tab { "tab active" } else { "tab" };
    rsx! {
        button {
            class: class,
            r#type: "button",
            onclick: move |_| orchestrator.switch_tab(tab),
            "{tab.label()}"
        }
    }
}
