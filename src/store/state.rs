use crate::types::{ChatMessage, Recipe};
use std::fmt;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TabKind {
    #[default]
    Text,
    Image,
}

impl TabKind {
    pub const ALL: [TabKind; 2] = [TabKind::Text, TabKind::Image];

    pub fn label(self) -> &'static str {
        match self {
            TabKind::Text => "文字描述",
            TabKind::Image => "图片识别",
        }
    }
}

impl fmt::Display for TabKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TabKind::Text => "text",
            TabKind::Image => "image",
        })
    }
}

/// State shared by both tabs: the conversation, the current recipe and the
/// generation lifecycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TabSession {
    pub conversation: Vec<ChatMessage>,
    /// Shared so that untouched recipes stay pointer-equal across transitions.
    pub recipe: Option<Arc<Recipe>>,
    pub is_generating: bool,
    pub error: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextTab {
    pub session: TabSession,
    /// Uncommitted textarea content.
    pub input: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImageTab {
    pub session: TabSession,
    /// Recognised or hand-added ingredients; exact duplicates never appear.
    pub ingredients: Vec<String>,
    pub is_analyzing: bool,
    pub analysis_error: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProgressVariant {
    #[default]
    Default,
    Recipe,
    Image,
    Analysis,
    Optimize,
}

impl ProgressVariant {
    pub fn css_class(self) -> &'static str {
        match self {
            ProgressVariant::Default => "progress-default",
            ProgressVariant::Recipe => "progress-recipe",
            ProgressVariant::Image => "progress-image",
            ProgressVariant::Analysis => "progress-analysis",
            ProgressVariant::Optimize => "progress-optimize",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProgressState {
    pub visible: bool,
    /// Always within 0..=100.
    pub percent: u8,
    pub message: String,
    pub variant: ProgressVariant,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UiState {
    pub is_generating_image: bool,
    pub image_error: Option<String>,
    pub progress: ProgressState,
}

/// Root aggregate. Both tab sessions live for the whole app lifetime; switching
/// tabs only moves `active_tab`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    pub active_tab: TabKind,
    pub text: TextTab,
    pub image: ImageTab,
    pub ui: UiState,
}

impl AppState {
    pub fn session(&self, tab: TabKind) -> &TabSession {
        match tab {
            TabKind::Text => &self.text.session,
            TabKind::Image => &self.image.session,
        }
    }

    pub fn session_mut(&mut self, tab: TabKind) -> &mut TabSession {
        match tab {
            TabKind::Text => &mut self.text.session,
            TabKind::Image => &mut self.image.session,
        }
    }

    pub fn recipe(&self, tab: TabKind) -> Option<&Arc<Recipe>> {
        self.session(tab).recipe.as_ref()
    }
}
