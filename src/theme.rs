use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(format!("unknown theme '{other}'")),
        }
    }
}

pub struct ThemeDefinition {
    pub css: &'static str,
    pub body_class: &'static str,
}

pub fn theme_definition(mode: ThemeMode) -> ThemeDefinition {
    match mode {
        ThemeMode::Light => ThemeDefinition {
            css: LIGHT_THEME,
            body_class: "theme-light",
        },
        ThemeMode::Dark => ThemeDefinition {
            css: DARK_THEME,
            body_class: "theme-dark",
        },
    }
}

/// Persists the light/dark choice between launches. This is the only state
/// that survives a restart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemePreference {
    path: PathBuf,
}

impl ThemePreference {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Preference file under the platform config dir.
    pub fn default_location() -> Self {
        let base = dirs::config_dir()
            .or_else(dirs::data_local_dir)
            .unwrap_or_else(|| PathBuf::from("cache"));
        Self::new(base.join("dishcraft").join("theme"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saved theme, or `fallback` when nothing valid is stored.
    pub fn load_or(&self, fallback: ThemeMode) -> ThemeMode {
        match fs::read_to_string(&self.path) {
            Ok(raw) => raw.parse().unwrap_or_else(|err: String| {
                tracing::warn!(path = %self.path.display(), %err, "ignoring saved theme");
                fallback
            }),
            Err(_) => fallback,
        }
    }

    pub fn save(&self, mode: ThemeMode) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, mode.as_str())
    }
}

/// Theme used when nothing has been saved yet (`DISHCRAFT_THEME`, else light).
/// The system color scheme is not consulted.
pub fn default_theme() -> ThemeMode {
    std::env::var("DISHCRAFT_THEME")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_default()
}

const LIGHT_THEME: &str = r#"
:root {
    --color-bg-primary: #f8fafc;
    --color-bg-card: #ffffff;
    --color-text-primary: #1f2937;
    --color-text-muted: #6b7280;
    --color-border: #e5e7eb;
    --color-accent: #667eea;
    --color-accent-strong: #764ba2;
    --color-error: #dc2626;
    --color-chat-user-bg: #667eea;
    --color-chat-user-text: #ffffff;
    --color-chat-ai-bg: #f3f4f6;
    --color-chat-ai-text: #1f2937;
    --color-chip-bg: #eef2ff;
    --color-overlay: rgba(255, 255, 255, 0.92);
}
body { background: var(--color-bg-primary); color: var(--color-text-primary); }
"#;

const DARK_THEME: &str = r#"
:root {
    --color-bg-primary: #0f172a;
    --color-bg-card: #1e293b;
    --color-text-primary: #f1f5f9;
    --color-text-muted: #94a3b8;
    --color-border: #334155;
    --color-accent: #818cf8;
    --color-accent-strong: #a78bfa;
    --color-error: #f87171;
    --color-chat-user-bg: #6366f1;
    --color-chat-user-text: #ffffff;
    --color-chat-ai-bg: #334155;
    --color-chat-ai-text: #f1f5f9;
    --color-chip-bg: #312e81;
    --color-overlay: rgba(15, 23, 42, 0.9);
}
body { background: var(--color-bg-primary); color: var(--color-text-primary); }
"#;
