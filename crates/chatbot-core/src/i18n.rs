//! Localization store
//!
//! Holds the active language and the static translation table. Any front end
//! that shows translated text implements [`LocalizedView`]; the store pushes a
//! complete [`UiText`] snapshot into it whenever the language changes, so the
//! switch and the re-render happen in one step.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ja,
    En,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Ja => "ja",
            Language::En => "en",
        }
    }

    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ja" => Some(Language::Ja),
            "en" => Some(Language::En),
            _ => None,
        }
    }

    pub fn other(&self) -> Self {
        match self {
            Language::Ja => Language::En,
            Language::En => Language::Ja,
        }
    }

    /// Label of the toggle button while this language is active. It always
    /// names the language the button switches to.
    pub fn toggle_label(&self) -> &'static str {
        match self {
            Language::Ja => "EN",
            Language::En => "JP",
        }
    }
}

/// One row of the translation table.
#[derive(Debug)]
pub struct Translations {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub welcome_title: &'static str,
    pub welcome_message: &'static str,
    pub placeholder: &'static str,
    pub error_message: &'static str,
    pub language: &'static str,
}

static JA: Translations = Translations {
    title: "AI チャットボット",
    subtitle: "Gemini AI を活用したチャットアプリ",
    welcome_title: "こんにちは！👋",
    welcome_message: "何でもお気軽に質問してください。",
    placeholder: "メッセージを入力...",
    error_message: "申し訳ございません。エラーが発生しました。もう一度お試しください。",
    language: "Language",
};

static EN: Translations = Translations {
    title: "AI Chatbot",
    subtitle: "Chat app powered by Gemini AI",
    welcome_title: "Hello! 👋",
    welcome_message: "Feel free to ask me anything.",
    placeholder: "Type a message...",
    error_message: "Sorry, an error occurred. Please try again.",
    language: "言語",
};

impl Translations {
    pub fn for_language(language: Language) -> &'static Translations {
        match language {
            Language::Ja => &JA,
            Language::En => &EN,
        }
    }

    /// Look up a string by its table key (`"title"`, `"welcomeTitle"`, ...).
    pub fn get(&self, key: &str) -> Option<&'static str> {
        match key {
            "title" => Some(self.title),
            "subtitle" => Some(self.subtitle),
            "welcomeTitle" => Some(self.welcome_title),
            "welcomeMessage" => Some(self.welcome_message),
            "placeholder" => Some(self.placeholder),
            "errorMessage" => Some(self.error_message),
            "language" => Some(self.language),
            _ => None,
        }
    }
}

/// Every piece of translated chrome a view displays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiText {
    pub header_title: String,
    pub subtitle: String,
    pub welcome_title: String,
    pub welcome_message: String,
    pub placeholder: String,
    pub toggle_label: String,
    pub toggle_caption: String,
}

/// A view whose visible strings are driven by the localization store.
pub trait LocalizedView {
    fn apply_ui_text(&mut self, text: &UiText);
}

pub struct Localizer {
    language: Language,
    settings_path: Option<PathBuf>,
}

impl Localizer {
    /// A store that never touches disk.
    pub fn new(language: Language) -> Self {
        Self {
            language,
            settings_path: None,
        }
    }

    /// Read the persisted language from the settings file. A missing file, a
    /// missing slot or an unrecognized code all start in Japanese.
    pub fn load(settings_path: PathBuf) -> Self {
        let stored = match Config::load_from(&settings_path) {
            Ok(config) => config.language,
            Err(e) => {
                tracing::warn!(path = %settings_path.display(), error = %e, "could not read settings");
                None
            }
        };

        let language = match stored.as_deref() {
            Some(code) => Language::from_code(code).unwrap_or_else(|| {
                tracing::warn!(code, "ignoring unknown stored language");
                Language::default()
            }),
            None => Language::default(),
        };

        Self {
            language,
            settings_path: Some(settings_path),
        }
    }

    /// Override the active language for this run without persisting it.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn translations(&self) -> &'static Translations {
        Translations::for_language(self.language)
    }

    /// Translate `key` under the active language.
    ///
    /// Missing keys are not an error: the key itself is returned so that a
    /// gap in the table shows up as raw text instead of crashing the view.
    pub fn translate<'a>(&self, key: &'a str) -> &'a str {
        self.translations().get(key).unwrap_or(key)
    }

    pub fn ui_text(&self) -> UiText {
        let t = self.translations();
        UiText {
            header_title: format!("🤖 {}", t.title),
            subtitle: t.subtitle.to_string(),
            welcome_title: t.welcome_title.to_string(),
            welcome_message: t.welcome_message.to_string(),
            placeholder: t.placeholder.to_string(),
            toggle_label: self.language.toggle_label().to_string(),
            toggle_caption: t.language.to_string(),
        }
    }

    pub fn update_ui_language(&self, view: &mut impl LocalizedView) {
        view.apply_ui_text(&self.ui_text());
    }

    /// Make `language` active, persist it, and refresh every string on `view`.
    pub fn set_language(&mut self, language: Language, view: &mut impl LocalizedView) {
        self.language = language;
        self.persist();
        self.update_ui_language(view);
        tracing::info!(language = language.as_str(), "language changed");
    }

    /// Same as [`set_language`](Self::set_language) for a raw code. Unknown
    /// codes leave everything untouched and return `false`.
    pub fn set_language_code(&mut self, code: &str, view: &mut impl LocalizedView) -> bool {
        match Language::from_code(code) {
            Some(language) => {
                self.set_language(language, view);
                true
            }
            None => {
                tracing::warn!(code, "ignoring unknown language code");
                false
            }
        }
    }

    pub fn toggle(&mut self, view: &mut impl LocalizedView) {
        self.set_language(self.language.other(), view);
    }

    fn persist(&self) {
        let Some(path) = &self.settings_path else {
            return;
        };
        if let Err(e) = Config::save_language(path, self.language.as_str()) {
            tracing::warn!(path = %path.display(), error = %e, "could not persist language");
        }
    }
}
