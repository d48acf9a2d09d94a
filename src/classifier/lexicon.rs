//! Phrase lists that drive lexical vagueness detection.
//!
//! A query is considered vague when it contains a vague phrase (a complaint with
//! no specifics, such as "problem" or "not working") and either names a broad
//! object (a generic entity such as "invoice") or is very short. Matching is by
//! substring over the lower-cased query, so phrases may span word boundaries.

use serde::{Deserialize, Serialize};

/// Default English vague phrases.
pub const DEFAULT_ENGLISH_VAGUE_PHRASES: &[&str] = &[
    "problem",
    "not working",
    "doesn't work",
    "does not work",
    "error",
    "help",
    "can't",
    "cannot",
    "broken",
    "bug",
    "issue",
    "question about",
    "question",
    "what to do",
    "won't open",
    "won't save",
    "not showing",
    "won't print",
    "won't load",
    "freezes",
    "hangs",
    "glitch",
    "trouble",
];

/// Default English broad objects.
pub const DEFAULT_ENGLISH_BROAD_OBJECTS: &[&str] = &[
    "invoice",
    "report",
    "document",
    "catalog",
    "printing",
    "product",
    "price",
    "stock",
    "receipt",
    "write-off",
    "prescription",
    "license",
    "update",
    "database",
    "cash register",
    "check",
    "discount",
    "card",
    "supplier",
    "contractor",
];

/// Default Russian vague phrases.
pub const DEFAULT_RUSSIAN_VAGUE_PHRASES: &[&str] = &[
    "проблема",
    "не работает",
    "ошибка",
    "помогите",
    "помощь",
    "не могу",
    "сломалось",
    "баг",
    "вопрос по",
    "вопрос",
    "как быть",
    "что делать",
    "не получается",
    "не открывается",
    "не сохраняется",
    "не отображается",
    "не печатается",
    "не загружается",
    "зависает",
    "глючит",
    "беда",
];

/// Default Russian broad objects.
pub const DEFAULT_RUSSIAN_BROAD_OBJECTS: &[&str] = &[
    "накладная",
    "отчёт",
    "отчет",
    "документ",
    "справочник",
    "печать",
    "товар",
    "цена",
    "остаток",
    "приход",
    "расход",
    "рецепт",
    "лицензия",
    "обновление",
    "база",
    "касса",
    "чек",
    "скидка",
    "карта",
    "поставщик",
    "контрагент",
];

/// A language preset: phrase lists plus the wording of the clarification prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    /// Complaint-style phrases with no specifics.
    pub vague_phrases: Vec<String>,

    /// Generic domain entities.
    pub broad_objects: Vec<String>,

    /// First line of the clarification message.
    pub clarification_prompt: String,

    /// Last line of the clarification message.
    pub selection_hint: String,

    /// Label used for topics whose source title is blank.
    pub untitled_label: String,
}

impl Lexicon {
    /// English phrase lists and prompt.
    pub fn english() -> Self {
        Self {
            vague_phrases: to_owned(DEFAULT_ENGLISH_VAGUE_PHRASES),
            broad_objects: to_owned(DEFAULT_ENGLISH_BROAD_OBJECTS),
            clarification_prompt: "Please specify which topic you mean:".to_string(),
            selection_hint: "Pick a number or describe the problem in more detail.".to_string(),
            untitled_label: "Article".to_string(),
        }
    }

    /// Russian phrase lists and prompt.
    pub fn russian() -> Self {
        Self {
            vague_phrases: to_owned(DEFAULT_RUSSIAN_VAGUE_PHRASES),
            broad_objects: to_owned(DEFAULT_RUSSIAN_BROAD_OBJECTS),
            clarification_prompt: "Уточните, какая тема вас интересует:".to_string(),
            selection_hint: "Выберите номер или опишите проблему подробнее.".to_string(),
            untitled_label: "Статья".to_string(),
        }
    }

    /// Lower-case every phrase so matching against a lower-cased query works.
    pub(crate) fn normalized(mut self) -> Self {
        for phrase in self.vague_phrases.iter_mut().chain(self.broad_objects.iter_mut()) {
            *phrase = phrase.trim().to_lowercase();
        }
        self.vague_phrases.retain(|p| !p.is_empty());
        self.broad_objects.retain(|p| !p.is_empty());
        self
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::english()
    }
}

fn to_owned(phrases: &[&str]) -> Vec<String> {
    phrases.iter().map(|&s| s.to_string()).collect()
}
