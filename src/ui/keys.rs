// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Keyboard bindings for the quiz screen.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyModifiers};

use crate::quiz::OPTION_SLOTS;

/// Letters shown on the answer buttons
pub const SLOT_LETTERS: [char; OPTION_SLOTS] = ['A', 'B', 'C', 'D'];

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizAction {
    /// Answer with the option in this slot
    Pick(usize),
    /// Dismiss the end screen or error and start over
    PlayAgain,
    /// Toggle help overlay
    ToggleHelp,
    /// Leave the application
    Quit,
}

/// A keyboard shortcut
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shortcut {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Shortcut {
    /// Create a new shortcut
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Shortcut with no modifiers
    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    /// Shortcut with Ctrl held
    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }
}

/// A shortcut bound to an action, with help text
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub shortcut: Shortcut,
    pub action: QuizAction,
    pub description: String,
}

impl KeyBinding {
    /// Create a new key binding
    pub fn new(shortcut: Shortcut, action: QuizAction, description: impl Into<String>) -> Self {
        Self {
            shortcut,
            action,
            description: description.into(),
        }
    }
}

/// Shortcut table
pub struct KeyBindings {
    bindings: HashMap<Shortcut, KeyBinding>,
}

impl KeyBindings {
    /// Empty table
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Table with the default quiz bindings
    pub fn with_defaults() -> Self {
        let mut keys = Self::new();

        for (slot, letter) in SLOT_LETTERS.iter().enumerate() {
            let digit = char::from(b'1' + slot as u8);
            let description = format!("Answer {}", letter);
            keys.add(KeyBinding::new(
                Shortcut::key(KeyCode::Char(digit)),
                QuizAction::Pick(slot),
                description.clone(),
            ));
            keys.add(KeyBinding::new(
                Shortcut::key(KeyCode::Char(letter.to_ascii_lowercase())),
                QuizAction::Pick(slot),
                description,
            ));
        }

        keys.add(KeyBinding::new(
            Shortcut::key(KeyCode::Enter),
            QuizAction::PlayAgain,
            "Play again",
        ));
        keys.add(KeyBinding::new(
            Shortcut::key(KeyCode::Char('h')),
            QuizAction::ToggleHelp,
            "Toggle help",
        ));
        keys.add(KeyBinding::new(
            Shortcut::key(KeyCode::Char('?')),
            QuizAction::ToggleHelp,
            "Toggle help",
        ));
        keys.add(KeyBinding::new(
            Shortcut::key(KeyCode::Char('q')),
            QuizAction::Quit,
            "Quit",
        ));
        keys.add(KeyBinding::new(
            Shortcut::key(KeyCode::Esc),
            QuizAction::Quit,
            "Quit",
        ));
        keys.add(KeyBinding::new(
            Shortcut::ctrl(KeyCode::Char('c')),
            QuizAction::Quit,
            "Quit",
        ));

        keys
    }

    /// Add or replace a binding
    pub fn add(&mut self, binding: KeyBinding) {
        self.bindings.insert(binding.shortcut.clone(), binding);
    }

    /// Action for a key event.
    ///
    /// Terminals report `?` and capital letters with or without Shift, so a
    /// Shift-only press falls back to the unmodified, lower-case binding.
    pub fn action(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<QuizAction> {
        if let Some(binding) = self.bindings.get(&Shortcut::new(code, modifiers)) {
            return Some(binding.action);
        }
        if !modifiers.is_empty() && modifiers != KeyModifiers::SHIFT {
            return None;
        }

        let unshifted = match code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };
        self.bindings
            .get(&Shortcut::key(unshifted))
            .map(|b| b.action)
    }

    /// Bindings for help display, sorted by description
    pub fn help_lines(&self) -> Vec<(String, String)> {
        let mut grouped: HashMap<&str, Vec<String>> = HashMap::new();
        for binding in self.bindings.values() {
            grouped
                .entry(binding.description.as_str())
                .or_default()
                .push(format_shortcut(&binding.shortcut));
        }

        let mut lines: Vec<(String, String)> = grouped
            .into_iter()
            .map(|(description, mut keys)| {
                keys.sort();
                (keys.join("/"), description.to_string())
            })
            .collect();
        lines.sort_by(|a, b| a.1.cmp(&b.1));
        lines
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Format a shortcut for display
pub fn format_shortcut(shortcut: &Shortcut) -> String {
    let key = match shortcut.code {
        KeyCode::Char(c) => c.to_uppercase().to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        _ => "?".to_string(),
    };

    if shortcut.modifiers.contains(KeyModifiers::CONTROL) {
        format!("Ctrl+{}", key)
    } else {
        key
    }
}
