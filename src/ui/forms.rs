use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use super::screens::EntityKind;

/// Fields of the add form.
#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum EntityField {
    #[default]
    Name,
    Description,
    Value,
}

/// Add form shared by characters, armor and monsters. The third field holds
/// the level, bonus or battle power depending on `kind`.
#[derive(Clone)]
pub(crate) struct EntityForm {
    pub(crate) kind: EntityKind,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) value: String,
    pub(crate) active: EntityField,
    pub(crate) error: Option<String>,
}

impl EntityForm {
    pub(crate) fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            name: String::new(),
            description: String::new(),
            value: kind.default_value().to_string(),
            active: EntityField::Name,
            error: None,
        }
    }

    /// Cycle focus forward through the three fields.
    pub(crate) fn next_field(&mut self) {
        self.active = match self.active {
            EntityField::Name => EntityField::Description,
            EntityField::Description => EntityField::Value,
            EntityField::Value => EntityField::Name,
        };
    }

    pub(crate) fn previous_field(&mut self) {
        self.active = match self.active {
            EntityField::Name => EntityField::Value,
            EntityField::Description => EntityField::Name,
            EntityField::Value => EntityField::Description,
        };
    }

    /// Append a character to the active field. The numeric field only takes
    /// digits and a leading minus sign.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        match self.active {
            EntityField::Name => push_text(&mut self.name, ch),
            EntityField::Description => push_text(&mut self.description, ch),
            EntityField::Value => push_number(&mut self.value, ch),
        }
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            EntityField::Name => self.name.pop(),
            EntityField::Description => self.description.pop(),
            EntityField::Value => self.value.pop(),
        };
    }

    pub(crate) fn build_line(&self, field: EntityField) -> Line<'static> {
        let (label, value) = match field {
            EntityField::Name => ("Name", &self.name),
            EntityField::Description => ("Description", &self.description),
            EntityField::Value => (self.kind.value_label(), &self.value),
        };
        let placeholder = if field == EntityField::Value {
            "<default>"
        } else {
            "<required>"
        };
        field_line(label, value, placeholder, self.active == field)
    }

    /// Cursor column offset for the active field, label included.
    pub(crate) fn cursor_offset(&self) -> (u16, u16) {
        let (label, value, row) = match self.active {
            EntityField::Name => ("Name", &self.name, 0),
            EntityField::Description => ("Description", &self.description, 1),
            EntityField::Value => (self.kind.value_label(), &self.value, 2),
        };
        (cursor_column(label, value), row)
    }
}

/// Single-field form for editing a level, bonus or battle power.
#[derive(Clone)]
pub(crate) struct ValueForm {
    pub(crate) kind: EntityKind,
    pub(crate) name: String,
    pub(crate) value: String,
    pub(crate) error: Option<String>,
}

impl ValueForm {
    pub(crate) fn new(kind: EntityKind, name: String, current: i64) -> Self {
        Self {
            kind,
            name,
            value: current.to_string(),
            error: None,
        }
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        push_number(&mut self.value, ch)
    }

    pub(crate) fn backspace(&mut self) {
        self.value.pop();
    }

    pub(crate) fn build_line(&self) -> Line<'static> {
        field_line(self.kind.value_label(), &self.value, "<required>", true)
    }

    pub(crate) fn cursor_offset(&self) -> u16 {
        cursor_column(self.kind.value_label(), &self.value)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum ModifierField {
    #[default]
    Characters,
    Monsters,
}

/// The two battle modifiers, kept as raw text until the battle is resolved.
#[derive(Clone)]
pub(crate) struct ModifierForm {
    pub(crate) characters: String,
    pub(crate) monsters: String,
    pub(crate) active: ModifierField,
}

impl ModifierForm {
    pub(crate) fn new(characters: &str, monsters: &str) -> Self {
        Self {
            characters: characters.to_string(),
            monsters: monsters.to_string(),
            active: ModifierField::Characters,
        }
    }

    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            ModifierField::Characters => ModifierField::Monsters,
            ModifierField::Monsters => ModifierField::Characters,
        };
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        match self.active {
            ModifierField::Characters => push_number(&mut self.characters, ch),
            ModifierField::Monsters => push_number(&mut self.monsters, ch),
        }
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            ModifierField::Characters => self.characters.pop(),
            ModifierField::Monsters => self.monsters.pop(),
        };
    }

    pub(crate) fn build_line(&self, field: ModifierField) -> Line<'static> {
        let (label, value) = match field {
            ModifierField::Characters => ("Character Modifier", &self.characters),
            ModifierField::Monsters => ("Monster Modifier", &self.monsters),
        };
        field_line(label, value, "<required>", self.active == field)
    }

    pub(crate) fn cursor_offset(&self) -> (u16, u16) {
        match self.active {
            ModifierField::Characters => {
                (cursor_column("Character Modifier", &self.characters), 0)
            }
            ModifierField::Monsters => (cursor_column("Monster Modifier", &self.monsters), 1),
        }
    }
}

/// Pending delete awaiting a yes/no.
#[derive(Clone)]
pub(crate) struct ConfirmDelete {
    pub(crate) kind: EntityKind,
    pub(crate) name: String,
}

fn push_text(field: &mut String, ch: char) -> bool {
    if ch.is_control() {
        false
    } else {
        field.push(ch);
        true
    }
}

fn push_number(field: &mut String, ch: char) -> bool {
    if ch.is_ascii_digit() || (ch == '-' && field.is_empty()) {
        field.push(ch);
        true
    } else {
        false
    }
}

fn field_line(label: &str, value: &str, placeholder: &str, is_active: bool) -> Line<'static> {
    let display = if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    };

    let style = if is_active {
        Style::default().fg(Color::Yellow)
    } else if value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::raw(format!("{label}: ")),
        Span::styled(display, style),
    ])
}

fn cursor_column(label: &str, value: &str) -> u16 {
    (label.chars().count() + 2 + value.chars().count()) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_field_accepts_leading_minus_only() {
        let mut form = EntityForm::new(EntityKind::Character);
        assert_eq!(form.value, "1");
        form.active = EntityField::Value;
        form.backspace();
        assert!(form.push_char('-'));
        assert!(form.push_char('4'));
        assert!(!form.push_char('-'));
        assert!(!form.push_char('x'));
        assert_eq!(form.value, "-4");
    }

    #[test]
    fn test_field_cycle() {
        let mut form = EntityForm::new(EntityKind::Armor);
        form.next_field();
        assert!(form.active == EntityField::Description);
        form.previous_field();
        form.previous_field();
        assert!(form.active == EntityField::Value);
        assert_eq!(form.value, "0");
    }

    #[test]
    fn test_modifier_form_edits_active_field() {
        let mut form = ModifierForm::new("0", "0");
        form.backspace();
        form.push_char('5');
        form.toggle_field();
        form.push_char('2');
        assert_eq!(form.characters, "5");
        assert_eq!(form.monsters, "02");
    }
}
