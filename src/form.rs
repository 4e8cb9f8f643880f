use crate::{
    config::PickerConfig,
    input::PromptInput,
    store::{Command, CommandStore},
};

pub const NAME: usize = 0;
pub const COMMAND: usize = 1;
pub const DESCRIPTION: usize = 2;

/// Why a submit was rejected. Inline messages are stored on the fields
/// either way; the duplicate kinds additionally raise an error toast.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitError {
    Invalid,
    DuplicateName,
    DuplicateCommand,
}

#[derive(Clone, Debug)]
struct Field {
    label: &'static str,
    input: PromptInput,
    error: Option<String>,
}

impl Field {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            input: PromptInput::default(),
            error: None,
        }
    }
}

/// Modal form collecting a new command. Validation never mutates the store;
/// a successful submit hands the built `Command` back to the caller.
#[derive(Clone, Debug)]
pub struct CommandForm {
    fields: Vec<Field>,
    focused: usize,
}

impl CommandForm {
    pub fn new() -> Self {
        Self {
            fields: vec![
                Field::new("Name"),
                Field::new("Command"),
                Field::new("Description (optional)"),
            ],
            focused: 0,
        }
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn focused_field(&self) -> usize {
        self.focused
    }

    pub fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % self.fields.len();
    }

    pub fn focus_prev(&mut self) {
        self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
    }

    pub fn active_input_mut(&mut self) -> &mut PromptInput {
        &mut self.fields[self.focused].input
    }

    pub fn active_input(&self) -> &PromptInput {
        &self.fields[self.focused].input
    }

    /// Label, current input, and inline error of each field, for rendering.
    pub fn rows(&self) -> impl Iterator<Item = (&'static str, &PromptInput, Option<&str>)> {
        self.fields
            .iter()
            .map(|field| (field.label, &field.input, field.error.as_deref()))
    }

    /// Validates the fields against the existing command set and either
    /// returns the new command or records inline errors and reports why.
    pub fn submit(
        &mut self,
        existing: &[Command],
        config: &PickerConfig,
    ) -> Result<Command, SubmitError> {
        for field in &mut self.fields {
            field.error = None;
        }

        let name = self.fields[NAME].input.text().trim().to_string();
        let command_raw = self.fields[COMMAND].input.text().trim().to_string();
        let description = self.fields[DESCRIPTION].input.text().trim().to_string();

        let mut outcome = Ok(());

        if name.is_empty() {
            self.fields[NAME].error = Some("Name is required".to_string());
            outcome = Err(SubmitError::Invalid);
        }

        if command_raw.is_empty() {
            self.fields[COMMAND].error = Some("Command is required".to_string());
            outcome = Err(SubmitError::Invalid);
        } else if !is_valid_command_text(&command_raw) {
            self.fields[COMMAND].error = Some(
                "Command can only contain letters, numbers, spaces, and hyphens".to_string(),
            );
            outcome = Err(SubmitError::Invalid);
        }

        let command_text = if config.normalize_command_text {
            normalize_command(&command_raw)
        } else {
            command_raw
        };

        if config.enforce_unique_name
            && !name.is_empty()
            && existing
                .iter()
                .any(|command| command.name.eq_ignore_ascii_case(&name))
        {
            self.fields[NAME].error = Some("A command with this name already exists".to_string());
            outcome = Err(SubmitError::DuplicateName);
        } else if config.enforce_unique_command
            && !command_text.is_empty()
            && existing.iter().any(|command| command.command == command_text)
        {
            self.fields[COMMAND].error =
                Some("A command with this text already exists".to_string());
            outcome = Err(SubmitError::DuplicateCommand);
        }

        outcome?;

        Ok(Command {
            id: CommandStore::generate_id(),
            name,
            command: command_text,
            description: if description.is_empty() {
                None
            } else {
                Some(description)
            },
        })
    }
}

fn is_valid_command_text(text: &str) -> bool {
    text.chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch.is_whitespace() || ch == '-')
}

/// Lowercases and collapses whitespace runs into single hyphens, the
/// normalization applied when `normalize_command_text` is on.
pub fn normalize_command(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
#[path = "form_tests.rs"]
mod form_tests;
