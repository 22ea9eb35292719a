//! Demo application state and key handling

use anyhow::{anyhow, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use formtree::validation::{email, max_items, max_length, min, min_length, required};
use formtree::{
    form_group, form_group_with, ControlId, Form, FormConfig, FormEvent, Sequence, Template,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Sign-up form used by the demo
pub fn signup_form(config: FormConfig) -> Form {
    let address = form_group([
        ("street", Template::from("")),
        ("city", ("", vec![required()]).into()),
    ]);

    form_group_with(
        [
            ("name", ("", vec![required(), min_length(2)]).into()),
            ("email", ("", vec![required(), email()]).into()),
            ("age", (18, vec![required(), min(13.0)]).into()),
            ("address", address.into()),
            (
                "tags",
                Template::array_validated([Template::from("rust")], vec![max_items(5)]),
            ),
        ],
        config,
    )
}

pub struct App {
    pub form: Form,
    /// Editable leaves as (path, control), in display order
    pub fields: Vec<(String, ControlId)>,
    pub active_field: usize,
    pub tags: Sequence,
    pub status_message: Option<String>,
    /// Show errors for untouched fields too (after a submit)
    pub show_errors: bool,
    /// Most recent change, written by a form observer
    pub last_event: Arc<Mutex<Option<FormEvent>>>,
    should_quit: bool,
}

impl App {
    pub fn new(config: FormConfig) -> Result<Self> {
        let mut form = signup_form(config);
        let tags = form
            .sequence("tags")
            .ok_or_else(|| anyhow!("sign-up form has no tags sequence"))?;

        let last_event = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&last_event);
        form.subscribe(move |event| {
            if let Ok(mut slot) = sink.lock() {
                *slot = Some(event.clone());
            }
        });

        let mut app = Self {
            form,
            fields: Vec::new(),
            active_field: 0,
            tags,
            status_message: None,
            show_errors: false,
            last_event,
            should_quit: false,
        };
        app.refresh_fields();
        Ok(app)
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn active_control(&self) -> Option<ControlId> {
        self.fields.get(self.active_field).map(|(_, id)| *id)
    }

    /// Re-read the leaf list after the tree changed shape
    fn refresh_fields(&mut self) {
        self.fields = self.form.leaves();
        if self.active_field >= self.fields.len() {
            self.active_field = self.fields.len().saturating_sub(1);
        }
    }

    fn focus(&mut self, control: ControlId) {
        if let Some(index) = self.fields.iter().position(|(_, id)| *id == control) {
            self.active_field = index;
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('n') if ctrl => self.add_tag()?,
            KeyCode::Char('d') if ctrl => self.remove_active_tag()?,
            KeyCode::Char('r') if ctrl => self.reset(),
            KeyCode::Char('v') if ctrl => self.submit(),
            KeyCode::Tab | KeyCode::Down => self.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.prev_field(),
            KeyCode::Backspace => self.edit_active(|text| {
                text.pop();
            }),
            KeyCode::Char(c) if !ctrl => self.edit_active(|text| text.push(c)),
            _ => {}
        }
        Ok(())
    }

    fn next_field(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.touch_active();
        self.active_field = (self.active_field + 1) % self.fields.len();
    }

    fn prev_field(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.touch_active();
        if self.active_field == 0 {
            self.active_field = self.fields.len() - 1;
        } else {
            self.active_field -= 1;
        }
    }

    fn touch_active(&mut self) {
        if let Some(id) = self.active_control() {
            if !self.form.is_touched(id) {
                self.form.mark_touched(id);
            }
        }
    }

    /// Apply a text edit to the focused leaf; numeric leaves only accept digits
    fn edit_active(&mut self, edit: impl FnOnce(&mut String)) {
        let Some(id) = self.active_control() else {
            return;
        };
        let next = match self.form.value_at(id) {
            Some(Value::String(mut text)) => {
                edit(&mut text);
                Value::String(text)
            }
            Some(Value::Number(number)) => {
                let mut text = number.to_string();
                edit(&mut text);
                if text.is_empty() {
                    Value::from(0)
                } else {
                    match text.parse::<u64>() {
                        Ok(n) => Value::from(n),
                        Err(_) => return,
                    }
                }
            }
            _ => return,
        };
        self.form.set_value(id, next);
    }

    fn add_tag(&mut self) -> Result<()> {
        let tag = self
            .form
            .push(self.tags, Template::validated("", vec![max_length(20)]))?;
        self.refresh_fields();
        self.focus(tag);
        self.status_message = Some("Tag added".to_string());
        Ok(())
    }

    fn remove_active_tag(&mut self) -> Result<()> {
        let Some(id) = self.active_control() else {
            return Ok(());
        };
        if self.form.parent(id) != Some(self.tags.id()) {
            self.status_message = Some("Focus a tag to remove it".to_string());
            return Ok(());
        }
        let len = self.form.len_of(self.tags).unwrap_or(0);
        if let Some(index) = (0..len).find(|i| self.form.at(self.tags, *i) == Some(id)) {
            self.form.remove_at(self.tags, index)?;
            self.refresh_fields();
            self.status_message = Some(format!("Removed tag {index}"));
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.form.reset();
        self.show_errors = false;
        self.refresh_fields();
        self.status_message = Some("Form reset".to_string());
    }

    fn submit(&mut self) {
        let result = self.form.validate();
        self.show_errors = true;
        self.status_message = Some(match result.errors {
            None => "Form is valid".to_string(),
            Some(errors) => format!("{} validation error(s)", errors.len()),
        });
    }

    /// First error to display for a control, once it was touched or submitted
    pub fn error_for(&self, control: ControlId) -> Option<String> {
        if !self.show_errors && !self.form.is_touched(control) {
            return None;
        }
        self.form
            .validate_at(control)
            .errors
            .and_then(|errors| errors.into_iter().next())
            .map(|error| error.message)
    }

    /// Description of the last change for the status bar
    pub fn last_event_label(&self) -> Option<String> {
        let event = self.last_event.lock().ok()?.clone()?;
        let path = |id: ControlId| {
            self.form
                .path_of(id)
                .unwrap_or_else(|| "(detached)".to_string())
        };
        Some(match event {
            FormEvent::ValueChanged { control } => format!("changed {}", path(control)),
            FormEvent::Pushed { index, .. } => format!("pushed tags[{index}]"),
            FormEvent::Removed { index, .. } => format!("removed tags[{index}]"),
            FormEvent::Reset { .. } => "reset".to_string(),
            FormEvent::MarkedDirty { control } => format!("marked {}", path(control)),
            FormEvent::Touched { control } => format!("touched {}", path(control)),
        })
    }
}
