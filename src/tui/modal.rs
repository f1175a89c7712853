//! Modal filter form: lifecycle and rendering.
//!
//! The modal owns no filter logic. It collects text into a
//! `FilterForm`, and on submit hands the normalized field-set back to
//! the app, which reconciles it into the criteria store.

use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::form::{FieldSlot, FilterCategory, FilterForm, SubmittedFieldSet};

/// Modal lifecycle: closed, or open with transient form state.
pub enum Modal {
    Closed,
    Open(FilterForm),
}

impl Modal {
    /// Open with freshly initialized form state; nothing carries over
    /// from a previous open session.
    pub fn open() -> Self {
        Modal::Open(FilterForm::default())
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Modal::Open(_))
    }
}

/// What a key press inside the modal asks the app to do.
#[derive(Debug, PartialEq)]
pub enum ModalOutcome {
    /// Keep collecting input.
    Pending,
    /// Explicit close request; criteria untouched.
    Close,
    /// Form submitted; close and reconcile the field-set.
    Submit(SubmittedFieldSet),
    /// Explicit reset request; restore default criteria and close.
    Reset,
}

pub fn handle_key(form: &mut FilterForm, code: KeyCode) -> ModalOutcome {
    match code {
        KeyCode::Esc => ModalOutcome::Close,
        KeyCode::Enter => ModalOutcome::Submit(form.submitted_fields()),
        KeyCode::Char('x') => ModalOutcome::Reset,
        KeyCode::Tab => {
            form.category = form.category.next();
            ModalOutcome::Pending
        }
        KeyCode::BackTab => {
            form.category = form.category.prev();
            ModalOutcome::Pending
        }
        KeyCode::Up | KeyCode::Down => {
            form.focus = form.focus.toggled();
            ModalOutcome::Pending
        }
        KeyCode::Backspace => {
            form.focused_field_mut().pop();
            ModalOutcome::Pending
        }
        KeyCode::Char(c) if c.is_ascii_digit() || c == ',' || c == '.' || c == '-' => {
            form.focused_field_mut().push(c);
            ModalOutcome::Pending
        }
        _ => ModalOutcome::Pending,
    }
}

pub fn draw(frame: &mut ratatui::Frame<'_>, area: Rect, form: &FilterForm) {
    let popup = centered_rect(area, 46, 11);
    frame.render_widget(Clear, popup);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(category_tabs(form.category));
    lines.push(Line::default());

    let (lower_label, upper_label) = form.field_labels();
    let (lower_value, upper_value) = form.visible_fields();
    lines.push(input_line(lower_label, lower_value, form.focus == FieldSlot::Lower));
    lines.push(input_line(upper_label, upper_value, form.focus == FieldSlot::Upper));

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Tab category  ↑/↓ field  Enter apply  x reset  Esc close",
        Style::default().fg(Color::Gray),
    )));

    let p = Paragraph::new(lines).block(Block::default().title("Filter").borders(Borders::ALL));
    frame.render_widget(p, popup);
}

fn category_tabs(active: FilterCategory) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, category) in [
        FilterCategory::Date,
        FilterCategory::NetIncome,
        FilterCategory::Revenue,
    ]
    .into_iter()
    .enumerate()
    {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        let style = if category == active {
            Style::default().fg(Color::Black).bg(Color::White)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", category.label()), style));
    }
    Line::from(spans)
}

fn input_line(label: &'static str, value: &str, focused: bool) -> Line<'static> {
    let marker = if focused { "» " } else { "  " };
    let style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let cursor = if focused { "_" } else { "" };
    Line::from(vec![
        Span::raw(marker),
        Span::styled(format!("{label}: {value}{cursor}"), style),
    ])
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}
