//! Single-line city editor

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use weathervane_core::EventKind;

use super::Component;

pub struct CityInputProps<'a, A> {
    pub value: &'a str,
    /// Shown dimmed while `value` is empty
    pub placeholder: &'a str,
    pub is_focused: bool,
    /// Whether Enter submits; editing stays available either way
    pub can_submit: bool,
    pub on_change: fn(String) -> A,
    pub on_submit: fn(String) -> A,
}

/// Text field with a cursor
///
/// Emits `on_change` with the whole new value for every edit and `on_submit`
/// for Enter. Values wider than the field scroll sideways so the cursor stays
/// in view.
#[derive(Default)]
pub struct CityInput {
    /// Byte index into the value, always on a char boundary
    cursor: usize,
    /// Chars hidden off the left edge
    scroll: usize,
}

impl CityInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input with the cursor parked after `value`.
    pub fn at_end_of(value: &str) -> Self {
        Self {
            cursor: value.len(),
            scroll: 0,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Shift the window just enough to keep cursor column `col` visible.
    fn follow_cursor(&mut self, col: usize, width: usize) {
        if col < self.scroll {
            self.scroll = col;
        } else if col >= self.scroll + width {
            self.scroll = col + 1 - width;
        }
    }

    fn clamp_cursor(&mut self, value: &str) {
        self.cursor = self.cursor.min(value.len());
        while !value.is_char_boundary(self.cursor) {
            self.cursor -= 1;
        }
    }

    fn move_left(&mut self, value: &str) {
        if let Some((i, _)) = value[..self.cursor].char_indices().next_back() {
            self.cursor = i;
        }
    }

    fn move_right(&mut self, value: &str) {
        if let Some(c) = value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    fn insert(&mut self, value: &str, c: char) -> String {
        let mut next = String::with_capacity(value.len() + c.len_utf8());
        next.push_str(&value[..self.cursor]);
        next.push(c);
        next.push_str(&value[self.cursor..]);
        self.cursor += c.len_utf8();
        next
    }

    /// Backspace
    fn delete_before(&mut self, value: &str) -> Option<String> {
        let (start, _) = value[..self.cursor].char_indices().next_back()?;
        let next = format!("{}{}", &value[..start], &value[self.cursor..]);
        self.cursor = start;
        Some(next)
    }

    /// Delete
    fn delete_at(&self, value: &str) -> Option<String> {
        let c = value[self.cursor..].chars().next()?;
        Some(format!(
            "{}{}",
            &value[..self.cursor],
            &value[self.cursor + c.len_utf8()..]
        ))
    }
}

impl<A> Component<A> for CityInput {
    type Props<'a> = CityInputProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        if !props.is_focused {
            return None;
        }
        self.clamp_cursor(props.value);

        let EventKind::Key(key) = event else {
            return None;
        };

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('a') => {
                    self.cursor = 0;
                    None
                }
                KeyCode::Char('e') => {
                    self.cursor = props.value.len();
                    None
                }
                KeyCode::Char('u') => {
                    self.cursor = 0;
                    Some((props.on_change)(String::new()))
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(c) => Some((props.on_change)(self.insert(props.value, c))),
            KeyCode::Backspace => self.delete_before(props.value).map(props.on_change),
            KeyCode::Delete => self.delete_at(props.value).map(props.on_change),
            KeyCode::Left => {
                self.move_left(props.value);
                None
            }
            KeyCode::Right => {
                self.move_right(props.value);
                None
            }
            KeyCode::Home => {
                self.cursor = 0;
                None
            }
            KeyCode::End => {
                self.cursor = props.value.len();
                None
            }
            KeyCode::Enter if props.can_submit => {
                Some((props.on_submit)(props.value.to_string()))
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.clamp_cursor(props.value);

        let (text, style) = if props.value.is_empty() {
            (props.placeholder, Style::default().fg(Color::DarkGray))
        } else {
            (props.value, Style::default().fg(Color::White))
        };

        let border = if props.is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" City ".bold());
        let inner = block.inner(area);

        let col = props.value[..self.cursor].chars().count();
        if inner.width > 0 {
            self.follow_cursor(col, inner.width as usize);
        }
        let scroll = u16::try_from(self.scroll).unwrap_or(u16::MAX);

        frame.render_widget(
            Paragraph::new(text)
                .style(style)
                .block(block)
                .scroll((0, scroll)),
            area,
        );

        if props.is_focused && !inner.is_empty() {
            // follow_cursor keeps this below inner.width
            let offset = (col - self.scroll) as u16;
            frame.set_cursor_position((inner.x + offset, inner.y));
        }
    }
}
