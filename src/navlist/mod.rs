//! Keyboard focus over the result list.
//!
//! The rendered list is linear: suggestion/history rows first, then (in
//! history mode, when non-empty) a trailing clear-history row. [`NavList`]
//! tracks which row holds focus and moves it in response to next/previous
//! keys. Moving past the end is a silent no-op; moving up from the first row
//! returns focus to the text input.

/// Where keyboard focus currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The text input field.
    Input,
    /// Row `i` of the rendered list.
    Item(usize),
}

/// Focus state machine over a list of `total` focusable rows.
#[derive(Debug, Default)]
pub struct NavList {
    focus: Option<usize>,
}

impl NavList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&self) -> Focus {
        match self.focus {
            Some(i) => Focus::Item(i),
            None => Focus::Input,
        }
    }

    /// Bridge from the input field into the list: focus the first row.
    /// Returns whether focus actually moved (the caller suppresses the key's
    /// default behavior only in that case).
    pub fn enter_list(&mut self, total: usize) -> bool {
        if self.focus.is_none() && total > 0 {
            self.focus = Some(0);
            return true;
        }
        false
    }

    /// Move focus one row down; no-op at the end of the list.
    pub fn move_next(&mut self, total: usize) {
        if let Some(i) = self.focus
            && i + 1 < total
        {
            self.focus = Some(i + 1);
        }
    }

    /// Move focus one row up; from row 0, focus returns to the input.
    pub fn move_prev(&mut self) {
        self.focus = match self.focus {
            Some(0) | None => None,
            Some(i) => Some(i - 1),
        };
    }

    /// Put focus back on the input field.
    pub fn focus_input(&mut self) {
        self.focus = None;
    }

    /// Keep focus valid after the list shrank to `total` rows.
    pub fn clamp(&mut self, total: usize) {
        match self.focus {
            Some(_) if total == 0 => self.focus = None,
            Some(i) if i >= total => self.focus = Some(total - 1),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_list_focuses_first_row() {
        let mut nav = NavList::new();
        assert_eq!(nav.focus(), Focus::Input);

        assert!(nav.enter_list(3));
        assert_eq!(nav.focus(), Focus::Item(0));
    }

    #[test]
    fn test_enter_list_noop_when_empty() {
        let mut nav = NavList::new();
        assert!(!nav.enter_list(0));
        assert_eq!(nav.focus(), Focus::Input);
    }

    #[test]
    fn test_move_next_stops_at_end() {
        let mut nav = NavList::new();
        nav.enter_list(2);

        nav.move_next(2);
        assert_eq!(nav.focus(), Focus::Item(1));
        nav.move_next(2);
        assert_eq!(nav.focus(), Focus::Item(1));
    }

    #[test]
    fn test_move_prev_returns_to_input_from_first_row() {
        let mut nav = NavList::new();
        nav.enter_list(2);
        nav.move_next(2);

        nav.move_prev();
        assert_eq!(nav.focus(), Focus::Item(0));
        nav.move_prev();
        assert_eq!(nav.focus(), Focus::Input);
        // Already at the input: stays there
        nav.move_prev();
        assert_eq!(nav.focus(), Focus::Input);
    }

    #[test]
    fn test_move_next_from_input_is_noop() {
        let mut nav = NavList::new();
        nav.move_next(3);
        assert_eq!(nav.focus(), Focus::Input);
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut nav = NavList::new();
        nav.enter_list(5);
        nav.move_next(5);
        nav.move_next(5);
        assert_eq!(nav.focus(), Focus::Item(2));

        nav.clamp(2);
        assert_eq!(nav.focus(), Focus::Item(1));

        nav.clamp(0);
        assert_eq!(nav.focus(), Focus::Input);
    }
}
