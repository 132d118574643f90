use crate::budget::{BudgetError, BudgetState};
use crate::config::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Expenses,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Expenses]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Expenses => write!(f, "Expenses"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    /// A rejected action is on screen; the next key only dismisses it.
    Alert,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Alert => write!(f, "ALERT"),
        }
    }
}

/// One per TUI session. Owns the budget state; nothing survives `drop`.
pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) alert_message: String,
    pub(crate) show_help: bool,
    pub(crate) settings: Settings,

    pub(crate) budget: BudgetState,

    // Expenses
    pub(crate) expense_index: usize,
    pub(crate) expense_scroll: usize,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(settings: Settings) -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            alert_message: String::new(),
            show_help: false,
            settings,

            budget: BudgetState::new(),

            expense_index: 0,
            expense_scroll: 0,

            visible_rows: 20,
        }
    }

    /// Block further input until the user acknowledges the error.
    pub(crate) fn alert(&mut self, err: &BudgetError) {
        self.alert_message = err.to_string();
        self.input_mode = InputMode::Alert;
    }

    pub(crate) fn dismiss_alert(&mut self) {
        self.alert_message.clear();
        self.input_mode = InputMode::Normal;
    }

    /// Open the command bar with `prefix` already typed.
    pub(crate) fn start_command(&mut self, prefix: &str) {
        self.command_input = prefix.to_string();
        self.input_mode = InputMode::Command;
    }

    /// Keep the expense cursor on the newest entry after an add.
    pub(crate) fn select_last_expense(&mut self) {
        let len = self.budget.expenses().len();
        crate::ui::util::scroll_to_bottom(
            &mut self.expense_index,
            &mut self.expense_scroll,
            len,
            self.visible_rows.max(1),
        );
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
