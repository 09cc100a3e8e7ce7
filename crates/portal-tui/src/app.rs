use std::sync::Arc;

use anyhow::Result;
use portal_config::{PreferenceStore, ViewMode};
use portal_core::{Present, Record};
use portal_engine::{ListController, Level, Mutation, MutationOutcome, Notification, ToastQueue};
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Searching,
    GoToPage,
    /// Holds the id of the record awaiting confirmation
    ConfirmDelete(String),
    ShowingHelp,
}

pub struct App<R> {
    pub controller: ListController<R>,
    pub toasts: Arc<ToastQueue>,
    pub prefs: PreferenceStore,
    pub view_mode: ViewMode,
    /// Row (or card) index within the current page
    pub selected: usize,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub status: Option<Notification>,
    /// Id of a confirmed delete that has not been sent yet
    pub pending_delete: Option<String>,
}

impl<R: Present> App<R> {
    pub async fn new(
        controller: ListController<R>,
        toasts: Arc<ToastQueue>,
        prefs: PreferenceStore,
    ) -> Self {
        let view_mode = prefs.view_mode(R::KIND.view_key());
        let mut app = Self {
            controller,
            toasts,
            prefs,
            view_mode,
            selected: 0,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            status: None,
            pending_delete: None,
        };
        app.load().await;
        app
    }

    pub fn now(&self) -> OffsetDateTime {
        self.controller.view().context().now
    }

    pub fn page_len(&self) -> usize {
        self.controller.view().derived().page().len()
    }

    pub fn selected_record(&self) -> Option<&R> {
        self.controller
            .view()
            .derived()
            .page()
            .get(self.selected)
            .copied()
    }

    fn info(&mut self, message: impl Into<String>) {
        self.status = Some(Notification {
            level: Level::Success,
            message: message.into(),
        });
    }

    fn alert(&mut self, message: impl Into<String>) {
        self.status = Some(Notification {
            level: Level::Error,
            message: message.into(),
        });
    }

    fn clamp_selection(&mut self) {
        let len = self.page_len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub fn next(&mut self) {
        let len = self.page_len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn previous(&mut self) {
        let len = self.page_len();
        if len > 0 {
            self.selected = if self.selected == 0 {
                len - 1
            } else {
                self.selected - 1
            };
        }
    }

    pub fn next_page(&mut self) {
        if self.controller.view_mut().next_page() {
            self.selected = 0;
        }
    }

    pub fn previous_page(&mut self) {
        if self.controller.view_mut().previous_page() {
            self.selected = 0;
        }
    }

    async fn load(&mut self) {
        if self.controller.refresh().await {
            let count = self.controller.view().collection().records().len();
            self.info(format!("Loaded {count} records from {}", self.controller.source_name()));
        } else if let Some(message) = self.controller.view().collection().error() {
            let message = message.to_string();
            self.alert(message);
        } else {
            self.alert("No data available");
        }
        self.clamp_selection();
    }

    /// Refetch with the clock moved to now; also the retry action
    pub async fn refresh(&mut self) {
        self.controller
            .view_mut()
            .set_now(portal_core::EvalContext::now_local().now);
        self.load().await;
    }

    pub fn start_search(&mut self) {
        self.input_buffer = self.controller.view().filters().search().to_string();
        self.input_mode = InputMode::Searching;
    }

    pub fn start_go_to_page(&mut self) {
        self.input_buffer.clear();
        self.input_mode = InputMode::GoToPage;
    }

    pub fn start_delete(&mut self) {
        match self.selected_record() {
            Some(record) => {
                let id = record.id().to_string();
                self.input_mode = InputMode::ConfirmDelete(id);
            }
            None => self.alert("Nothing selected"),
        }
    }

    pub fn toggle_help(&mut self) {
        self.input_mode = match self.input_mode {
            InputMode::ShowingHelp => InputMode::Normal,
            _ => InputMode::ShowingHelp,
        };
    }

    pub fn cancel_input(&mut self) {
        if self.input_mode == InputMode::Searching {
            self.controller.view_mut().set_search("");
            self.selected = 0;
        }
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
    }

    pub fn input_char(&mut self, c: char) {
        if self.input_mode == InputMode::GoToPage && !c.is_ascii_digit() {
            return;
        }
        self.input_buffer.push(c);
        self.apply_live_search();
    }

    pub fn input_backspace(&mut self) {
        self.input_buffer.pop();
        self.apply_live_search();
    }

    fn apply_live_search(&mut self) {
        if self.input_mode == InputMode::Searching {
            let query = self.input_buffer.clone();
            self.controller.view_mut().set_search(query);
            self.selected = 0;
        }
    }

    pub fn confirm_search(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
        let count = self.controller.view().filtered_count();
        self.info(format!("{count} matching records"));
    }

    pub fn confirm_go_to_page(&mut self) {
        let target = self.input_buffer.parse::<usize>().ok();
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();

        let Some(page) = target else {
            self.alert("Enter a page number");
            return;
        };
        if self.controller.view_mut().go_to_page(page) {
            self.selected = 0;
            self.info(format!("Page {page}"));
        } else {
            let total = self.controller.view().derived().total_pages;
            self.alert(format!("No page {page} (1-{total})"));
        }
    }

    /// Accepts the delete prompt; the caller redraws before `confirm_delete`
    /// so the saving marker is on screen while the request runs.
    pub fn begin_delete(&mut self) -> bool {
        let InputMode::ConfirmDelete(id) =
            std::mem::replace(&mut self.input_mode, InputMode::Normal)
        else {
            return false;
        };
        self.pending_delete = Some(id);
        true
    }

    pub fn is_saving(&self) -> bool {
        self.pending_delete.is_some() || self.controller.is_busy()
    }

    pub async fn confirm_delete(&mut self) {
        self.begin_delete();
        let Some(id) = self.pending_delete.take() else {
            return;
        };

        match self.controller.apply(Mutation::Delete(id)).await {
            MutationOutcome::Busy => self.alert("Another change is still being saved"),
            _ => {
                if let Some(toast) = self.toasts.drain().pop() {
                    self.status = Some(toast);
                }
            }
        }
        self.clamp_selection();
    }

    pub fn cycle_status(&mut self) {
        self.controller.view_mut().cycle_status();
        self.selected = 0;
        let selection = self
            .controller
            .view()
            .filters()
            .selection(portal_core::Field::Status)
            .to_string();
        self.info(format!("Status: {selection}"));
    }

    pub fn cycle_date(&mut self) {
        let next = self.controller.view().filters().date().cycle();
        self.controller.view_mut().set_date(next);
        self.selected = 0;
        self.info(format!("Date: {next}"));
    }

    pub fn clear_filters(&mut self) {
        self.controller.view_mut().clear_filters();
        self.selected = 0;
        self.info("Filters cleared");
    }

    pub fn toggle_view_mode(&mut self) {
        self.view_mode = self.view_mode.toggle();
        self.prefs.set_view_mode(R::KIND.view_key(), self.view_mode);
        self.info(format!("{} view", self.view_mode));
    }

    /// Writes pending preference changes
    pub fn close(self) -> Result<()> {
        self.prefs.close()
    }
}
