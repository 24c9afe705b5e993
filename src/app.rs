use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::config::AppConfig;
use crate::draft::{claim::numbered_events, SeriesDraft};
use crate::series::{access::Viewer, Series, SeriesList};
use crate::theme::Theme;

/// How long a status message stays in the info line
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Help,
    Draft,
}

pub struct App {
    pub popup: Popup,

    // Series list (left box)
    pub series: SeriesList,
    pub selected: usize,

    // Visibility
    pub viewer: Viewer,
    pub filter: bool,

    // Drafts by series id, generated once per series
    pub drafts: HashMap<u64, SeriesDraft>,

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,
    pub status_is_error: bool,

    pub theme: Theme,
    pub config: AppConfig,
    rng: StdRng,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let rng = match config.draft.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            popup: Popup::None,
            series: SeriesList::new(),
            selected: 0,
            viewer: config.viewer(),
            filter: config.viewer.filter_tui,
            drafts: HashMap::new(),
            status_message: None,
            status_message_time: None,
            status_is_error: false,
            theme: Theme::from_config(&config.theme),
            config,
            rng,
        }
    }

    /// Runs once, after construction and before the first draw
    pub fn mount(&mut self) {
        self.series.mount();
    }

    /// Series in display order, after visibility filtering if enabled
    pub fn rows(&self) -> Vec<&Series> {
        if self.filter {
            self.viewer.visible_series(self.series.items())
        } else {
            self.series.items().iter().collect()
        }
    }

    pub fn selected_series(&self) -> Option<&Series> {
        self.rows().get(self.selected).copied()
    }

    /// Set a status message (auto-clears after 3 seconds)
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
        self.status_is_error = false;
    }

    /// Like `set_status`, drawn in the danger color
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.set_status(msg);
        self.status_is_error = true;
    }

    pub fn tick(&mut self) {
        if let Some(at) = self.status_message_time {
            if at.elapsed() >= STATUS_TIMEOUT {
                self.status_message = None;
                self.status_message_time = None;
                self.status_is_error = false;
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.popup {
            Popup::None => self.handle_normal_key(key),
            Popup::Help => {
                if matches!(
                    key.code,
                    KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Enter | KeyCode::Char('q')
                ) {
                    self.popup = Popup::None;
                }
                Ok(())
            }
            Popup::Draft => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => self.claim_next(),
                KeyCode::Esc | KeyCode::Char('q') => {
                    self.popup = Popup::None;
                    Ok(())
                }
                _ => Ok(()),
            },
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.move_up(),
            KeyCode::Char('d') => self.generate_draft()?,
            KeyCode::Enter | KeyCode::Char(' ') => {
                if self.draft_for_selected().is_some() {
                    self.popup = Popup::Draft;
                }
            }
            KeyCode::Char('f') => {
                self.filter = !self.filter;
                self.selected = 0;
                let msg = if self.filter {
                    format!("Showing series visible to {}", self.viewer.label())
                } else {
                    "Showing all series".to_string()
                };
                self.set_status(msg);
            }
            KeyCode::Char('?') | KeyCode::Char('h') => self.popup = Popup::Help,
            _ => {}
        }
        Ok(())
    }

    fn move_down(&mut self) {
        let len = self.rows().len();
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// The draft of the selected series, if one was generated
    pub fn draft_for_selected(&self) -> Option<&SeriesDraft> {
        let id = self.selected_series()?.id;
        self.drafts.get(&id)
    }

    /// Generation is one-time per series; an existing draft is reopened as is.
    fn generate_draft(&mut self) -> Result<()> {
        let Some(series) = self.selected_series().cloned() else {
            self.set_status("No series selected");
            return Ok(());
        };

        if self.drafts.contains_key(&series.id) {
            self.set_status(format!("Draft for series {} already generated", series.id));
            self.popup = Popup::Draft;
            return Ok(());
        }

        let events = numbered_events(self.config.draft.event_count);
        let draft = SeriesDraft::new(&series, events, &mut self.rng)?;
        self.set_status(draft.order.summary());
        self.drafts.insert(series.id, draft);
        self.popup = Popup::Draft;
        Ok(())
    }

    /// Current picker takes the first open event
    fn claim_next(&mut self) -> Result<()> {
        let Some(id) = self.selected_series().map(|s| s.id) else {
            anyhow::bail!("No series selected");
        };
        let Some(draft) = self.drafts.get_mut(&id) else {
            anyhow::bail!("No draft generated");
        };

        let Some(picker) = draft.current_picker() else {
            self.set_status("The draft is complete");
            return Ok(());
        };
        let event = draft
            .first_available()
            .map(|e| e.id)
            .ok_or_else(|| anyhow::anyhow!("No events left to claim"))?;

        let receipt = draft.claim(picker, event)?;
        tracing::debug!("Series {} event {} now hosted by {}", id, receipt.event, receipt.user);
        self.set_status(receipt.message());
        Ok(())
    }
}
