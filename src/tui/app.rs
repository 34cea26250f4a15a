use crossterm::event::{KeyCode, KeyModifiers};

use crate::activity::{Activity, Registry};
use crate::relay::Relay;
use crate::runner::Launch;

use super::log_pane::LogPane;

/// Number of lines to scroll with mouse wheel
const MOUSE_SCROLL_LINES: usize = 3;

/// Number of lines to scroll with PageUp/PageDown
const PAGE_SCROLL_LINES: usize = 10;

/// Launcher window state: the activity table, the log pane and the
/// warning modal. All of it lives on the UI thread.
pub struct LauncherApp<L: Launch> {
    pub(super) registry: Registry,
    /// Selected table row, if any
    pub(super) selected: Option<usize>,
    pub(super) log: LogPane,
    /// Whether the "no selection" warning modal is showing
    pub(super) show_warning: bool,
    /// Whether the user asked to exit
    pub(super) should_quit: bool,
    relay: Relay,
    launcher: L,
}

impl<L: Launch> LauncherApp<L> {
    pub fn new(registry: Registry, relay: Relay, launcher: L) -> Self {
        Self {
            registry,
            selected: None,
            log: LogPane::new(),
            show_warning: false,
            should_quit: false,
            relay,
            launcher,
        }
    }

    /// Move every queued relay entry into the log pane. Returns how many
    /// entries were taken.
    pub fn drain_relay(&mut self) -> usize {
        let entries = self.relay.drain_all();
        let count = entries.len();
        for entry in entries {
            self.log.append(entry);
        }
        count
    }

    /// Launch the selected activity, or raise the warning when nothing is
    /// selected.
    pub fn run_selected(&mut self) {
        let activity: Option<&Activity> = self.selected.and_then(|i| self.registry.get(i));
        match activity {
            Some(activity) => self.launcher.launch(activity),
            None => {
                tracing::debug!("run requested without a selection");
                self.show_warning = true;
            }
        }
    }

    /// Empty the log pane. Entries still queued show up on the next drain.
    pub fn clear_terminal(&mut self) {
        self.log.clear();
    }

    pub fn exit(&mut self) {
        self.should_quit = true;
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn warning_visible(&self) -> bool {
        self.show_warning
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index.filter(|&i| i < self.registry.len());
    }

    pub fn log(&self) -> &LogPane {
        &self.log
    }

    pub fn active_runs(&self) -> usize {
        self.launcher.active_runs()
    }

    fn select_next(&mut self) {
        if self.registry.is_empty() {
            return;
        }
        let last = self.registry.len() - 1;
        self.selected = Some(match self.selected {
            None => 0,
            Some(i) => (i + 1).min(last),
        });
    }

    fn select_previous(&mut self) {
        if self.registry.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            None => self.registry.len() - 1,
            Some(i) => i.saturating_sub(1),
        });
    }

    /// Handle a key event.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // The warning modal swallows everything until dismissed
        if self.show_warning {
            if matches!(key, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.show_warning = false;
            }
            return;
        }

        match key {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => self.exit(),
            KeyCode::Char('q') | KeyCode::Char('Q') => self.exit(),
            KeyCode::Enter | KeyCode::Char('r') => self.run_selected(),
            KeyCode::Char('c') => self.clear_terminal(),
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Esc => self.selected = None,
            KeyCode::PageUp => self.log.scroll_up(PAGE_SCROLL_LINES),
            KeyCode::PageDown => self.log.scroll_down(PAGE_SCROLL_LINES),
            KeyCode::Home => self.log.scroll_to_top(),
            KeyCode::End => self.log.scroll_to_bottom(),
            _ => {}
        }
    }

    /// Handle mouse scroll event.
    pub fn handle_mouse_scroll(&mut self, up: bool) {
        if self.show_warning {
            return;
        }
        if up {
            self.log.scroll_up(MOUSE_SCROLL_LINES);
        } else {
            self.log.scroll_down(MOUSE_SCROLL_LINES);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::{relay, LogEntry, RelaySender, Tag};
    use std::cell::RefCell;
    use std::path::Path;

    #[derive(Default)]
    struct RecordingLauncher {
        launched: RefCell<Vec<String>>,
    }

    impl Launch for &RecordingLauncher {
        fn launch(&self, activity: &Activity) {
            self.launched.borrow_mut().push(activity.name.clone());
        }
    }

    fn app(launcher: &RecordingLauncher) -> (LauncherApp<&RecordingLauncher>, RelaySender) {
        let (tx, rx) = relay();
        let registry = Registry::builtin(Path::new("/scripts"));
        (LauncherApp::new(registry, rx, launcher), tx)
    }

    fn press(app: &mut LauncherApp<&RecordingLauncher>, key: KeyCode) {
        app.handle_key(key, KeyModifiers::NONE);
    }

    #[test]
    fn test_run_without_selection_warns_and_never_launches() {
        let launcher = RecordingLauncher::default();
        let (mut app, _tx) = app(&launcher);

        press(&mut app, KeyCode::Enter);
        assert!(app.warning_visible());
        assert!(launcher.launched.borrow().is_empty());

        // Keys other than dismiss are swallowed by the modal
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit());
        assert!(app.warning_visible());

        press(&mut app, KeyCode::Esc);
        assert!(!app.warning_visible());

        press(&mut app, KeyCode::Char('r'));
        assert!(app.warning_visible());
        assert!(launcher.launched.borrow().is_empty());
    }

    #[test]
    fn test_run_with_selection_launches_that_row() {
        let launcher = RecordingLauncher::default();
        let (mut app, _tx) = app(&launcher);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected(), Some(1));
        press(&mut app, KeyCode::Enter);

        assert!(!app.warning_visible());
        assert_eq!(*launcher.launched.borrow(), vec!["Extract Embeddings"]);
    }

    #[test]
    fn test_selection_moves_within_bounds() {
        let launcher = RecordingLauncher::default();
        let (mut app, _tx) = app(&launcher);

        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected(), Some(3));
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected(), Some(3));
        for _ in 0..10 {
            press(&mut app, KeyCode::Char('k'));
        }
        assert_eq!(app.selected(), Some(0));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.selected(), None);

        app.select(Some(42));
        assert_eq!(app.selected(), None);
    }

    #[test]
    fn test_drain_appends_in_order_with_tags() {
        let launcher = RecordingLauncher::default();
        let (mut app, tx) = app(&launcher);

        tx.push(LogEntry::info("start"));
        tx.push(LogEntry::plain("out"));
        tx.push(LogEntry::error("err"));
        assert_eq!(app.drain_relay(), 3);
        assert_eq!(app.drain_relay(), 0);

        let tags: Vec<Tag> = app.log().lines().iter().map(|e| e.tag).collect();
        assert_eq!(tags, vec![Tag::Info, Tag::Plain, Tag::Error]);
    }

    #[test]
    fn test_clear_does_not_resurrect_old_text() {
        let launcher = RecordingLauncher::default();
        let (mut app, tx) = app(&launcher);

        tx.push(LogEntry::plain("old 1"));
        tx.push(LogEntry::plain("old 2"));
        app.drain_relay();

        press(&mut app, KeyCode::Char('c'));
        assert!(app.log().is_empty());
        app.drain_relay();
        assert!(app.log().is_empty());

        tx.push(LogEntry::plain("new"));
        app.drain_relay();
        assert_eq!(app.log().lines(), &[LogEntry::plain("new")]);
    }

    #[test]
    fn test_quit_keys() {
        let launcher = RecordingLauncher::default();
        let (mut app, _tx) = app(&launcher);
        app.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.should_quit());

        let (mut app, _tx) = self::app(&launcher);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn test_mouse_scroll_moves_log() {
        let launcher = RecordingLauncher::default();
        let (mut app, tx) = app(&launcher);
        for i in 0..20 {
            tx.push(LogEntry::plain(format!("{}", i)));
        }
        app.drain_relay();

        app.handle_mouse_scroll(true);
        assert_eq!(app.log().scroll_offset(), 3);
        app.handle_mouse_scroll(false);
        assert_eq!(app.log().scroll_offset(), 0);
    }
}
