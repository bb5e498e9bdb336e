use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::warn;

use crate::action::Action;
use crate::config::{Config, parse_key};
use crate::rows::{DisplayRow, build_rows};
use crate::system::collector::Collector;
use crate::system::snapshot::Snapshot;
use crate::ui::table;
use crate::ui::theme::{ColorSupport, Theme, ThemeKind, resolve_color_support};

#[derive(Debug, Clone)]
pub struct ResolvedKeybinds {
    pub quit: KeyCode,
    pub refresh: KeyCode,
    pub help: KeyCode,
    pub cycle_theme: KeyCode,
    pub top: KeyCode,
    pub bottom: KeyCode,
}

impl ResolvedKeybinds {
    pub fn from_config(kb: &crate::config::KeybindsConfig) -> Self {
        Self {
            quit: parse_key(&kb.quit).unwrap_or(KeyCode::Char('q')),
            refresh: parse_key(&kb.refresh).unwrap_or(KeyCode::Char('r')),
            help: parse_key(&kb.help).unwrap_or(KeyCode::Char('?')),
            cycle_theme: parse_key(&kb.cycle_theme).unwrap_or(KeyCode::Char('t')),
            top: parse_key(&kb.top).unwrap_or(KeyCode::Char('g')),
            bottom: parse_key(&kb.bottom).unwrap_or(KeyCode::Char('G')),
        }
    }

    /// Returns (key_label, description) pairs for all configurable keybinds.
    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        let mut entries = vec![
            (key_label(self.quit), "Quit"),
            (key_label(self.refresh), "Refresh snapshot"),
            (key_label(self.cycle_theme), "Cycle theme"),
            (key_label(self.top), "Scroll to top"),
            (key_label(self.bottom), "Scroll to bottom"),
            (key_label(self.help), "Toggle help"),
        ];
        entries.push(("↑↓".to_string(), "Scroll"));
        entries.push(("PgUp/PgDn".to_string(), "Page"));
        entries.push(("Ctrl+C".to_string(), "Quit (always)"));
        entries
    }
}

fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        _ => "?".to_string(),
    }
}

pub struct App {
    pub running: bool,
    /// Last-known-good snapshot; kept across failed refreshes.
    pub snapshot: Option<Snapshot>,
    pub rows: Vec<DisplayRow>,
    pub scroll: usize,
    pub show_help: bool,
    pub theme: Theme,
    pub theme_kind: ThemeKind,
    pub color_support: ColorSupport,
    pub status_message: Option<(String, Instant)>,
    pub keybinds: ResolvedKeybinds,
    viewport_lines: usize,
    refresh_in_flight: bool,
    refresh_pending: bool,
    wants_collect: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        let color_support = resolve_color_support(&config.general.color_support);
        let theme_kind = ThemeKind::from_config_str(&config.general.theme);
        let theme = Theme::from_config(theme_kind, color_support);
        let keybinds = ResolvedKeybinds::from_config(&config.keybinds);

        let mut app = App {
            running: true,
            snapshot: None,
            rows: Vec::new(),
            scroll: 0,
            show_help: false,
            theme,
            theme_kind,
            color_support,
            status_message: None,
            keybinds,
            viewport_lines: 0,
            refresh_in_flight: false,
            refresh_pending: false,
            wants_collect: false,
        };

        // Initial collection is synchronous; the first frame should
        // already show data.
        match Collector::new().collect() {
            Ok(snapshot) => app.install_snapshot(snapshot),
            Err(err) => {
                warn!(error = %err, "initial collection failed");
                app.status_message = Some((format!("collection failed: {err}"), Instant::now()));
            }
        }
        app
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }
        if self.show_help {
            // Any dismissal key closes the overlay; everything else is
            // ignored while it is open.
            return match key.code {
                KeyCode::Esc => Action::CloseHelp,
                code if code == self.keybinds.quit || code == self.keybinds.help => {
                    Action::CloseHelp
                }
                _ => Action::None,
            };
        }

        match key.code {
            code if code == self.keybinds.quit => Action::Quit,
            code if code == self.keybinds.refresh => Action::Refresh,
            code if code == self.keybinds.help => Action::ToggleHelp,
            code if code == self.keybinds.cycle_theme => Action::CycleTheme,
            code if code == self.keybinds.top => Action::ScrollTop,
            code if code == self.keybinds.bottom => Action::ScrollBottom,
            KeyCode::Up | KeyCode::Char('k') => Action::ScrollUp,
            KeyCode::Down | KeyCode::Char('j') => Action::ScrollDown,
            KeyCode::PageUp => Action::PageUp,
            KeyCode::PageDown => Action::PageDown,
            KeyCode::Home => Action::ScrollTop,
            KeyCode::End => Action::ScrollBottom,
            _ => Action::None,
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::Refresh => self.request_refresh(),
            Action::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            Action::ScrollDown => self.set_scroll(self.scroll + 1),
            Action::PageUp => self.scroll = self.scroll.saturating_sub(self.viewport_lines.max(1)),
            Action::PageDown => self.set_scroll(self.scroll + self.viewport_lines.max(1)),
            Action::ScrollTop => self.scroll = 0,
            Action::ScrollBottom => self.set_scroll(usize::MAX),
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::CloseHelp => self.show_help = false,
            Action::CycleTheme => {
                self.theme_kind = self.theme_kind.next();
                self.theme = Theme::from_config(self.theme_kind, self.color_support);
            }
            Action::None => {}
        }
    }

    /// Records a refresh request under the at-most-one-in-flight
    /// policy: a request during an in-flight pass is coalesced into a
    /// single follow-up collection.
    pub fn request_refresh(&mut self) {
        if self.refresh_in_flight {
            self.refresh_pending = true;
        } else {
            self.refresh_in_flight = true;
            self.wants_collect = true;
        }
    }

    /// Drains the "start a collection now" flag; the caller owns
    /// actually spawning the collection task.
    pub fn take_collect_request(&mut self) -> bool {
        std::mem::take(&mut self.wants_collect)
    }

    pub fn refresh_in_flight(&self) -> bool {
        self.refresh_in_flight
    }

    pub fn apply_snapshot(&mut self, snapshot: Snapshot) {
        self.install_snapshot(snapshot);
        self.status_message = Some(("Refreshed".to_string(), Instant::now()));
        self.finish_refresh();
    }

    /// A failed refresh keeps the previous snapshot and rows; only the
    /// status line changes.
    pub fn apply_failure(&mut self, message: String) {
        warn!(error = %message, "refresh failed");
        self.status_message = Some((message, Instant::now()));
        self.finish_refresh();
    }

    fn install_snapshot(&mut self, snapshot: Snapshot) {
        self.rows = build_rows(&snapshot);
        self.snapshot = Some(snapshot);
        self.clamp_scroll();
    }

    fn finish_refresh(&mut self) {
        self.refresh_in_flight = false;
        if self.refresh_pending {
            self.refresh_pending = false;
            self.refresh_in_flight = true;
            self.wants_collect = true;
        }
    }

    pub fn set_viewport(&mut self, lines: usize) {
        self.viewport_lines = lines;
        self.clamp_scroll();
    }

    fn set_scroll(&mut self, target: usize) {
        self.scroll = target;
        self.clamp_scroll();
    }

    fn clamp_scroll(&mut self) {
        let max = table::total_lines(&self.rows).saturating_sub(self.viewport_lines);
        self.scroll = self.scroll.min(max);
    }

    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        self.keybinds.help_entries()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeybindsConfig;
    use crate::system::snapshot::{CpuInfo, MemoryInfo};

    fn test_snapshot() -> Snapshot {
        Snapshot {
            cpu: CpuInfo {
                physical_cores: Some(4),
                logical_cores: 8,
            },
            memory: Some(MemoryInfo {
                total_bytes: 8 * 1024 * 1024 * 1024,
                available_bytes: 4 * 1024 * 1024 * 1024,
                swap_total_bytes: 0,
                swap_used_bytes: 0,
            }),
            process_limits: None,
            filesystem_limits: None,
            mounts: Vec::new(),
        }
    }

    fn test_app() -> App {
        let mut app = App {
            running: true,
            snapshot: None,
            rows: Vec::new(),
            scroll: 0,
            show_help: false,
            theme: Theme::from_config(ThemeKind::Dark, ColorSupport::Mono),
            theme_kind: ThemeKind::Dark,
            color_support: ColorSupport::Mono,
            status_message: None,
            keybinds: ResolvedKeybinds::from_config(&KeybindsConfig::default()),
            viewport_lines: 10,
            refresh_in_flight: false,
            refresh_pending: false,
            wants_collect: false,
        };
        app.install_snapshot(test_snapshot());
        app
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn refresh_requests_coalesce_to_one_followup() {
        let mut app = test_app();

        app.dispatch(Action::Refresh);
        assert!(app.take_collect_request(), "first request starts a pass");
        assert!(app.refresh_in_flight());

        // Two more requests while the pass is in flight.
        app.dispatch(Action::Refresh);
        app.dispatch(Action::Refresh);
        assert!(!app.take_collect_request(), "no overlapping collection");

        app.apply_snapshot(test_snapshot());
        assert!(
            app.take_collect_request(),
            "coalesced requests yield exactly one follow-up"
        );
        assert!(app.refresh_in_flight());

        app.apply_snapshot(test_snapshot());
        assert!(!app.take_collect_request(), "queue drained");
        assert!(!app.refresh_in_flight());
    }

    #[test]
    fn failed_refresh_keeps_last_known_good_rows() {
        let mut app = test_app();
        let rows_before = app.rows.clone();
        let snapshot_before = app.snapshot.clone();

        app.dispatch(Action::Refresh);
        assert!(app.take_collect_request());
        app.apply_failure("refresh failed: simulated".to_string());

        assert_eq!(app.rows, rows_before);
        assert_eq!(app.snapshot, snapshot_before);
        let (msg, _) = app.status_message.as_ref().expect("failure notice");
        assert!(msg.contains("simulated"));
    }

    #[test]
    fn key_mapping_defaults() {
        let app = test_app();
        assert_eq!(app.map_key(key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(app.map_key(key(KeyCode::Char('r'))), Action::Refresh);
        assert_eq!(app.map_key(key(KeyCode::Char('?'))), Action::ToggleHelp);
        assert_eq!(app.map_key(key(KeyCode::Up)), Action::ScrollUp);
        assert_eq!(app.map_key(key(KeyCode::Char('j'))), Action::ScrollDown);
        assert_eq!(app.map_key(key(KeyCode::Char('G'))), Action::ScrollBottom);
        assert_eq!(app.map_key(key(KeyCode::F(5))), Action::None);
        assert_eq!(
            app.map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
    }

    #[test]
    fn help_overlay_swallows_keys_until_dismissed() {
        let mut app = test_app();
        app.dispatch(Action::ToggleHelp);
        assert!(app.show_help);
        assert_eq!(app.map_key(key(KeyCode::Char('r'))), Action::None);
        assert_eq!(app.map_key(key(KeyCode::Esc)), Action::CloseHelp);
        app.dispatch(Action::CloseHelp);
        assert!(!app.show_help);
    }

    #[test]
    fn remapped_quit_key_dismisses_help() {
        let mut app = test_app();
        app.keybinds.quit = KeyCode::Char('x');
        app.dispatch(Action::ToggleHelp);

        assert_eq!(app.map_key(key(KeyCode::Char('x'))), Action::CloseHelp);
        // The default quit key is just another swallowed key once remapped.
        assert_eq!(app.map_key(key(KeyCode::Char('q'))), Action::None);
        assert_eq!(app.map_key(key(KeyCode::Esc)), Action::CloseHelp);
    }

    #[test]
    fn scroll_clamps_to_content() {
        let mut app = test_app();
        app.dispatch(Action::ScrollBottom);
        let bottom = app.scroll;
        assert!(bottom <= table::total_lines(&app.rows));

        app.dispatch(Action::ScrollDown);
        assert_eq!(app.scroll, bottom, "cannot scroll past the end");

        app.dispatch(Action::ScrollTop);
        assert_eq!(app.scroll, 0);
        app.dispatch(Action::ScrollUp);
        assert_eq!(app.scroll, 0, "cannot scroll above the top");
    }

    #[test]
    fn cycle_theme_flips_kind() {
        let mut app = test_app();
        app.dispatch(Action::CycleTheme);
        assert_eq!(app.theme_kind, ThemeKind::Light);
        app.dispatch(Action::CycleTheme);
        assert_eq!(app.theme_kind, ThemeKind::Dark);
    }
}
