#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    Refresh,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    ScrollTop,
    ScrollBottom,
    ToggleHelp,
    CloseHelp,
    CycleTheme,
    None,
}
