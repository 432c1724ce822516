use crossterm::event::KeyCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    NextTicker,
    PrevTicker,
    RaiseI,
    LowerI,
    RaiseNetworkDays,
    LowerNetworkDays,
    WidenWindow,
    NarrowWindow,
    ToggleReturnKind,
    ToggleCalendar,
    ToggleNetwork,
    NextDay,
    PrevDay,
    Quit,
}

/// Lower-case keys raise or advance, upper-case keys lower or go back.
pub fn parse_main_command(key_code: &KeyCode) -> Option<UiCommand> {
    match key_code {
        KeyCode::Right => Some(UiCommand::NextDay),
        KeyCode::Left => Some(UiCommand::PrevDay),
        KeyCode::Esc => Some(UiCommand::Quit),
        KeyCode::Char(c) => match c {
            't' => Some(UiCommand::NextTicker),
            'T' => Some(UiCommand::PrevTicker),
            'i' => Some(UiCommand::RaiseI),
            'I' => Some(UiCommand::LowerI),
            'n' => Some(UiCommand::RaiseNetworkDays),
            'N' => Some(UiCommand::LowerNetworkDays),
            'w' => Some(UiCommand::WidenWindow),
            'W' => Some(UiCommand::NarrowWindow),
            'k' | 'K' => Some(UiCommand::ToggleReturnKind),
            'c' | 'C' => Some(UiCommand::ToggleCalendar),
            'g' | 'G' => Some(UiCommand::ToggleNetwork),
            'q' | 'Q' => Some(UiCommand::Quit),
            _ => None,
        },
        _ => None,
    }
}
