use crossterm::event::KeyCode;
use alert_lens::input::{parse_main_command, UiCommand};

#[test]
fn parse_main_command_maps_parameter_keys_by_case() {
    assert_eq!(parse_main_command(&KeyCode::Char('t')), Some(UiCommand::NextTicker));
    assert_eq!(parse_main_command(&KeyCode::Char('T')), Some(UiCommand::PrevTicker));
    assert_eq!(parse_main_command(&KeyCode::Char('i')), Some(UiCommand::RaiseI));
    assert_eq!(parse_main_command(&KeyCode::Char('I')), Some(UiCommand::LowerI));
    assert_eq!(
        parse_main_command(&KeyCode::Char('n')),
        Some(UiCommand::RaiseNetworkDays)
    );
    assert_eq!(
        parse_main_command(&KeyCode::Char('N')),
        Some(UiCommand::LowerNetworkDays)
    );
    assert_eq!(parse_main_command(&KeyCode::Char('w')), Some(UiCommand::WidenWindow));
    assert_eq!(parse_main_command(&KeyCode::Char('W')), Some(UiCommand::NarrowWindow));
}

#[test]
fn parse_main_command_maps_toggles_case_insensitively() {
    for c in ['k', 'K'] {
        assert_eq!(
            parse_main_command(&KeyCode::Char(c)),
            Some(UiCommand::ToggleReturnKind)
        );
    }
    for c in ['c', 'C'] {
        assert_eq!(
            parse_main_command(&KeyCode::Char(c)),
            Some(UiCommand::ToggleCalendar)
        );
    }
    for c in ['g', 'G'] {
        assert_eq!(
            parse_main_command(&KeyCode::Char(c)),
            Some(UiCommand::ToggleNetwork)
        );
    }
}

#[test]
fn parse_main_command_maps_navigation_and_quit() {
    assert_eq!(parse_main_command(&KeyCode::Right), Some(UiCommand::NextDay));
    assert_eq!(parse_main_command(&KeyCode::Left), Some(UiCommand::PrevDay));
    assert_eq!(parse_main_command(&KeyCode::Char('q')), Some(UiCommand::Quit));
    assert_eq!(parse_main_command(&KeyCode::Esc), Some(UiCommand::Quit));
    assert_eq!(parse_main_command(&KeyCode::Char('z')), None);
    assert_eq!(parse_main_command(&KeyCode::Enter), None);
}
