use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::quota::QuotaSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyCommand {
    Quit,
    Refresh,
    ToggleGoals,
}

/// Everything the scheduler reacts to, multiplexed on one channel
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SchedulerEvent {
    PeriodicTick,
    FastTick,
    FileChanged,
    Key(KeyCommand),
    /// Terminal size changed; the layout must be redrawn
    Resize,
    /// A background quota fetch finished (`None` on any failure)
    QuotaFetched(Option<QuotaSnapshot>),
    ShutdownRequested,
}

/// Map a raw key press to a scheduler event; unbound keys are dropped
pub(crate) fn key_event(key: &KeyEvent) -> Option<SchedulerEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        // Raw mode swallows SIGINT, so Ctrl+C arrives as a key
        return matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
            .then_some(SchedulerEvent::ShutdownRequested);
    }
    let command = match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyCommand::Quit,
        KeyCode::Char('r') | KeyCode::Char('R') => KeyCommand::Refresh,
        KeyCode::Char('g') | KeyCode::Char('G') => KeyCommand::ToggleGoals,
        _ => return None,
    };
    Some(SchedulerEvent::Key(command))
}

/// Map any terminal input; only bound keys and resizes matter
pub(crate) fn terminal_event(event: &Event) -> Option<SchedulerEvent> {
    match event {
        Event::Key(key) => key_event(key),
        Event::Resize(..) => Some(SchedulerEvent::Resize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn bound_keys() {
        let none = KeyModifiers::NONE;
        assert_eq!(
            key_event(&press(KeyCode::Char('q'), none)),
            Some(SchedulerEvent::Key(KeyCommand::Quit))
        );
        assert_eq!(
            key_event(&press(KeyCode::Esc, none)),
            Some(SchedulerEvent::Key(KeyCommand::Quit))
        );
        assert_eq!(
            key_event(&press(KeyCode::Char('r'), none)),
            Some(SchedulerEvent::Key(KeyCommand::Refresh))
        );
        assert_eq!(
            key_event(&press(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            Some(SchedulerEvent::Key(KeyCommand::ToggleGoals))
        );
        assert_eq!(key_event(&press(KeyCode::Char('x'), none)), None);
    }

    #[test]
    fn ctrl_c_requests_shutdown() {
        assert_eq!(
            key_event(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(SchedulerEvent::ShutdownRequested)
        );
        assert_eq!(key_event(&press(KeyCode::Char('r'), KeyModifiers::CONTROL)), None);
    }

    #[test]
    fn releases_are_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(key_event(&release), None);
    }

    #[test]
    fn resize_triggers_redraw() {
        assert_eq!(
            terminal_event(&Event::Resize(120, 40)),
            Some(SchedulerEvent::Resize)
        );
        assert_eq!(
            terminal_event(&Event::Key(press(KeyCode::Char('q'), KeyModifiers::NONE))),
            Some(SchedulerEvent::Key(KeyCommand::Quit))
        );
        assert_eq!(terminal_event(&Event::FocusGained), None);
    }
}
