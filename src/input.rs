use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use desk_cat::PetAction;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Act(PetAction),
    ToggleWork,
    Speak,
    Quit,
}

#[derive(Clone, Debug)]
pub(crate) struct InputEvent {
    pub(crate) key: KeyCode,
    pub(crate) mods: KeyModifiers,
}

pub(crate) fn collect_input_nonblocking(max_frame_time: Duration) -> anyhow::Result<Vec<InputEvent>> {
    let mut out = Vec::new();

    let timeout = std::cmp::min(Duration::from_millis(1), max_frame_time);
    while event::poll(timeout)? {
        if let Event::Key(k) = event::read()? {
            if k.kind == KeyEventKind::Press {
                out.push(InputEvent {
                    key: k.code,
                    mods: k.modifiers,
                });
                if out.len() >= 32 {
                    break;
                }
            }
        }
    }
    Ok(out)
}

pub(crate) fn map_event(ev: &InputEvent) -> Option<Command> {
    if ev.key == KeyCode::Char('c') && ev.mods.contains(KeyModifiers::CONTROL) {
        return Some(Command::Quit);
    }
    match ev.key {
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::Act(PetAction::Pet)),
        KeyCode::Char('f') | KeyCode::Char('F') => Some(Command::Act(PetAction::Feed)),
        KeyCode::Char('g') | KeyCode::Char('G') => Some(Command::Act(PetAction::Play)),
        KeyCode::Char('w') | KeyCode::Char('W') => Some(Command::ToggleWork),
        KeyCode::Char(' ') => Some(Command::Speak),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}
