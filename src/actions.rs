/// Discrete commands the app understands, whatever input produced them.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Action {
    Toggle,
    Start,
    Pause,
    Reset,
    Lap,
    Export,
    Help,
    Quit,
}

const KEYMAP: &[(char, Action)] = &[
    ('s', Action::Toggle),
    ('r', Action::Reset),
    ('l', Action::Lap),
    ('e', Action::Export),
    ('h', Action::Help),
    ('?', Action::Help),
    ('q', Action::Quit),
    ('\r', Action::Toggle),
    ('\n', Action::Toggle),
];

impl Action {
    /// Keys are matched case-insensitively.
    pub fn from_key(key: char) -> Option<Self> {
        let key = key.to_ascii_lowercase();
        KEYMAP
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, action)| *action)
    }

    pub fn label(self) -> &'static str {
        match self {
            Action::Toggle => "Start/Pause",
            Action::Start => "Start",
            Action::Pause => "Pause",
            Action::Reset => "Reset",
            Action::Lap => "Lap",
            Action::Export => "Export",
            Action::Help => "Help",
            Action::Quit => "Quit",
        }
    }
}

pub const HELP_TEXT: &str = "STOPWATCH HELP\n\n\
     s      Start/Pause\n\
     Enter  Start/Pause\n\
     l      Record lap\n\
     r      Reset\n\
     e      Export laps (CSV)\n\
     h ?    Help\n\
     q      Quit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortcuts_ignore_case() {
        assert_eq!(Action::from_key('s'), Some(Action::Toggle));
        assert_eq!(Action::from_key('S'), Some(Action::Toggle));
        assert_eq!(Action::from_key('R'), Some(Action::Reset));
        assert_eq!(Action::from_key('l'), Some(Action::Lap));
        assert_eq!(Action::from_key('L'), Some(Action::Lap));
        assert_eq!(Action::from_key('E'), Some(Action::Export));
    }

    #[test]
    fn enter_toggles() {
        assert_eq!(Action::from_key('\n'), Some(Action::Toggle));
        assert_eq!(Action::from_key('\r'), Some(Action::Toggle));
    }

    #[test]
    fn unbound_keys_map_to_nothing() {
        assert_eq!(Action::from_key('x'), None);
        assert_eq!(Action::from_key(' '), None);
    }
}
