//! Command system for user actions

use crate::{AppError, Direction, Engine};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Command identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommandId(pub String);

impl CommandId {
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    // Navigation commands
    pub const NAV_STEP_LEFT: &'static str = "nav.step_left";
    pub const NAV_STEP_RIGHT: &'static str = "nav.step_right";
    pub const NAV_RANDOM: &'static str = "nav.random";
    pub const NAV_BACK: &'static str = "nav.back";

    // File commands
    pub const FILE_QUARANTINE: &'static str = "file.quarantine";

    // App commands
    pub const APP_OPEN_FOLDER: &'static str = "app.open_folder";
    pub const APP_QUIT: &'static str = "app.quit";
}

/// Command with optional parameters
#[derive(Debug, Clone)]
pub struct Command {
    pub id: CommandId,
    pub params: CommandParams,
}

/// Command parameters
#[derive(Debug, Clone, Default)]
pub struct CommandParams {
    pub path_value: Option<PathBuf>,
}

impl Command {
    pub fn new(id: &str) -> Self {
        Self {
            id: CommandId::new(id),
            params: CommandParams::default(),
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.params.path_value = Some(path.into());
        self
    }
}

/// Raw input from the display layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Named key, e.g. "Left", "r", "Delete"
    Key(String),
    /// Mouse wheel delta; positive is away from the user
    Wheel(i32),
}

/// Key-to-command lookup built from the configured bindings
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    by_key: HashMap<String, String>,
}

impl Bindings {
    /// Invert a command -> keys map. Later commands win on duplicate keys.
    pub fn from_config(keybindings: &HashMap<String, Vec<String>>) -> Self {
        let mut ids: Vec<&String> = keybindings.keys().collect();
        ids.sort();

        let mut by_key = HashMap::new();
        for id in ids {
            for key in &keybindings[id] {
                if let Some(previous) = by_key.insert(key.clone(), id.clone()) {
                    tracing::warn!("Key {} bound to both {} and {}", key, previous, id);
                }
            }
        }

        Self { by_key }
    }

    /// Map an input event to a command, if bound.
    ///
    /// Wheel up steps left and wheel down steps right, regardless of keys.
    pub fn resolve(&self, event: &InputEvent) -> Option<Command> {
        match event {
            InputEvent::Key(key) => self.by_key.get(key).map(|id| Command::new(id)),
            InputEvent::Wheel(delta) if *delta > 0 => Some(Command::new(CommandId::NAV_STEP_LEFT)),
            InputEvent::Wheel(delta) if *delta < 0 => Some(Command::new(CommandId::NAV_STEP_RIGHT)),
            InputEvent::Wheel(_) => None,
        }
    }
}

/// What a dispatched command did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Position may have changed; re-display
    Moved,
    /// Nothing to do (empty history, unknown or disabled command)
    Ignored,
    Quarantined(PathBuf),
    DirectoryChanged { len: usize },
    Quit,
}

/// Routes commands to the engine
pub struct CommandDispatcher {
    engine: Arc<Engine>,
}

impl CommandDispatcher {
    pub fn new(engine: Arc<Engine>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &Arc<Engine> {
        &self.engine
    }

    pub fn dispatch(&self, cmd: &Command) -> Result<CommandOutcome, AppError> {
        if !self.can_execute(cmd) {
            tracing::debug!("Command {} cannot be executed in current context", cmd.id.as_str());
            return Ok(CommandOutcome::Ignored);
        }

        let outcome = match cmd.id.as_str() {
            CommandId::NAV_STEP_LEFT => {
                self.engine.step(Direction::Left);
                CommandOutcome::Moved
            }
            CommandId::NAV_STEP_RIGHT => {
                self.engine.step(Direction::Right);
                CommandOutcome::Moved
            }
            CommandId::NAV_RANDOM => {
                self.engine.jump_random(true)?;
                CommandOutcome::Moved
            }
            CommandId::NAV_BACK => {
                if self.engine.go_back() {
                    CommandOutcome::Moved
                } else {
                    CommandOutcome::Ignored
                }
            }
            CommandId::FILE_QUARANTINE => {
                CommandOutcome::Quarantined(self.engine.quarantine_current()?)
            }
            CommandId::APP_OPEN_FOLDER => match &cmd.params.path_value {
                Some(path) => CommandOutcome::DirectoryChanged {
                    len: self.engine.change_directory(path)?,
                },
                None => {
                    tracing::debug!("Open folder without a path");
                    CommandOutcome::Ignored
                }
            },
            CommandId::APP_QUIT => CommandOutcome::Quit,
            other => {
                tracing::warn!("Unknown command: {}", other);
                CommandOutcome::Ignored
            }
        };

        Ok(outcome)
    }

    /// Navigation and quarantine need something on screen
    pub fn can_execute(&self, cmd: &Command) -> bool {
        match cmd.id.as_str() {
            CommandId::NAV_STEP_LEFT
            | CommandId::NAV_STEP_RIGHT
            | CommandId::NAV_RANDOM
            | CommandId::NAV_BACK
            | CommandId::FILE_QUARANTINE => self.engine.catalog_len() > 0,
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AppConfig;
    use std::fs;
    use tempfile::TempDir;

    fn dispatcher(names: &[&str]) -> (TempDir, CommandDispatcher) {
        let temp = TempDir::new().unwrap();
        let images = temp.path().join("images");
        fs::create_dir(&images).unwrap();
        for name in names {
            fs::write(images.join(name), b"x").unwrap();
        }
        let engine = Arc::new(Engine::new(&images, temp.path().join("trash")));
        (temp, CommandDispatcher::new(engine))
    }

    #[test]
    fn test_default_bindings_resolve() {
        let bindings = Bindings::from_config(&AppConfig::default().keybindings);

        let cmd = bindings.resolve(&InputEvent::Key("Right".into())).unwrap();
        assert_eq!(cmd.id.as_str(), CommandId::NAV_STEP_RIGHT);

        let cmd = bindings.resolve(&InputEvent::Key("Delete".into())).unwrap();
        assert_eq!(cmd.id.as_str(), CommandId::FILE_QUARANTINE);

        assert!(bindings.resolve(&InputEvent::Key("F12".into())).is_none());
    }

    #[test]
    fn test_wheel_steps() {
        let bindings = Bindings::default();

        let up = bindings.resolve(&InputEvent::Wheel(120)).unwrap();
        assert_eq!(up.id.as_str(), CommandId::NAV_STEP_LEFT);

        let down = bindings.resolve(&InputEvent::Wheel(-120)).unwrap();
        assert_eq!(down.id.as_str(), CommandId::NAV_STEP_RIGHT);

        assert!(bindings.resolve(&InputEvent::Wheel(0)).is_none());
    }

    #[test]
    fn test_dispatch_navigation() {
        let (_temp, d) = dispatcher(&["a.png", "b.png", "c.png"]);

        let outcome = d.dispatch(&Command::new(CommandId::NAV_STEP_RIGHT)).unwrap();
        assert_eq!(outcome, CommandOutcome::Moved);
        assert_eq!(d.engine().current_item().unwrap().label, "b.png");

        let outcome = d.dispatch(&Command::new(CommandId::NAV_BACK)).unwrap();
        assert_eq!(outcome, CommandOutcome::Moved);
        assert_eq!(d.engine().current_item().unwrap().label, "a.png");

        let outcome = d.dispatch(&Command::new(CommandId::NAV_BACK)).unwrap();
        assert_eq!(outcome, CommandOutcome::Ignored);

        let outcome = d.dispatch(&Command::new(CommandId::NAV_RANDOM)).unwrap();
        assert_eq!(outcome, CommandOutcome::Moved);
        assert_eq!(d.engine().history_len(), 1);
    }

    #[test]
    fn test_dispatch_disabled_on_empty_catalog() {
        let (_temp, d) = dispatcher(&[]);

        for id in [
            CommandId::NAV_STEP_LEFT,
            CommandId::NAV_RANDOM,
            CommandId::FILE_QUARANTINE,
        ] {
            let cmd = Command::new(id);
            assert!(!d.can_execute(&cmd));
            assert_eq!(d.dispatch(&cmd).unwrap(), CommandOutcome::Ignored);
        }
        assert_eq!(d.engine().history_len(), 0);
    }

    #[test]
    fn test_dispatch_quarantine_and_open() {
        let (temp, d) = dispatcher(&["a.png", "b.png"]);

        let outcome = d.dispatch(&Command::new(CommandId::FILE_QUARANTINE)).unwrap();
        assert_eq!(
            outcome,
            CommandOutcome::Quarantined(temp.path().join("trash").join("a.png"))
        );

        let other = temp.path().join("other");
        fs::create_dir(&other).unwrap();
        let cmd = Command::new(CommandId::APP_OPEN_FOLDER).with_path(&other);
        assert_eq!(
            d.dispatch(&cmd).unwrap(),
            CommandOutcome::DirectoryChanged { len: 0 }
        );

        let cmd = Command::new(CommandId::APP_OPEN_FOLDER).with_path(temp.path().join("missing"));
        assert!(d.dispatch(&cmd).is_err());
        assert_eq!(d.engine().directory(), other);
    }

    #[test]
    fn test_dispatch_quit_and_unknown() {
        let (_temp, d) = dispatcher(&["a.png"]);
        assert_eq!(
            d.dispatch(&Command::new(CommandId::APP_QUIT)).unwrap(),
            CommandOutcome::Quit
        );
        assert_eq!(
            d.dispatch(&Command::new("view.zoom_in")).unwrap(),
            CommandOutcome::Ignored
        );
    }
}
