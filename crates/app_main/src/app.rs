//! Application main loop
//!
//! A line-driven stand-in for the viewer window: each input line is a key
//! name (resolved through the configured bindings), `wheel up|down`, or
//! `open <folder>`. After every action the current item is printed for the
//! display surface to pick up.

use anyhow::Result;
use app_core::{
    AppConfig, AppError, Bindings, Command, CommandDispatcher, CommandId, CommandOutcome, Engine,
    InputEvent, RefreshEvent, RefreshLoop, ViewSnapshot,
};
use crossbeam_channel::{bounded, select, Receiver};
use std::io::BufRead;
use std::sync::Arc;

/// Main application state for the input loop
struct App {
    dispatcher: CommandDispatcher,
    bindings: Bindings,
}

impl App {
    fn new(engine: Arc<Engine>, config: &AppConfig) -> Self {
        Self {
            dispatcher: CommandDispatcher::new(engine),
            bindings: Bindings::from_config(&config.keybindings),
        }
    }

    /// Handle one input line. Returns `false` once the user asked to quit.
    fn handle_line(&self, line: &str) -> bool {
        let Some(cmd) = parse_line(line, &self.bindings) else {
            if !line.trim().is_empty() {
                println!("unbound input: {}", line.trim());
            }
            return true;
        };

        match self.dispatcher.dispatch(&cmd) {
            Ok(CommandOutcome::Quit) => return false,
            Ok(CommandOutcome::Quarantined(target)) => {
                println!("moved to {}", target.display());
            }
            Ok(CommandOutcome::DirectoryChanged { len }) => {
                println!("{} images", len);
            }
            Ok(CommandOutcome::Moved) | Ok(CommandOutcome::Ignored) => {}
            Err(e) => report(&e),
        }

        self.show();
        true
    }

    fn show(&self) {
        println!("{}", render(&self.dispatcher.engine().snapshot()));
    }
}

/// Run the application
pub fn run(config: AppConfig) -> Result<()> {
    let engine = Arc::new(Engine::from_config(&config.browser));

    let (event_tx, event_rx) = bounded(8);
    let refresh = RefreshLoop::spawn_with_events(engine.clone(), event_tx)?;

    let app = App::new(engine, &config);
    let lines = spawn_input_reader()?;

    app.show();

    loop {
        select! {
            recv(lines) -> line => match line {
                Ok(line) => {
                    if !app.handle_line(&line) {
                        break;
                    }
                }
                // stdin closed
                Err(_) => break,
            },
            recv(event_rx) -> event => {
                if let Ok(RefreshEvent::CatalogChanged { len }) = event {
                    tracing::debug!("Catalog changed in background: {} images", len);
                    app.show();
                }
            },
        }
    }

    tracing::info!("Shutting down");
    refresh.shutdown();
    Ok(())
}

/// Read stdin on its own thread so refresh events can interleave with input
fn spawn_input_reader() -> Result<Receiver<String>> {
    let (tx, rx) = bounded(16);

    std::thread::Builder::new()
        .name("input".into())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        })?;

    Ok(rx)
}

/// Turn an input line into a command
fn parse_line(line: &str, bindings: &Bindings) -> Option<Command> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    if head.is_empty() {
        return None;
    }

    if head == "wheel" {
        return match rest {
            "up" => bindings.resolve(&InputEvent::Wheel(120)),
            "down" => bindings.resolve(&InputEvent::Wheel(-120)),
            _ => None,
        };
    }

    if head == "open" {
        return (!rest.is_empty()).then(|| Command::new(CommandId::APP_OPEN_FOLDER).with_path(rest));
    }

    let cmd = bindings.resolve(&InputEvent::Key(head.to_string()))?;
    if cmd.id.as_str() == CommandId::APP_OPEN_FOLDER {
        // The folder chooser is external; the path comes with the key
        return (!rest.is_empty()).then(|| cmd.with_path(rest));
    }
    Some(cmd)
}

/// One status line: position, title, back label and path
fn render(snapshot: &ViewSnapshot) -> String {
    match &snapshot.item {
        Some(item) => format!(
            "[{}] {}  {}  {}",
            item.position(),
            item.label,
            snapshot.back_label(),
            item.path.display()
        ),
        None => format!("[no images] {}", snapshot.directory.display()),
    }
}

fn report(e: &AppError) {
    tracing::warn!("Action failed: {}", e);
    println!("error: {}", e.user_message());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn bindings() -> Bindings {
        Bindings::from_config(&AppConfig::default().keybindings)
    }

    #[test]
    fn test_parse_keys_and_wheel() {
        let b = bindings();
        assert_eq!(
            parse_line("Right", &b).unwrap().id.as_str(),
            CommandId::NAV_STEP_RIGHT
        );
        assert_eq!(
            parse_line("  wheel up ", &b).unwrap().id.as_str(),
            CommandId::NAV_STEP_LEFT
        );
        assert!(parse_line("wheel sideways", &b).is_none());
        assert!(parse_line("", &b).is_none());
        assert!(parse_line("F12", &b).is_none());
    }

    #[test]
    fn test_parse_open_needs_path() {
        let b = bindings();

        let cmd = parse_line("open /tmp/my pics", &b).unwrap();
        assert_eq!(cmd.id.as_str(), CommandId::APP_OPEN_FOLDER);
        assert_eq!(
            cmd.params.path_value.as_deref(),
            Some(std::path::Path::new("/tmp/my pics"))
        );

        let cmd = parse_line("o /srv", &b).unwrap();
        assert_eq!(cmd.id.as_str(), CommandId::APP_OPEN_FOLDER);

        assert!(parse_line("open", &b).is_none());
        assert!(parse_line("o", &b).is_none());
    }

    #[test]
    fn test_render() {
        let temp = TempDir::new().unwrap();
        let engine = Engine::new(temp.path(), temp.path().join("trash"));
        assert!(render(&engine.snapshot()).starts_with("[no images]"));

        fs::write(temp.path().join("cat.png"), b"x").unwrap();
        engine.refresh();
        let line = render(&engine.snapshot());
        assert!(line.starts_with("[1 / 1] cat.png  Previous"));
    }

    #[test]
    fn test_handle_line_quit() {
        let temp = TempDir::new().unwrap();
        let engine = Arc::new(Engine::new(temp.path(), temp.path().join("trash")));
        let app = App::new(engine, &AppConfig::default());

        assert!(app.handle_line("Right"));
        assert!(app.handle_line("nonsense"));
        assert!(!app.handle_line("q"));
    }
}
