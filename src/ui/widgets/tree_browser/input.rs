//! Keyboard input handling and interactive loop.

use std::io::{self, Write};

use crossterm::event::{KeyEvent, KeyModifiers};
use repolens::SelectionCoordinator;

use super::browser::{BrowseAction, TreeBrowser};
use super::render::StatusSink;
use crate::ui::context::UiContext;
use crate::ui::primitives::Icon;

/// Header, blank line, blank line before the bars, status, two help lines
const CHROME_LINES: u16 = 6;

/// Convert a keyboard event to a BrowseAction
pub fn key_to_action(key: KeyEvent) -> Option<BrowseAction> {
    use crossterm::event::KeyCode;

    // Raw mode delivers Ctrl+C as a key, not a signal
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') => Some(BrowseAction::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(BrowseAction::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(BrowseAction::Down),
        KeyCode::Enter | KeyCode::Char(' ') => Some(BrowseAction::Activate),
        KeyCode::Right | KeyCode::Char('l') => Some(BrowseAction::Expand),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Backspace => Some(BrowseAction::Collapse),
        KeyCode::Char('+') => Some(BrowseAction::ExpandAll),
        KeyCode::Char('-') => Some(BrowseAction::CollapseAll),
        KeyCode::Char('c') => Some(BrowseAction::ClearSelection),
        KeyCode::Char('q') | KeyCode::Esc => Some(BrowseAction::Quit),
        _ => None,
    }
}

/// Run the browser until the user quits.
///
/// Returns the file selected at that point, if any.
pub fn run_interactive(
    browser: &mut TreeBrowser,
    title: &str,
    ui: &UiContext,
) -> io::Result<Option<String>> {
    use crossterm::{
        cursor,
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{self, ClearType},
    };

    let mut coordinator = SelectionCoordinator::new(StatusSink::default());

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

    let render_ui = |stdout: &mut io::Stdout,
                     browser: &mut TreeBrowser,
                     status: Option<&str>|
     -> io::Result<()> {
        let (width, height) = terminal::size().unwrap_or((ui.caps.width, ui.caps.height));
        let rows = height.saturating_sub(CHROME_LINES).max(1) as usize;
        browser.scroll_to_cursor(rows);

        execute!(stdout, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        write!(
            stdout,
            "{} Repolens {}\r\n\r\n",
            Icon::Browse.colored(ui.color, ui.unicode),
            title
        )?;
        let body = browser.render(rows, width as usize, status, ui.color, ui.unicode);
        for line in body.lines() {
            write!(stdout, "{line}\r\n")?;
        }
        stdout.flush()
    };

    let result = (|| -> io::Result<()> {
        render_ui(&mut stdout, browser, None)?;
        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let Some(action) = key_to_action(key) else {
                        continue;
                    };
                    if !browser.handle_action(action, &mut coordinator) {
                        return Ok(());
                    }
                    render_ui(&mut stdout, browser, coordinator.sink().last())?;
                }
                Event::Resize(..) => {
                    render_ui(&mut stdout, browser, coordinator.sink().last())?;
                }
                _ => {}
            }
        }
    })();

    // Restore terminal even when the loop failed
    let restored = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen)
        .and_then(|_| terminal::disable_raw_mode());
    result?;
    restored?;

    Ok(browser.tree().selected().map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;

    fn key(code: KeyCode) -> Option<BrowseAction> {
        key_to_action(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn key_to_action_arrow_keys() {
        assert_eq!(key(KeyCode::Up), Some(BrowseAction::Up));
        assert_eq!(key(KeyCode::Down), Some(BrowseAction::Down));
        assert_eq!(key(KeyCode::Left), Some(BrowseAction::Collapse));
        assert_eq!(key(KeyCode::Right), Some(BrowseAction::Expand));
    }

    #[test]
    fn key_to_action_vim_keys() {
        assert_eq!(key(KeyCode::Char('k')), Some(BrowseAction::Up));
        assert_eq!(key(KeyCode::Char('j')), Some(BrowseAction::Down));
        assert_eq!(key(KeyCode::Char('h')), Some(BrowseAction::Collapse));
        assert_eq!(key(KeyCode::Char('l')), Some(BrowseAction::Expand));
    }

    #[test]
    fn key_to_action_activation_and_bulk() {
        assert_eq!(key(KeyCode::Enter), Some(BrowseAction::Activate));
        assert_eq!(key(KeyCode::Char(' ')), Some(BrowseAction::Activate));
        assert_eq!(key(KeyCode::Char('+')), Some(BrowseAction::ExpandAll));
        assert_eq!(key(KeyCode::Char('-')), Some(BrowseAction::CollapseAll));
        assert_eq!(key(KeyCode::Char('c')), Some(BrowseAction::ClearSelection));
    }

    #[test]
    fn key_to_action_quit_keys() {
        assert_eq!(key(KeyCode::Char('q')), Some(BrowseAction::Quit));
        assert_eq!(key(KeyCode::Esc), Some(BrowseAction::Quit));
        assert_eq!(key(KeyCode::Char('x')), None);
    }

    #[test]
    fn key_to_action_ctrl_c_quits_instead_of_clearing() {
        let ctrl = |c| key_to_action(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
        assert_eq!(ctrl('c'), Some(BrowseAction::Quit));
        assert_eq!(ctrl('d'), Some(BrowseAction::Quit));
        assert_eq!(ctrl('j'), None);
    }
}
