//! Raw-mode terminal setup and teardown.

use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use std::io;

/// Raw mode, alternate screen, hidden cursor.
pub fn enter() -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;
    Ok(())
}

/// Undo [`enter`].
pub fn restore() -> io::Result<()> {
    disable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Run `cleanup` before the previously installed panic hook, so the panic
/// message lands on a usable terminal.
pub fn run_before_panic_hook<F>(cleanup: F)
where
    F: Fn() + Send + Sync + 'static,
{
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        cleanup();
        log::error!("panic: {}", info);
        previous(info);
    }));
}

/// Restore the terminal if the game panics.
pub fn restore_on_panic() {
    run_before_panic_hook(|| {
        let _ = restore();
    });
}
