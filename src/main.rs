//! a minimal terminal system monitor.

use {
    mintop::{
        App, Sentinel, Window,
        window::{self, Session},
    },
    ratatui::{Terminal, backend::CrosstermBackend},
    std::{io, process},
};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    // NB: the session must outlive the window, so that the terminal is restored on every path out
    // of `main`.
    let (_session, window) = match init() {
        Ok(initialized) => initialized,
        Err(error) => {
            log::error!("failed to initialize the terminal: {error}");
            process::exit(1);
        }
    };

    // the ticker must be created within the runtime.
    runtime.block_on(async { App::new(window).run().await })?;

    Ok(())
}

/// prepares the terminal, and the window that draws to it.
fn init() -> io::Result<(Session, Window<CrosstermBackend<io::Stdout>>)> {
    let session = Session::enter()?;
    window::install_panic_hook();

    let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let window = Window::new(terminal, Sentinel::system());

    Ok((session, window))
}
