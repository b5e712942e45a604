use {
    crate::{
        Error,
        sentinel::Sentinel,
        source::{BatterySource, CpuSource, MemorySource, SystemBattery, SystemCpu, SystemMemory},
    },
    crossterm::{
        cursor, execute,
        terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
    },
    ratatui::{Terminal, backend::Backend, widgets::Paragraph},
    std::io,
};

/// something that can draw a frame.
pub trait Render {
    /// draws a full frame.
    fn render(&mut self) -> Result<(), Error>;
}

/// the render step: draws a [`Sentinel`]'s observations over the whole terminal.
pub struct Window<Bk: Backend, C = SystemCpu, M = SystemMemory, B = SystemBattery> {
    terminal: Terminal<Bk>,
    sentinel: Sentinel<C, M, B>,
}

/// the terminal, in raw mode on the alternate screen.
///
/// the terminal is restored when this is dropped.
pub struct Session {
    _priv: (),
}

// === impl Window ===

impl<Bk, C, M, B> Window<Bk, C, M, B>
where
    Bk: Backend,
    C: CpuSource,
    M: MemorySource,
    B: BatterySource,
{
    pub fn new(terminal: Terminal<Bk>, sentinel: Sentinel<C, M, B>) -> Self {
        Self { terminal, sentinel }
    }

    #[cfg(test)]
    fn terminal(&self) -> &Terminal<Bk> {
        &self.terminal
    }

    #[cfg(test)]
    fn terminal_mut(&mut self) -> &mut Terminal<Bk> {
        &mut self.terminal
    }
}

impl<Bk, C, M, B> Render for Window<Bk, C, M, B>
where
    Bk: Backend,
    C: CpuSource,
    M: MemorySource,
    B: BatterySource,
{
    fn render(&mut self) -> Result<(), Error> {
        let Self { terminal, sentinel } = self;

        let text = sentinel.observe()?.to_string();
        terminal.draw(|frame| {
            let area = frame.area();
            frame.render_widget(Paragraph::new(text), area);
        })?;

        Ok(())
    }
}

// === impl Session ===

impl Session {
    /// places the terminal into raw mode, and switches to the alternate screen.
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        // from here on, dropping the session will restore the terminal.
        let session = Self { _priv: () };
        execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;

        Ok(session)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        restore();
    }
}

/// installs a panic hook that restores the terminal before printing the panic.
pub fn install_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore();
        hook(info);
    }));
}

fn restore() {
    if let Err(error) = execute!(io::stdout(), cursor::Show, LeaveAlternateScreen) {
        log::warn!("failed to leave the alternate screen: {error}");
    }
    if let Err(error) = terminal::disable_raw_mode() {
        log::warn!("failed to disable raw mode: {error}");
    }
}
