use {
    crate::{
        Error,
        event::{Events, Input, IntervalTicker, TerminalEvents, Ticker},
        window::Render,
    },
    tokio::select,
};

#[cfg(test)]
mod tests;

/// the application's event loop.
///
/// redraws the window on every tick, and exits when asked to quit.
pub struct App<R, T = IntervalTicker, E = TerminalEvents> {
    /// draws each frame.
    window: R,
    /// when to draw.
    ticker: T,
    /// terminal input.
    events: E,
}

/// the state of the event loop.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum State {
    Running,
    Terminated,
}

/// something the event loop reacts to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Trigger {
    Tick,
    Input(Input),
}

/// what the event loop should do in response to a [`Trigger`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Action {
    Draw,
    Nothing,
}

// === impl App ===

impl<R: Render> App<R> {
    /// returns an application that draws to the window once a second.
    pub fn new(window: R) -> Self {
        Self::with_sources(window, IntervalTicker::default(), TerminalEvents::new())
    }
}

impl<R, T, E> App<R, T, E>
where
    R: Render,
    T: Ticker,
    E: Events,
{
    pub fn with_sources(window: R, ticker: T, events: E) -> Self {
        Self {
            window,
            ticker,
            events,
        }
    }

    /// runs the application, until it is asked to quit or input ends.
    pub async fn run(self) -> Result<(), Error> {
        let Self {
            mut window,
            mut ticker,
            mut events,
        } = self;

        // draw once now, rather than a period from now.
        window.render()?;

        let mut state = State::Running;
        while state == State::Running {
            // NB: if both are ready, either may be chosen.
            let trigger = select! {
                () = ticker.tick() => Trigger::Tick,
                input = events.next() => match input {
                    Some(Ok(input)) => Trigger::Input(input),
                    Some(Err(error)) => return Err(Error::Input(error)),
                    None => {
                        log::debug!("terminal input ended");
                        break;
                    }
                },
            };

            let (next, action) = state.step(trigger);
            if action == Action::Draw {
                window.render()?;
            }
            state = next;
        }

        Ok(())
    }
}

// === impl State ===

impl State {
    /// applies a trigger to this state, returning the next state and what to do.
    pub fn step(self, trigger: Trigger) -> (Self, Action) {
        use {Action::*, State::*};

        match (self, trigger) {
            (Terminated, _) => (Terminated, Nothing),
            (Running, Trigger::Tick) => (Running, Draw),
            (Running, Trigger::Input(input)) if input.is_quit() => (Terminated, Nothing),
            (Running, Trigger::Input(_)) => (Running, Nothing),
        }
    }
}
