use {
    super::*,
    crate::event::fake::{FakeEvents, FakeTicker},
    std::{
        cell::Cell,
        io,
        rc::Rc,
    },
    tokio::task::yield_now,
};

/// counts the frames it draws.
#[derive(Clone, Default)]
struct Frames {
    drawn: Rc<Cell<usize>>,
    /// if set, rendering fails after this many frames.
    fail_after: Option<usize>,
}

impl Render for Frames {
    fn render(&mut self) -> Result<(), Error> {
        let Self { drawn, fail_after } = self;

        if fail_after.is_some_and(|n| drawn.get() >= n) {
            return Err(Error::Terminal(io::Error::other("terminal went away")));
        }
        drawn.set(drawn.get() + 1);
        Ok(())
    }
}

impl Frames {
    /// waits until at least `n` frames have been drawn.
    async fn until(&self, n: usize) {
        while self.drawn.get() < n {
            yield_now().await;
        }
    }
}

mod state_tests {
    use super::*;

    #[test]
    fn tick_draws() {
        assert_eq!(
            State::Running.step(Trigger::Tick),
            (State::Running, Action::Draw)
        );
    }

    #[test]
    fn q_terminates() {
        assert_eq!(
            State::Running.step(Trigger::Input(Input::Char('q'))),
            (State::Terminated, Action::Nothing)
        );
    }

    #[test]
    fn interrupt_terminates() {
        assert_eq!(
            State::Running.step(Trigger::Input(Input::Interrupt)),
            (State::Terminated, Action::Nothing)
        );
    }

    #[test]
    fn other_input_is_ignored() {
        for input in [Input::Char('x'), Input::Char('Q'), Input::Other] {
            assert_eq!(
                State::Running.step(Trigger::Input(input)),
                (State::Running, Action::Nothing)
            );
        }
    }

    #[test]
    fn terminated_is_final() {
        for trigger in [Trigger::Tick, Trigger::Input(Input::Other)] {
            assert_eq!(
                State::Terminated.step(trigger),
                (State::Terminated, Action::Nothing)
            );
        }
    }
}

mod run_tests {
    use super::*;

    #[tokio::test]
    async fn draws_immediately_then_quits() {
        let frames = Frames::default();
        let (_ticks, ticker) = FakeTicker::new();
        let (inputs, events) = FakeEvents::new();
        inputs.send(Ok(Input::Char('q'))).unwrap();

        App::with_sources(frames.clone(), ticker, events)
            .run()
            .await
            .unwrap();
        assert_eq!(frames.drawn.get(), 1);
    }

    #[tokio::test]
    async fn redraws_on_every_tick() {
        let frames = Frames::default();
        let (ticks, ticker) = FakeTicker::new();
        let (inputs, events) = FakeEvents::new();
        for _ in 0..3 {
            ticks.send(()).unwrap();
        }
        drop(ticks);

        let app = App::with_sources(frames.clone(), ticker, events);
        let quit = async {
            // the initial frame, and one per tick.
            frames.until(4).await;
            inputs.send(Ok(Input::Interrupt)).unwrap();
        };

        let (result, ()) = tokio::join!(app.run(), quit);
        result.unwrap();
        assert_eq!(frames.drawn.get(), 4);
    }

    #[tokio::test]
    async fn ignores_other_input() {
        let frames = Frames::default();
        let (_ticks, ticker) = FakeTicker::new();
        let (inputs, events) = FakeEvents::new();
        for input in [Input::Char('x'), Input::Other, Input::Char('q')] {
            inputs.send(Ok(input)).unwrap();
        }

        App::with_sources(frames.clone(), ticker, events)
            .run()
            .await
            .unwrap();
        assert_eq!(frames.drawn.get(), 1);
    }

    #[tokio::test]
    async fn ends_with_input() {
        let frames = Frames::default();
        let (_ticks, ticker) = FakeTicker::new();
        let (inputs, events) = FakeEvents::new();
        drop(inputs);

        App::with_sources(frames.clone(), ticker, events)
            .run()
            .await
            .unwrap();
        assert_eq!(frames.drawn.get(), 1);
    }

    #[tokio::test]
    async fn input_errors_are_returned() {
        let frames = Frames::default();
        let (_ticks, ticker) = FakeTicker::new();
        let (inputs, events) = FakeEvents::new();
        inputs.send(Err(io::Error::other("tty closed"))).unwrap();

        let err = App::with_sources(frames, ticker, events)
            .run()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Input(_)));
    }

    #[tokio::test]
    async fn render_errors_are_returned() {
        let frames = Frames {
            fail_after: Some(2),
            ..Frames::default()
        };
        let (ticks, ticker) = FakeTicker::new();
        let (_inputs, events) = FakeEvents::new();
        ticks.send(()).unwrap();
        ticks.send(()).unwrap();

        let err = App::with_sources(frames.clone(), ticker, events)
            .run()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Terminal(_)));
        assert_eq!(frames.drawn.get(), 2);
    }
}
