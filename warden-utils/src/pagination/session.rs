//! The session loop driving a [`ViewState`] from user navigation events.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::debug;

use super::navigation::{Navigation, Transition, ViewState};
use super::page::Page;

/// Result of waiting for the next navigation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polled<E> {
    Event(E),
    TimedOut,
}

/// Supplies navigation events for one session.
#[async_trait]
pub trait InteractionSource: Send {
    /// Suspend until the next event arrives or `timeout` elapses.
    async fn next(&mut self, timeout: Duration) -> Polled<Navigation>;
}

/// Turns the current page into a displayable message.
pub trait Renderer<T>: Send + Sync {
    type Message: Send;

    fn render(&self, page: &Page<T>, view: &ViewState<T>) -> anyhow::Result<Self::Message>;
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Teardown {
    /// The user pressed close.
    Closed,
    /// No event arrived within the idle timeout.
    TimedOut,
}

/// Destination for rendered pages.
#[async_trait]
pub trait SessionSink<M: Send>: Send {
    /// Display `message`, replacing whatever the session showed before.
    async fn show(&mut self, message: M) -> anyhow::Result<()>;

    /// Remove navigation affordances once the session is over.
    async fn teardown(&mut self, reason: Teardown) -> anyhow::Result<()>;
}

/// [`InteractionSource`] fed by the session registry.
///
/// A dropped sender counts as a timeout, which ends the session cleanly on shutdown.
pub struct ChannelSource {
    receiver: mpsc::Receiver<Navigation>,
}

impl ChannelSource {
    pub fn new(receiver: mpsc::Receiver<Navigation>) -> Self {
        Self { receiver }
    }
}

#[async_trait]
impl InteractionSource for ChannelSource {
    async fn next(&mut self, timeout: Duration) -> Polled<Navigation> {
        match tokio::time::timeout(timeout, self.receiver.recv()).await {
            Ok(Some(event)) => Polled::Event(event),
            Ok(None) | Err(_) => Polled::TimedOut,
        }
    }
}

/// Render the first page, then apply events until the user closes the view or it idles out.
///
/// Only transitions that move the index are rendered again. A timeout closes the
/// state without moving it. Returns the final, closed state.
pub async fn run_session<T, S, R, K>(
    mut view: ViewState<T>,
    source: &mut S,
    renderer: &R,
    sink: &mut K,
    idle_timeout: Duration,
) -> anyhow::Result<ViewState<T>>
where
    T: Send,
    S: InteractionSource,
    R: Renderer<T>,
    K: SessionSink<R::Message>,
{
    let first = renderer.render(view.current_page(), &view)?;
    sink.show(first).await?;

    loop {
        let event = match source.next(idle_timeout).await {
            Polled::Event(event) => event,
            Polled::TimedOut => {
                view.handle(Navigation::Close);
                sink.teardown(Teardown::TimedOut).await?;
                return Ok(view);
            }
        };

        match view.handle(event) {
            Transition::Moved => {
                let message = renderer.render(view.current_page(), &view)?;
                sink.show(message).await?;
            }
            Transition::Unchanged | Transition::Ignored => {
                debug!(?event, index = view.current_index(), "navigation ignored");
            }
            Transition::Closed => {
                sink.teardown(Teardown::Closed).await?;
                return Ok(view);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::pagination::build_pages;

    struct ScriptedSource {
        script: VecDeque<Polled<Navigation>>,
    }

    impl ScriptedSource {
        fn new(script: impl IntoIterator<Item = Polled<Navigation>>) -> Self {
            Self {
                script: script.into_iter().collect(),
            }
        }
    }

    #[async_trait]
    impl InteractionSource for ScriptedSource {
        async fn next(&mut self, _timeout: Duration) -> Polled<Navigation> {
            self.script.pop_front().unwrap_or(Polled::TimedOut)
        }
    }

    struct IndexRenderer;

    impl Renderer<String> for IndexRenderer {
        type Message = (usize, Vec<String>);

        fn render(
            &self,
            page: &Page<String>,
            view: &ViewState<String>,
        ) -> anyhow::Result<Self::Message> {
            Ok((view.current_index(), page.items().to_vec()))
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        shown: Vec<usize>,
        teardown: Option<Teardown>,
    }

    #[async_trait]
    impl SessionSink<(usize, Vec<String>)> for RecordingSink {
        async fn show(&mut self, message: (usize, Vec<String>)) -> anyhow::Result<()> {
            self.shown.push(message.0);
            Ok(())
        }

        async fn teardown(&mut self, reason: Teardown) -> anyhow::Result<()> {
            self.teardown = Some(reason);
            Ok(())
        }
    }

    fn three_pages() -> ViewState<String> {
        let items = (1..=25).map(|index| format!("zone-{index}.example")).collect();
        ViewState::start(build_pages(items, 10).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn renders_only_on_movement() {
        let mut source = ScriptedSource::new([
            Polled::Event(Navigation::Backward),
            Polled::Event(Navigation::Forward),
            Polled::Event(Navigation::Forward),
            Polled::Event(Navigation::Forward),
            Polled::Event(Navigation::Forward),
            Polled::Event(Navigation::Close),
        ]);
        let mut sink = RecordingSink::default();

        let view = run_session(
            three_pages(),
            &mut source,
            &IndexRenderer,
            &mut sink,
            Duration::from_secs(60),
        )
        .await
        .unwrap();

        assert_eq!(sink.shown, vec![0, 1, 2]);
        assert_eq!(sink.teardown, Some(Teardown::Closed));
        assert_eq!(view.current_index(), 2);
        assert!(view.is_closed());
    }

    #[tokio::test]
    async fn timeout_closes_without_moving() {
        let mut source = ScriptedSource::new([
            Polled::Event(Navigation::Forward),
            Polled::TimedOut,
            Polled::Event(Navigation::Forward),
        ]);
        let mut sink = RecordingSink::default();

        let view = run_session(
            three_pages(),
            &mut source,
            &IndexRenderer,
            &mut sink,
            Duration::from_secs(60),
        )
        .await
        .unwrap();

        assert_eq!(view.current_index(), 1);
        assert!(view.is_closed());
        assert_eq!(sink.shown, vec![0, 1]);
        assert_eq!(sink.teardown, Some(Teardown::TimedOut));
        assert_eq!(source.script.len(), 1);
    }

    #[tokio::test]
    async fn channel_source_times_out_when_idle() {
        let (sender, receiver) = mpsc::channel(4);
        let mut source = ChannelSource::new(receiver);

        sender.send(Navigation::Forward).await.unwrap();
        assert_eq!(
            source.next(Duration::from_millis(50)).await,
            Polled::Event(Navigation::Forward)
        );
        assert_eq!(
            source.next(Duration::from_millis(20)).await,
            Polled::TimedOut
        );

        drop(sender);
        assert_eq!(source.next(Duration::from_secs(5)).await, Polled::TimedOut);
    }

    #[tokio::test]
    async fn channel_source_keeps_arrival_order() {
        let (sender, receiver) = mpsc::channel(4);
        let mut source = ChannelSource::new(receiver);

        for event in [Navigation::Forward, Navigation::Backward, Navigation::Close] {
            sender.send(event).await.unwrap();
        }

        let mut seen = Vec::new();
        for _ in 0..3 {
            if let Polled::Event(event) = source.next(Duration::from_millis(50)).await {
                seen.push(event);
            }
        }

        assert_eq!(
            seen,
            vec![Navigation::Forward, Navigation::Backward, Navigation::Close]
        );
    }
}
