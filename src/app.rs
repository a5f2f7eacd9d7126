//! App container: action dispatch, request spawning and result marshalling.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::actions::Action;
use crate::completion::{CompletionClient, CompletionResult};
use crate::session::Submission;
use crate::state::AppState;

const PAGE: usize = 10;

/// A finished request travelling from its worker task back to the UI thread.
#[derive(Debug)]
struct Completed {
    submission: Submission,
    result: CompletionResult,
}

pub struct App {
    pub state: AppState,
    client: Arc<dyn CompletionClient>,
    runtime: Handle,
    results_tx: UnboundedSender<Completed>,
    results_rx: UnboundedReceiver<Completed>,
    /// Model name shown in the header.
    pub model: String,
    pub should_quit: bool,
    /// For spinner animation (incremented each tick).
    pub tick: usize,
}

impl App {
    pub fn new(client: Arc<dyn CompletionClient>, runtime: Handle, model: impl Into<String>) -> Self {
        let (results_tx, results_rx) = unbounded_channel();
        Self {
            state: AppState::default(),
            client,
            runtime,
            results_tx,
            results_rx,
            model: model.into(),
            should_quit: false,
            tick: 0,
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,

            Action::Char(c) => {
                let mut text = self.state.input_buffer().to_string();
                let pos = self.state.input_cursor;
                text.insert(pos, c);
                self.state.session.set_draft(text);
                self.state.input_cursor = pos + c.len_utf8();
            }
            Action::Backspace => {
                let pos = self.state.input_cursor;
                let mut text = self.state.input_buffer().to_string();
                let prev = text[..pos].chars().next_back();
                if let Some(prev) = prev {
                    let start = pos - prev.len_utf8();
                    text.replace_range(start..pos, "");
                    self.state.session.set_draft(text);
                    self.state.input_cursor = start;
                }
            }
            Action::Delete => {
                let pos = self.state.input_cursor;
                let mut text = self.state.input_buffer().to_string();
                let next = text[pos..].chars().next();
                if let Some(next) = next {
                    text.replace_range(pos..pos + next.len_utf8(), "");
                    self.state.session.set_draft(text);
                }
            }
            Action::ClearInput => {
                self.state.session.set_draft(String::new());
                self.state.input_cursor = 0;
            }
            Action::Submit => self.submit(),

            Action::CursorLeft => {
                let pos = self.state.input_cursor;
                let prev = self.state.input_buffer()[..pos].chars().next_back();
                if let Some(prev) = prev {
                    self.state.input_cursor = pos - prev.len_utf8();
                }
            }
            Action::CursorRight => {
                let pos = self.state.input_cursor;
                let next = self.state.input_buffer()[pos..].chars().next();
                if let Some(next) = next {
                    self.state.input_cursor = pos + next.len_utf8();
                }
            }
            Action::CursorHome => self.state.input_cursor = 0,
            Action::CursorEnd => self.state.input_cursor = self.state.input_buffer().len(),

            Action::ScrollUp => self.state.scroll = self.state.scroll.saturating_sub(1),
            Action::ScrollDown => {
                self.state.scroll = self.state.scroll.saturating_add(1).min(self.state.max_scroll);
            }
            Action::ScrollPageUp => self.state.scroll = self.state.scroll.saturating_sub(PAGE),
            Action::ScrollPageDown => {
                self.state.scroll = self.state.scroll.saturating_add(PAGE).min(self.state.max_scroll);
            }
            Action::ScrollTop => self.state.scroll = 0,
        }
    }

    /// Send the current draft. Each call starts an independent request; there
    /// is no cancellation of earlier ones.
    fn submit(&mut self) {
        let submission = self.state.session.submit();
        let client = Arc::clone(&self.client);
        let results = self.results_tx.clone();
        self.runtime.spawn(async move {
            let result = client.complete(&submission.question).await;
            // Receiver is gone only when the app is shutting down.
            let _ = results.send(Completed { submission, result });
        });
    }

    /// Apply every finished request to the session. Runs on the UI thread,
    /// so the session is never touched by worker tasks.
    pub fn poll_results(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(done) = self.results_rx.try_recv() {
            debug!(pending = self.state.session.pending(), "applying completion result");
            self.state.session.finish(done.submission, done.result);
            applied += 1;
        }
        if applied > 0 {
            self.state.clamp_cursor();
            // Newest exchange is at the top.
            self.state.scroll = 0;
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::sync::oneshot;

    /// Client whose answers are released by the test, one prompt at a time.
    #[derive(Default)]
    struct GatedClient {
        gates: Mutex<HashMap<String, oneshot::Receiver<CompletionResult>>>,
    }

    impl GatedClient {
        fn gate(&self, prompt: &str) -> oneshot::Sender<CompletionResult> {
            let (tx, rx) = oneshot::channel();
            self.gates.lock().unwrap().insert(prompt.to_string(), rx);
            tx
        }
    }

    #[async_trait]
    impl CompletionClient for GatedClient {
        async fn complete(&self, prompt: &str) -> CompletionResult {
            let gate = self.gates.lock().unwrap().remove(prompt);
            match gate {
                Some(rx) => rx
                    .await
                    .unwrap_or_else(|_| CompletionResult::Failure("gate dropped".into())),
                None => CompletionResult::Failure(format!("unexpected prompt {prompt:?}")),
            }
        }
    }

    fn app_with(client: Arc<GatedClient>) -> App {
        App::new(client, Handle::current(), "gpt-4o")
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.dispatch(Action::Char(c));
        }
    }

    async fn wait_for_history(app: &mut App, len: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while app.state.session.history().len() < len {
                app.poll_results();
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("results did not arrive in time");
    }

    fn pairs(app: &App) -> Vec<(String, String)> {
        app.state
            .session
            .history()
            .iter()
            .map(|e| (e.question.clone(), e.answer.clone()))
            .collect()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn successful_round_trip_clears_the_draft() {
        let client = Arc::new(GatedClient::default());
        let answer = client.gate("2+2?");
        let mut app = app_with(Arc::clone(&client));

        type_text(&mut app, "2+2?");
        app.dispatch(Action::Submit);
        assert_eq!(app.state.session.pending(), 1);
        answer.send(CompletionResult::Success("4".into())).unwrap();
        wait_for_history(&mut app, 1).await;

        assert_eq!(pairs(&app), vec![("2+2?".to_string(), "4".to_string())]);
        assert_eq!(app.state.input_buffer(), "");
        assert_eq!(app.state.input_cursor(), 0);
        assert_eq!(app.state.session.pending(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn failed_round_trip_keeps_the_draft() {
        let client = Arc::new(GatedClient::default());
        let answer = client.gate("x");
        let mut app = app_with(Arc::clone(&client));

        type_text(&mut app, "x");
        app.dispatch(Action::Submit);
        answer.send(CompletionResult::Failure("timeout".into())).unwrap();
        wait_for_history(&mut app, 1).await;

        assert_eq!(pairs(&app), vec![("x".to_string(), "Error: timeout".to_string())]);
        assert_eq!(app.state.input_buffer(), "x");
        assert_eq!(app.state.input_cursor(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn overlapping_submissions_land_in_completion_order() {
        let client = Arc::new(GatedClient::default());
        let slow = client.gate("slow");
        let fast = client.gate("fast");
        let mut app = app_with(Arc::clone(&client));

        type_text(&mut app, "slow");
        app.dispatch(Action::Submit);
        app.dispatch(Action::ClearInput);
        type_text(&mut app, "fast");
        app.dispatch(Action::Submit);
        assert_eq!(app.state.session.pending(), 2);

        fast.send(CompletionResult::Success("F".into())).unwrap();
        wait_for_history(&mut app, 1).await;
        assert_eq!(app.state.session.pending(), 1);
        slow.send(CompletionResult::Failure("timeout".into())).unwrap();
        wait_for_history(&mut app, 2).await;

        assert_eq!(
            pairs(&app),
            vec![
                ("slow".to_string(), "Error: timeout".to_string()),
                ("fast".to_string(), "F".to_string()),
            ]
        );
        // Cleared by the successful "fast" answer; the failure left it alone.
        assert_eq!(app.state.input_buffer(), "");
    }

    #[tokio::test]
    async fn editing_respects_multibyte_characters() {
        let mut app = app_with(Arc::new(GatedClient::default()));

        type_text(&mut app, "zażółć");
        app.dispatch(Action::Backspace);
        assert_eq!(app.state.input_buffer(), "zażół");

        app.dispatch(Action::CursorLeft);
        app.dispatch(Action::CursorLeft);
        app.dispatch(Action::Delete);
        assert_eq!(app.state.input_buffer(), "zażł");

        app.dispatch(Action::Char('o'));
        assert_eq!(app.state.input_buffer(), "zażoł");

        app.dispatch(Action::CursorHome);
        app.dispatch(Action::Backspace);
        assert_eq!(app.state.input_buffer(), "zażoł");
        app.dispatch(Action::CursorEnd);
        app.dispatch(Action::CursorRight);
        assert_eq!(app.state.input_cursor(), "zażoł".len());
    }

    #[tokio::test]
    async fn scrolling_saturates_and_quit_sets_flag() {
        let mut app = app_with(Arc::new(GatedClient::default()));

        app.dispatch(Action::ScrollUp);
        assert_eq!(app.state.scroll, 0);
        // Nothing to scroll until a frame has measured the history.
        app.dispatch(Action::ScrollDown);
        assert_eq!(app.state.scroll, 0);

        app.state.set_max_scroll(12);
        app.dispatch(Action::ScrollPageDown);
        app.dispatch(Action::ScrollDown);
        assert_eq!(app.state.scroll, 11);
        for _ in 0..50 {
            app.dispatch(Action::ScrollDown);
        }
        app.dispatch(Action::ScrollPageDown);
        assert_eq!(app.state.scroll, 12);
        // One step back moves the view immediately.
        app.dispatch(Action::ScrollUp);
        assert_eq!(app.state.scroll, 11);

        // A shorter history pulls the offset back in.
        app.state.set_max_scroll(4);
        assert_eq!(app.state.scroll, 4);

        app.dispatch(Action::ScrollTop);
        assert_eq!(app.state.scroll, 0);

        app.dispatch(Action::Quit);
        assert!(app.should_quit);
    }
}
