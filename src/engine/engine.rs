use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use tracing::{debug, info};

use crate::engine::chain::GenerationChain;
use crate::engine::protocol::{EngineCommand, EngineResponse};

/// Called after every response so the UI wakes up and drains the channel.
pub type Notify = Box<dyn Fn() + Send>;

/// Worker that owns the generation chain and serves one command at a time.
pub struct Engine {
    rx: Receiver<EngineCommand>,
    tx: Sender<EngineResponse>,
    chain: GenerationChain,
    notify: Notify,
}

impl Engine {
    pub fn new(
        rx: Receiver<EngineCommand>,
        tx: Sender<EngineResponse>,
        chain: GenerationChain,
        notify: Notify,
    ) -> Self {
        Self {
            rx,
            tx,
            chain,
            notify,
        }
    }

    /// Starts the worker thread and returns the UI's ends of both channels.
    pub fn spawn(
        chain: GenerationChain,
        notify: Notify,
    ) -> (Sender<EngineCommand>, Receiver<EngineResponse>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();

        thread::spawn(move || {
            let mut engine = Engine::new(cmd_rx, resp_tx, chain, notify);
            engine.run();
        });

        (cmd_tx, resp_rx)
    }

    pub fn run(&mut self) {
        info!("Engine started");

        while let Ok(cmd) = self.rx.recv() {
            let response = match cmd {
                EngineCommand::Configure(params) => {
                    self.chain.rebuild(params);
                    EngineResponse::Configured(self.chain.params())
                }

                EngineCommand::Generate { ticket, request } => {
                    debug!(ticket, "Generating");
                    EngineResponse::Generated {
                        ticket,
                        result: self.chain.generate(&request),
                    }
                }
            };

            if self.tx.send(response).is_err() {
                break;
            }
            (self.notify)();
        }

        info!("Engine stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use crate::engine::chain::tests::{chain_with, request, ScriptedLlm};
    use crate::error::GenerationError;
    use crate::model::params::GenerationParameters;

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn serves_generate_and_configure() {
        let llm = Arc::new(ScriptedLlm {
            reply: "A castle looms.".into(),
            ..Default::default()
        });
        let wakeups = Arc::new(AtomicUsize::new(0));
        let counter = wakeups.clone();

        let (tx, rx) = Engine::spawn(
            chain_with(llm),
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        tx.send(EngineCommand::Generate {
            ticket: 7,
            request: request("go north"),
        })
        .unwrap();

        match rx.recv_timeout(WAIT).unwrap() {
            EngineResponse::Generated { ticket, result } => {
                assert_eq!(ticket, 7);
                assert_eq!(result.unwrap(), "A castle looms.");
            }
            EngineResponse::Configured(_) => panic!("unexpected response"),
        }

        let params = GenerationParameters {
            temperature: 0.1,
            top_p: 0.2,
            retrieval_k: 4,
        };
        tx.send(EngineCommand::Configure(params)).unwrap();
        match rx.recv_timeout(WAIT).unwrap() {
            EngineResponse::Configured(applied) => assert_eq!(applied, params),
            EngineResponse::Generated { .. } => panic!("unexpected response"),
        }

        // The wakeup fires just after the send, so give it a moment.
        let deadline = std::time::Instant::now() + WAIT;
        while wakeups.load(Ordering::SeqCst) < 2 && std::time::Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(wakeups.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn failures_come_back_as_results() {
        let llm = Arc::new(ScriptedLlm {
            fail: true,
            ..Default::default()
        });
        let (tx, rx) = Engine::spawn(chain_with(llm), Box::new(|| {}));

        tx.send(EngineCommand::Generate {
            ticket: 1,
            request: request("look"),
        })
        .unwrap();

        match rx.recv_timeout(WAIT).unwrap() {
            EngineResponse::Generated { result, .. } => {
                assert!(matches!(result, Err(GenerationError::Api { .. })))
            }
            EngineResponse::Configured(_) => panic!("unexpected response"),
        }
    }
}
