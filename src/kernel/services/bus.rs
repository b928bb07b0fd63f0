use std::sync::mpsc::{self, Receiver, SendError, Sender};

use crate::kernel::Action;

/// Single-consumer action bus. Async tasks and adapters post actions here;
/// the session drains it on every tick so all dispatch stays on one thread.
#[derive(Clone)]
pub struct ActionSender {
    tx: Sender<Action>,
}

pub struct ActionReceiver {
    rx: Receiver<Action>,
}

pub fn action_bus() -> (ActionSender, ActionReceiver) {
    let (tx, rx) = mpsc::channel();
    (ActionSender { tx }, ActionReceiver { rx })
}

impl ActionSender {
    pub fn send(&self, action: Action) -> Result<(), SendError<Action>> {
        self.tx.send(action)
    }
}

impl ActionReceiver {
    pub fn drain(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        while let Ok(action) = self.rx.try_recv() {
            actions.push(action);
        }
        actions
    }
}
