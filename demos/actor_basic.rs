//! Spawns a pinned actor, sends it a few messages, and reads back a reply.

use async_trait::async_trait;
use concurro::prelude::*;
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

#[derive(Debug, Clone, Serialize, Deserialize)]
enum CounterMessage {
    Increment,
    Get,
}

impl Message for CounterMessage {
    const MESSAGE_TYPE: &'static str = "counter";
}

struct CounterActor {
    count: u64,
    reply: Option<oneshot::Sender<u64>>,
}

#[async_trait]
impl Actor for CounterActor {
    type Message = CounterMessage;
    type Error = std::convert::Infallible;

    async fn handle_message(
        &mut self,
        message: Self::Message,
        _ctx: &mut ActorContext<Self::Message>,
    ) -> Result<(), Self::Error> {
        match message {
            CounterMessage::Increment => self.count += 1,
            CounterMessage::Get => {
                if let Some(tx) = self.reply.take() {
                    let _ = tx.send(self.count);
                }
            }
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() {
    let group = Group::new(GroupConfig::default());
    let (tx, rx) = oneshot::channel();
    let actor = group.spawn_pinned(CounterActor { count: 0, reply: Some(tx) });

    for _ in 0..5 {
        actor.send(CounterMessage::Increment).await.unwrap();
    }
    actor.send(CounterMessage::Get).await.unwrap();

    println!("count = {}", rx.await.unwrap());
}
