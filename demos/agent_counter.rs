//! Many concurrent `Agent` updates, serialized through its internal actor.

use concurro::prelude::*;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let group = Group::new(GroupConfig::default());
    let agent = Arc::new(group.agent(0u64));

    let mut handles = Vec::new();
    for _ in 0..200 {
        let agent = agent.clone();
        handles.push(tokio::spawn(async move {
            agent.send_and_wait(|v| v + 1).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    println!("total = {}", agent.val().await.unwrap());
}
