//! Wires an operator between two input streams and one output stream, then
//! chains a `task` off the result.

use concurro::prelude::*;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let group = Group::new(GroupConfig::default());

    let left: DataflowStream<i64> = group.stream();
    let right: DataflowStream<i64> = group.stream();
    let sum: Arc<DataflowStream<i64>> = Arc::new(group.stream());
    let sum_reader = sum.reader();

    let _operator = group.operator(
        vec![left.reader(), right.reader()],
        vec![sum.clone()],
        |values| Ok(vec![values[0] + values[1]]),
    );

    left.write(4).await.unwrap();
    right.write(9).await.unwrap();
    println!("sum = {}", sum_reader.read().await);

    let outcome = group.task(|| async { Ok::<_, std::convert::Infallible>(40) });
    match outcome.val().await {
        TaskOutcome::Ok(value) => println!("task result = {}", value + 2),
        TaskOutcome::Failed(failure) => println!("task failed: {}", failure),
    }
}
