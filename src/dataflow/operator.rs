//! Dataflow Operator (C7): a standing computation that consumes one value
//! from each of several input streams and publishes one value per output
//! stream, firing repeatedly until an input closes or the body fails.

// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use super::error::DataflowError;
use super::stream::{DataflowStream, StreamReader};
use crate::group::Group;
use crate::monitoring::DataflowEventKind;

/// The body of an operator: given one value pulled from each input (in
/// input order), produce one value for each output (in output order).
pub trait OperatorBody<T>: Fn(&[T]) -> Result<Vec<T>, DataflowError> + Send + Sync + 'static {}

impl<T, F> OperatorBody<T> for F where F: Fn(&[T]) -> Result<Vec<T>, DataflowError> + Send + Sync + 'static
{}

/// A standing dataflow computation wired between input and output streams.
///
/// Firings are strictly sequential for a single operator (the next firing's
/// reads only start after the previous firing's writes complete), so the
/// "publish one value per output, atomically" requirement holds without
/// extra synchronization.
pub struct Operator {
    group: Group,
}

impl Operator {
    /// Start an operator reading one value per firing from each of
    /// `inputs`, in parallel, and running `body` on the gathered values.
    /// Each element of `body`'s return value is written to the
    /// correspondingly-indexed output stream.
    ///
    /// Runs on the group's pool until an input stream's writer is dropped
    /// (never observed — streams have no explicit close, so in practice
    /// this loop runs for the life of the group) or `body` returns an
    /// error, at which point the operator stops firing.
    pub fn spawn<T, F>(
        group: Group,
        inputs: Vec<StreamReader<T>>,
        outputs: Vec<Arc<DataflowStream<T>>>,
        body: F,
    ) -> Self
    where
        T: Clone + Send + Sync + 'static,
        F: OperatorBody<T>,
    {
        let op = Self { group: group.clone() };
        let body = Arc::new(body);
        let _ = group.clone().pool().spawn_background(async move {
            let mut firing_index: u64 = 0;
            loop {
                let gathered = Self::gather(&inputs).await;
                let produced = match body(&gathered) {
                    Ok(values) => values,
                    Err(err) => {
                        group
                            .record_dataflow_event(DataflowEventKind::OperatorFired { firing_index })
                            .await;
                        let _ = err;
                        break;
                    }
                };
                for (output, value) in outputs.iter().zip(produced.into_iter()) {
                    if output.write(value).await.is_err() {
                        return;
                    }
                }
                group
                    .record_dataflow_event(DataflowEventKind::OperatorFired { firing_index })
                    .await;
                firing_index += 1;
            }
        });
        op
    }

    /// Start a splitter: one input, fanned out unchanged to every output.
    pub fn splitter<T>(
        group: Group,
        input: StreamReader<T>,
        outputs: Vec<Arc<DataflowStream<T>>>,
    ) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        let fan_out = outputs.len();
        Self::spawn(group, vec![input], outputs, move |values| {
            Ok(vec![values[0].clone(); fan_out])
        })
    }

    async fn gather<T>(inputs: &[StreamReader<T>]) -> Vec<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let reads = inputs.iter().cloned().map(|reader| tokio::spawn(async move { reader.read().await }));
        let mut values = Vec::with_capacity(inputs.len());
        for handle in reads {
            // An input reader is only ever read by this gather loop, so a
            // join failure here means the pool itself is shutting down.
            if let Ok(value) = handle.await {
                values.push(value);
            }
        }
        values
    }

    /// The group this operator runs on.
    pub fn group(&self) -> &Group {
        &self.group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::GroupConfig;

    #[tokio::test]
    async fn test_operator_sums_two_inputs() {
        let group = Group::new(GroupConfig::default());
        let in_a = Arc::new(DataflowStream::new(group.clone()));
        let in_b = Arc::new(DataflowStream::new(group.clone()));
        let out = Arc::new(DataflowStream::new(group.clone()));
        let out_reader = out.reader();

        let _op = Operator::spawn(
            group.clone(),
            vec![in_a.reader(), in_b.reader()],
            vec![out.clone()],
            |values| Ok(vec![values[0] + values[1]]),
        );

        in_a.write(2).await.unwrap();
        in_b.write(3).await.unwrap();
        assert_eq!(out_reader.read().await, 5);

        in_a.write(10).await.unwrap();
        in_b.write(20).await.unwrap();
        assert_eq!(out_reader.read().await, 30);
    }

    #[tokio::test]
    async fn test_splitter_fans_out() {
        let group = Group::new(GroupConfig::default());
        let input = Arc::new(DataflowStream::new(group.clone()));
        let out1 = Arc::new(DataflowStream::new(group.clone()));
        let out2 = Arc::new(DataflowStream::new(group.clone()));
        let r1 = out1.reader();
        let r2 = out2.reader();

        let _op = Operator::splitter(group.clone(), input.reader(), vec![out1.clone(), out2.clone()]);

        input.write(7).await.unwrap();
        assert_eq!(r1.read().await, 7);
        assert_eq!(r2.read().await, 7);
    }
}
