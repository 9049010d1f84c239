//! `task { task { 40 }.val + 2 }.val == 42`: nested tasks inherit the
//! ambient group without it being passed explicitly.

use concurro::ambient;
use concurro::prelude::*;

#[tokio::test]
async fn nested_task_chain_resolves_to_42() {
    let group = Group::new(GroupConfig::default());

    let outer = group.task(move || async move {
        let inner_group = ambient::current().expect("task should install the ambient group");
        let inner = inner_group.task(|| async { Ok::<_, std::convert::Infallible>(40) });
        let value = match inner.val().await {
            TaskOutcome::Ok(value) => value,
            TaskOutcome::Failed(_) => unreachable!("inner task cannot fail"),
        };
        Ok::<_, std::convert::Infallible>(value + 2)
    });

    match outer.val().await {
        TaskOutcome::Ok(value) => assert_eq!(value, 42),
        TaskOutcome::Failed(_) => panic!("expected success"),
    }
}
