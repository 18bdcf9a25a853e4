// Property tests: arbitrary create/delete sequences against the memory store.

use std::collections::HashSet;

use proptest::prelude::*;
use taskboard_common::types::{Task, TaskId};
use taskboard_server::store::{MemoryTaskStore, TaskStore};

#[derive(Debug, Clone)]
enum Op {
    Create(String),
    /// Delete the n-th live record (modulo length), or a missing id when empty.
    DeleteExisting(usize),
    DeleteMissing(i64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => "[a-z ]{1,16}".prop_map(Op::Create),
        2 => any::<usize>().prop_map(Op::DeleteExisting),
        1 => (10_000i64..20_000).prop_map(Op::DeleteMissing),
    ]
}

proptest! {
    #[test]
    fn store_matches_reference_model(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let store = MemoryTaskStore::new();
        let mut model: Vec<Task> = Vec::new();
        let mut seen_ids = HashSet::new();
        let mut creates = 0usize;
        let mut deletes = 0usize;

        for op in ops {
            match op {
                Op::Create(text) => {
                    let task = store.insert(text.clone());
                    prop_assert!(!task.completed);
                    prop_assert_eq!(&task.text, &text);
                    prop_assert!(seen_ids.insert(task.id), "id {} was reused", task.id);
                    model.push(task);
                    creates += 1;
                }
                Op::DeleteExisting(n) if !model.is_empty() => {
                    let target = model.remove(n % model.len()).id;
                    prop_assert!(store.remove_by_id(target));
                    deletes += 1;
                }
                Op::DeleteExisting(_) => {
                    prop_assert!(!store.remove_by_id(TaskId(-1)));
                }
                Op::DeleteMissing(id) => {
                    let before = store.list();
                    prop_assert!(!store.remove_by_id(TaskId(id)));
                    prop_assert_eq!(store.list(), before);
                }
            }
        }

        prop_assert_eq!(store.len(), creates - deletes);
        prop_assert_eq!(store.list(), model);
    }
}
