use listing_scribe::error::StateError;
use listing_scribe::VersionHistory;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Create(String),
    Edit(String),
    Undo,
    Redo,
    Select(usize),
    Delete(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        "[a-z ]{0,12}".prop_map(Op::Create),
        "[a-z ]{0,12}".prop_map(Op::Edit),
        Just(Op::Undo),
        Just(Op::Redo),
        (0usize..8).prop_map(Op::Select),
        (0usize..8).prop_map(Op::Delete),
    ]
}

proptest! {
    #[test]
    fn invariants_hold_for_any_operation_sequence(first in "[a-z]{1,8}", ops in prop::collection::vec(op(), 0..40)) {
        let mut history = VersionHistory::new();
        history.create(first);
        let mut highest_id = 1;

        for op in ops {
            match op {
                Op::Create(content) => {
                    let id = history.create(content).id();
                    prop_assert!(id > highest_id);
                    highest_id = id;
                }
                Op::Edit(content) => {
                    let id = history.edit(content).id();
                    prop_assert!(id > highest_id);
                    highest_id = id;
                }
                Op::Undo => { history.undo(); }
                Op::Redo => { history.redo(); }
                Op::Select(index) => {
                    let len = history.len();
                    let result = history.select(index);
                    prop_assert_eq!(result.is_ok(), index < len);
                }
                Op::Delete(index) => {
                    let len = history.len();
                    let id = history.versions()[index % len].id();
                    let result = history.delete(id);
                    if len == 1 {
                        prop_assert_eq!(result.unwrap_err(), StateError::LastVersion { id });
                    } else {
                        prop_assert!(result.is_ok());
                        prop_assert!(history.get(id).is_none());
                    }
                }
            }

            prop_assert!(!history.is_empty());
            prop_assert!(history.current_index() < history.len());
            let ids: Vec<u64> = history.versions().iter().map(|v| v.id()).collect();
            prop_assert!(ids.windows(2).all(|w| w[0] > w[1]));
        }
    }

    #[test]
    fn undo_then_redo_restores_position(contents in prop::collection::vec("[a-z]{1,6}", 3..10), steps in 1usize..8) {
        let mut history = VersionHistory::new();
        for content in &contents {
            history.edit(content.clone());
        }
        let target = steps % (contents.len() - 1) + 1;
        history.select(target).unwrap();
        let before = history.current().unwrap().clone();

        prop_assert!(history.undo() || target == contents.len() - 1);
        if target < contents.len() - 1 {
            prop_assert!(history.redo());
        }
        prop_assert_eq!(history.current_index(), target);
        prop_assert_eq!(history.current().unwrap(), &before);
    }

    #[test]
    fn created_content_is_byte_identical(content in "\\PC*") {
        let mut history = VersionHistory::new();
        history.create(content.clone());
        prop_assert_eq!(history.select(0).unwrap().content(), content.as_str());
    }

    #[test]
    fn deleting_one_version_leaves_others_unchanged(count in 2usize..8, pick in 0usize..8) {
        let mut history = VersionHistory::new();
        for i in 0..count {
            history.edit(format!("content {}", i));
        }
        let before: Vec<(u64, String)> = history.versions().iter().map(|v| (v.id(), v.content().to_string())).collect();
        let victim = before[pick % count].0;

        history.delete(victim).unwrap();

        let expected: Vec<(u64, String)> = before.into_iter().filter(|(id, _)| *id != victim).collect();
        let after: Vec<(u64, String)> = history.versions().iter().map(|v| (v.id(), v.content().to_string())).collect();
        prop_assert_eq!(after, expected);
    }
}

#[test]
fn keyword_analysis_is_deterministic() {
    let content = "Helle Wohnung helle Räume ruhige Lage ruhige Straße Wohnung";
    let first = listing_scribe::analysis::analyze(content);
    for _ in 0..10 {
        assert_eq!(listing_scribe::analysis::analyze(content), first);
    }
}
