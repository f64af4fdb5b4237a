use assessment_forms::domain::services::{editor, settings_policy};
use assessment_forms::{
    compute_progress, FieldId, FormDocument, FormId, FormSettings, IndicatorId, PreviewState,
    SectionId, SectionPatch, SequentialIdSource,
};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    AddSection,
    AddIndicator(usize),
    AddField(usize, usize),
    RenameSection(usize, String),
    DeleteSection(usize),
    DeleteIndicator(usize, usize),
    DeleteField(usize, usize, usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::AddSection),
        3 => (0..8usize).prop_map(Op::AddIndicator),
        3 => (0..8usize, 0..8usize).prop_map(|(s, i)| Op::AddField(s, i)),
        1 => (0..8usize, "[A-Za-z ]{0,12}").prop_map(|(s, t)| Op::RenameSection(s, t)),
        1 => (0..8usize).prop_map(Op::DeleteSection),
        1 => (0..8usize, 0..8usize).prop_map(|(s, i)| Op::DeleteIndicator(s, i)),
        1 => (0..8usize, 0..8usize, 0..8usize).prop_map(|(s, i, f)| Op::DeleteField(s, i, f)),
    ]
}

fn empty_doc() -> FormDocument {
    FormDocument::new(FormId::from("form-1"), "Audit", "", FormSettings::default())
}

// Index past the end picks a stale id so no-op paths get exercised too
fn section_at(doc: &FormDocument, idx: usize) -> SectionId {
    doc.sections()
        .get(idx)
        .map(|s| s.id().clone())
        .unwrap_or_else(|| SectionId::from("stale-section"))
}

fn indicator_at(doc: &FormDocument, sid: &SectionId, idx: usize) -> IndicatorId {
    doc.section(sid)
        .and_then(|s| s.indicators().get(idx))
        .map(|i| i.id().clone())
        .unwrap_or_else(|| IndicatorId::from("stale-indicator"))
}

fn field_at(doc: &FormDocument, sid: &SectionId, iid: &IndicatorId, idx: usize) -> FieldId {
    doc.indicator(sid, iid)
        .and_then(|i| i.fields().get(idx))
        .map(|f| f.id().clone())
        .unwrap_or_else(|| FieldId::from("stale-field"))
}

fn apply(doc: &FormDocument, op: &Op, ids: &SequentialIdSource) -> FormDocument {
    match op {
        Op::AddSection => editor::add_section(doc, ids),
        Op::AddIndicator(s) => editor::add_indicator(doc, &section_at(doc, *s), ids),
        Op::AddField(s, i) => {
            let sid = section_at(doc, *s);
            let iid = indicator_at(doc, &sid, *i);
            editor::add_field(doc, &sid, &iid, ids)
        }
        Op::RenameSection(s, title) => {
            editor::update_section(doc, &section_at(doc, *s), SectionPatch::Title(title.clone()))
        }
        Op::DeleteSection(s) => editor::delete_section(doc, &section_at(doc, *s)),
        Op::DeleteIndicator(s, i) => {
            let sid = section_at(doc, *s);
            let iid = indicator_at(doc, &sid, *i);
            editor::delete_indicator(doc, &sid, &iid)
        }
        Op::DeleteField(s, i, f) => {
            let sid = section_at(doc, *s);
            let iid = indicator_at(doc, &sid, *i);
            let fid = field_at(doc, &sid, &iid, *f);
            editor::delete_field(doc, &sid, &iid, &fid)
        }
    }
}

fn build(ops: &[Op]) -> FormDocument {
    let ids = SequentialIdSource::new();
    ops.iter().fold(empty_doc(), |doc, op| apply(&doc, op, &ids))
}

/// Elements common to both lists appear in the same relative order
fn same_relative_order<T: PartialEq + Clone>(before: &[T], after: &[T]) -> bool {
    let kept_before: Vec<T> = before.iter().filter(|x| after.contains(x)).cloned().collect();
    let kept_after: Vec<T> = after.iter().filter(|x| before.contains(x)).cloned().collect();
    kept_before == kept_after
}

fn section_ids(doc: &FormDocument) -> Vec<SectionId> {
    doc.sections().iter().map(|s| s.id().clone()).collect()
}

fn indicator_ids(doc: &FormDocument) -> Vec<IndicatorId> {
    doc.indicators().map(|i| i.id().clone()).collect()
}

fn field_ids(doc: &FormDocument) -> Vec<FieldId> {
    doc.fields().map(|f| f.id().clone()).collect()
}

proptest! {
    #[test]
    fn prop_edits_keep_ids_unique(ops in proptest::collection::vec(op(), 0..40)) {
        let doc = build(&ops);
        prop_assert!(doc.validate().is_ok());
    }

    #[test]
    fn prop_edits_keep_sibling_order(
        ops in proptest::collection::vec(op(), 0..30),
        last in op()
    ) {
        let ids = SequentialIdSource::new();
        let before = ops.iter().fold(empty_doc(), |doc, op| apply(&doc, op, &ids));
        let after = apply(&before, &last, &ids);

        prop_assert!(same_relative_order(&section_ids(&before), &section_ids(&after)));
        prop_assert!(same_relative_order(&indicator_ids(&before), &indicator_ids(&after)));
        prop_assert!(same_relative_order(&field_ids(&before), &field_ids(&after)));
    }

    #[test]
    fn prop_input_document_is_untouched(ops in proptest::collection::vec(op(), 0..20), last in op()) {
        let ids = SequentialIdSource::new();
        let before = ops.iter().fold(empty_doc(), |doc, op| apply(&doc, op, &ids));
        let snapshot = before.clone();
        let _ = apply(&before, &last, &ids);
        prop_assert_eq!(before, snapshot);
    }

    #[test]
    fn prop_delete_section_cascades(ops in proptest::collection::vec(op(), 1..40), pick in 0..8usize) {
        let doc = build(&ops);
        prop_assume!(!doc.sections().is_empty());

        let section = &doc.sections()[pick % doc.sections().len()];
        let doomed_indicators: Vec<IndicatorId> =
            section.indicators().iter().map(|i| i.id().clone()).collect();
        let doomed: Vec<FieldId> = section.fields().map(|f| f.id().clone()).collect();
        let next = editor::delete_section(&doc, section.id());

        prop_assert!(next.section(section.id()).is_none());
        prop_assert_eq!(next.sections().len(), doc.sections().len() - 1);
        for id in &doomed_indicators {
            prop_assert!(next.find_indicator(id).is_none());
        }
        for id in &doomed {
            prop_assert!(next.find_field(id).is_none());
        }
        prop_assert_eq!(
            next.indicators().count(),
            doc.indicators().count() - doomed_indicators.len()
        );
        prop_assert_eq!(next.total_field_count(), doc.total_field_count() - doomed.len());
    }

    #[test]
    fn prop_stale_ids_are_noops(ops in proptest::collection::vec(op(), 0..30)) {
        let doc = build(&ops);
        let ghost = SectionId::from("ghost");
        prop_assert_eq!(&editor::delete_section(&doc, &ghost), &doc);
        prop_assert_eq!(&editor::add_indicator(&doc, &ghost, &SequentialIdSource::new()), &doc);
        prop_assert_eq!(
            &editor::update_section(&doc, &ghost, SectionPatch::Title("x".into())),
            &doc
        );
    }

    #[test]
    fn prop_add_file_type_is_idempotent(ext in "\\.?[a-z0-9]{0,6}") {
        let base = FormSettings::default();
        let once = settings_policy::add_file_type(&base, &ext);
        let twice = settings_policy::add_file_type(&once, &ext);
        prop_assert_eq!(&once, &twice);

        let normalised = ext.trim().to_string();
        if normalised.starts_with('.') && normalised.len() > 1 {
            prop_assert!(once.allows_file_type(&normalised));
        } else {
            prop_assert_eq!(&once, &base);
        }
    }

    #[test]
    fn prop_toggle_section_is_self_inverse(ops in proptest::collection::vec(op(), 0..30), pick in 0..8usize) {
        let doc = build(&ops);
        let sid = section_at(&doc, pick);
        let initial = PreviewState::for_document(&doc);

        let mut state = initial.clone();
        state.toggle_section(&sid);
        prop_assert_ne!(state.is_section_expanded(&sid), initial.is_section_expanded(&sid));
        state.toggle_section(&sid);
        prop_assert_eq!(state, initial);
    }

    #[test]
    fn prop_progress_is_bounded(
        ops in proptest::collection::vec(op(), 0..30),
        entries in proptest::collection::vec((0..64usize, "[0-9]{0,3}"), 0..40)
    ) {
        let doc = build(&ops);
        let fields = field_ids(&doc);
        let mut state = PreviewState::for_document(&doc);

        for (idx, value) in entries {
            let id = fields
                .get(idx)
                .cloned()
                .unwrap_or_else(|| FieldId::from_string(format!("gone-{}", idx)));
            state.set_field_value(&id, value);
        }

        let progress = compute_progress(&doc, &state);
        prop_assert!(progress <= 100);
        if fields.is_empty() {
            prop_assert_eq!(progress, 0);
        }
    }
}
