use std::collections::BTreeSet;

use form_spec::spec::FieldType;
use form_spec::{FieldPatch, FormBuilder, validate_form};

#[test]
fn catalog_carries_the_six_builtin_templates() {
    let templates = form_spec::templates();
    assert_eq!(templates.len(), 6);

    let ids: Vec<&str> = templates.iter().map(|template| template.id).collect();
    assert_eq!(
        ids,
        vec!["text", "textarea", "radio", "checkbox", "select", "rating"]
    );
    assert!(form_spec::template("rating").is_some());
    assert!(form_spec::template("file-upload").is_none());
}

#[test]
fn add_field_seeds_template_defaults() {
    let mut builder = FormBuilder::new();
    let field = builder.add_field("text").expect("text template exists");

    assert_eq!(field.kind, FieldType::Text);
    assert_eq!(field.label, "Text Field");
    assert!(!field.required);
    assert_eq!(field.placeholder.as_deref(), Some("Enter text..."));
}

#[test]
fn add_field_unknown_template_is_noop() {
    let mut builder = FormBuilder::new();
    builder.add_field("text");

    assert!(builder.add_field("file-upload").is_none());
    assert_eq!(builder.len(), 1);
}

#[test]
fn ids_stay_unique_across_adds_and_removals() {
    let mut builder = FormBuilder::new();
    let mut seen = BTreeSet::new();

    for template in ["text", "radio", "rating", "checkbox"] {
        let id = builder.add_field(template).expect("template").id.clone();
        assert!(seen.insert(id));
    }

    let removed = builder.fields()[1].id.clone();
    builder.remove_field(&removed);

    for template in ["select", "textarea", "text"] {
        let id = builder.add_field(template).expect("template").id.clone();
        assert!(seen.insert(id.clone()), "id {} was reused", id);
    }
}

#[test]
fn update_field_merges_partial_updates() {
    let mut builder = FormBuilder::new();
    let id = builder.add_field("text").expect("template").id.clone();

    builder.update_field(
        &id,
        FieldPatch {
            label: Some("Session feedback".into()),
            required: Some(true),
            ..FieldPatch::default()
        },
    );

    let field = builder.field(&id).expect("field");
    assert_eq!(field.label, "Session feedback");
    assert!(field.required);
    // untouched attributes survive the merge
    assert_eq!(field.placeholder.as_deref(), Some("Enter text..."));
}

#[test]
fn update_field_unknown_id_is_noop() {
    let mut builder = FormBuilder::new();
    builder.add_field("text");
    let before = builder.fields();

    builder.update_field(
        "missing",
        FieldPatch {
            label: Some("nope".into()),
            ..FieldPatch::default()
        },
    );

    assert_eq!(builder.fields(), before);
}

#[test]
fn remove_field_clears_active_pointer() {
    let mut builder = FormBuilder::new();
    let first = builder.add_field("text").expect("template").id.clone();
    let second = builder.add_field("rating").expect("template").id.clone();

    builder.set_active(&second);
    builder.remove_field(&second);

    assert!(builder.active_field_id().is_none());
    assert_eq!(builder.len(), 1);

    // removing a non-active field leaves the pointer alone
    builder.set_active(&first);
    builder.remove_field("missing");
    assert_eq!(builder.active_field_id(), Some(first.as_str()));
}

#[test]
fn duplicate_inserts_copy_after_source() {
    let mut builder = FormBuilder::new();
    let source = builder.add_field("radio").expect("template").id.clone();
    builder.add_field("rating");
    builder.update_field(
        &source,
        FieldPatch {
            label: Some("Attend again?".into()),
            required: Some(true),
            options: Some(vec!["Yes".into(), "No".into()]),
            ..FieldPatch::default()
        },
    );

    let copy_id = builder
        .duplicate_field(&source)
        .expect("source exists")
        .id
        .clone();
    let fields = builder.fields();

    assert_eq!(fields.len(), 3);
    assert_eq!(fields[0].id, source);
    assert_eq!(fields[1].id, copy_id);
    assert_ne!(copy_id, source);
    assert_eq!(fields[1].label, "Attend again? (Copy)");
    assert_eq!(fields[1].kind, fields[0].kind);
    assert!(fields[1].required);
    assert_eq!(fields[1].options, fields[0].options);
}

#[test]
fn duplicate_unknown_id_is_noop() {
    let mut builder = FormBuilder::new();
    builder.add_field("text");

    assert!(builder.duplicate_field("missing").is_none());
    assert_eq!(builder.len(), 1);
}

#[test]
fn reorder_matches_remove_then_insert() {
    let templates = ["text", "textarea", "radio", "checkbox", "select"];

    for from in 0..templates.len() {
        for to in 0..templates.len() {
            let mut builder = FormBuilder::new();
            for template in templates {
                builder.add_field(template);
            }
            let mut expected: Vec<String> =
                builder.fields().iter().map(|field| field.id.clone()).collect();

            builder.reorder_fields(from, to);

            if from != to {
                let moved = expected.remove(from);
                expected.insert(to, moved);
            }
            let actual: Vec<String> =
                builder.fields().iter().map(|field| field.id.clone()).collect();
            assert_eq!(actual, expected, "reorder({}, {})", from, to);
        }
    }
}

#[test]
fn reorder_out_of_range_is_noop() {
    let mut builder = FormBuilder::new();
    builder.add_field("text");
    builder.add_field("rating");
    let before = builder.fields();

    builder.reorder_fields(0, 5);
    builder.reorder_fields(7, 0);

    assert_eq!(builder.fields(), before);
}

#[test]
fn clear_empties_sequence_and_pointer() {
    let mut builder = FormBuilder::new();
    builder.add_field("text");
    builder.add_field("rating");

    builder.clear();

    assert!(builder.is_empty());
    assert!(builder.active_field_id().is_none());
    assert!(builder.fields().is_empty());
}

#[test]
fn preview_toggle_leaves_field_data_alone() {
    let mut builder = FormBuilder::new();
    builder.add_field("text");
    let before = builder.fields();

    builder.toggle_preview();
    assert!(builder.is_preview());
    builder.toggle_preview();
    assert!(!builder.is_preview());

    assert_eq!(builder.fields(), before);
}

#[test]
fn from_fields_allocates_past_imported_ids() {
    let mut builder = FormBuilder::new();
    builder.add_field("text");
    builder.add_field("rating");
    let exported = builder.fields();

    let mut restored = FormBuilder::from_fields(exported);
    let fresh = restored.add_field("select").expect("template").id.clone();

    let ids: BTreeSet<String> = restored
        .fields()
        .iter()
        .map(|field| field.id.clone())
        .collect();
    assert_eq!(ids.len(), 3);
    assert!(ids.contains(&fresh));
}

#[test]
fn builder_session_end_to_end() {
    let mut builder = FormBuilder::new();

    let text_id = builder.add_field("text").expect("template").id.clone();
    {
        let field = builder.field(&text_id).expect("field");
        assert_eq!(field.kind, FieldType::Text);
        assert_eq!(field.label, "Text Field");
        assert!(!field.required);
    }

    builder.update_field(
        &text_id,
        FieldPatch {
            label: Some("Your Name".into()),
            required: Some(true),
            ..FieldPatch::default()
        },
    );

    let rating_id = builder.add_field("rating").expect("template").id.clone();
    assert_eq!(
        builder.field(&rating_id).and_then(|field| field.max_rating),
        Some(5)
    );

    builder.reorder_fields(1, 0);

    let fields = builder.fields();
    assert_eq!(fields[0].id, rating_id);
    assert_eq!(fields[1].id, text_id);

    let report = validate_form(&fields);
    assert!(report.valid);
    assert!(report.errors.is_empty());
}
