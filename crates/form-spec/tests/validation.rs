use serde_json::{Value, json};

use form_spec::spec::{FieldType, FormField};
use form_spec::{
    example_responses, response_schema, validate_field, validate_form, validate_response,
    validate_responses,
};

fn text_field(id: &str, label: &str, required: bool) -> FormField {
    let mut field = FormField::blank(id, FieldType::Text);
    field.label = label.into();
    field.required = required;
    field
}

fn radio_field(id: &str, options: &[&str]) -> FormField {
    let mut field = FormField::blank(id, FieldType::Radio);
    field.label = "Pick one".into();
    field.options = Some(options.iter().map(|option| option.to_string()).collect());
    field
}

fn checkbox_field(id: &str, options: &[&str]) -> FormField {
    let mut field = FormField::blank(id, FieldType::Checkbox);
    field.label = "Pick some".into();
    field.options = Some(options.iter().map(|option| option.to_string()).collect());
    field
}

fn rating_field(id: &str, max_rating: Option<u8>) -> FormField {
    let mut field = FormField::blank(id, FieldType::Rating);
    field.label = "Rate it".into();
    field.max_rating = max_rating;
    field
}

#[test]
fn field_label_must_survive_trimming() {
    let field = text_field("f1", "   ", false);
    let report = validate_field(&field);
    assert!(!report.valid);
    assert_eq!(report.errors, vec!["Label is required".to_string()]);
}

#[test]
fn choice_field_needs_two_options() {
    let field = radio_field("f1", &["A"]);
    let report = validate_field(&field);
    assert!(!report.valid);
    assert!(report.errors[0].contains("at least 2 options"));

    let missing = radio_field("f1", &[]);
    assert!(!validate_field(&missing).valid);

    let mut omitted = radio_field("f1", &["A", "B"]);
    omitted.options = None;
    assert!(!validate_field(&omitted).valid);
}

#[test]
fn choice_options_cannot_be_blank() {
    let field = radio_field("f1", &["A", "   "]);
    let report = validate_field(&field);
    assert!(!report.valid);
    assert!(report.errors[0].contains("blank"));
}

#[test]
fn rating_bounds_are_two_to_ten() {
    assert!(!validate_field(&rating_field("f1", Some(1))).valid);
    assert!(
        validate_field(&rating_field("f1", Some(1))).errors[0]
            .contains("must be between 2 and 10")
    );
    assert!(validate_field(&rating_field("f1", Some(2))).valid);
    assert!(validate_field(&rating_field("f1", Some(5))).valid);
    assert!(validate_field(&rating_field("f1", Some(10))).valid);
    assert!(!validate_field(&rating_field("f1", Some(11))).valid);
    // absent maxRating falls back to the default of 5
    assert!(validate_field(&rating_field("f1", None)).valid);
}

#[test]
fn empty_form_short_circuits_with_one_error() {
    let report = validate_form(&[]);
    assert!(!report.valid);
    assert_eq!(
        report.errors,
        vec!["Form must have at least one field".to_string()]
    );
}

#[test]
fn aggregate_errors_carry_field_numbers() {
    let fields = vec![
        text_field("f1", "Name", true),
        radio_field("f2", &["A"]),
        text_field("f3", "", false),
    ];
    let report = validate_form(&fields);

    assert!(!report.valid);
    assert_eq!(report.errors.len(), 2);
    assert!(report.errors[0].starts_with("Field 2: "));
    assert!(report.errors[1].starts_with("Field 3: "));
}

#[test]
fn required_text_rejects_empty_answers() {
    let field = text_field("f1", "Name", true);
    assert!(!validate_response(&field, &json!("")).valid);
    assert!(!validate_response(&field, &json!("   ")).valid);
    assert!(!validate_response(&field, &Value::Null).valid);
    assert!(validate_response(&field, &json!("Ada")).valid);
}

#[test]
fn optional_fields_accept_absent_answers() {
    let field = text_field("f1", "Name", false);
    assert!(validate_response(&field, &json!("")).valid);
    assert!(validate_response(&field, &Value::Null).valid);

    let boxes = checkbox_field("f2", &["A", "B"]);
    assert!(validate_response(&boxes, &json!([])).valid);
}

#[test]
fn required_checkbox_needs_a_selection() {
    let mut field = checkbox_field("f1", &["A", "B"]);
    field.required = true;

    assert!(!validate_response(&field, &json!([])).valid);
    assert!(validate_response(&field, &json!(["A"])).valid);
}

#[test]
fn checkbox_selections_must_come_from_options() {
    let field = checkbox_field("f1", &["A", "B"]);
    let report = validate_response(&field, &json!(["A", "C"]));
    assert!(!report.valid);
    assert!(report.errors[0].contains("'C'"));
}

#[test]
fn checkbox_selections_cannot_repeat() {
    let field = checkbox_field("f1", &["A", "B"]);
    assert!(!validate_response(&field, &json!(["A", "A"])).valid);
    assert!(validate_response(&field, &json!(["A", "B"])).valid);
}

#[test]
fn single_choice_answer_must_match_an_option() {
    let mut field = radio_field("f1", &["Yes", "No"]);
    field.required = true;

    assert!(validate_response(&field, &json!("Yes")).valid);
    assert!(!validate_response(&field, &json!("Maybe")).valid);
    assert!(!validate_response(&field, &json!(3)).valid);
}

#[test]
fn rating_answer_must_fit_the_scale() {
    let field = rating_field("f1", Some(5));
    assert!(validate_response(&field, &json!(1)).valid);
    assert!(validate_response(&field, &json!(5)).valid);
    assert!(!validate_response(&field, &json!(6)).valid);
    assert!(!validate_response(&field, &json!(-1)).valid);
    assert!(!validate_response(&field, &json!("great")).valid);
}

#[test]
fn unset_rating_counts_as_missing() {
    let mut field = rating_field("f1", Some(5));
    field.required = true;
    assert!(!validate_response(&field, &json!(0)).valid);

    field.required = false;
    assert!(validate_response(&field, &json!(0)).valid);
}

#[test]
fn whole_submission_reports_structured_details() {
    let mut name = text_field("name", "Name", true);
    name.required = true;
    let vote = radio_field("vote", &["Yes", "No"]);
    let fields = vec![name, vote];

    let responses = json!({
        "vote": "Maybe",
        "stray": "value",
    });
    let result = validate_responses(&fields, &responses);

    assert!(!result.valid);
    assert_eq!(result.missing_required, vec!["name"]);
    assert_eq!(result.unknown_fields, vec!["stray"]);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].field_id, "vote");
    assert_eq!(result.errors[0].path, "/vote");
    assert_eq!(result.errors[0].code, "unknown_option");
}

#[test]
fn valid_submission_passes_the_whole_gate() {
    let mut name = text_field("name", "Name", true);
    name.required = true;
    let mut boxes = checkbox_field("sessions", &["Keynote", "Panel"]);
    boxes.required = true;
    let rating = rating_field("score", Some(5));
    let fields = vec![name, boxes, rating];

    let responses = json!({
        "name": "Ada",
        "sessions": ["Panel"],
        "score": 4,
    });
    let result = validate_responses(&fields, &responses);

    assert!(result.valid);
    assert!(result.errors.is_empty());
    assert!(result.missing_required.is_empty());
    assert!(result.unknown_fields.is_empty());
}

#[test]
fn example_responses_satisfy_their_own_fields() {
    let mut name = text_field("name", "Name", true);
    name.required = true;
    let vote = radio_field("vote", &["Yes", "No"]);
    let mut boxes = checkbox_field("sessions", &["Keynote", "Panel"]);
    boxes.required = true;
    let rating = rating_field("score", Some(5));
    let fields = vec![name, vote, boxes, rating];

    let examples = example_responses(&fields);
    assert_eq!(examples["name"], json!("example-name"));
    assert_eq!(examples["vote"], json!("Yes"));
    assert_eq!(examples["sessions"], json!(["Keynote"]));
    assert_eq!(examples["score"], json!(3));

    assert!(validate_responses(&fields, &examples).valid);
}

#[test]
fn response_schema_mirrors_field_shapes() {
    let mut name = text_field("name", "Name", true);
    name.required = true;
    let vote = radio_field("vote", &["Yes", "No"]);
    let boxes = checkbox_field("sessions", &["Keynote", "Panel"]);
    let rating = rating_field("score", Some(7));
    let fields = vec![name, vote, boxes, rating];

    let schema = response_schema(&fields);
    let props = schema["properties"].as_object().expect("properties");

    assert_eq!(props["name"]["type"], "string");
    assert_eq!(props["vote"]["enum"], json!(["Yes", "No"]));
    assert_eq!(props["sessions"]["type"], "array");
    assert_eq!(props["sessions"]["uniqueItems"], json!(true));
    assert_eq!(props["score"]["minimum"], json!(1));
    assert_eq!(props["score"]["maximum"], json!(7));

    let required = schema["required"].as_array().expect("required");
    assert_eq!(required.len(), 1);
    assert_eq!(required[0], "name");
    assert_eq!(schema["additionalProperties"], json!(false));
}
