use std::collections::BTreeMap;

use crate::spec::{FieldId, FieldPatch, FormField, template};

/// Mutable builder session owning the ordered field sequence of one form.
///
/// Fields live in an id-keyed arena with a separate order vector, so the
/// active-field pointer is always a plain id lookup and reordering never
/// invalidates outstanding ids. Ids are never reused after removal.
///
/// Calls that reference an unknown id or template id leave the state
/// unchanged; callers rely on that idempotence.
#[derive(Debug, Clone, Default)]
pub struct FormBuilder {
    fields: BTreeMap<FieldId, FormField>,
    order: Vec<FieldId>,
    active: Option<FieldId>,
    preview: bool,
    next_id: u64,
}

impl FormBuilder {
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
            order: Vec::new(),
            active: None,
            preview: false,
            next_id: 1,
        }
    }

    /// Rebuild a session from a previously exported field sequence.
    ///
    /// Fields repeating an earlier id are dropped (first occurrence wins);
    /// the id counter starts past the imported set so later additions can
    /// never collide.
    pub fn from_fields(fields: Vec<FormField>) -> Self {
        let mut builder = Self::new();
        for field in fields {
            if builder.fields.contains_key(&field.id) {
                continue;
            }
            builder.order.push(field.id.clone());
            builder.fields.insert(field.id.clone(), field);
        }
        builder.next_id = builder.order.len() as u64 + 1;
        builder
    }

    fn allocate_id(&mut self) -> FieldId {
        loop {
            let candidate = format!("field-{}", self.next_id);
            self.next_id += 1;
            if !self.fields.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    /// Append a new field seeded from the catalog template with that id.
    /// Unknown template ids change nothing and return `None`.
    pub fn add_field(&mut self, template_id: &str) -> Option<&FormField> {
        let template = template(template_id)?;
        let id = self.allocate_id();
        let field = template.instantiate(id.clone());
        self.order.push(id.clone());
        self.fields.insert(id.clone(), field);
        self.active = Some(id.clone());
        self.fields.get(&id)
    }

    /// Merge a partial update into the field with that id.
    pub fn update_field(&mut self, id: &str, patch: FieldPatch) {
        if let Some(field) = self.fields.get_mut(id) {
            field.apply(&patch);
        }
    }

    /// Drop the field with that id, releasing the active pointer if it
    /// referenced the removed field.
    pub fn remove_field(&mut self, id: &str) {
        if self.fields.remove(id).is_none() {
            return;
        }
        self.order.retain(|entry| entry != id);
        if self.active.as_deref() == Some(id) {
            self.active = None;
        }
    }

    /// Clone the field with that id into a fresh id, label suffixed
    /// `" (Copy)"`, inserted immediately after the source.
    pub fn duplicate_field(&mut self, id: &str) -> Option<&FormField> {
        let index = self.order.iter().position(|entry| entry == id)?;
        let mut copy = self.fields.get(id)?.clone();
        let copy_id = self.allocate_id();
        copy.id = copy_id.clone();
        copy.label.push_str(" (Copy)");
        self.order.insert(index + 1, copy_id.clone());
        self.fields.insert(copy_id.clone(), copy);
        self.active = Some(copy_id.clone());
        self.fields.get(&copy_id)
    }

    /// Atomic remove-then-insert: the field at `from` ends at position `to`,
    /// everything else keeps its relative order. Out-of-range indices change
    /// nothing.
    pub fn reorder_fields(&mut self, from: usize, to: usize) {
        if from >= self.order.len() || to >= self.order.len() || from == to {
            return;
        }
        let id = self.order.remove(from);
        self.order.insert(to, id);
    }

    /// Empty the sequence and release the active pointer.
    pub fn clear(&mut self) {
        self.fields.clear();
        self.order.clear();
        self.active = None;
    }

    /// The ordered field sequence, materialized.
    pub fn fields(&self) -> Vec<FormField> {
        self.order
            .iter()
            .filter_map(|id| self.fields.get(id))
            .cloned()
            .collect()
    }

    pub fn field(&self, id: &str) -> Option<&FormField> {
        self.fields.get(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Point the UI at a field. Unknown ids clear the pointer rather than
    /// leave it dangling.
    pub fn set_active(&mut self, id: &str) {
        self.active = self.fields.contains_key(id).then(|| id.to_string());
    }

    pub fn active_field(&self) -> Option<&FormField> {
        self.active.as_deref().and_then(|id| self.fields.get(id))
    }

    pub fn active_field_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Toggle the read-only preview rendering. Field data is unaffected.
    pub fn toggle_preview(&mut self) {
        self.preview = !self.preview;
    }

    pub fn is_preview(&self) -> bool {
        self.preview
    }
}
