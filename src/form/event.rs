use crate::core::FieldId;

#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    InputChanged { id: FieldId, value: String },
    Touched { id: FieldId },
    ErrorScheduled { id: FieldId },
    ErrorCancelled { id: FieldId },
}
