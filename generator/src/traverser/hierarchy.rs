use std::iter;

use dt_model::{EntityDescriptor, FieldDescriptor, Ref, SchemaComponentTable};

/// All fields of `entity`: its own first, then those of each ancestor, nearest ancestor first.
/// Each level keeps its declaration order.
pub fn fields(
    table: &SchemaComponentTable,
    entity: Ref<EntityDescriptor>,
) -> Vec<Ref<FieldDescriptor>> {
    iter::successors(Some(entity), move |level| level.get(table).parent)
        .flat_map(move |level| level.get(table).fields.iter().copied())
        .collect()
}
