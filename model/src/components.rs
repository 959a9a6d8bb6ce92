use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::num::NonZeroU32;

use super::{EntityDescriptor, FieldDescriptor};

/// A value stored in a [`ComponentTable`].
pub trait Component {
    const DISPLAY_NAME: &'static str;
}

/// Carrier of the slot accessors, kept off [`Component`] so they stay crate-private.
pub struct Slots;

/// Gives access to the slots holding components of kind `R`.
pub trait HasSlots<R: Component>: Sized {
    fn pending(table: &ConstructionComponentTable) -> &[Option<R>];
    fn pending_mut(table: &mut ConstructionComponentTable) -> &mut Vec<Option<R>>;
    fn complete(table: &SchemaComponentTable) -> &[R];
}

/// A handle to a [`Component`] in a [`ComponentTable`]. Handles count from one.
pub struct Ref<R: Component>(NonZeroU32, PhantomData<R>);

impl<R: Component> Ref<R> {
    fn slot(self) -> usize {
        self.0.get() as usize - 1
    }

    pub fn get(self, table: &impl ComponentTable) -> &R
    where
        Slots: HasSlots<R>,
    {
        table.get(self)
    }
}

// Implemented by hand: deriving would require `R` itself to implement each trait.

impl<R: Component> Copy for Ref<R> {}

impl<R: Component> Clone for Ref<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Component> fmt::Debug for Ref<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<{} #{}>", R::DISPLAY_NAME, self.0)
    }
}

impl<R: Component> PartialEq for Ref<R> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<R: Component> Eq for Ref<R> {}

impl<R: Component> Hash for Ref<R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

/// Arena storage for the entities and fields of a schema.
pub trait ComponentTable {
    /// The component behind `ref_`. Panics if the slot is empty, which only a table still under
    /// construction can have.
    fn get<R>(&self, ref_: Ref<R>) -> &R
    where
        R: Component,
        Slots: HasSlots<R>;
}

/// The table filled while a model document is read.
///
/// Entity slots are reserved by name before any entity is mapped, which lets `extends` refer
/// forward.
#[derive(Default)]
pub struct ConstructionComponentTable {
    entities: Vec<Option<EntityDescriptor>>,
    fields: Vec<Option<FieldDescriptor>>,
}

impl ComponentTable for ConstructionComponentTable {
    fn get<R>(&self, ref_: Ref<R>) -> &R
    where
        R: Component,
        Slots: HasSlots<R>,
    {
        match Slots::pending(self).get(ref_.slot()) {
            Some(Some(component)) => component,
            Some(None) => panic!("{ref_:?} is reserved but not mapped yet"),
            None => panic!("{ref_:?} belongs to another table"),
        }
    }
}

impl ConstructionComponentTable {
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// Takes an empty slot for a component that is mapped later.
    pub(super) fn reserve<R>(&mut self) -> Ref<R>
    where
        R: Component,
        Slots: HasSlots<R>,
    {
        let slots = Slots::pending_mut(self);
        slots.push(None);
        let id = u32::try_from(slots.len())
            .ok()
            .and_then(NonZeroU32::new)
            .unwrap_or_else(|| panic!("too many {} components", R::DISPLAY_NAME));
        Ref(id, PhantomData)
    }

    /// Fills the slot of `ref_` and hands the handle back.
    pub(super) fn insert<R>(&mut self, ref_: Ref<R>, value: R) -> Ref<R>
    where
        R: Component,
        Slots: HasSlots<R>,
    {
        match Slots::pending_mut(self).get_mut(ref_.slot()) {
            Some(slot) => *slot = Some(value),
            None => panic!("{ref_:?} belongs to another table"),
        }
        ref_
    }

    pub(super) fn create<R>(&mut self, value: R) -> Ref<R>
    where
        R: Component,
        Slots: HasSlots<R>,
    {
        let ref_ = self.reserve();
        self.insert(ref_, value)
    }

    /// Freezes the table. `None` if a reserved slot was never filled.
    pub(super) fn convert_to_schema_table(self) -> Option<SchemaComponentTable> {
        Some(SchemaComponentTable {
            entities: self.entities.into_iter().collect::<Option<_>>()?,
            fields: self.fields.into_iter().collect::<Option<_>>()?,
        })
    }
}

/// The table handed out with a finished [`Schema`](crate::Schema). Every slot is filled.
#[derive(Debug)]
pub struct SchemaComponentTable {
    entities: Box<[EntityDescriptor]>,
    fields: Box<[FieldDescriptor]>,
}

impl ComponentTable for SchemaComponentTable {
    fn get<R>(&self, ref_: Ref<R>) -> &R
    where
        R: Component,
        Slots: HasSlots<R>,
    {
        Slots::complete(self)
            .get(ref_.slot())
            .unwrap_or_else(|| panic!("{ref_:?} belongs to another table"))
    }
}

macro_rules! has_slots_impl {
    ($component:ty, $slots:ident) => {
        impl HasSlots<$component> for Slots {
            fn pending(table: &ConstructionComponentTable) -> &[Option<$component>] {
                &table.$slots
            }

            fn pending_mut(table: &mut ConstructionComponentTable) -> &mut Vec<Option<$component>> {
                &mut table.$slots
            }

            fn complete(table: &SchemaComponentTable) -> &[$component] {
                &table.$slots
            }
        }
    };
}

has_slots_impl!(EntityDescriptor, entities);
has_slots_impl!(FieldDescriptor, fields);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TypeRef;

    fn entity(name: &str) -> EntityDescriptor {
        EntityDescriptor {
            name: name.into(),
            is_abstract: false,
            parent: None,
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    #[test]
    fn reserved_slots_are_filled_later() {
        let mut table = ConstructionComponentTable::new();
        let first = table.reserve::<EntityDescriptor>();
        let second = table.create(entity("Second"));
        table.insert(first, entity("First"));

        let table = table.convert_to_schema_table().unwrap();
        assert_eq!(first.get(&table).name, "First");
        assert_eq!(second.get(&table).name, "Second");
        assert_ne!(first, second);
    }

    #[test]
    fn unfilled_reservation_cannot_be_converted() {
        let mut table = ConstructionComponentTable::new();
        let owner = table.reserve::<EntityDescriptor>();
        table.create(FieldDescriptor {
            name: "id".into(),
            type_: TypeRef::primitive("i32"),
            is_collection: false,
            owner,
        });

        assert!(table.convert_to_schema_table().is_none());
    }

    #[test]
    #[should_panic(expected = "reserved but not mapped")]
    fn reading_a_reserved_slot_panics() {
        let mut table = ConstructionComponentTable::new();
        let ref_ = table.reserve::<EntityDescriptor>();
        ref_.get(&table);
    }

    #[test]
    fn refs_debug_print_their_component_kind() {
        let mut table = ConstructionComponentTable::new();
        let ref_ = table.create(entity("Invoice"));
        assert_eq!(format!("{ref_:?}"), "<entity #1>");
    }
}
