use scenesync_shared::{ByteWrite, ChangeFlags, ObjectIdLookup, TypeTag};

/// Authority-side view of one component instance on one domain object.
///
/// Implemented by the host for each synchronized component kind. The sync
/// core owns the boxed broadcaster and never touches the domain object
/// except through these calls.
pub trait Broadcaster {
    fn type_tag(&self) -> TypeTag;

    /// Whether the backing instance still exists. A dead broadcaster is
    /// culled before it is asked for anything else.
    fn is_alive(&self) -> bool;

    /// Compares observable state against the snapshot taken by the previous
    /// call, refreshes the snapshot, and returns the sub-fields that differ
    fn diff(&mut self) -> ChangeFlags;

    /// Writes one field per set flag, in the kind's fixed field order.
    /// References to other objects are written as their identity, resolved
    /// through `objects`.
    fn write_fields(
        &self,
        flags: &ChangeFlags,
        objects: &dyn ObjectIdLookup,
        writer: &mut dyn ByteWrite,
    );
}
