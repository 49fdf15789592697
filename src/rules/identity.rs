use crate::PlayerId;

/// What the engine knows about whoever sits in a seat.
/// Sessions look up their own occupant record by this id.
pub trait Identity: Send + Sync {
    fn id(&self) -> &PlayerId;
    fn name(&self) -> &str;
}
