/// Enables or disables every submit control of a form at once.
///
/// Controls start disabled. There is no partial state: a gate is either
/// fully open or fully closed.
pub trait SaveGate {
    fn disable_all(&self);
    fn enable_all(&self);
}
