/// Logical iterations folded into one physical iteration when the trip
/// count is only known at runtime. Callers may override it per pass, any
/// factor below 2 is rejected.
pub const DEFAULT_UNROLL_FACTOR: usize = 3;
