use std::time::Instant;

///
/// measure time in milli-seconds (ms) of closure.
///
pub fn timer<F, T>(f: F) -> (T, u128)
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let ret = f();
    let duration = start.elapsed();
    (ret, duration.as_millis())
}
