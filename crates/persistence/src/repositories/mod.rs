//! Repository implementations for database operations.

pub mod city;
pub mod state;
pub mod user;

pub use city::CityRepository;
pub use state::StateRepository;
pub use user::UserRepository;

/// `LIKE` pattern matching `raw` anywhere in the column, with `\`, `%` and
/// `_` taken literally. Pair with `ESCAPE '\'`.
pub(crate) fn contains_pattern(raw: &str) -> String {
    let mut pattern = String::with_capacity(raw.len() + 2);
    pattern.push('%');
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
