//! Fallback content shown when no archive exists yet.

use super::note::Note;
use chrono::Utc;

/// Welcome note text; the markdown inside is static sample content.
pub const WELCOME_ENTRY: &str = "Hello Sunshine! Come & tap me first!\n👇👇👇\n\n\
You can power up your note by writing your words like **this** or _this_, \
create an [url link](http://apple.com), or even make a todo list:\n\n\
* Watch WWDC videos.\n* Write `code`.\n* Fetch my girlfriend for a ride.\n* Refactor `code`.\n\n\
Or even create quote:\n\n> A block of quote.\n\n\
Tap *Go!* to preview your enhanced note.\n\nTap *How?* to learn more.";

/// Second sample note.
pub const SWIPE_ENTRY: &str = "Swipe me left or tap edit to delete.";

/// Third sample note.
pub const MOVE_ENTRY: &str = "Tap edit to move me or delete me.";

/// Builds the three sample notes in display order.
pub fn sample_notes() -> Vec<Note> {
    let now = Utc::now();
    [WELCOME_ENTRY, SWIPE_ENTRY, MOVE_ENTRY]
        .into_iter()
        .filter_map(|entry| Note::with_created_at(entry, now).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{sample_notes, MOVE_ENTRY, SWIPE_ENTRY, WELCOME_ENTRY};

    #[test]
    fn sample_notes_keep_fixed_order() {
        let entries = sample_notes()
            .into_iter()
            .map(|note| note.entry)
            .collect::<Vec<_>>();
        assert_eq!(entries, vec![WELCOME_ENTRY, SWIPE_ENTRY, MOVE_ENTRY]);
    }
}
