//! Read-aloud summary of the edit form.
//!
//! The text is rebuilt from the current form state on every call and never
//! stored. Output is Dutch, matching the rest of the editor's copy.

use bridge_traits::ContentFields;

/// Longest value rendered before truncation, in characters.
pub const MAX_VALUE_CHARS: usize = 100;

/// Rendered for empty or whitespace-only values.
pub const EMPTY_SENTINEL: &str = "leeg";

pub const ELLIPSIS: &str = "…";

const NAME_LABEL: &str = "Naam";
const DESCRIPTION_LABEL: &str = "Beschrijving";
const STYLE_LABEL: &str = "Stijl";
const MEDIA_LABEL: &str = "Afbeeldingen";
const VIDEO_LABEL: &str = "Video's";

/// Builds the assistive summary for an edit form.
///
/// ```
/// use bridge_traits::ContentFields;
/// use core_content::AccessibilityTextBuilder;
///
/// let fields = ContentFields::new("Salsa basis", "", "salsa");
/// let text = AccessibilityTextBuilder::build(&fields, 2, 0);
/// assert_eq!(
///     text,
///     "Naam. Huidige waarde: Salsa basis. \
///      Beschrijving. Huidige waarde: leeg. \
///      Stijl. Huidige waarde: salsa. \
///      Afbeeldingen: 2. Video's: 0"
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessibilityTextBuilder;

impl AccessibilityTextBuilder {
    pub fn build(fields: &ContentFields, media_count: usize, video_count: usize) -> String {
        let segments = [
            field_segment(NAME_LABEL, &fields.name),
            field_segment(DESCRIPTION_LABEL, &fields.description),
            field_segment(STYLE_LABEL, &fields.style),
            format!("{MEDIA_LABEL}: {media_count}"),
            format!("{VIDEO_LABEL}: {video_count}"),
        ];
        segments.join(". ")
    }
}

fn field_segment(label: &str, value: &str) -> String {
    format!("{label}. Huidige waarde: {}", display_value(value))
}

fn display_value(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return EMPTY_SENTINEL.to_string();
    }

    match value.char_indices().nth(MAX_VALUE_CHARS) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &value[..cut]),
        None => value.to_string(),
    }
}
