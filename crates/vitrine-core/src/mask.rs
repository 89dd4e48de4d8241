#![forbid(unsafe_code)]

//! Live phone-number formatting for `tel` inputs.
//!
//! The mask holds no per-field state: every event recomputes the display
//! string from the digits currently in the field, so any number of inputs
//! can share one [`PhoneMask`].
//!
//! # Template
//!
//! `_` marks a digit slot. Digits already present in the template (the
//! country code in `+7 (___) ___ ____`) are slots too: they are replaced
//! by typed digits in order, which is why the leading `7` a user types
//! lands on the country code. Every other character is copied verbatim.
//!
//! # Rules
//!
//! 1. The rebuilt string is cut at the first unfilled `_`; a cut inside the
//!    opening group falls back to keeping only the first three characters.
//! 2. The current text is replaced when it does not match the template
//!    prefix of the same length, is shorter than five characters, or the
//!    triggering key is a digit key.
//! 3. On blur, text shorter than five characters is cleared.
//! 4. A keydown with the caret inside the first three characters is
//!    suppressed.

use regex::Regex;

/// Template used when the configuration does not override it.
pub const DEFAULT_TEMPLATE: &str = "+7 (___) ___ ____";

const SLOT: char = '_';
const MIN_KEPT_LEN: usize = 5;
const PREFIX_LEN: usize = 3;

/// Event delivered to the mask for one input element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskEvent {
    Input,
    Focus,
    Blur,
    /// `key_code` is the legacy DOM `keyCode`; `caret` is `selectionStart`.
    KeyDown { key_code: u32, caret: usize },
}

impl MaskEvent {
    fn is_digit_key(self) -> bool {
        matches!(self, Self::KeyDown { key_code, .. } if (48..=57).contains(&key_code))
    }
}

/// Result of running the mask over a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskOutcome {
    /// Text the field should hold afterwards.
    pub value: String,
    /// Whether `value` differs from the text the mask was given.
    pub changed: bool,
    /// Whether the host must call `preventDefault()` on the event.
    pub prevent_default: bool,
}

/// Phone number formatter bound to one template.
#[derive(Debug, Clone)]
pub struct PhoneMask {
    template: Vec<char>,
}

impl Default for PhoneMask {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

impl PhoneMask {
    #[must_use]
    pub fn new(template: &str) -> Self {
        Self {
            template: template.chars().collect(),
        }
    }

    /// The template this mask formats against.
    #[must_use]
    pub fn template(&self) -> String {
        self.template.iter().collect()
    }

    /// Rebuild the display string from whatever digits `raw` contains.
    #[must_use]
    pub fn format(&self, raw: &str) -> String {
        let mut digits = raw.chars().filter(char::is_ascii_digit);
        let mut out: Vec<char> = self
            .template
            .iter()
            .map(|&c| {
                if c == SLOT || c.is_ascii_digit() {
                    digits.next().unwrap_or(c)
                } else {
                    c
                }
            })
            .collect();

        if let Some(first_open) = out.iter().position(|&c| c == SLOT) {
            let cut = if first_open < MIN_KEPT_LEN {
                PREFIX_LEN
            } else {
                first_open
            };
            out.truncate(cut);
        }
        out.into_iter().collect()
    }

    /// Whether `text` is a well-formed prefix of the template.
    ///
    /// The prefix is taken at `text`'s own length; each run of slots in it
    /// accepts between one and that many ASCII digits.
    #[must_use]
    pub fn matches_prefix(&self, text: &str) -> bool {
        let len = text.chars().count();
        let prefix: Vec<char> = self.template.iter().copied().take(len).collect();

        let mut pattern = String::from("^");
        let mut idx = 0;
        while idx < prefix.len() {
            if prefix[idx] == SLOT {
                let run = prefix[idx..].iter().take_while(|&&c| c == SLOT).count();
                pattern.push_str(&format!("[0-9]{{1,{run}}}"));
                idx += run;
            } else {
                let mut buf = [0u8; 4];
                pattern.push_str(&regex::escape(prefix[idx].encode_utf8(&mut buf)));
                idx += 1;
            }
        }
        pattern.push('$');

        match Regex::new(&pattern) {
            Ok(re) => re.is_match(text),
            Err(_err) => {
                crate::warn!(pattern = %pattern, "mask pattern failed to compile");
                false
            }
        }
    }

    /// Run the mask for one event on a field currently holding `current`.
    #[must_use]
    pub fn apply(&self, current: &str, event: MaskEvent) -> MaskOutcome {
        let prevent_default =
            matches!(event, MaskEvent::KeyDown { caret, .. } if caret < PREFIX_LEN);

        let mut value = current.to_owned();
        if !self.matches_prefix(current)
            || current.chars().count() < MIN_KEPT_LEN
            || event.is_digit_key()
        {
            value = self.format(current);
        }

        if event == MaskEvent::Blur && value.chars().count() < MIN_KEPT_LEN {
            value.clear();
        }

        MaskOutcome {
            changed: value != current,
            value,
            prevent_default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_digits(mask: &PhoneMask, start: &str, digits: &str) -> String {
        let mut value = start.to_owned();
        for d in digits.chars() {
            value.push(d);
            value = mask.apply(&value, MaskEvent::Input).value;
        }
        value
    }

    #[test]
    fn typing_full_number_formats() {
        let mask = PhoneMask::default();
        assert_eq!(type_digits(&mask, "", "79991234567"), "+7 (999) 123 4567");
    }

    #[test]
    fn focus_then_typing_subscriber_number() {
        let mask = PhoneMask::default();
        let focused = mask.apply("", MaskEvent::Focus).value;
        assert_eq!(focused, "+7 ");

        let mut value = focused;
        for d in "9991234567".chars() {
            let code = u32::from(d);
            let before = mask.apply(
                &value,
                MaskEvent::KeyDown {
                    key_code: code,
                    caret: value.chars().count(),
                },
            );
            assert!(!before.prevent_default);
            value = before.value;
            value.push(d);
            value = mask.apply(&value, MaskEvent::Input).value;
        }
        assert_eq!(value, "+7 (999) 123 4567");
    }

    #[test]
    fn partial_groups_truncate_at_first_gap() {
        let mask = PhoneMask::default();
        assert_eq!(mask.format("79"), "+7 (9");
        assert_eq!(mask.format("7999"), "+7 (999) ");
        assert_eq!(mask.format("79991"), "+7 (999) 1");
        assert_eq!(mask.format("7999123"), "+7 (999) 123 ");
    }

    #[test]
    fn short_input_keeps_three_char_prefix() {
        let mask = PhoneMask::default();
        assert_eq!(mask.format(""), "+7 ");
        assert_eq!(mask.format("7"), "+7 ");
    }

    #[test]
    fn extra_digits_are_dropped() {
        let mask = PhoneMask::default();
        let out = mask.apply("+7 (999) 123 45678", MaskEvent::Input);
        assert_eq!(out.value, "+7 (999) 123 4567");
        assert!(out.changed);
    }

    #[test]
    fn pasted_text_is_filtered_to_digits() {
        let mask = PhoneMask::default();
        let out = mask.apply("tel: 7-999-123-45-67", MaskEvent::Input);
        assert_eq!(out.value, "+7 (999) 123 4567");
    }

    #[test]
    fn non_ascii_digits_are_not_accepted() {
        let mask = PhoneMask::default();
        assert!(!mask.matches_prefix("+7 (\u{661}\u{662}"));
        let out = mask.apply("+7 (\u{661}\u{662}", MaskEvent::Input);
        assert_eq!(out.value, "+7 ");
        assert!(out.changed);
        assert_eq!(mask.format("7\u{96F}99"), "+7 (99");
    }

    #[test]
    fn valid_prefix_left_alone() {
        let mask = PhoneMask::default();
        let out = mask.apply("+7 (99", MaskEvent::Input);
        assert_eq!(out.value, "+7 (99");
        assert!(!out.changed);
    }

    #[test]
    fn blur_clears_short_value() {
        let mask = PhoneMask::default();
        assert_eq!(mask.apply("+7 ", MaskEvent::Blur).value, "");
        assert_eq!(mask.apply("", MaskEvent::Blur).value, "");
        assert_eq!(mask.apply("+7 (9", MaskEvent::Blur).value, "+7 (9");
    }

    #[test]
    fn keydown_inside_prefix_is_suppressed() {
        let mask = PhoneMask::default();
        let out = mask.apply(
            "+7 (999",
            MaskEvent::KeyDown {
                key_code: 8,
                caret: 2,
            },
        );
        assert!(out.prevent_default);
        let out = mask.apply(
            "+7 (999",
            MaskEvent::KeyDown {
                key_code: 8,
                caret: 3,
            },
        );
        assert!(!out.prevent_default);
    }

    #[test]
    fn prefix_regex_escapes_literals() {
        let mask = PhoneMask::default();
        assert!(mask.matches_prefix("+7 (999) 1"));
        assert!(mask.matches_prefix(""));
        assert!(!mask.matches_prefix("+7 999"));
        assert!(!mask.matches_prefix("x7 (999) 1"));
    }

    #[test]
    fn custom_template() {
        let mask = PhoneMask::new("+7 (___) ___-__-__");
        assert_eq!(type_digits(&mask, "", "79161234567"), "+7 (916) 123-45-67");
    }
}
