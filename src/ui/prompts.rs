//! Yes/no prompts.

use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;

use crate::error::{PitchError, Result};

/// Interpret one line of operator input.
///
/// `y`/`yes` (any case) is yes and `n`/`no` is no. Anything else, including
/// an empty line, resolves to `default`.
///
/// ```
/// use pitch::ui::answer;
///
/// assert!(answer("YES", false));
/// assert!(!answer("", false));
/// assert!(answer("", true));
/// assert!(answer("maybe", true));
/// ```
pub fn answer(line: &str, default: bool) -> bool {
    match line.trim().to_lowercase().as_str() {
        "y" | "yes" => true,
        "n" | "no" => false,
        _ => default,
    }
}

/// The `[Y/n]` / `[y/N]` suffix showing which answer is the default.
pub fn confirm_suffix(default: bool) -> &'static str {
    if default {
        "[Y/n]"
    } else {
        "[y/N]"
    }
}

/// Convert dialoguer errors to PitchError.
fn map_dialoguer_err(e: dialoguer::Error) -> PitchError {
    PitchError::Io(e.into())
}

/// Dialoguer theme without the default yellow `?` prefix.
fn prompt_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("".to_string()),
        ..ColorfulTheme::default()
    }
}

/// Read a single line for a yes/no question on `term`.
///
/// dialoguer's `Confirm` re-prompts on unrecognized keys, so the line is read
/// as free text and interpreted with [`answer`].
pub fn prompt_confirm(question: &str, default: bool, term: &Term) -> Result<bool> {
    let theme = prompt_theme();
    let line: String = Input::<String>::with_theme(&theme)
        .with_prompt(format!("{} {}", question, confirm_suffix(default)))
        .allow_empty(true)
        .interact_on(term)
        .map_err(map_dialoguer_err)?;
    Ok(answer(&line, default))
}
